//! Contiguous memory allocation.
//!
//! Processes are placed one after the other, in input order, into a list of
//! partitions. A partition that receives a process shrinks by the process
//! size and stays available for later, smaller processes. There is no
//! compaction and nothing is ever freed.

use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{checked_sum, require_non_empty, Result};

/// How a partition is chosen among the ones large enough.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Policy {
    /// The first partition in list order.
    FirstFit,
    /// The smallest partition.
    BestFit,
    /// The largest partition.
    WorstFit,
}

impl Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::FirstFit => write!(f, "First Fit"),
            Policy::BestFit => write!(f, "Best Fit"),
            Policy::WorstFit => write!(f, "Worst Fit"),
        }
    }
}

/// A memory partition.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MemoryBlock {
    /// Position in the original list.
    pub id: usize,

    /// Size before any allocation.
    pub size: usize,

    /// Capacity left. Never grows.
    pub remaining: usize,

    /// Whether at least one process was placed here.
    pub used: bool,
}

impl MemoryBlock {
    fn new(id: usize, size: usize) -> MemoryBlock {
        MemoryBlock {
            id,
            size,
            remaining: size,
            used: false,
        }
    }

    fn fits(&self, size: usize) -> bool {
        self.remaining >= size
    }

    fn take(&mut self, size: usize) {
        self.remaining -= size;
        self.used = true;
    }
}

/// Where a process ended up.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Placement {
    /// Position of the process in the input.
    pub process: usize,

    pub size: usize,

    /// The partition holding the process, [`None`] if no partition was
    /// large enough.
    pub block: Option<usize>,
}

/// The outcome of an allocation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AllocationReport {
    pub policy: Policy,

    /// One entry per process, in input order.
    pub placements: Vec<Placement>,

    /// Partitions after the run, in input order.
    pub blocks: Vec<MemoryBlock>,

    pub allocated_processes: usize,

    pub total_processes: usize,

    /// Allocated bytes as a percentage of allocated plus free bytes.
    pub memory_utilization: f64,

    /// Capacity left in partitions that received at least one process.
    pub internal_fragmentation: usize,
}

impl AllocationReport {
    fn new(policy: Policy, placements: Vec<Placement>, blocks: Vec<MemoryBlock>) -> Self {
        let allocated_processes = placements
            .iter()
            .filter(|p| p.block.is_some())
            .count();
        let allocated: usize = placements
            .iter()
            .filter(|p| p.block.is_some())
            .map(|p| p.size)
            .sum();
        let free: usize = blocks.iter().map(|block| block.remaining).sum();
        let internal_fragmentation = blocks
            .iter()
            .filter(|block| block.used)
            .map(|block| block.remaining)
            .sum();

        let memory_utilization = if allocated + free == 0 {
            0.0
        } else {
            allocated as f64 / (allocated + free) as f64 * 100.0
        };

        AllocationReport {
            policy,
            total_processes: placements.len(),
            placements,
            blocks,
            allocated_processes,
            memory_utilization,
            internal_fragmentation,
        }
    }

    /// Bytes handed out to processes.
    pub fn allocated_bytes(&self) -> usize {
        self.placements
            .iter()
            .filter(|p| p.block.is_some())
            .map(|p| p.size)
            .sum()
    }

    /// Bytes left across every partition.
    pub fn free_bytes(&self) -> usize {
        self.blocks.iter().map(|block| block.remaining).sum()
    }

    /// Partitions that still have capacity left.
    pub fn remaining_blocks(&self) -> impl Iterator<Item = &MemoryBlock> {
        self.blocks.iter().filter(|block| block.remaining > 0)
    }
}

/// Places every process of `processes` into `blocks` under `policy`.
pub fn allocate(policy: Policy, blocks: &[usize], processes: &[usize]) -> Result<AllocationReport> {
    require_non_empty(blocks, "memory blocks")?;
    require_non_empty(processes, "process sizes")?;
    // Allocated plus free bytes never exceed this total.
    checked_sum(blocks, "total memory")?;

    let mut partitions: Vec<MemoryBlock> = blocks
        .iter()
        .enumerate()
        .map(|(id, &size)| MemoryBlock::new(id, size))
        .collect();

    let placements = processes
        .iter()
        .enumerate()
        .map(|(process, &size)| {
            let block = choose(policy, &partitions, size);
            if let Some(index) = block {
                partitions[index].take(size);
            }
            Placement {
                process,
                size,
                block,
            }
        })
        .collect();

    Ok(AllocationReport::new(policy, placements, partitions))
}

/// Picks the partition for a process of `size` bytes. Ties go to the
/// partition that comes first.
fn choose(policy: Policy, partitions: &[MemoryBlock], size: usize) -> Option<usize> {
    let mut candidates = partitions.iter().filter(|block| block.fits(size));

    let chosen = match policy {
        Policy::FirstFit => candidates.next(),
        Policy::BestFit => candidates.min_by_key(|block| block.remaining),
        Policy::WorstFit => candidates.fold(None, |largest: Option<&MemoryBlock>, block| {
            match largest {
                Some(current) if current.remaining >= block.remaining => Some(current),
                _ => Some(block),
            }
        }),
    };

    chosen.map(|block| block.id)
}
