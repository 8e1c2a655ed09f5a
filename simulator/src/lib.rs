//! An operating-system algorithms library.
//!
//! This library computes the classic resource-management algorithms
//! step by step, the way they are taught:
//!
//! * [`cpu`] - CPU scheduling (FCFS, SJF, Round Robin, Priority)
//! * [`disk`] - disk head scheduling (FCFS, SSTF, SCAN, C-SCAN, LOOK, C-LOOK)
//! * [`memory`] - contiguous allocation (First, Best and Worst Fit)
//! * [`paging`] - page replacement (FIFO, LRU, Optimal)
//! * [`deadlock`] - cycle detection and the Banker's algorithm
//!
//! Every entry point is a pure function of its inputs. Inputs are validated
//! before anything is computed and the call either fails as a whole with an
//! [`Error`] or returns a complete report.

pub mod cpu;
pub mod deadlock;
pub mod disk;
pub mod memory;
pub mod paging;

mod error;

pub use crate::error::{Error, Result};

pub use crate::cpu::{Pid, Schedule};
pub use crate::deadlock::{DetectionReport, SafetyReport};
pub use crate::disk::SeekReport;
pub use crate::memory::AllocationReport;
pub use crate::paging::PagingReport;

/// Simulates a CPU scheduling `policy` over `bursts`.
///
/// * `bursts` - the burst time of every process, in input order.
/// * `priorities` - one priority per process, higher is more urgent. Only
///                  [`cpu::Policy::Priority`] needs them.
pub fn schedule_cpu(
    policy: cpu::Policy,
    bursts: &[usize],
    priorities: Option<&[i32]>,
) -> Result<Schedule> {
    cpu::simulate(policy, bursts, priorities)
}

/// Services disk `requests` starting at `head` on a disk of `cylinders`
/// cylinders.
pub fn schedule_disk(
    policy: disk::Policy,
    requests: &[usize],
    head: usize,
    cylinders: usize,
) -> Result<SeekReport> {
    disk::Disk::new(cylinders)?.schedule(policy, requests, head)
}

/// Places processes of the given sizes into memory blocks.
pub fn allocate_memory(
    policy: memory::Policy,
    blocks: &[usize],
    processes: &[usize],
) -> Result<AllocationReport> {
    memory::allocate(policy, blocks, processes)
}

/// Runs a reference string through `capacity` page frames.
pub fn replace_pages(
    policy: paging::Policy,
    references: &[usize],
    capacity: usize,
) -> Result<PagingReport> {
    paging::simulate(policy, references, capacity)
}

/// Looks for a cycle in the resource-allocation graph made of `edges`.
pub fn detect_deadlock(edges: Vec<deadlock::Edge>) -> Result<DetectionReport> {
    deadlock::graph::detect(edges)
}

/// Runs the Banker's safety check.
///
/// * `processes`, `resources` - the declared matrix dimensions.
/// * `allocation`, `max` - one row per process, one column per resource.
/// * `available` - one entry per resource.
pub fn check_safety(
    processes: usize,
    resources: usize,
    allocation: Vec<Vec<usize>>,
    max: Vec<Vec<usize>>,
    available: Vec<usize>,
) -> Result<SafetyReport> {
    deadlock::banker::check(processes, resources, allocation, max, available)
}
