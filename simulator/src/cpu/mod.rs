//! CPU scheduling.
//!
//! Every discipline implements [`Scheduler`]. A scheduler receives the
//! processes in input order, runs all of them to completion and returns
//! them in dispatch order together with the unit-by-unit timeline.

use std::fmt::{self, Display};
use std::num::NonZeroUsize;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{checked_sum, require_non_empty, Error, Result};

mod fcfs;
pub use fcfs::Fcfs;

mod sjf;
pub use sjf::Sjf;

mod round_robin;
pub use round_robin::RoundRobin;

mod priority;
pub use priority::Priority;

/// Exclusive bound on the sum of all burst times.
///
/// The timeline holds one entry per time unit, so the total is capped.
pub const MAX_TOTAL_BURST: usize = 1_000_000;

/// The identifier of a process.
///
/// Identifiers are assigned by input position, starting from 0.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
#[repr(transparent)]
pub struct Pid(usize);

impl Pid {
    pub fn new(index: usize) -> Pid {
        Pid(index)
    }

    /// The input position this process was created from.
    pub fn index(self) -> usize {
        self.0
    }
}

impl PartialEq<usize> for Pid {
    fn eq(&self, other: &usize) -> bool {
        self.0 == *other
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// A process and the times computed for it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Process {
    pub pid: Pid,

    /// Total CPU time the process needs.
    pub burst: usize,

    /// Higher is more urgent. Only the priority discipline reads it.
    pub priority: Option<i32>,

    /// Time spent ready but not executing.
    pub waiting: usize,

    /// Time from arrival (0) to completion.
    pub turnaround: usize,
}

impl Process {
    pub fn new(pid: Pid, burst: usize, priority: Option<i32>) -> Process {
        Process {
            pid,
            burst,
            priority,
            waiting: 0,
            turnaround: 0,
        }
    }
}

/// A scheduling discipline together with its parameters.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Policy {
    /// First come, first served.
    Fcfs,
    /// Shortest job first, non-preemptive.
    Sjf,
    /// Cyclic passes of at most `quantum` units per process.
    RoundRobin { quantum: NonZeroUsize },
    /// Highest priority first, non-preemptive.
    Priority,
}

impl Policy {
    /// Builds a round robin policy, rejecting a quantum of 0.
    pub fn round_robin(quantum: usize) -> Result<Policy> {
        let quantum = NonZeroUsize::new(quantum).ok_or(Error::InvalidParameter {
            name: "time quantum",
            value: quantum,
        })?;
        Ok(Policy::RoundRobin { quantum })
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fcfs => write!(f, "FCFS"),
            Policy::Sjf => write!(f, "SJF"),
            Policy::RoundRobin { quantum } => write!(f, "Round Robin (quantum {})", quantum),
            Policy::Priority => write!(f, "Priority"),
        }
    }
}

/// What a scheduler produces before the statistics are computed.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    /// Processes in dispatch order, with their times filled in.
    pub processes: Vec<Process>,

    /// The process executing during each time unit.
    pub timeline: Vec<Pid>,
}

/// The trait that every CPU scheduling discipline implements.
pub trait Scheduler {
    /// The policy this scheduler implements.
    fn policy(&self) -> Policy;

    /// Runs all the processes to completion.
    fn execute(&self, processes: Vec<Process>) -> Result<Execution>;
}

/// Runs the processes back to back in the order they are given.
///
/// This is the whole of every non-preemptive discipline once the
/// processes are sorted.
pub(crate) fn run_in_order(mut processes: Vec<Process>) -> Execution {
    let mut clock = 0;
    let mut timeline = Vec::new();

    for process in processes.iter_mut() {
        process.waiting = clock;
        process.turnaround = clock + process.burst;
        timeline.extend(std::iter::repeat(process.pid).take(process.burst));
        clock += process.burst;
    }

    Execution {
        processes,
        timeline,
    }
}

/// The outcome of a CPU scheduling simulation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Schedule {
    pub policy: Policy,

    /// Processes in dispatch order.
    pub processes: Vec<Process>,

    pub average_waiting_time: f64,

    pub average_turnaround_time: f64,

    /// Sum of all burst times.
    pub total_execution_time: usize,

    /// The process executing during each time unit.
    pub timeline: Vec<Pid>,
}

impl Schedule {
    fn new(policy: Policy, execution: Execution) -> Schedule {
        let count = execution.processes.len() as f64;
        let total_waiting: usize = execution.processes.iter().map(|p| p.waiting).sum();
        let total_turnaround: usize = execution
            .processes
            .iter()
            .map(|p| p.turnaround)
            .sum();
        let total_execution_time = execution.processes.iter().map(|p| p.burst).sum();

        Schedule {
            policy,
            processes: execution.processes,
            average_waiting_time: total_waiting as f64 / count,
            average_turnaround_time: total_turnaround as f64 / count,
            total_execution_time,
            timeline: execution.timeline,
        }
    }

    /// Looks up a process by its identifier.
    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|process| process.pid == pid)
    }

    /// The processes in dispatch order, without repetitions.
    pub fn dispatch_order(&self) -> Vec<Pid> {
        self.processes.iter().map(|process| process.pid).collect()
    }

    /// Waiting times indexed by process identifier.
    pub fn waiting_times(&self) -> Vec<usize> {
        self.by_pid(|process| process.waiting)
    }

    /// Turnaround times indexed by process identifier.
    pub fn turnaround_times(&self) -> Vec<usize> {
        self.by_pid(|process| process.turnaround)
    }

    fn by_pid(&self, value: impl Fn(&Process) -> usize) -> Vec<usize> {
        let mut values = vec![0; self.processes.len()];
        for process in &self.processes {
            values[process.pid.index()] = value(process);
        }
        values
    }
}

/// Runs `scheduler` over processes built from `bursts` and `priorities`.
///
/// Fails if the bursts add up to [`MAX_TOTAL_BURST`] or more.
pub fn run<S: Scheduler>(
    scheduler: &S,
    bursts: &[usize],
    priorities: Option<&[i32]>,
) -> Result<Schedule> {
    require_non_empty(bursts, "burst times")?;
    if let Some(priorities) = priorities {
        if priorities.len() != bursts.len() {
            return Err(Error::LengthMismatch {
                what: "priorities",
                expected: bursts.len(),
                found: priorities.len(),
            });
        }
    }

    let total = checked_sum(bursts, "total burst time")?;
    if total >= MAX_TOTAL_BURST {
        return Err(Error::OutOfRange {
            what: "total burst time",
            value: total,
            limit: MAX_TOTAL_BURST,
        });
    }

    let processes = bursts
        .iter()
        .enumerate()
        .map(|(index, &burst)| {
            let priority = priorities.map(|priorities| priorities[index]);
            Process::new(Pid::new(index), burst, priority)
        })
        .collect();

    let execution = scheduler.execute(processes)?;
    Ok(Schedule::new(scheduler.policy(), execution))
}

/// Simulates `policy` over `bursts`.
///
/// * `bursts` - the burst time of every process, in input order.
/// * `priorities` - one priority per process; required by [`Policy::Priority`]
///                  and ignored by the other disciplines.
pub fn simulate(policy: Policy, bursts: &[usize], priorities: Option<&[i32]>) -> Result<Schedule> {
    match policy {
        Policy::Fcfs => run(&Fcfs, bursts, priorities),
        Policy::Sjf => run(&Sjf, bursts, priorities),
        Policy::RoundRobin { quantum } => run(&RoundRobin::new(quantum), bursts, priorities),
        Policy::Priority => run(&Priority, bursts, priorities),
    }
}
