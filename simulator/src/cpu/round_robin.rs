use std::iter;
use std::num::NonZeroUsize;

use crate::cpu::{Execution, Policy, Process, Scheduler};
use crate::error::Result;

/// Round robin over the processes in input order.
///
/// Every pass gives each unfinished process at most `quantum` units. A
/// process's completion time is its turnaround time and its waiting time is
/// the completion time minus its burst.
pub struct RoundRobin {
    quantum: NonZeroUsize,
}

impl RoundRobin {
    pub fn new(quantum: NonZeroUsize) -> Self {
        RoundRobin { quantum }
    }
}

impl Scheduler for RoundRobin {
    fn policy(&self) -> Policy {
        Policy::RoundRobin {
            quantum: self.quantum,
        }
    }

    fn execute(&self, mut processes: Vec<Process>) -> Result<Execution> {
        let mut remaining: Vec<usize> = processes
            .iter()
            .map(|process| process.burst)
            .collect();
        let mut clock = 0;
        let mut timeline = Vec::new();

        loop {
            let mut done = true;

            for (process, left) in processes.iter_mut().zip(remaining.iter_mut()) {
                if *left == 0 {
                    continue;
                }
                done = false;

                let slice = (*left).min(self.quantum.get());
                clock += slice;
                *left -= slice;
                timeline.extend(iter::repeat(process.pid).take(slice));

                if *left == 0 {
                    process.turnaround = clock;
                    process.waiting = clock - process.burst;
                }
            }

            if done {
                break;
            }
        }

        Ok(Execution {
            processes,
            timeline,
        })
    }
}
