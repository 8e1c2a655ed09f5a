use std::cmp::Reverse;

use crate::cpu::{run_in_order, Execution, Policy, Process, Scheduler};
use crate::error::{Error, Result};

/// Non-preemptive priority scheduling. A higher number is more urgent and
/// equal priorities keep their input order.
pub struct Priority;

impl Scheduler for Priority {
    fn policy(&self) -> Policy {
        Policy::Priority
    }

    fn execute(&self, mut processes: Vec<Process>) -> Result<Execution> {
        let missing = processes
            .iter()
            .filter(|process| process.priority.is_none())
            .count();
        if missing > 0 {
            return Err(Error::LengthMismatch {
                what: "priorities",
                expected: processes.len(),
                found: processes.len() - missing,
            });
        }

        processes.sort_by_key(|process| Reverse(process.priority));
        Ok(run_in_order(processes))
    }
}
