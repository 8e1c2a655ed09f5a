use crate::cpu::{run_in_order, Execution, Policy, Process, Scheduler};
use crate::error::Result;

/// Shortest job first, without preemption.
///
/// Processes with equal burst times keep their input order.
pub struct Sjf;

impl Scheduler for Sjf {
    fn policy(&self) -> Policy {
        Policy::Sjf
    }

    fn execute(&self, mut processes: Vec<Process>) -> Result<Execution> {
        processes.sort_by_key(|process| process.burst);
        Ok(run_in_order(processes))
    }
}
