use crate::cpu::{run_in_order, Execution, Policy, Process, Scheduler};
use crate::error::Result;

/// First come, first served: processes run in input order.
pub struct Fcfs;

impl Scheduler for Fcfs {
    fn policy(&self) -> Policy {
        Policy::Fcfs
    }

    fn execute(&self, processes: Vec<Process>) -> Result<Execution> {
        Ok(run_in_order(processes))
    }
}
