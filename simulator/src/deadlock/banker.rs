#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{checked_sum, Error, Result};

/// Allocation state of `n` processes over `m` resource types.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ResourceState {
    allocation: Vec<Vec<usize>>,
    max: Vec<Vec<usize>>,
    need: Vec<Vec<usize>>,
    available: Vec<usize>,
}

/// One process completing during the safety check.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SafetyStep {
    pub process: usize,

    /// Work vector before the process releases its allocation.
    pub work_before: Vec<usize>,

    /// Work vector after the release.
    pub work_after: Vec<usize>,
}

/// The outcome of the safety check.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SafetyReport {
    pub allocation: Vec<Vec<usize>>,
    pub max: Vec<Vec<usize>>,

    /// `Max - Allocation`.
    pub need: Vec<Vec<usize>>,

    pub available: Vec<usize>,

    /// `true` if every process can complete.
    pub safe: bool,

    /// Process names in completion order. Empty when unsafe.
    pub sequence: Vec<String>,

    /// Processes that could complete, in order, even when unsafe.
    pub steps: Vec<SafetyStep>,
}

/// The answer to a resource request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum RequestOutcome {
    /// The request leaves the system safe. `state` is the state after it.
    Granted {
        state: ResourceState,
        report: SafetyReport,
    },

    /// Not enough resources are available right now.
    MustWait,

    /// Granting the request would leave the system unsafe.
    Unsafe(SafetyReport),
}

impl ResourceState {
    /// Validates the matrices against the declared process and resource
    /// counts and derives the need matrix.
    pub fn new(
        processes: usize,
        resources: usize,
        allocation: Vec<Vec<usize>>,
        max: Vec<Vec<usize>>,
        available: Vec<usize>,
    ) -> Result<ResourceState> {
        if processes == 0 {
            return Err(Error::InvalidParameter {
                name: "process count",
                value: processes,
            });
        }
        if resources == 0 {
            return Err(Error::InvalidParameter {
                name: "resource count",
                value: resources,
            });
        }

        check_matrix("allocation", &allocation, processes, resources)?;
        check_matrix("max", &max, processes, resources)?;
        if available.len() != resources {
            return Err(Error::LengthMismatch {
                what: "available",
                expected: resources,
                found: available.len(),
            });
        }

        let need = max
            .iter()
            .zip(&allocation)
            .enumerate()
            .map(|(process, (max_row, allocation_row))| {
                max_row
                    .iter()
                    .zip(allocation_row)
                    .enumerate()
                    .map(|(resource, (&limit, &held))| {
                        limit
                            .checked_sub(held)
                            .ok_or(Error::NeedExceedsMaximum { process, resource })
                    })
                    .collect::<Result<Vec<usize>>>()
            })
            .collect::<Result<Vec<Vec<usize>>>>()?;

        // The work vector grows up to available plus every allocation.
        for (resource, &free) in available.iter().enumerate() {
            let held = allocation.iter().map(|row| &row[resource]);
            checked_sum(std::iter::once(&free).chain(held), "total resources")?;
        }

        Ok(ResourceState {
            allocation,
            max,
            need,
            available,
        })
    }

    pub fn processes(&self) -> usize {
        self.allocation.len()
    }

    pub fn resources(&self) -> usize {
        self.available.len()
    }

    pub fn need(&self) -> &[Vec<usize>] {
        &self.need
    }

    pub fn available(&self) -> &[usize] {
        &self.available
    }

    /// Runs the safety algorithm.
    ///
    /// Each pass picks the lowest-numbered unfinished process whose need
    /// fits in the work vector, releases its allocation and starts over
    /// from process 0. The check stops when every process has finished or
    /// when a pass finds nobody.
    pub fn check_safety(&self) -> SafetyReport {
        let mut work = self.available.clone();
        let mut finished = vec![false; self.processes()];
        let mut steps = Vec::new();

        while steps.len() < self.processes() {
            let candidate = (0..self.processes())
                .find(|&process| !finished[process] && fits(&self.need[process], &work));
            let Some(process) = candidate else {
                break;
            };

            let work_before = work.clone();
            for (available, held) in work.iter_mut().zip(&self.allocation[process]) {
                *available += held;
            }
            finished[process] = true;
            steps.push(SafetyStep {
                process,
                work_before,
                work_after: work.clone(),
            });
        }

        let safe = steps.len() == self.processes();
        let sequence = if safe {
            steps.iter().map(|step| format!("P{}", step.process)).collect()
        } else {
            Vec::new()
        };

        SafetyReport {
            allocation: self.allocation.clone(),
            max: self.max.clone(),
            need: self.need.clone(),
            available: self.available.clone(),
            safe,
            sequence,
            steps,
        }
    }

    /// Decides whether `process` may receive `request` right now.
    pub fn request(&self, process: usize, request: &[usize]) -> Result<RequestOutcome> {
        if process >= self.processes() {
            return Err(Error::UnknownProcess(process));
        }
        if request.len() != self.resources() {
            return Err(Error::LengthMismatch {
                what: "request",
                expected: self.resources(),
                found: request.len(),
            });
        }
        if !fits(request, &self.need[process]) {
            return Err(Error::RequestExceedsClaim { process });
        }
        if !fits(request, &self.available) {
            return Ok(RequestOutcome::MustWait);
        }

        let mut state = self.clone();
        for (resource, &amount) in request.iter().enumerate() {
            state.available[resource] -= amount;
            state.allocation[process][resource] += amount;
            state.need[process][resource] -= amount;
        }

        let report = state.check_safety();
        if report.safe {
            Ok(RequestOutcome::Granted { state, report })
        } else {
            Ok(RequestOutcome::Unsafe(report))
        }
    }
}

/// Runs the safety algorithm on freshly validated matrices.
pub fn check(
    processes: usize,
    resources: usize,
    allocation: Vec<Vec<usize>>,
    max: Vec<Vec<usize>>,
    available: Vec<usize>,
) -> Result<SafetyReport> {
    ResourceState::new(processes, resources, allocation, max, available)
        .map(|state| state.check_safety())
}

fn check_matrix(
    what: &'static str,
    matrix: &[Vec<usize>],
    rows: usize,
    columns: usize,
) -> Result<()> {
    if matrix.len() != rows {
        return Err(Error::LengthMismatch {
            what,
            expected: rows,
            found: matrix.len(),
        });
    }
    for row in matrix {
        if row.len() != columns {
            return Err(Error::LengthMismatch {
                what,
                expected: columns,
                found: row.len(),
            });
        }
    }
    Ok(())
}

/// Element-wise `demand <= supply`.
fn fits(demand: &[usize], supply: &[usize]) -> bool {
    demand.iter().zip(supply).all(|(demand, supply)| demand <= supply)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    type Inputs = (usize, usize, Vec<Vec<usize>>, Vec<Vec<usize>>, Vec<usize>);

    /// Allocation, max and available for 1..5 processes over 1..4 resources.
    fn state() -> impl Strategy<Value = Inputs> {
        (1usize..5, 1usize..4).prop_flat_map(|(processes, resources)| {
            let row = prop::collection::vec((0usize..6, 0usize..6), resources);
            (
                prop::collection::vec(row, processes),
                prop::collection::vec(0usize..8, resources),
            )
                .prop_map(move |(rows, available)| {
                    let allocation: Vec<Vec<usize>> = rows
                        .iter()
                        .map(|row| row.iter().map(|&(held, _)| held).collect())
                        .collect();
                    let max: Vec<Vec<usize>> = rows
                        .iter()
                        .map(|row| row.iter().map(|&(held, extra)| held + extra).collect())
                        .collect();
                    (processes, resources, allocation, max, available)
                })
        })
    }

    proptest! {
        /// Running twice yields the same record.
        #[test]
        fn prop_deterministic(input in state()) {
            let (processes, resources, allocation, max, available) = input;
            let first = check(
                processes,
                resources,
                allocation.clone(),
                max.clone(),
                available.clone(),
            );
            let second = check(processes, resources, allocation, max, available);
            prop_assert_eq!(first, second);
        }

        /// A safe state lists every process exactly once.
        #[test]
        fn prop_safe_sequence_is_complete(input in state()) {
            let (processes, resources, allocation, max, available) = input;
            let report = check(processes, resources, allocation, max, available).unwrap();
            if report.safe {
                let mut finished: Vec<usize> =
                    report.steps.iter().map(|step| step.process).collect();
                finished.sort_unstable();
                prop_assert_eq!(finished, (0..processes).collect::<Vec<_>>());
            }
        }
    }
}
