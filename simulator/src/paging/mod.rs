//! Page replacement.
//!
//! A fixed number of frames is filled one reference at a time. Frames keep
//! their slot: a new page goes to the first free slot, or to the slot of the
//! page chosen by the [`Evict`] rule once every slot is taken.

use std::fmt::{self, Display};
use std::num::NonZeroUsize;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{require_non_empty, Error, Result};

mod fifo;
pub use fifo::Fifo;

mod lru;
pub use lru::Lru;

mod optimal;
pub use optimal::Optimal;

/// The eviction rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Policy {
    Fifo,
    Lru,
    Optimal,
}

impl Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fifo => write!(f, "FIFO"),
            Policy::Lru => write!(f, "LRU"),
            Policy::Optimal => write!(f, "Optimal"),
        }
    }
}

/// The trait that every eviction rule implements.
///
/// The simulation reports every reference through [`Evict::touch`] and
/// every page it brings in through [`Evict::load`]. It calls
/// [`Evict::victim`] only when all the frames are taken.
pub trait Evict {
    /// `page` is referenced at `position` of the reference string.
    fn touch(&mut self, _page: usize, _position: usize) {}

    /// `page` was placed into `slot` at `position`.
    fn load(&mut self, _slot: usize, _page: usize, _position: usize) {}

    /// Returns the slot whose page has to leave.
    ///
    /// * `frames` - the page held by each slot.
    /// * `references` - the whole reference string.
    /// * `position` - the reference that caused the fault.
    fn victim(&self, frames: &[usize], references: &[usize], position: usize) -> usize;
}

/// What happened on a single reference.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Step {
    pub page: usize,

    /// `true` if the page was not resident.
    pub fault: bool,

    /// The page that made room, if any.
    pub evicted: Option<usize>,

    /// Frame contents after this reference, by slot.
    pub frames: Vec<usize>,
}

/// The outcome of a page replacement simulation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PagingReport {
    pub policy: Policy,

    pub capacity: usize,

    /// The reference string.
    pub pages: Vec<usize>,

    pub page_faults: usize,

    /// One entry per reference.
    pub steps: Vec<Step>,
}

impl PagingReport {
    pub fn hits(&self) -> usize {
        self.pages.len() - self.page_faults
    }

    /// Whether each reference faulted.
    pub fn fault_sequence(&self) -> Vec<bool> {
        self.steps.iter().map(|step| step.fault).collect()
    }

    /// Frame contents after each reference.
    pub fn frame_history(&self) -> Vec<&[usize]> {
        self.steps.iter().map(|step| step.frames.as_slice()).collect()
    }

    pub fn fault_ratio(&self) -> f64 {
        self.page_faults as f64 / self.pages.len() as f64
    }

    pub fn hit_ratio(&self) -> f64 {
        self.hits() as f64 / self.pages.len() as f64
    }
}

/// Runs the reference string through `capacity` frames managed by `evict`.
pub fn run<E: Evict>(
    policy: Policy,
    evict: &mut E,
    references: &[usize],
    capacity: usize,
) -> Result<PagingReport> {
    require_non_empty(references, "reference string")?;
    let capacity = NonZeroUsize::new(capacity).ok_or(Error::InvalidParameter {
        name: "frame capacity",
        value: capacity,
    })?;

    let mut frames: Vec<usize> = Vec::with_capacity(capacity.get());
    let mut steps = Vec::with_capacity(references.len());
    let mut page_faults = 0;

    for (position, &page) in references.iter().enumerate() {
        evict.touch(page, position);

        if frames.contains(&page) {
            steps.push(Step {
                page,
                fault: false,
                evicted: None,
                frames: frames.clone(),
            });
            continue;
        }

        page_faults += 1;
        let evicted = if frames.len() < capacity.get() {
            frames.push(page);
            evict.load(frames.len() - 1, page, position);
            None
        } else {
            let slot = evict.victim(&frames, references, position);
            let evicted = std::mem::replace(&mut frames[slot], page);
            evict.load(slot, page, position);
            Some(evicted)
        };

        steps.push(Step {
            page,
            fault: true,
            evicted,
            frames: frames.clone(),
        });
    }

    Ok(PagingReport {
        policy,
        capacity: capacity.get(),
        pages: references.to_vec(),
        page_faults,
        steps,
    })
}

/// Simulates `policy` over `references` with `capacity` frames.
pub fn simulate(policy: Policy, references: &[usize], capacity: usize) -> Result<PagingReport> {
    match policy {
        Policy::Fifo => run(policy, &mut Fifo::default(), references, capacity),
        Policy::Lru => run(policy, &mut Lru::default(), references, capacity),
        Policy::Optimal => run(policy, &mut Optimal, references, capacity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCES: [usize; 20] = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2, 1, 2, 0, 1, 7, 0, 1];

    #[test]
    fn fifo_textbook_string() {
        let report = simulate(Policy::Fifo, &REFERENCES, 3).unwrap();

        assert_eq!(report.page_faults, 15);
        assert_eq!(report.hits(), 5);
        assert_eq!(report.steps[3].frames, vec![2, 0, 1]);
        assert_eq!(report.steps[3].evicted, Some(7));
    }

    #[test]
    fn lru_textbook_string() {
        let report = simulate(Policy::Lru, &REFERENCES, 3).unwrap();
        assert_eq!(report.page_faults, 12);
    }

    #[test]
    fn optimal_textbook_string() {
        let report = simulate(Policy::Optimal, &REFERENCES, 3).unwrap();

        assert_eq!(report.page_faults, 9);
        // 7 is not needed again until the end, so it goes first.
        assert_eq!(report.steps[3].evicted, Some(7));
    }

    #[test]
    fn optimal_prefers_pages_never_used_again() {
        let report = simulate(Policy::Optimal, &[1, 2, 3, 1], 2).unwrap();

        assert_eq!(report.steps[2].evicted, Some(2));
        assert_eq!(report.fault_sequence(), vec![true, true, true, false]);
    }

    #[test]
    fn hits_leave_frames_untouched() {
        let report = simulate(Policy::Lru, &[1, 2, 1, 1], 3).unwrap();

        assert_eq!(report.fault_sequence(), vec![true, true, false, false]);
        assert_eq!(report.frame_history()[3], &[1, 2]);
    }

    #[test]
    fn snapshots_never_exceed_capacity() {
        let report = simulate(Policy::Fifo, &REFERENCES, 4).unwrap();

        assert_eq!(report.steps.len(), REFERENCES.len());
        assert!(report.steps.iter().all(|step| step.frames.len() <= 4));
        assert!(report
            .steps
            .iter()
            .all(|step| step.frames.contains(&step.page)));
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        assert_eq!(
            simulate(Policy::Fifo, &REFERENCES, 0),
            Err(Error::InvalidParameter {
                name: "frame capacity",
                value: 0
            })
        );
        assert!(simulate(Policy::Optimal, &[], 3).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn policy() -> impl Strategy<Value = Policy> {
        prop_oneof![Just(Policy::Fifo), Just(Policy::Lru), Just(Policy::Optimal)]
    }

    proptest! {
        /// Running twice yields the same record.
        #[test]
        fn prop_deterministic(
            policy in policy(),
            references in prop::collection::vec(0usize..8, 1..60),
            capacity in 1usize..6
        ) {
            prop_assert_eq!(
                simulate(policy, &references, capacity).unwrap(),
                simulate(policy, &references, capacity).unwrap()
            );
        }

        /// No rule beats the optimal one.
        #[test]
        fn prop_optimal_is_a_lower_bound(
            references in prop::collection::vec(0usize..8, 1..60),
            capacity in 1usize..6
        ) {
            let optimal = simulate(Policy::Optimal, &references, capacity).unwrap();
            let fifo = simulate(Policy::Fifo, &references, capacity).unwrap();
            let lru = simulate(Policy::Lru, &references, capacity).unwrap();

            prop_assert!(optimal.page_faults <= fifo.page_faults);
            prop_assert!(optimal.page_faults <= lru.page_faults);
        }

        /// Faults are at least the number of distinct pages.
        #[test]
        fn prop_faults_bounded(
            references in prop::collection::vec(0usize..8, 1..60),
            capacity in 1usize..6
        ) {
            let report = simulate(Policy::Lru, &references, capacity).unwrap();
            let mut distinct = references.clone();
            distinct.sort_unstable();
            distinct.dedup();

            prop_assert!(report.page_faults >= distinct.len());
            prop_assert!(report.page_faults <= references.len());
            prop_assert_eq!(
                report.fault_sequence().iter().filter(|&&fault| fault).count(),
                report.page_faults
            );
        }
    }
}
