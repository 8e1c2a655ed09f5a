//! Disk head scheduling.
//!
//! The head starts at a given cylinder and services every pending request
//! once. The report keeps each movement as a [`Seek`] so the whole path can
//! be replayed.

use std::fmt::{self, Display};
use std::num::NonZeroUsize;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{checked_sum, require_non_empty, Error, Result};

/// Number of cylinders of the disk when none is given.
pub const DEFAULT_CYLINDERS: usize = 200;

/// The order in which pending requests are serviced.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Policy {
    /// Requests in arrival order.
    Fcfs,
    /// Closest pending request first.
    Sstf,
    /// Sweep up to the last cylinder, then back down.
    Scan,
    /// Sweep up to the last cylinder, return to cylinder 0 and sweep up again.
    CScan,
    /// Like SCAN, turning around at the last request.
    Look,
    /// Like C-SCAN, returning to the lowest pending request.
    CLook,
}

impl Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Policy::Fcfs => "FCFS",
            Policy::Sstf => "SSTF",
            Policy::Scan => "SCAN",
            Policy::CScan => "C-SCAN",
            Policy::Look => "LOOK",
            Policy::CLook => "C-LOOK",
        };
        write!(f, "{}", name)
    }
}

/// One movement of the head.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Seek {
    pub from: usize,
    pub to: usize,
    pub distance: usize,

    /// The return from the last cylinder to cylinder 0 in C-SCAN.
    /// It is not counted as head movement.
    pub wrap: bool,
}

/// The outcome of a disk scheduling simulation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SeekReport {
    pub policy: Policy,

    pub cylinders: usize,

    /// Visited cylinders, starting with the initial head position.
    pub sequence: Vec<usize>,

    pub seeks: Vec<Seek>,

    /// Sum of all seek distances except the C-SCAN wrap.
    pub total_head_movement: usize,

    /// Total head movement divided by the number of requests.
    pub average_seek_time: f64,
}

/// A disk with a fixed number of cylinders, numbered from 0.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Disk {
    cylinders: NonZeroUsize,
}

impl Default for Disk {
    fn default() -> Self {
        Disk {
            cylinders: NonZeroUsize::new(DEFAULT_CYLINDERS).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl Disk {
    pub fn new(cylinders: usize) -> Result<Disk> {
        let cylinders = NonZeroUsize::new(cylinders).ok_or(Error::InvalidParameter {
            name: "cylinder count",
            value: cylinders,
        })?;
        Ok(Disk { cylinders })
    }

    fn last_cylinder(&self) -> usize {
        self.cylinders.get() - 1
    }

    /// Services `requests` under `policy` with the head starting at `head`.
    pub fn schedule(&self, policy: Policy, requests: &[usize], head: usize) -> Result<SeekReport> {
        require_non_empty(requests, "disk requests")?;
        self.check_cylinder("head position", head)?;
        for &request in requests {
            self.check_cylinder("request", request)?;
        }

        let stops = match policy {
            Policy::Fcfs => requests
                .iter()
                .map(|&cylinder| Stop::at(cylinder))
                .collect(),
            Policy::Sstf => shortest_seek_first(requests, head),
            Policy::Scan => self.scan(requests, head),
            Policy::CScan => self.circular_scan(requests, head),
            Policy::Look => look(requests, head),
            Policy::CLook => circular_look(requests, head),
        };

        self.report(policy, head, requests.len(), stops)
    }

    fn check_cylinder(&self, what: &'static str, cylinder: usize) -> Result<()> {
        if cylinder >= self.cylinders.get() {
            return Err(Error::OutOfRange {
                what,
                value: cylinder,
                limit: self.cylinders.get(),
            });
        }
        Ok(())
    }

    fn scan(&self, requests: &[usize], head: usize) -> Vec<Stop> {
        let (lower, upper) = split_at_head(requests, head);
        let mut stops: Vec<Stop> = upper
            .iter()
            .map(|&cylinder| Stop::at(cylinder))
            .collect();
        self.reach_last_cylinder(&mut stops, head);
        stops.extend(lower.iter().rev().map(|&cylinder| Stop::at(cylinder)));
        stops
    }

    fn circular_scan(&self, requests: &[usize], head: usize) -> Vec<Stop> {
        let (lower, upper) = split_at_head(requests, head);
        let mut stops: Vec<Stop> = upper
            .iter()
            .map(|&cylinder| Stop::at(cylinder))
            .collect();
        self.reach_last_cylinder(&mut stops, head);
        if !lower.is_empty() {
            stops.push(Stop { cylinder: 0, wrap: true });
            stops.extend(lower.iter().map(|&cylinder| Stop::at(cylinder)));
        }
        stops
    }

    fn reach_last_cylinder(&self, stops: &mut Vec<Stop>, head: usize) {
        let current = stops.last().map_or(head, |stop| stop.cylinder);
        if current != self.last_cylinder() {
            stops.push(Stop::at(self.last_cylinder()));
        }
    }

    fn report(
        &self,
        policy: Policy,
        head: usize,
        request_count: usize,
        stops: Vec<Stop>,
    ) -> Result<SeekReport> {
        let mut sequence = Vec::with_capacity(stops.len() + 1);
        let mut seeks = Vec::with_capacity(stops.len());
        sequence.push(head);

        let mut current = head;
        for stop in stops {
            seeks.push(Seek {
                from: current,
                to: stop.cylinder,
                distance: current.abs_diff(stop.cylinder),
                wrap: stop.wrap,
            });
            sequence.push(stop.cylinder);
            current = stop.cylinder;
        }

        let total_head_movement = checked_sum(
            seeks.iter().filter(|seek| !seek.wrap).map(|seek| &seek.distance),
            "total head movement",
        )?;

        Ok(SeekReport {
            policy,
            cylinders: self.cylinders.get(),
            sequence,
            seeks,
            total_head_movement,
            average_seek_time: total_head_movement as f64 / request_count as f64,
        })
    }
}

/// Services `requests` on a disk of [`DEFAULT_CYLINDERS`] cylinders.
pub fn schedule(policy: Policy, requests: &[usize], head: usize) -> Result<SeekReport> {
    Disk::default().schedule(policy, requests, head)
}

#[derive(Debug, Copy, Clone)]
struct Stop {
    cylinder: usize,
    wrap: bool,
}

impl Stop {
    fn at(cylinder: usize) -> Stop {
        Stop {
            cylinder,
            wrap: false,
        }
    }
}

/// Sorts the requests and splits them into those below the head and
/// those at or above it.
fn split_at_head(requests: &[usize], head: usize) -> (Vec<usize>, Vec<usize>) {
    let mut sorted = requests.to_vec();
    sorted.sort_unstable();
    let pivot = sorted.partition_point(|&cylinder| cylinder < head);
    let upper = sorted.split_off(pivot);
    (sorted, upper)
}

fn shortest_seek_first(requests: &[usize], head: usize) -> Vec<Stop> {
    let mut served = vec![false; requests.len()];
    let mut stops = Vec::with_capacity(requests.len());
    let mut current = head;

    for _ in 0..requests.len() {
        // min_by_key keeps the first of equally close requests.
        let Some(next) = (0..requests.len())
            .filter(|&index| !served[index])
            .min_by_key(|&index| requests[index].abs_diff(current))
        else {
            break;
        };

        served[next] = true;
        current = requests[next];
        stops.push(Stop::at(current));
    }

    stops
}

fn look(requests: &[usize], head: usize) -> Vec<Stop> {
    let (lower, upper) = split_at_head(requests, head);
    upper
        .iter()
        .chain(lower.iter().rev())
        .map(|&cylinder| Stop::at(cylinder))
        .collect()
}

fn circular_look(requests: &[usize], head: usize) -> Vec<Stop> {
    let (lower, upper) = split_at_head(requests, head);
    upper
        .iter()
        .chain(lower.iter())
        .map(|&cylinder| Stop::at(cylinder))
        .collect()
}
