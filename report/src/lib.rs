//! Text input and output for the [`simulator`] crate.
//!
//! The functions in this crate take the inputs the way a user types them,
//! parse them with [`parse`], run one simulation and wrap the result in a
//! [`Report`] that renders as a step-by-step trace.

use std::fmt::{self, Display};

use simulator::deadlock::{RequestOutcome, ResourceState};
use simulator::{cpu, disk, memory, paging};
use simulator::{
    AllocationReport, DetectionReport, PagingReport, SafetyReport, Schedule, SeekReport,
};
use thiserror::Error;

pub mod parse;

pub use parse::ParseError;

/// Errors returned while producing a [`Report`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The text could not be turned into numbers.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The simulation refused the inputs.
    #[error("invalid input: {0}")]
    Simulation(#[from] simulator::Error),
}

/// The answer to a Banker's resource request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RequestReport {
    pub process: usize,
    pub request: Vec<usize>,
    pub outcome: RequestOutcome,
}

/// The result of any simulation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Report {
    Cpu(Schedule),
    Disk(SeekReport),
    Memory(AllocationReport),
    Paging(PagingReport),
    Detection(DetectionReport),
    Safety(SafetyReport),
    Request(RequestReport),
}

/// Schedules the processes whose burst times are listed in `bursts`.
///
/// ## Example
///
/// ```rust
/// use simulator::cpu::Policy;
///
/// let report = report::cpu(Policy::Fcfs, "5 8 12", None).unwrap();
/// println!("{}", report::format_report(&report));
/// ```
pub fn cpu(policy: cpu::Policy, bursts: &str, priorities: Option<&str>) -> Result<Report, Error> {
    let bursts = parse::numbers(bursts, "burst times")?;
    let priorities = priorities
        .map(|text| parse::signed(text, "priorities"))
        .transpose()?;
    let schedule = simulator::schedule_cpu(policy, &bursts, priorities.as_deref())?;
    Ok(Report::Cpu(schedule))
}

/// Services the disk requests listed in `requests`.
pub fn disk(
    policy: disk::Policy,
    requests: &str,
    head: &str,
    cylinders: usize,
) -> Result<Report, Error> {
    let requests = parse::numbers(requests, "disk requests")?;
    let head = parse::number(head, "head position")?;
    let seeks = simulator::schedule_disk(policy, &requests, head, cylinders)?;
    Ok(Report::Disk(seeks))
}

/// Places the processes listed in `processes` into `blocks`.
pub fn memory(policy: memory::Policy, blocks: &str, processes: &str) -> Result<Report, Error> {
    let blocks = parse::numbers(blocks, "memory blocks")?;
    let processes = parse::numbers(processes, "process sizes")?;
    let allocation = simulator::allocate_memory(policy, &blocks, &processes)?;
    Ok(Report::Memory(allocation))
}

/// Runs the reference string `pages` through `capacity` frames.
pub fn paging(policy: paging::Policy, pages: &str, capacity: &str) -> Result<Report, Error> {
    let pages = parse::numbers(pages, "reference string")?;
    let capacity = parse::number(capacity, "frame capacity")?;
    let report = simulator::replace_pages(policy, &pages, capacity)?;
    Ok(Report::Paging(report))
}

/// Checks the graph described by `edges` for a deadlock.
pub fn detection(edges: &str) -> Result<Report, Error> {
    let edges = parse::edges(edges)?;
    let report = simulator::detect_deadlock(edges)?;
    Ok(Report::Detection(report))
}

/// Banker's inputs as typed: one text row per process.
#[derive(Debug, Clone)]
pub struct BankerInput<'a> {
    pub processes: usize,
    pub resources: usize,
    pub allocation: &'a [String],
    pub max: &'a [String],
    pub available: &'a str,
}

type Matrices = (Vec<Vec<usize>>, Vec<Vec<usize>>, Vec<usize>);

impl BankerInput<'_> {
    fn matrices(&self) -> Result<Matrices, Error> {
        let allocation = parse::matrix(
            self.allocation,
            "allocation",
            self.processes,
            self.resources,
        )?;
        let max = parse::matrix(self.max, "max", self.processes, self.resources)?;
        let available = parse::numbers(self.available, "available")?;
        Ok((allocation, max, available))
    }
}

/// Runs the Banker's safety check.
pub fn safety(input: &BankerInput) -> Result<Report, Error> {
    let (allocation, max, available) = input.matrices()?;
    let report = simulator::check_safety(
        input.processes,
        input.resources,
        allocation,
        max,
        available,
    )?;
    Ok(Report::Safety(report))
}

/// Runs the Banker's request algorithm for `process` asking for `request`.
pub fn request(input: &BankerInput, process: usize, request: &str) -> Result<Report, Error> {
    let (allocation, max, available) = input.matrices()?;
    let state = ResourceState::new(
        input.processes,
        input.resources,
        allocation,
        max,
        available,
    )?;
    let request = parse::numbers(request, "request")?;
    let outcome = state.request(process, &request)?;
    Ok(Report::Request(RequestReport {
        process,
        request,
        outcome,
    }))
}

fn join(values: &[usize]) -> String {
    values
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_schedule(f: &mut fmt::Formatter<'_>, schedule: &Schedule) -> fmt::Result {
    writeln!(f, "===== CPU Scheduling: {} =====", schedule.policy)?;
    writeln!(f, "PID\tBURST\tPRI\tWAIT\tTURN")?;
    for process in &schedule.processes {
        let priority = process
            .priority
            .map_or("-".to_string(), |priority| priority.to_string());
        writeln!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            process.pid, process.burst, priority, process.waiting, process.turnaround
        )?;
    }

    writeln!(f, "Timeline:")?;
    let mut start = 0;
    for segment in schedule.timeline.chunk_by(|a, b| a == b) {
        writeln!(f, "  {}-{}\t{}", start, start + segment.len(), segment[0])?;
        start += segment.len();
    }

    writeln!(f, "Average waiting time: {:.2}", schedule.average_waiting_time)?;
    writeln!(f, "Average turnaround time: {:.2}", schedule.average_turnaround_time)?;
    writeln!(f, "Total execution time: {}", schedule.total_execution_time)
}

fn write_seeks(f: &mut fmt::Formatter<'_>, report: &SeekReport) -> fmt::Result {
    writeln!(f, "===== Disk Scheduling: {} =====", report.policy)?;
    writeln!(f, "Cylinders: 0-{}", report.cylinders - 1)?;
    writeln!(f, "STEP\tFROM\tTO\tSEEK")?;
    for (step, seek) in report.seeks.iter().enumerate() {
        let note = if seek.wrap { " (wrap, not counted)" } else { "" };
        writeln!(
            f,
            "{}\t{}\t{}\t{}{}",
            step + 1,
            seek.from,
            seek.to,
            seek.distance,
            note
        )?;
    }

    let sequence: Vec<String> = report.sequence.iter().map(usize::to_string).collect();
    writeln!(f, "Sequence: {}", sequence.join(" -> "))?;
    writeln!(f, "Total head movement: {}", report.total_head_movement)?;
    writeln!(f, "Average seek time: {:.2}", report.average_seek_time)
}

fn write_allocation(f: &mut fmt::Formatter<'_>, report: &AllocationReport) -> fmt::Result {
    writeln!(f, "===== Memory Allocation: {} =====", report.policy)?;
    writeln!(f, "PROCESS\tSIZE\tBLOCK")?;
    for placement in &report.placements {
        let block = placement
            .block
            .map_or("Not allocated".to_string(), |block| format!("B{}", block));
        writeln!(f, "P{}\t{}\t{}", placement.process, placement.size, block)?;
    }

    writeln!(f, "BLOCK\tSIZE\tLEFT\tUSED")?;
    for block in &report.blocks {
        let used = if block.used { "yes" } else { "no" };
        writeln!(f, "B{}\t{}\t{}\t{}", block.id, block.size, block.remaining, used)?;
    }

    writeln!(
        f,
        "Allocated processes: {}/{}",
        report.allocated_processes, report.total_processes
    )?;
    writeln!(f, "Memory utilization: {:.2}%", report.memory_utilization)?;
    writeln!(f, "Internal fragmentation: {}", report.internal_fragmentation)
}

fn write_paging(f: &mut fmt::Formatter<'_>, report: &PagingReport) -> fmt::Result {
    writeln!(
        f,
        "===== Page Replacement: {} ({} frames) =====",
        report.policy, report.capacity
    )?;
    writeln!(f, "STEP\tPAGE\tRESULT\tFRAMES\tEVICTED")?;
    for (step, trace) in report.steps.iter().enumerate() {
        let result = if trace.fault { "FAULT" } else { "HIT" };
        let evicted = trace
            .evicted
            .map_or("-".to_string(), |page| page.to_string());
        writeln!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            step + 1,
            trace.page,
            result,
            join(&trace.frames),
            evicted
        )?;
    }

    writeln!(f, "Page faults: {}", report.page_faults)?;
    writeln!(f, "Hits: {}", report.hits())?;
    writeln!(f, "Hit ratio: {:.2}%", report.hit_ratio() * 100.0)
}

fn write_detection(f: &mut fmt::Formatter<'_>, report: &DetectionReport) -> fmt::Result {
    writeln!(f, "===== Deadlock Detection =====")?;
    writeln!(f, "EDGE\tKIND")?;
    for edge in &report.edges {
        let kind = if edge.is_request() { "request" } else { "assignment" };
        writeln!(f, "{}\t{}", edge, kind)?;
    }

    if report.deadlock {
        writeln!(f, "Deadlock: yes")?;
        let mut cycle = report.cycle.clone();
        if let Some(first) = report.cycle.first() {
            cycle.push(first.clone());
        }
        writeln!(f, "Cycle: {}", cycle.join(" -> "))
    } else {
        writeln!(f, "Deadlock: no")
    }
}

fn write_safety(f: &mut fmt::Formatter<'_>, report: &SafetyReport) -> fmt::Result {
    writeln!(f, "PROCESS\tALLOC\tMAX\tNEED")?;
    for (process, need) in report.need.iter().enumerate() {
        writeln!(
            f,
            "P{}\t{}\t{}\t{}",
            process,
            join(&report.allocation[process]),
            join(&report.max[process]),
            join(need)
        )?;
    }
    writeln!(f, "Available: {}", join(&report.available))?;

    writeln!(f, "STEP\tPROCESS\tWORK\tRELEASED")?;
    for (step, trace) in report.steps.iter().enumerate() {
        writeln!(
            f,
            "{}\tP{}\t{}\t{}",
            step + 1,
            trace.process,
            join(&trace.work_before),
            join(&trace.work_after)
        )?;
    }

    if report.safe {
        writeln!(f, "Safe: yes")?;
        writeln!(f, "Safe sequence: {}", report.sequence.join(" -> "))
    } else {
        writeln!(f, "Safe: no")?;
        writeln!(f, "Safe sequence: none")
    }
}

fn write_request(f: &mut fmt::Formatter<'_>, report: &RequestReport) -> fmt::Result {
    writeln!(f, "===== Banker's Algorithm: Request =====")?;
    writeln!(f, "P{} requests {}", report.process, join(&report.request))?;
    match &report.outcome {
        RequestOutcome::Granted { report, .. } => {
            writeln!(f, "Outcome: granted")?;
            write_safety(f, report)
        }
        RequestOutcome::MustWait => writeln!(f, "Outcome: must wait"),
        RequestOutcome::Unsafe(report) => {
            writeln!(f, "Outcome: denied, the resulting state is unsafe")?;
            write_safety(f, report)
        }
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Cpu(schedule) => write_schedule(f, schedule),
            Report::Disk(report) => write_seeks(f, report),
            Report::Memory(report) => write_allocation(f, report),
            Report::Paging(report) => write_paging(f, report),
            Report::Detection(report) => write_detection(f, report),
            Report::Safety(report) => {
                writeln!(f, "===== Banker's Algorithm =====")?;
                write_safety(f, report)
            }
            Report::Request(report) => write_request(f, report),
        }
    }
}

/// Format a [`Report`] to a [`String`].
///
/// ## Example
///
/// ```rust
/// use simulator::paging::Policy;
///
/// let report = report::paging(Policy::Lru, "1 2 1 3", "2").unwrap();
/// assert!(report::format_report(&report).contains("Page faults: 3"));
/// ```
pub fn format_report(report: &Report) -> String {
    report.to_string()
}
