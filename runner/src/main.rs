use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use report::{format_report, BankerInput, Report};
use simulator::disk::DEFAULT_CYLINDERS;
use simulator::{cpu, disk, memory, paging};

/// Step-by-step operating system algorithm calculator
#[derive(Parser, Debug)]
#[command(name = "runner")]
#[command(version)]
#[command(
    about = "Computes CPU, disk, memory, paging and deadlock algorithms step by step",
    long_about = None
)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Yaml,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// CPU scheduling
    Cpu {
        #[arg(short, long, value_enum)]
        policy: CpuPolicy,

        /// Burst times, e.g. "5 8 12"
        bursts: String,

        /// Time quantum for round robin
        #[arg(short, long, default_value_t = 2)]
        quantum: usize,

        /// One priority per process, higher is more urgent
        #[arg(long)]
        priorities: Option<String>,
    },

    /// Disk head scheduling
    Disk {
        #[arg(short, long, value_enum)]
        policy: DiskPolicy,

        /// Cylinder requests, e.g. "98 183 37 122"
        requests: String,

        /// Initial head position
        #[arg(long)]
        head: String,

        /// Number of cylinders
        #[arg(long, default_value_t = DEFAULT_CYLINDERS)]
        cylinders: usize,
    },

    /// Contiguous memory allocation
    Memory {
        #[arg(short, long, value_enum)]
        policy: MemoryPolicy,

        /// Memory block sizes, e.g. "100 500 200"
        #[arg(long)]
        blocks: String,

        /// Process sizes, e.g. "212 417 112"
        #[arg(long)]
        processes: String,
    },

    /// Page replacement
    Paging {
        #[arg(short, long, value_enum)]
        policy: PagingPolicy,

        /// Reference string, e.g. "7 0 1 2 0 3"
        pages: String,

        /// Number of frames
        #[arg(short, long, default_value = "3")]
        frames: String,
    },

    /// Deadlock detection on a resource-allocation graph
    Graph {
        /// Edges, e.g. "P0 R0, R0 P1"
        edges: String,
    },

    /// Banker's algorithm
    Banker {
        /// Number of processes
        #[arg(long)]
        processes: usize,

        /// Number of resource types
        #[arg(long)]
        resources: usize,

        /// Allocation row, once per process
        #[arg(long, required = true)]
        allocation: Vec<String>,

        /// Max need row, once per process
        #[arg(long, required = true)]
        max: Vec<String>,

        /// Available resources
        #[arg(long)]
        available: String,

        /// Check a request from this process instead of the current state
        #[arg(long, requires = "request")]
        requester: Option<usize>,

        /// The requested amounts
        #[arg(long, requires = "requester")]
        request: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum CpuPolicy {
    Fcfs,
    Sjf,
    Rr,
    Priority,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum DiskPolicy {
    Fcfs,
    Sstf,
    Scan,
    CScan,
    Look,
    CLook,
}

impl From<DiskPolicy> for disk::Policy {
    fn from(policy: DiskPolicy) -> Self {
        match policy {
            DiskPolicy::Fcfs => disk::Policy::Fcfs,
            DiskPolicy::Sstf => disk::Policy::Sstf,
            DiskPolicy::Scan => disk::Policy::Scan,
            DiskPolicy::CScan => disk::Policy::CScan,
            DiskPolicy::Look => disk::Policy::Look,
            DiskPolicy::CLook => disk::Policy::CLook,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum MemoryPolicy {
    First,
    Best,
    Worst,
}

impl From<MemoryPolicy> for memory::Policy {
    fn from(policy: MemoryPolicy) -> Self {
        match policy {
            MemoryPolicy::First => memory::Policy::FirstFit,
            MemoryPolicy::Best => memory::Policy::BestFit,
            MemoryPolicy::Worst => memory::Policy::WorstFit,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PagingPolicy {
    Fifo,
    Lru,
    Optimal,
}

impl From<PagingPolicy> for paging::Policy {
    fn from(policy: PagingPolicy) -> Self {
        match policy {
            PagingPolicy::Fifo => paging::Policy::Fifo,
            PagingPolicy::Lru => paging::Policy::Lru,
            PagingPolicy::Optimal => paging::Policy::Optimal,
        }
    }
}

fn cpu_policy(policy: CpuPolicy, quantum: usize) -> Result<cpu::Policy> {
    Ok(match policy {
        CpuPolicy::Fcfs => cpu::Policy::Fcfs,
        CpuPolicy::Sjf => cpu::Policy::Sjf,
        CpuPolicy::Rr => cpu::Policy::round_robin(quantum)?,
        CpuPolicy::Priority => cpu::Policy::Priority,
    })
}

fn simulate(command: &Command) -> Result<Report> {
    let report = match command {
        Command::Cpu {
            policy,
            bursts,
            quantum,
            priorities,
        } => {
            let policy = cpu_policy(*policy, *quantum)?;
            report::cpu(policy, bursts, priorities.as_deref())?
        }
        Command::Disk {
            policy,
            requests,
            head,
            cylinders,
        } => report::disk((*policy).into(), requests, head, *cylinders)?,
        Command::Memory {
            policy,
            blocks,
            processes,
        } => report::memory((*policy).into(), blocks, processes)?,
        Command::Paging {
            policy,
            pages,
            frames,
        } => report::paging((*policy).into(), pages, frames)?,
        Command::Graph { edges } => report::detection(edges)?,
        Command::Banker {
            processes,
            resources,
            allocation,
            max,
            available,
            requester,
            request,
        } => {
            let input = BankerInput {
                processes: *processes,
                resources: *resources,
                allocation,
                max,
                available,
            };
            match (requester, request) {
                (Some(process), Some(request)) => report::request(&input, *process, request)?,
                _ => report::safety(&input)?,
            }
        }
    };
    Ok(report)
}

fn run(cli: &Cli) -> Result<()> {
    let report = simulate(&cli.command).context("simulation failed")?;

    match cli.format {
        Format::Text => print!("{}", format_report(&report)),
        Format::Yaml => {
            let yaml =
                serde_yaml::to_string(&report).context("cannot serialize the report")?;
            print!("{}", yaml);
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

// Do not delete this line
#[cfg(test)]
mod tests;
