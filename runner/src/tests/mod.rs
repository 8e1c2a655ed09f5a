use std::env;
use std::fs;

use report::{format_report, Report};

mod cpu;
mod deadlock;
mod disk;
mod memory;

fn write_logs(folder: &str, name: &str, logs: &str) {
    let (quantum, frames, head) = arguments();
    fs::create_dir_all(format!("../outputs/{folder}")).unwrap();
    fs::write(
        format!("../outputs/{folder}/{name}___{quantum}_{frames}_{head}.log"),
        logs,
    )
    .unwrap();
}

fn read_logs(folder: &str, name: &str) -> String {
    let (quantum, frames, head) = arguments();
    fs::read_to_string(format!(
        "../outputs/{folder}/{name}___{quantum}_{frames}_{head}.log"
    ))
    .unwrap()
}

fn run(folder: &str, name: &str, report: &Report) {
    let output = format_report(report);

    if env::var("WRITE_OUTPUT").is_ok() {
        write_logs(folder, name, &output);
    } else {
        let reference = read_logs(folder, name);

        println!("\nleft = Correct Output\nright = Your Output\n");
        use pretty_assertions::assert_eq;
        assert_eq!(reference, output);
    }
}

/// Returns (time quantum, frame count, head position).
fn arguments() -> (usize, usize, usize) {
    let quantum = env::var("QUANTUM")
        .unwrap_or("3".to_string())
        .parse::<usize>()
        .unwrap();
    let frames = env::var("FRAMES")
        .unwrap_or("3".to_string())
        .parse::<usize>()
        .unwrap();
    let head = env::var("HEAD")
        .unwrap_or("53".to_string())
        .parse::<usize>()
        .unwrap();
    (quantum, frames, head)
}
