use function_name::named;
use simulator::disk::{Policy, DEFAULT_CYLINDERS};

use super::{arguments, run};

const REQUESTS: &str = "98 183 37 122 14 124 65 67";

fn schedule(policy: Policy) -> report::Report {
    let (_, _, head) = arguments();
    report::disk(policy, REQUESTS, &head.to_string(), DEFAULT_CYLINDERS).unwrap()
}

#[test]
#[named]
pub fn fcfs() {
    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &schedule(Policy::Fcfs),
    );
}

#[test]
#[named]
pub fn sstf() {
    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &schedule(Policy::Sstf),
    );
}

#[test]
#[named]
pub fn scan() {
    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &schedule(Policy::Scan),
    );
}

#[test]
#[named]
pub fn c_scan() {
    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &schedule(Policy::CScan),
    );
}

#[test]
#[named]
pub fn look() {
    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &schedule(Policy::Look),
    );
}

#[test]
#[named]
pub fn c_look() {
    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &schedule(Policy::CLook),
    );
}
