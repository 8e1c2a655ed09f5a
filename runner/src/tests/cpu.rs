use function_name::named;
use simulator::cpu::Policy;

use super::{arguments, run};

const BURSTS: &str = "5 8 12";

#[test]
#[named]
pub fn fcfs() {
    let report = report::cpu(Policy::Fcfs, BURSTS, None).unwrap();

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &report,
    );
}

#[test]
#[named]
pub fn sjf() {
    let report = report::cpu(Policy::Sjf, "5 8 12 3 6", None).unwrap();

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &report,
    );
}

#[test]
#[named]
pub fn round_robin() {
    let (quantum, _, _) = arguments();
    let policy = Policy::round_robin(quantum).unwrap();
    let report = report::cpu(policy, BURSTS, None).unwrap();

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &report,
    );
}

#[test]
#[named]
pub fn priority() {
    let report = report::cpu(Policy::Priority, "10 1 2 1 5", Some("3 1 4 5 2")).unwrap();

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &report,
    );
}

#[test]
pub fn zero_quantum() {
    assert!(Policy::round_robin(0).is_err());
}
