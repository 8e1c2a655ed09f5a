use function_name::named;
use simulator::memory::Policy;

use super::run;

const BLOCKS: &str = "100 500 200 300 600";
const PROCESSES: &str = "212 417 112 426";

#[test]
#[named]
pub fn first_fit() {
    let report = report::memory(Policy::FirstFit, BLOCKS, PROCESSES).unwrap();

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &report,
    );
}

#[test]
#[named]
pub fn best_fit() {
    let report = report::memory(Policy::BestFit, BLOCKS, PROCESSES).unwrap();

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &report,
    );
}

#[test]
#[named]
pub fn worst_fit() {
    let report = report::memory(Policy::WorstFit, BLOCKS, PROCESSES).unwrap();

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &report,
    );
}
