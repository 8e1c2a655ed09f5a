use function_name::named;
use report::BankerInput;

use super::run;

fn rows(rows: &[&str]) -> Vec<String> {
    rows.iter().map(|row| row.to_string()).collect()
}

#[test]
#[named]
pub fn cycle() {
    let report = report::detection("P0 R0, R0 P1, P1 R1, R1 P0").unwrap();

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &report,
    );
}

#[test]
#[named]
pub fn no_cycle() {
    let report = report::detection("P0 R0, R0 P1, P2 R0").unwrap();

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &report,
    );
}

#[test]
#[named]
pub fn safe_state() {
    let allocation = rows(&["0 1 0", "2 0 0", "3 0 2", "2 1 1", "0 0 2"]);
    let max = rows(&["7 5 3", "3 2 2", "9 0 2", "2 2 2", "4 3 3"]);
    let input = BankerInput {
        processes: 5,
        resources: 3,
        allocation: &allocation,
        max: &max,
        available: "3 3 2",
    };
    let report = report::safety(&input).unwrap();

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &report,
    );
}

#[test]
#[named]
pub fn unsafe_state() {
    let allocation = rows(&["0 1 0", "2 0 0", "3 0 2"]);
    let max = rows(&["7 5 3", "3 2 2", "9 0 2"]);
    let input = BankerInput {
        processes: 3,
        resources: 3,
        allocation: &allocation,
        max: &max,
        available: "3 3 2",
    };
    let report = report::safety(&input).unwrap();

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &report,
    );
}

#[test]
#[named]
pub fn granted_request() {
    let allocation = rows(&["0 1 0", "2 0 0", "3 0 2", "2 1 1", "0 0 2"]);
    let max = rows(&["7 5 3", "3 2 2", "9 0 2", "2 2 2", "4 3 3"]);
    let input = BankerInput {
        processes: 5,
        resources: 3,
        allocation: &allocation,
        max: &max,
        available: "3 3 2",
    };
    let report = report::request(&input, 1, "1 0 2").unwrap();

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &report,
    );
}

#[test]
pub fn malformed_graph() {
    assert!(report::detection("P0 R0, P0 Q1").is_err());
    assert!(report::detection("P0 R0, P1 P0").is_err());
}
