use std::process::Command;

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_intersection_sim"))
        .args(args)
        .env("RUST_LOG", "warn,intersection_sim=info")
        .output()
        .expect("Failed to execute simulation")
}

/// Test that a single scenario runs and prints its table
#[test]
fn test_single_scenario_runs() {
    let output = run_cli(&["--scenario", "standard", "--hours", "1", "--seed", "42"]);

    assert!(
        output.status.success(),
        "Simulation failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== Scenario: standard ==="));
    for category in ["car", "emergency", "cyclist", "pedestrian"] {
        assert!(
            stdout.lines().any(|line| line.starts_with(category)),
            "Missing row for {}. stdout: {}",
            category,
            stdout
        );
    }
    assert!(!stdout.contains("cycle-lanes"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Simulation complete"),
        "Missing completion log. stderr: {}",
        stderr
    );
}

/// Test that every scenario runs when none is chosen
#[test]
fn test_all_scenarios_run_by_default() {
    let output = run_cli(&["--hours", "1", "--seed", "7"]);
    assert!(output.status.success(), "Simulation failed to run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["standard", "cycle-lanes", "transit-lanes"] {
        assert!(
            stdout.contains(&format!("=== Scenario: {} ===", name)),
            "Missing scenario {}",
            name
        );
    }
}

/// Test that seeded runs print identical results
#[test]
fn test_seeded_output_is_stable() {
    let args = ["--scenario", "transit-lanes", "--hours", "1", "--seed", "5"];
    let first = run_cli(&args);
    let second = run_cli(&args);
    assert!(first.status.success() && second.status.success());
    assert_eq!(first.stdout, second.stdout);
}

/// Test that an unusable light time is reported as an error
#[test]
fn test_zero_light_time_fails() {
    let output = run_cli(&["--scenario", "standard", "--light-time", "0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Light time must be positive"),
        "Unexpected stderr: {}",
        stderr
    );
}

/// Test that a run length too large to express in seconds is an error
#[test]
fn test_oversized_run_length_fails() {
    let output = run_cli(&["--scenario", "standard", "--hours", &u64::MAX.to_string()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Run length in hours is too large"),
        "Unexpected stderr: {}",
        stderr
    );
}

/// Test that the rounding policy can be chosen by name
#[test]
fn test_floor_increment_rounding_runs() {
    let output = run_cli(&[
        "--scenario",
        "cycle-lanes",
        "--hours",
        "1",
        "--seed",
        "3",
        "--rounding",
        "floor-increment",
    ]);
    assert!(
        output.status.success(),
        "Simulation failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("FloorIncrement"), "Unexpected stderr: {}", stderr);
}
