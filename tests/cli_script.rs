mod cli_support;

use assert_cmd::Command;
use cli_support::ScriptHarness;
use predicates::str::contains;

const PER_HEAD_DINNER: &str = "mode per-head
item name 1 Dinner
item price 1 300
next
person name 1 A
person paid 1 150
person add
person name 2 B
person paid 2 100
person add
person name 3 C
person paid 3 50
";

#[test]
fn script_mode_runs_per_head_flow() {
    let tmp = tempfile::tempdir().unwrap();
    let script = format!("{PER_HEAD_DINNER}next\nexit\n");

    let mut cmd = Command::cargo_bin("billsplit_cli").unwrap();
    cmd.env("BILLSPLIT_CLI_SCRIPT", "1")
        .env("BILLSPLIT_HOME", tmp.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(contains("Each person owes ₹100.00"))
        .stdout(contains("A receives ₹50.00"))
        .stdout(contains("C pays ₹50.00"));
}

#[test]
fn per_head_mismatch_blocks_results() {
    let harness = ScriptHarness::new();
    let output = harness.run_script(
        "mode per-head
item name 1 Dinner
item price 1 300
next
person name 1 A
person paid 1 100
next
status
exit
",
    );
    assert!(output.stdout.contains("Missing 200.00 in contributions"));
    assert!(
        output
            .stdout
            .contains("`next` failed: Contributions are off by 200.00 from the total"),
        "{}",
        output.stdout
    );
    assert!(!output.stdout.contains("Results"), "{}", output.stdout);
}

#[test]
fn item_based_flow_confirms_mismatch_and_exports() {
    let harness = ScriptHarness::new();
    let output = harness.run_script(
        "mode item-based
person name 1 Asha
person paid 1 80
person add
person name 2 Ben
next
bill rename 1 Cafe
item name 1 Tea
item price 1 100
next
assign-all 1
next
copy 1
exit
",
    );
    let stdout = &output.stdout;
    assert!(stdout.contains("auto-confirmed in script mode"), "{stdout}");
    assert!(stdout.contains("Asha receives ₹30.00"), "{stdout}");
    assert!(stdout.contains("Ben pays ₹50.00"), "{stdout}");
    assert!(stdout.contains("Asha's Bill Summary"), "{stdout}");
    assert!(stdout.contains("- Tea (₹50.00 - 100.00 divided by 2)"), "{stdout}");
    assert!(stdout.contains("Copied!"), "{stdout}");
}

#[test]
fn forward_guard_reports_missing_rows() {
    let harness = ScriptHarness::new();
    let output = harness.run_script("mode item-based\nnext\nexit\n");
    assert!(output
        .stdout
        .contains("Add at least one person with a name"));
}

#[test]
fn import_replaces_people() {
    let harness = ScriptHarness::new();
    let output = harness.run_script(
        "mode item-based
import people \"John,300\\nJane\\nMike,200\"
exit
",
    );
    assert!(output.stdout.contains("Imported 2 people rows."), "{}", output.stdout);
    assert!(output.stdout.contains("1. John  paid ₹300.00"));
    assert!(output.stdout.contains("2. Mike  paid ₹200.00"));
}

#[test]
fn import_file_reads_items() {
    let harness = ScriptHarness::new();
    let path = harness.home().join("items.csv");
    std::fs::write(&path, "Tea,40\nCake,60\n").unwrap();
    let output = harness.run_script(&format!(
        "mode per-head\nimport-file items {}\nexit\n",
        path.display()
    ));
    assert!(output.stdout.contains("Imported 2 items rows."));
    assert!(output.stdout.contains("Total: ₹100.00"));
}

#[test]
fn unknown_command_suggests_closest() {
    let harness = ScriptHarness::new();
    let output = harness.run_script("nxt\nexit\n");
    assert!(output.stdout.contains("Unknown command `nxt`"));
    assert!(output.stdout.contains("Suggestion: `next`?"));
}

#[test]
fn config_set_persists_currency() {
    let harness = ScriptHarness::new();
    harness.run_script("config set currency_symbol $\nexit\n");
    let saved = std::fs::read_to_string(harness.home().join("config").join("config.json")).unwrap();
    assert!(saved.contains("\"currency_symbol\": \"$\""));

    let output = harness.run_script(&format!("{PER_HEAD_DINNER}next\nexit\n"));
    assert!(output.stdout.contains("A receives $50.00"), "{}", output.stdout);
}

#[test]
fn edit_from_results_reopens_people() {
    let harness = ScriptHarness::new();
    let output = harness.run_script(&format!(
        "{PER_HEAD_DINNER}next\nedit people\nperson paid 3 60\nnext\nexit\n"
    ));
    assert!(output.stdout.contains("Excess 10.00 in contributions"), "{}", output.stdout);
}

#[test]
fn home_resets_after_auto_confirm() {
    let harness = ScriptHarness::new();
    let output = harness.run_script("mode per-head\nitem name 1 Tea\nhome\nexit\n");
    assert!(output
        .stdout
        .contains("Your progress will be lost. Are you sure you want to go home?"));
    assert!(output.stdout.contains("How do you want to split?"));
}

#[test]
fn version_reports_build_metadata() {
    let harness = ScriptHarness::new();
    let output = harness.run_script("version\nexit\n");
    let pattern = regex::Regex::new(r"Billsplit \d+\.\d+\.\d+").unwrap();
    assert!(pattern.is_match(&output.stdout), "{}", output.stdout);
    assert!(output.stdout.contains("Build hash"));
}
