// End-to-end tests for the `rollcall` binary.
// Run with: cargo test -p rollcall-cli --test compare_cli

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use calamine::{open_workbook, Data, Reader, Xlsx};
use tempfile::{tempdir, TempDir};

const HEADER: &str = "S/N,Full Name As Per NRIC,Company";

/// Binary with an isolated config dir so a developer's own settings never leak in.
fn rollcall(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rollcall"));
    cmd.env_remove("ROLLCALL_CONFIG")
        .env_remove("RUST_LOG")
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

fn write_roster(dir: &Path, name: &str, names: &[&str]) -> PathBuf {
    let mut text = format!("{HEADER}\n");
    for (i, n) in names.iter().enumerate() {
        text.push_str(&format!("{},{},Acme\n", i + 1, n));
    }
    text.push_str("Total,,\n");
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

struct Fixture {
    dir: TempDir,
    baseline: PathBuf,
    current: PathBuf,
}

fn scenario_one() -> Fixture {
    let dir = tempdir().unwrap();
    let baseline = write_roster(dir.path(), "a.csv", &["Alice Tan", "Bob Lee"]);
    let current = write_roster(dir.path(), "b.csv", &["ALICE  TAN", "Carol Ng"]);
    Fixture { dir, baseline, current }
}

#[test]
fn compare_writes_both_sheets() {
    let fx = scenario_one();
    let out = fx.dir.path().join("result.xlsx");

    let output = rollcall(fx.dir.path())
        .arg("compare")
        .arg(&fx.baseline)
        .arg(&fx.current)
        .arg("-o")
        .arg(&out)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("New in Excel_B: 1 | Removed from Excel_A: 1"));

    let mut wb: Xlsx<_> = open_workbook(&out).unwrap();
    assert_eq!(wb.sheet_names(), vec!["New_in_Excel_B", "Removed_from_Excel_A"]);

    let added = wb.worksheet_range("New_in_Excel_B").unwrap();
    assert_eq!(added.get_value((0, 0)), Some(&Data::String("S/N".into())));
    assert_eq!(added.get_value((1, 0)), Some(&Data::Float(1.0)));
    assert_eq!(added.get_value((1, 1)), Some(&Data::String("Carol Ng".into())));

    let removed = wb.worksheet_range("Removed_from_Excel_A").unwrap();
    assert_eq!(removed.get_value((1, 1)), Some(&Data::String("Bob Lee".into())));
}

#[test]
fn default_output_name_in_working_dir() {
    let fx = scenario_one();
    let output = rollcall(fx.dir.path())
        .current_dir(fx.dir.path())
        .args(["compare", "a.csv", "b.csv", "-q"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(fx.dir.path().join("nric_name_comparison.xlsx").exists());
    assert!(stderr(&output).is_empty());
}

#[test]
fn strict_exit_reports_differences() {
    let fx = scenario_one();
    let out = fx.dir.path().join("r.xlsx");

    let differ = rollcall(fx.dir.path())
        .arg("compare")
        .arg(&fx.baseline)
        .arg(&fx.current)
        .arg("-o")
        .arg(&out)
        .arg("--strict-exit")
        .output()
        .unwrap();
    assert_eq!(differ.status.code(), Some(1));
    // workbook is still written
    assert!(out.exists());

    let same = rollcall(fx.dir.path())
        .arg("compare")
        .arg(&fx.baseline)
        .arg(&fx.baseline)
        .arg("-o")
        .arg(&out)
        .arg("--strict-exit")
        .output()
        .unwrap();
    assert_eq!(same.status.code(), Some(0), "stderr: {}", stderr(&same));
    assert!(stderr(&same).contains("New in Excel_B: 0 | Removed from Excel_A: 0"));
}

#[test]
fn missing_identity_column_is_validation_error() {
    let dir = tempdir().unwrap();
    let a = write_roster(dir.path(), "a.csv", &["Alice Tan"]);
    let b = dir.path().join("b.csv");
    std::fs::write(&b, "S/N,Name\n1,Alice Tan\n").unwrap();
    let out = dir.path().join("r.xlsx");

    let output = rollcall(dir.path())
        .arg("compare")
        .arg(&a)
        .arg(&b)
        .arg("-o")
        .arg(&out)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(4));
    let err = stderr(&output);
    assert!(err.contains("Excel_B (current) must contain column 'Full Name As Per NRIC'"), "{err}");
    assert!(!err.contains("Excel_A"), "{err}");
    assert!(err.contains("hint:  current has [S/N, Name]"), "{err}");
    assert!(!out.exists());
}

#[test]
fn identity_column_flag_overrides_default() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.csv");
    let b = dir.path().join("b.csv");
    std::fs::write(&a, "No.,Name\n1,Alice\n2,Bob\n").unwrap();
    std::fs::write(&b, "No.,Name\n1,alice\n").unwrap();
    let out = dir.path().join("r.xlsx");

    let output = rollcall(dir.path())
        .arg("compare")
        .arg(&a)
        .arg(&b)
        .args(["--identity-column", "Name", "-o"])
        .arg(&out)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("New in Excel_B: 0 | Removed from Excel_A: 1"));

    // original "No." column replaced by the S/N ordinal
    let mut wb: Xlsx<_> = open_workbook(&out).unwrap();
    let removed = wb.worksheet_range("Removed_from_Excel_A").unwrap();
    assert_eq!(removed.get_value((0, 0)), Some(&Data::String("S/N".into())));
    assert_eq!(removed.get_value((0, 1)), Some(&Data::String("Name".into())));
    assert_eq!(removed.get_value((1, 1)), Some(&Data::String("Bob".into())));
}

#[test]
fn json_report_on_stdout() {
    let fx = scenario_one();
    let out = fx.dir.path().join("r.xlsx");

    let output = rollcall(fx.dir.path())
        .arg("compare")
        .arg(&fx.baseline)
        .arg(&fx.current)
        .arg("-o")
        .arg(&out)
        .args(["--json", "-q"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["summary"]["baseline_rows"], 3);
    assert_eq!(report["summary"]["baseline_data_rows"], 2);
    assert_eq!(report["summary"]["added_rows"], 1);
    assert_eq!(report["summary"]["removed_rows"], 1);
    assert_eq!(report["meta"]["identity_column"], "Full Name As Per NRIC");
    assert_eq!(report["added"]["rows"][0][1], "Carol Ng");
    assert_eq!(report["added"]["rows"][0][0], 1.0);
    assert_eq!(report["export"]["sheets"][0]["name"], "New_in_Excel_B");
    assert_eq!(report["export"]["sheets"][1]["data_rows"], 1);
}

#[test]
fn preview_lists_names() {
    let fx = scenario_one();
    let out = fx.dir.path().join("r.xlsx");

    let output = rollcall(fx.dir.path())
        .arg("compare")
        .arg(&fx.baseline)
        .arg(&fx.current)
        .arg("-o")
        .arg(&out)
        .arg("--preview")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("New in Excel_B (1)"), "{text}");
    assert!(text.contains("  1    Carol Ng"), "{text}");
    assert!(text.contains("Removed from Excel_A (1)"), "{text}");
    assert!(text.contains("  1    Bob Lee"), "{text}");
}

#[test]
fn config_file_sets_labels_and_sheet_names() {
    let fx = scenario_one();
    let config = fx.dir.path().join("team.toml");
    std::fs::write(
        &config,
        r#"
[labels]
baseline = "March"
current = "April"

[theme.widths]
mode = "auto"
"#,
    )
    .unwrap();
    let out = fx.dir.path().join("r.xlsx");

    let output = rollcall(fx.dir.path())
        .arg("compare")
        .arg(&fx.baseline)
        .arg(&fx.current)
        .arg("--config")
        .arg(&config)
        .arg("-o")
        .arg(&out)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("New in April: 1 | Removed from March: 1"));

    let wb: Xlsx<_> = open_workbook(&out).unwrap();
    assert_eq!(wb.sheet_names(), vec!["New_in_April", "Removed_from_March"]);
}

#[test]
fn config_in_default_location_is_picked_up() {
    let fx = scenario_one();
    let config_dir = fx.dir.path().join(".config/rollcall");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("rollcall.toml"), "[sheets]\nadded = \"Joiners\"\n").unwrap();

    let output = rollcall(fx.dir.path()).arg("validate").output().unwrap();
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("rollcall.toml"), "{text}");
    assert!(text.contains("Joiners, Removed_from_Excel_A"), "{text}");
}

#[test]
fn validate_rejects_bad_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "identity_column = \"S/N\"\n").unwrap();

    let output = rollcall(dir.path())
        .args(["validate", "--config"])
        .arg(&config)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("collides"));
}

#[test]
fn validate_without_config_uses_defaults() {
    let dir = tempdir().unwrap();
    let output = rollcall(dir.path()).arg("validate").output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("config ok (built-in defaults)"), "{text}");
    assert!(text.contains("identity column: Full Name As Per NRIC"), "{text}");
}

#[test]
fn unsupported_input_is_format_error() {
    let dir = tempdir().unwrap();
    let a = write_roster(dir.path(), "a.csv", &["Alice Tan"]);
    let b = dir.path().join("b.pdf");
    std::fs::write(&b, "%PDF-1.4").unwrap();

    let output = rollcall(dir.path())
        .arg("compare")
        .arg(&a)
        .arg(&b)
        .arg("-o")
        .arg(dir.path().join("r.xlsx"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("unsupported file type 'pdf'"));
}

#[test]
fn missing_input_is_usage_error() {
    let dir = tempdir().unwrap();
    let a = write_roster(dir.path(), "a.csv", &["Alice Tan"]);

    let output = rollcall(dir.path())
        .arg("compare")
        .arg(&a)
        .arg(dir.path().join("nope.csv"))
        .arg("-o")
        .arg(dir.path().join("r.xlsx"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("file not found"));
}

#[test]
fn refuses_to_overwrite_an_input() {
    let fx = scenario_one();
    let output = rollcall(fx.dir.path())
        .arg("compare")
        .arg(&fx.baseline)
        .arg(&fx.current)
        .arg("-o")
        .arg(&fx.current)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("would overwrite input"));
}

#[test]
fn sheets_and_sheet_selection() {
    let dir = tempdir().unwrap();
    let book = dir.path().join("april.xlsx");

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let notes = workbook.add_worksheet();
    notes.set_name("Notes").unwrap();
    notes.write_string(0, 0, "read me").unwrap();
    let staff = workbook.add_worksheet();
    staff.set_name("Staff").unwrap();
    staff.write_string(0, 0, "S/N").unwrap();
    staff.write_string(0, 1, "Full Name As Per NRIC").unwrap();
    staff.write_number(1, 0, 1).unwrap();
    staff.write_string(1, 1, "Carol Ng").unwrap();
    workbook.save(&book).unwrap();

    let listed = rollcall(dir.path()).arg("sheets").arg(&book).output().unwrap();
    assert_eq!(listed.status.code(), Some(0));
    assert_eq!(stdout(&listed), "Notes\nStaff\n");

    let a = write_roster(dir.path(), "a.csv", &["Alice Tan"]);
    let out = dir.path().join("r.xlsx");

    let wrong = rollcall(dir.path())
        .arg("compare")
        .arg(&a)
        .arg(&book)
        .args(["--current-sheet", "Staf", "-o"])
        .arg(&out)
        .output()
        .unwrap();
    assert_eq!(wrong.status.code(), Some(5));
    assert!(stderr(&wrong).contains("available: Notes, Staff"));
    assert!(stderr(&wrong).contains("rollcall sheets"));

    let right = rollcall(dir.path())
        .arg("compare")
        .arg(&a)
        .arg(&book)
        .args(["--current-sheet", "Staff", "-o"])
        .arg(&out)
        .output()
        .unwrap();
    assert_eq!(right.status.code(), Some(0), "stderr: {}", stderr(&right));
    assert!(stderr(&right).contains("New in Excel_B: 1 | Removed from Excel_A: 1"));
}
