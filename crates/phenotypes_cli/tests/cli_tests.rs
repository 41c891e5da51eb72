use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

/// Helper to create a Command for the phenotypes binary
#[allow(deprecated)]
fn phenotypes() -> Command {
    Command::cargo_bin("phenotypes").expect("Failed to find phenotypes binary")
}

fn validate(file: &str, config: &str) -> Command {
    let mut cmd = phenotypes();
    cmd.arg("validate")
        .arg(fixture_path(file))
        .arg("--genus")
        .arg("Lens")
        .arg("--config")
        .arg(fixture_path(config));
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("Failed to run phenotypes");
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

// ============================================================================
// check command tests
// ============================================================================

#[test]
fn test_check_yaml_config() {
    phenotypes()
        .arg("check")
        .arg(fixture_path("store.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Lens"))
        .stdout(predicate::str::contains("lens_traits"))
        .stdout(predicate::str::contains("CO_339"))
        .stdout(predicate::str::contains("method_of"));
}

#[test]
fn test_check_toml_config() {
    phenotypes()
        .arg("check")
        .arg(fixture_path("store.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("IgnoreCase"))
        .stdout(predicate::str::contains("measured_by"))
        .stdout(predicate::str::contains("ignored"));
}

#[test]
fn test_check_json_format() {
    let json = json_stdout(
        phenotypes()
            .arg("check")
            .arg(fixture_path("store.yml"))
            .arg("--format")
            .arg("json"),
    );

    assert_eq!(json["allow_new_terms"], true);
    assert_eq!(json["store"]["genera"]["Lens"]["unit_cv"], "lens_unit");
    assert_eq!(json["relations"]["unit_data_type"], "additionalType");
}

#[test]
fn test_check_invalid_config() {
    phenotypes()
        .arg("check")
        .arg(fixture_path("invalid_store.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("unconfigured genus 'Cicer'"));
}

#[test]
fn test_check_missing_file() {
    phenotypes()
        .arg("check")
        .arg("nonexistent.yml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_check_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("store.json");
    fs::write(&config, "{}").unwrap();

    phenotypes()
        .arg("check")
        .arg(config.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

// ============================================================================
// validate command tests
// ============================================================================

#[test]
fn test_validate_valid_file() {
    validate("traits.tsv", "store.yml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation PASSED"))
        .stdout(predicate::str::contains("Checked 2 data rows"))
        .stdout(predicate::str::contains("Required cells contain a value"));
}

#[test]
fn test_validate_with_project() {
    validate("traits.tsv", "store.yml")
        .arg("--project")
        .arg("4")
        .assert()
        .success();
}

#[test]
fn test_validate_unknown_project() {
    validate("traits.tsv", "store.yml")
        .arg("--project")
        .arg("99")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Validation FAILED"))
        .stdout(predicate::str::contains("Project does not exist"));
}

#[test]
fn test_validate_unknown_genus() {
    phenotypes()
        .arg("validate")
        .arg(fixture_path("traits.tsv"))
        .arg("--genus")
        .arg("Cicer")
        .arg("--config")
        .arg(fixture_path("store.yml"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Genus does not exist"));
}

#[test]
fn test_validate_header_only_file() {
    let json = json_stdout(validate("traits_header_only.tsv", "store.yml").arg("-f").arg("json"));

    assert_eq!(json["GENUS"]["status"], "pass");
    assert_eq!(json["HEADERS"]["status"], "pass");
    assert_eq!(json["empty_cell"]["status"], "todo");
    assert_eq!(json["duplicate_traits"]["status"], "todo");
}

#[test]
fn test_validate_missing_header() {
    validate("traits_missing_header.tsv", "store.yml")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Collection Method is/are missing in the file",
        ));
}

#[test]
fn test_validate_bad_values_json() {
    let mut cmd = validate("traits_bad_values.tsv", "store.yml");
    cmd.arg("--format").arg("json");
    cmd.assert().failure();

    let json = json_stdout(&mut cmd);
    assert_eq!(json["empty_cell"]["status"], "fail");
    assert_eq!(
        json["empty_cell"]["details"],
        "Empty value found in required column(s) at row #: 2"
    );
    assert_eq!(json["valid_data_type"]["status"], "fail");
    assert_eq!(
        json["valid_data_type"]["details"],
        "Invalid value(s) in required column(s) at row #: 3"
    );
    assert_eq!(json["duplicate_traits"]["status"], "pass");
}

#[test]
fn test_validate_duplicates_in_file() {
    validate("traits_duplicates.tsv", "store.yml")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "A duplicate trait was found within the input file at row #: 3",
        ));
}

#[test]
fn test_validate_missing_traits_file() {
    phenotypes()
        .arg("validate")
        .arg("nonexistent.tsv")
        .arg("--genus")
        .arg("Lens")
        .arg("--config")
        .arg(fixture_path("store.yml"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("File does not exist"));
}

#[test]
fn test_validate_unsupported_file_type() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("traits.xlsx");
    fs::write(&file, "Trait Name").unwrap();

    phenotypes()
        .arg("validate")
        .arg(file.to_str().unwrap())
        .arg("--genus")
        .arg("Lens")
        .arg("--config")
        .arg(fixture_path("store.yml"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Unsupported file mime type"));
}

#[test]
fn test_validate_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("traits.csv");
    fs::write(
        &file,
        "Trait Name,Trait Description,Method Short Name,Collection Method,Unit,Type\n\
         Plant Height,\"Height at maturity\",Height,Measured from soil,cm,Quantitative\n",
    )
    .unwrap();

    phenotypes()
        .arg("validate")
        .arg(file.to_str().unwrap())
        .arg("--genus")
        .arg("Lens")
        .arg("--config")
        .arg(fixture_path("store.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation PASSED"));
}

#[test]
fn test_validate_verbose_logs_to_stderr() {
    validate("traits.tsv", "store.yml")
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("Validating traits file"));
}

// ============================================================================
// import command tests
// ============================================================================

#[test]
fn test_import_valid_file() {
    phenotypes()
        .arg("import")
        .arg(fixture_path("traits.tsv"))
        .arg("--genus")
        .arg("Lens")
        .arg("--config")
        .arg(fixture_path("store.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 traits for genus Lens"))
        .stdout(predicate::str::contains("Relationships:"));
}

#[test]
fn test_import_json_summary() {
    let json = json_stdout(
        phenotypes()
            .arg("import")
            .arg(fixture_path("traits.tsv"))
            .arg("--genus")
            .arg("Lens")
            .arg("--config")
            .arg(fixture_path("store.yml"))
            .arg("--format")
            .arg("json"),
    );

    assert_eq!(json["summary"]["genus"], "Lens");
    assert_eq!(json["summary"]["rows"], 2);
    assert_eq!(json["summary"]["traits"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["store"]["relationships"], 4);
}

#[test]
fn test_import_rejected_file() {
    phenotypes()
        .arg("import")
        .arg(fixture_path("traits_bad_values.tsv"))
        .arg("--genus")
        .arg("Lens")
        .arg("--config")
        .arg(fixture_path("store.yml"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Validation FAILED"))
        .stdout(predicate::str::contains("Imported").not());
}

#[test]
fn test_import_without_term_creation() {
    phenotypes()
        .arg("import")
        .arg(fixture_path("traits.tsv"))
        .arg("--genus")
        .arg("Lens")
        .arg("--config")
        .arg(fixture_path("closed_store.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to import traits file"));
}
