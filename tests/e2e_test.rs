/// End-to-end tests for the CLI
mod test_utilities;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use test_utilities::fake_platform::{self, FakePlatform};

fn write_settings(data_dir: &Path, base_url: &str, category: &str) {
    fs::create_dir_all(data_dir).unwrap();
    fs::write(
        data_dir.join("settings.json"),
        serde_json::to_string_pretty(&json!({
            "apiKey": "1-key",
            "siteBaseUrl": base_url,
            "defaultCategoryId": category
        }))
        .unwrap(),
    )
    .unwrap();
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("course-admin").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("course-admin")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("course-admin"));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("course-admin")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("course-admin")
            .args(["-f", "invalid_format", "categories"])
            .assert()
            .code(2);
    }

    /// Exit code 2: seats must be positive
    #[test]
    fn test_exit_code_zero_seats() {
        cargo_bin_cmd!("course-admin")
            .args([
                "courses", "create", "--template", "TPL-EXAMPLE-1H", "--start",
                "2024-02-01T09:30", "--seats", "0",
            ])
            .assert()
            .code(2);
    }

    /// Exit code 3: remote command without settings
    #[test]
    fn test_exit_code_missing_settings() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("course-admin")
            .arg("--data-dir")
            .arg(dir.path())
            .args(["courses", "list"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Platform settings are incomplete"))
            .stderr(predicate::str::contains("💡 Hint"));
    }

    /// Exit code 3: malformed start date
    #[test]
    fn test_exit_code_invalid_start() {
        let dir = TempDir::new().unwrap();
        write_settings(dir.path(), "http://127.0.0.1:9", "cat-1");
        cargo_bin_cmd!("course-admin")
            .arg("--data-dir")
            .arg(dir.path())
            .args(["courses", "update", "p-1", "--price", "10", "--start", "tomorrow"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("tomorrow"));
    }
}

#[test]
fn test_settings_show_creates_default_file() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("data");

    let output = cargo_bin_cmd!("course-admin")
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["settings", "show"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let shown: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown, json!({"apiKey": "", "siteBaseUrl": "", "defaultCategoryId": ""}));
    assert!(data_dir.join("settings.json").exists());
}

#[test]
fn test_settings_set_then_show() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("course-admin")
        .arg("--data-dir")
        .arg(dir.path())
        .args([
            "settings", "set", "--api-key", "1-key", "--base-url", "http://shop.local:8080/",
            "--category", "cat-1",
        ])
        .assert()
        .code(0);

    cargo_bin_cmd!("course-admin")
        .arg("--data-dir")
        .arg(dir.path())
        .args(["settings", "show"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"defaultCategoryId\": \"cat-1\""));
}

#[test]
fn test_templates_list_markdown() {
    let dir = TempDir::new().unwrap();
    cargo_bin_cmd!("course-admin")
        .arg("--data-dir")
        .arg(dir.path())
        .args(["templates", "list", "--format", "markdown"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("# Course Templates"))
        .stdout(predicate::str::contains("| TPL-EXAMPLE-1H |"));
}

#[test]
fn test_templates_replace_rejects_invalid_json() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "[{\"templateId\": ").unwrap();

    cargo_bin_cmd!("course-admin")
        .arg("--data-dir")
        .arg(dir.path())
        .args(["templates", "list"])
        .assert()
        .code(0);
    let before = fs::read_to_string(dir.path().join("templates.json")).unwrap();

    cargo_bin_cmd!("course-admin")
        .arg("--data-dir")
        .arg(dir.path())
        .args(["templates", "replace", "--file"])
        .arg(&input)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("templates must be a JSON array"));

    assert_eq!(
        fs::read_to_string(dir.path().join("templates.json")).unwrap(),
        before
    );
}

#[test]
fn test_templates_add_and_remove() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("brew.json");
    fs::write(&input, r#"{"templateId": "TPL-BREW", "name": "Beer Brewing", "baseSku": "BREW"}"#).unwrap();

    cargo_bin_cmd!("course-admin")
        .arg("--data-dir")
        .arg(dir.path())
        .args(["templates", "add", "--file"])
        .arg(&input)
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Template TPL-BREW added"));

    cargo_bin_cmd!("course-admin")
        .arg("--data-dir")
        .arg(dir.path())
        .args(["templates", "remove", "TPL-BREW"])
        .assert()
        .code(0);

    cargo_bin_cmd!("course-admin")
        .arg("--data-dir")
        .arg(dir.path())
        .args(["templates", "show", "TPL-BREW"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Template not found: TPL-BREW"));
}

#[test]
fn test_create_course_end_to_end() {
    let platform = FakePlatform::serve(vec![
        fake_platform::ok_envelope(r#"{"Bvin":"p-1","Sku":"TPL-EX-1H-202402010930"}"#),
        fake_platform::ok_envelope(r#"{"Bvin":"inv-1","ProductBvin":"p-1"}"#),
        fake_platform::no_content(),
    ]);
    let dir = TempDir::new().unwrap();
    write_settings(dir.path(), &platform.base_url(), "cat-1");

    let output = cargo_bin_cmd!("course-admin")
        .arg("--data-dir")
        .arg(dir.path())
        .args([
            "courses", "create", "--template", "TPL-EXAMPLE-1H", "--start", "2024-02-01T09:30",
            "--seats", "25",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let created: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(created["product"]["Bvin"], "p-1");
    assert_eq!(created["inventoryBvin"], "inv-1");
    assert_eq!(created["categoryId"], "cat-1");

    let mapping: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("inventoryMap.json")).unwrap())
            .unwrap();
    assert_eq!(mapping, json!({"p-1": "inv-1"}));
}

#[test]
fn test_create_course_with_failed_category_link_exits_with_warning() {
    let platform = FakePlatform::serve(vec![
        fake_platform::ok_envelope(r#"{"Bvin":"p-1"}"#),
        fake_platform::ok_envelope(r#"{"Bvin":"inv-1","ProductBvin":"p-1"}"#),
        fake_platform::raw_response("500 Internal Server Error", r#"{"Message":"boom"}"#),
    ]);
    let dir = TempDir::new().unwrap();
    write_settings(dir.path(), &platform.base_url(), "cat-1");

    cargo_bin_cmd!("course-admin")
        .arg("--data-dir")
        .arg(dir.path())
        .args([
            "courses", "create", "--template", "TPL-EXAMPLE-1H", "--start", "2024-02-01T09:30",
            "--seats", "10",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"inventoryBvin\": \"inv-1\""))
        .stderr(predicate::str::contains("Warning: Category link failed"));
}

#[test]
fn test_delete_course_tolerates_server_error() {
    let platform = FakePlatform::serve(vec![fake_platform::raw_response(
        "500 Internal Server Error",
        r#"{"Message":"An error has occurred."}"#,
    )]);
    let dir = TempDir::new().unwrap();
    write_settings(dir.path(), &platform.base_url(), "cat-1");
    fs::write(dir.path().join("inventoryMap.json"), r#"{"p-1": "inv-1", "p-2": "inv-2"}"#).unwrap();

    cargo_bin_cmd!("course-admin")
        .arg("--data-dir")
        .arg(dir.path())
        .args(["courses", "delete", "p-1"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"assumed\": true"));

    let mapping: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("inventoryMap.json")).unwrap())
            .unwrap();
    assert_eq!(mapping, json!({"p-2": "inv-2"}));
    assert!(platform.request_lines()[0].starts_with("DELETE "));
}

#[test]
fn test_inventory_show_written_to_output_file() {
    let platform = FakePlatform::serve(vec![fake_platform::ok_envelope(
        r#"{"Bvin":"inv-1","ProductBvin":"p-1","QuantityOnHand":7}"#,
    )]);
    let dir = TempDir::new().unwrap();
    write_settings(dir.path(), &platform.base_url(), "cat-1");
    fs::write(dir.path().join("inventoryMap.json"), r#"{"p-1": "inv-1"}"#).unwrap();
    let output_path = dir.path().join("stock.md");

    cargo_bin_cmd!("course-admin")
        .arg("--data-dir")
        .arg(dir.path())
        .args(["inventory", "show", "p-1", "-f", "markdown", "-o"])
        .arg(&output_path)
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Output written"));

    let written = fs::read_to_string(&output_path).unwrap();
    assert!(written.starts_with("```json"));
    assert!(written.contains("\"QuantityOnHand\": 7"));
}

#[test]
fn test_raw_transport_rejects_https() {
    let dir = TempDir::new().unwrap();
    write_settings(dir.path(), "https://shop.example.com", "cat-1");

    cargo_bin_cmd!("course-admin")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("categories")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("transport: standard"));
}
