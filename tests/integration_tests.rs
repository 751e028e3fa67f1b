//! Integration tests for the OSB CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get an osb command
fn osb() -> Command {
    Command::cargo_bin("osb").unwrap()
}

/// Helper to create a test catalog in a temp directory
fn setup_catalog() -> TempDir {
    let tmp = TempDir::new().unwrap();
    osb().current_dir(tmp.path()).arg("init").assert().success();
    tmp
}

/// Create a proprietary app and return its full ID
fn create_app(tmp: &TempDir, name: &str, description: &str) -> String {
    let output = osb()
        .current_dir(tmp.path())
        .args([
            "app",
            "new",
            "--name",
            name,
            "--description",
            description,
            "--no-edit",
            "-f",
            "id",
        ])
        .output()
        .unwrap();
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Create an alternative and return its full ID
fn create_alt(tmp: &TempDir, name: &str, repo: Option<&str>) -> String {
    let mut args = vec![
        "alt".to_string(),
        "new".to_string(),
        "--name".to_string(),
        name.to_string(),
        "--no-edit".to_string(),
        "-f".to_string(),
        "id".to_string(),
    ];
    if let Some(repo) = repo {
        args.push("--repo".to_string());
        args.push(repo.to_string());
    }
    let output = osb()
        .current_dir(tmp.path())
        .args(&args)
        .output()
        .unwrap();
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Create a capability and return its full ID
fn create_cap(tmp: &TempDir, name: &str) -> String {
    let output = osb()
        .current_dir(tmp.path())
        .args(["cap", "new", "--name", name, "--no-edit", "-f", "id"])
        .output()
        .unwrap();
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    osb()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("opensource.builders toolkit"));
}

#[test]
fn test_version_displays() {
    osb()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("osb"));
}

#[test]
fn test_unknown_command_fails() {
    osb().arg("unknown-command").assert().failure();
}

#[test]
fn test_command_outside_catalog_fails() {
    let tmp = TempDir::new().unwrap();
    osb()
        .current_dir(tmp.path())
        .args(["app", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an OSB catalog"));
}

// ============================================================================
// Init
// ============================================================================

#[test]
fn test_init_creates_structure() {
    let tmp = TempDir::new().unwrap();
    osb()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized OSB catalog"));

    assert!(tmp.path().join(".osb/config.yaml").exists());
    assert!(tmp.path().join("catalog/proprietary").is_dir());
    assert!(tmp.path().join("catalog/alternatives").is_dir());
    assert!(tmp.path().join("catalog/capabilities").is_dir());
}

#[test]
fn test_init_twice_is_graceful() {
    let tmp = setup_catalog();
    osb()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

// ============================================================================
// Entity CRUD
// ============================================================================

#[test]
fn test_app_new_creates_file() {
    let tmp = setup_catalog();
    let id = create_app(&tmp, "Shopify", "E-commerce platform");

    assert!(id.starts_with("APP-"));
    let file = tmp
        .path()
        .join("catalog/proprietary")
        .join(format!("{}.osb.yaml", id));
    assert!(file.exists());

    let content = fs::read_to_string(&file).unwrap();
    assert!(content.contains("name: \"Shopify\""));
    assert!(content.contains("slug: shopify"));
}

#[test]
fn test_app_new_requires_name() {
    let tmp = setup_catalog();
    osb()
        .current_dir(tmp.path())
        .args(["app", "new", "--no-edit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--name is required"));
}

#[test]
fn test_app_list_shows_entries() {
    let tmp = setup_catalog();
    create_app(&tmp, "Shopify", "E-commerce platform");
    create_app(&tmp, "Notion", "All-in-one workspace");

    osb()
        .current_dir(tmp.path())
        .args(["app", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shopify"))
        .stdout(predicate::str::contains("Notion"));

    osb()
        .current_dir(tmp.path())
        .args(["app", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2"));
}

#[test]
fn test_app_list_filter_narrows() {
    let tmp = setup_catalog();
    create_app(&tmp, "Shopify", "E-commerce platform");
    create_app(&tmp, "Notion", "All-in-one workspace");

    osb()
        .current_dir(tmp.path())
        .args(["app", "list", "--filter", "workspace", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1"));
}

#[test]
fn test_app_list_empty_filter_returns_all() {
    let tmp = setup_catalog();
    create_app(&tmp, "Shopify", "E-commerce platform");
    create_app(&tmp, "Notion", "All-in-one workspace");

    osb()
        .current_dir(tmp.path())
        .args(["app", "list", "--filter", "", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2"));
}

#[test]
fn test_app_show_by_slug() {
    let tmp = setup_catalog();
    create_app(&tmp, "Shopify", "E-commerce platform");

    osb()
        .current_dir(tmp.path())
        .args(["app", "show", "shopify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name: \"Shopify\""));
}

#[test]
fn test_app_show_not_found() {
    let tmp = setup_catalog();
    osb()
        .current_dir(tmp.path())
        .args(["app", "show", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No application found"));
}

#[test]
fn test_app_delete_removes_file() {
    let tmp = setup_catalog();
    let id = create_app(&tmp, "Shopify", "E-commerce platform");

    osb()
        .current_dir(tmp.path())
        .args(["app", "delete", "shopify"])
        .assert()
        .success();

    let file = tmp
        .path()
        .join("catalog/proprietary")
        .join(format!("{}.osb.yaml", id));
    assert!(!file.exists());
}

#[test]
fn test_cap_new_with_complexity() {
    let tmp = setup_catalog();
    osb()
        .current_dir(tmp.path())
        .args([
            "cap",
            "new",
            "--name",
            "Real-Time Collaboration",
            "--complexity",
            "advanced",
            "--category",
            "collaboration",
            "--no-edit",
        ])
        .assert()
        .success();

    osb()
        .current_dir(tmp.path())
        .args(["cap", "show", "real-time-collaboration"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complexity: advanced"));
}

#[test]
fn test_cap_new_rejects_bad_complexity() {
    let tmp = setup_catalog();
    osb()
        .current_dir(tmp.path())
        .args([
            "cap",
            "new",
            "--name",
            "Search",
            "--complexity",
            "impossible",
            "--no-edit",
        ])
        .assert()
        .failure();
}

// ============================================================================
// Links
// ============================================================================

#[test]
fn test_link_alt_to_app_writes_reciprocal() {
    let tmp = setup_catalog();
    let app_id = create_app(&tmp, "Shopify", "E-commerce platform");
    let alt_id = create_alt(&tmp, "Medusa", Some("https://github.com/medusajs/medusa"));

    osb()
        .current_dir(tmp.path())
        .args(["link", "add", "medusa", "shopify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alternative_to"))
        .stdout(predicate::str::contains("alternatives"));

    let app_file = tmp
        .path()
        .join("catalog/proprietary")
        .join(format!("{}.osb.yaml", app_id));
    let app_content = fs::read_to_string(&app_file).unwrap();
    assert!(app_content.contains(&alt_id));

    let alt_file = tmp
        .path()
        .join("catalog/alternatives")
        .join(format!("{}.osb.yaml", alt_id));
    let alt_content = fs::read_to_string(&alt_file).unwrap();
    assert!(alt_content.contains(&app_id));
}

#[test]
fn test_link_app_to_cap() {
    let tmp = setup_catalog();
    create_app(&tmp, "Shopify", "E-commerce platform");
    let cap_id = create_cap(&tmp, "Checkout");

    osb()
        .current_dir(tmp.path())
        .args(["link", "add", "shopify", "checkout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("capabilities"));

    osb()
        .current_dir(tmp.path())
        .args(["link", "list", "shopify"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&cap_id));
}

#[test]
fn test_link_oss_to_cap_is_rejected_with_hint() {
    let tmp = setup_catalog();
    create_alt(&tmp, "Medusa", None);
    create_cap(&tmp, "Checkout");

    osb()
        .current_dir(tmp.path())
        .args(["link", "add", "medusa", "checkout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("osb alt implement"));
}

// ============================================================================
// Implementations + Compatibility
// ============================================================================

/// Seed a catalog with one app (2 declared caps), one alternative
/// implementing one of them
fn seed_compat_catalog(tmp: &TempDir) {
    create_app(tmp, "Shopify", "E-commerce platform");
    create_alt(tmp, "Medusa", Some("https://github.com/medusajs/medusa"));
    create_cap(tmp, "Checkout");
    create_cap(tmp, "Payments");

    for cap in ["checkout", "payments"] {
        osb()
            .current_dir(tmp.path())
            .args(["link", "add", "shopify", cap])
            .assert()
            .success();
    }
    osb()
        .current_dir(tmp.path())
        .args(["link", "add", "medusa", "shopify"])
        .assert()
        .success();
    osb()
        .current_dir(tmp.path())
        .args([
            "alt",
            "implement",
            "medusa",
            "checkout",
            "--notes",
            "Cart and checkout flows",
            "--path",
            "packages/checkout",
        ])
        .assert()
        .success();
}

#[test]
fn test_compat_reports_half_coverage() {
    let tmp = setup_catalog();
    seed_compat_catalog(&tmp);

    osb()
        .current_dir(tmp.path())
        .args(["compat", "shopify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Medusa"))
        .stdout(predicate::str::contains("1/2"))
        .stdout(predicate::str::contains("50%"));
}

#[test]
fn test_compat_missing_lists_uncovered_capability() {
    let tmp = setup_catalog();
    seed_compat_catalog(&tmp);

    osb()
        .current_dir(tmp.path())
        .args(["compat", "shopify", "--missing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Missing in Medusa"))
        .stdout(predicate::str::contains("Payments"));
}

#[test]
fn test_compat_full_match_is_100() {
    let tmp = setup_catalog();
    seed_compat_catalog(&tmp);
    osb()
        .current_dir(tmp.path())
        .args(["alt", "implement", "medusa", "payments"])
        .assert()
        .success();

    osb()
        .current_dir(tmp.path())
        .args(["compat", "shopify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2/2"))
        .stdout(predicate::str::contains("100%"));
}

#[test]
fn test_compat_zero_declared_is_0() {
    let tmp = setup_catalog();
    create_app(&tmp, "Figma", "Design tool");
    create_alt(&tmp, "Penpot", None);
    osb()
        .current_dir(tmp.path())
        .args(["link", "add", "penpot", "figma"])
        .assert()
        .success();

    osb()
        .current_dir(tmp.path())
        .args(["compat", "figma"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0%"));
}

#[test]
fn test_unimplement_removes_record() {
    let tmp = setup_catalog();
    seed_compat_catalog(&tmp);

    osb()
        .current_dir(tmp.path())
        .args(["alt", "unimplement", "medusa", "checkout"])
        .assert()
        .success();

    osb()
        .current_dir(tmp.path())
        .args(["compat", "shopify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0/2"));
}

// ============================================================================
// Pinning (the Build Drawer)
// ============================================================================

#[test]
fn test_pin_add_then_toggle_off() {
    let tmp = setup_catalog();
    seed_compat_catalog(&tmp);

    osb()
        .current_dir(tmp.path())
        .args(["pin", "add", "medusa", "checkout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pinned"));

    // Pinning the same capability again toggles it off - zero pins, not two
    osb()
        .current_dir(tmp.path())
        .args(["pin", "add", "medusa", "checkout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unpinned"));

    osb()
        .current_dir(tmp.path())
        .args(["pin", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0"));
}

#[test]
fn test_pin_requires_implementation() {
    let tmp = setup_catalog();
    seed_compat_catalog(&tmp);

    osb()
        .current_dir(tmp.path())
        .args(["pin", "add", "medusa", "payments"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not implement"));
}

#[test]
fn test_pin_rm_absent_is_noop() {
    let tmp = setup_catalog();
    seed_compat_catalog(&tmp);

    osb()
        .current_dir(tmp.path())
        .args(["pin", "rm", "medusa", "checkout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("was not pinned"));
}

#[test]
fn test_pins_persist_across_invocations() {
    let tmp = setup_catalog();
    seed_compat_catalog(&tmp);

    osb()
        .current_dir(tmp.path())
        .args(["pin", "add", "medusa", "checkout"])
        .assert()
        .success();

    let store = tmp.path().join(".osb/pinned_capabilities.json");
    assert!(store.exists());
    let content = fs::read_to_string(&store).unwrap();
    assert!(content.contains("\"toolName\": \"Medusa\""));

    osb()
        .current_dir(tmp.path())
        .args(["pin", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checkout"))
        .stdout(predicate::str::contains("Medusa"));
}

#[test]
fn test_corrupt_pin_store_degrades_gracefully() {
    let tmp = setup_catalog();
    seed_compat_catalog(&tmp);

    fs::write(tmp.path().join(".osb/pinned_capabilities.json"), "not json").unwrap();

    osb()
        .current_dir(tmp.path())
        .args(["pin", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0"))
        .stderr(predicate::str::contains("corrupt"));
}

#[test]
fn test_pin_clear() {
    let tmp = setup_catalog();
    seed_compat_catalog(&tmp);

    osb()
        .current_dir(tmp.path())
        .args(["pin", "add", "medusa", "checkout"])
        .assert()
        .success();
    osb()
        .current_dir(tmp.path())
        .args(["pin", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1"));
}

// ============================================================================
// Prompt generation
// ============================================================================

/// Pin Checkout then Payments from Medusa, in that order
fn seed_two_pins(tmp: &TempDir) {
    seed_compat_catalog(tmp);
    osb()
        .current_dir(tmp.path())
        .args(["alt", "implement", "medusa", "payments"])
        .assert()
        .success();
    osb()
        .current_dir(tmp.path())
        .args(["pin", "add", "medusa", "checkout"])
        .assert()
        .success();
    osb()
        .current_dir(tmp.path())
        .args(["pin", "add", "medusa", "payments"])
        .assert()
        .success();
}

#[test]
fn test_prompt_byos_numbers_in_pin_order() {
    let tmp = setup_catalog();
    seed_two_pins(&tmp);

    let output = osb()
        .current_dir(tmp.path())
        .args(["prompt", "-t", "byos"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    let first = stdout.find("1. Implement Medusa's Checkout.").unwrap();
    let second = stdout.find("2. Implement Medusa's Payments.").unwrap();
    assert!(first < second);
    assert!(stdout.contains("Medusa repository: https://github.com/medusajs/medusa"));
    assert!(stdout.contains("existing codebase"));
}

#[test]
fn test_prompt_falls_back_to_search_url() {
    let tmp = setup_catalog();
    create_app(&tmp, "Figma", "Design tool");
    create_alt(&tmp, "Penpot", None); // no repository on record
    create_cap(&tmp, "Prototyping");
    osb()
        .current_dir(tmp.path())
        .args(["alt", "implement", "penpot", "prototyping"])
        .assert()
        .success();
    osb()
        .current_dir(tmp.path())
        .args(["pin", "add", "penpot", "prototyping"])
        .assert()
        .success();

    osb()
        .current_dir(tmp.path())
        .args(["prompt", "-t", "byos"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://github.com/search?q=penpot",
        ));
}

#[test]
fn test_prompt_template_starter_has_description_block() {
    let tmp = setup_catalog();
    seed_two_pins(&tmp);

    osb()
        .current_dir(tmp.path())
        .args(["prompt", "-t", "full-stack"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "This starter is a full-stack Next.js application",
        ))
        .stdout(predicate::str::contains("Implement the following capabilities:"));
}

#[test]
fn test_prompt_byos_with_no_pins_is_empty() {
    let tmp = setup_catalog();

    let output = osb()
        .current_dir(tmp.path())
        .args(["prompt", "-t", "byos"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_prompt_unknown_template_fails() {
    let tmp = setup_catalog();
    osb()
        .current_dir(tmp.path())
        .args(["prompt", "-t", "mystery"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown starter template"));
}

#[test]
fn test_prompt_list_templates() {
    let tmp = setup_catalog();
    osb()
        .current_dir(tmp.path())
        .args(["prompt", "--list-templates"])
        .assert()
        .success()
        .stdout(predicate::str::contains("byos"))
        .stdout(predicate::str::contains("Bring Your Own Starter"));
}

#[test]
fn test_prompt_starter_clone() {
    let tmp = setup_catalog();
    osb()
        .current_dir(tmp.path())
        .args(["prompt", "-t", "full-stack", "--starter-clone"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "git clone https://github.com/junaid33/next-keystone-starter.git",
        ));
}

#[test]
fn test_prompt_output_to_file() {
    let tmp = setup_catalog();
    seed_two_pins(&tmp);

    let out = tmp.path().join("prompt.txt");
    osb()
        .current_dir(tmp.path())
        .args(["prompt", "-t", "byos", "-o", out.to_str().unwrap()])
        .assert()
        .success();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("1. Implement Medusa's Checkout."));
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn test_search_matches_description() {
    let tmp = setup_catalog();
    create_app(&tmp, "Shopify", "E-commerce platform");
    create_alt(&tmp, "Medusa", None);

    osb()
        .current_dir(tmp.path())
        .args(["search", "commerce"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shopify"));
}

#[test]
fn test_search_no_results() {
    let tmp = setup_catalog();
    create_app(&tmp, "Shopify", "E-commerce platform");

    osb()
        .current_dir(tmp.path())
        .args(["search", "zzzzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found for 'zzzzz'"));
}

#[test]
fn test_search_type_filter() {
    let tmp = setup_catalog();
    create_app(&tmp, "Shopify", "E-commerce platform");
    create_alt(&tmp, "Medusa", None);

    osb()
        .current_dir(tmp.path())
        .args(["search", "", "-t", "alt", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1"));
}

// ============================================================================
// Validate
// ============================================================================

#[test]
fn test_validate_clean_catalog() {
    let tmp = setup_catalog();
    seed_compat_catalog(&tmp);

    osb()
        .current_dir(tmp.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Catalog is valid"));
}

#[test]
fn test_validate_detects_dangling_link() {
    let tmp = setup_catalog();
    seed_compat_catalog(&tmp);

    // Force-delete a linked capability, leaving dangling references
    osb()
        .current_dir(tmp.path())
        .args(["cap", "delete", "checkout", "--force"])
        .assert()
        .success();

    osb()
        .current_dir(tmp.path())
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("references missing entry"));
}

#[test]
fn test_validate_strict_escalates_warnings() {
    let tmp = setup_catalog();
    create_alt(&tmp, "Penpot", None); // warning: no repository_url

    osb()
        .current_dir(tmp.path())
        .arg("validate")
        .assert()
        .success();

    osb()
        .current_dir(tmp.path())
        .args(["validate", "--strict"])
        .assert()
        .failure();
}

// ============================================================================
// Import
// ============================================================================

#[test]
fn test_import_template_prints_headers() {
    osb()
        .args(["import", "cap", "--template"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name,description,category,complexity"));
}

#[test]
fn test_import_caps_from_csv() {
    let tmp = setup_catalog();
    let csv = tmp.path().join("caps.csv");
    fs::write(
        &csv,
        "name,description,category,complexity\n\
         Checkout,Cart and checkout,e_commerce,intermediate\n\
         Payments,Payment processing,e_commerce,advanced\n",
    )
    .unwrap();

    osb()
        .current_dir(tmp.path())
        .args(["import", "cap", "--csv", csv.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2"));

    osb()
        .current_dir(tmp.path())
        .args(["cap", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2"));
}

#[test]
fn test_import_dry_run_writes_nothing() {
    let tmp = setup_catalog();
    let csv = tmp.path().join("apps.csv");
    fs::write(&csv, "name,description\nShopify,E-commerce\n").unwrap();

    osb()
        .current_dir(tmp.path())
        .args(["import", "app", "--csv", csv.to_str().unwrap(), "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would import 1"));

    osb()
        .current_dir(tmp.path())
        .args(["app", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0"));
}

// ============================================================================
// Status & cache
// ============================================================================

#[test]
fn test_status_shows_counts() {
    let tmp = setup_catalog();
    seed_compat_catalog(&tmp);

    osb()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Proprietary applications:"))
        .stdout(predicate::str::contains("Open-source alternatives:"))
        .stdout(predicate::str::contains("Capabilities:"));
}

#[test]
fn test_cache_rebuild_and_status() {
    let tmp = setup_catalog();
    seed_compat_catalog(&tmp);

    osb()
        .current_dir(tmp.path())
        .args(["cache", "rebuild"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rebuilt cache"));

    osb()
        .current_dir(tmp.path())
        .args(["cache", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entities:"));
}

#[test]
fn test_delete_linked_entity_is_guarded() {
    let tmp = setup_catalog();
    seed_compat_catalog(&tmp);

    // Checkout is declared by Shopify and implemented by Medusa
    osb()
        .current_dir(tmp.path())
        .args(["cap", "delete", "checkout"])
        .assert()
        .failure();
}
