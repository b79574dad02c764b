use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn write_site(root: &Path) {
    let rome = root.join("img/2023-05-Rome");
    let paris = root.join("img/2022-01-Paris");
    fs::create_dir_all(&rome).unwrap();
    fs::create_dir_all(&paris).unwrap();

    image::RgbImage::new(40, 60).save(rome.join("piazza.png")).unwrap();
    image::RgbImage::new(60, 40).save(rome.join("scooters.png")).unwrap();
    image::RgbImage::new(50, 50).save(paris.join("tower.png")).unwrap();

    fs::write(
        rome.join("metadata.json"),
        r#"{
            "piazza.png": {
                "photography": {"style": "Portrait, Outdoor", "lighting": "Golden Hour"},
                "scene": {"type": "Outdoor", "description": "A sunset over the hills"},
                "objects": [{"name": "Fountain", "confidence": 0.9}]
            },
            "scooters.png": {
                "photography": {"style": "Street"},
                "scene": {"type": "Urban", "description": "Scooters outside a cafe"}
            }
        }"#,
    )
    .unwrap();
    fs::write(root.join("folio.json"), r#"{"base_url": "/gallery"}"#).unwrap();
}

fn folio(site: &Path) -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.arg("--site").arg(site);
    cmd
}

#[test]
fn lists_years_and_locations() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_site(temp_dir.path());

    folio(temp_dir.path())
        .arg("years")
        .assert()
        .success()
        .stdout(predicate::str::contains("2023\n2022"));

    folio(temp_dir.path())
        .arg("locations")
        .assert()
        .success()
        .stdout(predicate::str::contains("Paris\nRome"));
}

#[test]
fn search_combines_tags_and_free_text() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_site(temp_dir.path());

    folio(temp_dir.path())
        .args(["search", "style:portrait", "sunset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("piazza"))
        .stdout(predicate::str::contains("scooters").not());
}

#[test]
fn list_filters_by_location() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_site(temp_dir.path());

    folio(temp_dir.path())
        .args(["list", "--location", "Paris"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tower"))
        .stdout(predicate::str::contains("piazza").not());
}

#[test]
fn layout_json_uses_measured_sizes() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_site(temp_dir.path());

    let output = folio(temp_dir.path())
        .args(["--json", "layout", "--width", "500"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let sections = json["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0]["year"], "2023");
    // single column at 500px; the 40x60 image is 750px tall plus the 8px gap
    let first = &sections[0]["layout"]["placements"][0];
    assert_eq!(first["column"], 0);
    assert_eq!(first["height"].as_f64(), Some(758.0));
}

#[test]
fn tags_show_suggestion_groups() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_site(temp_dir.path());

    folio(temp_dir.path())
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("PHOTOGRAPHY STYLES"))
        .stdout(predicate::str::contains("style:portrait"))
        .stdout(predicate::str::contains("object:fountain"));
}

#[test]
fn view_wraps_around() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_site(temp_dir.path());

    // catalog order: Paris tower, Rome piazza, Rome scooters
    folio(temp_dir.path())
        .args(["view", "img/2022-01-Paris/tower.png", "--steps", "-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[3/3]"))
        .stdout(predicate::str::contains("scooters"));
}

#[test]
fn urls_use_configured_base() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_site(temp_dir.path());

    folio(temp_dir.path())
        .arg("urls")
        .assert()
        .success()
        .stdout(predicate::str::contains("/gallery/img/2022-01-Paris/metadata.json"));
}

#[test]
fn config_set_and_get() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_site(temp_dir.path());

    folio(temp_dir.path())
        .args(["config", "row_gap", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("row_gap set to 12"));

    folio(temp_dir.path())
        .args(["config", "row_gap"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12"));
}

#[test]
fn unreadable_manifest_fails_with_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_site(temp_dir.path());
    fs::write(temp_dir.path().join("gallery.json"), "{ not json").unwrap();

    folio(temp_dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}
