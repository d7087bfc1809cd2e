//! Integration tests for the `notiled` binary.
//!
//! Hardware commands run against sysfs-shaped files in a temp directory,
//! pointed at by a `--config` file.

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn cli() -> assert_cmd::Command {
    cargo_bin_cmd!("notiled")
}

/// A temp dir holding `leds/led.<N>/{color,brightness}` and a config that
/// points at it.
struct FakeLeds {
    dir: tempfile::TempDir,
}

impl FakeLeds {
    fn new(nodes: &[(u32, &str)]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("leds");
        for &(index, marker) in nodes {
            let node = root.join(format!("led.{index}"));
            std::fs::create_dir_all(&node).unwrap();
            std::fs::write(node.join("color"), format!("{marker}\n")).unwrap();
            std::fs::write(node.join("brightness"), "0\n").unwrap();
        }
        std::fs::create_dir_all(&root).unwrap();

        let touch = dir.path().join("touch");
        std::fs::create_dir_all(&touch).unwrap();
        std::fs::write(touch.join("max_brightness"), "1\n").unwrap();
        std::fs::write(touch.join("brightness"), "0\n").unwrap();

        let config = format!(
            "leds_root = {:?}\ntouch_key_path = {:?}\n",
            root.display().to_string(),
            touch.display().to_string()
        );
        std::fs::write(dir.path().join("config.toml"), config).unwrap();
        FakeLeds { dir }
    }

    fn rgb() -> Self {
        Self::new(&[(1, "RED"), (2, "GREEN"), (3, "BLUE")])
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn brightness(&self, index: u32) -> String {
        self.read(&Path::new("leds").join(format!("led.{index}/brightness")))
    }

    fn read(&self, rel: &Path) -> String {
        std::fs::read_to_string(self.dir.path().join(rel))
            .unwrap()
            .trim()
            .to_string()
    }

    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = cli();
        cmd.arg("--config").arg(self.config());
        cmd
    }
}

#[test]
fn cli_help_succeeds() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("notiled"));
}

#[test]
fn cli_version_prints_version() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_verbose_flag_accepted() {
    let leds = FakeLeds::rgb();
    leds.cmd().args(["-v", "config"]).assert().success();
}

// ── config ──

#[test]
fn cli_config_json_reports_custom_file() {
    let leds = FakeLeds::rgb();
    let output = leds
        .cmd()
        .args(["--json", "config"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value =
        serde_json::from_slice(&output).expect("config --json should produce valid JSON");
    assert!(json["settings"].is_object());
    assert_eq!(json["config_file_exists"], true);
    assert_eq!(json["settings"]["min_tick_ms"], 10);
    assert!(
        json["settings"]["leds_root"]
            .as_str()
            .unwrap()
            .ends_with("leds")
    );
    assert!(json["errors"].as_array().unwrap().is_empty());
}

#[test]
fn cli_config_human_lists_settings() {
    let leds = FakeLeds::rgb();
    leds.cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("(loaded)"))
        .stdout(predicate::str::contains("#FF0000 -> #FFFF0000"));
}

#[test]
fn cli_config_init_writes_defaults_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    cli()
        .arg("--config")
        .arg(&path)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("# notiled configuration"));
    assert!(contents.contains("min_tick_ms = 10"));

    cli()
        .arg("--config")
        .arg(&path)
        .args(["config", "--init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

// ── plan ──

#[test]
fn cli_plan_json_green_blink() {
    let output = cli()
        .args(["--json", "plan", "green", "--on", "500", "--off", "200"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["color"], "#FF00FF00");
    assert_eq!(json["period_ms"], 700);
    let segments = json["segments"].as_array().unwrap();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0]["values"]["green"], 255);
    assert_eq!(segments[0]["duration_ms"], 500);
    assert_eq!(segments[1]["values"]["green"], 0);
    assert_eq!(segments[1]["duration_ms"], 200);
}

#[test]
fn cli_plan_human_lists_segments_in_channel_order() {
    cli()
        .args(["plan", "#FF0000FF"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RED=255"))
        .stdout(predicate::str::contains("BLUE=255"))
        .stdout(predicate::str::contains("GREEN=").not());
}

#[test]
fn cli_plan_without_color_uses_config_default() {
    let leds = FakeLeds::rgb();
    leds.cmd()
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("#FFFF0000"))
        .stdout(predicate::str::contains("RED=255"));
}

#[test]
fn cli_plan_invalid_color_fails() {
    cli()
        .args(["plan", "#12345"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Color error"));
}

// ── channels ──

#[test]
fn cli_channels_json_reports_missing_channel() {
    let leds = FakeLeds::new(&[(1, "RED"), (3, "BLUE")]);
    let output = leds
        .cmd()
        .args(["--json", "channels"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["bound"], 2);
    assert_eq!(json["channels"][1]["channel"], "green");
    assert!(json["channels"][1]["brightness_path"].is_null());
}

// ── set / off ──

#[test]
fn cli_set_manual_writes_each_channel() {
    let leds = FakeLeds::rgb();
    leds.cmd()
        .args(["set", "#102030"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#FF102030"));
    assert_eq!(leds.brightness(1), "16");
    assert_eq!(leds.brightness(2), "32");
    assert_eq!(leds.brightness(3), "48");
}

#[test]
fn cli_set_zero_discriminant_turns_off() {
    let leds = FakeLeds::rgb();
    leds.cmd().args(["set", "white"]).assert().success();
    leds.cmd().args(["set", "0x00FF0000"]).assert().success();
    for i in 1..=3 {
        assert_eq!(leds.brightness(i), "0");
    }
}

#[test]
fn cli_off_turns_every_channel_off() {
    let leds = FakeLeds::rgb();
    leds.cmd().args(["set", "white"]).assert().success();
    leds.cmd()
        .arg("off")
        .assert()
        .success()
        .stdout(predicate::str::contains("off"));
    for i in 1..=3 {
        assert_eq!(leds.brightness(i), "0");
    }
}

#[test]
fn cli_set_without_channels_fails() {
    let leds = FakeLeds::new(&[]);
    leds.cmd()
        .args(["set", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no notification LED channels"));
}

#[test]
fn cli_set_without_color_uses_config_default() {
    let leds = FakeLeds::rgb();
    std::fs::write(
        leds.config(),
        format!(
            "{}color = \"#00FF00\"\n",
            std::fs::read_to_string(leds.config()).unwrap()
        ),
    )
    .unwrap();
    leds.cmd().arg("set").assert().success();
    assert_eq!(leds.brightness(1), "0");
    assert_eq!(leds.brightness(2), "255");
    assert_eq!(leds.brightness(3), "0");
}

#[test]
fn cli_set_unknown_mode_is_rejected() {
    let leds = FakeLeds::rgb();
    leds.cmd()
        .args(["set", "red", "--mode", "pulse"])
        .assert()
        .failure();
    assert_eq!(leds.brightness(1), "0");
}

// ── led ──

#[test]
fn cli_led_touch_key_scales_to_max_brightness() {
    let leds = FakeLeds::rgb();
    leds.cmd()
        .args(["led", "touch_key", "#FF000000"])
        .assert()
        .success();
    assert_eq!(leds.read(Path::new("touch/brightness")), "1");
}

#[test]
fn cli_led_unknown_id_is_not_supported() {
    let leds = FakeLeds::rgb();
    leds.cmd()
        .args(["led", "camera_front", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not supported"));
}
