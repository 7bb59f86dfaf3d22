use std::path::PathBuf;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_fsmplay")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "fsmplay.exe"
            } else {
                "fsmplay"
            });
            p
        })
}

#[test]
fn cli_frames_writes_one_dot_per_step() {
    let dir = PathBuf::from("target").join("cli_smoke_frames");
    let _ = std::fs::remove_dir_all(&dir);

    let status = std::process::Command::new(exe())
        .args(["frames", "--in", "tests/data/small_scene.json", "--out"])
        .arg(&dir)
        .status()
        .unwrap();
    assert!(status.success());

    assert!(dir.join("scenario-b-000.dot").exists());
    assert!(dir.join("scenario-b-001.dot").exists());
    assert!(!dir.join("scenario-b-002.dot").exists());
    assert!(dir.join("scenario-c-000.dot").exists());

    let last = std::fs::read_to_string(dir.join("scenario-b-001.dot")).unwrap();
    assert!(last.contains("\"S2\" -> \"S3\" [label=\"y\"]"));
    assert!(last.contains("  scale=1.25;\n"));

    let lone = std::fs::read_to_string(dir.join("lone-000.dot")).unwrap();
    assert!(lone.contains("\"S1\" [shape=ellipse"));
    assert!(!lone.contains("->"));
    assert!(!lone.contains("scale="));
}

#[test]
fn cli_play_prints_every_frame() {
    let out = std::process::Command::new(exe())
        .args([
            "play",
            "--in",
            "tests/data/small_scene.json",
            "--player",
            "0",
            "--config",
            "tests/data/fast_config.json",
        ])
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.matches("digraph {").count(), 2);
    assert!(stdout.contains("rankdir=TB;"));
    assert!(stdout.contains("// progress 100%"));

    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("stopped at 2/2"));
}

#[test]
fn cli_rejects_out_of_range_player() {
    let status = std::process::Command::new(exe())
        .args(["play", "--in", "tests/data/small_scene.json", "--player", "9"])
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn cli_play_selects_player_by_mount() {
    let out = std::process::Command::new(exe())
        .args([
            "play",
            "--in",
            "tests/data/small_scene.json",
            "--selector",
            "#scenario-c",
            "--config",
            "tests/data/fast_config.json",
        ])
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.matches("digraph {").count(), 1);
    assert!(stdout.contains("\"C\" -> \"D\" [label=\"q\"]"));

    let missing = std::process::Command::new(exe())
        .args(["play", "--in", "tests/data/small_scene.json", "--selector", "#nope"])
        .status()
        .unwrap();
    assert!(!missing.success());
}
