extern crate assert_cmd;
extern crate image;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use image::Pixel;
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn fractals() -> Command {
    Command::cargo_bin("fractals").unwrap()
}

#[test]
fn renders_a_png_of_the_requested_size() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("frame.png");
    fractals()
        .args(&["--size", "32x24", "--zoom", "10", "--center", "-0.5,0"])
        .arg("--output")
        .arg(&out)
        .assert()
        .success();
    let img = image::open(&out).unwrap().to_rgba();
    assert_eq!(img.dimensions(), (32, 24));
}

#[test]
fn replays_commands_blurs_and_draws() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("moved.png");
    fractals()
        .args(&["--size", "40x30", "--threads", "1"])
        .args(&["--commands", "zoomIn,panLeft,prior,down_arrow"])
        .args(&["--blur", "2", "--weight", "double:1", "--spiral"])
        .arg("--output")
        .arg(&out)
        .assert()
        .success();
    assert!(out.exists());
}

#[test]
fn reads_a_gradient_strip_from_disk() {
    let dir = TempDir::new().unwrap();
    let strip = dir.path().join("strip.png");
    let pixels: Vec<u8> = (0..64u8).flat_map(|y| vec![y * 4, 0, 0, 255]).collect();
    image::save_buffer(&strip, &pixels, 1, 64, image::ColorType::RGBA(8)).unwrap();

    let out = dir.path().join("tinted.png");
    fractals()
        .args(&["--size", "10x10", "--zoom", "1", "--center", "0,0"])
        .arg("--gradient")
        .arg(&strip)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();
    let img = image::open(&out).unwrap().to_rgba();
    // Centre pixel shows c = 0, magnitude zero, which is row one.
    assert_eq!(img.get_pixel(5, 5).channels(), &[4, 0, 0, 255][..]);
}

#[test]
fn rejects_unknown_commands() {
    let dir = TempDir::new().unwrap();
    fractals()
        .args(&["--commands", "zoomIn,spin"])
        .arg("--output")
        .arg(dir.path().join("never.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown command"));
}

#[test]
fn rejects_empty_canvases() {
    let dir = TempDir::new().unwrap();
    fractals()
        .args(&["--size", "0x10"])
        .arg("--output")
        .arg(dir.path().join("never.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid dimensions"));
}

#[test]
fn rejects_a_one_row_gradient() {
    let dir = TempDir::new().unwrap();
    let strip = dir.path().join("flat.png");
    image::save_buffer(&strip, &[1, 2, 3, 255], 1, 1, image::ColorType::RGBA(8)).unwrap();
    fractals()
        .arg("--gradient")
        .arg(&strip)
        .arg("--output")
        .arg(dir.path().join("never.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2"));
}
