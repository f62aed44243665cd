use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const DENSITIES: [(&str, u32); 5] = [
    ("mipmap-mdpi", 48),
    ("mipmap-hdpi", 72),
    ("mipmap-xhdpi", 96),
    ("mipmap-xxhdpi", 144),
    ("mipmap-xxxhdpi", 192),
];

fn run(binary: &str, args: &[&Path]) -> Output {
    Command::new(binary)
        .args(args)
        .output()
        .expect("Failed to run binary")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("command failed");
    }
}

/// Runs the generator against an empty `res/` directory and checks that every
/// density folder receives a decodable launcher icon of the right size.
#[test]
fn test_generates_all_launcher_densities() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let res_dir = temp_dir.path().join("res");

    let output = run(env!("CARGO_BIN_EXE_sparkleboop-icon"), &[res_dir.as_path()]);
    assert_success(&output);

    for (folder, size) in DENSITIES {
        let icon_path = res_dir.join(folder).join("ic_launcher.png");
        assert!(
            icon_path.exists(),
            "Launcher icon should exist at: {}",
            icon_path.display()
        );

        let icon = image::open(&icon_path).expect("Failed to load generated icon");
        assert_eq!(icon.width(), size, "{folder} width");
        assert_eq!(icon.height(), size, "{folder} height");

        // Centre of the gem is always opaque.
        let center = icon.to_rgba8();
        assert_eq!(center.get_pixel(size / 2, size / 2)[3], 255);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generating mipmap-mdpi/ic_launcher.png (48x48)..."));
    assert!(stdout.contains("Done! All icons generated."));
}

#[test]
fn test_custom_density_table() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let res_dir = temp_dir.path().join("res");
    let table_path = temp_dir.path().join("densities.json");
    std::fs::write(&table_path, r#"[{ "folder": "mipmap-tv", "size": 320 }]"#).unwrap();

    let output = run(
        env!("CARGO_BIN_EXE_sparkleboop-icon"),
        &[res_dir.as_path(), table_path.as_path()],
    );
    assert_success(&output);

    let icon = image::open(res_dir.join("mipmap-tv").join("ic_launcher.png"))
        .expect("Failed to load generated icon");
    assert_eq!((icon.width(), icon.height()), (320, 320));
    assert!(!res_dir.join("mipmap-mdpi").exists());
}

#[test]
fn test_invalid_density_table_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let table_path = temp_dir.path().join("densities.json");
    std::fs::write(&table_path, r#"[{ "folder": "mipmap-ldpi", "size": 0 }]"#).unwrap();

    let output = run(
        env!("CARGO_BIN_EXE_sparkleboop-icon"),
        &[temp_dir.path(), table_path.as_path()],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("size 0"));
    assert!(!temp_dir.path().join("mipmap-ldpi").exists());
}

#[test]
fn test_inspector_reports_chunks() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let icon_path = temp_dir.path().join("icon.png");
    std::fs::write(&icon_path, sparkleboop_icon::render_icon(72).unwrap()).unwrap();

    let output = run(env!("CARGO_BIN_EXE_inspect_icon"), &[icon_path.as_path()]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    for tag in ["IHDR", "IDAT", "IEND"] {
        assert!(stdout.contains(tag), "inspector should list {tag}");
    }
    assert!(stdout.contains("Header: 72x72, bit depth 8, color type 6"));
}

#[test]
fn test_inspector_rejects_corrupt_icon() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let icon_path = temp_dir.path().join("icon.png");
    let mut bytes = sparkleboop_icon::render_icon(48).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;
    std::fs::write(&icon_path, bytes).unwrap();

    let output = run(env!("CARGO_BIN_EXE_inspect_icon"), &[icon_path.as_path()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("CRC mismatch"));
}
