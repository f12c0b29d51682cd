use std::path::PathBuf;

const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="48" height="48">
  <path id="from" d="M8,8 L24,8 L24,24 L8,24 Z" fill="#000"/>
  <path id="to" d="M8,8 L40,8 L40,40 L8,40 Z" fill="#000"/>
</svg>"##;

const CONFIG: &str = r##"{
  "canvasId": "stage",
  "fromPathId": "from",
  "toPathId": "to",
  "fill": true,
  "color": "#ff3366",
  "sampleSteps": 32,
  "duration": 100
}"##;

fn fixture_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("cli_smoke").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("shapes.svg"), SVG).unwrap();
    std::fs::write(dir.join("morph.json"), CONFIG).unwrap();
    dir
}

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pathmorph"))
}

#[test]
fn cli_frame_writes_png() {
    let dir = fixture_dir("frame");
    let out = dir.join("mid.png");
    let _ = std::fs::remove_file(&out);

    let status = std::process::Command::new(bin())
        .arg("frame")
        .arg("--svg")
        .arg(dir.join("shapes.svg"))
        .arg("--config")
        .arg(dir.join("morph.json"))
        .args(["--progress", "0.5", "--out"])
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    let img = image::open(&out).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (48, 48));
    assert_eq!(img.get_pixel(16, 16).0, [0xff, 0x33, 0x66, 0xff]);
    assert_eq!(img.get_pixel(44, 44).0[3], 0);
}

#[test]
fn cli_render_writes_sequence() {
    let dir = fixture_dir("render");
    let out_dir = dir.join("frames");
    let _ = std::fs::remove_dir_all(&out_dir);

    let status = std::process::Command::new(bin())
        .arg("render")
        .arg("--svg")
        .arg(dir.join("shapes.svg"))
        .arg("--config")
        .arg(dir.join("morph.json"))
        .arg("--out-dir")
        .arg(&out_dir)
        .args(["--fps", "50"])
        .status()
        .unwrap();
    assert!(status.success());

    let mut names: Vec<String> = std::fs::read_dir(&out_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names.len(), 5);
    assert_eq!(names[0], "frame_00000.png");

    let last = image::open(out_dir.join("frame_00004.png")).unwrap().to_rgba8();
    assert_eq!(last.get_pixel(36, 36).0[3], 0xff);
}

#[test]
fn cli_rejects_unknown_path_id() {
    let dir = fixture_dir("bad_id");
    std::fs::write(
        dir.join("morph.json"),
        r#"{"canvasId":"stage","fromPathId":"from","toPathId":"missing"}"#,
    )
    .unwrap();

    let output = std::process::Command::new(bin())
        .arg("frame")
        .arg("--svg")
        .arg(dir.join("shapes.svg"))
        .arg("--config")
        .arg(dir.join("morph.json"))
        .arg("--out")
        .arg(dir.join("never.png"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing"));
}
