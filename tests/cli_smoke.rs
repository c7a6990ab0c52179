use std::path::PathBuf;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_polytrace")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "polytrace.exe"
            } else {
                "polytrace"
            });
            p
        })
}

fn write_doc(name: &str, text: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

const DOC: &str = "\
Garden plan
(0.2, 0.6, 0.2) (0.0, 0.0) (10.0, 0.0) (10.0, 10.0) (0.0, 10.0)
(0.8, 0.1, 0.1) (12.0, 2.0) (18.0, 2.0) (15.0, 8.0)
";

#[test]
fn cli_render_writes_gif() {
    let doc = write_doc("doc.txt", DOC);
    let out_path = PathBuf::from("target").join("cli_smoke").join("out.gif");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(exe())
        .args(["render", "--in"])
        .arg(&doc)
        .args(["--width", "64", "--height", "64", "--fps", "10", "--out"])
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    let bytes = std::fs::read(&out_path).unwrap();
    assert!(bytes.starts_with(b"GIF89a"));
}

#[test]
fn cli_frame_writes_png() {
    let doc = write_doc("frame.txt", DOC);
    let out_path = PathBuf::from("target").join("cli_smoke").join("frame.png");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(exe())
        .args(["frame", "--in"])
        .arg(&doc)
        .args(["--index", "5", "--width", "64", "--height", "64", "--out"])
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    assert!(out_path.exists());
}

#[test]
fn cli_extract_prints_json() {
    let doc = write_doc("extract.txt", DOC);
    let out = std::process::Command::new(exe())
        .args(["extract", "--in"])
        .arg(&doc)
        .output()
        .unwrap();

    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let shapes = v["shapes"].as_array().unwrap();
    assert_eq!(shapes.len(), 2);
    assert_eq!(shapes[1]["points"].as_array().unwrap().len(), 3);
}

#[test]
fn cli_render_without_points_fails() {
    let doc = write_doc("empty.txt", "(0.5, 0.2, 0.1)\n(1.0, 2.0) (3.0, 4.0)\n");
    let out_path = PathBuf::from("target").join("cli_smoke").join("empty.gif");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(exe())
        .args(["render", "--in"])
        .arg(&doc)
        .arg("--out")
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(!status.success());
    assert!(!out_path.exists());
}
