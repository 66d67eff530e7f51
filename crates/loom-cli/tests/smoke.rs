use std::io::{self, Write};
use std::process::{Command, Stdio};

use tempfile::tempdir;

/// Executes a command with the Loom CLI.
fn exec() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_loom"));
    command.env_remove("LOOM_CONFIG");
    command
}

#[test]
fn test_help() -> io::Result<()> {
    let output = exec().arg("--help").output()?;
    let stdout = std::str::from_utf8(&output.stdout).unwrap();
    assert!(stdout.contains("Lays out paragraphs of text"));
    Ok(())
}

#[test]
fn test_layout_text() -> io::Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("fox.txt");
    std::fs::write(&path, "the quick\nbrown fox\n\njumps\n")?;

    let output = exec().arg("layout").arg(&path).args(["--width", "10"]).output()?;
    assert!(output.status.success());

    // Both lines fit their width exactly and are set fully stretched.
    let stdout = std::str::from_utf8(&output.stdout).unwrap();
    assert_eq!(stdout, "the  quick\nbrown  fox\n\njumps\n");
    Ok(())
}

#[test]
fn test_layout_json_from_stdin() -> io::Result<()> {
    let mut child = exec()
        .args(["layout", "-", "--format", "json", "-w", "10", "-w", "20"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;
    child.stdin.take().unwrap().write_all(b"the quick brown fox")?;
    let output = child.wait_with_output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["width"], 10.0);
    assert_eq!(json[1]["width"], 20.0);

    let lines = json[0]["paragraphs"][0]["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["words"][1]["text"], "quick");
    assert_eq!(lines[0]["words"][1]["x"], 5.0);
    assert_eq!(json[1]["paragraphs"][0]["lines"].as_array().unwrap().len(), 1);
    Ok(())
}

#[test]
fn test_config_file() -> io::Result<()> {
    let tmp = tempdir()?;
    let text = tmp.path().join("fox.txt");
    let config = tmp.path().join("loom.toml");
    std::fs::write(&text, "the quick brown fox")?;
    std::fs::write(&config, "text-width = 10\nleading = 2\n")?;

    let output = exec().arg("layout").arg(&text).env("LOOM_CONFIG", &config).output()?;
    assert!(output.status.success());

    let stdout = std::str::from_utf8(&output.stdout).unwrap();
    assert_eq!(stdout, "the  quick\n\nbrown  fox\n");
    Ok(())
}

#[test]
fn test_stream_round_trip() -> io::Result<()> {
    let tmp = tempdir()?;
    let text = tmp.path().join("text.txt");
    let streams = tmp.path().join("streams.json");
    std::fs::write(&text, "a typesetting engine")?;

    let output = exec().arg("stream").arg(&text).args(["--hyphenate", "en"]).output()?;
    assert!(output.status.success());
    std::fs::write(&streams, &output.stdout)?;

    let from_text = exec()
        .arg("layout")
        .arg(&text)
        .args(["--hyphenate", "en", "-w", "12", "--format", "json"])
        .output()?;
    let from_stream = exec()
        .arg("layout")
        .arg(&streams)
        .args(["--stream", "-w", "12", "--format", "json"])
        .output()?;
    assert!(from_text.status.success());
    assert_eq!(from_text.stdout, from_stream.stdout);
    Ok(())
}

#[test]
fn test_invalid_stream() -> io::Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("bad.json");
    std::fs::write(&path, r#"[[{"kind": "branch-exit", "skip": 3}]]"#)?;

    let output = exec().arg("layout").arg(&path).arg("--stream").output()?;
    assert!(!output.status.success());

    let stderr = std::str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("branch exit at index 0 skips 3 items past the end"));
    Ok(())
}

#[test]
fn test_unsupported_language() -> io::Result<()> {
    let output = exec().args(["stream", "-", "--hyphenate", "xx"]).stdin(Stdio::null()).output()?;
    assert!(!output.status.success());

    let stderr = std::str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("unsupported hyphenation language `xx`"));
    assert!(stderr.contains("hint"));
    Ok(())
}

#[test]
fn test_invalid_width() -> io::Result<()> {
    let output = exec().args(["layout", "-", "-w", "0"]).stdin(Stdio::null()).output()?;
    assert!(!output.status.success());

    let stderr = std::str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("line width must be positive"));
    Ok(())
}

#[test]
fn test_overwide_word_warns() -> io::Result<()> {
    let mut child = exec()
        .args(["layout", "-", "-w", "10"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    child.stdin.take().unwrap().write_all(b"aaa bbbbbbbbbbbbbbb ccc")?;
    let output = child.wait_with_output()?;
    assert!(output.status.success());

    let stdout = std::str::from_utf8(&output.stdout).unwrap();
    assert_eq!(stdout, "aaa\n");

    let stderr = std::str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("warning: paragraph 1 does not fit into width 10"), "{stderr}");
    assert!(stderr.contains("the word `bbbbbbbbbbbbbbb` may be wider than the line"));
    Ok(())
}

#[test]
fn test_space_overrides() -> io::Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("fox.txt");
    std::fs::write(&path, "the quick brown fox")?;

    let output = exec()
        .arg("layout")
        .arg(&path)
        .args(["-w", "10", "--space-shrink", "2"])
        .output()?;
    assert!(!output.status.success());

    let stderr = std::str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("invalid space elasticity: shrink 2, width 1, stretch 2"), "{stderr}");
    Ok(())
}
