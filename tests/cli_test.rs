// tests/cli_test.rs
// Runs the binaural-analyzer binary against generated fixtures.

mod test_utils;

use std::ffi::OsStr;

use binaural_analyzer::testgen::ToneSegment;
use test_utils::{run_analyzer, write_binaural_wav, write_mono_wav, TempPath};

#[test]
fn test_text_report_lists_sections() {
    let temp = TempPath::new("wav");
    write_binaural_wav(temp.path(), 4000, &[ToneSegment::new(60.0, 200.0, 206.0)]);

    let output = run_analyzer([temp.path().as_os_str()]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("SECTION_1_THETA"), "{}", stdout);
    assert!(stdout.contains("4000 Hz"));
}

#[test]
fn test_json_output_shape() {
    let temp = TempPath::new("wav");
    write_binaural_wav(temp.path(), 4000, &[ToneSegment::new(60.0, 200.0, 210.0)]);

    let output = run_analyzer([temp.path().as_os_str(), OsStr::new("--json")]);
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    assert_eq!(value["sample_rate"], 4000);
    assert!(value["file"].as_str().unwrap().ends_with(".wav"));

    let section = &value["sections"][0];
    assert_eq!(section["label"], "section_1_alpha");
    for key in ["start_time", "end_time", "duration", "chunks", "average"] {
        assert!(section.get(key).is_some(), "missing {}", key);
    }

    let chunk = &section["chunks"][0];
    assert_eq!(chunk["wave_type"], "Alpha");
    let peak = &chunk["left_top_freqs"][0];
    assert_eq!(peak.as_array().unwrap().len(), 2);
}

#[test]
fn test_output_file_written() {
    let audio = TempPath::new("wav");
    let json = TempPath::new("json");
    write_binaural_wav(audio.path(), 4000, &[ToneSegment::new(30.0, 200.0, 202.0)]);

    let output = run_analyzer([
        audio.path().as_os_str(),
        OsStr::new("-o"),
        json.path().as_os_str(),
    ]);
    assert!(output.status.success());

    let content = std::fs::read_to_string(json.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["sections"][0]["label"], "section_1_delta");
}

#[test]
fn test_directory_input() {
    let dir = TempPath::dir();
    write_binaural_wav(&dir.path().join("a.wav"), 4000, &[ToneSegment::new(20.0, 200.0, 205.0)]);
    write_binaural_wav(&dir.path().join("b.wav"), 4000, &[ToneSegment::new(20.0, 200.0, 240.0)]);
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let output = run_analyzer([dir.path().as_os_str()]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("2 file(s) analyzed"), "{}", stdout);
}

#[test]
fn test_mono_input_exits_with_input_error() {
    let temp = TempPath::new("wav");
    write_mono_wav(temp.path(), 8000, 1.0, 440.0);

    let output = run_analyzer([temp.path().as_os_str()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2), "stderr: {}", stderr);
    assert!(stderr.contains("stereo"));
}

#[test]
fn test_invalid_overlap_exits_nonzero() {
    let temp = TempPath::new("wav");
    write_binaural_wav(temp.path(), 4000, &[ToneSegment::new(5.0, 200.0, 210.0)]);

    let output = run_analyzer([
        temp.path().as_os_str(),
        OsStr::new("--overlap"),
        OsStr::new("40"),
    ]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_generate_demo() {
    let temp = TempPath::new("wav");
    let output = run_analyzer([OsStr::new("--generate-demo"), temp.path().as_os_str()]);

    assert!(output.status.success());
    let reader = hound::WavReader::open(temp.path()).unwrap();
    assert_eq!(reader.spec().channels, 2);
    assert_eq!(reader.spec().sample_rate, 44100);
}
