/*!
 * Integration tests for the conversion workflow
 */

use std::fs;
use std::process::Command;
use anyhow::Result;
use srtconv::{clean_markup, ConversionOptions, SubtitleDocument};
use crate::common::{self, MockConverter};

/// Test the two-cue example end to end
#[test]
fn test_flat_text_workflow_withTwoCues_shouldReturnCleanLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "two.srt",
        "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:03,000 --> 00:00:04,000\n<i>World</i>\n",
    )?;

    let options = ConversionOptions { segment_by_line: true, convert_script: false, output_name: None };
    let text = common::controller_without_conversion().produce_flat_text(&input, &options)?;

    assert_eq!(text, "Hello\nWorld");

    Ok(())
}

/// Test that converting the subtitle then flattening equals flattening with conversion
#[test]
fn test_converted_subtitle_then_flat_text_shouldMatchDirectConversion() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "zh.srt", common::SIMPLIFIED_CUES)?;
    let controller = common::controller_with_mock();

    let converted_srt = controller.produce_converted_subtitle(&input, true)?;
    let plain = ConversionOptions { segment_by_line: true, ..ConversionOptions::default() };
    let via_subtitle = controller.produce_flat_text(&converted_srt, &plain)?;

    let converting = ConversionOptions { convert_script: true, ..plain.clone() };
    let direct = controller.produce_flat_text(&input, &converting)?;

    assert_eq!(via_subtitle, direct);

    // The same holds cue by cue against the cleaned original
    let original = SubtitleDocument::parse(&fs::read(&input)?)?;
    let converted = SubtitleDocument::parse(&fs::read(&converted_srt)?)?;
    for (before, after) in original.blocks.iter().zip(&converted.blocks) {
        assert_eq!(before.index, after.index);
        assert_eq!((before.start_ms, before.end_ms), (after.start_ms, after.end_ms));
        assert_eq!(clean_markup(&after.text), MockConverter::map_text(&clean_markup(&before.text)));
    }

    Ok(())
}

/// Test that writing a text file twice produces the same content
#[test]
fn test_text_file_workflow_withRepeatedRuns_shouldOverwriteWithSameContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let controller = common::controller_without_conversion();
    let options = ConversionOptions { segment_by_line: true, ..ConversionOptions::default() };

    let first = controller.produce_text_file(&input, &options)?;
    let first_content = fs::read_to_string(&first)?;
    let second = controller.produce_text_file(&input, &options)?;

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second)?, first_content);
    assert_eq!(common::list_files(temp_dir.path())?, vec!["movie.srt".to_string(), "movie.txt".to_string()]);

    Ok(())
}

/// Test the command line in line mode with an explicit output
#[test]
fn test_cli_withLineFlagAndOutput_shouldWriteOneLinePerCue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let output = temp_dir.path().join("transcript.txt");

    let status = Command::new(env!("CARGO_BIN_EXE_srtconv"))
        .arg("-l")
        .arg("-o")
        .arg(&output)
        .arg(&input)
        .status()?;

    assert!(status.success());
    assert_eq!(fs::read_to_string(&output)?.lines().count(), 3);

    Ok(())
}

/// Test the command line default output joins cues with spaces
#[test]
fn test_cli_withoutLineFlag_shouldWriteSingleLineNextToInput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;

    let status = Command::new(env!("CARGO_BIN_EXE_srtconv")).arg(&input).status()?;

    assert!(status.success());
    let content = fs::read_to_string(temp_dir.path().join("movie.txt"))?;
    assert_eq!(content, "This is a test subtitle. It contains multiple entries. For testing purposes.");

    Ok(())
}

/// Test the command line fails without writing for a missing input
#[test]
fn test_cli_withMissingInput_shouldFailWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("missing.srt");

    let output = Command::new(env!("CARGO_BIN_EXE_srtconv")).arg(&missing).output()?;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
    assert!(common::list_files(temp_dir.path())?.is_empty());

    Ok(())
}

/// Test printing to stdout
#[test]
fn test_cli_withPrintFlag_shouldPrintTextAndWriteNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;

    let output = Command::new(env!("CARGO_BIN_EXE_srtconv"))
        .args(["-l", "-p"])
        .arg(&input)
        .output()?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "This is a test subtitle.\nIt contains multiple entries.\nFor testing purposes.\n"
    );
    assert_eq!(common::list_files(temp_dir.path())?, vec!["movie.srt".to_string()]);

    Ok(())
}

/// Test a successful run reports the written file exactly once
#[test]
fn test_cli_withSuccessfulRun_shouldReportOutputOnce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;

    let output = Command::new(env!("CARGO_BIN_EXE_srtconv")).arg(&input).output()?;

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("movie.txt").count(), 1);
    assert!(stderr.contains("Success"));

    Ok(())
}
