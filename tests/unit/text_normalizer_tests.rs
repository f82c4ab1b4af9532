/*!
 * Tests for markup stripping and flat text joining
 */

use srtconv::text_normalizer::{clean_markup, join_segments, segment_separator};

/// Test the basic cleaning example
#[test]
fn test_clean_markup_withTagsAndNewline_shouldReturnSingleCleanLine() {
    assert_eq!(clean_markup("<i>Hello\nWorld</i>"), "Hello World");
}

/// Test that no tag or line break survives
#[test]
fn test_clean_markup_withMixedMarkup_shouldLeaveNoTagsOrBreaks() {
    let inputs = [
        "<b>Bold</b> and {\\i1}italic{\\i0}",
        "{\\pos(10,20)}<font face=\"Arial\">Styled</font>\n\nline",
        "  \n<u>under</u>\r\n  ",
    ];

    for input in inputs {
        let cleaned = clean_markup(input);
        assert!(!cleaned.contains(['<', '>', '{', '}']), "tags left in {:?}", cleaned);
        assert!(!cleaned.contains(['\n', '\r']), "line break left in {:?}", cleaned);
        assert_eq!(cleaned, cleaned.trim());
    }
}

/// Test that tags are shortest spans and do not swallow text between them
#[test]
fn test_clean_markup_withAdjacentTags_shouldKeepTextBetween() {
    assert_eq!(clean_markup("<i>a</i> b <i>c</i>"), "a b c");
    assert_eq!(clean_markup("{x}keep{y}"), "keep");
}

/// Test markup-only cue text
#[test]
fn test_clean_markup_withMarkupAndWhitespaceOnly_shouldBeEmpty() {
    assert_eq!(clean_markup("{\\an8}   "), "");
    assert_eq!(clean_markup("<i>\n</i>"), "");
}

/// Test that Chinese text passes through untouched
#[test]
fn test_clean_markup_withChineseText_shouldOnlyRemoveMarkup() {
    assert_eq!(clean_markup("<i>简体</i>\n中文"), "简体 中文");
}

/// Test both joining modes
#[test]
fn test_join_segments_withLineMode_shouldUseNewlineOtherwiseSpace() {
    let segments = vec!["one".to_string(), "two".to_string(), "three".to_string()];

    assert_eq!(join_segments(&segments, true), "one\ntwo\nthree");
    assert_eq!(join_segments(&segments, false), "one two three");
    assert_eq!(segment_separator(true), "\n");
    assert_eq!(segment_separator(false), " ");
}

/// Test that empty segments never produce blank lines
#[test]
fn test_join_segments_withOnlyEmptySegments_shouldBeEmpty() {
    assert_eq!(join_segments(["", ""], true), "");
    assert_eq!(join_segments(["", "x", ""], true), "x");
}
