/*!
 * Cue text normalization.
 *
 * Turns raw cue text into a single clean line: inline markup such as `<i>`
 * or `{\an8}` is removed, internal line breaks become spaces and the result
 * is trimmed. Joining of cleaned cues into a flat document also lives here.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// @const: HTML-style inline tags (<i>, </b>, <font color="...">)
static ANGLE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

// @const: ASS/SSA-style override blocks ({\an8}, {/i})
static BRACE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^}]+\}").unwrap());

// @const: Any line break form
static LINE_BREAK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r|\n").unwrap());

/// Strip markup from cue text and collapse it onto one line.
///
/// Tags are removed in one non-recursive pass per delimiter pair, then each
/// line break is replaced by a single space and surrounding whitespace is
/// trimmed. Markup-only text yields an empty string.
pub fn clean_markup(raw_text: &str) -> String {
    let without_angle = ANGLE_TAG_REGEX.replace_all(raw_text, "");
    let without_brace = BRACE_TAG_REGEX.replace_all(&without_angle, "");
    let single_line = LINE_BREAK_REGEX.replace_all(&without_brace, " ");

    single_line.trim().to_string()
}

/// Separator placed between cues in flat text output
pub fn segment_separator(segment_by_line: bool) -> &'static str {
    if segment_by_line { "\n" } else { " " }
}

/// Join cleaned cue texts, skipping empty ones
pub fn join_segments<I, S>(segments: I, segment_by_line: bool) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let separator = segment_separator(segment_by_line);
    let mut joined = String::new();

    for segment in segments {
        let segment = segment.as_ref();
        if segment.is_empty() {
            continue;
        }
        if !joined.is_empty() {
            joined.push_str(separator);
        }
        joined.push_str(segment);
    }

    joined
}
