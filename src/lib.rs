/*!
 * # srtconv - SRT subtitles to plain text
 *
 * A Rust library for turning SRT subtitle files into plain text, with
 * optional simplified to traditional Chinese conversion.
 *
 * ## Features
 *
 * - Parse SRT files, tolerating BOMs, CRLF line endings and non UTF-8 content
 * - Strip inline markup (`<i>`, `{\an8}`) and collapse cue line breaks
 * - One line per cue, or all cues joined into a single line
 * - Simplified to traditional conversion (generic, Taiwan, Hong Kong) via OpenCC
 * - Rewrite an SRT file with converted text, keeping indices, timings and markup
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: SRT parsing and serialization
 * - `text_normalizer`: Markup stripping and flat text joining
 * - `script_converter`: Script conversion capability
 * - `app_controller`: Conversion entry points
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod script_converter;
pub mod subtitle_processor;
pub mod text_normalizer;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{ConversionOptions, Controller};
pub use errors::{ConversionError, SubtitleError};
pub use script_converter::{ScriptCapability, ScriptConverter, TargetVariant};
pub use subtitle_processor::{SubtitleDocument, TimedBlock};
pub use text_normalizer::clean_markup;
