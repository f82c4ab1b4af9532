use log::debug;
use std::path::{Path, PathBuf};
use crate::app_config::{Config, ConversionConfig};
use crate::errors::ConversionError;
use crate::file_utils::FileManager;
use crate::script_converter::{ScriptCapability, ScriptConverter};
use crate::subtitle_processor::SubtitleDocument;
use crate::text_normalizer;

// @module: Conversion entry points wiring reader, normalizer, converter and writer

/// Options of a single conversion request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionOptions {
    /// One line per cue; otherwise cues are joined by single spaces
    pub segment_by_line: bool,

    /// Apply script conversion to every non-empty cleaned cue
    pub convert_script: bool,

    /// Base name of the text file written next to the input
    pub output_name: Option<String>,
}

impl ConversionOptions {
    /// Options seeded from configuration defaults
    pub fn from_config(config: &ConversionConfig) -> Self {
        Self {
            segment_by_line: config.segment_by_line,
            convert_script: config.convert_script,
            output_name: None,
        }
    }

    // @returns: Requested output name, ignoring blank input
    fn output_name(&self) -> Option<&str> {
        self.output_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Main application controller for subtitle conversion
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Script conversion, resolved once at startup
    capability: ScriptCapability,
}

impl Controller {
    // @method: Create a new controller with the given configuration and conversion capability
    pub fn with_config(config: Config, capability: ScriptCapability) -> Self {
        Self { config, capability }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn capability(&self) -> &ScriptCapability {
        &self.capability
    }

    /// Produce the flat text of a subtitle file without writing anything
    pub fn produce_flat_text<P: AsRef<Path>>(
        &self,
        input_file: P,
        options: &ConversionOptions,
    ) -> Result<String, ConversionError> {
        let input_file = input_file.as_ref();
        Self::ensure_input_exists(input_file)?;

        let converter = if options.convert_script {
            Some(self.require_converter()?)
        } else {
            None
        };

        let document = Self::read_document(input_file)?;

        let segments = document.blocks.iter().map(|block| {
            let cleaned = text_normalizer::clean_markup(&block.text);
            match converter {
                Some(converter) if !cleaned.is_empty() => converter.convert(&cleaned),
                _ => cleaned,
            }
        });

        let text = text_normalizer::join_segments(segments, options.segment_by_line);
        debug!("Produced {} chars of flat text from {} cues", text.len(), document.len());

        Ok(text)
    }

    /// Produce the flat text and write it next to the input file
    pub fn produce_text_file<P: AsRef<Path>>(
        &self,
        input_file: P,
        options: &ConversionOptions,
    ) -> Result<PathBuf, ConversionError> {
        let input_file = input_file.as_ref();
        let text = self.produce_flat_text(input_file, options)?;

        let output_path = self.text_output_path(input_file, options);
        Self::write_output(&output_path, text.as_bytes())?;

        debug!("Text file written: {}", output_path.display());
        Ok(output_path)
    }

    /// Produce the flat text and write it to a caller-chosen destination
    pub fn save_flat_text<P1: AsRef<Path>, P2: AsRef<Path>>(
        &self,
        input_file: P1,
        options: &ConversionOptions,
        destination: P2,
    ) -> Result<PathBuf, ConversionError> {
        let text = self.produce_flat_text(input_file, options)?;

        let destination = destination.as_ref().to_path_buf();
        Self::write_output(&destination, text.as_bytes())?;

        debug!("Text file written: {}", destination.display());
        Ok(destination)
    }

    /// Convert the script of every cue and write a sibling subtitle file.
    ///
    /// Markup is kept: the whole cue text, tags included, goes through the
    /// converter, and indices and timings are written back unchanged.
    pub fn produce_converted_subtitle<P: AsRef<Path>>(
        &self,
        input_file: P,
        convert_script: bool,
    ) -> Result<PathBuf, ConversionError> {
        let input_file = input_file.as_ref();
        Self::ensure_input_exists(input_file)?;

        if !convert_script {
            return Err(ConversionError::Precondition("conversion not requested".to_string()));
        }
        let converter = self.require_converter()?;

        let mut document = Self::read_document(input_file)?;
        for block in document.blocks.iter_mut() {
            block.text = converter.convert(&block.text);
        }

        let output_path = self.converted_subtitle_path(input_file);
        Self::write_output(&output_path, &document.to_bytes())?;

        debug!("Converted subtitle written: {}", output_path.display());
        Ok(output_path)
    }

    /// Where `produce_text_file` writes for the given input and options
    pub fn text_output_path<P: AsRef<Path>>(&self, input_file: P, options: &ConversionOptions) -> PathBuf {
        let extension = &self.config.output.text_extension;
        match options.output_name() {
            Some(name) => FileManager::named_output_path(input_file, name, extension),
            None => FileManager::replace_extension(input_file, extension),
        }
    }

    /// Where `produce_converted_subtitle` writes for the given input
    pub fn converted_subtitle_path<P: AsRef<Path>>(&self, input_file: P) -> PathBuf {
        FileManager::suffixed_sibling_path(input_file, &self.config.output.converted_suffix)
    }

    fn ensure_input_exists(input_file: &Path) -> Result<(), ConversionError> {
        if !FileManager::file_exists(input_file) {
            return Err(ConversionError::NotFound(input_file.to_path_buf()));
        }
        Ok(())
    }

    fn require_converter(&self) -> Result<&dyn ScriptConverter, ConversionError> {
        self.capability
            .converter()
            .ok_or(ConversionError::ConversionUnavailable)
    }

    fn read_document(input_file: &Path) -> Result<SubtitleDocument, ConversionError> {
        let bytes = FileManager::read_bytes(input_file).map_err(|source| ConversionError::Read {
            path: input_file.to_path_buf(),
            source,
        })?;

        let document = SubtitleDocument::parse(&bytes)?;
        debug!("Read {} cues from {}", document.len(), input_file.display());
        Ok(document)
    }

    fn write_output(output_path: &Path, content: &[u8]) -> Result<(), ConversionError> {
        FileManager::write_atomic(output_path, content).map_err(|source| ConversionError::Write {
            path: output_path.to_path_buf(),
            source,
        })
    }
}
