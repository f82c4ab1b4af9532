/*!
 * Simplified to traditional Chinese script conversion.
 *
 * The conversion dictionaries are loaded once at startup into a
 * [`ScriptCapability`]. The capability is either present or absent and is
 * handed to the controller explicitly, so callers can be tested without the
 * dictionaries by injecting their own [`ScriptConverter`].
 */

use std::fmt;
use std::str::FromStr;
use anyhow::{anyhow, Result};
use ferrous_opencc::{config::BuiltinConfig, OpenCC};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Target script variant of the conversion
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TargetVariant {
    /// Generic traditional characters
    Traditional,
    /// Taiwan standard characters
    Taiwan,
    /// Taiwan standard characters with Taiwanese vocabulary
    #[default]
    TaiwanPhrases,
    /// Hong Kong standard characters
    HongKong,
}

impl TargetVariant {
    // @returns: Lowercase identifier used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Traditional => "traditional",
            Self::Taiwan => "taiwan",
            Self::TaiwanPhrases => "taiwan-phrases",
            Self::HongKong => "hong-kong",
        }
    }

    fn builtin_config(&self) -> BuiltinConfig {
        match self {
            Self::Traditional => BuiltinConfig::S2t,
            Self::Taiwan => BuiltinConfig::S2tw,
            Self::TaiwanPhrases => BuiltinConfig::S2twp,
            Self::HongKong => BuiltinConfig::S2hk,
        }
    }
}

impl fmt::Display for TargetVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TargetVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "traditional" | "s2t" => Ok(Self::Traditional),
            "taiwan" | "s2tw" => Ok(Self::Taiwan),
            "taiwan-phrases" | "s2twp" | "zh-tw" => Ok(Self::TaiwanPhrases),
            "hong-kong" | "s2hk" | "zh-hk" => Ok(Self::HongKong),
            _ => Err(anyhow!("Invalid target variant: {}", s)),
        }
    }
}

/// Maps text from simplified script to a traditional variant
pub trait ScriptConverter: Send + Sync {
    /// Convert every mapped character or phrase, passing the rest through
    fn convert(&self, text: &str) -> String;

    /// Variant this converter produces
    fn target(&self) -> TargetVariant;
}

/// OpenCC dictionary based converter
pub struct OpenCcConverter {
    inner: OpenCC,
    target: TargetVariant,
}

impl OpenCcConverter {
    /// Load the builtin dictionaries for `target`
    pub fn load(target: TargetVariant) -> Result<Self> {
        let inner = OpenCC::from_config(target.builtin_config())
            .map_err(|e| anyhow!("Failed to load {} conversion dictionaries: {}", target, e))?;
        Ok(Self { inner, target })
    }
}

impl ScriptConverter for OpenCcConverter {
    fn convert(&self, text: &str) -> String {
        self.inner.convert(text)
    }

    fn target(&self) -> TargetVariant {
        self.target
    }
}

/// Availability of script conversion, resolved once per process
pub struct ScriptCapability {
    converter: Option<Box<dyn ScriptConverter>>,
}

impl ScriptCapability {
    /// Load the OpenCC dictionaries; a load failure leaves the capability absent
    pub fn load(target: TargetVariant) -> Self {
        match OpenCcConverter::load(target) {
            Ok(converter) => {
                debug!("Script conversion available ({})", target);
                Self::with_converter(Box::new(converter))
            }
            Err(e) => {
                warn!("{}; script conversion disabled", e);
                Self::unavailable()
            }
        }
    }

    /// Capability backed by the given converter
    pub fn with_converter(converter: Box<dyn ScriptConverter>) -> Self {
        Self { converter: Some(converter) }
    }

    /// Capability with no converter
    pub fn unavailable() -> Self {
        Self { converter: None }
    }

    pub fn is_available(&self) -> bool {
        self.converter.is_some()
    }

    /// The converter, if conversion is available
    pub fn converter(&self) -> Option<&dyn ScriptConverter> {
        self.converter.as_deref()
    }
}

impl fmt::Debug for ScriptCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.converter() {
            Some(converter) => write!(f, "ScriptCapability({})", converter.target()),
            None => write!(f, "ScriptCapability(unavailable)"),
        }
    }
}
