use crate::error::MaskError;
use crate::options::MaskOptions;
use crate::provider::MaskedTextProvider;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A masked field definition as it appears in YAML or JSON config.
///
/// ```yaml
/// mask: "(999) 000-0000"
/// options:
///   culture: en-US
///   prompt_char: "_"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedField {
    pub mask: String,
    #[serde(default)]
    pub options: MaskOptions,
}

impl MaskedField {
    pub fn new(mask: impl Into<String>) -> Self {
        Self {
            mask: mask.into(),
            options: MaskOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MaskOptions) -> Self {
        self.options = options;
        self
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, MaskError> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> Result<Self, MaskError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Parses a mapping of field id to definition, keeping document order.
    pub fn from_yaml_list(input: &str) -> Result<IndexMap<String, Self>, MaskError> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn to_yaml_string(&self) -> Result<String, MaskError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn build(&self) -> Result<MaskedTextProvider, MaskError> {
        MaskedTextProvider::with_options(self.mask.clone(), self.options.clone())
    }
}
