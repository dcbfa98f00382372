use crate::culture::Culture;
use crate::error::MaskError;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_PROMPT_CHAR: char = '_';
pub const DEFAULT_PASSWORD_CHAR: char = '*';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskOptions {
    #[serde(deserialize_with = "deserialize_culture")]
    pub culture: Culture,
    pub prompt_char: char,
    pub password_char: Option<char>,
    pub ascii_only: bool,
    pub allow_prompt_as_input: bool,
    pub include_prompt: bool,
    pub include_literals: bool,
    pub reset_on_prompt: bool,
    pub reset_on_space: bool,
    pub skip_literals: bool,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            culture: Culture::default(),
            prompt_char: DEFAULT_PROMPT_CHAR,
            password_char: None,
            ascii_only: false,
            allow_prompt_as_input: true,
            include_prompt: true,
            include_literals: true,
            reset_on_prompt: true,
            reset_on_space: true,
            skip_literals: true,
        }
    }
}

impl MaskOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_culture(mut self, culture: Culture) -> Self {
        self.culture = culture;
        self
    }

    pub fn with_culture_name(self, name: &str) -> Result<Self, MaskError> {
        let culture =
            Culture::lookup(name).ok_or_else(|| MaskError::UnknownCulture(name.to_string()))?;
        Ok(self.with_culture(culture))
    }

    pub fn with_prompt_char(mut self, prompt_char: char) -> Self {
        self.prompt_char = prompt_char;
        self
    }

    pub fn with_password_char(mut self, password_char: Option<char>) -> Self {
        self.password_char = password_char;
        self
    }

    pub fn with_ascii_only(mut self, ascii_only: bool) -> Self {
        self.ascii_only = ascii_only;
        self
    }

    pub fn with_allow_prompt_as_input(mut self, allow: bool) -> Self {
        self.allow_prompt_as_input = allow;
        self
    }

    pub fn with_include_prompt(mut self, include: bool) -> Self {
        self.include_prompt = include;
        self
    }

    pub fn with_include_literals(mut self, include: bool) -> Self {
        self.include_literals = include;
        self
    }

    pub fn with_reset_on_prompt(mut self, reset: bool) -> Self {
        self.reset_on_prompt = reset;
        self
    }

    pub fn with_reset_on_space(mut self, reset: bool) -> Self {
        self.reset_on_space = reset;
        self
    }

    pub fn with_skip_literals(mut self, skip: bool) -> Self {
        self.skip_literals = skip;
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CultureRef {
    Name(String),
    Inline(Culture),
}

fn deserialize_culture<'de, D>(deserializer: D) -> Result<Culture, D::Error>
where
    D: Deserializer<'de>,
{
    match CultureRef::deserialize(deserializer)? {
        CultureRef::Name(name) => Culture::lookup(name.as_str())
            .ok_or_else(|| serde::de::Error::custom(format!("unknown culture `{name}`"))),
        CultureRef::Inline(culture) => Ok(culture),
    }
}
