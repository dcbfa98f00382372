use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaskError {
    #[error("mask must not be empty")]
    EmptyMask,

    #[error("mask contains non-printable character {ch:?} at index {index}")]
    InvalidMaskChar { index: usize, ch: char },

    #[error("prompt character {0:?} is not a valid input character")]
    InvalidPromptChar(char),

    #[error("password character {0:?} is not a valid input character")]
    InvalidPasswordChar(char),

    #[error("prompt and password characters must differ (both {0:?})")]
    PromptPasswordConflict(char),

    #[error("unknown culture `{0}`")]
    UnknownCulture(String),

    #[error("invalid yaml config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid json config: {0}")]
    Json(#[from] serde_json::Error),
}
