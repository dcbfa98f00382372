//! Masked text editing: a fixed-length buffer constrained by a mask such as
//! `(999) 000-0000`, with insert/remove/replace operations that report a
//! [`ResultHint`] and caret position instead of failing.

pub mod config;
pub mod culture;
pub mod error;
pub mod options;
pub mod provider;

pub use config::MaskedField;
pub use culture::Culture;
pub use error::MaskError;
pub use options::MaskOptions;
pub use provider::{
    CaseConversion, CharDescriptor, CharKind, Direction, EditOutcome, FormatOptions,
    MaskedTextProvider, Migration, ProviderChange, ResultHint,
};
