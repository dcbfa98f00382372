mod edit;
mod format;
mod model;
mod navigate;
mod parser;
mod rebuild;
mod rules;

pub use model::{
    CaseConversion, CharDescriptor, CharKind, Direction, EditOutcome, FormatOptions, ResultHint,
};
pub use rebuild::{Migration, ProviderChange};

use crate::culture::Culture;
use crate::error::MaskError;
use crate::options::{DEFAULT_PASSWORD_CHAR, MaskOptions};

/// Fixed-length text buffer constrained by a mask.
///
/// Every edit is tested in full before anything is written, so a rejected
/// edit leaves the buffer and its counters untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedTextProvider {
    mask: String,
    options: MaskOptions,
    buffer: Vec<char>,
    descriptors: Vec<CharDescriptor>,
    required_count: usize,
    optional_count: usize,
    assigned_count: usize,
    assigned_required_count: usize,
}

impl MaskedTextProvider {
    pub fn new(mask: impl Into<String>) -> Result<Self, MaskError> {
        Self::with_options(mask, MaskOptions::default())
    }

    pub fn with_options(mask: impl Into<String>, options: MaskOptions) -> Result<Self, MaskError> {
        let mask = mask.into();
        let parsed = parser::parse_mask(mask.as_str(), &options.culture, options.prompt_char)?;

        if !rules::is_valid_input_char(options.prompt_char) {
            return Err(MaskError::InvalidPromptChar(options.prompt_char));
        }
        if let Some(password_char) = options.password_char {
            if !rules::is_valid_password_char(password_char) {
                return Err(MaskError::InvalidPasswordChar(password_char));
            }
            if password_char == options.prompt_char {
                return Err(MaskError::PromptPasswordConflict(password_char));
            }
        }

        Ok(Self {
            mask,
            options,
            buffer: parsed.buffer,
            descriptors: parsed.descriptors,
            required_count: parsed.required_count,
            optional_count: parsed.optional_count,
            assigned_count: 0,
            assigned_required_count: 0,
        })
    }

    pub fn is_valid_input_char(ch: char) -> bool {
        rules::is_valid_input_char(ch)
    }

    pub fn is_valid_mask_char(ch: char) -> bool {
        rules::is_printable(ch)
    }

    pub fn is_valid_password_char(ch: char) -> bool {
        rules::is_valid_password_char(ch)
    }

    pub fn mask(&self) -> &str {
        self.mask.as_str()
    }

    pub fn options(&self) -> &MaskOptions {
        &self.options
    }

    pub fn culture(&self) -> &Culture {
        &self.options.culture
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn prompt_char(&self) -> char {
        self.options.prompt_char
    }

    pub fn password_char(&self) -> Option<char> {
        self.options.password_char
    }

    pub fn is_password(&self) -> bool {
        self.options.password_char.is_some()
    }

    pub fn ascii_only(&self) -> bool {
        self.options.ascii_only
    }

    pub fn allow_prompt_as_input(&self) -> bool {
        self.options.allow_prompt_as_input
    }

    pub fn include_prompt(&self) -> bool {
        self.options.include_prompt
    }

    pub fn include_literals(&self) -> bool {
        self.options.include_literals
    }

    pub fn reset_on_prompt(&self) -> bool {
        self.options.reset_on_prompt
    }

    pub fn reset_on_space(&self) -> bool {
        self.options.reset_on_space
    }

    pub fn skip_literals(&self) -> bool {
        self.options.skip_literals
    }

    pub fn set_include_prompt(&mut self, include: bool) {
        self.options.include_prompt = include;
    }

    pub fn set_include_literals(&mut self, include: bool) {
        self.options.include_literals = include;
    }

    pub fn set_reset_on_prompt(&mut self, reset: bool) {
        self.options.reset_on_prompt = reset;
    }

    pub fn set_reset_on_space(&mut self, reset: bool) {
        self.options.reset_on_space = reset;
    }

    pub fn set_skip_literals(&mut self, skip: bool) {
        self.options.skip_literals = skip;
    }

    /// Only affects formatting, so no rebuild is needed.
    pub fn set_password_char(&mut self, password_char: Option<char>) -> Result<(), MaskError> {
        if let Some(ch) = password_char {
            if ch == self.options.prompt_char {
                return Err(MaskError::PromptPasswordConflict(ch));
            }
            if !rules::is_valid_password_char(ch) {
                return Err(MaskError::InvalidPasswordChar(ch));
            }
        }
        self.options.password_char = password_char;
        Ok(())
    }

    pub fn set_is_password(&mut self, is_password: bool) -> Result<(), MaskError> {
        if is_password == self.is_password() {
            return Ok(());
        }
        self.set_password_char(is_password.then_some(DEFAULT_PASSWORD_CHAR))
    }

    pub fn edit_position_count(&self) -> usize {
        self.required_count + self.optional_count
    }

    pub fn required_edit_position_count(&self) -> usize {
        self.required_count
    }

    pub fn assigned_edit_position_count(&self) -> usize {
        self.assigned_count
    }

    pub fn available_edit_position_count(&self) -> usize {
        self.edit_position_count() - self.assigned_count
    }

    /// All required positions hold input.
    pub fn mask_completed(&self) -> bool {
        self.assigned_required_count == self.required_count
    }

    /// Every edit position holds input.
    pub fn mask_full(&self) -> bool {
        self.assigned_count == self.edit_position_count()
    }

    pub fn edit_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.descriptors
            .iter()
            .enumerate()
            .filter(|(_, descriptor)| descriptor.is_edit())
            .map(|(position, _)| position)
    }

    pub fn char_at(&self, position: usize) -> Option<char> {
        self.buffer.get(position).copied()
    }

    pub fn descriptor(&self, position: usize) -> Option<CharDescriptor> {
        self.descriptors.get(position).copied()
    }

    pub fn is_edit_position(&self, position: usize) -> bool {
        self.descriptors
            .get(position)
            .is_some_and(CharDescriptor::is_edit)
    }

    pub fn is_available_position(&self, position: usize) -> bool {
        self.descriptors
            .get(position)
            .is_some_and(|descriptor| descriptor.is_edit() && !descriptor.assigned)
    }
}

#[cfg(test)]
mod tests {
    use super::MaskedTextProvider;
    use crate::error::MaskError;
    use crate::options::MaskOptions;

    #[test]
    fn counts_required_and_optional_positions() {
        let provider = MaskedTextProvider::new("(999) 000-0000").expect("provider");
        assert_eq!(provider.len(), 14);
        assert_eq!(provider.edit_position_count(), 10);
        assert_eq!(provider.required_edit_position_count(), 7);
        assert_eq!(provider.available_edit_position_count(), 10);
        assert!(!provider.mask_completed());
        assert!(!provider.mask_full());
    }

    #[test]
    fn optional_only_mask_is_complete_when_empty() {
        let provider = MaskedTextProvider::new("999").expect("provider");
        assert!(provider.mask_completed());
        assert!(!provider.mask_full());
    }

    #[test]
    fn edit_positions_skip_literals() {
        let provider = MaskedTextProvider::new("00-00").expect("provider");
        let positions: Vec<usize> = provider.edit_positions().collect();
        assert_eq!(positions, vec![0, 1, 3, 4]);
        assert!(provider.is_edit_position(3));
        assert!(!provider.is_edit_position(2));
        assert!(!provider.is_edit_position(9));
    }

    #[test]
    fn prompt_equal_to_password_is_rejected() {
        let options = MaskOptions::new()
            .with_prompt_char('*')
            .with_password_char(Some('*'));
        let err = MaskedTextProvider::with_options("000", options).expect_err("conflict");
        assert!(matches!(err, MaskError::PromptPasswordConflict('*')));
    }

    #[test]
    fn whitespace_prompt_other_than_space_is_rejected() {
        let options = MaskOptions::new().with_prompt_char('\n');
        let err = MaskedTextProvider::with_options("000", options).expect_err("prompt");
        assert!(matches!(err, MaskError::InvalidPromptChar('\n')));
    }

    #[test]
    fn set_password_char_checks_prompt() {
        let mut provider = MaskedTextProvider::new("000").expect("provider");
        assert!(provider.set_password_char(Some('_')).is_err());
        provider.set_is_password(true).expect("password");
        assert_eq!(provider.password_char(), Some('*'));
        provider.set_is_password(false).expect("password");
        assert!(!provider.is_password());
    }
}
