use super::MaskedTextProvider;
use super::model::{CharKind, Direction, EditOutcome, ResultHint};

const SPACE: char = ' ';

pub(super) fn is_printable(ch: char) -> bool {
    !ch.is_control() && (ch == SPACE || !ch.is_whitespace())
}

pub(super) fn is_valid_input_char(ch: char) -> bool {
    is_printable(ch)
}

pub(super) fn is_valid_password_char(ch: char) -> bool {
    is_valid_input_char(ch)
}

fn token_accepts(token: char, ch: char, ascii_only: bool) -> ResultHint {
    let ascii_rejected =
        |accepts_ascii: fn(&char) -> bool| ascii_only && ch != SPACE && !accepts_ascii(&ch);

    match token {
        '0' if !ch.is_ascii_digit() => ResultHint::DigitExpected,
        '9' if !(ch.is_ascii_digit() || ch == SPACE) => ResultHint::DigitExpected,
        '#' if !(ch.is_ascii_digit() || matches!(ch, SPACE | '+' | '-')) => {
            ResultHint::DigitExpected
        }
        'L' if !ch.is_alphabetic() => ResultHint::LetterExpected,
        'L' if ascii_only && !ch.is_ascii_alphabetic() => ResultHint::AsciiCharacterExpected,
        '?' if !(ch.is_alphabetic() || ch == SPACE) => ResultHint::LetterExpected,
        '?' if ascii_rejected(char::is_ascii_alphabetic) => ResultHint::AsciiCharacterExpected,
        '&' if ascii_only && !ch.is_ascii_graphic() => ResultHint::AsciiCharacterExpected,
        'C' if ascii_rejected(char::is_ascii_graphic) => ResultHint::AsciiCharacterExpected,
        'A' if !ch.is_alphanumeric() => ResultHint::AlphanumericCharacterExpected,
        'A' if ascii_only && !ch.is_ascii_alphanumeric() => ResultHint::AsciiCharacterExpected,
        'a' if !(ch.is_alphanumeric() || ch == SPACE) => {
            ResultHint::AlphanumericCharacterExpected
        }
        'a' if ascii_rejected(char::is_ascii_alphanumeric) => ResultHint::AsciiCharacterExpected,
        _ => ResultHint::Success,
    }
}

impl MaskedTextProvider {
    /// Classifies `ch` at `position` without changing anything.
    pub(super) fn test_char(&self, ch: char, position: usize) -> ResultHint {
        if !is_printable(ch) {
            return ResultHint::InvalidInput;
        }

        let descriptor = self.descriptors[position];
        if matches!(descriptor.kind, CharKind::Literal | CharKind::Separator) {
            if self.options.skip_literals && ch == self.buffer[position] {
                return ResultHint::CharacterEscaped;
            }
            return ResultHint::NonEditPosition;
        }

        if ch == self.options.prompt_char {
            if self.options.reset_on_prompt {
                return reset_hint(descriptor.assigned);
            }
            if !self.options.allow_prompt_as_input {
                return ResultHint::PromptCharNotAllowed;
            }
        }

        if ch == SPACE && self.options.reset_on_space {
            return reset_hint(descriptor.assigned);
        }

        let hint = token_accepts(descriptor.token, ch, self.options.ascii_only);
        if !hint.is_success() {
            return hint;
        }

        if descriptor.assigned && ch == self.buffer[position] {
            ResultHint::NoEffect
        } else {
            ResultHint::Success
        }
    }

    /// Whether `ch` is consumed at `position` without being written: a
    /// skipped literal, or a prompt/space that resets an edit position.
    pub(super) fn test_escape_char(&self, ch: char, position: usize) -> bool {
        let descriptor = self.descriptors[position];
        if !descriptor.is_edit() {
            return self.options.skip_literals && ch == self.buffer[position];
        }
        (self.options.reset_on_prompt && ch == self.options.prompt_char)
            || (self.options.reset_on_space && ch == SPACE)
    }

    /// Tests `input` laid out from `position`. On success the outcome carries
    /// the strongest hint and the last position consumed.
    pub(super) fn test_string(
        &self,
        input: &[char],
        position: usize,
    ) -> Result<EditOutcome, EditOutcome> {
        let len = self.len();
        if input.is_empty() {
            return Ok(EditOutcome::new(ResultHint::NoEffect, position));
        }

        let mut hint = ResultHint::Unknown;
        let mut test_position = position;
        for &ch in input {
            if test_position >= len {
                return Err(EditOutcome::new(ResultHint::UnavailableEditPosition, len));
            }
            if !self.test_escape_char(ch, test_position) {
                let Some(next) = self.find_edit_position_from(test_position, Direction::Forward) else {
                    return Err(EditOutcome::new(ResultHint::UnavailableEditPosition, len));
                };
                test_position = next;
            }

            let char_hint = self.test_char(ch, test_position);
            if !char_hint.is_success() {
                return Err(EditOutcome::new(char_hint, test_position));
            }
            hint = hint.max(char_hint);
            test_position += 1;
        }

        Ok(EditOutcome::new(hint, test_position - 1))
    }
}

fn reset_hint(assigned: bool) -> ResultHint {
    if assigned {
        ResultHint::SideEffect
    } else {
        ResultHint::CharacterEscaped
    }
}
