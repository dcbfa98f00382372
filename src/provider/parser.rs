use super::model::{CaseConversion, CharDescriptor, CharKind};
use super::rules;
use crate::culture::Culture;
use crate::error::MaskError;

#[derive(Debug, Clone)]
pub(super) struct ParsedMask {
    pub buffer: Vec<char>,
    pub descriptors: Vec<CharDescriptor>,
    pub required_count: usize,
    pub optional_count: usize,
}

pub(super) fn parse_mask(
    mask: &str,
    culture: &Culture,
    prompt_char: char,
) -> Result<ParsedMask, MaskError> {
    if mask.is_empty() {
        return Err(MaskError::EmptyMask);
    }
    if let Some((index, ch)) = mask.chars().enumerate().find(|(_, ch)| !rules::is_printable(*ch)) {
        return Err(MaskError::InvalidMaskChar { index, ch });
    }

    let mut parsed = ParsedMask {
        buffer: Vec::with_capacity(mask.len()),
        descriptors: Vec::with_capacity(mask.len()),
        required_count: 0,
        optional_count: 0,
    };
    let mut case = CaseConversion::None;
    let mut escaped = false;

    for (mask_index, token) in mask.chars().enumerate() {
        if escaped {
            escaped = false;
            parsed.push(CharDescriptor::new(mask_index, token, CharKind::Literal), token);
            continue;
        }

        match token {
            '<' => case = CaseConversion::ToLower,
            '>' => case = CaseConversion::ToUpper,
            '|' => case = CaseConversion::None,
            '\\' => escaped = true,
            '0' | 'L' | '&' | 'A' => {
                let mut descriptor = CharDescriptor::new(mask_index, token, CharKind::EditRequired);
                descriptor.case = case;
                parsed.required_count += 1;
                parsed.push(descriptor, prompt_char);
            }
            '9' | '?' | '#' | 'C' | 'a' => {
                let mut descriptor = CharDescriptor::new(mask_index, token, CharKind::EditOptional);
                descriptor.case = case;
                parsed.optional_count += 1;
                parsed.push(descriptor, prompt_char);
            }
            _ => {
                if let Some(symbol) = culture.separator_for(token) {
                    let descriptor = CharDescriptor::new(mask_index, token, CharKind::Separator);
                    for ch in symbol.chars() {
                        parsed.push(descriptor, ch);
                    }
                } else {
                    parsed.push(CharDescriptor::new(mask_index, token, CharKind::Literal), token);
                }
            }
        }
    }

    Ok(parsed)
}

impl ParsedMask {
    fn push(&mut self, descriptor: CharDescriptor, ch: char) {
        self.descriptors.push(descriptor);
        self.buffer.push(ch);
    }
}
