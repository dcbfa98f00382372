use super::MaskedTextProvider;
use super::model::{Direction, FormatOptions};
use std::fmt;
use unicode_width::UnicodeWidthChar;

const SPACE: char = ' ';

impl MaskedTextProvider {
    /// Renders `len` buffer positions starting at `start`.
    pub fn format_range(&self, options: FormatOptions, start: usize, len: usize) -> String {
        if len == 0 || start >= self.len() {
            return String::new();
        }
        let mut last = start + len.min(self.len() - start) - 1;
        let masking = self.is_password() && !options.ignore_password;

        if !masking && options.include_prompt && options.include_literals {
            return self.buffer[start..=last].iter().collect();
        }

        if !options.include_prompt {
            let last_literal = if options.include_literals {
                self.find_non_edit_position_in_range(start, last, Direction::Backward)
            } else {
                None
            };
            let last_assigned = self.find_assigned_edit_position_in_range(
                last_literal.unwrap_or(start),
                last,
                Direction::Backward,
            );
            match last_assigned.or(last_literal) {
                Some(position) => last = position,
                None => return String::new(),
            }
        }

        let mut out = String::with_capacity(last + 1 - start);
        for position in start..=last {
            let descriptor = self.descriptors[position];
            let ch = self.buffer[position];
            if !descriptor.is_edit() {
                if options.include_literals {
                    out.push(ch);
                }
            } else if descriptor.assigned {
                match self.options.password_char {
                    Some(password_char) if masking => out.push(password_char),
                    _ => out.push(ch),
                }
            } else if options.include_prompt {
                out.push(ch);
            } else {
                out.push(SPACE);
            }
        }
        out
    }

    pub fn format_with(&self, options: FormatOptions) -> String {
        self.format_range(options, 0, self.len())
    }

    pub fn format_parts(&self, include_prompt: bool, include_literals: bool) -> String {
        self.format_with(FormatOptions {
            ignore_password: true,
            include_prompt,
            include_literals,
        })
    }

    /// Text as a control shows it: prompts, literals and password masking.
    pub fn display_text(&self) -> String {
        self.format_with(FormatOptions {
            ignore_password: false,
            include_prompt: true,
            include_literals: true,
        })
    }

    /// Terminal column of buffer position `position` in `display_text`.
    pub fn display_column(&self, position: usize) -> usize {
        let masking = self.options.password_char.filter(|_| self.assigned_count > 0);
        self.buffer
            .iter()
            .zip(self.descriptors.iter())
            .take(position)
            .map(|(&ch, descriptor)| match masking {
                Some(password_char) if descriptor.assigned => password_char,
                _ => ch,
            })
            .map(|ch| ch.width().unwrap_or(0))
            .sum()
    }
}

impl fmt::Display for MaskedTextProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(
            self.format_with(FormatOptions {
                ignore_password: true,
                include_prompt: self.options.include_prompt,
                include_literals: self.options.include_literals,
            })
            .as_str(),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::culture::Culture;
    use crate::options::MaskOptions;
    use crate::provider::{FormatOptions, MaskedTextProvider};
    use pretty_assertions::assert_eq;

    fn filled(mask: &str, input: &str) -> MaskedTextProvider {
        let mut provider = MaskedTextProvider::new(mask).expect("provider");
        assert!(provider.set(input).succeeded());
        provider
    }

    #[test]
    fn excluding_prompt_keeps_trailing_literals() {
        let provider = MaskedTextProvider::new("(999) 000-0000").expect("provider");
        assert_eq!(provider.format_parts(false, true), "(   )    -");
        assert_eq!(provider.format_parts(false, false), "");
        assert_eq!(provider.format_parts(true, false), "__________");
    }

    #[test]
    fn excluding_prompt_stops_after_last_assigned() {
        let provider = filled("(999) 000-0000", "415555");
        assert_eq!(provider.format_parts(false, true), "(415) 555-");
        assert_eq!(provider.format_parts(false, false), "415555");

        let provider = filled("(999) 000-0000", "4155550");
        assert_eq!(provider.format_parts(false, true), "(415) 555-0");
    }

    #[test]
    fn excluding_prompt_blanks_inner_gaps() {
        let provider = filled("000000", "1__4");
        assert_eq!(provider.format_parts(false, false), "1  4");
        assert_eq!(provider.format_parts(true, true), "1__4__");
    }

    #[test]
    fn display_follows_include_flags() {
        let mut provider = filled("00-00", "12");
        assert_eq!(provider.to_string(), "12-__");
        provider.set_include_literals(false);
        assert_eq!(provider.to_string(), "12__");
        provider.set_include_prompt(false);
        assert_eq!(provider.to_string(), "12");
    }

    #[test]
    fn password_masks_assigned_positions_only() {
        let options = MaskOptions::new().with_password_char(Some('*'));
        let mut provider = MaskedTextProvider::with_options("00-00", options).expect("provider");
        provider.set("123");

        assert_eq!(provider.display_text(), "**-*_");
        assert_eq!(provider.to_string(), "12-3_");

        let masked = FormatOptions {
            ignore_password: false,
            ..FormatOptions::default()
        };
        assert_eq!(provider.format_with(masked), "**-*_");
    }

    #[test]
    fn range_is_clamped() {
        let provider = filled("00-00", "1234");
        let options = FormatOptions::default();
        assert_eq!(provider.format_range(options, 1, 3), "2-3");
        assert_eq!(provider.format_range(options, 3, 100), "34");
        assert_eq!(provider.format_range(options, 5, 1), "");
        assert_eq!(provider.format_range(options, 0, 0), "");
    }

    #[test]
    fn range_without_prompt_or_literals() {
        let provider = filled("00-00", "1");
        let options = FormatOptions {
            ignore_password: true,
            include_prompt: false,
            include_literals: false,
        };
        assert_eq!(provider.format_range(options, 0, 5), "1");
        assert_eq!(provider.format_range(options, 1, 4), "");
    }

    #[test]
    fn set_then_format_round_trips_accepted_chars() {
        let provider = filled("LL-000", "ab123");
        let edits: String = provider
            .edit_positions()
            .filter_map(|position| provider.char_at(position))
            .collect();
        assert_eq!(edits, "ab123");
        assert_eq!(provider.format_parts(true, true), "ab-123");
    }

    #[test]
    fn display_column_counts_wide_symbols() {
        let culture = Culture::lookup("ja-JP").expect("culture");
        let options = MaskOptions::new().with_culture(culture);
        let provider = MaskedTextProvider::with_options("$000", options).expect("provider");
        assert_eq!(provider.display_text(), "\u{ffe5}___");
        assert_eq!(provider.display_column(0), 0);
        assert_eq!(provider.display_column(1), 2);
        assert_eq!(provider.display_column(3), 4);
    }
}
