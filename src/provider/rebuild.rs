use super::MaskedTextProvider;
use super::model::ResultHint;
use crate::culture::Culture;
use crate::error::MaskError;
use tracing::debug;

/// A change to a property fixed at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderChange {
    Mask(String),
    Culture(Culture),
    PromptChar(char),
    AsciiOnly(bool),
    AllowPromptAsInput(bool),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Migration {
    pub migrated: usize,
    pub discarded: Vec<char>,
}

impl Migration {
    pub fn is_lossless(&self) -> bool {
        self.discarded.is_empty()
    }
}

impl MaskedTextProvider {
    /// Builds a replacement provider with `change` applied and replays the
    /// assigned input into it. `self` is left as it was.
    ///
    /// The n-th edit position of the old mask feeds the n-th edit position
    /// of the new one; characters with no destination or rejected by the new
    /// mask are discarded.
    pub fn rebuild(&self, change: ProviderChange) -> Result<(Self, Migration), MaskError> {
        let mut mask = self.mask.clone();
        let mut options = self.options.clone();
        match change {
            ProviderChange::Mask(next) => mask = next,
            ProviderChange::Culture(culture) => options.culture = culture,
            ProviderChange::PromptChar(prompt_char) => options.prompt_char = prompt_char,
            ProviderChange::AsciiOnly(ascii_only) => options.ascii_only = ascii_only,
            ProviderChange::AllowPromptAsInput(allow) => options.allow_prompt_as_input = allow,
        }

        let mut next = Self::with_options(mask, options)?;
        let targets: Vec<usize> = next.edit_positions().collect();
        let mut migration = Migration::default();

        for (ordinal, position) in self.edit_positions().enumerate() {
            if !self.descriptors[position].assigned {
                continue;
            }
            let ch = self.buffer[position];
            match targets.get(ordinal) {
                Some(&target) if next.test_char(ch, target) == ResultHint::Success => {
                    next.set_char(ch, target);
                    migration.migrated += 1;
                }
                _ => migration.discarded.push(ch),
            }
        }

        debug!(
            mask = %next.mask,
            migrated = migration.migrated,
            discarded = migration.discarded.len(),
            "provider rebuilt"
        );
        Ok((next, migration))
    }
}

#[cfg(test)]
mod tests {
    use super::{Migration, ProviderChange};
    use crate::culture::Culture;
    use crate::error::MaskError;
    use crate::options::MaskOptions;
    use crate::provider::MaskedTextProvider;
    use pretty_assertions::assert_eq;

    fn filled(mask: &str, input: &str) -> MaskedTextProvider {
        let mut provider = MaskedTextProvider::new(mask).expect("provider");
        assert!(provider.set(input).succeeded());
        provider
    }

    #[test]
    fn mask_change_keeps_fitting_input() {
        let provider = filled("00/00/0000", "12252024");
        let (next, migration) = provider
            .rebuild(ProviderChange::Mask("00-00-0000".to_string()))
            .expect("rebuild");

        assert_eq!(next.to_string(), "12-25-2024");
        assert_eq!(migration.migrated, 8);
        assert!(migration.is_lossless());
        assert_eq!(provider.to_string(), "12/25/2024");
    }

    #[test]
    fn shorter_mask_discards_overflow() {
        let provider = filled("000000", "123456");
        let (next, migration) = provider
            .rebuild(ProviderChange::Mask("0000".to_string()))
            .expect("rebuild");
        assert_eq!(next.to_string(), "1234");
        assert_eq!(
            migration,
            Migration {
                migrated: 4,
                discarded: vec!['5', '6'],
            }
        );
    }

    #[test]
    fn rejected_chars_are_discarded_in_place() {
        let provider = filled("&&&", "a1b");
        let (next, migration) = provider
            .rebuild(ProviderChange::Mask("LLL".to_string()))
            .expect("rebuild");
        assert_eq!(next.to_string(), "a_b");
        assert_eq!(migration.discarded, vec!['1']);
        assert_eq!(next.assigned_edit_position_count(), 2);
    }

    #[test]
    fn ascii_only_drops_non_ascii_input() {
        let provider = filled("LLL", "a\u{e9}c");
        let (next, migration) = provider
            .rebuild(ProviderChange::AsciiOnly(true))
            .expect("rebuild");
        assert!(next.ascii_only());
        assert_eq!(next.to_string(), "a_c");
        assert_eq!(migration.discarded, vec!['\u{e9}']);
    }

    #[test]
    fn prompt_change_redraws_unassigned_positions() {
        let provider = filled("00-00", "12");
        let (next, _) = provider
            .rebuild(ProviderChange::PromptChar('#'))
            .expect("rebuild");
        assert_eq!(next.to_string(), "12-##");
        assert_eq!(next.prompt_char(), '#');
    }

    #[test]
    fn prompt_change_conflicting_with_password_fails() {
        let options = MaskOptions::new().with_password_char(Some('*'));
        let provider = MaskedTextProvider::with_options("000", options).expect("provider");
        let err = provider
            .rebuild(ProviderChange::PromptChar('*'))
            .expect_err("conflict");
        assert!(matches!(err, MaskError::PromptPasswordConflict('*')));
    }

    #[test]
    fn culture_change_swaps_separators_and_keeps_flags() {
        let mut provider = filled("0.00", "314");
        provider.set_include_literals(false);
        let culture = Culture::lookup("de-DE").expect("culture");
        let (mut next, migration) = provider
            .rebuild(ProviderChange::Culture(culture))
            .expect("rebuild");
        assert_eq!(migration.migrated, 3);
        assert!(!next.include_literals());
        next.set_include_literals(true);
        assert_eq!(next.to_string(), "3,14");
    }

    #[test]
    fn invalid_mask_change_fails() {
        let provider = filled("000", "1");
        let err = provider
            .rebuild(ProviderChange::Mask(String::new()))
            .expect_err("empty mask");
        assert!(matches!(err, MaskError::EmptyMask));
    }
}
