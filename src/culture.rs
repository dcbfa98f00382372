use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Locale symbols substituted for the separator tokens of a mask
/// (`.`, `,`, `:`, `/` and `$`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Culture {
    pub name: String,
    pub decimal_separator: String,
    pub group_separator: String,
    pub time_separator: String,
    pub date_separator: String,
    pub currency_symbol: String,
}

impl Culture {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::invariant()
        }
    }

    pub fn invariant() -> Self {
        Self {
            name: "invariant".to_string(),
            decimal_separator: ".".to_string(),
            group_separator: ",".to_string(),
            time_separator: ":".to_string(),
            date_separator: "/".to_string(),
            currency_symbol: "\u{a4}".to_string(),
        }
    }

    pub fn with_decimal_separator(mut self, symbol: impl Into<String>) -> Self {
        self.decimal_separator = symbol.into();
        self
    }

    pub fn with_group_separator(mut self, symbol: impl Into<String>) -> Self {
        self.group_separator = symbol.into();
        self
    }

    pub fn with_time_separator(mut self, symbol: impl Into<String>) -> Self {
        self.time_separator = symbol.into();
        self
    }

    pub fn with_date_separator(mut self, symbol: impl Into<String>) -> Self {
        self.date_separator = symbol.into();
        self
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Case-insensitive lookup in the built-in culture table.
    pub fn lookup(name: &str) -> Option<Culture> {
        let name = name.trim();
        registry()
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, culture)| culture.clone())
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        registry().keys().copied()
    }

    /// Symbol for a separator mask token, `None` for any other char.
    pub fn separator_for(&self, token: char) -> Option<&str> {
        match token {
            '.' => Some(self.decimal_separator.as_str()),
            ',' => Some(self.group_separator.as_str()),
            ':' => Some(self.time_separator.as_str()),
            '/' => Some(self.date_separator.as_str()),
            '$' => Some(self.currency_symbol.as_str()),
            _ => None,
        }
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}

fn registry() -> &'static IndexMap<&'static str, Culture> {
    static REGISTRY: OnceLock<IndexMap<&'static str, Culture>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map = IndexMap::new();
        map.insert("invariant", Culture::invariant());
        map.insert("en-US", Culture::new("en-US").with_currency_symbol("$"));
        map.insert("en-GB", Culture::new("en-GB").with_currency_symbol("\u{a3}"));
        map.insert(
            "de-DE",
            Culture::new("de-DE")
                .with_decimal_separator(",")
                .with_group_separator(".")
                .with_date_separator(".")
                .with_currency_symbol("\u{20ac}"),
        );
        map.insert(
            "fr-FR",
            Culture::new("fr-FR")
                .with_decimal_separator(",")
                .with_group_separator("\u{202f}")
                .with_currency_symbol("\u{20ac}"),
        );
        map.insert("ja-JP", Culture::new("ja-JP").with_currency_symbol("\u{ffe5}"));
        map
    })
}

#[cfg(test)]
mod tests {
    use super::Culture;

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let culture = Culture::lookup(" de-de ").expect("culture");
        assert_eq!(culture.name, "de-DE");
        assert_eq!(culture.decimal_separator, ",");
        assert_eq!(culture.date_separator, ".");
    }

    #[test]
    fn lookup_unknown_culture_is_none() {
        assert!(Culture::lookup("xx-YY").is_none());
    }

    #[test]
    fn names_keep_registration_order() {
        let names: Vec<&str> = Culture::names().collect();
        assert_eq!(names.first(), Some(&"invariant"));
        assert!(names.contains(&"ja-JP"));
    }

    #[test]
    fn separator_for_maps_tokens() {
        let culture = Culture::lookup("en-US").expect("culture");
        assert_eq!(culture.separator_for('$'), Some("$"));
        assert_eq!(culture.separator_for('/'), Some("/"));
        assert_eq!(culture.separator_for('x'), None);
    }
}
