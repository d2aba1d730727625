extern crate std;

use crate::result;

// BART line colors as the ETD feed spells them.
pub const DEFAULT_COLORS: &[(&str, &str)] = &[
    ("RED", "RED"),
    ("ORANGE", "ORG"),
    ("YELLOW", "YLW"),
    ("GREEN", "GRN"),
    ("BLUE", "BLU"),
    ("WHITE", "WHT"),
    ("BEIGE", "OAK"),
];

/// Maps upstream line color names to the short codes shown on screen.
/// Names are matched case-insensitively.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTable {
    codes: std::collections::BTreeMap<String, String>,
    unknown_code: String,
}

impl ColorTable {
    pub fn new<I, K, V>(entries: I, unknown_code: &str) -> ColorTable
    where I: IntoIterator<Item = (K, V)>, K: AsRef<str>, V: AsRef<str> {
        let codes = entries.into_iter()
            .map(|(name, code)| (normalize(name.as_ref()), code.as_ref().to_string()))
            .collect();

        return ColorTable{
            codes: codes,
            unknown_code: unknown_code.to_string(),
        };
    }

    #[cfg(test)]
    pub fn bart_default() -> ColorTable {
        return ColorTable::new(DEFAULT_COLORS.iter().cloned(), "?");
    }

    pub fn lookup(&self, name: &str) -> result::BartDashResult<&str> {
        return self.codes.get(&normalize(name))
            .map(|code| code.as_str())
            .ok_or_else(|| result::BartDashError::UnknownColor(name.to_string()));
    }

    pub fn unknown_code(&self) -> &str {
        return &self.unknown_code;
    }
}

fn normalize(name: &str) -> String {
    return name.trim().to_uppercase();
}
