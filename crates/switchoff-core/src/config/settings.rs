//! Flat property map consumed by the rule registry.

use crate::types::collections::FxHashMap;

/// String properties keyed by dotted names.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    properties: FxHashMap<String, String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Like [`Settings::get_string`], but blank values read as absent.
    pub fn get_non_blank(&self, key: &str) -> Option<&str> {
        self.get_string(key).filter(|v| !v.trim().is_empty())
    }

    /// Splits a comma-separated id list, skipping empty entries.
    pub fn get_ids(&self, key: &str) -> Vec<&str> {
        self.get_non_blank(key)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            properties: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_read_as_absent() {
        let mut settings = Settings::new();
        settings.set_property("a", "   ").set_property("b", "x");
        assert_eq!(settings.get_string("a"), Some("   "));
        assert_eq!(settings.get_non_blank("a"), None);
        assert_eq!(settings.get_non_blank("b"), Some("x"));
    }

    #[test]
    fn ids_are_split_and_trimmed() {
        let settings: Settings = [("ids", " 1, 2,,3 ")].into_iter().collect();
        assert_eq!(settings.get_ids("ids"), vec!["1", "2", "3"]);
        assert!(settings.get_ids("missing").is_empty());
    }
}
