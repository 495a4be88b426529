//! Flat upstream records.

use std::collections::HashMap;

/// One element of an upstream answer: its tag and its attributes.
///
/// Records are opaque to the provider. Interpreting the fields is the
/// mapper's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    tag: String,
    fields: HashMap<String, String>,
}

impl Record {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            fields: HashMap::new(),
        }
    }

    /// Add a field, replacing any previous value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_looked_up_by_name() {
        let record = Record::new("StopLocation")
            .with_field("id", "8600626")
            .with_field("name", "København H");

        assert_eq!(record.tag(), "StopLocation");
        assert_eq!(record.get("id"), Some("8600626"));
        assert_eq!(record.get("name"), Some("København H"));
        assert_eq!(record.get("x"), None);
    }

    #[test]
    fn later_field_wins() {
        let record = Record::new("Departure")
            .with_field("time", "10:11")
            .with_field("time", "10:12");
        assert_eq!(record.get("time"), Some("10:12"));
    }
}
