//! Form field responses and merging
//!
//! Callers declare responses for the printed fields of a government form
//! (name, value, type). Merging normalizes names to lower case so that a
//! later fuzzy match between a document's printed label and a declared field
//! tolerates case variation, and drops entries that carry no instructional
//! value.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The kind of response a printed form field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Free text
    Text,
    /// A calendar date
    Date,
    /// A signature line
    Signature,
    /// A circled Yes/No answer
    YesNo,
    /// A checkbox
    Checkbox,
    /// A numeric value
    Number,
}

impl FieldType {
    /// Wire name of the type, as spoken by the browser form
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Date => "date",
            FieldType::Signature => "signature",
            FieldType::YesNo => "yesno",
            FieldType::Checkbox => "checkbox",
            FieldType::Number => "number",
        }
    }
}

impl FromStr for FieldType {
    type Err = std::convert::Infallible;

    /// Unknown type names fall back to `Text`; callers send free-form
    /// strings and a wrong guess should not reject the whole request.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "date" => FieldType::Date,
            "signature" => FieldType::Signature,
            "yesno" => FieldType::YesNo,
            "checkbox" => FieldType::Checkbox,
            "number" => FieldType::Number,
            _ => FieldType::Text,
        })
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user-declared response for a printed form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldResponse {
    /// The field label as printed on the form (original casing preserved)
    pub name: String,
    /// The response to fill in
    pub value: String,
    /// What kind of response the field expects
    pub field_type: FieldType,
}

impl FormFieldResponse {
    /// Create a new response
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        field_type: FieldType,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            field_type,
        }
    }
}

/// Merge declared responses into a map keyed by lower-cased field name.
///
/// - Duplicate normalized names: the last-supplied value wins. The merger
///   enforces determinism, not correctness of the caller's data.
/// - Entries with an empty name or empty value are dropped; "fill this
///   blank with nothing" must never reach the rendered prompt.
pub fn merge_fields<I>(responses: I) -> BTreeMap<String, FormFieldResponse>
where
    I: IntoIterator<Item = FormFieldResponse>,
{
    let mut merged = BTreeMap::new();
    for response in responses {
        if response.name.is_empty() || response.value.is_empty() {
            continue;
        }
        merged.insert(response.name.to_lowercase(), response);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, value: &str) -> FormFieldResponse {
        FormFieldResponse::new(name, value, FieldType::Text)
    }

    #[test]
    fn test_keys_are_lowercased_and_original_name_kept() {
        let merged = merge_fields(vec![field("Date:", "2025-06-01")]);
        let entry = merged.get("date:").unwrap();
        assert_eq!(entry.name, "Date:");
        assert_eq!(entry.value, "2025-06-01");
    }

    #[test]
    fn test_last_write_wins_for_duplicate_normalized_names() {
        let merged = merge_fields(vec![field("Date", "A"), field("date", "B")]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get("date").unwrap().value, "B");
    }

    #[test]
    fn test_empty_name_or_value_is_dropped() {
        let merged = merge_fields(vec![
            field("", "orphan value"),
            field("Title:", ""),
            field("Signature:", "J. Doe"),
        ]);
        assert_eq!(merged.len(), 1);
        assert!(merged.contains_key("signature:"));
    }

    #[test]
    fn test_distinct_names_commute_under_insertion_order() {
        let forward = merge_fields(vec![field("Alpha", "1"), field("Beta", "2")]);
        let reverse = merge_fields(vec![field("Beta", "2"), field("Alpha", "1")]);
        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_unknown_field_type_falls_back_to_text() {
        assert_eq!("mystery".parse::<FieldType>().unwrap(), FieldType::Text);
        assert_eq!("yesno".parse::<FieldType>().unwrap(), FieldType::YesNo);
    }
}
