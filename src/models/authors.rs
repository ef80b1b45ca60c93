use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// The raw `authors` value of a publication record.
///
/// Older data files contain author lists that were serialized one character
/// per element (`["C", "h", "e", "n", "", ...]`), so the field accepts any
/// YAML shape and leaves interpretation to
/// [`normalize_authors`](crate::utils::normalize_authors).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorsField {
    /// Comma-separated names, the normalized form
    Text(String),
    /// A list of names, or of single characters when corrupted
    List(Vec<Value>),
    /// Any other scalar or mapping
    Other(Value),
}

impl AuthorsField {
    /// Build a list-shaped field from plain strings.
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AuthorsField::List(items.into_iter().map(|s| Value::String(s.into())).collect())
    }

    /// The list elements rendered as text, or `None` when the field is not a list.
    pub fn items(&self) -> Option<Vec<String>> {
        match self {
            AuthorsField::List(values) => Some(values.iter().map(value_text).collect()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AuthorsField::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for AuthorsField {
    fn from(s: &str) -> Self {
        AuthorsField::Text(s.to_string())
    }
}

impl From<String> for AuthorsField {
    fn from(s: String) -> Self {
        AuthorsField::Text(s)
    }
}

/// Render a scalar YAML value as text. Null and nested structures become empty.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Tagged(tagged) => value_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => String::new(),
    }
}
