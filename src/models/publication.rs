use serde::de::Error as _;
use serde::ser::{Error as _, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::{Mapping, Value};

use super::authors::AuthorsField;

/// Publication type as rendered by the site templates. Values this crate
/// does not know (`thesis`, `patent`, ...) are kept as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationType {
    Journal,
    Conference,
    Preprint,
    #[serde(untagged)]
    Other(Value),
}

impl PublicationType {
    /// Guess the type from a venue name. Anything unrecognised is a journal.
    pub fn from_venue(venue: &str) -> Self {
        let venue_lower = venue.to_lowercase();
        if ["conference", "proceedings", "workshop"]
            .iter()
            .any(|word| venue_lower.contains(word))
        {
            PublicationType::Conference
        } else if ["arxiv", "preprint"].iter().any(|word| venue_lower.contains(word)) {
            PublicationType::Preprint
        } else {
            PublicationType::Journal
        }
    }
}

/// A `year` value. Anything other than a plain integer (`'2023'`,
/// `In press`) is kept verbatim so a rewrite does not lose it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(i32),
    Other(Value),
}

impl Year {
    /// The year as a number, when it reads as one.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Year::Number(n) => Some(*n),
            Year::Other(Value::String(s)) => s.trim().parse().ok(),
            Year::Other(_) => None,
        }
    }
}

impl From<i32> for Year {
    fn from(year: i32) -> Self {
        Year::Number(year)
    }
}

/// Named links of a publication. Unknown link names (`code`, `project`, ...)
/// are kept in `other` in their original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arxiv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(flatten)]
    pub other: Mapping,
}

impl Links {
    pub fn pdf(&self) -> Option<&str> {
        non_blank(self.pdf.as_deref())
    }

    pub fn arxiv(&self) -> Option<&str> {
        non_blank(self.arxiv.as_deref())
    }

    pub fn doi(&self) -> Option<&str> {
        non_blank(self.doi.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.pdf().is_none() && self.arxiv().is_none() && self.doi().is_none() && self.other.is_empty()
    }
}

/// One entry of the `publications` list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicationRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<AuthorsField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Year>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub pub_type: Option<PublicationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    /// Keys the site templates use that this crate does not interpret
    #[serde(flatten)]
    pub extra: Mapping,
    /// Key order the record was read with
    #[serde(skip)]
    pub key_order: KeyOrder,
}

impl PublicationRecord {
    /// The year as a number, if it has one.
    pub fn year(&self) -> Option<i32> {
        self.year.as_ref().and_then(Year::as_i32)
    }

    /// The venue, if present and not blank.
    pub fn venue(&self) -> Option<&str> {
        non_blank(self.venue.as_deref())
    }

    /// Title shortened for log lines.
    pub fn short_title(&self) -> String {
        let mut short: String = self.title.chars().take(50).collect();
        if self.title.chars().count() > 50 {
            short.push_str("...");
        }
        short
    }

    /// Serialize with keys in the order they were read; new keys go last.
    fn to_ordered_value(&self) -> Result<Value, serde_yaml::Error> {
        let value = serde_yaml::to_value(self)?;
        let Value::Mapping(mut fields) = value else {
            return Ok(value);
        };
        if let Some(Value::Mapping(links)) = fields.get_mut("links") {
            *links = reorder(std::mem::take(links), &self.key_order.links);
        }
        Ok(Value::Mapping(reorder(fields, &self.key_order.record)))
    }
}

/// Source key order of a record and of its `links`. Layout only, so it
/// never affects equality.
#[derive(Debug, Clone, Default)]
pub struct KeyOrder {
    record: Vec<Value>,
    links: Vec<Value>,
}

impl KeyOrder {
    fn of(map: &Mapping) -> Self {
        let links = match map.get("links") {
            Some(Value::Mapping(links)) => links.keys().cloned().collect(),
            _ => Vec::new(),
        };
        Self {
            record: map.keys().cloned().collect(),
            links,
        }
    }
}

impl PartialEq for KeyOrder {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

fn reorder(mut fields: Mapping, order: &[Value]) -> Mapping {
    let mut ordered = Mapping::with_capacity(fields.len());
    for key in order {
        if let Some(value) = fields.shift_remove(key) {
            ordered.insert(key.clone(), value);
        }
    }
    ordered.extend(fields);
    ordered
}

/// The whole data file: a `publications` list plus any other top-level keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicationFile {
    #[serde(
        default,
        deserialize_with = "deserialize_records",
        serialize_with = "serialize_records"
    )]
    pub publications: Vec<PublicationRecord>,
    #[serde(flatten)]
    pub extra: Mapping,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Read records remembering their key order; `publications: null` is empty.
fn deserialize_records<'de, D>(deserializer: D) -> Result<Vec<PublicationRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let list: Option<Vec<Mapping>> = Option::deserialize(deserializer)?;
    list.unwrap_or_default()
        .into_iter()
        .map(|map| {
            let key_order = KeyOrder::of(&map);
            let record: PublicationRecord =
                serde_yaml::from_value(Value::Mapping(map)).map_err(D::Error::custom)?;
            Ok(PublicationRecord { key_order, ..record })
        })
        .collect()
}

fn serialize_records<S>(records: &[PublicationRecord], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut seq = serializer.serialize_seq(Some(records.len()))?;
    for record in records {
        seq.serialize_element(&record.to_ordered_value().map_err(S::Error::custom)?)?;
    }
    seq.end()
}
