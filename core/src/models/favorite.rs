use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A favorite as stored remotely. `id` and `created_at` are assigned by the
/// store and stay `None` until the record has been persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Favorite {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub category: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub note: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "flexible_timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Favorite {
    /// Creation time in the local time zone, or `None` before persistence
    pub fn display_timestamp(&self) -> Option<String> {
        self.created_at.map(|ts| {
            ts.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
    }

    pub fn has_note(&self) -> bool {
        !self.note.is_empty()
    }
}

/// The payload of an insert: exactly the three user-supplied fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewFavorite {
    pub name: String,
    pub category: String,
    pub note: String,
}

impl NewFavorite {
    pub fn new(name: impl Into<String>, category: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            note: note.into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts RFC 3339 with an offset, or an offset-less timestamp read as UTC
fn flexible_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}
