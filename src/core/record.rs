//! Character records as returned by the remote collection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label shown for a record without a type
pub const MISSING_TYPE_LABEL: &str = "N/A";

/// A named reference to another resource (origin or last known location)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Place {
    pub name: String,
    pub url: String,
}

/// One character from the remote collection
///
/// Records are immutable once fetched. `status` and `gender` keep the raw
/// string sent by the source; use [`Record::status_kind`] and
/// [`Record::gender_kind`] for the typed view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier, primary key of the collection
    pub id: u64,

    pub name: String,

    /// `Alive`, `Dead` or `unknown` as sent by the source
    pub status: String,

    pub species: String,

    /// Sub-species or variant; the source sends an empty string when absent
    #[serde(
        rename = "type",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,

    pub gender: String,

    pub origin: Place,

    pub location: Place,

    /// Avatar image URL
    pub image: String,

    /// Episodes the character appears in, in source order
    #[serde(rename = "episode", default)]
    pub episode_urls: Vec<String>,

    /// Canonical resource URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Creation timestamp (RFC 3339)
    pub created: String,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

impl Record {
    /// The record type, or `"N/A"` when the source has none
    pub fn type_label(&self) -> &str {
        self.kind.as_deref().unwrap_or(MISSING_TYPE_LABEL)
    }

    /// Parse the `created` timestamp; `None` when the source sent garbage
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// First `limit` episode URLs, and whether any were left out
    pub fn episode_preview(&self, limit: usize) -> (&[String], bool) {
        let shown = limit.min(self.episode_urls.len());
        (&self.episode_urls[..shown], self.episode_urls.len() > shown)
    }

    pub fn status_kind(&self) -> Option<Status> {
        self.status.parse().ok()
    }

    pub fn gender_kind(&self) -> Option<Gender> {
        self.gender.parse().ok()
    }
}

/// Error returned when a status or gender string is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised {kind} value '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Life status of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Alive,
    Dead,
    Unknown,
}

/// Presentation tone attached to a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Warning,
    Neutral,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Alive => "alive",
            Status::Dead => "dead",
            Status::Unknown => "unknown",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Status::Alive => Tone::Positive,
            Status::Dead => Tone::Negative,
            Status::Unknown => Tone::Warning,
        }
    }
}

impl FromStr for Status {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alive" => Ok(Status::Alive),
            "dead" => Ok(Status::Dead),
            "unknown" => Ok(Status::Unknown),
            _ => Err(UnknownVariant {
                kind: "status",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Genderless,
    Unknown,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Genderless => "genderless",
            Gender::Unknown => "unknown",
        }
    }
}

impl FromStr for Gender {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "female" => Ok(Gender::Female),
            "male" => Ok(Gender::Male),
            "genderless" => Ok(Gender::Genderless),
            "unknown" => Ok(Gender::Unknown),
            _ => Err(UnknownVariant {
                kind: "gender",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rick_json() -> serde_json::Value {
        json!({
            "id": 1,
            "name": "Rick Sanchez",
            "status": "Alive",
            "species": "Human",
            "type": "",
            "gender": "Male",
            "origin": {"name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1"},
            "location": {"name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3"},
            "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg",
            "episode": [
                "https://rickandmortyapi.com/api/episode/1",
                "https://rickandmortyapi.com/api/episode/2",
                "https://rickandmortyapi.com/api/episode/3"
            ],
            "url": "https://rickandmortyapi.com/api/character/1",
            "created": "2017-11-04T18:48:46.250Z"
        })
    }

    #[test]
    fn test_deserialize_source_shape() {
        let record: Record = serde_json::from_value(rick_json()).unwrap();

        assert_eq!(record.id, 1);
        assert_eq!(record.name, "Rick Sanchez");
        assert_eq!(record.kind, None);
        assert_eq!(record.origin.name, "Earth (C-137)");
        assert_eq!(record.episode_urls.len(), 3);
    }

    #[test]
    fn test_type_label_falls_back_to_na() {
        let mut record: Record = serde_json::from_value(rick_json()).unwrap();
        assert_eq!(record.type_label(), "N/A");

        record.kind = Some("Parasite".to_string());
        assert_eq!(record.type_label(), "Parasite");
    }

    #[test]
    fn test_type_present_is_kept() {
        let mut value = rick_json();
        value["type"] = json!("Genetic experiment");
        let record: Record = serde_json::from_value(value).unwrap();
        assert_eq!(record.kind.as_deref(), Some("Genetic experiment"));
    }

    #[test]
    fn test_created_at_parses_timestamp() {
        let record: Record = serde_json::from_value(rick_json()).unwrap();
        let created = record.created_at().expect("timestamp should parse");
        assert_eq!(created.to_rfc3339(), "2017-11-04T18:48:46.250+00:00");
    }

    #[test]
    fn test_created_at_invalid_is_none() {
        let mut record: Record = serde_json::from_value(rick_json()).unwrap();
        record.created = "yesterday".to_string();
        assert!(record.created_at().is_none());
    }

    #[test]
    fn test_episode_preview_marks_elision() {
        let record: Record = serde_json::from_value(rick_json()).unwrap();

        let (shown, more) = record.episode_preview(2);
        assert_eq!(shown.len(), 2);
        assert!(more);

        let (shown, more) = record.episode_preview(5);
        assert_eq!(shown.len(), 3);
        assert!(!more);
    }

    #[test]
    fn test_status_and_gender_parse_case_insensitive() {
        assert_eq!("ALIVE".parse::<Status>().unwrap(), Status::Alive);
        assert_eq!("unknown".parse::<Status>().unwrap(), Status::Unknown);
        assert_eq!("Genderless".parse::<Gender>().unwrap(), Gender::Genderless);
        assert!("zombie".parse::<Status>().is_err());

        let record: Record = serde_json::from_value(rick_json()).unwrap();
        assert_eq!(record.status_kind(), Some(Status::Alive));
        assert_eq!(record.gender_kind(), Some(Gender::Male));
        assert_eq!(Status::Dead.tone(), Tone::Negative);
    }

    #[test]
    fn test_missing_required_field_fails() {
        let mut value = rick_json();
        value.as_object_mut().unwrap().remove("name");
        assert!(serde_json::from_value::<Record>(value).is_err());
    }
}
