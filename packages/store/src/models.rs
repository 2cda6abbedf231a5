//! # Domain models for sessions and missions
//!
//! These are the records exchanged with the remote API and kept in local
//! storage. Field names on the wire are the French ones used by the API
//! (`prenom`, `titre`, `statut`, ...); the Rust names are English.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Session`] | The logged-in technician. Persisted verbatim under [`crate::SESSION_KEY`]. |
//! | [`Mission`] | A field service task assigned to the technician. Never persisted locally. |
//! | [`MissionStatus`] | The lifecycle position of a mission. Unknown wire values are kept as [`MissionStatus::Other`]. |

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identity of the logged-in technician.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    #[serde(rename = "prenom", default)]
    pub given_name: String,
    #[serde(rename = "nom", default)]
    pub family_name: String,
}

impl Session {
    pub fn new(
        email: impl Into<String>,
        given_name: impl Into<String>,
        family_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            given_name: given_name.into(),
            family_name: family_name.into(),
        }
    }

    /// "Prénom Nom", as shown in the header and in welcome notices.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

/// A mission as returned by `type=getmissions`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: i64,
    #[serde(rename = "titre", default, deserialize_with = "lenient_title")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(
        rename = "adresse",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(
        rename = "heure",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<String>,
    #[serde(
        rename = "statut",
        default,
        deserialize_with = "lenient_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<MissionStatus>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "telephone",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(
        rename = "priorite",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<String>,
}

impl Mission {
    /// A mission with only the required fields set.
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            client: None,
            address: None,
            date: None,
            time: None,
            status: None,
            description: None,
            phone: None,
            priority: None,
        }
    }

    pub fn with_status(mut self, status: MissionStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Mission text fields come from a spreadsheet-backed API: numbers and booleans
/// are shown as written, `null` and nested values as absent.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    })
}

fn lenient_title<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_status<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<MissionStatus>, D::Error> {
    Ok(lenient_text(deserializer)?.map(MissionStatus::from))
}

const FROM_PLANNED: &[MissionStatus] = &[MissionStatus::InProgress, MissionStatus::Cancelled];
const FROM_IN_PROGRESS: &[MissionStatus] = &[MissionStatus::Completed];

/// Lifecycle of a mission.
///
/// `Planned` may move to `InProgress` or `Cancelled`; `InProgress` may move to
/// `Completed`. The other states are terminal from the technician's side.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MissionStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
    Other(String),
}

impl MissionStatus {
    /// The value used by the API for `statut`.
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Planned => "planifiée",
            Self::InProgress => "en_cours",
            Self::Completed => "terminée",
            Self::Cancelled => "annulée",
            Self::Other(raw) => raw,
        }
    }

    /// Statuses a technician may move a mission to from this one.
    pub fn transitions(&self) -> &'static [MissionStatus] {
        match self {
            Self::Planned => FROM_PLANNED,
            Self::InProgress => FROM_IN_PROGRESS,
            _ => &[],
        }
    }
}

impl From<String> for MissionStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "planifiée" => Self::Planned,
            "en_cours" => Self::InProgress,
            "terminée" => Self::Completed,
            "annulée" => Self::Cancelled,
            _ => Self::Other(raw),
        }
    }
}

impl From<MissionStatus> for String {
    fn from(status: MissionStatus) -> Self {
        match status {
            MissionStatus::Other(raw) => raw,
            known => known.as_wire().to_string(),
        }
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}
