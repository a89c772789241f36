//! Project metadata as served by the website-builder backend
//!
//! The backend wraps every lookup in an envelope:
//!
//! ```json
//! {
//!   "status": true,
//!   "result": {
//!     "company_name": "Acme Homes",
//!     "Theme": { "slug": "Housing", "name": "Housing" },
//!     "logo": "https://cdn.example.com/acme/logo.png"
//!   }
//! }
//! ```
//!
//! Every field except the envelope `status` is optional so that partially
//! configured projects still render. Display fields are read leniently: a
//! null, a number or any other unexpected JSON type never fails the lookup.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Response envelope of the project-by-slug lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEnvelope {
    /// Whether the lookup succeeded and the project is live
    #[serde(default, deserialize_with = "lenient_bool")]
    pub status: bool,

    /// Optional human-readable message from the backend
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Project payload (absent when `status` is false)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ProjectMetadata>,
}

impl ProjectEnvelope {
    /// Unwrap the envelope into live project metadata.
    ///
    /// Returns `None` when the envelope status is false, the payload is
    /// missing, or the project itself is flagged as disabled.
    pub fn into_live_project(self) -> Option<ProjectMetadata> {
        if !self.status {
            return None;
        }

        self.result.filter(|project| project.is_enabled())
    }
}

/// Theme assignment of a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeRef {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Social network profile links shown in theme footers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
}

impl SocialLinks {
    /// Configured links as `(network, url)` pairs, in display order
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Facebook", &self.facebook),
            ("Instagram", &self.instagram),
            ("Twitter", &self.twitter),
            ("LinkedIn", &self.linkedin),
            ("YouTube", &self.youtube),
        ]
        .into_iter()
        .filter_map(|(network, url)| {
            url.as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(|u| (network, u))
        })
        .collect()
    }
}

/// Tenant project metadata.
///
/// Owned by the backend; SiteGate only ever reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    #[serde(default, deserialize_with = "lenient_text")]
    pub company_name: String,

    /// Assigned theme (`Theme` in the backend payload)
    #[serde(
        default,
        rename = "Theme",
        deserialize_with = "lenient_theme",
        skip_serializing_if = "Option::is_none"
    )]
    pub theme: Option<ThemeRef>,

    /// Per-project enabled flag; absent means enabled
    #[serde(default, deserialize_with = "lenient_flag", skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub meta_keywords: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(flatten)]
    pub social: SocialLinks,
}

impl ProjectMetadata {
    /// Theme reference as assigned in the backend: the theme slug, or its
    /// name when no slug is set. Blank values count as absent.
    pub fn theme_reference(&self) -> Option<&str> {
        let theme = self.theme.as_ref()?;
        [theme.slug.as_deref(), theme.name.as_deref()]
            .into_iter()
            .flatten()
            .find(|value| !value.trim().is_empty())
    }

    /// Check if the project is enabled
    pub fn is_enabled(&self) -> bool {
        self.status.unwrap_or(true)
    }

    /// Title used for the document `<title>`
    pub fn display_title(&self) -> &str {
        self.meta_title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.company_name)
    }
}

/// Scalar as text: strings as-is, numbers printed, anything else (null,
/// booleans, arrays, objects) treated as absent
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Truthiness of a backend flag: booleans, `0`/`1` style numbers and the
/// strings `"true"`, `"false"`, `"1"` and `"0"`
fn scalar_flag(value: Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_flag(Value::deserialize(deserializer)?))
}

/// Theme assignment given either as an object or as a bare slug
fn lenient_theme<'de, D>(deserializer: D) -> Result<Option<ThemeRef>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => ThemeRef::deserialize(Value::Object(map)).ok(),
        other => scalar_text(other).map(|slug| ThemeRef {
            slug: Some(slug),
            name: None,
        }),
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_flag(deserializer)?.unwrap_or(false))
}
