//! The candidate record returned by `/parse-resume`.
//!
//! The backend fills these from model output, so fields are frequently `null`,
//! missing, or numbers encoded as strings. Decoding here normalises all of that
//! once so nothing downstream has to guess.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::search::filter_valid_companies;

/// One parsed candidate. Treated as an immutable snapshot of a single
/// backend response; views (sorting, company filtering) are derived copies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Resume {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contact_number: String,
    /// Up to 3 entries, most recent first. `null` and `"null"` are kept here
    /// and filtered at display time.
    #[serde(default, deserialize_with = "null_as_empty_list")]
    pub last_3_companies: Vec<Option<String>>,
    #[serde(default, deserialize_with = "skill_list")]
    pub top_5_technical_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source_file: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub match_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub years_of_experience: Option<f64>,
    #[serde(default)]
    pub score_breakdown: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl Resume {
    /// Score used for ordering and banding; absent scores count as 0.
    pub fn score(&self) -> f64 {
        self.match_score.unwrap_or(0.0)
    }

    pub fn valid_companies(&self) -> Vec<String> {
        filter_valid_companies(&self.last_3_companies)
    }
}

pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_empty_list<'de, D>(deserializer: D) -> Result<Vec<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Option<String>>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Skills keep their order and case; `null` entries carry no information and are dropped.
fn skill_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Option<String>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw.into_iter().flatten().collect())
}

/// Accepts `12`, `12.5`, `"12"` or `" 12.5 "`; anything else decodes as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}
