//! Fencer - attendee identity and balancing attributes

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Stable fencer identifier supplied by the caller
pub type FencerId = u32;

/// Attribute used as a balancing criteria
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttributeKey {
    Club,
    Country,
    League,
    Team,
    /// Any other attribute, looked up by name
    Custom(String),
}

impl AttributeKey {
    pub fn as_str(&self) -> &str {
        match self {
            AttributeKey::Club => "club",
            AttributeKey::Country => "country",
            AttributeKey::League => "league",
            AttributeKey::Team => "team",
            AttributeKey::Custom(name) => name,
        }
    }
}

impl From<String> for AttributeKey {
    fn from(name: String) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "club" => AttributeKey::Club,
            "country" | "nation" => AttributeKey::Country,
            "league" | "region" => AttributeKey::League,
            "team" => AttributeKey::Team,
            _ => AttributeKey::Custom(name.trim().to_string()),
        }
    }
}

impl From<AttributeKey> for String {
    fn from(key: AttributeKey) -> Self {
        key.as_str().to_string()
    }
}

impl FromStr for AttributeKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AttributeKey::from(s.to_string()))
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a fencer attribute
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(i64),
    Text(String),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Number(n) => write!(f, "{}", n),
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

/// Capability required from anything the dispatcher places into pools
pub trait Attendee {
    fn id(&self) -> FencerId;

    fn name(&self) -> &str;

    /// Seeding rank at the start of the stage (1 = best)
    fn stage_start_rank(&self) -> u32;

    /// Value of a balancing attribute, `None` when the fencer has none
    fn attribute(&self, key: &AttributeKey) -> Option<AttributeValue>;
}

/// Checked-in fencer as read from a roster file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fencer {
    pub id: FencerId,
    pub name: String,
    pub stage_start_rank: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Fencer {
    pub fn new(id: FencerId, name: impl Into<String>, stage_start_rank: u32) -> Self {
        Self {
            id,
            name: name.into(),
            stage_start_rank,
            club: None,
            country: None,
            league: None,
            team: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_club(mut self, club: impl Into<String>) -> Self {
        self.club = Some(club.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }
}

fn text_value(value: &Option<String>) -> Option<AttributeValue> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| AttributeValue::Text(s.to_string()))
}

impl Attendee for Fencer {
    fn id(&self) -> FencerId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn stage_start_rank(&self) -> u32 {
        self.stage_start_rank
    }

    fn attribute(&self, key: &AttributeKey) -> Option<AttributeValue> {
        match key {
            AttributeKey::Club => text_value(&self.club),
            AttributeKey::Country => text_value(&self.country),
            AttributeKey::League => text_value(&self.league),
            AttributeKey::Team => text_value(&self.team),
            AttributeKey::Custom(name) => self.attributes.get(name).cloned(),
        }
    }
}

/// Load a roster (JSON array of fencers)
pub fn load_roster(path: &Path) -> anyhow::Result<Vec<Fencer>> {
    let content = std::fs::read_to_string(path)?;
    let fencers: Vec<Fencer> = serde_json::from_str(&content)?;
    Ok(fencers)
}
