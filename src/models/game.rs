use serde::{Deserialize, Serialize};

/// Stable game identifier, assigned at load time
pub type GameId = u32;

/// A named category or mechanism
///
/// Equality is structural: two entries with the same name but different
/// descriptions are distinct characteristics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Data {
    #[serde(rename = "dataName")]
    pub name: String,
    #[serde(rename = "dataDescription", default)]
    pub description: String,
}

impl Data {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// The two independent facets compared by content-based filtering
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Characteristic {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Data>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mechanisms: Vec<Data>,
}

impl Characteristic {
    pub fn new(categories: Vec<Data>, mechanisms: Vec<Data>) -> Self {
        Self {
            categories,
            mechanisms,
        }
    }

    /// Both facets, in scoring order
    pub fn facets(&self) -> [&[Data]; 2] {
        [self.categories.as_slice(), self.mechanisms.as_slice()]
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.mechanisms.is_empty()
    }
}

/// Inclusive integer range, used for player count and play time
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Range {
    pub min: u32,
    pub max: u32,
}

impl Range {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        self.min <= value && value <= self.max
    }
}

/// A board game in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[serde(default)]
    pub id: GameId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub year_released: i32,
    #[serde(rename = "noPlayers", default)]
    pub player_range: Range,
    #[serde(rename = "playTime", default)]
    pub play_time_range: Range,
    #[serde(rename = "age", default)]
    pub min_age: u32,
    #[serde(default)]
    pub characteristic: Characteristic,
}

impl Game {
    /// Creates a game with only an id, name and characteristics set
    pub fn new(id: GameId, name: impl Into<String>, characteristic: Characteristic) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            year_released: 0,
            player_range: Range::default(),
            play_time_range: Range::default(),
            min_age: 0,
            characteristic,
        }
    }
}
