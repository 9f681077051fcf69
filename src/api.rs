//! Blocking HTTP layer for the Harry Potter API.

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::time::Duration;

use crate::model::{Character, House, ResultSet, Spell};

/// Root of every endpoint path.
pub const BASE_URL: &str = "https://hp-api.onrender.com/api";

/// Timeout applied to every request, list and image alike.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// The five list queries the API serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    AllCharacters,
    Students,
    Staff,
    House(House),
    Spells,
}

impl Query {
    /// Endpoint path relative to [`BASE_URL`].
    pub fn path(self) -> String {
        match self {
            Query::AllCharacters => "characters".to_string(),
            Query::Students => "characters/students".to_string(),
            Query::Staff => "characters/staff".to_string(),
            Query::House(house) => format!("characters/house/{}", house.api_segment()),
            Query::Spells => "spells".to_string(),
        }
    }

    /// Subject used when wrapping fetch errors.
    fn operation(self) -> &'static str {
        match self {
            Query::AllCharacters => "characters",
            Query::Students => "students",
            Query::Staff => "staff",
            Query::House(_) => "house characters",
            Query::Spells => "spells",
        }
    }

    /// Status line message while the fetch is in flight.
    pub fn loading_status(self) -> String {
        match self {
            Query::AllCharacters => "Loading all characters...".to_string(),
            Query::Students => "Loading students...".to_string(),
            Query::Staff => "Loading staff...".to_string(),
            Query::House(house) => format!("Loading {} members...", house.name()),
            Query::Spells => "Loading spells...".to_string(),
        }
    }

    /// Status line message once `count` records have arrived.
    pub fn loaded_status(self, count: usize) -> String {
        match self {
            Query::AllCharacters => format!("Loaded {} characters", count),
            Query::Students => format!("Loaded {} students", count),
            Query::Staff => format!("Loaded {} staff members", count),
            Query::House(house) => format!("Loaded {} {} members", count, house.name()),
            Query::Spells => format!("Loaded {} spells", count),
        }
    }

    /// Status line message when the fetch failed.
    pub fn failed_status(self) -> &'static str {
        match self {
            Query::AllCharacters => "Failed to load characters",
            Query::Students => "Failed to load students",
            Query::Staff => "Failed to load staff",
            Query::House(_) => "Failed to filter by house",
            Query::Spells => "Failed to load spells",
        }
    }
}

/// Blocking client over the public API. One instance lives for the whole
/// session; requests run on the UI thread and the loop waits for them.
pub struct HpApi {
    http: reqwest::blocking::Client,
}

impl HpApi {
    pub fn new() -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self { http })
    }

    pub fn all_characters(&self) -> Result<Vec<Character>> {
        self.character_list(Query::AllCharacters)
    }

    pub fn students(&self) -> Result<Vec<Character>> {
        self.character_list(Query::Students)
    }

    pub fn staff(&self) -> Result<Vec<Character>> {
        self.character_list(Query::Staff)
    }

    pub fn house_members(&self, house: House) -> Result<Vec<Character>> {
        self.character_list(Query::House(house))
    }

    pub fn spells(&self) -> Result<Vec<Spell>> {
        let values = self
            .fetch_array(&Query::Spells.path())
            .with_context(|| format!("Error fetching {}", Query::Spells.operation()))?;
        Ok(values.iter().map(Spell::from_value).collect())
    }

    /// Runs any query, tagging the records with their kind.
    pub fn fetch(&self, query: Query) -> Result<ResultSet> {
        match query {
            Query::AllCharacters => Ok(ResultSet::Characters(self.all_characters()?)),
            Query::Students => Ok(ResultSet::Characters(self.students()?)),
            Query::Staff => Ok(ResultSet::Characters(self.staff()?)),
            Query::House(house) => Ok(ResultSet::Characters(self.house_members(house)?)),
            Query::Spells => Ok(ResultSet::Spells(self.spells()?)),
        }
    }

    /// GETs raw image bytes for the portrait pipeline.
    pub fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.http.get(url).send()?;
        if !response.status().is_success() {
            bail!("failed to fetch {}: HTTP {}", url, response.status());
        }
        Ok(response.bytes()?.to_vec())
    }

    fn character_list(&self, query: Query) -> Result<Vec<Character>> {
        let values = self
            .fetch_array(&query.path())
            .with_context(|| format!("Error fetching {}", query.operation()))?;
        Ok(values.iter().map(Character::from_value).collect())
    }

    /// GETs a list endpoint and decodes the JSON array body. A non-success
    /// status or a non-array body is an error.
    fn fetch_array(&self, path: &str) -> Result<Vec<Value>> {
        let url = format!("{}/{}", BASE_URL, path);
        let response = self.http.get(&url).send()?;
        if !response.status().is_success() {
            bail!("failed to fetch {}: HTTP {}", url, response.status());
        }
        let text = response.text()?;
        let values: Vec<Value> =
            serde_json::from_str(&text).with_context(|| format!("failed to parse {}", url))?;
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_paths_match_the_api_layout() {
        assert_eq!(Query::AllCharacters.path(), "characters");
        assert_eq!(Query::Students.path(), "characters/students");
        assert_eq!(Query::Staff.path(), "characters/staff");
        assert_eq!(
            Query::House(House::Slytherin).path(),
            "characters/house/slytherin"
        );
        assert_eq!(Query::Spells.path(), "spells");
    }

    #[test]
    fn status_messages_follow_the_query() {
        assert_eq!(
            Query::AllCharacters.loading_status(),
            "Loading all characters..."
        );
        assert_eq!(Query::AllCharacters.loaded_status(25), "Loaded 25 characters");
        assert_eq!(Query::Staff.loaded_status(7), "Loaded 7 staff members");
        assert_eq!(
            Query::House(House::Gryffindor).loading_status(),
            "Loading Gryffindor members..."
        );
        assert_eq!(
            Query::House(House::Gryffindor).loaded_status(12),
            "Loaded 12 Gryffindor members"
        );
        assert_eq!(
            Query::House(House::Hufflepuff).failed_status(),
            "Failed to filter by house"
        );
        assert_eq!(Query::Spells.failed_status(), "Failed to load spells");
    }
}
