//! Record types for the Harry Potter API and their display helpers.
//!
//! Payloads from the API are loosely typed: fields go missing or arrive
//! as `null`, and a few change shape between records. Every constructor
//! here is total; absent or mistyped fields get documented defaults and
//! unknown keys are ignored.

use serde_json::Value;

/// Fallback for textual fields that are absent from a payload.
pub const UNKNOWN: &str = "Unknown";

/// Fallback for spells that arrive without a description.
pub const NO_DESCRIPTION: &str = "No description available";

/// Extracts a string field, substituting `default` when the key is missing
/// or the value is not a string.
fn text_field(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or(default)
        .to_string()
}

/// The four Hogwarts houses served by the house endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum House {
    Gryffindor,
    Slytherin,
    Hufflepuff,
    Ravenclaw,
}

impl House {
    /// All houses, in the order the picker lists them.
    pub const ALL: [House; 4] = [
        House::Gryffindor,
        House::Slytherin,
        House::Hufflepuff,
        House::Ravenclaw,
    ];

    pub fn name(self) -> &'static str {
        match self {
            House::Gryffindor => "Gryffindor",
            House::Slytherin => "Slytherin",
            House::Hufflepuff => "Hufflepuff",
            House::Ravenclaw => "Ravenclaw",
        }
    }

    /// Path segment used by the house endpoint (lower-cased name).
    pub fn api_segment(self) -> String {
        self.name().to_lowercase()
    }
}

/// Wand details nested inside a character record. Sub-fields the payload
/// left absent or empty are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wand {
    pub wood: Option<String>,
    pub core: Option<String>,
    pub length: Option<String>,
}

impl Wand {
    /// Builds a wand from the `wand` object of a character payload. Length
    /// arrives as a number for most characters and as a string for a few,
    /// so both forms are accepted.
    pub fn from_value(value: &Value) -> Self {
        Self {
            wood: wand_part(value, "wood"),
            core: wand_part(value, "core"),
            length: wand_length(value),
        }
    }

    /// One-line descriptor: `<wood> wood, <core> core, <length> inches`,
    /// with the inches clause dropped when length is absent, or plain
    /// `Unknown` when no sub-field is populated at all.
    pub fn describe(&self) -> String {
        if self.wood.is_none() && self.core.is_none() && self.length.is_none() {
            return UNKNOWN.to_string();
        }
        let wood = self.wood.as_deref().unwrap_or(UNKNOWN);
        let core = self.core.as_deref().unwrap_or(UNKNOWN);
        match &self.length {
            Some(length) => format!("{} wood, {} core, {} inches", wood, core, length),
            None => format!("{} wood, {} core", wood, core),
        }
    }
}

fn wand_part(wand: &Value, key: &str) -> Option<String> {
    wand.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn wand_length(wand: &Value) -> Option<String> {
    match wand.get("length") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// A character record with every field defaulted, so display code never
/// meets a hole.
#[derive(Debug, Clone)]
pub struct Character {
    /// API identifier; empty for records that lack one.
    pub id: String,
    /// Display name; also the header line of the details pane.
    pub name: String,
    /// Aliases in payload order.
    pub alternate_names: Vec<String>,
    pub species: String,
    pub gender: String,
    pub house: String,
    pub date_of_birth: String,
    pub ancestry: String,
    pub eye_colour: String,
    pub hair_colour: String,
    pub wand: Wand,
    pub patronus: String,
    pub actor: String,
    /// Portrait URL; empty when the API has no image for the character.
    pub image: String,
    pub alive: bool,
}

impl Character {
    /// Constructs a character from one element of a characters payload.
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: text_field(value, "id", ""),
            name: text_field(value, "name", UNKNOWN),
            alternate_names: value
                .get("alternate_names")
                .and_then(|v| v.as_array())
                .map(|names| {
                    names
                        .iter()
                        .filter_map(|v| v.as_str())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            species: text_field(value, "species", UNKNOWN),
            gender: text_field(value, "gender", UNKNOWN),
            house: text_field(value, "house", UNKNOWN),
            date_of_birth: text_field(value, "dateOfBirth", UNKNOWN),
            ancestry: text_field(value, "ancestry", UNKNOWN),
            eye_colour: text_field(value, "eyeColour", UNKNOWN),
            hair_colour: text_field(value, "hairColour", UNKNOWN),
            wand: Wand::from_value(value.get("wand").unwrap_or(&Value::Null)),
            patronus: text_field(value, "patronus", UNKNOWN),
            actor: text_field(value, "actor", UNKNOWN),
            image: text_field(value, "image", ""),
            alive: value.get("alive").and_then(|v| v.as_bool()).unwrap_or(true),
        }
    }

    /// `None` when the character has no aliases, otherwise the aliases
    /// joined with `", "` in payload order.
    pub fn alternate_names_text(&self) -> String {
        if self.alternate_names.is_empty() {
            "None".to_string()
        } else {
            self.alternate_names.join(", ")
        }
    }

    pub fn status_text(&self) -> &'static str {
        if self.alive { "Alive" } else { "Deceased" }
    }
}

/// A spell record with defaulted fields.
#[derive(Debug, Clone)]
pub struct Spell {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Spell {
    /// Constructs a spell from one element of a spells payload.
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: text_field(value, "id", ""),
            name: text_field(value, "name", UNKNOWN),
            description: text_field(value, "description", NO_DESCRIPTION),
        }
    }
}

/// The uniformly-typed collection shown in the results list. The variant is
/// the kind tag: a completed fetch replaces both at once.
#[derive(Debug, Clone)]
pub enum ResultSet {
    Characters(Vec<Character>),
    Spells(Vec<Spell>),
}

impl ResultSet {
    pub fn len(&self) -> usize {
        match self {
            ResultSet::Characters(list) => list.len(),
            ResultSet::Spells(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name shown in the results list for the record at `index`.
    pub fn name_at(&self, index: usize) -> Option<&str> {
        match self {
            ResultSet::Characters(list) => list.get(index).map(|c| c.name.as_str()),
            ResultSet::Spells(list) => list.get(index).map(|s| s.name.as_str()),
        }
    }

    /// Plural noun for the status bar count ("characters" / "spells").
    pub fn kind_label(&self) -> &'static str {
        match self {
            ResultSet::Characters(_) => "characters",
            ResultSet::Spells(_) => "spells",
        }
    }
}
