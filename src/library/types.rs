use serde::Deserialize;
use serde_json::Value;

/// One game record as the catalog API returns it, before validation.
/// Every field is kept as a raw JSON value; real exports contain strings,
/// numbers, negatives and nulls in places that should hold something else.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGameRecord {
    #[serde(default)]
    pub appid: Value,
    #[serde(default)]
    pub name: Value,
    /// Total minutes played
    #[serde(default)]
    pub playtime_forever: Value,
}

impl RawGameRecord {
    /// Pull the known fields out of any JSON value. A non-object gives an
    /// empty record, which ingestion skips for lack of an id.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };
        Self {
            appid: fields.remove("appid").unwrap_or_default(),
            name: fields.remove("name").unwrap_or_default(),
            playtime_forever: fields.remove("playtime_forever").unwrap_or_default(),
        }
    }
}

/// `{"response": {"game_count": n, "games": [...]}}`. Only `games` is read.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnedGamesResponse {
    pub response: OwnedGames,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnedGames {
    #[serde(default)]
    pub games: Value,
}

/// Accepted shapes of a library file.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LibraryDocument {
    Wrapped(OwnedGamesResponse),
    Bare(Vec<Value>),
}

impl LibraryDocument {
    pub fn into_records(self) -> Vec<RawGameRecord> {
        let values = match self {
            LibraryDocument::Wrapped(doc) => match doc.response.games {
                Value::Array(games) => games,
                _ => Vec::new(),
            },
            LibraryDocument::Bare(records) => records,
        };
        values.into_iter().map(RawGameRecord::from_value).collect()
    }
}

/// Counters collected while turning raw records into items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub records: usize,
    /// Records without a usable id
    pub skipped: usize,
    /// Negative or non-numeric playtimes clamped to one minute
    pub invalid_weights: usize,
    /// Records folded into an earlier record with the same id
    pub merged: usize,
    /// Items removed by the library filter
    pub filtered: usize,
    pub total_minutes: u64,
}
