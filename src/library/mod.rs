pub mod aggregate;
pub mod types;

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use self::types::{IngestStats, LibraryDocument, RawGameRecord};
use crate::layout::Item;

/// Which games make it into the collage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryFilter {
    /// Keep games with zero minutes played
    pub include_unplayed: bool,
    /// Minimum playtime in minutes
    pub min_weight: u64,
    /// Keep only the N most played games
    pub max_items: Option<usize>,
}

impl Default for LibraryFilter {
    fn default() -> Self {
        Self {
            include_unplayed: true,
            min_weight: 0,
            max_items: None,
        }
    }
}

/// A validated, deduplicated game list ready for layout.
#[derive(Debug, Clone, Default)]
pub struct Library {
    pub items: Vec<Item>,
    pub stats: IngestStats,
}

/// Read a library export (owned-games response or bare record array).
pub fn load_library(path: &Path, filter: &LibraryFilter) -> Result<Library> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read library file {}", path.display()))?;
    parse_library(&text, filter)
        .with_context(|| format!("Failed to parse library file {}", path.display()))
}

pub fn parse_library(json: &str, filter: &LibraryFilter) -> Result<Library> {
    let document: LibraryDocument =
        serde_json::from_str(json).context("Library JSON is neither an owned-games response nor a record array")?;
    Ok(build_library(document.into_records(), filter))
}

/// Turn raw records into items. Never fails: unusable ids are skipped and
/// bad playtimes are clamped.
pub fn build_library(records: Vec<RawGameRecord>, filter: &LibraryFilter) -> Library {
    let mut stats = IngestStats {
        records: records.len(),
        ..IngestStats::default()
    };

    let mut items = Vec::with_capacity(records.len());
    for record in &records {
        let Some(id) = parse_id(&record.appid) else {
            tracing::debug!("Skipping record without a usable id: {:?}", record.appid);
            stats.skipped += 1;
            continue;
        };

        let weight = match normalize_weight(&record.playtime_forever) {
            Ok(weight) => weight,
            Err(clamped) => {
                tracing::debug!(
                    "Game {} has invalid playtime {}, using {} minute",
                    id,
                    record.playtime_forever,
                    clamped
                );
                stats.invalid_weights += 1;
                clamped
            }
        };

        let name = parse_name(&record.name).unwrap_or_else(|| format!("App {}", id));
        items.push(Item::new(id, &name, weight));
    }

    let (items, merged) = aggregate::merge_duplicates(items);
    stats.merged = merged;

    let before = items.len();
    let items = aggregate::apply_filter(items, filter);
    stats.filtered = before - items.len();
    stats.total_minutes = items.iter().fold(0u64, |acc, i| acc.saturating_add(i.weight));

    tracing::info!(
        "Library ready: {} games from {} records ({} merged, {} filtered, {} skipped, {} clamped)",
        items.len(),
        stats.records,
        stats.merged,
        stats.filtered,
        stats.skipped,
        stats.invalid_weights
    );

    Library { items, stats }
}

fn parse_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Display name. Numeric names are kept as written; blanks and anything
/// else fall back to the caller's default.
fn parse_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Playtime in whole minutes. Missing playtime is zero; negative or
/// non-numeric playtime is `Err(1)`, the smallest valid weight.
pub fn normalize_weight(value: &Value) -> std::result::Result<u64, u64> {
    const CLAMPED: u64 = 1;

    let minutes = match value {
        Value::Null => return Ok(0),
        Value::Number(n) => match n.as_u64() {
            Some(m) => return Ok(m),
            None => n.as_f64(),
        },
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match minutes {
        Some(m) if m.is_finite() && m >= 0.0 => Ok(m.floor() as u64),
        _ => Err(CLAMPED),
    }
}
