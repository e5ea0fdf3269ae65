//! On-disk layout of a region configuration.
//!
//! ```json
//! { "regions": { "Total": { "coords": [10.0, 20.0, 110.0, 40.0] } },
//!   "order": ["Total"] }
//! ```

use super::{StorageError, StorageResult};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Persisted data for one region. Surface handles are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionEntry {
    /// Document-space `[x0, y0, x1, y1]`.
    pub coords: [f64; 4],
}

impl RegionEntry {
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            coords: [rect.x0, rect.y0, rect.x1, rect.y1],
        }
    }

    pub fn rect(&self) -> Rect {
        let [x0, y0, x1, y1] = self.coords;
        Rect::new(x0, y0, x1, y1)
    }
}

/// A saved set of regions and their order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    #[serde(default)]
    pub regions: BTreeMap<String, RegionEntry>,
    #[serde(default)]
    pub order: Vec<String>,
}

impl RegionConfig {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Strict deserialization: any malformed entry fails the whole document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Outcome of loading a configuration into a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of regions restored.
    pub loaded: usize,
    /// Human-readable reasons for every entry that was dropped.
    pub skipped: Vec<String>,
}

impl LoadReport {
    /// Whether everything in the file was restored.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Lenient parse of a configuration document.
///
/// Only input that is not a JSON object is an error. Entries whose coords are
/// not four numbers and non-string `order` items are dropped and described
/// in the returned list.
pub fn parse_config(json: &str) -> StorageResult<(RegionConfig, Vec<String>)> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| StorageError::Serialization(e.to_string()))?;
    let Value::Object(root) = value else {
        return Err(StorageError::Serialization(
            "expected a JSON object at the top level".to_string(),
        ));
    };

    let mut skipped = Vec::new();
    let mut config = RegionConfig::default();

    match root.get("regions") {
        Some(Value::Object(regions)) => {
            for (label, entry) in regions {
                match parse_coords(entry) {
                    Some(coords) => {
                        config.regions.insert(label.clone(), RegionEntry { coords });
                    }
                    None => skipped.push(format!("{label}: malformed coords")),
                }
            }
        }
        Some(Value::Null) | None => {}
        Some(_) => skipped.push("regions: expected an object".to_string()),
    }

    match root.get("order") {
        Some(Value::Array(items)) => {
            for item in items {
                match item {
                    Value::String(label) => config.order.push(label.clone()),
                    other => skipped.push(format!("order entry {other}: expected a string")),
                }
            }
        }
        Some(Value::Null) | None => {}
        Some(_) => skipped.push("order: expected an array".to_string()),
    }

    Ok((config, skipped))
}

fn parse_coords(entry: &Value) -> Option<[f64; 4]> {
    let items = entry.get("coords")?.as_array()?;
    if items.len() != 4 {
        return None;
    }
    let mut coords = [0.0; 4];
    for (slot, item) in coords.iter_mut().zip(items) {
        *slot = item.as_f64()?;
    }
    Some(coords)
}
