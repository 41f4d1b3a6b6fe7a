// src/domain/changes.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::domain::unit::UnitStatus;

/// A unit observed moving from a known non-sold status to sold.
/// The timestamp is fixed when first detected and never refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldTransitionRecord {
    pub unit_number: String,
    pub date_marked_sold: DateTime<Utc>,
}

impl SoldTransitionRecord {
    /// Date portion shown in the newly-sold notice.
    pub fn display_date(&self) -> String {
        self.date_marked_sold.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Diffs the current scrape against the previous one, stamping new
/// transitions with the current time.
#[cfg(test)]
pub fn detect(
    current: &[UnitStatus],
    previous: &[UnitStatus],
    existing: &[SoldTransitionRecord],
) -> Vec<SoldTransitionRecord> {
    detect_at(current, previous, existing, Utc::now())
}

/// Accumulates sold transitions on top of the unacknowledged set.
///
/// A unit is flagged only when its previous status is known and is not
/// sold. Units seen for the first time, or whose previous metadata was
/// unreadable, are never flagged. Output order is the existing records
/// followed by new ones in scan order of `current`.
pub fn detect_at(
    current: &[UnitStatus],
    previous: &[UnitStatus],
    existing: &[SoldTransitionRecord],
    now: DateTime<Utc>,
) -> Vec<SoldTransitionRecord> {
    let mut result = existing.to_vec();
    let mut flagged: HashSet<String> = existing.iter().map(|r| r.unit_number.clone()).collect();

    let previous_by_unit: HashMap<&str, &UnitStatus> = previous
        .iter()
        .map(|unit| (unit.unit_number.as_str(), unit))
        .collect();

    for unit in current.iter().filter(|u| u.is_sold()) {
        let Some(before) = previous_by_unit.get(unit.unit_number.as_str()) else {
            continue;
        };
        if before.is_sold() || before.is_unknown() {
            continue;
        }
        if !flagged.insert(unit.unit_number.clone()) {
            continue;
        }

        result.push(SoldTransitionRecord {
            unit_number: unit.unit_number.clone(),
            date_marked_sold: now,
        });
    }

    result
}
