// src/domain/unit.rs

use serde::{Deserialize, Serialize};

pub const SOLD_LABEL: &str = "Telah Dijual";
pub const NOT_SOLD_LABEL: &str = "Belum Dijual";
pub const UNKNOWN_STATUS: &str = "Unknown";

/// How a raw status label counts towards the listing totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleState {
    Sold,
    NotSold,
    /// Unrecognised labels and missing metadata.
    Other,
}

impl SaleState {
    pub fn classify(label: &str) -> Self {
        match label {
            SOLD_LABEL => SaleState::Sold,
            NOT_SOLD_LABEL => SaleState::NotSold,
            _ => SaleState::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitStatus {
    pub unit_number: String,
    pub status: String,
}

impl UnitStatus {
    pub fn new(unit_number: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            unit_number: unit_number.into(),
            status: status.into(),
        }
    }

    pub fn state(&self) -> SaleState {
        SaleState::classify(&self.status)
    }

    pub fn is_sold(&self) -> bool {
        self.state() == SaleState::Sold
    }

    pub fn is_unknown(&self) -> bool {
        self.status == UNKNOWN_STATUS
    }
}

/// Aggregate counts kept per listing for the "current (previous)" display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitCounts {
    pub total_units: u32,
    pub sold_count: u32,
    pub not_sold_count: u32,
}

/// Result of one scrape of a listing page. Superseded, never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitSnapshot {
    pub total_units: u32,
    pub sold_count: u32,
    pub not_sold_count: u32,
    pub unit_statuses: Vec<UnitStatus>,
}

impl UnitSnapshot {
    /// Derives the counts from the per-unit statuses.
    /// Every unit counts towards the total; only the two meaningful labels
    /// count towards sold / not sold.
    pub fn from_statuses(unit_statuses: Vec<UnitStatus>) -> Self {
        let mut sold_count = 0;
        let mut not_sold_count = 0;
        for unit in &unit_statuses {
            match unit.state() {
                SaleState::Sold => sold_count += 1,
                SaleState::NotSold => not_sold_count += 1,
                SaleState::Other => {}
            }
        }

        Self {
            total_units: unit_statuses.len() as u32,
            sold_count,
            not_sold_count,
            unit_statuses,
        }
    }

    pub fn counts(&self) -> UnitCounts {
        UnitCounts {
            total_units: self.total_units,
            sold_count: self.sold_count,
            not_sold_count: self.not_sold_count,
        }
    }
}

/// Formats a count as `current (previous)`, or just `current` on a first visit.
pub fn format_with_previous(current: u32, previous: Option<u32>) -> String {
    match previous {
        Some(prev) => format!("{current} ({prev})"),
        None => current.to_string(),
    }
}
