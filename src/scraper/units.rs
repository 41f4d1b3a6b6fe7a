// units.rs
use ::scraper::{ElementRef, Html, Selector};
use serde_json::{Map, Value};

use crate::domain::unit::{UnitSnapshot, UnitStatus, UNKNOWN_STATUS};
use crate::scraper::ScraperError;

const UNIT_SELECTOR: &str = "div.unit-box";
const TITLE_SELECTOR: &str = "p.text-center.font-semibold.text-white";
const TOOLTIP_ATTR: &str = "data-tooltip";

pub const STATUS_FIELD: &str = "Status Jualan";
const UNIT_NUMBER_FIELDS: [&str; 3] = ["No. Unit", "No Unit", "Unit"];

// data-tooltip
//  ├── "No. Unit"        (sometimes "No Unit" or "Unit")
//  ├── "Status Jualan"   "Telah Dijual" | "Belum Dijual" | ...
//  └── ...               other display fields, ignored

/// The parsed `data-tooltip` object of one unit element.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitMetadata {
    fields: Map<String, Value>,
}

impl UnitMetadata {
    /// Returns `None` for anything that is not a JSON object.
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(fields)) => Some(Self { fields }),
            _ => None,
        }
    }

    fn text(&self, field: &str) -> Option<String> {
        let value = match self.fields.get(field)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        (!value.is_empty()).then_some(value)
    }

    /// The status label exactly as published; labels are compared verbatim.
    pub fn status(&self) -> Option<String> {
        match self.fields.get(STATUS_FIELD)? {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    pub fn unit_number(&self) -> Option<String> {
        UNIT_NUMBER_FIELDS.iter().find_map(|field| self.text(field))
    }
}

fn selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::HtmlParse(e.to_string()))
}

fn unit_status(index: usize, element: ElementRef<'_>) -> UnitStatus {
    let raw = element.value().attr(TOOLTIP_ATTR);
    let metadata = raw.and_then(UnitMetadata::parse);

    if raw.is_some() && metadata.is_none() {
        tracing::warn!(unit = index + 1, "unreadable unit tooltip");
    }

    let unit_number = metadata
        .as_ref()
        .and_then(UnitMetadata::unit_number)
        .unwrap_or_else(|| format!("unit-{}", index + 1));
    let status = metadata
        .as_ref()
        .and_then(UnitMetadata::status)
        .unwrap_or_else(|| UNKNOWN_STATUS.to_string());

    UnitStatus::new(unit_number, status)
}

/// Reads every unit element on a listing page into a snapshot.
/// Units with missing or malformed metadata are kept as `"Unknown"`.
pub fn extract_units(html: &str) -> Result<UnitSnapshot, ScraperError> {
    let document = Html::parse_document(html);
    let units = selector(UNIT_SELECTOR)?;

    let statuses = document
        .select(&units)
        .enumerate()
        .map(|(index, element)| unit_status(index, element))
        .collect();

    Ok(UnitSnapshot::from_statuses(statuses))
}

/// Text of the project title element: `None` when the element is absent,
/// `Some("")` when it is present but empty.
pub fn extract_title(html: &str) -> Result<Option<String>, ScraperError> {
    let document = Html::parse_document(html);
    let title = selector(TITLE_SELECTOR)?;

    Ok(document
        .select(&title)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string()))
}
