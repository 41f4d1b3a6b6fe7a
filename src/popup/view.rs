use serde::Serialize;
use std::fmt;

use crate::domain::listing::display_title;
use crate::domain::unit::format_with_previous;
use crate::domain::{ListingEntry, SoldTransitionRecord, UnitCounts};

/// What the popup shows after an activation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PopupView {
    Listing(ListingView),
    /// Off-domain page: no scrape was attempted.
    Unrecognized {
        url: String,
        visited: Vec<ListingEntry>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    pub url: String,
    pub code: String,
    pub title: Option<String>,
    /// `None` when the scrape produced nothing.
    pub current: Option<UnitCounts>,
    pub previous: Option<UnitCounts>,
    pub newly_sold: Vec<SoldTransitionRecord>,
    pub visited: Vec<ListingEntry>,
}

impl ListingView {
    fn field(&self, pick: fn(&UnitCounts) -> u32) -> String {
        match &self.current {
            Some(current) => format_with_previous(pick(current), self.previous.as_ref().map(pick)),
            None => String::new(),
        }
    }

    pub fn total_display(&self) -> String {
        self.field(|c| c.total_units)
    }

    pub fn sold_display(&self) -> String {
        self.field(|c| c.sold_count)
    }

    pub fn not_sold_display(&self) -> String {
        self.field(|c| c.not_sold_count)
    }
}

fn write_visited(f: &mut fmt::Formatter<'_>, visited: &[ListingEntry]) -> fmt::Result {
    if visited.is_empty() {
        return Ok(());
    }
    writeln!(f)?;
    writeln!(f, "Visited listings:")?;
    for entry in visited {
        writeln!(f, "  {}  {}", entry.title, entry.url)?;
    }
    Ok(())
}

impl fmt::Display for PopupView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopupView::Unrecognized { url, visited } => {
                writeln!(f, "Not a unit listing page: {url}")?;
                writeln!(f, "Use `link <APDL code>` to build a listing link.")?;
                write_visited(f, visited)
            }
            PopupView::Listing(view) => {
                writeln!(f, "{}", display_title(view.title.as_deref(), &view.code))?;
                writeln!(f, "Total units:    {}", view.total_display())?;
                writeln!(f, "Sold:           {}", view.sold_display())?;
                writeln!(f, "Not sold:       {}", view.not_sold_display())?;

                if !view.newly_sold.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "Newly sold since last visit:")?;
                    for record in &view.newly_sold {
                        writeln!(f, "  {}  {}", record.unit_number, record.display_date())?;
                    }
                    writeln!(f, "Run `ack {}` to mark as read.", view.url)?;
                }

                write_visited(f, &view.visited)
            }
        }
    }
}
