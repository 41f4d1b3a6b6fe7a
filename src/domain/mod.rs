pub mod changes;
pub mod listing;
pub mod unit;

#[cfg(test)]
pub use changes::detect;
pub use changes::{detect_at, SoldTransitionRecord};
pub use listing::ListingEntry;
pub use unit::{UnitCounts, UnitSnapshot, UnitStatus};
