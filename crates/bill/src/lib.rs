//! Bill-of-quantities domain module.
//!
//! This crate contains the line-item record, the append-only item collection
//! and its grouping/totalling rules, implemented purely as deterministic domain
//! logic (no IO, no rendering).

pub mod collection;
pub mod group;
pub mod input;
pub mod line_item;
pub mod unit;

pub use collection::{ItemCollection, ProjectInfo, Summary};
pub use group::{Group, GroupKey, GroupedView, Groups};
pub use input::{BillInput, LineItemInput};
pub use line_item::{LineItem, LineItemBuilder};
pub use unit::Unit;
