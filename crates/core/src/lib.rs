//! `boq-core` — bill-of-quantities building blocks.
//!
//! This crate contains **pure domain** primitives (no IO): the error model,
//! item numbers, and the decimal money rules shared by every bill component.

pub mod error;
pub mod item_number;
pub mod money;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use item_number::ItemNumber;
pub use money::{MONEY_SCALE, format_money, round_money};
pub use value_object::ValueObject;
