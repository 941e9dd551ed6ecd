//! Item collection: the ordered bill plus its project metadata.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use boq_core::{DomainError, DomainResult, ItemNumber};

use crate::group::GroupedView;
use crate::line_item::LineItem;

/// Project metadata carried by every exported document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub number: String,
    pub created_at: DateTime<Utc>,
}

impl ProjectInfo {
    /// Project stamped with the current time.
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            created_at: Utc::now(),
        }
    }

    /// Pin the creation timestamp (reproducible exports, tests).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// Item count and grand total of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_items: usize,
    pub total_amount: Decimal,
}

/// Ordered, append-only sequence of line items plus project metadata.
///
/// Item numbers are unique; the check happens on append, not at export time.
/// Existing entries are never edited: [`ItemCollection::with_replaced`] and
/// [`ItemCollection::sorted_by_item_number`] return new snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCollection {
    project: ProjectInfo,
    items: Vec<LineItem>,
    numbers: HashSet<ItemNumber>,
    /// Running grand total, checked on every append.
    total: Decimal,
}

impl ItemCollection {
    pub fn new(project: ProjectInfo) -> Self {
        Self {
            project,
            items: Vec::new(),
            numbers: HashSet::new(),
            total: Decimal::ZERO,
        }
    }

    pub fn from_items(
        project: ProjectInfo,
        items: impl IntoIterator<Item = LineItem>,
    ) -> DomainResult<Self> {
        let mut collection = Self::new(project);
        collection.extend(items)?;
        Ok(collection)
    }

    pub fn project(&self) -> &ProjectInfo {
        &self.project
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, item_number: &str) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|item| item.item_number().as_str() == item_number.trim())
    }

    /// Append one item. Fails on a duplicate item number or when the grand
    /// total would overflow, leaving the collection unchanged.
    pub fn append(&mut self, item: LineItem) -> DomainResult<()> {
        if self.numbers.contains(item.item_number()) {
            tracing::debug!(item_number = %item.item_number(), "rejected duplicate item");
            return Err(DomainError::duplicate_item(item.item_number().as_str()));
        }
        self.total = add_amount(self.total, &item)?;
        self.numbers.insert(item.item_number().clone());
        self.items.push(item);
        Ok(())
    }

    /// Append a batch, all or nothing.
    pub fn extend(&mut self, items: impl IntoIterator<Item = LineItem>) -> DomainResult<()> {
        let batch: Vec<LineItem> = items.into_iter().collect();
        let mut seen: HashSet<&ItemNumber> = HashSet::with_capacity(batch.len());
        let mut total = self.total;
        for item in &batch {
            let number = item.item_number();
            if self.numbers.contains(number) || !seen.insert(number) {
                return Err(DomainError::duplicate_item(number.as_str()));
            }
            total = add_amount(total, item)?;
        }
        self.total = total;
        for item in batch {
            self.numbers.insert(item.item_number().clone());
            self.items.push(item);
        }
        Ok(())
    }

    pub fn grouped_view(&self) -> GroupedView<'_> {
        GroupedView::new(self)
    }

    /// Sum of all item amounts, accumulated as decimals on append.
    pub fn grand_total(&self) -> Decimal {
        self.total
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total_items: self.items.len(),
            total_amount: self.grand_total(),
        }
    }

    /// New snapshot with the item of the same number swapped for `replacement`.
    pub fn with_replaced(&self, replacement: LineItem) -> DomainResult<Self> {
        let position = self
            .items
            .iter()
            .position(|item| item.item_number() == replacement.item_number())
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "cannot replace item {}: not in collection",
                    replacement.item_number()
                ))
            })?;
        let mut next = self.clone();
        next.items[position] = replacement;
        next.total = next
            .items
            .iter()
            .try_fold(Decimal::ZERO, add_amount)?;
        Ok(next)
    }

    /// New snapshot ordered by natural item number (`1.2` before `1.10`).
    pub fn sorted_by_item_number(&self) -> Self {
        let mut next = self.clone();
        next.items.sort_by(|a, b| a.item_number().cmp(b.item_number()));
        next
    }
}

fn add_amount(total: Decimal, item: &LineItem) -> DomainResult<Decimal> {
    total.checked_add(item.amount()).ok_or_else(|| {
        DomainError::validation(format!(
            "item {}: grand total overflows",
            item.item_number()
        ))
    })
}
