//! Grouped view over an item collection.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::collection::ItemCollection;
use crate::line_item::LineItem;

/// Grouping key: the `(section, subsection)` pair, or the ungrouped bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey<'a> {
    /// Items with neither section nor subsection.
    Ungrouped,
    Labelled {
        section: Option<&'a str>,
        subsection: Option<&'a str>,
    },
}

impl<'a> GroupKey<'a> {
    pub fn of(item: &'a LineItem) -> Self {
        if item.is_ungrouped() {
            GroupKey::Ungrouped
        } else {
            GroupKey::Labelled {
                section: item.section(),
                subsection: item.subsection(),
            }
        }
    }

    /// Header text for the group: `"FOUNDATIONS - Excavation"`, or whichever
    /// half is present. `None` for the ungrouped bucket.
    pub fn label(&self) -> Option<String> {
        match *self {
            GroupKey::Ungrouped => None,
            GroupKey::Labelled { section: Some(s), subsection: Some(sub) } => Some(format!("{s} - {sub}")),
            GroupKey::Labelled { section: Some(s), subsection: None } => Some(s.to_string()),
            GroupKey::Labelled { section: None, subsection: Some(sub) } => Some(sub.to_string()),
            GroupKey::Labelled { section: None, subsection: None } => None,
        }
    }

    pub fn is_ungrouped(&self) -> bool {
        matches!(self, GroupKey::Ungrouped)
    }
}

/// One group: its key, its items in insertion order, and their subtotal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    pub key: GroupKey<'a>,
    pub items: Vec<&'a LineItem>,
    pub subtotal: Decimal,
}

impl Group<'_> {
    pub fn label(&self) -> Option<String> {
        self.key.label()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Lazy, restartable grouping of a collection.
///
/// Nothing is computed until [`GroupedView::iter`] is called, and every call
/// starts over from the collection. Order: the ungrouped bucket first (when
/// present), then labelled groups by first appearance of their key.
#[derive(Debug, Clone, Copy)]
pub struct GroupedView<'a> {
    collection: &'a ItemCollection,
}

impl<'a> GroupedView<'a> {
    pub(crate) fn new(collection: &'a ItemCollection) -> Self {
        Self { collection }
    }

    pub fn iter(&self) -> Groups<'a> {
        let mut ungrouped: Option<Group<'a>> = None;
        let mut labelled: Vec<Group<'a>> = Vec::new();
        let mut positions: HashMap<GroupKey<'a>, usize> = HashMap::new();

        for item in self.collection.items() {
            let key = GroupKey::of(item);
            let group = match key {
                GroupKey::Ungrouped => ungrouped.get_or_insert_with(|| empty_group(key)),
                GroupKey::Labelled { .. } => {
                    let position = *positions.entry(key).or_insert_with(|| {
                        labelled.push(empty_group(key));
                        labelled.len() - 1
                    });
                    &mut labelled[position]
                }
            };
            // Amounts are non-negative and the collection total is checked on
            // append, so a subtotal never exceeds a representable total.
            group.subtotal = group.subtotal.saturating_add(item.amount());
            group.items.push(item);
        }

        let groups: Vec<Group<'a>> = ungrouped.into_iter().chain(labelled).collect();
        Groups { inner: groups.into_iter() }
    }

    /// Subtotals in group order.
    pub fn subtotals(&self) -> Vec<Decimal> {
        self.iter().map(|g| g.subtotal).collect()
    }
}

fn empty_group(key: GroupKey<'_>) -> Group<'_> {
    Group {
        key,
        items: Vec::new(),
        subtotal: Decimal::ZERO,
    }
}

impl<'a> IntoIterator for GroupedView<'a> {
    type Item = Group<'a>;
    type IntoIter = Groups<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &GroupedView<'a> {
    type Item = Group<'a>;
    type IntoIter = Groups<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over groups produced by [`GroupedView::iter`].
#[derive(Debug)]
pub struct Groups<'a> {
    inner: std::vec::IntoIter<Group<'a>>,
}

impl<'a> Iterator for Groups<'a> {
    type Item = Group<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Groups<'_> {}
