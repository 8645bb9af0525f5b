//! Incremental list accumulator for "load more" pagination.

use std::collections::HashSet;
use std::hash::Hash;
use std::ops::Range;

use crate::models::{AcademicUnit, ContentItem, ItemId, ListResponse, StaffProfile};

/// Anything with a stable identifier.
pub trait Identified {
    /// Identifier type.
    type Id: Clone + Eq + Hash + std::fmt::Debug;

    /// Identifier of this item.
    fn id(&self) -> &Self::Id;
}

impl Identified for ContentItem {
    type Id = ItemId;

    fn id(&self) -> &ItemId {
        &self.id
    }
}

impl Identified for StaffProfile {
    type Id = ItemId;

    fn id(&self) -> &ItemId {
        &self.id
    }
}

impl Identified for AcademicUnit {
    type Id = ItemId;

    fn id(&self) -> &ItemId {
        &self.id
    }
}

/// Ordered, deduplicated items from successive pages plus the server total.
///
/// Invariants: no two items share an id, and `len() <= total()`.
#[derive(Debug, Clone)]
pub struct Accumulator<T: Identified> {
    items: Vec<T>,
    seen: HashSet<T::Id>,
    total: u64,
    pages: u32,
}

impl<T: Identified> Default for Accumulator<T> {
    fn default() -> Self {
        Self { items: Vec::new(), seen: HashSet::new(), total: 0, pages: 0 }
    }
}

impl<T: Identified> Accumulator<T> {
    /// Empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a page response.
    ///
    /// Page 1 replaces everything. Later pages append only items whose id
    /// has not been seen, in response order. Returns the index range of the
    /// appended items.
    pub fn apply(&mut self, page: u32, response: ListResponse<T>) -> Range<usize> {
        if page <= 1 {
            self.reset();
        }

        let start = self.items.len();
        for item in response.data {
            if self.seen.insert(item.id().clone()) {
                self.items.push(item);
            }
        }
        self.pages = self.pages.max(page);

        let len = self.items.len() as u64;
        if response.total < len {
            tracing::warn!(reported = response.total, accumulated = len, "total below accumulated count");
        }
        self.total = response.total.max(len);

        start..self.items.len()
    }

    /// Forget everything.
    pub fn reset(&mut self) {
        self.items.clear();
        self.seen.clear();
        self.total = 0;
        self.pages = 0;
    }

    /// Accumulated items in order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of accumulated items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Server-reported total.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Highest page merged so far (0 before the first page).
    #[must_use]
    pub const fn pages(&self) -> u32 {
        self.pages
    }

    /// Whether the "load more" affordance should be shown.
    #[must_use]
    pub fn has_more(&self) -> bool {
        (self.items.len() as u64) < self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> ContentItem {
        ContentItem {
            id: ItemId::new(id),
            slug: format!("item-{id}"),
            title: format!("Item {id}"),
            ..ContentItem::default()
        }
    }

    fn page(total: u64, page: u32, ids: &[&str]) -> ListResponse<ContentItem> {
        ListResponse::new(total, page, 4, ids.iter().map(|id| item(id)).collect())
    }

    fn ids(acc: &Accumulator<ContentItem>) -> Vec<&str> {
        acc.items().iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_first_page_replaces() {
        let mut acc = Accumulator::new();
        acc.apply(1, page(10, 1, &["1", "2"]));
        acc.apply(2, page(10, 2, &["3"]));
        acc.apply(1, page(2, 1, &["9", "8"]));
        assert_eq!(ids(&acc), vec!["9", "8"]);
        assert_eq!(acc.pages(), 1);
        assert!(!acc.has_more());
    }

    #[test]
    fn test_later_pages_skip_seen_ids() {
        let mut acc = Accumulator::new();
        acc.apply(1, page(10, 1, &["1", "2", "3", "4"]));
        let appended = acc.apply(2, page(10, 2, &["4", "5", "1", "6"]));
        assert_eq!(ids(&acc), vec!["1", "2", "3", "4", "5", "6"]);
        assert_eq!(appended, 4..6);
    }

    #[test]
    fn test_same_page_twice_is_idempotent() {
        let mut acc = Accumulator::new();
        acc.apply(1, page(10, 1, &["1", "2", "3", "4"]));
        acc.apply(2, page(10, 2, &["5", "6", "7", "8"]));
        let appended = acc.apply(2, page(10, 2, &["5", "6", "7", "8"]));
        assert_eq!(acc.len(), 8);
        assert!(appended.is_empty());
    }

    #[test]
    fn test_total_never_below_len() {
        let mut acc = Accumulator::new();
        acc.apply(1, page(4, 1, &["1", "2", "3", "4"]));
        acc.apply(2, page(3, 2, &["5"]));
        assert_eq!(acc.len(), 5);
        assert_eq!(acc.total(), 5);
        assert!(!acc.has_more());
    }

    #[test]
    fn test_ten_items_in_pages_of_four() {
        let mut acc = Accumulator::new();
        acc.apply(1, page(10, 1, &["1", "2", "3", "4"]));
        acc.apply(2, page(10, 2, &["5", "6", "7", "8"]));
        assert_eq!(acc.len(), 8);
        assert!(acc.has_more());

        acc.apply(3, page(10, 3, &["9", "10"]));
        assert_eq!(acc.len(), 10);
        assert!(!acc.has_more());
    }
}
