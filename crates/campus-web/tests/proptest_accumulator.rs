//! Property-based tests for list accumulation.

use std::collections::HashSet;

use async_trait::async_trait;
use proptest::prelude::*;
use serde_json::json;

use campus_web::accumulator::Accumulator;
use campus_web::client::{ApiRequest, ContentSource};
use campus_web::error::ClientResult;
use campus_web::filters::FilterState;
use campus_web::locale::Locale;
use campus_web::models::{ContentItem, ItemId, ListResponse};
use campus_web::pages::Section;
use campus_web::resource::PaginatedResource;

fn item(id: u16) -> ContentItem {
    ContentItem {
        id: ItemId::new(id.to_string()),
        slug: format!("n-{id}"),
        title: format!("News {id}"),
        ..ContentItem::default()
    }
}

/// Pages of ids drawn from a small range so overlaps are common.
fn arb_pages() -> impl Strategy<Value = Vec<Vec<u16>>> {
    proptest::collection::vec(proptest::collection::vec(0u16..40, 0..8), 1..6)
}

/// Serves fixed pages, possibly overlapping, with a fixed total.
struct FixedPages {
    pages: Vec<Vec<u16>>,
    total: u64,
}

#[async_trait]
impl ContentSource for FixedPages {
    async fn get_json(&self, request: &ApiRequest, _locale: Locale) -> ClientResult<serde_json::Value> {
        let page: usize = request
            .params
            .iter()
            .find(|(k, _)| k == "page")
            .and_then(|(_, v)| v.parse().ok())
            .unwrap_or(1);
        let ids = self.pages.get(page - 1).cloned().unwrap_or_default();
        let data: Vec<_> = ids
            .iter()
            .map(|id| json!({"id": id, "slug": format!("n-{id}"), "title": format!("News {id}")}))
            .collect();
        Ok(json!({"total": self.total, "page": page, "limit": 8, "data": data}))
    }
}

proptest! {
    /// No duplicates; order is previous items followed by unseen new items.
    #[test]
    fn merge_is_deduplicated_and_ordered(pages in arb_pages(), total in 0u64..100) {
        let mut acc = Accumulator::new();
        let mut expected: Vec<u16> = Vec::new();

        for (index, ids) in pages.iter().enumerate() {
            let page = index as u32 + 1;
            if page == 1 {
                expected.clear();
            }
            for id in ids {
                if !expected.contains(id) {
                    expected.push(*id);
                }
            }
            acc.apply(page, ListResponse::new(total, page, 8, ids.iter().copied().map(item).collect()));

            let got: Vec<String> = acc.items().iter().map(|i| i.id.to_string()).collect();
            let want: Vec<String> = expected.iter().map(ToString::to_string).collect();
            prop_assert_eq!(got, want);
            prop_assert!(acc.len() as u64 <= acc.total());
        }
    }

    /// Applying the same page twice changes nothing.
    #[test]
    fn reapplying_a_page_is_idempotent(pages in arb_pages()) {
        let mut acc = Accumulator::new();
        for (index, ids) in pages.iter().enumerate() {
            let page = index as u32 + 1;
            let response = || ListResponse::new(100, page, 8, ids.iter().copied().map(item).collect());
            acc.apply(page, response());
            let len = acc.len();
            let appended = acc.apply(page, response());
            prop_assert!(appended.is_empty() || page == 1);
            prop_assert_eq!(acc.len(), len);
        }
    }

    /// Concurrent multi-page loads merge in page order without duplicates.
    #[test]
    fn resource_load_matches_sequential_merge(pages in arb_pages(), extra in 0u64..20) {
        let mut unique = HashSet::new();
        let mut expected = Vec::new();
        for id in pages.iter().flatten() {
            if unique.insert(*id) {
                expected.push(id.to_string());
            }
        }
        // First page must not exceed the total to pass validation.
        let total = pages[0].len() as u64 + extra;
        let source = FixedPages { pages: pages.clone(), total };

        let mut resource: PaginatedResource<ContentItem> =
            PaginatedResource::new("news", Section::News.schema(), 8);
        let filters = FilterState { page: pages.len() as u32, ..FilterState::default() };
        tokio_test::block_on(resource.load(&source, &filters, Locale::En));

        let got: Vec<String> = resource.items().iter().map(|i| i.id.to_string()).collect();
        prop_assert_eq!(got, expected);
        prop_assert!(resource.items().len() as u64 <= resource.total());
    }
}
