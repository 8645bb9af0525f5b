//! Paginated resource tests: load more, failures and filter changes.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use campus_web::client::{ApiRequest, ContentSource};
use campus_web::error::{ClientError, ClientResult};
use campus_web::filters::{FilterKey, FilterPatch, FilterState, QueryState};
use campus_web::formatters::ViewState;
use campus_web::locale::Locale;
use campus_web::models::ContentItem;
use campus_web::pages::Section;
use campus_web::resource::PaginatedResource;

/// In-memory news endpoint holding `total` items, `limit` per page.
struct FakeNews {
    total: u32,
    fail_pages: Vec<u32>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeNews {
    fn new(total: u32) -> Self {
        Self { total, fail_pages: Vec::new(), requests: Mutex::new(Vec::new()) }
    }

    fn failing(mut self, page: u32) -> Self {
        self.fail_pages.push(page);
        self
    }

    fn pages_requested(&self) -> Vec<u32> {
        self.requests.lock().unwrap().iter().map(|r| param(r, "page")).collect()
    }
}

fn param(request: &ApiRequest, name: &str) -> u32 {
    request
        .params
        .iter()
        .find(|(k, _)| k == name)
        .and_then(|(_, v)| v.parse().ok())
        .unwrap_or(1)
}

#[async_trait]
impl ContentSource for FakeNews {
    async fn get_json(&self, request: &ApiRequest, _locale: Locale) -> ClientResult<serde_json::Value> {
        self.requests.lock().unwrap().push(request.clone());
        let page = param(request, "page");
        let limit = param(request, "limit");
        if self.fail_pages.contains(&page) {
            return Err(ClientError::server(502, "upstream unavailable"));
        }
        let start = (page - 1) * limit + 1;
        let end = (page * limit).min(self.total);
        let data: Vec<_> = (start..=end)
            .map(|id| json!({"id": id, "slug": format!("n-{id}"), "title": format!("News {id}")}))
            .collect();
        Ok(json!({"total": self.total, "page": page, "limit": limit, "data": data}))
    }
}

fn news(limit: u32) -> PaginatedResource<ContentItem> {
    PaginatedResource::new("news", Section::News.schema(), limit)
}

fn ids(resource: &PaginatedResource<ContentItem>) -> Vec<String> {
    resource.items().iter().map(|i| i.id.to_string()).collect()
}

// =============================================================================
// Load More Scenario
// =============================================================================

#[tokio::test]
async fn test_ten_items_four_per_page() {
    let source = FakeNews::new(10);
    let mut resource = news(4);
    let query = QueryState::parse("/en/news", Section::News.schema());

    resource.load(&source, &query.filters(), Locale::En).await;
    assert_eq!(resource.items().len(), 4);
    assert!(resource.has_more());

    let second = QueryState::parse(&query.load_more().href, Section::News.schema());
    let appended = resource.load(&source, &second.filters(), Locale::En).await;
    assert_eq!(appended, 4..8);
    assert_eq!(resource.items().len(), 8);
    assert_eq!(
        ViewState::of_resource(&resource),
        ViewState::Content { has_more: true, loading_more: false }
    );

    let third = QueryState::parse(&second.load_more().href, Section::News.schema());
    resource.load(&source, &third.filters(), Locale::En).await;
    assert_eq!(resource.items().len(), 10);
    assert!(!resource.has_more());
    assert_eq!(ids(&resource), (1..=10).map(|i| i.to_string()).collect::<Vec<_>>());
    assert_eq!(source.pages_requested(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_shared_link_loads_every_page_up_to_requested() {
    let source = FakeNews::new(10);
    let mut resource = news(4);
    let filters = FilterState { page: 3, ..FilterState::default() };

    let appended = resource.load(&source, &filters, Locale::En).await;
    assert_eq!(appended, 0..10);
    assert_eq!(resource.pages(), 3);

    let mut pages = source.pages_requested();
    pages.sort_unstable();
    assert_eq!(pages, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_reloading_same_url_fetches_nothing() {
    let source = FakeNews::new(10);
    let mut resource = news(4);
    resource.load(&source, &FilterState::default(), Locale::En).await;
    let appended = resource.load(&source, &FilterState::default(), Locale::En).await;
    assert!(appended.is_empty());
    assert_eq!(source.pages_requested(), vec![1]);
}

// =============================================================================
// Failure Tests
// =============================================================================

#[tokio::test]
async fn test_initial_failure_has_no_partial_data() {
    let source = FakeNews::new(10).failing(1);
    let mut resource = news(4);
    resource.load(&source, &FilterState { page: 2, ..FilterState::default() }, Locale::En).await;

    assert!(resource.items().is_empty());
    assert!(resource.error().is_some());
    assert_eq!(ViewState::of_resource(&resource), ViewState::Failed);
}

#[tokio::test]
async fn test_later_failure_keeps_earlier_pages_in_order() {
    let source = FakeNews::new(20).failing(3);
    let mut resource = news(4);
    resource.load(&source, &FilterState { page: 4, ..FilterState::default() }, Locale::En).await;

    assert_eq!(ids(&resource), (1..=8).map(|i| i.to_string()).collect::<Vec<_>>());
    assert_eq!(resource.pages(), 2);
    assert!(resource.error().is_some_and(ClientError::is_retryable));
}

// =============================================================================
// Filter Change Tests
// =============================================================================

#[tokio::test]
async fn test_filter_change_resets_to_first_page() {
    let source = FakeNews::new(10);
    let mut resource = news(4);
    let query = QueryState::parse("/en/news?page=2", Section::News.schema());
    resource.load(&source, &query.filters(), Locale::En).await;
    assert_eq!(resource.items().len(), 8);

    let nav = query.update_params(&FilterPatch::new().set(FilterKey::Search, "lab"));
    let searched = QueryState::parse(&nav.href, Section::News.schema());
    assert_eq!(searched.filters().page, 1);

    resource.load(&source, &searched.filters(), Locale::En).await;
    assert_eq!(resource.items().len(), 4);

    let last = source.requests.lock().unwrap().last().cloned().unwrap();
    assert!(last.params.contains(&("search".to_string(), "lab".to_string())));
    assert!(last.params.contains(&("page".to_string(), "1".to_string())));
}
