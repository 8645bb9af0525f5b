//! Property-based tests for URL filter state.

use chrono::NaiveDate;
use proptest::prelude::*;

use campus_web::filters::{FilterKey, FilterPatch, FilterState, QueryState};
use campus_web::pages::Section;

/// Generate filter states the news schema can hold.
fn arb_news_state() -> impl Strategy<Value = FilterState> {
    (
        proptest::option::of("[a-zA-Z0-9 &=+?#%ءئابتثجحخد]{1,20}"), // search
        proptest::option::of("[a-z][a-z0-9-]{0,15}"),               // category_slug
        proptest::option::of("[a-z][a-z0-9-]{0,15}"),               // tag
        proptest::option::of(0i64..20_000),                          // from (days after epoch)
        proptest::option::of(0i64..20_000),                          // to
        1u32..500,                                                   // page
    )
        .prop_map(|(search, category_slug, tag, from, to, page)| {
            let day = |offset: i64| {
                NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + chrono::Duration::days(offset)
            };
            FilterState {
                search: search.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
                category_slug,
                tag,
                from: from.map(day),
                to: to.map(day),
                kind: None,
                page,
            }
        })
}

fn arb_patch() -> impl Strategy<Value = FilterPatch> {
    let key = prop_oneof![
        Just(FilterKey::Search),
        Just(FilterKey::CategorySlug),
        Just(FilterKey::Tag),
        Just(FilterKey::From),
        Just(FilterKey::To),
        Just(FilterKey::Page),
    ];
    proptest::collection::vec((key, proptest::option::of("[a-z0-9 -]{0,10}")), 1..5).prop_map(
        |entries| {
            entries.into_iter().fold(FilterPatch::new(), |patch, (key, value)| match value {
                Some(value) => patch.set(key, value),
                None => patch.remove(key),
            })
        },
    )
}

fn page_url(state: &FilterState) -> String {
    QueryState::parse("/en/news", Section::News.schema()).href_for(state)
}

proptest! {
    /// Encode then parse reproduces the state.
    #[test]
    fn encode_parse_roundtrip(state in arb_news_state()) {
        let url = page_url(&state);
        let parsed = QueryState::parse(&url, Section::News.schema()).filters();
        prop_assert_eq!(parsed, state);
    }

    /// Re-encoding a parsed URL is a fixed point.
    #[test]
    fn encode_is_idempotent(state in arb_news_state()) {
        let once = page_url(&state);
        let twice = QueryState::parse(&once, Section::News.schema()).href();
        prop_assert_eq!(once, twice);
    }

    /// Any filter change resets the page to 1.
    #[test]
    fn filter_change_resets_page(state in arb_news_state(), patches in proptest::collection::vec(arb_patch(), 1..4)) {
        let mut url = page_url(&state);
        for patch in &patches {
            url = QueryState::parse(&url, Section::News.schema()).update_params(patch).href;
            let page = QueryState::parse(&url, Section::News.schema()).filters().page;
            prop_assert_eq!(page, 1);
        }
    }

    /// Load more only touches the page.
    #[test]
    fn load_more_preserves_filters(state in arb_news_state()) {
        let query = QueryState::parse(&page_url(&state), Section::News.schema());
        let next = QueryState::parse(&query.load_more().href, Section::News.schema()).filters();
        prop_assert!(next.same_filters(&state));
        prop_assert_eq!(next.page, state.page + 1);
    }

    /// Parsing never panics on arbitrary query strings.
    #[test]
    fn parse_arbitrary_query_never_panics(query in ".{0,200}") {
        let state = QueryState::parse(&format!("/en/news?{query}"), Section::News.schema());
        let _ = state.href();
        prop_assert!(state.filters().page >= 1);
    }
}
