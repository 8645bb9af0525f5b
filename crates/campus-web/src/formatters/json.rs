//! JSON bodies for the "load more" fragment endpoint.

use serde_json::{Value, json};

use super::RenderContext;
use super::cards::Card;
use super::html::items_html;
use crate::filters::QueryState;
use crate::resource::PaginatedResource;

/// Fragment for the items appended by the latest page.
///
/// `query` is the URL of the page just loaded; `appended` indexes into the
/// resource's items.
#[must_use]
pub fn fragment<T: Card>(
    ctx: &RenderContext<'_>,
    query: &QueryState,
    resource: &PaginatedResource<T>,
    appended: std::ops::Range<usize>,
) -> Value {
    let items = resource.items().get(appended.clone()).unwrap_or_default();
    let count = resource.items().len();
    let mut obj = json!({
        "html": items_html(ctx, items),
        "appended": appended.len(),
        "count": count,
        "total": resource.total(),
        "countLabel": ctx.locale.count_label(count, resource.total()),
        "hasMore": resource.has_more(),
        "href": query.href(),
    });

    if resource.has_more() {
        let next = query.load_more();
        obj["fragmentHref"] = json!(next.with_path(&ctx.section.fragment_path(ctx.locale)));
        obj["nextHref"] = json!(next.href);
    }

    obj
}

/// Error body for a failed fragment request.
#[must_use]
pub fn fragment_error(message: &str, retryable: bool) -> Value {
    json!({
        "error": message,
        "retryable": retryable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterState;
    use crate::locale::Locale;
    use crate::models::{ContentItem, ItemId, ListResponse};
    use crate::pages::Section;

    fn item(id: u32) -> ContentItem {
        ContentItem {
            id: ItemId::new(id.to_string()),
            slug: format!("n-{id}"),
            title: format!("News {id}"),
            ..ContentItem::default()
        }
    }

    #[test]
    fn test_fragment_carries_only_appended_items() {
        let ctx = RenderContext { locale: Locale::En, section: Section::News, placeholder: "/p.svg" };
        let mut res = PaginatedResource::new("news", Section::News.schema(), 4);
        let first = res.plan(&FilterState::default());
        res.resolve(&first[0], Ok(ListResponse::new(10, 1, 4, (1..=4).map(item).collect())));
        let second = res.plan(&FilterState { page: 2, ..FilterState::default() });
        let appended = res
            .resolve(&second[0], Ok(ListResponse::new(10, 2, 4, (5..=8).map(item).collect())))
            .unwrap();

        let query = QueryState::parse("/en/news?page=2", Section::News.schema());
        let body = fragment(&ctx, &query, &res, appended);

        assert_eq!(body["appended"], 4);
        assert_eq!(body["count"], 8);
        assert_eq!(body["hasMore"], true);
        assert_eq!(body["nextHref"], "/en/news?page=3");
        assert_eq!(body["fragmentHref"], "/fragments/en/news?page=3");
        let html = body["html"].as_str().unwrap();
        assert!(html.contains("News 5") && !html.contains("News 4<"));
    }

    #[test]
    fn test_fragment_error_shape() {
        let body = fragment_error("down", true);
        assert_eq!(body, json!({"error": "down", "retryable": true}));
    }
}
