//! Page templates.
//!
//! Every list page has the same shape: heading, filter controls, one state
//! block chosen by [`ViewState`], and a hidden skeleton the page script shows
//! while a filter change navigates.

use std::collections::HashSet;
use std::fmt::Write;

use super::cards::{Card, read_more};
use super::{RenderContext, ViewState, html_escape};
use crate::client::RemoteData;
use crate::filters::{FilterKey, FilterPatch, QueryState};
use crate::locale::{Locale, Message, SUPPORTED_LOCALES};
use crate::models::{ContentItem, ListResponse};
use crate::pages::Section;
use crate::resource::PaginatedResource;

/// Placeholder cards shown while the first page loads.
const SKELETON_CARDS: usize = 6;

/// Cards previewed per home page block.
pub const HOME_PREVIEW: usize = 4;

/// Load-more and filter-change behaviour. Without it every control still
/// works as a plain link or form.
const PAGE_SCRIPT: &str = r"
document.addEventListener('click', async (event) => {
  const control = event.target.closest('a.load-more');
  if (!control || !control.dataset.fragment || !window.fetch) return;
  event.preventDefault();
  if (control.getAttribute('aria-busy') === 'true') return;
  const spinner = control.querySelector('.spinner');
  control.setAttribute('aria-busy', 'true');
  control.classList.remove('failed');
  if (spinner) spinner.hidden = false;
  try {
    const response = await fetch(control.dataset.fragment, { headers: { Accept: 'application/json' } });
    if (!response.ok) throw new Error(String(response.status));
    const body = await response.json();
    document.getElementById('results').insertAdjacentHTML('beforeend', body.html);
    const count = document.querySelector('[data-count]');
    if (count) count.textContent = body.countLabel;
    if (control.dataset.history === 'replace') history.replaceState(history.state, '', body.href);
    if (body.hasMore) {
      control.href = body.nextHref;
      control.dataset.fragment = body.fragmentHref;
    } else {
      control.parentElement.remove();
    }
  } catch (_) {
    control.classList.add('failed');
  } finally {
    control.removeAttribute('aria-busy');
    if (spinner) spinner.hidden = true;
  }
});
document.addEventListener('submit', (event) => {
  const form = event.target.closest('form.filters');
  const skeleton = document.getElementById('skeleton');
  const state = document.getElementById('state');
  if (form && skeleton && state) state.replaceChildren(skeleton.content.cloneNode(true));
});
";

/// Document shell around a page body.
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    /// Page locale.
    pub locale: Locale,
    /// Document title.
    pub title: &'a str,
    /// Path and query after the locale segment, used by the language
    /// switcher (`""` for the home page).
    pub alternate: &'a str,
}

/// Render a complete HTML document.
#[must_use]
pub fn render_page(layout: &Layout<'_>, body: &str) -> String {
    let locale = layout.locale;
    let mut switcher = String::new();
    for other in SUPPORTED_LOCALES {
        let href = html_escape(&format!("/{other}{}", layout.alternate));
        let current = if *other == locale { r#" aria-current="true""# } else { "" };
        let _ = write!(
            switcher,
            r#"<a href="{href}" hreflang="{code}" lang="{code}"{current}>{name}</a>"#,
            code = other.as_str(),
            name = other.native_name(),
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}" dir="{dir}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title}</title>
</head>
<body>
<header><a class="home" href="/{lang}">{home}</a><nav class="languages">{switcher}</nav></header>
<main>
{body}
</main>
<script>{script}</script>
</body>
</html>"#,
        lang = locale.as_str(),
        dir = locale.dir(),
        title = html_escape(layout.title),
        home = html_escape(locale.text(Message::Home)),
        script = PAGE_SCRIPT,
    )
}

/// Placeholder cards.
#[must_use]
pub fn skeleton(count: usize) -> String {
    let mut html = String::from(r#"<div class="skeleton" aria-hidden="true">"#);
    for _ in 0..count {
        html.push_str(r#"<div class="card skeleton-card"><div class="media"></div><div class="line"></div><div class="line short"></div></div>"#);
    }
    html.push_str("</div>");
    html
}

/// Failure block with a retry link.
#[must_use]
pub fn error_block(locale: Locale, message: &str, retry_href: &str) -> String {
    format!(
        r#"<div class="error" role="alert"><p>{message}</p><a class="retry" href="{href}">{retry}</a></div>"#,
        message = html_escape(message),
        href = html_escape(retry_href),
        retry = html_escape(locale.text(Message::Retry)),
    )
}

/// Empty-result block, with a clear-filters link when filters are set.
#[must_use]
pub fn empty_block(locale: Locale, clear_href: Option<&str>) -> String {
    let clear = clear_href
        .map(|href| {
            format!(
                r#"<a class="clear" href="{}">{}</a>"#,
                html_escape(href),
                html_escape(locale.text(Message::ClearFilters))
            )
        })
        .unwrap_or_default();
    format!(
        r#"<div class="empty"><p>{}</p>{clear}</div>"#,
        html_escape(locale.text(Message::EmptyTitle))
    )
}

/// Not-found page body.
#[must_use]
pub fn not_found_block(locale: Locale) -> String {
    format!(
        r#"<div class="not-found"><h1>{}</h1><a href="/{locale}">{}</a></div>"#,
        html_escape(locale.text(Message::NotFound)),
        html_escape(locale.text(Message::Home))
    )
}

/// Cards for a run of items.
#[must_use]
pub fn items_html<T: Card>(ctx: &RenderContext<'_>, items: &[T]) -> String {
    items.iter().map(|item| item.card(ctx)).collect()
}

/// Load-more control for the list behind `query`.
fn load_more_control(ctx: &RenderContext<'_>, query: &QueryState, busy: bool) -> String {
    let next = query.load_more();
    let fragment = next.with_path(&ctx.section.fragment_path(ctx.locale));
    let (busy_attr, spinner_hidden) = if busy { (r#" aria-busy="true""#, "") } else { ("", " hidden") };
    format!(
        r#"<div class="load-more-wrap"><a class="load-more" href="{href}" data-fragment="{fragment}" data-history="{history}" data-scroll="{scroll}"{busy_attr}><span class="label">{label}</span><span class="spinner"{spinner_hidden}>{loading}</span></a></div>"#,
        href = html_escape(&next.href),
        fragment = html_escape(&fragment),
        history = next.history.as_str(),
        scroll = next.scroll.as_str(),
        label = html_escape(ctx.locale.text(Message::LoadMore)),
        loading = html_escape(ctx.locale.text(Message::Loading)),
    )
}

/// Numbered links to each page of the list, `current` marked.
fn page_links(query: &QueryState, current: u32, last: u32) -> String {
    if last <= 1 {
        return String::new();
    }
    let mut html = String::from(r#"<nav class="pages">"#);
    for page in 1..=last {
        let nav = query.go_to_page(page);
        let _ = write!(
            html,
            r#"<a href="{}" data-history="{}"{}>{page}</a>"#,
            html_escape(&nav.href),
            nav.history.as_str(),
            if page == current { r#" aria-current="page""# } else { "" }
        );
    }
    html.push_str("</nav>");
    html
}

fn tabs_html(ctx: &RenderContext<'_>, query: &QueryState) -> String {
    let tabs = ctx.section.tabs();
    if tabs.is_empty() {
        return String::new();
    }
    let active = query.filters().kind;
    let mut html = String::from(r#"<nav class="tabs">"#);
    let all = query.update_params(&FilterPatch::new().remove(FilterKey::Type));
    let _ = write!(
        html,
        r#"<a href="{}"{}>{}</a>"#,
        html_escape(&all.href),
        if active.is_none() { r#" aria-current="page""# } else { "" },
        html_escape(ctx.locale.text(Message::All))
    );
    for tab in tabs {
        let nav = query.update_params(&FilterPatch::new().set(FilterKey::Type, tab.value));
        let current = active.as_deref() == Some(tab.value);
        let _ = write!(
            html,
            r#"<a href="{}"{}>{}</a>"#,
            html_escape(&nav.href),
            if current { r#" aria-current="page""# } else { "" },
            html_escape(tab.label(ctx.locale))
        );
    }
    html.push_str("</nav>");
    html
}

fn filter_form(ctx: &RenderContext<'_>, query: &QueryState) -> String {
    let schema = query.schema();
    let state = query.filters();
    let locale = ctx.locale;
    let mut fields = String::new();

    for key in schema.keys() {
        let value = html_escape(&state.get(*key).unwrap_or_default());
        match key {
            FilterKey::Search => {
                let label = html_escape(locale.text(Message::Search));
                let _ = write!(
                    fields,
                    r#"<input type="search" name="search" value="{value}" placeholder="{label}" aria-label="{label}">"#
                );
            }
            FilterKey::From | FilterKey::To => {
                let message = if *key == FilterKey::From { Message::From } else { Message::To };
                let _ = write!(
                    fields,
                    r#"<label>{label} <input type="date" name="{name}" value="{value}"></label>"#,
                    label = html_escape(locale.text(message)),
                    name = key.as_str(),
                );
            }
            FilterKey::CategorySlug | FilterKey::Tag | FilterKey::Type => {
                if !value.is_empty() {
                    let _ =
                        write!(fields, r#"<input type="hidden" name="{}" value="{value}">"#, key.as_str());
                }
            }
            FilterKey::Page => {}
        }
    }
    for (name, value) in query.unmanaged() {
        let _ = write!(
            fields,
            r#"<input type="hidden" name="{}" value="{}">"#,
            html_escape(name),
            html_escape(value)
        );
    }

    format!(
        r#"<form class="filters" method="get" action="{action}">{fields}<button type="submit">{submit}</button></form>"#,
        action = html_escape(query.path()),
        submit = html_escape(locale.text(Message::Search)),
    )
}

fn category_chips<T: Card>(ctx: &RenderContext<'_>, query: &QueryState, items: &[T]) -> String {
    if !query.schema().manages(FilterKey::CategorySlug) {
        return String::new();
    }
    let active = query.filters().category_slug;
    let mut seen = HashSet::new();
    let categories: Vec<_> = items
        .iter()
        .flat_map(Card::categories)
        .filter(|tag| seen.insert(tag.slug.as_str()))
        .collect();
    if categories.is_empty() && active.is_none() {
        return String::new();
    }

    let mut html = String::from(r#"<nav class="chips categories">"#);
    let all = query.update_params(&FilterPatch::new().remove(FilterKey::CategorySlug));
    let _ = write!(
        html,
        r#"<a class="chip" href="{}"{}>{}</a>"#,
        html_escape(&all.href),
        if active.is_none() { r#" aria-current="true""# } else { "" },
        html_escape(ctx.locale.text(Message::All))
    );
    for tag in categories {
        let nav = query.update_params(&FilterPatch::new().set(FilterKey::CategorySlug, &tag.slug));
        let current = active.as_deref() == Some(tag.slug.as_str());
        let _ = write!(
            html,
            r#"<a class="chip" href="{}"{}>{}</a>"#,
            html_escape(&nav.href),
            if current { r#" aria-current="true""# } else { "" },
            html_escape(tag.label())
        );
    }
    html.push_str("</nav>");
    html
}

/// Body of a list page.
#[must_use]
pub fn list_page<T: Card>(
    ctx: &RenderContext<'_>,
    query: &QueryState,
    resource: &PaginatedResource<T>,
    error_message: &str,
) -> String {
    let locale = ctx.locale;
    let state = query.filters();
    let clear_href = state.is_filtered().then(|| query.clear().href);

    let mut html = format!("<h1>{}</h1>", html_escape(ctx.section.title(locale)));
    html.push_str(&tabs_html(ctx, query));
    html.push_str(&filter_form(ctx, query));
    html.push_str(&category_chips(ctx, query, resource.items()));
    if let Some(href) = &clear_href {
        let _ = write!(
            html,
            r#"<a class="clear" href="{}">{}</a>"#,
            html_escape(href),
            html_escape(locale.text(Message::ClearFilters))
        );
    }

    html.push_str(r#"<section id="state">"#);
    match ViewState::of_resource(resource) {
        ViewState::Skeleton => html.push_str(&skeleton(SKELETON_CARDS)),
        ViewState::Failed => html.push_str(&error_block(locale, error_message, &query.href())),
        ViewState::Empty => html.push_str(&empty_block(locale, clear_href.as_deref())),
        ViewState::Content { has_more, loading_more } => {
            let _ = write!(
                html,
                r#"<p class="count" data-count>{}</p><div class="list" id="results">{}</div>"#,
                html_escape(&locale.count_label(resource.items().len(), resource.total())),
                items_html(ctx, resource.items())
            );
            if resource.error().is_some() {
                html.push_str(&error_block(locale, error_message, &query.href()));
            } else if has_more {
                html.push_str(&load_more_control(ctx, query, loading_more));
            }
            html.push_str(&page_links(query, resource.pages(), resource.last_page()));
        }
    }
    html.push_str("</section>");

    let _ = write!(html, r#"<template id="skeleton">{}</template>"#, skeleton(SKELETON_CARDS));
    html
}

/// Body of a detail page.
#[must_use]
pub fn detail_page<T: Card>(ctx: &RenderContext<'_>, item: &T) -> String {
    item.detail(ctx)
}

/// A home page preview block and the remote list behind it.
pub type HomeBlock<'a> = (Section, &'a RemoteData<ListResponse<ContentItem>>);

/// Body of the home page: one preview block per section.
#[must_use]
pub fn home_page(locale: Locale, placeholder: &str, blocks: &[HomeBlock<'_>], error_message: &str) -> String {
    let mut html = String::new();
    for &(section, remote) in blocks {
        let ctx = RenderContext { locale, section, placeholder };
        let _ = write!(
            html,
            r#"<section class="preview {}"><h2>{}</h2>"#,
            section.as_str(),
            html_escape(section.title(locale))
        );
        match ViewState::of_remote(remote, |list| list.data.is_empty()) {
            ViewState::Skeleton => html.push_str(&skeleton(HOME_PREVIEW)),
            ViewState::Failed => html.push_str(&error_block(locale, error_message, &format!("/{locale}"))),
            ViewState::Empty => html.push_str(&empty_block(locale, None)),
            ViewState::Content { .. } => {
                let items = remote.data().map(|list| list.data.as_slice()).unwrap_or_default();
                let shown = &items[..items.len().min(HOME_PREVIEW)];
                let _ = write!(html, r#"<div class="list">{}</div>"#, items_html(&ctx, shown));
                html.push_str(&read_more(&ctx));
            }
        }
        html.push_str("</section>");
    }
    html
}
