//! HTTP routes.
//!
//! Every handler derives its state from the request path and query, fetches
//! what it needs from the content API, and renders. Nothing is shared
//! between requests except the client and its cache.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::de::DeserializeOwned;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::client::{ApiRequest, ContentSource, RemoteData};
use crate::config::Config;
use crate::error::PageError;
use crate::filters::{FilterState, QueryState};
use crate::formatters::html::{self, HOME_PREVIEW, Layout};
use crate::formatters::{Card, RenderContext, json};
use crate::locale::{Locale, Message};
use crate::models::{AcademicUnit, ContentItem, ListResponse, StaffProfile, Validate, check_slug};
use crate::pages::{HOME_SECTIONS, ItemKind, Section};
use crate::resource::PaginatedResource;

/// Served at `/static/placeholder.svg`.
pub const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="640" height="400" viewBox="0 0 640 400"><rect width="640" height="400" fill="#e5e7eb"/><path d="M260 250l50-60 40 45 30-30 60 75H200z" fill="#9ca3af"/><circle cx="250" cy="160" r="22" fill="#9ca3af"/></svg>"##;

/// Shared state for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Content API.
    pub source: Arc<dyn ContentSource>,
    /// Site configuration.
    pub config: Arc<Config>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").field("api", &self.config.api_base_url).finish()
    }
}

/// Create the HTTP router for the site.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_redirect))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/static/placeholder.svg", get(placeholder))
        .route("/fragments/{locale}/{section}", get(handle_fragment))
        .route("/{locale}", get(handle_home))
        .route("/{locale}/{section}", get(handle_list))
        .route("/{locale}/{section}/{slug}", get(handle_detail))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "campus-web",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ready",
        "service": "campus-web",
        "version": env!("CARGO_PKG_VERSION"),
        "api": state.config.api_base_url,
        "defaultLocale": state.config.default_locale,
        "sections": Section::ALL.len()
    }))
}

async fn placeholder() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/svg+xml"), (header::CACHE_CONTROL, "public, max-age=86400")],
        PLACEHOLDER_SVG,
    )
}

/// Redirect `/` to the visitor's preferred supported locale.
async fn root_redirect(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    let preferred = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(preferred_locale)
        .unwrap_or(state.config.default_locale);
    Redirect::to(&format!("/{preferred}"))
}

/// First supported language in an `Accept-Language` value, in listed order.
fn preferred_locale(accept_language: &str) -> Option<Locale> {
    accept_language
        .split(',')
        .filter_map(|entry| entry.split(';').next())
        .find_map(Locale::parse)
}

fn parse_locale(raw: &str) -> Result<Locale, PageError> {
    Locale::parse(raw).ok_or_else(|| PageError::UnknownLocale(raw.to_string()))
}

fn parse_section(raw: &str) -> Result<Section, PageError> {
    Section::parse(raw).ok_or_else(|| PageError::UnknownSection(raw.to_string()))
}

fn html_response(status: StatusCode, layout: &Layout<'_>, body: &str) -> Response {
    (status, Html(html::render_page(layout, body))).into_response()
}

/// Not-found page for a path that names no locale or section.
fn page_error(state: &AppState, locale: Option<Locale>, err: &PageError) -> Response {
    let locale = locale.unwrap_or(state.config.default_locale);
    tracing::debug!(error = %err, "no page for path");
    let title = err.to_user_message(locale);
    html_response(
        err.status(),
        &Layout { locale, title, alternate: "" },
        &html::not_found_block(locale),
    )
}

/// The part of a site path after its locale segment.
fn after_locale(path: &str, locale: Locale) -> &str {
    path.strip_prefix('/')
        .and_then(|p| p.strip_prefix(locale.as_str()))
        .unwrap_or(path)
}

async fn handle_home(State(state): State<AppState>, Path(raw_locale): Path<String>) -> Response {
    let locale = match parse_locale(&raw_locale) {
        Ok(locale) => locale,
        Err(err) => return page_error(&state, None, &err),
    };
    if raw_locale != locale.as_str() {
        return Redirect::to(&format!("/{locale}")).into_response();
    }

    let preview = FilterState::default();
    let mut remotes: Vec<RemoteData<ListResponse<ContentItem>>> =
        HOME_SECTIONS.iter().map(|_| RemoteData::new()).collect();
    futures::future::join_all(remotes.iter_mut().zip(HOME_SECTIONS).map(|(remote, section)| {
        let request = ApiRequest::new(
            section.endpoint(),
            preview.api_params(section.schema(), 1, HOME_PREVIEW as u32),
        );
        remote.load(state.source.as_ref(), request, locale)
    }))
    .await;

    let blocks: Vec<_> = HOME_SECTIONS.iter().copied().zip(remotes.iter()).collect();
    let body = html::home_page(
        locale,
        &state.config.placeholder_url,
        &blocks,
        locale.text(Message::ErrorTitle),
    );
    html_response(
        StatusCode::OK,
        &Layout { locale, title: locale.text(Message::Home), alternate: "" },
        &body,
    )
}

async fn handle_list(
    State(state): State<AppState>,
    Path((raw_locale, raw_section)): Path<(String, String)>,
    RawQuery(raw_query): RawQuery,
) -> Response {
    let locale = match parse_locale(&raw_locale) {
        Ok(locale) => locale,
        Err(err) => return page_error(&state, None, &err),
    };
    let section = match parse_section(&raw_section) {
        Ok(section) => section,
        Err(err) => return page_error(&state, Some(locale), &err),
    };

    let path = section.path(locale);
    let query = QueryState::new(&path, raw_query.as_deref(), section.schema());
    let canonical = query.href();
    let requested = match raw_query.as_deref() {
        Some(q) if !q.is_empty() => format!("{path}?{q}"),
        _ => path.clone(),
    };
    if raw_locale != locale.as_str() || canonical != requested {
        tracing::debug!(%requested, %canonical, "redirecting to canonical URL");
        return Redirect::to(&canonical).into_response();
    }
    let filters = query.filters();
    let max_page = state.config.max_page.max(1);
    if filters.page > max_page {
        let capped = query.href_for(&FilterState { page: max_page, ..filters });
        tracing::debug!(%requested, %capped, "page beyond cap");
        return Redirect::to(&capped).into_response();
    }

    match section.kind() {
        ItemKind::Content => render_list::<ContentItem>(&state, locale, section, &query).await,
        ItemKind::Staff => render_list::<StaffProfile>(&state, locale, section, &query).await,
        ItemKind::Unit => render_list::<AcademicUnit>(&state, locale, section, &query).await,
    }
}

fn list_resource<T: Card>(state: &AppState, section: Section) -> PaginatedResource<T> {
    PaginatedResource::new(section.endpoint(), section.schema(), state.config.page_limit)
        .with_max_page(state.config.max_page)
}

async fn render_list<T>(state: &AppState, locale: Locale, section: Section, query: &QueryState) -> Response
where
    T: Card + DeserializeOwned + Validate + Send + Sync,
{
    let mut resource = list_resource::<T>(state, section);
    resource.load(state.source.as_ref(), &query.filters(), locale).await;

    let ctx = RenderContext { locale, section, placeholder: &state.config.placeholder_url };
    let (status, message) = match resource.error() {
        Some(err) if resource.items().is_empty() => (err.status(), err.to_user_message(locale)),
        Some(err) => (StatusCode::OK, err.to_user_message(locale)),
        None => (StatusCode::OK, locale.text(Message::ErrorTitle)),
    };
    let body = html::list_page(&ctx, query, &resource, message);
    let href = query.href();
    html_response(
        status,
        &Layout { locale, title: section.title(locale), alternate: after_locale(&href, locale) },
        &body,
    )
}

async fn handle_fragment(
    State(state): State<AppState>,
    Path((raw_locale, raw_section)): Path<(String, String)>,
    RawQuery(raw_query): RawQuery,
) -> Response {
    let parsed = parse_locale(&raw_locale).and_then(|l| parse_section(&raw_section).map(|s| (l, s)));
    let (locale, section) = match parsed {
        Ok(pair) => pair,
        Err(err) => {
            let locale = Locale::parse(&raw_locale).unwrap_or(state.config.default_locale);
            return (err.status(), Json(json::fragment_error(err.to_user_message(locale), false)))
                .into_response();
        }
    };

    let query = QueryState::new(&section.path(locale), raw_query.as_deref(), section.schema());
    match section.kind() {
        ItemKind::Content => render_fragment::<ContentItem>(&state, locale, section, &query).await,
        ItemKind::Staff => render_fragment::<StaffProfile>(&state, locale, section, &query).await,
        ItemKind::Unit => render_fragment::<AcademicUnit>(&state, locale, section, &query).await,
    }
}

/// Load the pages before the requested one, then the requested page, and
/// answer with only the items that page added.
async fn render_fragment<T>(
    state: &AppState,
    locale: Locale,
    section: Section,
    query: &QueryState,
) -> Response
where
    T: Card + DeserializeOwned + Validate + Send + Sync,
{
    let filters = query.filters();
    let mut resource = list_resource::<T>(state, section);
    let source = state.source.as_ref();

    if filters.page > 1 {
        let previous = FilterState { page: filters.page - 1, ..filters.clone() };
        resource.load(source, &previous, locale).await;
    }
    let appended = if resource.error().is_none() {
        resource.load(source, &filters, locale).await
    } else {
        0..0
    };

    if let Some(err) = resource.error() {
        return (err.status(), Json(json::fragment_error(err.to_user_message(locale), err.is_retryable())))
            .into_response();
    }

    let ctx = RenderContext { locale, section, placeholder: &state.config.placeholder_url };
    Json(json::fragment(&ctx, query, &resource, appended)).into_response()
}

async fn handle_detail(
    State(state): State<AppState>,
    Path((raw_locale, raw_section, slug)): Path<(String, String, String)>,
) -> Response {
    let locale = match parse_locale(&raw_locale) {
        Ok(locale) => locale,
        Err(err) => return page_error(&state, None, &err),
    };
    let section = match parse_section(&raw_section) {
        Ok(section) => section,
        Err(err) => return page_error(&state, Some(locale), &err),
    };
    if check_slug(&slug).is_err() {
        let err = PageError::from(crate::error::ClientError::not_found(slug));
        return page_error(&state, Some(locale), &err);
    }

    match section.kind() {
        ItemKind::Content => render_detail::<ContentItem>(&state, locale, section, &slug).await,
        ItemKind::Staff => render_detail::<StaffProfile>(&state, locale, section, &slug).await,
        ItemKind::Unit => render_detail::<AcademicUnit>(&state, locale, section, &slug).await,
    }
}

async fn render_detail<T>(state: &AppState, locale: Locale, section: Section, slug: &str) -> Response
where
    T: Card + DeserializeOwned + Validate + Send + Sync,
{
    let mut remote = RemoteData::<T>::new();
    remote
        .load(state.source.as_ref(), ApiRequest::detail(section.endpoint(), slug), locale)
        .await;

    let ctx = RenderContext { locale, section, placeholder: &state.config.placeholder_url };
    let path = section.detail_path(locale, slug);
    let alternate = after_locale(&path, locale);

    match (remote.data(), remote.error()) {
        (Some(item), _) => html_response(
            StatusCode::OK,
            &Layout { locale, title: item.heading(), alternate },
            &html::detail_page(&ctx, item),
        ),
        (None, Some(err)) if err.is_not_found() => html_response(
            StatusCode::NOT_FOUND,
            &Layout { locale, title: err.to_user_message(locale), alternate },
            &html::not_found_block(locale),
        ),
        (None, Some(err)) => html_response(
            err.status(),
            &Layout { locale, title: err.to_user_message(locale), alternate },
            &html::error_block(locale, err.to_user_message(locale), &path),
        ),
        (None, None) => html_response(
            StatusCode::NOT_FOUND,
            &Layout { locale, title: locale.text(Message::NotFound), alternate },
            &html::not_found_block(locale),
        ),
    }
}
