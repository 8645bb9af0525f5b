//! Image and video markup with placeholder fallback.
//!
//! A slot resolves to the placeholder when the reference is missing or no
//! variant is a loadable URL. Otherwise the rendered tag carries an
//! `onerror` hook that swaps in the placeholder once and then disarms
//! itself, so a URL that fails in the browser ends up in the same place.

use super::html_escape;
use crate::models::{MediaKind, MediaRef, MediaSize};

/// Render the media slot for `media` at `size`.
#[must_use]
pub fn render_media(media: Option<&MediaRef>, size: MediaSize, alt: &str, placeholder: &str) -> String {
    let resolved = match media {
        Some(media) => media.resolve(size, placeholder),
        None => crate::models::ResolvedMedia::placeholder(placeholder),
    };
    let src = html_escape(&resolved.src);
    let alt = html_escape(alt);

    if resolved.is_placeholder {
        return format!(r#"<img class="media placeholder" src="{src}" alt="{alt}" loading="lazy">"#);
    }

    let fallback = fallback_hook(placeholder);
    match resolved.kind {
        MediaKind::Image => format!(
            r#"<img class="media" src="{src}" alt="{alt}" loading="lazy" onerror="{fallback}">"#
        ),
        MediaKind::Video => format!(
            r#"<video class="media" src="{src}" controls preload="metadata" poster="{poster}" aria-label="{alt}" onerror="{fallback_poster}"></video>"#,
            poster = html_escape(placeholder),
            fallback_poster = html_escape(&format!(
                "this.onerror=null;this.removeAttribute('src');this.poster='{}'",
                js_string(placeholder)
            )),
        ),
    }
}

fn fallback_hook(placeholder: &str) -> String {
    html_escape(&format!("this.onerror=null;this.src='{}'", js_string(placeholder)))
}

/// Escape a value for a single-quoted JS string literal.
fn js_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
