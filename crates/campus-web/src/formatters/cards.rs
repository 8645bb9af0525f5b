//! Per-model list cards and detail views.

use std::fmt::Write;

use super::media::render_media;
use super::{RenderContext, html_escape};
use crate::accumulator::Identified;
use crate::filters::{DATE_FORMAT, FilterKey, FilterPatch, QueryState};
use crate::locale::Message;
use crate::models::{AcademicUnit, ContentItem, MediaSize, StaffProfile, Tag, UnitKind};

/// A model that can appear in a list and on its own detail page.
pub trait Card: Identified {
    /// Slug of the detail page.
    fn slug(&self) -> &str;

    /// Display title.
    fn heading(&self) -> &str;

    /// List entry markup.
    fn card(&self, ctx: &RenderContext<'_>) -> String;

    /// Detail page body markup.
    fn detail(&self, ctx: &RenderContext<'_>) -> String;

    /// Categories offered as filter chips on the list page.
    fn categories(&self) -> Vec<&Tag> {
        Vec::new()
    }
}

/// Link to the section list filtered by `key = value`, when the section
/// manages that key.
fn filter_href(ctx: &RenderContext<'_>, key: FilterKey, value: &str) -> Option<String> {
    let schema = ctx.section.schema();
    schema.manages(key).then(|| {
        QueryState::new(&ctx.section.path(ctx.locale), None, schema)
            .update_params(&FilterPatch::new().set(key, value))
            .href
    })
}

fn chip(ctx: &RenderContext<'_>, key: FilterKey, tag: &Tag) -> String {
    let label = html_escape(tag.label());
    match filter_href(ctx, key, &tag.slug) {
        Some(href) => format!(r#"<a class="chip" href="{}">{label}</a>"#, html_escape(&href)),
        None => format!(r#"<span class="chip">{label}</span>"#),
    }
}

/// Plain text as paragraphs. Blank lines separate paragraphs.
fn paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>", html_escape(p).replace('\n', "<br>")))
        .collect()
}

fn detail_link(ctx: &RenderContext<'_>, slug: &str, inner: &str) -> String {
    format!(
        r#"<a href="{}">{inner}</a>"#,
        html_escape(&ctx.section.detail_path(ctx.locale, slug))
    )
}

impl Card for ContentItem {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn heading(&self) -> &str {
        &self.title
    }

    fn card(&self, ctx: &RenderContext<'_>) -> String {
        let mut html = format!(r#"<article class="card" data-id="{}">"#, html_escape(self.id.as_str()));
        html.push_str(&detail_link(
            ctx,
            &self.slug,
            &render_media(self.cover(), MediaSize::Medium, &self.title, ctx.placeholder),
        ));
        html.push_str(r#"<div class="card-body">"#);
        if let Some(date) = self.published_date() {
            let date = date.format(DATE_FORMAT);
            let _ = write!(html, r#"<time datetime="{date}">{date}</time>"#);
        }
        let _ = write!(html, "<h3>{}</h3>", detail_link(ctx, &self.slug, &html_escape(&self.title)));
        if let Some(description) = self.description.as_deref().filter(|d| !d.trim().is_empty()) {
            let _ = write!(html, r#"<p class="excerpt">{}</p>"#, html_escape(description));
        }
        if let Some(category) = &self.category {
            html.push_str(&chip(ctx, FilterKey::CategorySlug, category));
        }
        for tag in &self.tags {
            html.push_str(&chip(ctx, FilterKey::Tag, tag));
        }
        html.push_str("</div></article>");
        html
    }

    fn detail(&self, ctx: &RenderContext<'_>) -> String {
        let mut html = format!("<article class=\"detail\"><h1>{}</h1>", html_escape(&self.title));

        let mut meta = Vec::new();
        if let Some(date) = self.published_date() {
            let date = date.format(DATE_FORMAT);
            meta.push(format!(r#"<time datetime="{date}">{date}</time>"#));
        }
        if let Some(author) = self.author.as_deref().filter(|a| !a.trim().is_empty()) {
            meta.push(format!(r#"<span class="author">{}</span>"#, html_escape(author)));
        }
        if !meta.is_empty() {
            let _ = write!(html, r#"<p class="meta">{}</p>"#, meta.join(" · "));
        }

        html.push_str(&render_media(self.cover(), MediaSize::Large, &self.title, ctx.placeholder));

        match (self.body.as_deref(), self.description.as_deref()) {
            (Some(body), _) if !body.trim().is_empty() => html.push_str(&paragraphs(body)),
            (_, Some(description)) => html.push_str(&paragraphs(description)),
            _ => {}
        }

        let gallery: Vec<_> = self.media.iter().skip(1).collect();
        if !gallery.is_empty() {
            html.push_str(r#"<div class="gallery">"#);
            for media in gallery {
                html.push_str(&render_media(Some(media), MediaSize::Medium, &self.title, ctx.placeholder));
            }
            html.push_str("</div>");
        }

        if self.category.is_some() || !self.tags.is_empty() {
            html.push_str(r#"<div class="chips">"#);
            if let Some(category) = &self.category {
                html.push_str(&chip(ctx, FilterKey::CategorySlug, category));
            }
            for tag in &self.tags {
                html.push_str(&chip(ctx, FilterKey::Tag, tag));
            }
            html.push_str("</div>");
        }

        html.push_str("</article>");
        html
    }

    fn categories(&self) -> Vec<&Tag> {
        self.category.iter().collect()
    }
}

impl Card for StaffProfile {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn heading(&self) -> &str {
        &self.full_name
    }

    fn card(&self, ctx: &RenderContext<'_>) -> String {
        let mut html = format!(r#"<article class="card staff" data-id="{}">"#, html_escape(self.id.as_str()));
        html.push_str(&detail_link(
            ctx,
            &self.slug,
            &render_media(self.photo.as_ref(), MediaSize::Small, &self.full_name, ctx.placeholder),
        ));
        let _ = write!(
            html,
            r#"<div class="card-body"><h3>{}</h3>"#,
            detail_link(ctx, &self.slug, &html_escape(&self.full_name))
        );
        if let Some(title) = &self.title {
            let _ = write!(html, r#"<p class="title">{}</p>"#, html_escape(title));
        }
        if let Some(department) = &self.department {
            let _ = write!(html, r#"<p class="department">{}</p>"#, html_escape(department));
        }
        html.push_str("</div></article>");
        html
    }

    fn detail(&self, ctx: &RenderContext<'_>) -> String {
        let mut html = String::from(r#"<article class="detail staff">"#);
        html.push_str(&render_media(self.photo.as_ref(), MediaSize::Large, &self.full_name, ctx.placeholder));
        let _ = write!(html, "<h1>{}</h1>", html_escape(&self.full_name));
        if let Some(title) = &self.title {
            let _ = write!(html, r#"<p class="title">{}</p>"#, html_escape(title));
        }
        if let Some(department) = &self.department {
            let _ = write!(html, r#"<p class="department">{}</p>"#, html_escape(department));
        }
        if let Some(email) = self.email.as_deref().filter(|e| e.contains('@')) {
            let email = html_escape(email);
            let _ = write!(html, r#"<p class="email"><a href="mailto:{email}">{email}</a></p>"#);
        }
        if let Some(bio) = &self.bio {
            html.push_str(&paragraphs(bio));
        }
        if !self.research_interests.is_empty() {
            html.push_str(r#"<ul class="interests">"#);
            for interest in &self.research_interests {
                let _ = write!(html, "<li>{}</li>", html_escape(interest));
            }
            html.push_str("</ul>");
        }
        html.push_str("</article>");
        html
    }
}

impl Card for AcademicUnit {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn heading(&self) -> &str {
        &self.name
    }

    fn card(&self, ctx: &RenderContext<'_>) -> String {
        let class = match self.kind {
            UnitKind::College => "college",
            UnitKind::Department => "department",
        };
        let mut html =
            format!(r#"<article class="card {class}" data-id="{}">"#, html_escape(self.id.as_str()));
        html.push_str(&detail_link(
            ctx,
            &self.slug,
            &render_media(self.image.as_ref(), MediaSize::Medium, &self.name, ctx.placeholder),
        ));
        let _ = write!(
            html,
            r#"<div class="card-body"><h3>{}</h3>"#,
            detail_link(ctx, &self.slug, &html_escape(&self.name))
        );
        if let Some(parent) = &self.parent {
            html.push_str(&chip(ctx, FilterKey::CategorySlug, parent));
        }
        html.push_str("</div></article>");
        html
    }

    fn detail(&self, ctx: &RenderContext<'_>) -> String {
        let mut html = format!(r#"<article class="detail unit"><h1>{}</h1>"#, html_escape(&self.name));
        if let Some(head) = &self.head {
            let _ = write!(html, r#"<p class="head">{}</p>"#, html_escape(head));
        }
        html.push_str(&render_media(self.image.as_ref(), MediaSize::Large, &self.name, ctx.placeholder));
        if let Some(description) = &self.description {
            html.push_str(&paragraphs(description));
        }
        if let Some(parent) = &self.parent {
            let _ = write!(
                html,
                r#"<p class="parent">{}</p>"#,
                chip(ctx, FilterKey::CategorySlug, parent)
            );
        }
        let _ = write!(
            html,
            r#"<p><a class="back" href="{}">{}</a></p>"#,
            html_escape(&ctx.section.path(ctx.locale)),
            html_escape(ctx.section.title(ctx.locale))
        );
        html.push_str("</article>");
        html
    }

    fn categories(&self) -> Vec<&Tag> {
        self.parent.iter().collect()
    }
}

/// "Read more" link used by home page previews.
#[must_use]
pub fn read_more(ctx: &RenderContext<'_>) -> String {
    format!(
        r#"<a class="read-more" href="{}">{}</a>"#,
        html_escape(&ctx.section.path(ctx.locale)),
        html_escape(ctx.locale.text(Message::ReadMore))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::models::{ItemId, MediaRef};
    use crate::pages::Section;

    fn ctx(section: Section) -> RenderContext<'static> {
        RenderContext { locale: Locale::En, section, placeholder: "/static/placeholder.svg" }
    }

    fn news() -> ContentItem {
        ContentItem {
            id: ItemId::new("7"),
            slug: "open-day".into(),
            title: "Open <Day>".into(),
            description: Some("Visit the campus".into()),
            published_at: Some("2024-03-01T09:00:00Z".into()),
            media: vec![MediaRef::image("https://cdn.example.edu/a.jpg")],
            tags: vec![Tag { slug: "admissions".into(), name: "Admissions".into() }],
            category: Some(Tag { slug: "campus".into(), name: String::new() }),
            ..ContentItem::default()
        }
    }

    #[test]
    fn test_content_card() {
        let html = news().card(&ctx(Section::News));
        assert!(html.contains(r#"href="/en/news/open-day""#));
        assert!(html.contains("Open &lt;Day&gt;"));
        assert!(html.contains(r#"<time datetime="2024-03-01">"#));
        assert!(html.contains(r#"href="/en/news?tag=admissions""#));
        assert!(html.contains(r#"href="/en/news?category_slug=campus">campus</a>"#));
    }

    #[test]
    fn test_unmanaged_tag_renders_as_plain_chip() {
        let html = news().card(&ctx(Section::Alumni));
        assert!(html.contains(r#"<span class="chip">Admissions</span>"#));
    }

    #[test]
    fn test_content_detail_prefers_body() {
        let mut item = news();
        item.body = Some("First.\n\nSecond line\ncontinued".into());
        let html = item.detail(&ctx(Section::News));
        assert!(html.contains("<p>First.</p><p>Second line<br>continued</p>"));
        assert!(!html.contains("Visit the campus"));
    }

    #[test]
    fn test_staff_card_without_photo_uses_placeholder() {
        let profile = StaffProfile {
            id: ItemId::new("s1"),
            slug: "dr-x".into(),
            full_name: "Dr. X".into(),
            ..StaffProfile::default()
        };
        let html = profile.card(&ctx(Section::Staff));
        assert!(html.contains(r#"src="/static/placeholder.svg""#));
        assert!(html.contains(r#"href="/en/staff/dr-x""#));
    }

    #[test]
    fn test_unit_detail_links_back_to_list() {
        let unit = AcademicUnit {
            id: ItemId::new("c1"),
            slug: "engineering".into(),
            name: "College of Engineering".into(),
            kind: UnitKind::College,
            ..AcademicUnit::default()
        };
        let html = unit.detail(&ctx(Section::Colleges));
        assert!(html.contains(r#"<a class="back" href="/en/colleges">Colleges</a>"#));
    }
}
