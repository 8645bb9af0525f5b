//! Site sections and their filter schemas.
//!
//! Every list page is a [`Section`]: one API endpoint, one
//! [`FilterSchema`], one item shape. Handlers look sections up here instead
//! of hard-coding per-page fetch logic.

use crate::filters::{FilterKey, FilterSchema};
use crate::locale::Locale;

/// Which model a section's endpoint returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// [`ContentItem`](crate::models::ContentItem)
    Content,
    /// [`StaffProfile`](crate::models::StaffProfile)
    Staff,
    /// [`AcademicUnit`](crate::models::AcademicUnit)
    Unit,
}

/// A `type` tab on a multi-tab page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tab {
    /// Value of the `type` query parameter.
    pub value: &'static str,
    labels: [&'static str; 3],
}

impl Tab {
    const fn new(value: &'static str, en: &'static str, ar: &'static str, ku: &'static str) -> Self {
        Self { value, labels: [en, ar, ku] }
    }

    /// Localized tab label.
    #[must_use]
    pub const fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.labels[0],
            Locale::Ar => self.labels[1],
            Locale::Ku => self.labels[2],
        }
    }
}

const EVENT_TABS: &[Tab] = &[
    Tab::new("upcoming", "Upcoming", "القادمة", "داهاتوو"),
    Tab::new("past", "Past", "السابقة", "ڕابردوو"),
];

const DECISION_TABS: &[Tab] = &[
    Tab::new("decision", "Decisions", "القرارات", "بڕیارەکان"),
    Tab::new("instruction", "Instructions", "التعليمات", "ڕێنماییەکان"),
];

/// A list section of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    News,
    Events,
    Research,
    Staff,
    Colleges,
    Departments,
    Alumni,
    Internships,
    Decisions,
}

impl Section {
    /// Every section, in navigation order.
    pub const ALL: &'static [Self] = &[
        Self::News,
        Self::Events,
        Self::Research,
        Self::Staff,
        Self::Colleges,
        Self::Departments,
        Self::Alumni,
        Self::Internships,
        Self::Decisions,
    ];

    /// Path segment of the section.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Events => "events",
            Self::Research => "research",
            Self::Staff => "staff",
            Self::Colleges => "colleges",
            Self::Departments => "departments",
            Self::Alumni => "alumni",
            Self::Internships => "internships",
            Self::Decisions => "decisions",
        }
    }

    /// Section for a path segment.
    #[must_use]
    pub fn parse(segment: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == segment)
    }

    /// Content API endpoint, relative to the API base.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        self.as_str()
    }

    /// Query parameters the section's list page manages.
    #[must_use]
    pub const fn schema(self) -> FilterSchema {
        use FilterKey::{CategorySlug, From, Search, Tag, To, Type};
        match self {
            Self::News => FilterSchema::new(&[Search, CategorySlug, Tag, From, To]),
            Self::Events => FilterSchema::new(&[Search, From, To, Type]),
            Self::Research => FilterSchema::new(&[Search, CategorySlug, Tag]),
            Self::Staff | Self::Departments | Self::Internships => {
                FilterSchema::new(&[Search, CategorySlug])
            }
            Self::Colleges | Self::Alumni => FilterSchema::new(&[Search]),
            Self::Decisions => FilterSchema::new(&[Search, From, To, Type]),
        }
    }

    /// Model returned by the endpoint.
    #[must_use]
    pub const fn kind(self) -> ItemKind {
        match self {
            Self::Staff => ItemKind::Staff,
            Self::Colleges | Self::Departments => ItemKind::Unit,
            _ => ItemKind::Content,
        }
    }

    /// `type` tabs, empty for single-list sections.
    #[must_use]
    pub const fn tabs(self) -> &'static [Tab] {
        match self {
            Self::Events => EVENT_TABS,
            Self::Decisions => DECISION_TABS,
            _ => &[],
        }
    }

    /// Localized section title.
    #[must_use]
    pub const fn title(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::News, Locale::En) => "News",
            (Self::News, Locale::Ar) => "الأخبار",
            (Self::News, Locale::Ku) => "هەواڵەکان",

            (Self::Events, Locale::En) => "Events",
            (Self::Events, Locale::Ar) => "الفعاليات",
            (Self::Events, Locale::Ku) => "چالاکییەکان",

            (Self::Research, Locale::En) => "Research",
            (Self::Research, Locale::Ar) => "البحوث",
            (Self::Research, Locale::Ku) => "توێژینەوەکان",

            (Self::Staff, Locale::En) => "Academic Staff",
            (Self::Staff, Locale::Ar) => "الكادر التدريسي",
            (Self::Staff, Locale::Ku) => "ستافی ئەکادیمی",

            (Self::Colleges, Locale::En) => "Colleges",
            (Self::Colleges, Locale::Ar) => "الكليات",
            (Self::Colleges, Locale::Ku) => "کۆلێژەکان",

            (Self::Departments, Locale::En) => "Departments",
            (Self::Departments, Locale::Ar) => "الأقسام",
            (Self::Departments, Locale::Ku) => "بەشەکان",

            (Self::Alumni, Locale::En) => "Alumni",
            (Self::Alumni, Locale::Ar) => "الخريجون",
            (Self::Alumni, Locale::Ku) => "دەرچووان",

            (Self::Internships, Locale::En) => "Internships",
            (Self::Internships, Locale::Ar) => "التدريب الصيفي",
            (Self::Internships, Locale::Ku) => "ڕاهێنانی هاوینە",

            (Self::Decisions, Locale::En) => "Decisions & Instructions",
            (Self::Decisions, Locale::Ar) => "القرارات والتعليمات",
            (Self::Decisions, Locale::Ku) => "بڕیار و ڕێنماییەکان",
        }
    }

    /// Path of the list page in `locale`.
    #[must_use]
    pub fn path(self, locale: Locale) -> String {
        format!("/{locale}/{}", self.as_str())
    }

    /// Path of an entry's detail page in `locale`.
    #[must_use]
    pub fn detail_path(self, locale: Locale, slug: &str) -> String {
        format!("/{locale}/{}/{slug}", self.as_str())
    }

    /// Path of the "load more" fragment endpoint in `locale`.
    #[must_use]
    pub fn fragment_path(self, locale: Locale) -> String {
        format!("/fragments/{locale}/{}", self.as_str())
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sections previewed on the home page.
pub const HOME_SECTIONS: &[Section] = &[Section::News, Section::Events];
