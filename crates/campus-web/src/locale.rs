//! Supported site locales and the UI string catalogue.
//!
//! Content itself is localized by the API (selected through the locale
//! header); this module only covers the strings the templates print around it.

use serde::{Deserialize, Serialize};

/// A locale the site is published in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (default).
    #[default]
    En,
    /// Arabic.
    Ar,
    /// Kurdish (Sorani).
    Ku,
}

/// Every supported locale, in language-switcher order.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ar, Locale::Ku];

impl Locale {
    /// Path segment and header value for this locale.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
            Self::Ku => "ku",
        }
    }

    /// Parse a locale code, case-insensitive and tolerant of region tags.
    ///
    /// `ckb` (the ISO 639-3 code for Sorani) is accepted as Kurdish.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "ar" => Some(Self::Ar),
            "ku" | "ckb" => Some(Self::Ku),
            _ => None,
        }
    }

    /// Whether text in this locale runs right to left.
    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Ar | Self::Ku)
    }

    /// Value for the HTML `dir` attribute.
    #[must_use]
    pub const fn dir(self) -> &'static str {
        if self.is_rtl() { "rtl" } else { "ltr" }
    }

    /// Name of the language in itself, for the language switcher.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Ar => "العربية",
            Self::Ku => "کوردی",
        }
    }

    /// Look up a UI string.
    #[must_use]
    pub const fn text(self, message: Message) -> &'static str {
        use Message as M;
        match (self, message) {
            (Self::En, M::Home) => "Home",
            (Self::Ar, M::Home) => "الرئيسية",
            (Self::Ku, M::Home) => "سەرەکی",

            (Self::En, M::LoadMore) => "Load more",
            (Self::Ar, M::LoadMore) => "تحميل المزيد",
            (Self::Ku, M::LoadMore) => "زیاتر باربکە",

            (Self::En, M::Loading) => "Loading…",
            (Self::Ar, M::Loading) => "جارٍ التحميل…",
            (Self::Ku, M::Loading) => "بارکردن…",

            (Self::En, M::Retry) => "Try again",
            (Self::Ar, M::Retry) => "حاول مرة أخرى",
            (Self::Ku, M::Retry) => "دووبارە هەوڵبدەرەوە",

            (Self::En, M::ErrorTitle) => "Something went wrong",
            (Self::Ar, M::ErrorTitle) => "حدث خطأ ما",
            (Self::Ku, M::ErrorTitle) => "هەڵەیەک ڕوویدا",

            (Self::En, M::EmptyTitle) => "No results found",
            (Self::Ar, M::EmptyTitle) => "لا توجد نتائج",
            (Self::Ku, M::EmptyTitle) => "هیچ ئەنجامێک نەدۆزرایەوە",

            (Self::En, M::ClearFilters) => "Clear filters",
            (Self::Ar, M::ClearFilters) => "مسح عوامل التصفية",
            (Self::Ku, M::ClearFilters) => "سڕینەوەی فلتەرەکان",

            (Self::En, M::Search) => "Search",
            (Self::Ar, M::Search) => "بحث",
            (Self::Ku, M::Search) => "گەڕان",

            (Self::En, M::From) => "From",
            (Self::Ar, M::From) => "من",
            (Self::Ku, M::From) => "لە",

            (Self::En, M::To) => "To",
            (Self::Ar, M::To) => "إلى",
            (Self::Ku, M::To) => "بۆ",

            (Self::En, M::All) => "All",
            (Self::Ar, M::All) => "الكل",
            (Self::Ku, M::All) => "هەمووی",

            (Self::En, M::NotFound) => "Page not found",
            (Self::Ar, M::NotFound) => "الصفحة غير موجودة",
            (Self::Ku, M::NotFound) => "پەڕەکە نەدۆزرایەوە",

            (Self::En, M::ReadMore) => "Read more",
            (Self::Ar, M::ReadMore) => "اقرأ المزيد",
            (Self::Ku, M::ReadMore) => "زیاتر بخوێنەوە",

            (Self::En, M::Of) => "of",
            (Self::Ar, M::Of) => "من",
            (Self::Ku, M::Of) => "لە",
        }
    }

    /// "Showing N of M" style result counter.
    #[must_use]
    pub fn count_label(self, shown: usize, total: u64) -> String {
        format!("{shown} {} {total}", self.text(Message::Of))
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unsupported locale '{s}' (expected en, ar or ku)"))
    }
}

/// Keys of the UI string catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Home,
    LoadMore,
    Loading,
    Retry,
    ErrorTitle,
    EmptyTitle,
    ClearFilters,
    Search,
    From,
    To,
    All,
    NotFound,
    ReadMore,
    Of,
}
