//! Academic staff profile.

use serde::{Deserialize, Serialize};

use super::{ItemId, MediaRef, Validate, check_slug, require};
use crate::error::SchemaError;

/// A member of the academic staff.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffProfile {
    /// Unique identifier.
    pub id: ItemId,

    /// URL slug for the profile page.
    #[serde(default)]
    pub slug: String,

    /// Full name in the requested locale.
    #[serde(default, alias = "name")]
    pub full_name: String,

    /// Academic rank (e.g. "Assistant Professor").
    #[serde(default, alias = "academic_title")]
    pub title: Option<String>,

    /// Department name.
    #[serde(default)]
    pub department: Option<String>,

    /// Contact address.
    #[serde(default)]
    pub email: Option<String>,

    /// Portrait.
    #[serde(default, alias = "image")]
    pub photo: Option<MediaRef>,

    /// Biography, only present on detail responses.
    #[serde(default, alias = "biography")]
    pub bio: Option<String>,

    /// Research interests.
    #[serde(default)]
    pub research_interests: Vec<String>,
}

impl Validate for StaffProfile {
    fn validate(&self) -> Result<(), SchemaError> {
        require("id", self.id.as_str())?;
        check_slug(&self.slug)?;
        require("full_name", &self.full_name)
    }
}
