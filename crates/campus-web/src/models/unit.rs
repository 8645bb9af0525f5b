//! Colleges and departments.

use serde::{Deserialize, Serialize};

use super::{ItemId, MediaRef, Tag, Validate, check_slug, require};
use crate::error::SchemaError;

/// Organizational level of an academic unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    College,
    #[default]
    Department,
}

/// A college or department.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AcademicUnit {
    /// Unique identifier.
    pub id: ItemId,

    /// URL slug for the unit page.
    #[serde(default)]
    pub slug: String,

    /// Name in the requested locale.
    #[serde(default, alias = "title")]
    pub name: String,

    /// College or department.
    #[serde(default, alias = "type")]
    pub kind: UnitKind,

    /// Overview text.
    #[serde(default)]
    pub description: Option<String>,

    /// Banner image.
    #[serde(default, alias = "cover")]
    pub image: Option<MediaRef>,

    /// Dean or head of department.
    #[serde(default, alias = "dean")]
    pub head: Option<String>,

    /// Owning college, for departments.
    #[serde(default, alias = "college")]
    pub parent: Option<Tag>,
}

impl Validate for AcademicUnit {
    fn validate(&self) -> Result<(), SchemaError> {
        require("id", self.id.as_str())?;
        check_slug(&self.slug)?;
        require("name", &self.name)?;
        if let Some(parent) = &self.parent {
            parent.validate()?;
        }
        Ok(())
    }
}
