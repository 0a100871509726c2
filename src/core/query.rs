//! View inputs: filter criteria, sort specification and page state

use crate::core::error::ViewError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page size used before the user picks one
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// User-specified predicates, combined with logical AND
///
/// An empty string places no constraint on its field.
///
/// - `name`, `species`: case-insensitive substring match
/// - `status`, `gender`: case-insensitive exact match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub name: String,
    pub status: String,
    pub species: String,
    pub gender: String,
}

impl FilterCriteria {
    /// True when no field constrains the result
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.status.is_empty()
            && self.species.is_empty()
            && self.gender.is_empty()
    }

    /// Overwrite the fields present in `patch`, keeping the others
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(species) = patch.species {
            self.species = species;
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
    }

    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Name => &self.name,
            FilterField::Status => &self.status,
            FilterField::Species => &self.species,
            FilterField::Gender => &self.gender,
        }
    }
}

/// A partial update to [`FilterCriteria`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterPatch {
    pub name: Option<String>,
    pub status: Option<String>,
    pub species: Option<String>,
    pub gender: Option<String>,
}

impl FilterPatch {
    /// Patch touching a single field
    pub fn field(field: FilterField, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match field {
            FilterField::Name => Self {
                name: value,
                ..Self::default()
            },
            FilterField::Status => Self {
                status: value,
                ..Self::default()
            },
            FilterField::Species => Self {
                species: value,
                ..Self::default()
            },
            FilterField::Gender => Self {
                gender: value,
                ..Self::default()
            },
        }
    }
}

/// The four filterable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterField {
    Name,
    Status,
    Species,
    Gender,
}

impl FromStr for FilterField {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(FilterField::Name),
            "status" => Ok(FilterField::Status),
            "species" => Ok(FilterField::Species),
            "gender" => Ok(FilterField::Gender),
            _ => Err(ViewError::InvalidFilterField {
                field: s.to_string(),
            }),
        }
    }
}

/// Fields the view can be ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Id,
    Name,
    Status,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Status => "status",
        }
    }
}

impl FromStr for SortField {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "status" => Ok(SortField::Status),
            other => Err(ViewError::InvalidSort {
                input: s.to_string(),
                message: format!("'{}' is not one of id, name, status", other),
            }),
        }
    }
}

/// Ordering direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(ViewError::InvalidSort {
                input: s.to_string(),
                message: format!("'{}' is not a sort direction", other),
            }),
        }
    }
}

/// Field and direction defining the display order
///
/// # Format
/// - `field` (ascending)
/// - `field-asc`, `field-desc`
/// - `field:asc`, `field:desc`
///
/// # Example
/// ```
/// use character_view::core::query::{SortDirection, SortField, SortSpec};
///
/// let spec: SortSpec = "name-desc".parse().unwrap();
/// assert_eq!(spec.field, SortField::Name);
/// assert_eq!(spec.direction, SortDirection::Desc);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

impl FromStr for SortSpec {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(['-', ':']) {
            Some((field, direction)) => (field, Some(direction)),
            None => (s, None),
        };

        let wrap = |err: ViewError| match err {
            ViewError::InvalidSort { message, .. } => ViewError::InvalidSort {
                input: s.to_string(),
                message,
            },
            other => other,
        };

        let field = field.parse::<SortField>().map_err(wrap)?;
        let direction = match direction {
            Some(d) => d.parse::<SortDirection>().map_err(wrap)?,
            None => SortDirection::Asc,
        };

        Ok(Self { field, direction })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.field.as_str(), self.direction.as_str())
    }
}

/// Requested page: size and 1-based index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub page_size: usize,
    pub page_index: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_index: 1,
        }
    }
}
