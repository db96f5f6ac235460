//! Search criteria and field model
//!
//! [`SearchCriteria`] is the raw, sparse request input. Resolution trims
//! blank strings to "unset" and coerces the year to an integer, producing
//! [`ResolvedCriteria`] which the rule table operates on.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{PlannerError, PlannerResult};
use crate::store::AttributeValue;

/// A searchable attribute of a music record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SearchField {
    Title,
    Album,
    Artist,
    Year,
}

impl SearchField {
    /// All fields, in record attribute order
    pub const ALL: [SearchField; 4] = [
        SearchField::Title,
        SearchField::Album,
        SearchField::Artist,
        SearchField::Year,
    ];

    /// Stored attribute name
    pub fn attribute(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Album => "album",
            SearchField::Artist => "artist",
            SearchField::Year => "year",
        }
    }

    /// Name of the single-attribute secondary index keyed on this field
    pub fn index_name(&self) -> &'static str {
        match self {
            SearchField::Title => "TitleIndex",
            SearchField::Album => "AlbumIndex",
            SearchField::Artist => "ArtistIndex",
            SearchField::Year => "YearIndex",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.attribute())
    }
}

/// Year as supplied by the caller, before integer coercion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearInput {
    Number(i64),
    Float(f64),
    Text(String),
    /// Any other JSON shape; never coerces, so the search is rejected
    Other(serde_json::Value),
}

impl YearInput {
    /// True for blank text, which counts as "not supplied"
    fn is_blank(&self) -> bool {
        matches!(self, YearInput::Text(s) if s.trim().is_empty())
    }

    /// Integer value of the input; numbers truncate toward zero, text must
    /// be an integer literal
    pub fn coerce(&self) -> Option<i64> {
        match self {
            YearInput::Number(n) => Some(*n),
            YearInput::Float(f) => {
                if f.is_finite() && f.abs() < i64::MAX as f64 {
                    Some(f.trunc() as i64)
                } else {
                    None
                }
            }
            YearInput::Text(s) => s.trim().parse().ok(),
            YearInput::Other(_) => None,
        }
    }
}

impl fmt::Display for YearInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearInput::Number(n) => write!(f, "{}", n),
            YearInput::Float(v) => write!(f, "{}", v),
            YearInput::Text(s) => write!(f, "{}", s),
            YearInput::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for YearInput {
    fn from(value: i64) -> Self {
        YearInput::Number(value)
    }
}

impl From<&str> for YearInput {
    fn from(value: &str) -> Self {
        YearInput::Text(value.to_string())
    }
}

/// Sparse search request: zero to four fields populated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<YearInput>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_year(mut self, year: impl Into<YearInput>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Drops blank fields and coerces the year.
    ///
    /// A supplied, non-blank year that is not an integer rejects the whole
    /// search; it is never silently dropped.
    pub fn resolve(&self) -> PlannerResult<ResolvedCriteria> {
        let year = match self.year.as_ref().filter(|y| !y.is_blank()) {
            None => None,
            Some(raw) => Some(
                raw.coerce()
                    .ok_or_else(|| PlannerError::invalid_year(raw.to_string()))?,
            ),
        };

        Ok(ResolvedCriteria {
            title: non_blank(&self.title),
            album: non_blank(&self.album),
            artist: non_blank(&self.artist),
            year,
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Criteria after resolution: every `Some` is a usable equality value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedCriteria {
    pub title: Option<String>,
    pub album: Option<String>,
    pub artist: Option<String>,
    pub year: Option<i64>,
}

impl ResolvedCriteria {
    /// Equality value for a field, if present
    pub fn value_of(&self, field: SearchField) -> Option<AttributeValue> {
        match field {
            SearchField::Title => self.title.clone().map(AttributeValue::S),
            SearchField::Album => self.album.clone().map(AttributeValue::S),
            SearchField::Artist => self.artist.clone().map(AttributeValue::S),
            SearchField::Year => self.year.map(AttributeValue::N),
        }
    }

    pub fn has(&self, field: SearchField) -> bool {
        match field {
            SearchField::Title => self.title.is_some(),
            SearchField::Album => self.album.is_some(),
            SearchField::Artist => self.artist.is_some(),
            SearchField::Year => self.year.is_some(),
        }
    }

    /// Present fields, in record attribute order
    pub fn present(&self) -> Vec<SearchField> {
        SearchField::ALL.into_iter().filter(|f| self.has(*f)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.present().is_empty()
    }
}
