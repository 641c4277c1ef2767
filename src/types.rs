use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A normalized, displayable news record.
///
/// By the time one of these exists, `hashtags`, `image_urls` and
/// `external_links` are guaranteed to be real sequences: the normalization
/// boundary in [`crate::normalize`] has already dealt with JSON columns that
/// the store may hand back as text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: i64,
    pub user_id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub hashtags: Vec<String>,
    pub image_urls: Vec<String>,
    pub external_links: Vec<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// An unpublished draft owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub id: i64,
    pub user_id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub hashtags: Vec<String>,
    pub image_urls: Vec<String>,
    pub external_links: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields for creating a news item. Title and content are mandatory at the
/// manager level; the array fields may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewNewsItem {
    pub title: String,
    pub content: String,
    pub hashtags: Option<Vec<String>>,
    pub image_urls: Option<Vec<String>>,
    pub external_links: Option<Vec<String>>,
}

/// Partial update of a news item. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsItemPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub hashtags: Option<Vec<String>>,
    pub image_urls: Option<Vec<String>>,
    pub external_links: Option<Vec<String>>,
}

impl NewsItemPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.hashtags.is_none()
            && self.image_urls.is_none()
            && self.external_links.is_none()
    }
}

/// Fields for creating a draft. Everything is optional; a draft is allowed
/// to be empty until it is published.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub hashtags: Option<Vec<String>>,
    pub image_urls: Option<Vec<String>>,
    pub external_links: Option<Vec<String>>,
}

/// Partial update of a draft. Shares the patch shape with news items.
pub type DraftPatch = NewsItemPatch;

/// Faculty selector for the feed filter. Parsed from the UI sentinels:
/// `"All Faculty"` disables the stage, `"Others"` selects authors outside
/// the roster, anything else is an exact faculty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacultyFilter {
    All,
    Others,
    Name(String),
}

impl FacultyFilter {
    pub fn parse(value: &str) -> Self {
        match value {
            "All Faculty" => FacultyFilter::All,
            "Others" => FacultyFilter::Others,
            other => FacultyFilter::Name(other.to_string()),
        }
    }
}

/// A named relative date window, as opposed to an explicit start/end pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickRange {
    All,
    Today,
    /// Rolling seven days back from now.
    LastWeek,
    /// One calendar month back from now, not a fixed 30 days. Month
    /// subtraction clamps to the end of shorter months, so the window length
    /// varies with the calendar.
    LastMonth,
}

impl QuickRange {
    /// Unknown values fall back to `All`, which is a pass-through.
    pub fn parse(value: &str) -> Self {
        match value {
            "today" => QuickRange::Today,
            "week" | "last-7-days" => QuickRange::LastWeek,
            "month" | "last-30-days" => QuickRange::LastMonth,
            _ => QuickRange::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    NewestFirst,
    OldestFirst,
    TitleAsc,
    TitleDesc,
}

impl OrderBy {
    /// Unrecognized values become `None`, which the sort stage treats as
    /// "preserve current order" rather than an error.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "newest" | "newest-first" => Some(OrderBy::NewestFirst),
            "oldest" | "oldest-first" => Some(OrderBy::OldestFirst),
            "title-az" | "title-ascending" => Some(OrderBy::TitleAsc),
            "title-za" | "title-descending" => Some(OrderBy::TitleDesc),
            _ => None,
        }
    }
}

/// The user-selected search/filter/sort configuration for one feed view.
/// Lives only in UI state; there is no persistence.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    pub search: String,
    pub faculty: FacultyFilter,
    pub date_range: QuickRange,
    /// When both bounds are present, the explicit closed interval overrides
    /// `date_range`.
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    pub order_by: Option<OrderBy>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            faculty: FacultyFilter::All,
            date_range: QuickRange::All,
            date_start: None,
            date_end: None,
            order_by: Some(OrderBy::NewestFirst),
        }
    }
}

/// Known faculty names used to bucket the "Others" selection. Callers pass
/// a roster into [`crate::FeedFilter`] explicitly; this is just the default.
pub const DEFAULT_FACULTIES: &[&str] = &["Materials Science", "Engineering", "Research"];

#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Covers both "no such row" and "row owned by someone else"; the two
    /// are deliberately indistinguishable to the caller.
    #[error("News item not found: {id}")]
    ItemNotFound { id: i64 },

    #[error("Draft not found: {id}")]
    DraftNotFound { id: i64 },

    /// Distinct from not-found: the draft exists but fails the publish
    /// precondition (empty title or content).
    #[error("Draft {id} has no title or content to publish")]
    EmptyDraft { id: i64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, PortalError>;
