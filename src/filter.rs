//! The feed filter engine.
//!
//! A pure, synchronous mapping from (item list, criteria) to the ordered
//! subset to display. The presentation layer re-invokes it on every
//! keystroke or filter change against the latest in-memory snapshot; it
//! holds no ambient state and never mutates its input.

use chrono::{DateTime, Months, NaiveDateTime, Utc};

use crate::types::{FacultyFilter, FeedItem, FilterCriteria, OrderBy, QuickRange};

/// Stateless filter over feed items, configured with the faculty roster
/// used to bucket the "Others" selection.
#[derive(Debug, Clone)]
pub struct FeedFilter {
    roster: Vec<String>,
}

impl FeedFilter {
    pub fn new<S: Into<String>>(roster: impl IntoIterator<Item = S>) -> Self {
        Self {
            roster: roster.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_default_roster() -> Self {
        Self::new(crate::types::DEFAULT_FACULTIES.iter().copied())
    }

    /// Apply all stages in fixed order: search, faculty, date, then sort.
    /// Each stage narrows the candidate set before the next; the sort is
    /// always last and always runs. Returns a newly allocated list; an
    /// empty result is valid, not an error.
    ///
    /// `now` anchors the quick date ranges, injected by the caller so the
    /// engine stays deterministic.
    pub fn apply(
        &self,
        items: &[FeedItem],
        criteria: &FilterCriteria,
        now: DateTime<Utc>,
    ) -> Vec<FeedItem> {
        let mut out: Vec<FeedItem> = items
            .iter()
            .filter(|item| self.matches_search(item, &criteria.search))
            .filter(|item| self.matches_faculty(item, &criteria.faculty))
            .filter(|item| matches_date(item, criteria, now))
            .cloned()
            .collect();

        sort_items(&mut out, criteria.order_by);
        out
    }

    fn matches_search(&self, item: &FeedItem, search: &str) -> bool {
        // Trimming applies only to the pass-through check; the substring
        // match keeps the query's own whitespace.
        if search.trim().is_empty() {
            return true;
        }
        let query = search.to_lowercase();

        let title = item.title.as_deref().unwrap_or("").to_lowercase();
        let content = item.content.as_deref().unwrap_or("").to_lowercase();
        let tags = item.hashtags.join(" ").to_lowercase();
        let author = item.author_name.as_deref().unwrap_or("").to_lowercase();

        title.contains(&query)
            || content.contains(&query)
            || tags.contains(&query)
            || author.contains(&query)
    }

    fn matches_faculty(&self, item: &FeedItem, faculty: &FacultyFilter) -> bool {
        let author = item.author_name.as_deref().unwrap_or("").trim();
        match faculty {
            FacultyFilter::All => true,
            FacultyFilter::Others => {
                !author.is_empty() && !self.roster.iter().any(|name| name == author)
            }
            FacultyFilter::Name(name) => author == name,
        }
    }
}

fn matches_date(item: &FeedItem, criteria: &FilterCriteria, now: DateTime<Utc>) -> bool {
    // An explicit start/end pair overrides the quick range. The interval is
    // closed on both ends; start > end simply matches nothing.
    if let (Some(start), Some(end)) = (criteria.date_start, criteria.date_end) {
        let created = match item.created_at {
            Some(t) => t.naive_utc(),
            None => return false,
        };
        let lo: NaiveDateTime = match start.and_hms_opt(0, 0, 0) {
            Some(t) => t,
            None => return false,
        };
        let hi: NaiveDateTime = match end.and_hms_milli_opt(23, 59, 59, 999) {
            Some(t) => t,
            None => return false,
        };
        return created >= lo && created <= hi;
    }

    match criteria.date_range {
        QuickRange::All => true,
        QuickRange::Today => match item.created_at {
            // Same calendar date as `now`, not a rolling 24h window.
            Some(created) => created.date_naive() == now.date_naive(),
            None => false,
        },
        QuickRange::LastWeek => match item.created_at {
            Some(created) => created >= now - chrono::Duration::days(7),
            None => false,
        },
        QuickRange::LastMonth => match item.created_at {
            // One calendar month, clamped to the end of shorter months
            // (Mar 31 - 1 month = Feb 29 in a leap year). Not 30 days.
            Some(created) => match now.checked_sub_months(Months::new(1)) {
                Some(cutoff) => created >= cutoff,
                None => true,
            },
            None => false,
        },
    }
}

/// Stable sort, so items with equal keys keep their relative order.
/// `order_by: None` (an unrecognized selection upstream) preserves the
/// current order instead of erroring.
fn sort_items(items: &mut [FeedItem], order_by: Option<OrderBy>) {
    let Some(order) = order_by else {
        return;
    };

    match order {
        OrderBy::NewestFirst => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        OrderBy::OldestFirst => items.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        OrderBy::TitleAsc => items.sort_by(|a, b| title_key(a).cmp(&title_key(b))),
        OrderBy::TitleDesc => items.sort_by(|a, b| title_key(b).cmp(&title_key(a))),
    }
}

fn title_key(item: &FeedItem) -> String {
    item.title.as_deref().unwrap_or("").to_lowercase()
}
