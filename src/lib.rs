pub mod types;
pub mod normalize;
pub mod filter;
pub mod highlight;
pub mod news_manager;
pub mod draft_manager;
pub mod saved_posts;
pub mod newsletter;

pub use types::*;
pub use filter::FeedFilter;
pub use highlight::{highlight, Segment};
pub use news_manager::NewsManager;
pub use draft_manager::DraftManager;
pub use saved_posts::SavedPostManager;
pub use newsletter::{render_newsletter, NewsletterOptions};
