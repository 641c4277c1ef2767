use chrono::{NaiveDate, TimeZone, Utc};
use news_portal::{render_newsletter, FeedItem, NewsletterOptions};

fn options() -> NewsletterOptions {
    NewsletterOptions {
        base_url: "https://portal.example.edu".to_string(),
        period_days: 14,
        today: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
    }
}

fn item(id: i64, title: &str, content: &str) -> FeedItem {
    FeedItem {
        id,
        user_id: 7,
        title: Some(title.to_string()),
        content: Some(content.to_string()),
        hashtags: Vec::new(),
        image_urls: Vec::new(),
        external_links: Vec::new(),
        author_name: Some("Jane Doe".to_string()),
        author_email: Some("jdoe@example.edu".to_string()),
        created_at: Some(Utc.with_ymd_and_hms(2024, 3, 20, 9, 0, 0).unwrap()),
        updated_at: None,
    }
}

#[test]
fn renders_title_author_and_date() {
    let html = render_newsletter(&[item(1, "Lab opening", "Doors open next week.")], &options());

    assert!(html.contains("Lab opening"));
    assert!(html.contains("<strong>Jane Doe</strong>"));
    assert!(html.contains("March 20, 2024"));
    assert!(html.contains("March 31, 2024"));
    assert!(html.contains("over the past 14 days"));
}

#[test]
fn read_more_links_anchor_to_the_item() {
    let html = render_newsletter(&[item(42, "Linked", "Body.")], &options());
    assert!(html.contains("https://portal.example.edu/dashboard/all-news#news-42"));
}

#[test]
fn empty_feed_renders_empty_state() {
    let html = render_newsletter(&[], &options());
    assert!(html.contains("No news items found for this period."));
    assert!(!html.contains("Read More"));
}

#[test]
fn long_content_is_truncated_with_ellipsis() {
    let long = "x".repeat(450);
    let html = render_newsletter(&[item(1, "Long", &long)], &options());

    let expected = format!("{}...", "x".repeat(200));
    assert!(html.contains(&expected));
    assert!(!html.contains(&"x".repeat(201)));
}

#[test]
fn short_content_is_untouched() {
    let html = render_newsletter(&[item(1, "Short", "Brief note.")], &options());
    assert!(html.contains("Brief note."));
    assert!(!html.contains("Brief note...."));
}

#[test]
fn hashtags_render_with_hash_prefix() {
    let mut it = item(1, "Tagged", "Body.");
    it.hashtags = vec!["AI".to_string(), "Research".to_string()];
    let html = render_newsletter(&[it], &options());
    assert!(html.contains("#AI #Research"));
}

#[test]
fn first_image_becomes_the_thumbnail() {
    let mut it = item(1, "Pictured", "Body.");
    it.image_urls = vec![
        "https://cdn.example.edu/a.jpg".to_string(),
        "https://cdn.example.edu/b.jpg".to_string(),
    ];
    let html = render_newsletter(&[it], &options());
    assert!(html.contains("https://cdn.example.edu/a.jpg"));
    assert!(!html.contains("https://cdn.example.edu/b.jpg"));
}

#[test]
fn missing_fields_fall_back_to_placeholders() {
    let mut it = item(1, "ignored", "ignored");
    it.title = None;
    it.content = None;
    it.author_name = None;
    it.created_at = None;
    let html = render_newsletter(&[it], &options());
    assert!(html.contains("Untitled"));
    assert!(html.contains("<strong>Unknown</strong>"));
}

#[test]
fn divider_appears_between_items_but_not_before_the_first() {
    let one = render_newsletter(&[item(1, "A", "a")], &options());
    let two = render_newsletter(&[item(1, "A", "a"), item(2, "B", "b")], &options());

    assert_eq!(one.matches("background-color: #CCCCCC").count(), 0);
    assert_eq!(two.matches("background-color: #CCCCCC").count(), 1);
}

#[test]
fn items_render_in_the_order_given() {
    let html = render_newsletter(&[item(1, "First story", "a"), item(2, "Second story", "b")], &options());
    let first = html.find("First story").unwrap();
    let second = html.find("Second story").unwrap();
    assert!(first < second);
}
