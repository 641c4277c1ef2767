//! Newsletter HTML generation.
//!
//! Pure string templating from normalized feed items to the email-safe
//! table layout of the department newsletter. No side effects, no store
//! access; callers fetch the period-bounded items themselves (see
//! [`crate::NewsManager::recent`]).

use chrono::{DateTime, NaiveDate, Utc};

use crate::types::FeedItem;

const CONTENT_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct NewsletterOptions {
    /// Base URL for "Read More" links and the logo asset.
    pub base_url: String,
    /// Number of days the digest covers, shown in the intro line.
    pub period_days: i32,
    /// Date shown in the title block. Injected so rendering stays
    /// deterministic.
    pub today: NaiveDate,
}

impl Default for NewsletterOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5173".to_string(),
            period_days: 14,
            today: Utc::now().date_naive(),
        }
    }
}

/// Render the full newsletter HTML. Items render in the order given; an
/// empty list renders the empty-state paragraph instead.
pub fn render_newsletter(items: &[FeedItem], options: &NewsletterOptions) -> String {
    let body = if items.is_empty() {
        EMPTY_STATE.to_string()
    } else {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| render_item(item, index, &options.base_url))
            .collect::<Vec<_>>()
            .join("")
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>MSE News Portal - Newsletter</title>
</head>
<body style="margin: 0; padding: 0; background-color: #FAFAFA; font-family: Arial, Helvetica, sans-serif;">
  <div style="display: none; max-height: 0px; overflow: hidden;">
    Materials Science &amp; Engineering news and updates
  </div>
  <table width="100%" cellpadding="0" cellspacing="0" border="0" style="background-color: #FAFAFA;">
    <tr>
      <td align="center" style="padding: 10px;">
        <table width="100%" cellpadding="0" cellspacing="0" border="0" style="max-width: 600px; margin: 0 auto; background-color: #FFFFFF; border: 1px solid #E5E5E5;">
          <tr>
            <td style="background-color: #404040; height: 8px; line-height: 8px; font-size: 8px;">&nbsp;</td>
          </tr>
          <tr>
            <td style="padding: 9px 20px 0 20px;">
              <img src="{base_url}/logo.svg" alt="NC State University" style="height: 50px; width: auto; display: block; border: 0;" />
            </td>
          </tr>
          <tr>
            <td style="padding: 10px 20px;">
              <table width="100%" cellpadding="0" cellspacing="0" border="0">
                <tr>
                  <td align="center" style="font-size: 26px; font-weight: bold; color: #000000;">MSE News Portal</td>
                </tr>
                <tr>
                  <td align="center" style="padding-top: 5px; font-size: 16px; font-weight: bold; color: #000000;">Biweekly Newsletter</td>
                </tr>
                <tr>
                  <td align="center" style="padding-top: 5px; font-size: 14px; color: #000000;">{date}</td>
                </tr>
              </table>
            </td>
          </tr>
          <tr>
            <td style="background-color: #CC0000; padding: 18px;">
              <table width="100%" cellpadding="0" cellspacing="0" border="0">
                <tr>
                  <td align="center" style="font-size: 32px; color: #F2F2F2;">Department News</td>
                </tr>
              </table>
            </td>
          </tr>
          <tr>
            <td style="padding: 18px 20px;">
              <p style="margin: 0; font-size: 16px; color: #202020; line-height: 1.6;">
                Here's what's been happening in the Materials Science &amp; Engineering department over the past {period} days:
              </p>
            </td>
          </tr>
          <tr>
            <td style="padding: 0 0 9px 0;">{body}</td>
          </tr>
          <tr>
            <td style="background-color: #CC0000; padding: 30px 20px;">
              <table width="100%" cellpadding="0" cellspacing="0" border="0">
                <tr>
                  <td align="center" style="padding-bottom: 10px;">
                    <p style="margin: 0; font-size: 14px; color: #FFFFFF; line-height: 1.5;">
                      <strong>NC State University</strong><br>Materials Science &amp; Engineering
                    </p>
                  </td>
                </tr>
                <tr>
                  <td align="center" style="padding-bottom: 20px;">
                    <p style="margin: 0; font-size: 12px; color: #CCCCCC; line-height: 1.5;">Raleigh, NC 27695<br>919.515.2011</p>
                  </td>
                </tr>
                <tr>
                  <td align="center" style="padding-bottom: 20px;">
                    <p style="margin: 0; font-size: 12px; color: #FFFFFF;">
                      <a href="{base_url}/dashboard/all-news" target="_blank" style="color: #FFFFFF; font-weight: bold; text-decoration: underline;">View All News</a>
                      <span> | </span>
                      <a href="{base_url}/dashboard/profile" target="_blank" style="color: #FFFFFF; font-weight: bold; text-decoration: underline;">Manage Preferences</a>
                    </p>
                  </td>
                </tr>
                <tr>
                  <td align="center">
                    <p style="margin: 0; font-size: 11px; color: #999999;">You're receiving this because you're a member of the MSE News Portal.</p>
                  </td>
                </tr>
              </table>
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>"#,
        base_url = options.base_url,
        date = format_long_date(options.today),
        period = options.period_days,
        body = body,
    )
}

fn render_item(item: &FeedItem, index: usize, base_url: &str) -> String {
    let author = item.author_name.as_deref().unwrap_or("Unknown");
    let date = item
        .created_at
        .map(format_long_datetime)
        .unwrap_or_default();
    let title = item.title.as_deref().unwrap_or("Untitled");
    let content = truncate_content(item.content.as_deref().unwrap_or(""));
    let news_url = format!("{}/dashboard/all-news#news-{}", base_url, item.id);

    let divider = if index > 0 {
        r#"<table width="100%" cellpadding="0" cellspacing="0" border="0" style="margin: 20px 0;">
          <tr><td align="center" style="padding: 10px 0;">
            <table width="95%" cellpadding="0" cellspacing="0" border="0" style="height: 1px; background-color: #CCCCCC;">
              <tr><td height="1" style="line-height: 1px; font-size: 1px;">&nbsp;</td></tr>
            </table>
          </td></tr>
        </table>"#
            .to_string()
    } else {
        String::new()
    };

    let thumbnail = match item.image_urls.first() {
        Some(url) => format!(
            r#"<tr><td style="padding: 0;"><img src="{}" alt="{}" style="width: 100%; max-width: 600px; height: auto; display: block; border: 0;" /></td></tr>"#,
            url, title
        ),
        None => String::new(),
    };

    let hashtags = if item.hashtags.is_empty() {
        String::new()
    } else {
        let line = item
            .hashtags
            .iter()
            .map(|tag| format!("#{}", tag))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            r#"<p style="margin: 0 0 12px 0; font-size: 12px; color: #CC0000;">{}</p>"#,
            line
        )
    };

    format!(
        r#"{divider}
        <table width="100%" cellpadding="0" cellspacing="0" border="0">
          {thumbnail}
          <tr>
            <td style="padding: 18px 20px;">
              <h3 style="margin: 0 0 12px 0; font-size: 18px; font-weight: bold; color: #CC0000; line-height: 1.3;">{title}</h3>
              <p style="margin: 0 0 12px 0; font-size: 14px; color: #202020;"><strong>{author}</strong> &bull; {date}</p>
              <p style="margin: 0 0 12px 0; font-size: 14px; color: #202020; line-height: 1.6;">{content}</p>
              {hashtags}
              <p style="margin: 0;">
                <a href="{news_url}" style="color: #DE4E3A; text-decoration: underline; font-size: 14px;">Read More &rarr;</a>
              </p>
            </td>
          </tr>
        </table>"#,
    )
}

const EMPTY_STATE: &str = r#"<table width="100%" cellpadding="0" cellspacing="0" border="0">
  <tr>
    <td style="padding: 40px 20px; text-align: center;">
      <p style="margin: 0; font-size: 14px; color: #666666;">No news items found for this period.</p>
    </td>
  </tr>
</table>"#;

/// Truncate to the preview length on a character boundary, trailing
/// ellipsis when anything was cut.
fn truncate_content(content: &str) -> String {
    if content.chars().count() <= CONTENT_PREVIEW_CHARS {
        return content.to_string();
    }
    let cut: String = content.chars().take(CONTENT_PREVIEW_CHARS).collect();
    format!("{}...", cut.trim_end())
}

fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn format_long_datetime(moment: DateTime<Utc>) -> String {
    format_long_date(moment.date_naive())
}
