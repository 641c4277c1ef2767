//! Search-highlight tokenizer.
//!
//! Splits a text field into plain and matched segments for inline
//! highlighting of the active search query. Matching is plain substring
//! scanning, so regex metacharacters in user input are inert.

/// One fragment of a highlighted text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub is_match: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_match: false,
        }
    }

    fn matched(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_match: true,
        }
    }
}

/// Split `text` on case-insensitive, non-overlapping, left-to-right
/// occurrences of `query`, preserving the original casing of matched
/// fragments.
///
/// A fragment counts as a match when its lower-cased form equals the
/// lower-cased query. That generous equality means adjacent identical
/// fragments all light up; the behavior is intentional and kept as-is.
/// An empty or whitespace-only query yields the whole text as one plain
/// segment; empty text yields no segments.
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }

    // Only the emptiness check trims; matching uses the query as given,
    // the same way the search stage does.
    if query.trim().is_empty() {
        return vec![Segment::plain(text)];
    }
    let needle = query.to_lowercase();

    // Lowercasing can change byte lengths for some scripts, and the drifts
    // can cancel out across characters, so every character must keep its
    // width before byte offsets into the original text can be trusted.
    if !lowercase_preserves_len(text) {
        return highlight_chars(text, &needle);
    }

    let haystack = text.to_lowercase();

    let mut segments = Vec::new();
    let mut cursor = 0;
    while let Some(found) = haystack[cursor..].find(&needle) {
        let start = cursor + found;
        let end = start + needle.len();
        if start > cursor {
            segments.push(Segment::plain(&text[cursor..start]));
        }
        segments.push(Segment::matched(&text[start..end]));
        cursor = end;
    }
    if cursor < text.len() {
        segments.push(Segment::plain(&text[cursor..]));
    }
    segments
}

fn lowercase_preserves_len(text: &str) -> bool {
    text.chars()
        .all(|c| c.to_lowercase().map(char::len_utf8).sum::<usize>() == c.len_utf8())
}

/// Character-wise scan for texts where lowercasing shifts byte offsets.
/// Slower, but never slices mid-character.
fn highlight_chars(text: &str, needle: &str) -> Vec<Segment> {
    let chars: Vec<char> = text.chars().collect();
    let needle_chars: Vec<char> = needle.chars().collect();
    let mut segments = Vec::new();
    let mut plain = String::new();
    let mut i = 0;

    while i < chars.len() {
        let window: String = chars[i..]
            .iter()
            .take(needle_chars.len())
            .collect::<String>()
            .to_lowercase();
        if window == needle && i + needle_chars.len() <= chars.len() {
            if !plain.is_empty() {
                segments.push(Segment::plain(&plain));
                plain.clear();
            }
            let matched: String = chars[i..i + needle_chars.len()].iter().collect();
            segments.push(Segment::matched(&matched));
            i += needle_chars.len();
        } else {
            plain.push(chars[i]);
            i += 1;
        }
    }
    if !plain.is_empty() {
        segments.push(Segment::plain(&plain));
    }
    segments
}
