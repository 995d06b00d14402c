use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Value of a field whose pattern did not match anywhere in the text.
pub const NOT_FOUND: &str = "N/A";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
        .expect("Failed to compile EMAIL_RE")
});

// Optional '+', then a digit, 8 to 12 digits/spaces/hyphens, then a digit.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d[\d -]{8,12}\d").expect("Failed to compile PHONE_RE"));

/// Contact fields recovered from one resume. Field names double as the CSV
/// header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Contact Number")]
    pub contact_number: String,
}

pub fn recognize(text: &str) -> ResumeRecord {
    ResumeRecord {
        name: extract_name(text),
        email: extract_email(text),
        contact_number: extract_phone(text),
    }
}

/// The first line, trimmed. No attempt is made to check it looks like a
/// name, and a blank first line gives an empty name.
pub fn extract_name(text: &str) -> String {
    let end = text.find(is_line_boundary).unwrap_or(text.len());
    text[..end].trim().to_string()
}

pub fn extract_email(text: &str) -> String {
    first_match(&EMAIL_RE, text)
}

/// Long numeric runs such as IDs or date ranges also match.
pub fn extract_phone(text: &str) -> String {
    first_match(&PHONE_RE, text)
}

fn first_match(pattern: &Regex, text: &str) -> String {
    pattern
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NOT_FOUND.to_string())
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}
