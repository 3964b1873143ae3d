use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a book record.
///
/// Generated ids are numeric (milliseconds since the Unix epoch). Negative,
/// fractional, and textual ids are accepted from stored data so that
/// collections written by other tools still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookId {
    Numeric(u64),
    /// Any other JSON number
    Number(serde_json::Number),
    Text(String),
}

impl BookId {
    /// Numeric value of the id, if it has one
    pub fn as_numeric(&self) -> Option<u64> {
        match self {
            BookId::Numeric(n) => Some(*n),
            BookId::Number(_) | BookId::Text(_) => None,
        }
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookId::Numeric(n) => write!(f, "{n}"),
            BookId::Number(n) => write!(f, "{n}"),
            BookId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for BookId {
    fn from(value: u64) -> Self {
        BookId::Numeric(value)
    }
}

impl FromStr for BookId {
    type Err = std::convert::Infallible;

    /// All-digit input that fits in a `u64` parses as a numeric id, other
    /// JSON number literals as `Number`, anything else as text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits_only = !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if digits_only {
            if let Ok(n) = s.parse::<u64>() {
                return Ok(BookId::Numeric(n));
            }
        }

        let number_like = s.starts_with(|c: char| c == '-' || c.is_ascii_digit())
            && s.trim() == s;
        if number_like {
            if let Ok(n) = serde_json::from_str::<serde_json::Number>(s) {
                if n.as_u64().is_none() {
                    return Ok(BookId::Number(n));
                }
            }
        }

        Ok(BookId::Text(s.to_string()))
    }
}

/// Circulation status of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookStatus {
    #[default]
    Available,
    Issued,
}

impl BookStatus {
    /// The other status. Applying it twice returns the original.
    pub fn toggled(self) -> Self {
        match self {
            BookStatus::Available => BookStatus::Issued,
            BookStatus::Issued => BookStatus::Available,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Issued => "Issued",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single book in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookRecord {
    /// Unique identifier for the book
    pub id: BookId,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Whether the book is on the shelf or lent out
    pub status: BookStatus,
}

impl BookRecord {
    /// New record with status `Available`.
    pub fn new(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            status: BookStatus::Available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_toggle_is_an_involution() {
        for status in [BookStatus::Available, BookStatus::Issued] {
            assert_ne!(status.toggled(), status);
            assert_eq!(status.toggled().toggled(), status);
        }
    }

    #[test]
    fn record_serializes_with_exact_fields() {
        let record = BookRecord::new(BookId::Numeric(1700000000000), "Dune", "Herbert");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 1700000000000u64,
                "title": "Dune",
                "author": "Herbert",
                "status": "Available"
            })
        );
    }

    #[test]
    fn record_accepts_string_ids() {
        let record: BookRecord = serde_json::from_value(json!({
            "id": "abc-1",
            "title": "Dune",
            "author": "Herbert",
            "status": "Issued"
        }))
        .unwrap();

        assert_eq!(record.id, BookId::Text("abc-1".to_string()));
        assert_eq!(record.status, BookStatus::Issued);
    }

    #[test]
    fn record_rejects_unknown_fields_and_statuses() {
        let extra = serde_json::from_value::<BookRecord>(json!({
            "id": 1, "title": "Dune", "author": "Herbert", "status": "Available", "slug": "dune"
        }));
        assert!(extra.is_err());

        let lowercase = serde_json::from_value::<BookRecord>(json!({
            "id": 1, "title": "Dune", "author": "Herbert", "status": "available"
        }));
        assert!(lowercase.is_err());
    }

    #[test]
    fn id_parses_numeric_and_text_forms() {
        assert_eq!("42".parse::<BookId>().unwrap(), BookId::Numeric(42));
        assert_eq!(
            "+42".parse::<BookId>().unwrap(),
            BookId::Text("+42".to_string())
        );
        assert_eq!(
            "dune-1".parse::<BookId>().unwrap(),
            BookId::Text("dune-1".to_string())
        );
        assert_eq!(BookId::Numeric(7).to_string(), "7");
    }

    #[test]
    fn record_accepts_negative_and_fractional_ids() {
        let records: Vec<BookRecord> = serde_json::from_value(json!([
            {"id": -5, "title": "Dune", "author": "Herbert", "status": "Available"},
            {"id": 1.5, "title": "Emma", "author": "Austen", "status": "Issued"}
        ]))
        .unwrap();

        assert_eq!(records[0].id, BookId::Number((-5i64).into()));
        assert_eq!(records[0].id.to_string(), "-5");
        assert_eq!(records[1].id.to_string(), "1.5");
        assert_eq!(records[1].id.as_numeric(), None);

        let back = serde_json::to_value(&records).unwrap();
        assert_eq!(back[0]["id"], json!(-5));
        assert_eq!(back[1]["id"], json!(1.5));
    }

    #[test]
    fn id_parses_other_number_forms() {
        assert_eq!("-5".parse::<BookId>().unwrap(), BookId::Number((-5i64).into()));
        assert_eq!("1.5".parse::<BookId>().unwrap().to_string(), "1.5");
        assert_eq!(
            "18446744073709551616".parse::<BookId>().unwrap().as_numeric(),
            None
        );
        assert_eq!(
            "-abc".parse::<BookId>().unwrap(),
            BookId::Text("-abc".to_string())
        );
    }
}
