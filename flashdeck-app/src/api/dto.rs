use flashdeck_core::{CardId, Deck};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;

/// Query string as decoded pairs. A repeated key resolves to its first value.
#[derive(Deserialize, Default)]
#[serde(transparent)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

pub fn resolve_deck(sel: Option<&str>) -> Deck {
    Deck::resolve(sel.unwrap_or_default())
}

/// `current_id` must be present and parse as a (signed) integer.
pub fn parse_current_id(raw: Option<&str>) -> Result<CardId, ApiError> {
    match raw {
        None | Some("") => Err(ApiError::MissingCurrentId),
        Some(s) => s.parse::<CardId>().map_err(|_| ApiError::InvalidCurrentId),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_id_parsing() {
        assert!(matches!(parse_current_id(None), Err(ApiError::MissingCurrentId)));
        assert!(matches!(parse_current_id(Some("")), Err(ApiError::MissingCurrentId)));
        assert!(matches!(parse_current_id(Some("abc")), Err(ApiError::InvalidCurrentId)));
        assert!(matches!(parse_current_id(Some("1.5")), Err(ApiError::InvalidCurrentId)));
        assert_eq!(parse_current_id(Some("42")).ok(), Some(42));
        assert_eq!(parse_current_id(Some("+5")).ok(), Some(5));
        assert_eq!(parse_current_id(Some("-3")).ok(), Some(-3));
    }

    #[test]
    fn repeated_key_takes_first_value() {
        let q = QueryParams(vec![
            ("deck".into(), "gpt".into()),
            ("current_id".into(), "1".into()),
            ("deck".into(), "x".into()),
        ]);
        assert_eq!(q.first("deck"), Some("gpt"));
        assert_eq!(q.first("current_id"), Some("1"));
        assert_eq!(q.first("other"), None);
        assert_eq!(QueryParams::default().first("deck"), None);
    }

    #[test]
    fn absent_deck_is_gemini() {
        assert_eq!(resolve_deck(None), Deck::Gemini);
        assert_eq!(resolve_deck(Some("gpt")), Deck::Gpt);
        assert_eq!(resolve_deck(Some("Gpt")), Deck::Gemini);
    }
}
