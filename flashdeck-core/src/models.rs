use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type CardId = i64;

pub const ID_FIELD: &str = "_id";
pub const DECK_FIELD: &str = "deck";

pub const COLLECTION_GPT: &str = "GptQuestions";
pub const COLLECTION_GEMINI: &str = "GeminiQuestions";
pub const DEFAULT_DATABASE: &str = "Project_SHASN";

/// One of the two fixed decks. Every deck selector string resolves to one of
/// these; only the exact string `gpt` picks the GPT deck.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Deck {
    Gpt,
    #[default]
    Gemini,
}

impl Deck {
    pub const ALL: [Deck; 2] = [Deck::Gpt, Deck::Gemini];

    pub fn resolve(sel: &str) -> Self {
        if sel == "gpt" {
            Deck::Gpt
        } else {
            Deck::Gemini
        }
    }

    /// Canonical name written into every response.
    pub fn name(&self) -> &'static str {
        match self {
            Deck::Gpt => "gpt",
            Deck::Gemini => "gemini",
        }
    }

    pub fn collection(&self) -> &'static str {
        match self {
            Deck::Gpt => COLLECTION_GPT,
            Deck::Gemini => COLLECTION_GEMINI,
        }
    }
}

impl std::fmt::Display for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A flashcard document as stored. Fields are kept verbatim and in order;
/// only `deck` is ever written by this crate.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Card {
    fields: Map<String, Value>,
}

impl Card {
    /// Integer identifier, if the document carries one. Integral floats
    /// (`3.0`) count, since the document store compares them numerically.
    pub fn id(&self) -> Option<CardId> {
        let v = self.fields.get(ID_FIELD)?;
        v.as_i64().or_else(|| {
            v.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as CardId)
        })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn set_deck(&mut self, deck: Deck) {
        self.fields
            .insert(DECK_FIELD.to_string(), Value::from(deck.name()));
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl TryFrom<Value> for Card {
    type Error = crate::StoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Card { fields }),
            other => Err(crate::StoreError::InvalidData(format!(
                "expected a document object, got {}",
                kind_of(&other)
            ))),
        }
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolve_only_exact_gpt() {
        assert_eq!(Deck::resolve("gpt"), Deck::Gpt);
        for sel in ["", "gemini", "GPT", "gpt ", "anything"] {
            assert_eq!(Deck::resolve(sel), Deck::Gemini, "selector {sel:?}");
        }
    }

    #[test]
    fn set_deck_overwrites_and_keeps_order() {
        let mut card = Card::try_from(json!({"_id": 4, "deck": "bogus", "q": "why?"})).unwrap();
        card.set_deck(Deck::Gpt);
        let keys: Vec<&str> = card.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, ["_id", "deck", "q"]);
        assert_eq!(card.get("deck"), Some(&json!("gpt")));
        assert_eq!(card.id(), Some(4));
    }

    #[test]
    fn id_accepts_integral_floats_only() {
        let id = |v: Value| Card::try_from(json!({ "_id": v })).unwrap().id();
        assert_eq!(id(json!(3.0)), Some(3));
        assert_eq!(id(json!(-2.0)), Some(-2));
        assert_eq!(id(json!(3.5)), None);
        assert_eq!(id(json!(1e300)), None);
        assert_eq!(id(json!(u64::MAX)), None);
        assert_eq!(id(json!("7")), None);
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(Card::try_from(json!([1, 2])).is_err());
    }
}
