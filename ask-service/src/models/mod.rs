//! Wire types for the `/ask` endpoint.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /ask`. A missing or `null` question counts as empty.
///
/// Only a JSON object is accepted. The derived impl would also take a
/// sequence and read its first element as `question`.
#[derive(Debug, Default)]
pub struct AskRequest {
    pub question: Option<String>,
}

impl<'de> Deserialize<'de> for AskRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;

        let question = match fields.remove("question") {
            None | Some(Value::Null) => None,
            Some(Value::String(question)) => Some(question),
            Some(other) => {
                return Err(de::Error::invalid_type(
                    unexpected(&other),
                    &"a string for `question`",
                ))
            }
        };

        Ok(Self { question })
    }
}

fn unexpected(value: &Value) -> de::Unexpected<'_> {
    match value {
        Value::Bool(b) => de::Unexpected::Bool(*b),
        Value::Number(_) => de::Unexpected::Other("number"),
        Value::Array(_) => de::Unexpected::Seq,
        Value::Object(_) => de::Unexpected::Map,
        Value::Null | Value::String(_) => de::Unexpected::Other("value"),
    }
}

impl AskRequest {
    /// The question with surrounding whitespace removed.
    pub fn trimmed_question(&self) -> &str {
        self.question.as_deref().unwrap_or_default().trim()
    }
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}
