use serde::{Deserialize, Serialize};

/// Body of `POST /translate/`.
///
/// Both fields are optional at the wire level so that a missing `text`
/// reaches the handler and gets the compatibility error body instead of a
/// deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub target_language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranslateResponse {
    pub original_text: String,
    pub translated_text: String,
    pub target_language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

pub const NO_TEXT_PROVIDED: &str = "No text provided";
pub const SERVER_BUSY: &str = "Server busy, try again later";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_parses_with_no_fields() {
        let request: TranslateRequest = serde_json::from_str("{}").unwrap();
        assert!(request.text.is_none());
        assert!(request.target_language.is_none());
    }

    #[test]
    fn null_fields_parse_as_absent() {
        let request: TranslateRequest =
            serde_json::from_str(r#"{"text": null, "target_language": null}"#).unwrap();
        assert!(request.text.is_none());
        assert!(request.target_language.is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let request: TranslateRequest =
            serde_json::from_str(r#"{"text": "hi", "source_language": "en"}"#).unwrap();
        assert_eq!(request.text.as_deref(), Some("hi"));
    }

    #[test]
    fn error_body_shape() {
        let body = serde_json::to_value(ErrorBody::new(NO_TEXT_PROVIDED)).unwrap();
        assert_eq!(body, serde_json::json!({"error": "No text provided"}));
    }
}
