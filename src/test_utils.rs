use std::collections::BTreeMap;

use crate::{
    auth::Claims,
    models::domain::{Question, OPTION_LABELS},
};

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use secrecy::{ExposeSecret, SecretString};
    use serde_json::json;

    /// Claims as the account service issues them, valid for `expiration_hours`.
    pub fn test_claims(subject: &str, email: &str, expiration_hours: i64) -> Claims {
        let now = Utc::now();
        Claims {
            sub: subject.to_string(),
            email: email.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::hours(expiration_hours)).timestamp() as usize,
        }
    }

    /// Signs `claims` with `secret`.
    pub fn access_token(secret: &SecretString, claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
        )
        .unwrap()
    }

    /// Four labeled options A-D.
    pub fn test_options() -> BTreeMap<String, String> {
        OPTION_LABELS
            .iter()
            .enumerate()
            .map(|(i, label)| (label.to_string(), format!("Choice {}", i + 1)))
            .collect()
    }

    /// Creates a standard stored question
    pub fn test_question(topic: &str) -> Question {
        Question::new(topic, &format!("What is true about {}?", topic), test_options(), "A")
    }

    /// Creates `count` stored questions for one topic
    pub fn cached_questions(topic: &str, count: usize) -> Vec<Question> {
        (0..count)
            .map(|i| {
                Question::new(
                    topic,
                    &format!("Cached question {} on {}?", i + 1, topic),
                    test_options(),
                    OPTION_LABELS[i % OPTION_LABELS.len()],
                )
            })
            .collect()
    }

    /// A model reply holding `count` well-formed questions wrapped in prose
    pub fn generated_reply(count: usize) -> String {
        let questions: Vec<serde_json::Value> = (0..count)
            .map(|i| {
                json!({
                    "question": format!("Generated question {}?", i + 1),
                    "options": {"A": "alpha", "B": "beta", "C": "gamma", "D": "delta"},
                    "correct": OPTION_LABELS[i % OPTION_LABELS.len()]
                })
            })
            .collect();

        format!("Here are your questions:\n{}\n", json!(questions))
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::services::response_parser::{parse_question_array, validate_questions};

    #[test]
    fn test_fixtures_test_question() {
        let question = test_question("Rust");
        assert_eq!(question.topic, "Rust");
        assert!(question.has_valid_shape());
    }

    #[test]
    fn test_fixtures_cached_questions() {
        let questions = cached_questions("Go", 6);
        assert_eq!(questions.len(), 6);
        assert!(questions.iter().all(|q| q.topic == "Go" && q.has_valid_shape()));
    }

    #[test]
    fn test_fixtures_generated_reply_parses() {
        let items = parse_question_array(&generated_reply(5)).unwrap();
        assert_eq!(validate_questions(items, 5).unwrap().len(), 5);
    }
}
