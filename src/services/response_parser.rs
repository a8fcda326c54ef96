//! Turns free-form model output into validated question drafts.
//!
//! Parsing is two-staged: the whole reply is first parsed strictly as a JSON
//! array. Only when that fails do we fall back to cutting the span between the
//! first `[` and the last `]` out of the surrounding prose, which is what models
//! in JSON-object mode tend to produce (`{"questions": [...]}`).

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{errors::QuestionGenerationError, models::domain::OPTION_LABELS};

static BRACKETED_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[.*\]").expect("BRACKETED_ARRAY is a valid regex pattern"));

/// One question as the model is asked to emit it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct GeneratedQuestion {
    /// The question text.
    pub question: String,
    /// Exactly four choices keyed by "A", "B", "C" and "D".
    pub options: BTreeMap<String, String>,
    /// Label of the single correct choice.
    pub correct: String,
}

/// JSON Schema of a single generated element, embedded in the generation prompt.
pub fn generated_question_schema() -> String {
    let schema = schemars::schema_for!(GeneratedQuestion);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

/// Parses the reply as a bare JSON array, nothing else.
pub fn parse_strict(raw: &str) -> Result<Vec<Value>, String> {
    match serde_json::from_str::<Value>(raw.trim()) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(_) => Err("model did not return an array".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// Parses the span from the first `[` to the last `]` of the reply.
pub fn parse_bracketed(raw: &str) -> Result<Vec<Value>, String> {
    let span = BRACKETED_ARRAY
        .find(raw)
        .ok_or_else(|| "no JSON array found in model output".to_string())?;

    match serde_json::from_str::<Value>(span.as_str()) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(_) => Err("model did not return an array".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

pub fn parse_question_array(raw: &str) -> Result<Vec<Value>, QuestionGenerationError> {
    match parse_strict(raw) {
        Ok(items) => Ok(items),
        Err(strict_err) => {
            log::debug!("Strict parse of model output failed ({}), extracting array", strict_err);
            parse_bracketed(raw).map_err(QuestionGenerationError::Parse)
        }
    }
}

/// Checks the element count, then every element's shape.
///
/// Labels and the correct answer are trimmed and upper-cased before checking,
/// so `" b "` is accepted as `"B"`. Any bad element rejects the whole set.
pub fn validate_questions(
    items: Vec<Value>,
    min_questions: usize,
) -> Result<Vec<GeneratedQuestion>, QuestionGenerationError> {
    if items.len() < min_questions {
        return Err(QuestionGenerationError::InsufficientQuestions(
            items.len(),
            min_questions,
        ));
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            validate_question(item).map_err(|reason| QuestionGenerationError::InvalidQuestion {
                index,
                reason,
            })
        })
        .collect()
}

fn validate_question(item: Value) -> Result<GeneratedQuestion, String> {
    let raw: GeneratedQuestion = serde_json::from_value(item).map_err(|e| e.to_string())?;

    let question = raw.question.trim().to_string();
    if question.is_empty() {
        return Err("question text is empty".to_string());
    }

    let raw_count = raw.options.len();
    let mut options = BTreeMap::new();
    for (label, text) in raw.options {
        let label = label.trim().to_uppercase();
        if options.contains_key(&label) {
            return Err(format!("option {} is given more than once", label));
        }
        options.insert(label, text.trim().to_string());
    }

    let labels_match = raw_count == OPTION_LABELS.len()
        && options.len() == OPTION_LABELS.len()
        && OPTION_LABELS.iter().all(|label| options.contains_key(*label));
    if !labels_match {
        let found: Vec<&str> = options.keys().map(String::as_str).collect();
        return Err(format!(
            "expected options {:?}, found {:?}",
            OPTION_LABELS, found
        ));
    }

    if let Some((label, _)) = options.iter().find(|(_, text)| text.is_empty()) {
        return Err(format!("option {} is empty", label));
    }

    let correct = raw.correct.trim().to_uppercase();
    if !options.contains_key(&correct) {
        return Err(format!("correct answer '{}' is not one of the options", raw.correct));
    }

    Ok(GeneratedQuestion {
        question,
        options,
        correct,
    })
}
