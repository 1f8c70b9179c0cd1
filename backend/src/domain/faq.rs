//! FAQ entries and their validated write models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use super::DomainError;

/// Longest accepted question, in characters.
pub const QUESTION_MAX: usize = 300;
/// Longest accepted answer, in characters.
pub const ANSWER_MAX: usize = 5000;

/// A stored FAQ entry as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    /// Primary key.
    pub id: Uuid,
    /// The question as displayed.
    pub question: String,
    /// The answer as displayed.
    pub answer: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating an FAQ entry.
///
/// # Examples
/// ```
/// use faq_backend::domain::FaqDraft;
///
/// let draft = FaqDraft::new("Is it free?", "Yes.").expect("valid draft");
/// assert_eq!(draft.question(), "Is it free?");
/// assert!(FaqDraft::new(" ", "Yes.").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqDraft {
    question: String,
    answer: String,
}

impl FaqDraft {
    /// Validate both fields, reporting every failing field at once.
    pub fn new(question: &str, answer: &str) -> Result<Self, DomainError> {
        let errors: Vec<Value> = [
            check_field("question", question, QUESTION_MAX),
            check_field("answer", answer, ANSWER_MAX),
        ]
        .into_iter()
        .flatten()
        .collect();

        if !errors.is_empty() {
            return Err(DomainError::validation("Invalid FAQ payload", errors));
        }
        Ok(Self {
            question: question.trim().to_owned(),
            answer: answer.trim().to_owned(),
        })
    }

    /// Trimmed question.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Trimmed answer.
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// Validated partial update for an FAQ entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqPatch {
    question: Option<String>,
    answer: Option<String>,
}

impl FaqPatch {
    /// Validate the supplied fields; at least one must be present.
    pub fn new(question: Option<&str>, answer: Option<&str>) -> Result<Self, DomainError> {
        if question.is_none() && answer.is_none() {
            return Err(DomainError::bad_request(
                "Provide a question or an answer to update",
            ));
        }

        let errors: Vec<Value> = [
            question.and_then(|value| check_field("question", value, QUESTION_MAX)),
            answer.and_then(|value| check_field("answer", value, ANSWER_MAX)),
        ]
        .into_iter()
        .flatten()
        .collect();

        if !errors.is_empty() {
            return Err(DomainError::validation("Invalid FAQ payload", errors));
        }
        Ok(Self {
            question: question.map(|value| value.trim().to_owned()),
            answer: answer.map(|value| value.trim().to_owned()),
        })
    }

    /// Replacement question, if any.
    pub fn question(&self) -> Option<&str> {
        self.question.as_deref()
    }

    /// Replacement answer, if any.
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }
}

fn check_field(field: &str, value: &str, max: usize) -> Option<Value> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(json!({ "field": field, "message": format!("{field} must not be empty") }));
    }
    if trimmed.chars().count() > max {
        return Some(json!({
            "field": field,
            "message": format!("{field} must be at most {max} characters"),
        }));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn draft_trims_fields() {
        let draft = FaqDraft::new("  Why?  ", " Because. ").expect("valid draft");
        assert_eq!(draft.question(), "Why?");
        assert_eq!(draft.answer(), "Because.");
    }

    #[rstest]
    fn draft_reports_every_blank_field() {
        let err = FaqDraft::new("", "  ").expect_err("blank fields rejected");

        assert_eq!(err.status_code(), 400);
        let fields: Vec<&str> = err
            .errors()
            .iter()
            .filter_map(|detail| detail.get("field").and_then(Value::as_str))
            .collect();
        assert_eq!(fields, ["question", "answer"]);
    }

    #[rstest]
    fn draft_rejects_overlong_question() {
        let question = "q".repeat(QUESTION_MAX + 1);
        let err = FaqDraft::new(&question, "fine").expect_err("too long");
        assert_eq!(err.errors().len(), 1);
    }

    #[rstest]
    fn patch_requires_a_field() {
        let err = FaqPatch::new(None, None).expect_err("empty patch rejected");
        assert_eq!(err.category(), "BAD_REQUEST");
    }

    #[rstest]
    #[case(Some("New?"), None)]
    #[case(None, Some("New."))]
    fn patch_accepts_single_field(#[case] question: Option<&str>, #[case] answer: Option<&str>) {
        let patch = FaqPatch::new(question, answer).expect("valid patch");
        assert_eq!(patch.question(), question);
        assert_eq!(patch.answer(), answer);
    }

    #[rstest]
    fn patch_rejects_blank_supplied_field() {
        let err = FaqPatch::new(Some(" "), Some("ok")).expect_err("blank question");
        assert_eq!(err.category(), "VALIDATION");
    }
}
