use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Answers keyed by custom question id.
pub type Answers = BTreeMap<String, String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Text,
    Email,
    Phone,
    Select,
}

/// A tenant-defined question shown on the entry form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CustomQuestion {
    #[schema(example = "q1")]
    pub id: String,
    #[schema(example = "Which store do you visit most?")]
    pub question_text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Allowed values. Required and non-empty for `select`, empty otherwise.
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionError {
    #[error("question id must not be empty")]
    EmptyId,
    #[error("question id '{0}' has leading or trailing whitespace")]
    PaddedId(String),
    #[error("question '{0}' has no text")]
    EmptyText(String),
    #[error("select question '{0}' needs at least one option")]
    MissingOptions(String),
    #[error("question '{0}' only takes options when its type is select")]
    UnexpectedOptions(String),
    #[error("question '{0}' has a blank option")]
    BlankOption(String),
}

impl CustomQuestion {
    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.id.trim().is_empty() {
            return Err(QuestionError::EmptyId);
        }
        if self.id.trim() != self.id {
            return Err(QuestionError::PaddedId(self.id.clone()));
        }
        if self.question_text.trim().is_empty() {
            return Err(QuestionError::EmptyText(self.id.clone()));
        }
        match self.question_type {
            QuestionType::Select if self.options.is_empty() => {
                Err(QuestionError::MissingOptions(self.id.clone()))
            }
            QuestionType::Select if self.options.iter().any(|o| o.trim().is_empty()) => {
                Err(QuestionError::BlankOption(self.id.clone()))
            }
            QuestionType::Select => Ok(()),
            _ if !self.options.is_empty() => Err(QuestionError::UnexpectedOptions(self.id.clone())),
            _ => Ok(()),
        }
    }
}

/// Why a set of answers was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("question '{question_id}' requires an answer")]
    MissingRequiredAnswer { question_id: String },
    #[error("'{value}' is not an option of question '{question_id}'")]
    InvalidAnswerOption { question_id: String, value: String },
}

/// Check submitted answers against the campaign's questions.
///
/// Every required question is checked before any select option, so a missing
/// answer is always reported ahead of an invalid one. Answers to unknown
/// question ids are dropped and values are trimmed; blank answers to optional
/// questions are omitted from the result.
pub fn check_answers(questions: &[CustomQuestion], answers: &Answers) -> Result<Answers, AnswerError> {
    let answer_for = |q: &CustomQuestion| {
        answers
            .get(&q.id)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    };

    for question in questions.iter().filter(|q| q.required) {
        if answer_for(question).is_none() {
            return Err(AnswerError::MissingRequiredAnswer {
                question_id: question.id.clone(),
            });
        }
    }

    let mut accepted = Answers::new();
    for question in questions {
        let Some(value) = answer_for(question) else {
            continue;
        };
        if question.question_type == QuestionType::Select
            && !question.options.iter().any(|o| o == value)
        {
            return Err(AnswerError::InvalidAnswerOption {
                question_id: question.id.clone(),
                value: value.to_string(),
            });
        }
        accepted.insert(question.id.clone(), value.to_string());
    }

    Ok(accepted)
}
