use serde::{Deserialize, Serialize};

use crate::id::{OptionId, QuestionId, SurveyId};

/// Kind of choice question.
///
/// Both kinds are backed by an option set; the distinction matters to
/// presentation and (eventually) selection-count rules. Text and upload
/// question types are out of scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
}

impl QuestionType {
    /// Variant name for logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SingleChoice => "SingleChoice",
            Self::MultipleChoice => "MultipleChoice",
        }
    }
}

/// A question definition record.
///
/// Arena-style: owned by the catalog, keyed by id, with a `survey_id`
/// back-reference instead of being embedded in the survey. `position` is
/// the 0-based slot in the survey's question order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub survey_id: SurveyId,
    pub text: String,
    pub question_type: QuestionType,
    pub required: bool,
    pub position: u32,
}

/// An option definition record, owned exclusively by one question.
///
/// Responses reference options by id only; they never own them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: OptionId,
    pub question_id: QuestionId,
    pub text: String,
    pub position: u32,
}
