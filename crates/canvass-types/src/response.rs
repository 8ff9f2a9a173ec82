use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{OptionId, QuestionId, QuestionResponseId, ResponseId, SurveyId, UserId};

/// One raw answer in a submission payload, as supplied by the caller.
///
/// Nothing here is trusted: the question may not belong to the target
/// survey (such entries are skipped) and the option ids are validated
/// against the question's option set before anything persists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub question_id: QuestionId,
    pub selected_option_ids: Vec<OptionId>,
}

/// A validated, persisted answer to one question.
///
/// Owned by its parent [`SurveyResponse`]; the parent link is structural
/// (children are embedded in the aggregate) rather than a stored foreign key.
/// `selected_option_ids` is non-empty by construction: an empty selection
/// counts as "not answered" and produces no row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub id: QuestionResponseId,
    pub question_id: QuestionId,
    pub selected_option_ids: Vec<OptionId>,
}

impl QuestionResponse {
    pub fn new(question_id: QuestionId, selected_option_ids: Vec<OptionId>) -> Self {
        Self {
            id: QuestionResponseId::generate(),
            question_id,
            selected_option_ids,
        }
    }
}

/// One respondent's complete answer set for one survey.
///
/// At most one exists per (survey, user) pair, for all time; the store
/// enforces this as a uniqueness constraint. Immutable once persisted:
/// there is no update or delete path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub id: ResponseId,
    pub survey_id: SurveyId,
    pub user_id: UserId,
    pub submitted_at: DateTime<Utc>,
    pub answers: Vec<QuestionResponse>,
}

impl SurveyResponse {
    /// Assemble a new aggregate with a server-assigned id and timestamp.
    pub fn new(survey_id: SurveyId, user_id: UserId, answers: Vec<QuestionResponse>) -> Self {
        Self {
            id: ResponseId::generate(),
            survey_id,
            user_id,
            submitted_at: Utc::now(),
            answers,
        }
    }

    /// The persisted answer for `question_id`, if the respondent answered it.
    pub fn answer_for(&self, question_id: QuestionId) -> Option<&QuestionResponse> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }
}
