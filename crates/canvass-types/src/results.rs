use serde::{Deserialize, Serialize};

use crate::id::{OptionId, QuestionId, SurveyId};
use crate::question::QuestionType;

/// Selection count for a single option.
///
/// Present for every option of the question, in option order, even when
/// the count is zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionCount {
    pub option_id: OptionId,
    pub text: String,
    pub count: u64,
}

/// Aggregated counts for one question.
///
/// `total_responses` counts respondents who answered this question, not
/// option selections; for a MultipleChoice question the option counts may
/// sum to more than the respondent count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResults {
    pub question_id: QuestionId,
    pub text: String,
    pub question_type: QuestionType,
    pub total_responses: u64,
    pub options: Vec<OptionCount>,
}

/// Full aggregation output for a survey.
///
/// `total_responses` here is the number of persisted [`SurveyResponse`]
/// rows (one per respondent), distinct from the per-question counts.
/// Question order and option order mirror the survey definition.
///
/// [`SurveyResponse`]: crate::response::SurveyResponse
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsSummary {
    pub survey_id: SurveyId,
    pub title: String,
    pub total_responses: u64,
    pub questions: Vec<QuestionResults>,
}
