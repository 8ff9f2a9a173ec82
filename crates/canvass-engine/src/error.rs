use canvass_store::StoreError;
use canvass_types::{OptionId, QuestionId, SurveyId, SurveyStatus, UserId};

/// Validation failure for a single answer. Terminal: the caller must
/// correct the payload and resubmit.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    /// A required question has no answer. An entry with an empty selection
    /// list counts as no answer.
    #[error("question {question_id} is required but has no answer")]
    RequiredFieldMissing { question_id: QuestionId },

    /// A selected option id does not belong to the question's option set.
    #[error("option {option_id} does not belong to question {question_id}")]
    InvalidOptionSelection {
        question_id: QuestionId,
        option_id: OptionId,
    },
}

/// Why a submission was rejected. Every variant is all-or-nothing: no
/// partial rows persist on any failure path.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("survey {survey_id} not found")]
    SurveyNotFound { survey_id: SurveyId },

    /// Business-rule rejection, not transient: the survey is in `Draft` or
    /// `Closed` and transitions only by explicit caller action.
    #[error("survey {survey_id} is {status}, not accepting responses")]
    SurveyNotActive {
        survey_id: SurveyId,
        status: SurveyStatus,
    },

    /// The (survey, user) pair already has a response. Raised by the
    /// pre-check or by the store's uniqueness constraint when a concurrent
    /// duplicate loses the race; the two are indistinguishable to callers.
    #[error("{user_id} already responded to survey {survey_id}")]
    DuplicateResponse {
        survey_id: SurveyId,
        user_id: UserId,
    },

    #[error(transparent)]
    Invalid(#[from] AnswerError),

    /// Backend persistence failure. Nothing was committed, so retrying the
    /// whole submission is safe.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl SubmissionError {
    /// Map a store failure onto the caller-facing taxonomy.
    ///
    /// A uniqueness violation from the insert is the same business outcome
    /// as the pre-check firing, so both surface as `DuplicateResponse`.
    pub(crate) fn from_store(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateResponse { survey_id, user_id } => {
                Self::DuplicateResponse { survey_id, user_id }
            }
            StoreError::Backend { message } => Self::Storage(message),
        }
    }
}

/// Why an aggregation request failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResultsError {
    #[error("survey {survey_id} not found")]
    SurveyNotFound { survey_id: SurveyId },

    #[error("storage failure: {0}")]
    Storage(String),
}

impl ResultsError {
    pub(crate) fn from_store(err: StoreError) -> Self {
        match err {
            // Aggregation never writes; a duplicate error here means the
            // store trait contract was violated.
            StoreError::DuplicateResponse { survey_id, user_id } => Self::Storage(format!(
                "unexpected uniqueness error reading survey {survey_id} for {user_id}"
            )),
            StoreError::Backend { message } => Self::Storage(message),
        }
    }
}
