use canvass_types::{SurveyId, UserId};

/// Errors from survey catalog operations.
///
/// The definition-validation variants carry the 0-based question index so
/// callers can point at the offending entry in the submitted payload.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("survey {survey_id} not found")]
    SurveyNotFound { survey_id: SurveyId },

    #[error("survey title must not be empty")]
    EmptyTitle,

    #[error("survey title is {length} characters, maximum is {max}")]
    TitleTooLong { length: usize, max: usize },

    #[error("a survey must contain at least one question")]
    NoQuestions,

    #[error("question {index} has empty text")]
    EmptyQuestionText { index: usize },

    #[error("question {index} text is {length} characters, maximum is {max}")]
    QuestionTextTooLong {
        index: usize,
        length: usize,
        max: usize,
    },

    #[error("choice question {index} has no options")]
    ChoiceQuestionWithoutOptions { index: usize },
}

/// Errors from the response store.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The (survey, user) uniqueness constraint was violated. Raised by the
    /// atomic check-and-insert; never a transient condition.
    #[error("a response for survey {survey_id} by {user_id} already exists")]
    DuplicateResponse {
        survey_id: SurveyId,
        user_id: UserId,
    },

    /// Backend failure unrelated to uniqueness. Nothing was committed, so
    /// retrying the whole operation is safe. The in-memory store never
    /// emits this; fallible backends do.
    #[error("storage backend failure: {message}")]
    Backend { message: String },
}
