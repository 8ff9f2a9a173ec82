use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use canvass_types::{
    OptionId, Question, QuestionId, QuestionOption, QuestionType, Survey, SurveyId, SurveyStatus,
};

use crate::error::CatalogError;

/// Maximum survey title length, in characters.
pub const MAX_TITLE_CHARS: usize = 255;
/// Maximum question text length, in characters.
pub const MAX_QUESTION_TEXT_CHARS: usize = 1000;

/// Payload for creating a survey, before any ids exist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSurvey {
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<NewQuestion>,
}

/// One question within a [`NewSurvey`] payload. Option order is preserved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub text: String,
    pub question_type: QuestionType,
    pub required: bool,
    pub options: Vec<String>,
}

/// A question with its ordered options, assembled from the arenas.
///
/// Carries an option-id set so the validator's membership checks are O(1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub question: Question,
    pub options: Vec<QuestionOption>,
    option_ids: HashSet<OptionId>,
}

impl QuestionView {
    fn new(question: Question, options: Vec<QuestionOption>) -> Self {
        let option_ids = options.iter().map(|o| o.id).collect();
        Self {
            question,
            options,
            option_ids,
        }
    }

    /// Whether `option_id` belongs to this question's option set.
    pub fn has_option(&self, option_id: OptionId) -> bool {
        self.option_ids.contains(&option_id)
    }

    pub fn id(&self) -> QuestionId {
        self.question.id
    }
}

/// A survey with its questions in definition order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SurveyDefinition {
    pub survey: Survey,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Default)]
struct CatalogState {
    surveys: HashMap<SurveyId, Survey>,
    questions: HashMap<QuestionId, Question>,
    options: HashMap<OptionId, QuestionOption>,
    // Definition order, per parent.
    survey_questions: HashMap<SurveyId, Vec<QuestionId>>,
    question_options: HashMap<QuestionId, Vec<OptionId>>,
}

/// Id-keyed arenas for survey/question/option definitions.
///
/// Definitions are effectively immutable after creation; survey status is
/// the only mutable field. Submission and aggregation treat the catalog as
/// read-only, so reads take the shared lock and clone out what they need.
#[derive(Debug, Default)]
pub struct SurveyCatalog {
    inner: RwLock<CatalogState>,
}

impl SurveyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a definition payload, assign ids and positions, and store it.
    ///
    /// New surveys start in `Draft`; nothing is stored when validation fails.
    pub fn create_survey(&self, new: NewSurvey) -> Result<SurveyDefinition, CatalogError> {
        validate_definition(&new)?;

        let survey = Survey {
            id: SurveyId::generate(),
            title: new.title,
            description: new.description,
            status: SurveyStatus::Draft,
        };

        let mut question_views = Vec::with_capacity(new.questions.len());
        for (position, nq) in new.questions.into_iter().enumerate() {
            let question = Question {
                id: QuestionId::generate(),
                survey_id: survey.id,
                text: nq.text,
                question_type: nq.question_type,
                required: nq.required,
                position: position as u32,
            };
            let options = nq
                .options
                .into_iter()
                .enumerate()
                .map(|(opt_position, text)| QuestionOption {
                    id: OptionId::generate(),
                    question_id: question.id,
                    text,
                    position: opt_position as u32,
                })
                .collect();
            question_views.push(QuestionView::new(question, options));
        }

        let mut state = self.write();
        state.surveys.insert(survey.id, survey.clone());
        let mut question_order = Vec::with_capacity(question_views.len());
        for view in &question_views {
            question_order.push(view.question.id);
            state
                .questions
                .insert(view.question.id, view.question.clone());
            let option_order = view.options.iter().map(|o| o.id).collect();
            state.question_options.insert(view.question.id, option_order);
            for option in &view.options {
                state.options.insert(option.id, option.clone());
            }
        }
        state.survey_questions.insert(survey.id, question_order);
        drop(state);

        tracing::info!(
            survey_id = %survey.id,
            questions = question_views.len(),
            "survey created"
        );

        Ok(SurveyDefinition {
            survey,
            questions: question_views,
        })
    }

    /// The survey with its ordered questions and options, or `None` if absent.
    pub fn survey(&self, survey_id: SurveyId) -> Option<SurveyDefinition> {
        let state = self.read();
        let survey = state.surveys.get(&survey_id)?.clone();
        let questions = assemble_questions(&state, survey_id);
        Some(SurveyDefinition { survey, questions })
    }

    pub fn survey_status(&self, survey_id: SurveyId) -> Option<SurveyStatus> {
        self.read().surveys.get(&survey_id).map(|s| s.status)
    }

    /// Caller-directed status transition; any transition is permitted.
    pub fn set_status(
        &self,
        survey_id: SurveyId,
        status: SurveyStatus,
    ) -> Result<(), CatalogError> {
        let mut state = self.write();
        let survey = state
            .surveys
            .get_mut(&survey_id)
            .ok_or(CatalogError::SurveyNotFound { survey_id })?;
        let previous = survey.status;
        survey.status = status;
        drop(state);

        tracing::info!(%survey_id, %previous, %status, "survey status changed");
        Ok(())
    }

    /// Ordered question views for a survey. Empty if the survey is unknown.
    pub fn questions(&self, survey_id: SurveyId) -> Vec<QuestionView> {
        assemble_questions(&self.read(), survey_id)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, CatalogState> {
        // A poisoning panic cannot leave the arenas half-written: all
        // mutations are plain map inserts ordered after validation.
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, CatalogState> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn assemble_questions(state: &CatalogState, survey_id: SurveyId) -> Vec<QuestionView> {
    let Some(order) = state.survey_questions.get(&survey_id) else {
        return Vec::new();
    };
    order
        .iter()
        .filter_map(|qid| {
            let question = state.questions.get(qid)?.clone();
            let options = state
                .question_options
                .get(qid)
                .map(|opt_order| {
                    opt_order
                        .iter()
                        .filter_map(|oid| state.options.get(oid).cloned())
                        .collect()
                })
                .unwrap_or_default();
            Some(QuestionView::new(question, options))
        })
        .collect()
}

fn validate_definition(new: &NewSurvey) -> Result<(), CatalogError> {
    let title_chars = new.title.chars().count();
    if title_chars == 0 {
        return Err(CatalogError::EmptyTitle);
    }
    if title_chars > MAX_TITLE_CHARS {
        return Err(CatalogError::TitleTooLong {
            length: title_chars,
            max: MAX_TITLE_CHARS,
        });
    }
    if new.questions.is_empty() {
        return Err(CatalogError::NoQuestions);
    }
    for (index, question) in new.questions.iter().enumerate() {
        let text_chars = question.text.chars().count();
        if text_chars == 0 {
            return Err(CatalogError::EmptyQuestionText { index });
        }
        if text_chars > MAX_QUESTION_TEXT_CHARS {
            return Err(CatalogError::QuestionTextTooLong {
                index,
                length: text_chars,
                max: MAX_QUESTION_TEXT_CHARS,
            });
        }
        // SingleChoice and MultipleChoice are both option-backed.
        if question.options.is_empty() {
            return Err(CatalogError::ChoiceQuestionWithoutOptions { index });
        }
    }
    Ok(())
}
