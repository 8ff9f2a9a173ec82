use std::collections::HashMap;
use std::sync::Arc;

use canvass_store::{QuestionView, ResponseStore, SurveyCatalog};
use canvass_types::{AnswerEntry, QuestionId, QuestionResponse, SurveyId, SurveyResponse, UserId};

use crate::error::SubmissionError;
use crate::validate::validate_answer;

/// Accepts raw submissions and persists them one-per-respondent.
///
/// The catalog is read-only here; the response store is the only thing
/// written, and only on the success path.
pub struct SubmissionEngine<S: ResponseStore> {
    catalog: Arc<SurveyCatalog>,
    store: Arc<S>,
}

impl<S: ResponseStore> SubmissionEngine<S> {
    pub fn new(catalog: Arc<SurveyCatalog>, store: Arc<S>) -> Self {
        Self { catalog, store }
    }

    /// Submit one respondent's answers for a survey.
    ///
    /// Order of checks: survey exists, survey is active, respondent has not
    /// already answered, every answer validates. Any failure aborts the
    /// whole submission with zero writes. On success exactly one durable
    /// write happens, and the persisted aggregate (server-assigned id and
    /// timestamp) is returned.
    ///
    /// Entries whose question id is unknown or belongs to another survey
    /// are skipped silently, matching the reference behavior. When the
    /// payload carries several entries for one question, the last wins.
    pub fn submit(
        &self,
        survey_id: SurveyId,
        user_id: UserId,
        answers: &[AnswerEntry],
    ) -> Result<SurveyResponse, SubmissionError> {
        let definition = self
            .catalog
            .survey(survey_id)
            .ok_or(SubmissionError::SurveyNotFound { survey_id })?;

        let status = definition.survey.status;
        if !status.is_active() {
            tracing::debug!(%survey_id, %user_id, %status, "submission rejected: survey not active");
            return Err(SubmissionError::SurveyNotActive { survey_id, status });
        }

        // Fast-path duplicate check. The store's uniqueness constraint
        // backstops the race window between here and the insert.
        if self
            .store
            .contains(survey_id, user_id)
            .map_err(SubmissionError::from_store)?
        {
            tracing::debug!(%survey_id, %user_id, "submission rejected: duplicate");
            return Err(SubmissionError::DuplicateResponse { survey_id, user_id });
        }

        let rows = build_rows(&definition.questions, answers)?;

        let response = SurveyResponse::new(survey_id, user_id, rows);
        self.store
            .insert(response.clone())
            .map_err(SubmissionError::from_store)?;

        tracing::info!(
            %survey_id,
            %user_id,
            response_id = %response.id,
            answers = response.answers.len(),
            "submission accepted"
        );
        Ok(response)
    }
}

/// Validate all answers against the survey's questions, in question order.
///
/// The first validation failure aborts the submission; nothing is built
/// past it.
fn build_rows(
    questions: &[QuestionView],
    answers: &[AnswerEntry],
) -> Result<Vec<QuestionResponse>, SubmissionError> {
    // Last entry wins for duplicated question ids; entries for questions
    // outside this survey simply never match and are dropped.
    let by_question: HashMap<QuestionId, &AnswerEntry> =
        answers.iter().map(|a| (a.question_id, a)).collect();

    let mut rows = Vec::new();
    for question in questions {
        let entry = by_question.get(&question.id()).copied();
        if let Some(row) = validate_answer(question, entry)? {
            rows.push(row);
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use canvass_store::{MemoryResponseStore, NewQuestion, NewSurvey, SurveyDefinition};
    use canvass_types::{OptionId, QuestionType, SurveyStatus};

    use crate::error::AnswerError;

    use super::*;

    struct Fixture {
        catalog: Arc<SurveyCatalog>,
        store: Arc<MemoryResponseStore>,
        engine: SubmissionEngine<MemoryResponseStore>,
    }

    impl Fixture {
        fn new() -> Self {
            let catalog = Arc::new(SurveyCatalog::new());
            let store = Arc::new(MemoryResponseStore::new());
            let engine = SubmissionEngine::new(Arc::clone(&catalog), Arc::clone(&store));
            Self {
                catalog,
                store,
                engine,
            }
        }

        /// One required SingleChoice question with two options, activated.
        fn active_survey(&self) -> SurveyDefinition {
            let definition = self
                .catalog
                .create_survey(NewSurvey {
                    title: "Building feedback".to_string(),
                    description: Some("Quarterly".to_string()),
                    questions: vec![NewQuestion {
                        text: "How satisfied are you?".to_string(),
                        question_type: QuestionType::SingleChoice,
                        required: true,
                        options: vec!["Satisfied".to_string(), "Unsatisfied".to_string()],
                    }],
                })
                .unwrap();
            self.catalog
                .set_status(definition.survey.id, SurveyStatus::Active)
                .unwrap();
            definition
        }
    }

    fn pick(definition: &SurveyDefinition, question: usize, option: usize) -> AnswerEntry {
        let view = &definition.questions[question];
        AnswerEntry {
            question_id: view.id(),
            selected_option_ids: vec![view.options[option].id],
        }
    }

    #[test_log::test]
    fn successful_submission_returns_persisted_receipt() {
        let fx = Fixture::new();
        let definition = fx.active_survey();
        let survey_id = definition.survey.id;

        let receipt = fx
            .engine
            .submit(survey_id, UserId(1), &[pick(&definition, 0, 0)])
            .unwrap();

        assert_eq!(receipt.survey_id, survey_id);
        assert_eq!(receipt.user_id, UserId(1));
        assert_eq!(receipt.answers.len(), 1);
        similar_asserts::assert_eq!(
            fx.store.responses_for(survey_id).unwrap(),
            vec![receipt]
        );
    }

    #[test]
    fn unknown_survey_is_rejected() {
        let fx = Fixture::new();
        let survey_id = SurveyId::generate();
        assert_eq!(
            fx.engine.submit(survey_id, UserId(1), &[]),
            Err(SubmissionError::SurveyNotFound { survey_id })
        );
    }

    #[test]
    fn draft_and_closed_surveys_reject_and_persist_nothing() {
        let fx = Fixture::new();
        let definition = fx.active_survey();
        let survey_id = definition.survey.id;
        let answer = [pick(&definition, 0, 0)];

        for status in [SurveyStatus::Draft, SurveyStatus::Closed] {
            fx.catalog.set_status(survey_id, status).unwrap();
            assert_eq!(
                fx.engine.submit(survey_id, UserId(1), &answer),
                Err(SubmissionError::SurveyNotActive { survey_id, status })
            );
        }
        assert_eq!(fx.store.response_count(survey_id).unwrap(), 0);
    }

    #[test]
    fn second_submission_by_same_user_is_a_duplicate() {
        let fx = Fixture::new();
        let definition = fx.active_survey();
        let survey_id = definition.survey.id;

        fx.engine
            .submit(survey_id, UserId(1), &[pick(&definition, 0, 0)])
            .unwrap();
        // Payload content is irrelevant to duplicate detection.
        assert_eq!(
            fx.engine
                .submit(survey_id, UserId(1), &[pick(&definition, 0, 1)]),
            Err(SubmissionError::DuplicateResponse {
                survey_id,
                user_id: UserId(1)
            })
        );
        assert_eq!(fx.store.response_count(survey_id).unwrap(), 1);
    }

    #[test_log::test]
    fn concurrent_submissions_for_one_pair_admit_exactly_one() {
        let fx = Fixture::new();
        let definition = fx.active_survey();
        let survey_id = definition.survey.id;
        let engine = Arc::new(SubmissionEngine::new(
            Arc::clone(&fx.catalog),
            Arc::clone(&fx.store),
        ));

        let handles: Vec<_> = (0..2)
            .map(|option| {
                let engine = Arc::clone(&engine);
                let answer = pick(&definition, 0, option);
                std::thread::spawn(move || engine.submit(survey_id, UserId(1), &[answer]))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        for result in results.iter().filter(|r| r.is_err()) {
            assert_eq!(
                result.clone().unwrap_err(),
                SubmissionError::DuplicateResponse {
                    survey_id,
                    user_id: UserId(1)
                }
            );
        }
        assert_eq!(fx.store.response_count(survey_id).unwrap(), 1);
    }

    #[test]
    fn validation_failure_aborts_with_zero_writes() {
        let fx = Fixture::new();
        let definition = fx.active_survey();
        let survey_id = definition.survey.id;

        // Required question left unanswered.
        assert_eq!(
            fx.engine.submit(survey_id, UserId(2), &[]),
            Err(SubmissionError::Invalid(AnswerError::RequiredFieldMissing {
                question_id: definition.questions[0].id()
            }))
        );

        // Nonexistent option id.
        let bogus = OptionId::generate();
        let bad_answer = AnswerEntry {
            question_id: definition.questions[0].id(),
            selected_option_ids: vec![bogus],
        };
        assert_eq!(
            fx.engine.submit(survey_id, UserId(2), &[bad_answer]),
            Err(SubmissionError::Invalid(
                AnswerError::InvalidOptionSelection {
                    question_id: definition.questions[0].id(),
                    option_id: bogus
                }
            ))
        );

        assert_eq!(fx.store.response_count(survey_id).unwrap(), 0);
    }

    #[test]
    fn entries_for_unknown_questions_are_skipped() {
        let fx = Fixture::new();
        let definition = fx.active_survey();
        let survey_id = definition.survey.id;

        let stray = AnswerEntry {
            question_id: QuestionId::generate(),
            selected_option_ids: vec![OptionId::generate()],
        };
        let receipt = fx
            .engine
            .submit(survey_id, UserId(1), &[stray, pick(&definition, 0, 0)])
            .unwrap();

        // Only the recognized question produced a row.
        assert_eq!(receipt.answers.len(), 1);
        assert_eq!(
            receipt.answers[0].question_id,
            definition.questions[0].id()
        );
    }

    #[test]
    fn duplicate_entries_for_one_question_keep_the_last() {
        let fx = Fixture::new();
        let definition = fx.active_survey();
        let survey_id = definition.survey.id;

        let first = pick(&definition, 0, 0);
        let second = pick(&definition, 0, 1);
        let receipt = fx
            .engine
            .submit(survey_id, UserId(1), &[first, second.clone()])
            .unwrap();

        assert_eq!(receipt.answers.len(), 1);
        assert_eq!(
            receipt.answers[0].selected_option_ids,
            second.selected_option_ids
        );
    }
}
