use std::collections::HashMap;
use std::sync::Arc;

use canvass_store::{ResponseStore, SurveyCatalog};
use canvass_types::{OptionCount, OptionId, QuestionResults, ResultsSummary, SurveyId};

use crate::error::ResultsError;

/// Read-only fold of all persisted responses into per-option counts.
///
/// Runs concurrently with submissions without coordination: the store
/// snapshot sees each response entirely or not at all, so results are
/// eventually consistent but never torn.
pub struct ResultsEngine<S: ResponseStore> {
    catalog: Arc<SurveyCatalog>,
    store: Arc<S>,
}

impl<S: ResponseStore> ResultsEngine<S> {
    pub fn new(catalog: Arc<SurveyCatalog>, store: Arc<S>) -> Self {
        Self { catalog, store }
    }

    /// Aggregate counts for every question of a survey.
    ///
    /// Counters are zero-initialized per option in definition order, so
    /// options nobody selected appear with count 0 rather than being
    /// omitted. The survey-level `total_responses` counts respondents;
    /// each question's `total_responses` counts respondents who answered
    /// that question.
    pub fn aggregate(&self, survey_id: SurveyId) -> Result<ResultsSummary, ResultsError> {
        let definition = self
            .catalog
            .survey(survey_id)
            .ok_or(ResultsError::SurveyNotFound { survey_id })?;
        let responses = self
            .store
            .responses_for(survey_id)
            .map_err(ResultsError::from_store)?;

        let questions = definition
            .questions
            .iter()
            .map(|view| {
                let mut counts: HashMap<OptionId, u64> =
                    view.options.iter().map(|o| (o.id, 0)).collect();
                let mut answered = 0u64;
                for response in &responses {
                    let Some(answer) = response.answer_for(view.id()) else {
                        continue;
                    };
                    answered += 1;
                    for option_id in &answer.selected_option_ids {
                        // Ids outside the option set cannot come from the
                        // validator; a corrupt row lands in no bucket
                        // instead of panicking.
                        if let Some(count) = counts.get_mut(option_id) {
                            *count += 1;
                        }
                    }
                }
                QuestionResults {
                    question_id: view.id(),
                    text: view.question.text.clone(),
                    question_type: view.question.question_type,
                    total_responses: answered,
                    options: view
                        .options
                        .iter()
                        .map(|option| OptionCount {
                            option_id: option.id,
                            text: option.text.clone(),
                            count: counts.get(&option.id).copied().unwrap_or(0),
                        })
                        .collect(),
                }
            })
            .collect();

        tracing::debug!(
            %survey_id,
            responses = responses.len(),
            "aggregated survey results"
        );

        Ok(ResultsSummary {
            survey_id,
            title: definition.survey.title,
            total_responses: responses.len() as u64,
            questions,
        })
    }
}
