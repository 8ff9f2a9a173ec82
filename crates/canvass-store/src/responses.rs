use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use canvass_types::{ResponseId, SurveyId, SurveyResponse, UserId};

use crate::error::StoreError;

/// The engine's only mutable collaborator: durable survey responses.
///
/// Implementations must make [`insert`](ResponseStore::insert) atomic with
/// respect to the (survey, user) uniqueness constraint: a concurrent
/// duplicate submission must lose deterministically, either here or in the
/// engine's pre-check. Reads must never observe a half-written response.
pub trait ResponseStore: Send + Sync {
    /// Persist a response as one atomic unit.
    ///
    /// Fails with [`StoreError::DuplicateResponse`] when a response for the
    /// same (survey, user) pair already exists; nothing is written in that
    /// case.
    fn insert(&self, response: SurveyResponse) -> Result<(), StoreError>;

    /// Whether a response exists for the pair. Fast-path duplicate pre-check.
    fn contains(&self, survey_id: SurveyId, user_id: UserId) -> Result<bool, StoreError>;

    /// Snapshot of all responses for a survey, in insertion order.
    fn responses_for(&self, survey_id: SurveyId) -> Result<Vec<SurveyResponse>, StoreError>;

    /// Number of persisted responses for a survey.
    fn response_count(&self, survey_id: SurveyId) -> Result<u64, StoreError>;
}

#[derive(Debug, Default)]
struct ResponseRows {
    rows: HashMap<ResponseId, SurveyResponse>,
    // The uniqueness constraint on (survey_id, user_id).
    respondent_index: HashSet<(SurveyId, UserId)>,
    // Insertion order per survey, for stable aggregation snapshots.
    by_survey: HashMap<SurveyId, Vec<ResponseId>>,
}

/// Reference in-memory [`ResponseStore`].
///
/// One `RwLock` guards rows, the uniqueness index, and the per-survey order
/// together, so the duplicate check and the write happen under a single
/// write-lock acquisition. Never emits [`StoreError::Backend`].
#[derive(Debug, Default)]
pub struct MemoryResponseStore {
    inner: RwLock<ResponseRows>,
}

impl MemoryResponseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResponseStore for MemoryResponseStore {
    fn insert(&self, response: SurveyResponse) -> Result<(), StoreError> {
        let key = (response.survey_id, response.user_id);
        let mut state = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if state.respondent_index.contains(&key) {
            return Err(StoreError::DuplicateResponse {
                survey_id: response.survey_id,
                user_id: response.user_id,
            });
        }
        state.respondent_index.insert(key);
        state
            .by_survey
            .entry(response.survey_id)
            .or_default()
            .push(response.id);
        tracing::debug!(
            response_id = %response.id,
            survey_id = %response.survey_id,
            user_id = %response.user_id,
            answers = response.answers.len(),
            "response persisted"
        );
        state.rows.insert(response.id, response);
        Ok(())
    }

    fn contains(&self, survey_id: SurveyId, user_id: UserId) -> Result<bool, StoreError> {
        let state = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(state.respondent_index.contains(&(survey_id, user_id)))
    }

    fn responses_for(&self, survey_id: SurveyId) -> Result<Vec<SurveyResponse>, StoreError> {
        let state = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let ids = match state.by_survey.get(&survey_id) {
            Some(ids) => ids,
            None => return Ok(Vec::new()),
        };
        Ok(ids
            .iter()
            .filter_map(|id| state.rows.get(id).cloned())
            .collect())
    }

    fn response_count(&self, survey_id: SurveyId) -> Result<u64, StoreError> {
        let state = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(state
            .by_survey
            .get(&survey_id)
            .map(|ids| ids.len() as u64)
            .unwrap_or(0))
    }
}
