use serde::{Deserialize, Serialize};

use crate::id::SurveyId;
use crate::status::SurveyStatus;

/// A survey definition record.
///
/// Questions are not embedded; the catalog holds them in their own arena
/// with `survey_id` back-references and assembles ordered views on demand.
/// Status is the only field that changes after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    pub id: SurveyId,
    pub title: String,
    pub description: Option<String>,
    pub status: SurveyStatus,
}
