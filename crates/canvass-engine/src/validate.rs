use canvass_store::QuestionView;
use canvass_types::{AnswerEntry, QuestionResponse};

use crate::error::AnswerError;

/// Validate one raw answer against its question definition.
///
/// Returns:
/// - `Ok(Some(_))`: answered with a non-empty, fully valid selection.
/// - `Ok(None)`: not answered and the question is optional. An entry with
///   an empty selection list counts as "not answered".
/// - `Err(RequiredFieldMissing)`: not answered but required.
/// - `Err(InvalidOptionSelection)`: a selected id is outside the
///   question's option set; the first offender is reported.
///
/// The selection count is deliberately unbounded for `SingleChoice`: the
/// reference behavior accepts multiple ids there, and tightening it would
/// change which payloads are accepted. Entries referencing questions that
/// do not belong to the target survey never reach this function; the
/// submission engine skips them.
pub fn validate_answer(
    question: &QuestionView,
    entry: Option<&AnswerEntry>,
) -> Result<Option<QuestionResponse>, AnswerError> {
    let question_id = question.id();

    let selected = match entry {
        Some(entry) if !entry.selected_option_ids.is_empty() => &entry.selected_option_ids,
        _ => {
            if question.question.required {
                return Err(AnswerError::RequiredFieldMissing { question_id });
            }
            return Ok(None);
        }
    };

    for &option_id in selected {
        if !question.has_option(option_id) {
            return Err(AnswerError::InvalidOptionSelection {
                question_id,
                option_id,
            });
        }
    }

    Ok(Some(QuestionResponse::new(question_id, selected.clone())))
}
