//! Response submission and results aggregation for the canvass survey system.
//!
//! Two engines share the same read-only [`SurveyCatalog`] and a
//! [`ResponseStore`]:
//! - [`SubmissionEngine`]: validates a raw submission against the survey's
//!   question set and persists at most one response per (survey, user) pair,
//!   all-or-nothing.
//! - [`ResultsEngine`]: folds all persisted responses into per-question,
//!   per-option counts in definition order.
//!
//! [`SurveyCatalog`]: canvass_store::SurveyCatalog
//! [`ResponseStore`]: canvass_store::ResponseStore

pub mod aggregate;
pub mod error;
pub mod submit;
pub mod validate;

pub use aggregate::ResultsEngine;
pub use error::{AnswerError, ResultsError, SubmissionError};
pub use submit::SubmissionEngine;
pub use validate::validate_answer;
