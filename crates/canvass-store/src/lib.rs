pub mod catalog;
pub mod error;
pub mod responses;

pub use catalog::{NewQuestion, NewSurvey, QuestionView, SurveyCatalog, SurveyDefinition};
pub use error::{CatalogError, StoreError};
pub use responses::{MemoryResponseStore, ResponseStore};
