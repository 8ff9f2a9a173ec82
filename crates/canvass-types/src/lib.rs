pub mod id;
pub mod question;
pub mod response;
pub mod results;
pub mod status;
pub mod survey;

pub use id::{OptionId, QuestionId, QuestionResponseId, ResponseId, SurveyId, UserId};
pub use question::{Question, QuestionOption, QuestionType};
pub use response::{AnswerEntry, QuestionResponse, SurveyResponse};
pub use results::{OptionCount, QuestionResults, ResultsSummary};
pub use status::{StatusParseError, SurveyStatus};
pub use survey::Survey;
