pub mod response;
pub mod submission;

pub use response::{ApiResponse, FieldError};
pub use submission::{SanitizedSubmission, SubmissionInput};
