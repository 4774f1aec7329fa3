pub mod submission_status;

pub use submission_status::SubmissionStatus;
