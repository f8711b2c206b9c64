pub mod submission_client;

pub use submission_client::{Endpoint, SubmissionClient};
