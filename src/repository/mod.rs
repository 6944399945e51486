pub mod repository_error;
pub mod submission_repo;
