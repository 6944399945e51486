pub mod submission_handler;
pub mod upload_handler;
pub mod estimate_handler;
pub mod autocomplete_handler;
