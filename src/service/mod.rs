pub mod submission_service;
pub mod upload_service;
pub mod estimate_service;
pub mod autocomplete_service;
