pub mod submission_router;
pub mod upload_router;
pub mod proxy_router;
