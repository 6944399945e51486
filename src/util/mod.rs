pub mod minio;
pub mod geoapify;
pub mod gemini;
pub mod logger;
pub mod error;
