use crate::config::MinioConfig;
use async_trait::async_trait;
use minio::s3::args::{BucketExistsArgs, MakeBucketArgs, PutObjectArgs};
use minio::s3::client::{Client, ClientBuilder};
use minio::s3::creds::StaticProvider;
use minio::s3::http::BaseUrl;
use std::io::Cursor;
use tracing::{debug, error, info, instrument, warn};

/// Durable storage for uploaded blobs.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(
        &self,
        object_name: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), MinioError>;

    /// Public locator for a stored object
    fn public_url(&self, object_name: &str) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum MinioError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Operation error: {0}")]
    OperationError(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

/// Upload bucket backed by a MinIO (or any S3-compatible) server.
#[derive(Debug, Clone)]
pub struct MinioService {
    client: Client,
    pub config: MinioConfig,
}

fn build_client(config: &MinioConfig) -> Result<Client, MinioError> {
    let endpoint = config.get_endpoint_url();
    let base_url = endpoint
        .parse::<BaseUrl>()
        .map_err(|e| MinioError::ConnectionError(format!("Invalid endpoint URL {}: {}", endpoint, e)))?;

    let credentials = StaticProvider::new(&config.access_key, &config.secret_key, None);
    ClientBuilder::new(base_url)
        .provider(Some(Box::new(credentials)))
        .build()
        .map_err(|e| MinioError::ConnectionError(format!("Client creation failed: {}", e)))
}

impl MinioService {
    /// Connects and makes sure the upload bucket exists.
    #[instrument(skip(config), fields(endpoint = %config.endpoint, bucket = %config.bucket_name))]
    pub async fn new(config: MinioConfig) -> Result<Self, MinioError> {
        config
            .validate()
            .map_err(|e| MinioError::ConfigError(e.to_string()))?;

        let client = build_client(&config).map_err(|e| {
            error!("Object storage client unavailable: {}", e);
            e
        })?;

        let service = Self { client, config };
        service.ensure_bucket_exists().await?;
        info!("Object storage ready");
        Ok(service)
    }

    async fn ensure_bucket_exists(&self) -> Result<(), MinioError> {
        let bucket = self.config.bucket_name.as_str();

        let probe = BucketExistsArgs::new(bucket).map_err(|e| MinioError::InvalidArguments(e.to_string()))?;
        let exists = self.client.bucket_exists(&probe).await.map_err(|e| {
            error!("Bucket lookup for '{}' failed: {}", bucket, e);
            MinioError::OperationError(format!("Bucket exists check failed: {}", e))
        })?;
        if exists {
            debug!("Bucket '{}' present", bucket);
            return Ok(());
        }

        warn!("Bucket '{}' missing, creating it", bucket);
        let create = MakeBucketArgs::new(bucket).map_err(|e| MinioError::InvalidArguments(e.to_string()))?;
        self.client.make_bucket(&create).await.map_err(|e| {
            error!("Creating bucket '{}' failed: {}", bucket, e);
            MinioError::OperationError(format!("Bucket creation failed: {}", e))
        })?;
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for MinioService {
    #[instrument(skip(self, data), fields(object_name = %object_name, size = data.len()))]
    async fn put_object(
        &self,
        object_name: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), MinioError> {
        let client = self.client.clone();
        let bucket = self.config.bucket_name.clone();
        let object = object_name.to_string();
        let content_type = content_type.filter(|ct| !ct.is_empty()).map(str::to_string);

        // PutObjectArgs borrows a `&mut dyn Read`, which is not Send
        let result = tokio::task::spawn_blocking(move || {
            let size = data.len();
            let mut reader = Cursor::new(data);
            let mut args = PutObjectArgs::new(&bucket, &object, &mut reader, Some(size), None)
                .map_err(|e| MinioError::InvalidArguments(e.to_string()))?;
            if let Some(ct) = content_type.as_deref() {
                args.content_type = ct;
            }
            futures::executor::block_on(client.put_object(&mut args))
                .map(|_| ())
                .map_err(|e| MinioError::OperationError(format!("Upload failed: {}", e)))
        })
        .await
        .map_err(|e| MinioError::OperationError(format!("Upload task aborted: {}", e)))?;

        match &result {
            Ok(()) => info!("Stored object '{}'", object_name),
            Err(e) => error!("Storing object '{}' failed: {}", object_name, e),
        }
        result
    }

    fn public_url(&self, object_name: &str) -> String {
        self.config.public_url(object_name)
    }
}
