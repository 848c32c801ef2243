use async_trait::async_trait;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};

use super::error::StorageError;
use super::traits::{ObjectStore, validate_key};

/// Connection settings for an S3-compatible bucket.
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible services (MinIO, R2, ...).
    pub endpoint: Option<String>,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub path_style: bool,
}

/// Object store backed by an S3 bucket (the `aws-s3` upload provider).
pub struct S3ObjectStore {
    bucket: Box<Bucket>,
    origin: String,
    max_size: u64,
}

impl S3ObjectStore {
    pub fn new(settings: &S3Settings, max_size: u64) -> Result<Self, StorageError> {
        let region = match &settings.endpoint {
            Some(endpoint) => Region::Custom {
                region: settings.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => settings
                .region
                .parse::<Region>()
                .map_err(|e| StorageError::Backend(format!("invalid region: {e}")))?,
        };

        let credentials = Credentials::new(
            Some(&settings.access_key_id),
            Some(&settings.secret_access_key),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Backend(format!("invalid credentials: {e}")))?;

        let mut bucket = Bucket::new(&settings.bucket, region, credentials).map_err(backend)?;
        if settings.path_style {
            bucket = bucket.with_path_style();
        }

        Ok(Self {
            bucket,
            origin: origin_url(settings),
            max_size,
        })
    }
}

/// Public origin of objects in the bucket, before any CDN rewriting.
fn origin_url(settings: &S3Settings) -> String {
    match &settings.endpoint {
        Some(endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), settings.bucket),
        None => format!(
            "https://{}.s3.{}.amazonaws.com",
            settings.bucket, settings.region
        ),
    }
}

fn backend(err: S3Error) -> StorageError {
    StorageError::Backend(err.to_string())
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn provider(&self) -> &'static str {
        "aws-s3"
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.origin, key)
    }

    async fn put(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        let key = validate_key(key)?;
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let response = self
            .bucket
            .put_object_with_content_type(key, data, content_type)
            .await
            .map_err(backend)?;
        let status = response.status_code();
        if !is_success(status) {
            tracing::error!(key, status, bucket = %self.bucket.name(), "S3 rejected object upload");
            return Err(StorageError::Backend(format!(
                "PUT {key} returned status {status}"
            )));
        }

        Ok(self.url_for(key))
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let key = validate_key(key)?;
        match self.bucket.head_object(key).await {
            Ok((_, status)) if is_success(status) => Ok(true),
            Ok((_, 404)) | Err(S3Error::HttpFailWithBody(404, _)) => Ok(false),
            Ok((_, status)) => Err(StorageError::Backend(format!(
                "HEAD {key} returned status {status}"
            ))),
            Err(e) => Err(backend(e)),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        // S3 deletes are idempotent and do not report whether the key existed.
        if !self.exists(key).await? {
            return Ok(false);
        }
        let response = self.bucket.delete_object(key).await.map_err(backend)?;
        let status = response.status_code();
        if !is_success(status) {
            return Err(StorageError::Backend(format!(
                "DELETE {key} returned status {status}"
            )));
        }
        Ok(true)
    }
}
