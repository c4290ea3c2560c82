//! Object storage destination (local, S3, R2, GCS, Azure)

use crate::error::{Error, Result};
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::sync::Arc;
use tracing::debug;

/// Storage destination parsed from URL
///
/// Every object name is resolved under the URL's path prefix.
#[derive(Debug, Clone)]
pub struct CloudDestination {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Base path prefix within the bucket/container
    prefix: String,
    /// URL scheme (s3, r2, gs, az, file)
    scheme: String,
    /// Bucket URL or local directory, used to build locations
    base: String,
}

impl CloudDestination {
    /// Parse a destination URL and create the matching object store
    ///
    /// Supported formats:
    /// - `s3://bucket/path/` - AWS S3
    /// - `r2://bucket/path/` - Cloudflare R2 (S3-compatible)
    /// - `gs://bucket/path/` - Google Cloud Storage
    /// - `az://container/path/` - Azure Blob Storage
    /// - `/local/path/`, `./path/` or `file:///path` - Local filesystem
    pub fn parse(url: &str) -> Result<Self> {
        if url.starts_with("s3://") {
            Self::parse_s3(url, false)
        } else if url.starts_with("r2://") {
            Self::parse_s3(url, true)
        } else if url.starts_with("gs://") {
            Self::parse_gcs(url)
        } else if url.starts_with("az://") {
            Self::parse_azure(url)
        } else {
            Self::parse_local(url)
        }
    }

    /// Wrap an existing store
    pub fn from_store(
        store: Arc<dyn ObjectStore>,
        scheme: impl Into<String>,
        base: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            scheme: scheme.into(),
            base: base.into(),
        }
    }

    fn split_bucket<'a>(url: &'a str, scheme: &str) -> Result<(&'a str, String)> {
        let without_scheme = url
            .strip_prefix(&format!("{scheme}://"))
            .ok_or_else(|| Error::config(format!("Invalid {scheme} URL: {url}")))?;

        let (bucket, prefix) = match without_scheme.find('/') {
            Some(idx) => (
                &without_scheme[..idx],
                without_scheme[idx + 1..].trim_end_matches('/').to_string(),
            ),
            None => (without_scheme, String::new()),
        };

        if bucket.is_empty() {
            return Err(Error::config(format!("Missing bucket in URL: {url}")));
        }
        Ok((bucket, prefix))
    }

    /// Parse S3 or R2 URL
    fn parse_s3(url: &str, is_r2: bool) -> Result<Self> {
        let scheme = if is_r2 { "r2" } else { "s3" };
        let (bucket, prefix) = Self::split_bucket(url, scheme)?;

        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);

        // R2 endpoint: https://<account_id>.r2.cloudflarestorage.com
        if is_r2 {
            if let Ok(endpoint) = std::env::var("R2_ENDPOINT_URL") {
                builder = builder.with_endpoint(endpoint);
            }
        }

        let store = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create {scheme} client: {e}")))?;

        Ok(Self::from_store(
            Arc::new(store),
            scheme,
            format!("{scheme}://{bucket}"),
            prefix,
        ))
    }

    /// Parse GCS URL
    fn parse_gcs(url: &str) -> Result<Self> {
        let (bucket, prefix) = Self::split_bucket(url, "gs")?;

        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| Error::config(format!("Failed to create GCS client: {e}")))?;

        Ok(Self::from_store(
            Arc::new(store),
            "gs",
            format!("gs://{bucket}"),
            prefix,
        ))
    }

    /// Parse Azure Blob URL
    fn parse_azure(url: &str) -> Result<Self> {
        let (container, prefix) = Self::split_bucket(url, "az")?;

        let store = MicrosoftAzureBuilder::from_env()
            .with_container_name(container)
            .build()
            .map_err(|e| Error::config(format!("Failed to create Azure client: {e}")))?;

        Ok(Self::from_store(
            Arc::new(store),
            "az",
            format!("az://{container}"),
            prefix,
        ))
    }

    /// Parse local filesystem path
    fn parse_local(path: &str) -> Result<Self> {
        let path = path.strip_prefix("file://").unwrap_or(path);
        if path.is_empty() {
            return Err(Error::config("Empty output path"));
        }

        std::fs::create_dir_all(path)
            .map_err(|e| Error::config(format!("Failed to create directory {path}: {e}")))?;

        let store = LocalFileSystem::new_with_prefix(path)
            .map_err(|e| Error::config(format!("Failed to create local store: {e}")))?;

        Ok(Self::from_store(
            Arc::new(store),
            "file",
            path.trim_end_matches('/'),
            "",
        ))
    }

    /// Check if this is a cloud destination (not local)
    pub fn is_cloud(&self) -> bool {
        self.scheme != "file"
    }

    /// Get the scheme (s3, r2, gs, az, file)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Human-readable location of an object
    pub fn location(&self, name: &str) -> String {
        format!("{}/{}", self.base, self.object_path(name))
    }

    fn object_path(&self, name: &str) -> ObjectPath {
        if self.prefix.is_empty() {
            ObjectPath::from(name)
        } else {
            ObjectPath::from(format!("{}/{name}", self.prefix))
        }
    }

    /// Read an object; `None` when it does not exist
    pub async fn read(&self, name: &str) -> Result<Option<Bytes>> {
        let path = self.object_path(name);
        match self.store.get(&path).await {
            Ok(result) => Ok(Some(result.bytes().await?)),
            Err(object_store::Error::NotFound { .. }) => {
                debug!("Object {path} does not exist yet");
                Ok(None)
            }
            Err(e) => Err(Error::storage(format!("Failed to read {path}: {e}"))),
        }
    }

    /// Write (or replace) an object, returning its location
    pub async fn write(&self, name: &str, data: Bytes) -> Result<String> {
        let path = self.object_path(name);

        self.store
            .put(&path, data.into())
            .await
            .map_err(|e| Error::storage(format!("Failed to write {path}: {e}")))?;

        Ok(self.location(name))
    }
}
