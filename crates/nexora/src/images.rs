//! Product image storage.
//!
//! [`ImageKitStore`] uploads to ImageKit's upload API under `/products`;
//! [`MemoryImageStore`] keeps the bytes in-process and serves `memory://` URLs.

use crate::model::ProductImage;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, error};
use uuid::Uuid;

const IMAGEKIT_UPLOAD_URL: &str = "https://upload.imagekit.io/api/v1/files/upload";
const PRODUCT_FOLDER: &str = "/products";

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("image upload rejected ({status}): {body}")]
    Rejected { status: u16, body: String },
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(&self, bytes: Vec<u8>) -> Result<ProductImage, ImageError>;
}

fn file_name() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    url: String,
    thumbnail_url: Option<String>,
    file_id: String,
}

pub struct ImageKitStore {
    client: Client,
    private_key: String,
    url: String,
}

impl ImageKitStore {
    pub fn new(private_key: String) -> Result<Self, ImageError> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;
        Ok(Self {
            client,
            private_key,
            url: IMAGEKIT_UPLOAD_URL.to_string(),
        })
    }
}

#[async_trait]
impl ImageStore for ImageKitStore {
    async fn upload(&self, bytes: Vec<u8>) -> Result<ProductImage, ImageError> {
        let name = file_name();
        debug!(%name, size = bytes.len(), "Uploading image");
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(name.clone()))
            .text("fileName", name)
            .text("folder", PRODUCT_FOLDER);

        let response = self
            .client
            .post(&self.url)
            .basic_auth(&self.private_key, Some(""))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), %body, "Image upload rejected");
            return Err(ImageError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let uploaded: UploadResponse = response.json().await?;
        Ok(ProductImage {
            thumbnail: uploaded.thumbnail_url.unwrap_or_else(|| uploaded.url.clone()),
            url: uploaded.url,
            id: uploaded.file_id,
        })
    }
}

#[derive(Debug, Default)]
pub struct MemoryImageStore {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<Vec<u8>> {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(id)
            .cloned()
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn upload(&self, bytes: Vec<u8>) -> Result<ProductImage, ImageError> {
        let id = file_name();
        let url = format!("memory://{PRODUCT_FOLDER}/{id}");
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(id.clone(), bytes);
        Ok(ProductImage {
            thumbnail: url.clone(),
            url,
            id,
        })
    }
}
