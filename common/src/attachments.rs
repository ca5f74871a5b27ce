//! Client for the external attachment object store.
//!
//! Uploaded files live in an external store and are referenced from comments
//! by URL only. This client covers the single operation the portal needs:
//! deleting a stored object when an ICTO member removes an attachment.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AttachmentStoreError {
    #[error("attachment URL has no recognizable object id: {0}")]
    MalformedUrl(String),
    #[error("attachment store request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("attachment store returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Handle to the external attachment store.
///
/// When no `ATTACHMENT_STORE_URL` is configured (local development, tests)
/// the store runs disabled and deletions succeed without any network call.
#[derive(Clone)]
pub struct AttachmentStore {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl AttachmentStore {
    pub fn from_config() -> Self {
        let url = crate::config::attachment_store_url();
        if url.is_empty() {
            Self::disabled()
        } else {
            Self::new(url)
        }
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    pub fn disabled() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: None,
        }
    }

    /// Deletes the stored object behind `attachment_url`.
    ///
    /// The object id is the final `folder/name` pair of the URL path with the
    /// file extension stripped, matching how the store issues its URLs.
    pub async fn delete(&self, attachment_url: &str) -> Result<(), AttachmentStoreError> {
        let Some(base_url) = &self.base_url else {
            tracing::debug!(url = attachment_url, "attachment store disabled; skipping delete");
            return Ok(());
        };

        let object_id = object_id_from_url(attachment_url)
            .ok_or_else(|| AttachmentStoreError::MalformedUrl(attachment_url.to_string()))?;

        let endpoint = format!("{}/{}", base_url.trim_end_matches('/'), object_id);
        let response = self.client.delete(&endpoint).send().await?;

        if !response.status().is_success() {
            return Err(AttachmentStoreError::Status(response.status()));
        }

        tracing::info!(object_id, "deleted attachment from external store");
        Ok(())
    }
}

fn object_id_from_url(url: &str) -> Option<String> {
    let mut segments = url.trim_end_matches('/').rsplit('/');
    let file = segments.next()?;
    let folder = segments.next()?;
    if file.is_empty() || folder.is_empty() || folder.contains(':') {
        return None;
    }
    let name = file.split('.').next().filter(|n| !n.is_empty())?;
    Some(format!("{folder}/{name}"))
}
