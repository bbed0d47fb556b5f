use std::time::Duration;

use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_random_string},
    identity::ports::IdentityProvider,
    scan::{
        entities::Scan,
        ports::ScanRepository,
        value_objects::{CapturedImage, MAX_IMAGES_PER_SCAN},
    },
    storage::{entities::PresignedUrl, ports::ObjectStoragePort},
};

const IMAGE_URL_TTL: Duration = Duration::from_secs(30 * 60);

/// Uploads scan photos to the blob store and records the scan.
#[derive(Debug, Clone)]
pub struct ScanService<OS, SR, I> {
    object_storage: OS,
    scan_repository: SR,
    identity: I,
}

impl<OS, SR, I> ScanService<OS, SR, I>
where
    OS: ObjectStoragePort,
    SR: ScanRepository,
    I: IdentityProvider,
{
    pub fn new(object_storage: OS, scan_repository: SR, identity: I) -> Self {
        Self {
            object_storage,
            scan_repository,
            identity,
        }
    }

    fn user_id(&self) -> Result<String, CoreError> {
        self.identity
            .current_user_id()
            .ok_or(CoreError::Unauthenticated)
    }

    #[instrument(skip(self, images), fields(images = images.len()))]
    pub async fn create_scan(&self, images: Vec<CapturedImage>) -> Result<Scan, CoreError> {
        if images.is_empty() || images.len() > MAX_IMAGES_PER_SCAN {
            return Err(CoreError::validation(format!(
                "A scan needs between 1 and {MAX_IMAGES_PER_SCAN} photos"
            )));
        }
        let user_id = self.user_id()?;
        let scan_id = Scan::generate_id();

        let mut image_paths = Vec::with_capacity(images.len());
        for (index, image) in images.into_iter().enumerate() {
            let object_key = format!(
                "scans/{}/{}/{}-{}.{}",
                user_id,
                scan_id,
                index,
                generate_random_string(8),
                image.extension()
            );

            if let Err(e) = self
                .object_storage
                .put_object(&object_key, image.data, &image.mime_type)
                .await
            {
                self.discard_uploads(&image_paths).await;
                return Err(e);
            }
            image_paths.push(object_key);
        }

        let scan = Scan::new(scan_id, user_id, image_paths.clone());
        match self.scan_repository.create_scan(scan).await {
            Ok(scan) => {
                tracing::info!(scan_id = %scan.id, images = scan.image_paths.len(), "Scan created");
                Ok(scan)
            }
            Err(e) => {
                self.discard_uploads(&image_paths).await;
                Err(e)
            }
        }
    }

    async fn discard_uploads(&self, object_keys: &[String]) {
        for key in object_keys {
            if let Err(e) = self.object_storage.delete_object(key).await {
                tracing::warn!(error = %e, object_key = %key, "Failed to discard uploaded image");
            }
        }
    }

    pub async fn latest_scan(&self) -> Result<Option<Scan>, CoreError> {
        let user_id = self.user_id()?;
        self.scan_repository.get_latest(user_id).await
    }

    pub async fn get_scan(&self, scan_id: &str) -> Result<Scan, CoreError> {
        let user_id = self.user_id()?;
        self.scan_repository
            .get_by_id(scan_id.to_string(), user_id)
            .await?
            .ok_or(CoreError::NotFound)
    }

    /// Short-lived download links for a scan's photos, in capture order.
    pub async fn image_urls(&self, scan: &Scan) -> Result<Vec<PresignedUrl>, CoreError> {
        let mut urls = Vec::with_capacity(scan.image_paths.len());
        for path in &scan.image_paths {
            urls.push(
                self.object_storage
                    .presign_get_url(path, IMAGE_URL_TTL)
                    .await?,
            );
        }
        Ok(urls)
    }
}
