use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, scan::entities::Scan};

#[cfg_attr(test, mockall::automock)]
pub trait ScanRepository: Send + Sync {
    fn create_scan(&self, scan: Scan) -> impl Future<Output = Result<Scan, CoreError>> + Send;

    fn get_by_id(
        &self,
        scan_id: String,
        user_id: String,
    ) -> impl Future<Output = Result<Option<Scan>, CoreError>> + Send;

    /// Most recent scan of the user, by creation time.
    fn get_latest(
        &self,
        user_id: String,
    ) -> impl Future<Output = Result<Option<Scan>, CoreError>> + Send;
}
