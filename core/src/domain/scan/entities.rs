use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::generate_uuid_v7;

/// Advisory processing status. Written as `Uploaded` on creation and not
/// advanced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Uploaded,
    Processing,
    Done,
    Error,
}

impl ScanStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ScanStatus::Uploaded => "uploaded",
            ScanStatus::Processing => "processing",
            ScanStatus::Done => "done",
            ScanStatus::Error => "error",
        }
    }
}

impl From<&str> for ScanStatus {
    fn from(s: &str) -> Self {
        match s {
            "processing" => ScanStatus::Processing,
            "done" => ScanStatus::Done,
            "error" => ScanStatus::Error,
            _ => ScanStatus::Uploaded,
        }
    }
}

/// One batch of 1 to 5 photos submitted together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scan {
    pub id: String,
    pub user_id: String,
    pub image_paths: Vec<String>,
    pub status: ScanStatus,
    pub created_at: DateTime<Utc>,
}

impl Scan {
    pub fn new(id: String, user_id: String, image_paths: Vec<String>) -> Self {
        Self {
            id,
            user_id,
            image_paths,
            status: ScanStatus::Uploaded,
            created_at: Utc::now(),
        }
    }

    pub fn generate_id() -> String {
        generate_uuid_v7().to_string()
    }
}
