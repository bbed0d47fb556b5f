use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        scan::{entities::Scan, ports::ScanRepository},
    },
    entity::scans::{ActiveModel as ScanActiveModel, Column as ScanColumn, Entity as ScanEntity},
    infrastructure::db::{parse_id, persistence_error},
};

#[derive(Debug, Clone)]
pub struct PostgresScanRepository {
    pub db: DatabaseConnection,
}

impl PostgresScanRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ScanRepository for PostgresScanRepository {
    async fn create_scan(&self, scan: Scan) -> Result<Scan, CoreError> {
        let image_paths = serde_json::to_value(&scan.image_paths)
            .map_err(|e| persistence_error("Failed to serialize image paths", e))?;

        ScanEntity::insert(ScanActiveModel {
            id: Set(parse_id(&scan.id)?),
            user_id: Set(scan.user_id),
            image_paths: Set(image_paths),
            status: Set(scan.status.as_str().to_string()),
            created_at: Set(scan.created_at.fixed_offset()),
        })
        .exec_with_returning(&self.db)
        .await
        .map(Scan::from)
        .map_err(|e| persistence_error("Failed to create scan", e))
    }

    async fn get_by_id(&self, scan_id: String, user_id: String) -> Result<Option<Scan>, CoreError> {
        let Ok(id) = parse_id(&scan_id) else {
            return Ok(None);
        };

        let scan = ScanEntity::find()
            .filter(ScanColumn::Id.eq(id))
            .filter(ScanColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| persistence_error("Failed to get scan", e))?
            .map(Scan::from);

        Ok(scan)
    }

    async fn get_latest(&self, user_id: String) -> Result<Option<Scan>, CoreError> {
        let scan = ScanEntity::find()
            .filter(ScanColumn::UserId.eq(user_id))
            .order_by_desc(ScanColumn::CreatedAt)
            .one(&self.db)
            .await
            .map_err(|e| persistence_error("Failed to get latest scan", e))?
            .map(Scan::from);

        Ok(scan)
    }
}
