use crate::{
    domain::scan::entities::{Scan, ScanStatus},
    entity::scans,
    infrastructure::db::json_column,
};

impl From<&scans::Model> for Scan {
    fn from(model: &scans::Model) -> Self {
        let image_paths: Vec<String> = json_column("image_paths", &model.image_paths);

        Self {
            id: model.id.to_string(),
            user_id: model.user_id.clone(),
            image_paths,
            status: ScanStatus::from(model.status.as_str()),
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<scans::Model> for Scan {
    fn from(model: scans::Model) -> Self {
        Self::from(&model)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn model_maps_paths_in_order() {
        let id = Uuid::now_v7();
        let model = scans::Model {
            id,
            user_id: "user-1".to_string(),
            image_paths: json!(["scans/a/0.jpg", "scans/a/1.jpg"]),
            status: "uploaded".to_string(),
            created_at: Utc::now().fixed_offset(),
        };

        let scan = Scan::from(model);
        assert_eq!(scan.id, id.to_string());
        assert_eq!(scan.image_paths, ["scans/a/0.jpg", "scans/a/1.jpg"]);
        assert_eq!(scan.status, ScanStatus::Uploaded);
    }
}
