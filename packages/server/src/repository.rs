use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set};
use thiserror::Error;

use crate::entity::viewer_instance;
use crate::viewer::{InstanceRecord, SelectionState, ViewerSettings};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Per-instance settings and selection, keyed by the host-assigned id.
#[async_trait]
pub trait InstanceRepository: Send + Sync {
    /// Load an instance. Unknown ids yield the default record.
    async fn load(&self, id: &str) -> Result<InstanceRecord, RepositoryError>;

    /// Replace the stored record for `id`.
    async fn save(&self, id: &str, record: &InstanceRecord) -> Result<(), RepositoryError>;
}

/// Process-local repository for tests and database-less deployments.
#[derive(Default)]
pub struct MemoryInstanceRepository {
    records: DashMap<String, InstanceRecord>,
}

impl MemoryInstanceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InstanceRepository for MemoryInstanceRepository {
    async fn load(&self, id: &str) -> Result<InstanceRecord, RepositoryError> {
        Ok(self
            .records
            .get(id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn save(&self, id: &str, record: &InstanceRecord) -> Result<(), RepositoryError> {
        self.records.insert(id.to_string(), record.clone());
        Ok(())
    }
}

pub struct DatabaseInstanceRepository {
    db: DatabaseConnection,
}

impl DatabaseInstanceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InstanceRepository for DatabaseInstanceRepository {
    async fn load(&self, id: &str) -> Result<InstanceRecord, RepositoryError> {
        let model = viewer_instance::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?;

        Ok(model.map(InstanceRecord::from).unwrap_or_default())
    }

    async fn save(&self, id: &str, record: &InstanceRecord) -> Result<(), RepositoryError> {
        let settings = &record.settings;
        let model = viewer_instance::ActiveModel {
            id: Set(id.to_string()),
            display_name: Set(settings.display_name.clone()),
            pdf_title: Set(settings.pdf_title.clone()),
            width: Set(settings.width.clone()),
            height: Set(settings.height.clone()),
            show_download_button: Set(settings.show_download_button),
            allow_fullscreen: Set(settings.allow_fullscreen),
            local_file: Set(record.selection.local_file().map(str::to_string)),
            external_url: Set(record.selection.external_url().map(str::to_string)),
            updated_at: Set(Utc::now()),
        };

        viewer_instance::Entity::insert(model)
            .on_conflict(
                OnConflict::column(viewer_instance::Column::Id)
                    .update_columns([
                        viewer_instance::Column::DisplayName,
                        viewer_instance::Column::PdfTitle,
                        viewer_instance::Column::Width,
                        viewer_instance::Column::Height,
                        viewer_instance::Column::ShowDownloadButton,
                        viewer_instance::Column::AllowFullscreen,
                        viewer_instance::Column::LocalFile,
                        viewer_instance::Column::ExternalUrl,
                        viewer_instance::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }
}

impl From<viewer_instance::Model> for InstanceRecord {
    fn from(model: viewer_instance::Model) -> Self {
        Self {
            settings: ViewerSettings {
                display_name: model.display_name,
                pdf_title: model.pdf_title,
                width: model.width,
                height: model.height,
                show_download_button: model.show_download_button,
                allow_fullscreen: model.allow_fullscreen,
            },
            selection: SelectionState::from_columns(model.local_file, model.external_url),
        }
    }
}
