use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "viewer_instance")]
pub struct Model {
    /// Opaque identifier assigned by the host course platform.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub display_name: String,
    pub pdf_title: String,
    pub width: String,
    pub height: String,
    pub show_download_button: bool,
    pub allow_fullscreen: bool,

    /// Managed asset name. Mutually exclusive with `external_url`.
    pub local_file: Option<String>,
    pub external_url: Option<String>,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
