use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/assets", asset_routes())
        .nest("/instances", instance_routes(config))
}

fn asset_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::assets::list_assets))
        .routes(routes!(handlers::assets::serve_asset))
}

fn instance_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let editing = OpenApiRouter::new()
        .routes(routes!(handlers::instance::get_instance))
        .routes(routes!(handlers::instance::select_pdf))
        .routes(routes!(handlers::instance::update_settings));

    let upload = OpenApiRouter::new()
        .routes(routes!(handlers::instance::upload_pdf))
        .layer(handlers::instance::upload_body_limit(
            config.storage.max_upload_bytes,
        ));

    editing.merge(upload)
}
