use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/pages", page_routes())
        .nest("/preview", preview_routes())
        .nest("/campaigns", campaign_routes())
        .nest("/raffles", raffle_routes())
        .nest("/media", media_routes(config))
}

fn page_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::page::get_page))
        .routes(routes!(handlers::page::submit_entry))
}

fn preview_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::page::preview_page,
        handlers::page::preview_draft
    ))
}

fn campaign_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::campaign::get_customizations,
            handlers::campaign::put_customizations
        ))
        .routes(routes!(handlers::campaign::list_entries))
        .routes(routes!(handlers::campaign::pool_status))
        .routes(routes!(
            handlers::winner::select_winner,
            handlers::winner::list_winners
        ))
}

fn raffle_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::raffle::create_raffle,
            handlers::raffle::list_raffles
        ))
        .routes(routes!(
            handlers::raffle::get_raffle,
            handlers::raffle::update_raffle
        ))
        .routes(routes!(handlers::raffle::assign_raffle))
        .routes(routes!(handlers::raffle::unassign_raffle))
}

fn media_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::media::upload_media))
        .layer(handlers::media::media_upload_body_limit(
            config.media.max_upload_bytes,
        ))
}
