use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/projects", project_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn project_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::project::list_projects,
            handlers::project::create_project
        ))
        .routes(routes!(
            handlers::project::get_project,
            handlers::project::update_project,
            handlers::project::delete_project
        ))
        .nest("/{id}/property", property_routes())
}

fn property_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::property::get_property))
        .routes(routes!(handlers::property::update_settings))
        .routes(routes!(handlers::property::update_style))
        .routes(routes!(handlers::property::preview))
        .routes(routes!(handlers::property::embed))
        .routes(routes!(handlers::deploy::deploy))
        .nest("/blocks", block_routes())
}

fn block_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::block::list_blocks,
            handlers::block::create_block
        ))
        .routes(routes!(handlers::block::reorder_blocks))
        .routes(routes!(
            handlers::block::get_block,
            handlers::block::update_block,
            handlers::block::delete_block
        ))
}
