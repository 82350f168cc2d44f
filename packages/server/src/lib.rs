pub mod cache;
pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod property;
pub mod routes;
pub mod state;
pub mod utils;

use axum::routing::get;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Novo Property API",
        version = "1.0.0",
        description = "API for managing and publishing real-estate property pages"
    ),
    tags(
        (name = "Auth", description = "Administrator and project-owner sessions"),
        (name = "Projects", description = "Tenant project management"),
        (name = "Property", description = "Property document, settings, style and deploy"),
        (name = "Blocks", description = "Ordered content blocks"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", routes::api_routes(&state.config))
        .split_for_parts();

    router
        .merge(public_routes())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
}

/// The public delivery surface lives outside `/api`: embedding sites fetch
/// `GET /{username}/property` with the per-property access token. Kept off
/// the OpenAPI doc on purpose; it is not part of the admin API.
fn public_routes() -> axum::Router<AppState> {
    axum::Router::new().route(
        "/{username}/property",
        get(handlers::public::get_public_property)
            .options(handlers::public::options_public_property),
    )
}
