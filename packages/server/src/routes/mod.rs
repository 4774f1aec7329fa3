mod v1;

use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().nest("/v1", v1::routes())
}

pub fn health_routes() -> OpenApiRouter<AppState> {
    use crate::handlers::health::*;

    OpenApiRouter::new().routes(routes!(health))
}
