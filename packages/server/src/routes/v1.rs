use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/hackathons", hackathon_routes())
        .nest("/submissions", submission_routes())
}

fn hackathon_routes() -> OpenApiRouter<AppState> {
    use crate::handlers::hackathon::*;

    OpenApiRouter::new()
        .routes(routes!(create_hackathon, list_hackathons))
        .routes(routes!(verify_hackathon))
        .routes(routes!(list_hackathon_submissions))
}

fn submission_routes() -> OpenApiRouter<AppState> {
    use crate::handlers::submission::*;

    OpenApiRouter::new()
        .routes(routes!(create_submission))
        .routes(routes!(get_submission))
}
