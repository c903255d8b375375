//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "RSVP API",
        version = "0.1.0",
        description = "Create events and collect yes/no/maybe RSVPs",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:4000", description = "Local development server")
    ),
    nest(
        (path = "/events", api = domain_events::ApiDoc)
    ),
    tags(
        (name = "Events", description = "Events and their RSVPs")
    )
)]
pub struct ApiDoc;
