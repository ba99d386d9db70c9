pub mod generate;

use utoipa::OpenApi;

pub use generate::{handle_generate, GenerateQuery, GenerateResponse, __path_handle_generate};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "scenetext API",
        description = "Synthetic scene-text images with contrast-aware text color",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(handle_generate),
    components(schemas(GenerateResponse)),
    tags(
        (name = "Generation", description = "Synthetic sample generation")
    )
)]
pub struct ApiDoc;
