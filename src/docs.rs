use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::separation::handler::separate_audio,
    ),
    components(
        schemas(
            crate::modules::separation::dto::SeparationResponse,
            crate::modules::separation::dto::ErrorResponse,
        )
    ),
    tags(
        (name = "Separation", description = "Vocal and instrumental stem separation")
    )
)]
pub struct ApiDoc;
