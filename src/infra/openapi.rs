//! OpenAPI configuration.

use crate::feature::greeting::greeting_api;
use utoipa::OpenApi;

/// OpenApi configuration.
#[derive(OpenApi)]
#[openapi(
    paths(greeting_api::index, greeting_api::greet),
    components(schemas(crate::infra::error::ErrorBody))
)]
#[derive(Clone, Copy, Debug)]
pub struct ApiDoc;
