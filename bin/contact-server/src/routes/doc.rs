use crate::routes::contact::ContactApi;
use crate::routes::health::HealthApi;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "contact-server",
    description = "Contact form submission API",
    version = "0.1.0",
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(HealthApi::openapi());
    root.merge(ContactApi::openapi());
    root
}
