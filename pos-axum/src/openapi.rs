//! The generated OpenAPI document and a RapiDoc page to browse it, both
//! nested under `/docs`.

use std::sync::Arc;

use aide::{
    axum::{ApiRouter, IntoApiResponse, routing::get},
    openapi::{OpenApi, Tag},
    transform::TransformOpenApi,
};
use axum::{
    Extension, Json,
    response::{Html, IntoResponse},
};

/// Tag for the read-only query endpoint.
pub(crate) const QUERY_TAG: &str = "points-of-sale";

/// Tag for endpoints that rewrite the stored data.
pub(crate) const ADMIN_TAG: &str = "admin";

const TAGS: [(&str, &str); 2] = [
    (QUERY_TAG, "Which points of sale are open at a given time"),
    (ADMIN_TAG, "Re-ingesting the upstream feed"),
];

const RAPIDOC: &str = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Points of Sale API</title>
    <script src="https://cdnjs.cloudflare.com/ajax/libs/rapidoc/9.3.8/rapidoc-min.js" integrity="sha512-0ES6eX4K9J1PrIEjIizv79dTlN5HwI2GW9Ku6ymb8dijMHF5CIplkS8N0iFJ/wl3GybCSqBJu8HDhiFkZRAf0g==" crossorigin="anonymous" referrerpolicy="no-referrer"></script>
  </head>
  <body>
    <rapi-doc spec-url="/docs/api.json"
        render-style="view"
        show-header="false"
        allow-authentication="false"
    ></rapi-doc>
  </body>
</html>"#;

/// Routes for the documentation page and the raw document.
pub(crate) fn docs_routes() -> ApiRouter {
    ApiRouter::new()
        .route("/", get(serve_page))
        .route("/api.json", get(serve_api))
}

async fn serve_page() -> impl IntoApiResponse {
    Html(RAPIDOC).into_response()
}

async fn serve_api(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
    Json(api).into_response()
}

/// Fill in the document's metadata once every route has been registered.
pub(crate) fn api_docs(api: TransformOpenApi) -> TransformOpenApi {
    TAGS.into_iter().fold(
        api.title("Points of Sale API")
            .summary("Which points of sale are open, and when.")
            .description(
                "Lists the points of sale open at a day of the week (0 = Sunday) and a time \
                 of day, defaulting to the server's local clock. Opening hours come from the \
                 upstream feed, which is re-ingested on a schedule or on demand.",
            )
            .version(env!("CARGO_PKG_VERSION")),
        |api, (name, description)| {
            api.tag(Tag {
                name: name.into(),
                description: Some(description.into()),
                ..Default::default()
            })
        },
    )
}
