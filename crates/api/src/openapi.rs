// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `OpenAPI` documentation module
//!
//! Serves the generated document and a Swagger UI page that renders it.

use axum::{Json, response::Html};
use utoipa::OpenApi;

use crate::docs::ApiDoc;

/// Route serving the `OpenAPI` document
pub const OPENAPI_PATH: &str = "/api-doc/openapi.json";

/// Route serving the Swagger UI page
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

const SWAGGER_UI_DIST: &str = "https://unpkg.com/swagger-ui-dist@5.17.14";

/// `OpenAPI` specification endpoint
pub async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Swagger UI endpoint
pub async fn swagger_ui() -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Social API Documentation</title>
    <link rel="stylesheet" href="{SWAGGER_UI_DIST}/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="{SWAGGER_UI_DIST}/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {{
            SwaggerUIBundle({{ url: '{OPENAPI_PATH}', dom_id: '#swagger-ui', deepLinking: true }});
        }};
    </script>
</body>
</html>
"#
    ))
}
