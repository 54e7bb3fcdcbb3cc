// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::{CONTENT_DISPOSITION, ContentType};
use actix_web::{App, HttpResponse, HttpServer, ResponseError, middleware, web};
use markpdf_core::template::{GITHUB_MARKDOWN_CSS, PRINT_CSS};
use markpdf_core::title::content_disposition;
use markpdf_core::{ChromePdfRenderer, Options, PdfRenderer};
use thiserror::Error;

const INDEX_HTML: &str = include_str!("../assets/index.html");
const STYLES_MARKER: &str = "/* markdown styles */";
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

pub struct AppState {
    options: Options,
    pdf: Arc<dyn PdfRenderer>,
}

impl AppState {
    pub fn new(options: Options, pdf: Arc<dyn PdfRenderer>) -> Self {
        Self { options, pdf }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("No markdown provided")]
    NoMarkdown,

    #[error("HTML generation failed: {0}")]
    Render(#[source] markpdf_core::Error),

    #[error("PDF generation failed: {0}")]
    Pdf(#[source] markpdf_core::Error),

    #[error("PDF generation failed: worker pool is unavailable")]
    Blocking,
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NoMarkdown => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "conversion failed");
        }
        HttpResponse::build(status)
            .content_type(ContentType::plaintext())
            .body(self.to_string())
    }
}

/// Registers the editor page and the conversion API.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .route("/", web::get().to(index))
        .service(api_resource("/api/preview", preview))
        .service(api_resource("/api/md2html", md2html))
        .service(api_resource("/api/md2pdf", md2pdf));
}

fn api_resource<F, Args>(path: &str, handler: F) -> actix_web::Resource
where
    F: actix_web::Handler<Args>,
    Args: actix_web::FromRequest + 'static,
    F::Output: actix_web::Responder + 'static,
{
    web::resource(path)
        .route(web::post().to(handler))
        .default_service(web::to(method_not_allowed))
}

pub async fn serve(host: &str, port: u16, options: Options) -> std::io::Result<()> {
    let pdf: Arc<dyn PdfRenderer> = Arc::new(ChromePdfRenderer::new(options.pdf.clone()));
    let state = web::Data::new(AppState::new(options, pdf));

    tracing::info!("serving editor on http://{host}:{port}/");
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await
}

async fn index() -> HttpResponse {
    let styles = format!("{GITHUB_MARKDOWN_CSS}{PRINT_CSS}");
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML.replace(STYLES_MARKER, &styles))
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .content_type(ContentType::plaintext())
        .body("Method Not Allowed")
}

/// Live preview fragment. An empty editor is a valid request.
async fn preview(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ServiceError> {
    let markdown = markdown_from_body(&body)?;
    let fragment =
        markpdf_core::render_fragment(&markdown, &state.options).map_err(ServiceError::Render)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(fragment))
}

async fn md2html(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ServiceError> {
    let markdown = non_blank(markdown_from_body(&body)?)?;
    let stem = markpdf_core::file_stem(&markdown);
    tracing::info!(%stem, bytes = markdown.len(), "converting to HTML");

    let document = markpdf_core::convert_to_document(&markdown, &state.options)
        .map_err(ServiceError::Render)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .insert_header((CONTENT_DISPOSITION, content_disposition("inline", &stem, "html")))
        .body(document))
}

async fn md2pdf(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ServiceError> {
    let markdown = non_blank(markdown_from_body(&body)?)?;
    let stem = markpdf_core::file_stem(&markdown);
    tracing::info!(%stem, bytes = markdown.len(), "converting to PDF");

    let document = markpdf_core::convert_to_document(&markdown, &state.options)
        .map_err(ServiceError::Render)?;
    let renderer = Arc::clone(&state.pdf);
    let pdf = web::block(move || renderer.render_pdf(&document))
        .await
        .map_err(|_| ServiceError::Blocking)?
        .map_err(ServiceError::Pdf)?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            CONTENT_DISPOSITION,
            content_disposition("attachment", &stem, "pdf"),
        ))
        .body(pdf))
}

/// Extracts the `markdown` string from a `{"markdown": ...}` JSON body.
fn markdown_from_body(body: &[u8]) -> Result<String, ServiceError> {
    let value = serde_json::from_slice::<serde_json::Value>(body)
        .map_err(|_| ServiceError::NoMarkdown)?;
    value
        .get("markdown")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or(ServiceError::NoMarkdown)
}

fn non_blank(markdown: String) -> Result<String, ServiceError> {
    if markdown.trim().is_empty() {
        Err(ServiceError::NoMarkdown)
    } else {
        Ok(markdown)
    }
}
