//! The web front-end: routes, handlers and the listener.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::form::{FormError, UploadForm};
use crate::pages::{self, SUBMIT_PATH, UploadView};
use crate::{
    Config, HttpUploader, HttpUploaderConfig, RESULT_PATH, ResultDisplay, SelectedFile, Uploader,
};

/// Room for multipart boundaries and the `option` field on top of the file.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    uploader: Arc<dyn Uploader>,
    max_upload_mb: u64,
}

impl AppState {
    pub fn new(uploader: Arc<dyn Uploader>, max_upload_mb: u64) -> Self {
        Self {
            uploader,
            max_upload_mb,
        }
    }

    /// Builds the state from configuration, using the HTTP uploader.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut uploader_config = HttpUploaderConfig::new(config.upload_endpoint());
        if let Some(timeout) = config.request_timeout() {
            uploader_config = uploader_config.with_timeout(timeout);
        }
        let uploader =
            HttpUploader::new(uploader_config).context("Failed to build upload client")?;
        Ok(Self::new(Arc::new(uploader), config.max_upload_mb))
    }

    fn view(&self) -> UploadView {
        UploadView {
            max_upload_mb: self.max_upload_mb,
            ..Default::default()
        }
    }

    fn body_limit(&self) -> usize {
        let bytes = self.max_upload_mb.saturating_mul(1024 * 1024);
        usize::try_from(bytes)
            .unwrap_or(usize::MAX)
            .saturating_add(MULTIPART_OVERHEAD)
    }
}

/// Query string read by the result page.
///
/// Read as raw pairs so a repeated key never fails the request. The first
/// occurrence of each key wins.
#[derive(Debug, Default)]
pub struct ResultParams {
    filename: Option<String>,
    option: Option<String>,
    message: Option<String>,
    transcription: Option<String>,
}

impl ResultParams {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "filename" => &mut params.filename,
                "option" => &mut params.option,
                "message" => &mut params.message,
                "transcription" => &mut params.transcription,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    fn into_display(self) -> ResultDisplay {
        ResultDisplay::from_params(
            self.filename.as_deref(),
            self.option.as_deref(),
            self.message.as_deref(),
            self.transcription.as_deref(),
        )
    }
}

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    let body_limit = state.body_limit();
    Router::new()
        .route("/", get(upload_page))
        .route(
            SUBMIT_PATH,
            axum::routing::post(submit).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route(RESULT_PATH, get(result_page))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: &Config) -> Result<()> {
    let state = AppState::from_config(config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr()))?;
    let local_addr = listener.local_addr()?;

    info!(
        addr = %local_addr,
        endpoint = config.upload_endpoint(),
        "clipscribe ready"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("clipscribe stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

/// GET /
async fn upload_page(State(state): State<AppState>) -> Html<String> {
    Html(pages::upload_page(&state.view()))
}

/// GET /Result
async fn result_page(Query(pairs): Query<Vec<(String, String)>>) -> Html<String> {
    let params = ResultParams::from_pairs(pairs);
    Html(pages::result_page(&params.into_display()))
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// POST /submit
///
/// Reads the browser form, runs it through [`UploadForm`] and either
/// redirects to the result page or shows the form again with an alert.
async fn submit(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut form = UploadForm::new();

    let picked = match read_form(&mut form, &mut multipart).await {
        Ok(picked) => picked,
        Err(e) => {
            warn!(error = %e, "Failed to read upload form");
            let alert = format!("The upload could not be read: {}", e.body_text());
            return failure_page(&state, &form, e.status(), alert);
        }
    };

    let outcome = match picked {
        Ok(()) => form.submit(state.uploader.as_ref()).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(link) => Redirect::to(&link.to_url()).into_response(),
        Err(e) => {
            let status = match &e {
                FormError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
                FormError::Rejected { .. } | FormError::Unexpected(_) => StatusCode::BAD_GATEWAY,
            };
            failure_page(&state, &form, status, e.to_string())
        }
    }
}

/// Copies the multipart fields into the form.
///
/// The outer error is a broken request body. The inner one is a file the
/// form refused when it was picked.
async fn read_form(
    form: &mut UploadForm,
    multipart: &mut Multipart,
) -> Result<Result<(), FormError>, MultipartError> {
    let mut picked = Ok(());

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("file") => {
                let name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;

                // Browsers send an empty, unnamed part when nothing was chosen
                if name.is_empty() {
                    form.clear_file();
                    continue;
                }
                picked = form.select_file(SelectedFile::new(name, content_type, data));
            }
            Some("option") => {
                let code = field.text().await?;
                form.select_language(&code);
            }
            other => {
                warn!(field = ?other, "Ignoring unexpected form field");
            }
        }
    }

    Ok(picked)
}

fn failure_page(state: &AppState, form: &UploadForm, status: StatusCode, alert: String) -> Response {
    let view = UploadView {
        language: form.language(),
        alert: Some(alert),
        ..state.view()
    };
    (status, Html(pages::upload_page(&view))).into_response()
}
