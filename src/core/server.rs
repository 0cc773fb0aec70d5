#![allow(clippy::result_large_err)] // Server helpers return AppError for consistent diagnostics.

use crate::core::error::AppError;
use crate::core::form::{self, html, FieldDescriptor};
use crate::core::resolver::SubmittedForm;
use crate::core::submission::SubmissionPipeline;
use crate::core::types::ErrorCategory;
use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info};

/// State shared across form requests.
pub struct FormServerState {
    title: String,
    fields: Vec<FieldDescriptor>,
    pipeline: SubmissionPipeline,
}

impl FormServerState {
    /// Render the form once; the schema does not change while serving.
    pub fn new(title: impl Into<String>, pipeline: SubmissionPipeline) -> Self {
        let fields = form::render_all(pipeline.schema());
        Self {
            title: title.into(),
            fields,
            pipeline,
        }
    }
}

/// Routes: `GET /` serves the form, `POST /` accepts a submission.
pub fn router(state: Arc<FormServerState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_form))
        .layer(Extension(state))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
}

/// Start the form server and block until it terminates.
pub async fn serve(
    state: Arc<FormServerState>,
    bind: &str,
    max_body_bytes: usize,
) -> Result<(), AppError> {
    serve_internal(state, bind, max_body_bytes, None).await
}

/// Start the form server and notify once the bind address is known (test helper).
pub async fn serve_with_ready_notifier(
    state: Arc<FormServerState>,
    bind: &str,
    max_body_bytes: usize,
    ready_notifier: oneshot::Sender<SocketAddr>,
) -> Result<(), AppError> {
    serve_internal(state, bind, max_body_bytes, Some(ready_notifier)).await
}

async fn serve_internal(
    state: Arc<FormServerState>,
    bind: &str,
    max_body_bytes: usize,
    ready_notifier: Option<oneshot::Sender<SocketAddr>>,
) -> Result<(), AppError> {
    let bind_addr: SocketAddr = bind.parse().map_err(|err| {
        AppError::new(
            ErrorCategory::ConfigError,
            format!("invalid bind address {}: {}", bind, err),
        )
    })?;
    let listener = TcpListener::bind(bind_addr).await.map_err(|err| {
        AppError::new(
            ErrorCategory::IoError,
            format!("failed to bind form server {}: {}", bind_addr, err),
        )
    })?;
    let local_addr = listener.local_addr().map_err(|err| {
        AppError::new(
            ErrorCategory::IoError,
            format!("failed to determine form server address: {}", err),
        )
    })?;
    if let Some(tx) = ready_notifier {
        let _ = tx.send(local_addr);
    }
    info!("form server listening on {}", local_addr);
    axum::serve(listener, router(state, max_body_bytes).into_make_service())
        .await
        .map_err(|err| {
            AppError::new(
                ErrorCategory::IoError,
                format!("form server terminated: {}", err),
            )
        })
}

async fn show_form(Extension(state): Extension<Arc<FormServerState>>) -> Html<String> {
    Html(html::render_page(
        &state.title,
        "/",
        &state.fields,
        state.pipeline.policy(),
    ))
}

async fn submit_form(
    Extension(state): Extension<Arc<FormServerState>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Html<String>, FormRejection> {
    let form = SubmittedForm::from_pairs(pairs);
    // Path checks hit the file system.
    let submission = tokio::task::spawn_blocking(move || state.pipeline.submit(&form))
        .await
        .map_err(|err| {
            FormRejection::from(AppError::new(
                ErrorCategory::InternalError,
                format!("submission task failed: {}", err),
            ))
        })??;

    Ok(Html(html::render_submission_page(
        &submission.params_file.display().to_string(),
        &submission.command_line(),
    )))
}

/// Error page returned for a rejected submission.
struct FormRejection {
    status: StatusCode,
    message: String,
}

impl From<AppError> for FormRejection {
    fn from(err: AppError) -> Self {
        if err.category.is_user_correctable() {
            info!(code = %err.code, "submission rejected: {}", err.message);
            return Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.message,
            };
        }
        error!("submission failed: {}", err);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "the parameters could not be processed".to_string(),
        }
    }
}

impl IntoResponse for FormRejection {
    fn into_response(self) -> Response {
        (self.status, Html(html::render_error_page(&self.message))).into_response()
    }
}
