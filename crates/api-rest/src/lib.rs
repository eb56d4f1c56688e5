//! REST API for the assessment service.
//!
//! Exposes the assessment workflow over HTTP+JSON with OpenAPI/Swagger
//! documentation:
//!
//! - `GET /health` — liveness check
//! - `GET /assessments/manuals` — published manuals
//! - `POST /assessments/manuals/{manual_id}/generate` — random assessment
//! - `POST /assessments/grade` — grade a submission
//!
//! All persistence lives in the external question bank; handlers only
//! translate between HTTP and `assessment_core`.

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{wire, HealthService};
use assessment_core::{AssessmentError, AssessmentService};

/// Application state for the REST API server.
///
/// Contains the shared `AssessmentService` instance used by all request
/// handlers.
#[derive(Clone)]
pub struct AppState {
    service: Arc<AssessmentService>,
}

impl AppState {
    pub fn new(service: Arc<AssessmentService>) -> Self {
        Self { service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, list_manuals, generate_assessment, grade_assessment),
    components(schemas(
        wire::HealthRes,
        wire::ErrorRes,
        wire::ManualRes,
        wire::ManualRef,
        wire::GenerateAssessmentReq,
        wire::GenerateAssessmentRes,
        wire::AssessmentQuestion,
        wire::AnswerChoice,
        wire::GradeAssessmentReq,
        wire::SubmittedAnswer,
        wire::GradeAssessmentRes,
        wire::Score,
        wire::QuestionResult,
        wire::StudyRecommendations,
        wire::WeakChapter,
    ))
)]
pub struct ApiDoc;

/// Builds the application router over `state`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/assessments/manuals", get(list_manuals))
        .route(
            "/assessments/manuals/:manual_id/generate",
            post(generate_assessment),
        )
        .route("/assessments/grade", post(grade_assessment))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves the API until the process is stopped.
///
/// # Errors
/// Returns an error if the address cannot be bound or the HTTP server
/// fails while running.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    tracing::info!("-- Starting assessment REST API on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}

type ErrorReply = (StatusCode, Json<wire::ErrorRes>);

/// Maps a core error to its HTTP status and JSON error body.
///
/// Missing resources map to 404, caller mistakes to 422, and question
/// bank outages to 503. The message is the error's display form, which
/// the front end surfaces directly.
fn error_reply(err: &AssessmentError) -> ErrorReply {
    let status = match err {
        AssessmentError::ManualNotFound(_)
        | AssessmentError::AssessmentNotFound(_)
        | AssessmentError::QuestionNotFound(_) => StatusCode::NOT_FOUND,
        AssessmentError::ManualNotPublished(_)
        | AssessmentError::NoQuestionsAvailable(_)
        | AssessmentError::InvalidInput(_)
        | AssessmentError::InvalidSubmission(_)
        | AssessmentError::AssessmentManualMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentError::Bank(_) => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        status,
        Json(wire::ErrorRes {
            message: err.to_string(),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = wire::HealthRes)
    )
)]
/// Health check endpoint for the REST API.
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<wire::HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/assessments/manuals",
    responses(
        (status = 200, description = "Published manuals available for assessment", body = [wire::ManualRes]),
        (status = 503, description = "Question bank unavailable", body = wire::ErrorRes)
    )
)]
/// Lists the published manuals available for assessment.
///
/// # Errors
/// Returns `503 Service Unavailable` if the question bank cannot be
/// reached.
#[axum::debug_handler]
async fn list_manuals(
    State(state): State<AppState>,
) -> Result<Json<Vec<wire::ManualRes>>, ErrorReply> {
    match state.service.list_manuals().await {
        Ok(manuals) => Ok(Json(manuals)),
        Err(e) => {
            tracing::error!("List manuals error: {e}");
            Err(error_reply(&e))
        }
    }
}

#[utoipa::path(
    post,
    path = "/assessments/manuals/{manual_id}/generate",
    request_body = wire::GenerateAssessmentReq,
    params(
        ("manual_id" = String, Path, description = "Manual to generate the assessment from")
    ),
    responses(
        (status = 200, description = "Generated assessment", body = wire::GenerateAssessmentRes),
        (status = 404, description = "Manual not found", body = wire::ErrorRes),
        (status = 422, description = "Manual not published or has no questions", body = wire::ErrorRes),
        (status = 503, description = "Question bank unavailable", body = wire::ErrorRes)
    )
)]
/// Generates a randomized assessment from a published manual.
///
/// The path's `manual_id` is authoritative; the body's `manualId` field
/// is ignored in its favour. An omitted `questionCount` falls back to the
/// configured default. When the manual has fewer questions than
/// requested, the assessment caps at what exists.
///
/// # Errors
/// Returns `404 Not Found` if the manual does not exist, and
/// `422 Unprocessable Entity` if it is unpublished, has no questions, or
/// the requested count is zero.
#[axum::debug_handler]
async fn generate_assessment(
    State(state): State<AppState>,
    AxumPath(manual_id): AxumPath<String>,
    Json(mut req): Json<wire::GenerateAssessmentReq>,
) -> Result<Json<wire::GenerateAssessmentRes>, ErrorReply> {
    req.manual_id = manual_id;

    let question_count = req
        .question_count
        .unwrap_or_else(|| state.service.default_question_count());

    match state.service.generate(&req.manual_id, question_count).await {
        Ok(res) => Ok(Json(res)),
        Err(e) => {
            tracing::error!("Generate assessment error: {e}");
            Err(error_reply(&e))
        }
    }
}

#[utoipa::path(
    post,
    path = "/assessments/grade",
    request_body = wire::GradeAssessmentReq,
    responses(
        (status = 200, description = "Graded assessment with study recommendations", body = wire::GradeAssessmentRes),
        (status = 404, description = "Assessment or manual not found", body = wire::ErrorRes),
        (status = 422, description = "Invalid submission", body = wire::ErrorRes),
        (status = 503, description = "Question bank unavailable", body = wire::ErrorRes)
    )
)]
/// Grades a submitted assessment.
///
/// Correctness is re-derived from the question bank; the submission only
/// carries chosen answer ids. Unanswered questions count as incorrect.
///
/// # Errors
/// Returns `404 Not Found` for unknown or expired assessments,
/// `422 Unprocessable Entity` for duplicate or out-of-scope question
/// ids and assessment/manual mismatches.
#[axum::debug_handler]
async fn grade_assessment(
    State(state): State<AppState>,
    Json(req): Json<wire::GradeAssessmentReq>,
) -> Result<Json<wire::GradeAssessmentRes>, ErrorReply> {
    match state
        .service
        .grade(&req.assessment_id, &req.manual_id, &req.answers)
        .await
    {
        Ok(res) => Ok(Json(res)),
        Err(e) => {
            tracing::error!("Grade assessment error: {e}");
            Err(error_reply(&e))
        }
    }
}
