use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::{CaseSubmission, LawyerId};
use super::leads::LeadSubmission;
use super::pool::{LawyerPool, PoolError};
use super::service::{CaseMatchingService, MatchRequest, MatchingServiceError};

/// Router builder exposing HTTP endpoints for case scoring, matching and leads listings.
pub fn matching_router<P>(service: Arc<CaseMatchingService<P>>) -> Router
where
    P: LawyerPool + 'static,
{
    Router::new()
        .route("/api/v1/cases/quality", post(quality_handler::<P>))
        .route("/api/v1/cases/matches", post(match_handler::<P>))
        .route(
            "/api/v1/lawyers/:lawyer_id/leads",
            post(leads_handler::<P>),
        )
        .with_state(service)
}

pub(crate) async fn quality_handler<P>(
    State(service): State<Arc<CaseMatchingService<P>>>,
    axum::Json(submission): axum::Json<CaseSubmission>,
) -> Response
where
    P: LawyerPool + 'static,
{
    match service.describe(submission) {
        Ok(descriptor) => {
            let score = service.score_case(&descriptor);
            let payload = json!({
                "quality_score": score.value(),
                "tier": score.tier().label(),
                "practice_area": descriptor.practice_area.slug(),
                "area_source": descriptor.area_source,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(MatchingServiceError::InvalidDescriptor(error)),
    }
}

pub(crate) async fn match_handler<P>(
    State(service): State<Arc<CaseMatchingService<P>>>,
    axum::Json(request): axum::Json<MatchRequest>,
) -> Response
where
    P: LawyerPool + 'static,
{
    match service.match_case(request) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn leads_handler<P>(
    State(service): State<Arc<CaseMatchingService<P>>>,
    Path(lawyer_id): Path<String>,
    axum::Json(leads): axum::Json<Vec<LeadSubmission>>,
) -> Response
where
    P: LawyerPool + 'static,
{
    let id = LawyerId(lawyer_id);
    match service.rank_leads(&id, leads) {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(error) => error_response(error),
    }
}

/// HTTP status for a matching failure, shared with `AppError`.
pub(crate) fn status_for(error: &MatchingServiceError) -> StatusCode {
    match error {
        MatchingServiceError::InvalidDescriptor(_) => StatusCode::UNPROCESSABLE_ENTITY,
        MatchingServiceError::LawyerNotFound(_) => StatusCode::NOT_FOUND,
        MatchingServiceError::Pool(PoolError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        MatchingServiceError::Pool(PoolError::Query(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: MatchingServiceError) -> Response {
    let status = status_for(&error);
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
