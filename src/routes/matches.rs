use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    ErrorResponse, HealthResponse, InvalidateRequest, InvalidateResponse, MatchQuery,
};
use crate::services::{EngineError, MatchEngine};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MatchEngine>,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route(
            "/matches/startups/{startup_id}/investors",
            web::get().to(startup_matches),
        )
        .route(
            "/matches/investors/{investor_id}/startups",
            web::get().to(investor_matches),
        )
        .route(
            "/matches/jobs/{job_id}/talent",
            web::get().to(job_matches),
        )
        .route("/jobs/{job_id}/applicants", web::get().to(job_applicants))
        .route("/matches/invalidate", web::post().to(invalidate));
}

fn engine_error_response(err: &EngineError) -> HttpResponse {
    let status_code = err.status_code();
    let error = match status_code {
        400 => "incompatible_pairing",
        404 => "not_found",
        422 => "invalid_record",
        _ => "upstream_failure",
    };

    let body = ErrorResponse {
        error: error.to_string(),
        message: err.to_string(),
        status_code,
    };

    match status_code {
        400 => HttpResponse::BadRequest().json(body),
        404 => HttpResponse::NotFound().json(body),
        422 => HttpResponse::UnprocessableEntity().json(body),
        _ => HttpResponse::BadGateway().json(body),
    }
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Investors ranked for a startup
///
/// GET /api/v1/matches/startups/{startup_id}/investors?threshold=0
async fn startup_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<MatchQuery>,
) -> impl Responder {
    let startup_id = path.into_inner();
    tracing::info!(
        "Finding investor matches for startup {} (threshold {})",
        startup_id,
        query.threshold
    );

    match state
        .engine
        .matches_for_startup(&startup_id, query.threshold)
        .await
    {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            tracing::error!("Investor matching failed for {}: {}", startup_id, e);
            engine_error_response(&e)
        }
    }
}

/// Startups ranked for an investor's deal-flow feed
///
/// GET /api/v1/matches/investors/{investor_id}/startups?threshold=0
async fn investor_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<MatchQuery>,
) -> impl Responder {
    let investor_id = path.into_inner();
    tracing::info!(
        "Finding startup matches for investor {} (threshold {})",
        investor_id,
        query.threshold
    );

    match state
        .engine
        .matches_for_investor(&investor_id, query.threshold)
        .await
    {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            tracing::error!("Deal-flow matching failed for {}: {}", investor_id, e);
            engine_error_response(&e)
        }
    }
}

/// Talent ranked for a job posting
///
/// GET /api/v1/matches/jobs/{job_id}/talent?threshold=0
async fn job_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<MatchQuery>,
) -> impl Responder {
    let job_id = path.into_inner();
    tracing::info!(
        "Finding talent matches for job {} (threshold {})",
        job_id,
        query.threshold
    );

    match state.engine.matches_for_job(&job_id, query.threshold).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            tracing::error!("Talent matching failed for {}: {}", job_id, e);
            engine_error_response(&e)
        }
    }
}

/// Applicants for a job posting (store pass-through, unscored)
///
/// GET /api/v1/jobs/{job_id}/applicants
async fn job_applicants(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let job_id = path.into_inner();

    match state.engine.job_applicants(&job_id).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            tracing::error!("Applicant listing failed for {}: {}", job_id, e);
            engine_error_response(&e)
        }
    }
}

/// Invalidate cached rankings for a subject
///
/// POST /api/v1/matches/invalidate
///
/// Called by the profile service after a profile or thesis edit so the
/// next match read reflects it immediately.
async fn invalidate(
    state: web::Data<AppState>,
    req: web::Json<InvalidateRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    state.engine.invalidate_subject(&req.subject_id);
    tracing::debug!("Invalidated cached rankings for {}", req.subject_id);

    HttpResponse::Ok().json(InvalidateResponse {
        success: true,
        subject_id: req.subject_id.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
