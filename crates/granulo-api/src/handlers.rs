//! HTTP request handlers
//!
//! Axum handlers for the Granulo API. Handlers are thin: they parse the body,
//! call into `granulo-core` and map errors through [`ApiError`].

use axum::Json;
use axum::extract::rejection::JsonRejection;
use granulo_core::classifier::classify_input;
use granulo_core::{GradationReport, GradationTest};
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::payload::{
    ClassifyRequest, ClassifyResponse, HealthResponse, SieveSetResponse, gradation_test_from_json,
};

/// Service name reported by the health check.
pub const SERVICE_NAME: &str = "granulo";

fn read_body(body: std::result::Result<Json<Value>, JsonRejection>) -> Result<Value> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::invalid_request(rejection.body_text()))
}

/// `POST /calcular`: threshold SUCS/AASHTO classification.
pub async fn calcular(
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<ClassifyResponse>> {
    let value = read_body(body)?;
    let input = ClassifyRequest::from_json(&value)?.into_input()?;
    let classification = classify_input(&input);

    tracing::info!(
        ll = input.ll,
        ip = input.ip,
        passing_200 = input.passing_200,
        sucs = %classification.sucs,
        aashto = %classification.aashto,
        "Classified soil"
    );

    Ok(Json(classification.into()))
}

/// `POST /gradation`: percent-passing table with its checks.
pub async fn gradation(
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<GradationReport>> {
    let value = read_body(body)?;
    let test = gradation_test_from_json(&value)?;
    let report = GradationReport::build(&test)?;

    tracing::info!(
        sieves = report.results.len(),
        error_percent = report.mass_balance.error_percent,
        within_tolerance = report.mass_balance.within_tolerance,
        "Computed gradation"
    );
    if !report.mass_balance.within_tolerance {
        tracing::warn!(
            error_percent = report.mass_balance.error_percent,
            "Mass balance outside tolerance"
        );
    }

    Ok(Json(report))
}

/// `GET /sieves/standard`: the default sieve stack.
pub async fn standard_sieves() -> Json<SieveSetResponse> {
    Json(GradationTest::standard().into())
}

/// `GET /health`: liveness.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
