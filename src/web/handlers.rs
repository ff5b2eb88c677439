use std::time::Instant;

use askama::Template;
use axum::{
    extract::{rejection::FormRejection, rejection::QueryRejection, Form, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::{debug, error};

use crate::constants::{INTERNAL_ERROR_MESSAGE, INVALID_RESULT_MESSAGE, SERVICE_NAME};
use crate::error::{PredictError, Result};
use crate::metrics::PredictMetrics;
use crate::shipment::{FeatureVector, ShipmentRecord};
use crate::web::models::{HealthResponse, ResultLocation, ResultParams, ShipmentForm};
use crate::web::state::AppState;
use crate::web::templates::{IndexTemplate, ResultTemplate};

pub async fn index() -> Response {
    render(IndexTemplate::new())
}

/// `POST /predict`: encode, assemble, normalize, classify, then redirect to
/// the result page.
pub async fn predict(
    State(state): State<AppState>,
    form: std::result::Result<Form<ShipmentForm>, FormRejection>,
) -> Response {
    match run_prediction(&state, form) {
        Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
        Err(e) => {
            if e.status().is_server_error() {
                PredictMetrics::record_failure();
            } else {
                PredictMetrics::record_rejected(e.reason());
            }
            e.into_response()
        }
    }
}

fn run_prediction(
    state: &AppState,
    form: std::result::Result<Form<ShipmentForm>, FormRejection>,
) -> Result<String> {
    let Form(form) = form.map_err(|e| PredictError::Form(e.body_text()))?;
    debug!(form = ?form, "Form data");

    let record = ShipmentRecord::from_fields(|field| form.get(field))?;
    let features = FeatureVector::from(&record);
    let named: Vec<_> = features.named().collect();
    debug!(raw = ?named, "Raw features");

    let started = Instant::now();
    let prediction = state.predictor.predict(&features)?;
    let elapsed = started.elapsed().as_secs_f64();

    let query = serde_urlencoded::to_string(ResultLocation {
        result: prediction.outcome.message(),
        reach_prob: prediction.reach_percent(),
        no_reach_prob: prediction.no_reach_percent(),
    })
    .map_err(|e| PredictError::Internal(format!("encoding result location: {e}")))?;

    PredictMetrics::record_success(prediction.outcome, elapsed);
    Ok(format!("/result?{query}"))
}

/// `GET /result`: renders the label and both probabilities to two decimals.
pub async fn show_result(
    params: std::result::Result<Query<ResultParams>, QueryRejection>,
) -> Response {
    let Ok(Query(params)) = params else {
        return (StatusCode::BAD_REQUEST, INVALID_RESULT_MESSAGE).into_response();
    };

    let parse = |raw: Option<&str>| {
        raw.and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    };
    let (Some(result), Some(reach), Some(no_reach)) = (
        params.result,
        parse(params.reach_prob.as_deref()),
        parse(params.no_reach_prob.as_deref()),
    ) else {
        return (StatusCode::BAD_REQUEST, INVALID_RESULT_MESSAGE).into_response();
    };

    render(ResultTemplate {
        result,
        reach_prob: format!("{reach:.2}"),
        no_reach_prob: format!("{no_reach:.2}"),
    })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        model: state.predictor.summary(),
    })
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed").into_response(),
    }
}

fn render<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "Template rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE).into_response()
        }
    }
}
