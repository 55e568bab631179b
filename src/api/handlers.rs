use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use super::AppState;
use crate::error::{Result, TriageError};
use crate::models::{AgentState, CaseStatus, PatientDetails, PatientTrackingInfo, VitalSigns};
use crate::scoring::{normalize, score, AnalysisRequest};
use crate::tracking::{run_workflow, CaseEvent};

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: CaseStatus,
}

/// A case together with the state of its response agent.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseView<'a> {
    #[serde(flatten)]
    pub case: &'a PatientTrackingInfo,
    pub agent: Option<&'a AgentState>,
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Full assessment: risk, findings, recommendations, protocol, survival.
#[instrument(skip_all)]
pub async fn analyze(
    state: web::Data<AppState>,
    body: web::Json<AnalysisRequest>,
) -> Result<HttpResponse> {
    let request = body.into_inner();
    request.validate()?;

    let report = state.assessor.analyze(&request);
    Ok(HttpResponse::Ok().json(report))
}

/// Risk score for vitals alone.
pub async fn score_vitals(body: web::Json<VitalSigns>) -> HttpResponse {
    let risk = score(&normalize(&body));
    HttpResponse::Ok().json(risk)
}

#[instrument(skip_all)]
pub async fn create_case(
    state: web::Data<AppState>,
    body: web::Json<PatientDetails>,
) -> Result<HttpResponse> {
    let case = state.cases.lock().await.register(&body)?;
    info!(case_id = %case.id, "starting response agent");

    actix_rt::spawn(run_workflow(
        state.cases.clone(),
        case.id.clone(),
        state.workflow.as_ref().clone(),
    ));

    Ok(HttpResponse::Created().json(case))
}

pub async fn list_cases(state: web::Data<AppState>) -> HttpResponse {
    let store = state.cases.lock().await;
    let cases: Vec<&PatientTrackingInfo> = store.recent().collect();
    HttpResponse::Ok().json(cases)
}

pub async fn get_case(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
    let id = path.into_inner();
    let store = state.cases.lock().await;
    let case = store.get(&id).ok_or_else(|| TriageError::CaseNotFound(id.clone()))?;

    Ok(HttpResponse::Ok().json(CaseView {
        case,
        agent: store.agent(&id),
    }))
}

#[instrument(skip(state, body))]
pub async fn update_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<StatusUpdate>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let mut store = state.cases.lock().await;
    let case = store.apply(CaseEvent::StatusChanged {
        id,
        status: body.status,
    })?;
    Ok(HttpResponse::Ok().json(case))
}
