use axum::{
    extract::{Host, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::PipelineError;
use crate::logic::annotate::{annotate_list, annotate_record, HrefBase};
use crate::logic::expand::Expander;
use crate::logic::page::PageWindow;
use crate::logic::project::{project_list, project_record, requested_fields};
use crate::logic::search::search_records;
use crate::logic::validate::Validator;
use crate::model::{rules_for, Id, Record, ResourceKind};
use crate::store::traits::Store;

pub type AppState<S> = Arc<S>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn pipeline_error(err: PipelineError) -> HandlerError {
    let status =
        StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.to_string())))
}

fn store_error(err: anyhow::Error) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(err.to_string())),
    )
}

fn not_found(what: impl std::fmt::Display) -> HandlerError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(format!("{} not found", what))),
    )
}

fn bad_request(message: impl Into<String>) -> HandlerError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

/// Read-pipeline query parameters. The four reserved names drive the
/// pipeline stages; anything else acts as an attribute matcher (search).
#[derive(Debug, Default)]
pub struct ListParams {
    pub filter: Option<String>,
    pub expand: Option<String>,
    pub offset: Option<String>,
    pub limit: Option<String>,
    pub search: Vec<(String, String)>,
}

impl ListParams {
    pub fn from_query(query: HashMap<String, String>) -> Self {
        let mut params = ListParams::default();
        for (key, value) in query {
            match key.as_str() {
                "filter" => params.filter = Some(value),
                "expand" => params.expand = Some(value),
                "offset" => params.offset = Some(value),
                "limit" => params.limit = Some(value),
                _ => params.search.push((key, value)),
            }
        }
        params
    }
}

fn resource_kind(path: &str) -> Result<ResourceKind, HandlerError> {
    ResourceKind::from_path(path).ok_or_else(|| not_found(path))
}

fn object_body(payload: Value) -> Result<Record, HandlerError> {
    payload
        .as_object()
        .cloned()
        .ok_or_else(|| bad_request("body has to be a JSON object"))
}

/// GET /:resource — list with href annotation, relation placeholders or
/// expansion, attribute search, projection and offset/limit windowing,
/// wrapped in a collection envelope carrying its own href.
pub async fn list_resources<S: Store>(
    State(store): State<AppState<S>>,
    Path(resource): Path<String>,
    Host(host): Host,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Record>, HandlerError> {
    let kind = resource_kind(&resource)?;
    let params = ListParams::from_query(query);
    let base = HrefBase::new("http", host);

    let mut items = store.list(kind).await.map_err(store_error)?;
    annotate_list(&mut items, &base, kind.path());

    if let Some(relation) = kind.relation() {
        let children = store.list(relation.child).await.map_err(store_error)?;
        let requested = Expander::requested(params.expand.as_deref());
        for item in items.iter_mut() {
            Expander::attach(item, relation, &requested, &children, &base, kind.path());
        }
    }

    let items = search_records(items, &params.search).map_err(pipeline_error)?;
    let fields = requested_fields(params.filter.as_deref());
    let items = project_list(&items, &fields).map_err(pipeline_error)?;
    let window = PageWindow::parse(params.offset.as_deref(), params.limit.as_deref())
        .map_err(pipeline_error)?;
    let items = window.apply(items).map_err(pipeline_error)?;

    let mut envelope = Record::new();
    annotate_record(&mut envelope, &base, kind.path(), None);
    envelope.insert(
        "items".to_string(),
        Value::Array(items.into_iter().map(Value::Object).collect()),
    );
    Ok(Json(envelope))
}

/// GET /:resource/:id — single record with href, relation placeholder or
/// expansion, and optional projection. Offset/limit are ignored here.
pub async fn get_resource<S: Store>(
    State(store): State<AppState<S>>,
    Path((resource, id)): Path<(String, Id)>,
    Host(host): Host,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Record>, HandlerError> {
    let kind = resource_kind(&resource)?;
    let params = ListParams::from_query(query);
    let base = HrefBase::new("http", host);

    let mut record = store
        .get(kind, id)
        .await
        .map_err(store_error)?
        .ok_or_else(|| not_found(format!("{}/{}", kind, id)))?;
    annotate_record(&mut record, &base, kind.path(), Some(id));

    if let Some(relation) = kind.relation() {
        let children = store.list(relation.child).await.map_err(store_error)?;
        let requested = Expander::requested(params.expand.as_deref());
        Expander::attach(&mut record, relation, &requested, &children, &base, kind.path());
    }

    let fields = requested_fields(params.filter.as_deref());
    let record = project_record(&record, &fields).map_err(pipeline_error)?;
    Ok(Json(record))
}

/// POST /:resource — validate the raw payload against the resource's
/// rule table, clean it, store it. The server assigns id and timestamp.
pub async fn create_resource<S: Store>(
    State(store): State<AppState<S>>,
    Path(resource): Path<String>,
    Host(host): Host,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Record>), HandlerError> {
    let kind = resource_kind(&resource)?;
    let payload = object_body(payload)?;

    if payload.contains_key("id") {
        return Err(pipeline_error(PipelineError::InvalidValue(
            "id must not be set!".to_string(),
        )));
    }
    if payload.contains_key("timestamp") {
        return Err(pipeline_error(PipelineError::InvalidValue(
            "timestamp must not be set!".to_string(),
        )));
    }

    let validator = Validator::compile(&rules_for(kind)).map_err(pipeline_error)?;
    let body = validator.check(&payload).map_err(pipeline_error)?;

    let mut stored = store.insert(kind, body).await.map_err(store_error)?;
    let base = HrefBase::new("http", host);
    annotate_record(&mut stored, &base, kind.path(), None);
    Ok((StatusCode::CREATED, Json(stored)))
}

/// PUT /:resource/:id — full replacement. The path id wins over anything
/// in the payload and the timestamp is refreshed by the store.
pub async fn replace_resource<S: Store>(
    State(store): State<AppState<S>>,
    Path((resource, id)): Path<(String, Id)>,
    Host(host): Host,
    Json(payload): Json<Value>,
) -> Result<Json<Record>, HandlerError> {
    let kind = resource_kind(&resource)?;
    let payload = object_body(payload)?;

    let validator = Validator::compile(&rules_for(kind)).map_err(pipeline_error)?;
    let body = validator.check(&payload).map_err(pipeline_error)?;

    let mut stored = store
        .replace(kind, id, body)
        .await
        .map_err(store_error)?
        .ok_or_else(|| not_found(format!("{}/{}", kind, id)))?;
    let base = HrefBase::new("http", host);
    annotate_record(&mut stored, &base, kind.path(), Some(id));
    Ok(Json(stored))
}

/// DELETE /:resource/:id
pub async fn delete_resource<S: Store>(
    State(store): State<AppState<S>>,
    Path((resource, id)): Path<(String, Id)>,
) -> Result<StatusCode, HandlerError> {
    let kind = resource_kind(&resource)?;
    let removed = store.remove(kind, id).await.map_err(store_error)?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(format!("{}/{}", kind, id)))
    }
}
