use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use database_layer::{NewTemplate, Template, TemplateRepository};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::handlers::common::{parse_payload, store_failure, MessageResponse};
use crate::middleware::RecordId;
use crate::server::MedAssistServer;

const INVALID: &str = "Invalid template data";
const NOT_FOUND: &str = "Template not found";

#[utoipa::path(
    get,
    path = "/api/templates",
    responses((status = 200, description = "Document templates, alphabetical", body = Vec<Template>)),
    tag = "templates"
)]
pub async fn list_templates(State(server): State<MedAssistServer>) -> ApiResult<Json<Vec<Template>>> {
    let templates = server
        .store
        .list_templates()
        .await
        .map_err(|e| store_failure("Error fetching templates", e))?;
    Ok(Json(templates))
}

#[utoipa::path(
    get,
    path = "/api/templates/{id}",
    params(("id" = String, Path, description = "Template id")),
    responses(
        (status = 200, description = "Template", body = Template),
        (status = 404, description = "Unknown id", body = crate::error::ApiErrorResponse)
    ),
    tag = "templates"
)]
pub async fn get_template(
    State(server): State<MedAssistServer>,
    id: RecordId,
) -> ApiResult<Json<Template>> {
    let id = id.or_not_found(NOT_FOUND)?;
    server
        .store
        .get_template(id)
        .await
        .map_err(|e| store_failure("Error fetching template", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

#[utoipa::path(
    post,
    path = "/api/templates",
    request_body = NewTemplate,
    responses(
        (status = 201, description = "Template created", body = Template),
        (status = 400, description = "Invalid payload", body = crate::error::ApiErrorResponse)
    ),
    tag = "templates"
)]
pub async fn create_template(
    State(server): State<MedAssistServer>,
    payload: Result<Json<NewTemplate>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Template>)> {
    let new = parse_payload(payload, INVALID)?;
    let template = server
        .store
        .create_template(&new)
        .await
        .map_err(|e| store_failure("Error creating template", e))?;

    info!(template_id = %template.id, kind = %template.template_type, "Template created");
    Ok((StatusCode::CREATED, Json(template)))
}

#[utoipa::path(
    put,
    path = "/api/templates/{id}",
    params(("id" = String, Path, description = "Template id")),
    request_body = NewTemplate,
    responses(
        (status = 200, description = "Template updated", body = Template),
        (status = 400, description = "Invalid payload", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Unknown id", body = crate::error::ApiErrorResponse)
    ),
    tag = "templates"
)]
pub async fn update_template(
    State(server): State<MedAssistServer>,
    id: RecordId,
    payload: Result<Json<NewTemplate>, JsonRejection>,
) -> ApiResult<Json<Template>> {
    let changes = parse_payload(payload, INVALID)?;
    let id = id.or_not_found(NOT_FOUND)?;
    let template = server
        .store
        .update_template(id, &changes)
        .await
        .map_err(|e| store_failure("Error updating template", e))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(Json(template))
}

#[utoipa::path(
    delete,
    path = "/api/templates/{id}",
    params(("id" = String, Path, description = "Template id")),
    responses((status = 200, description = "Template deleted", body = MessageResponse)),
    tag = "templates"
)]
pub async fn delete_template(
    State(server): State<MedAssistServer>,
    RecordId(id): RecordId,
) -> ApiResult<Json<MessageResponse>> {
    if let Some(id) = id {
        server
            .store
            .delete_template(id)
            .await
            .map_err(|e| store_failure("Error deleting template", e))?;
    }
    Ok(MessageResponse::new("Template deleted"))
}
