use super::{ApiError, ApiResult, AppState, CollectionResponse};
use crate::comments::{CommentService, CommentView, CreateCommentInput, DeleteCommentInput};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct ListCommentsParams {
    #[serde(default)]
    publicacao_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CommentCreatedResponse {
    comentario_id: String,
}

pub(crate) async fn create_comment(
    State(state): State<AppState>,
    Json(payload): Json<CreateCommentInput>,
) -> Result<(StatusCode, Json<CommentCreatedResponse>), ApiError> {
    let service = CommentService::new(state.database.clone());
    let comentario_id = service.create_comment(payload)?;
    Ok((
        StatusCode::CREATED,
        Json(CommentCreatedResponse { comentario_id }),
    ))
}

pub(crate) async fn list_comments(
    State(state): State<AppState>,
    Query(params): Query<ListCommentsParams>,
) -> ApiResult<CollectionResponse<CommentView>> {
    let Some(publicacao_id) = params.publicacao_id.filter(|v| !v.is_empty()) else {
        return Err(ApiError::BadRequest("Publicação não informada".into()));
    };
    let service = CommentService::new(state.database.clone());
    let comments = service.list_for_post(&publicacao_id)?;
    Ok(Json(CollectionResponse::new(comments)))
}

pub(crate) async fn delete_comment(
    State(state): State<AppState>,
    Json(payload): Json<DeleteCommentInput>,
) -> Result<StatusCode, ApiError> {
    let service = CommentService::new(state.database.clone());
    service.delete_comment(payload)?;
    Ok(StatusCode::NO_CONTENT)
}
