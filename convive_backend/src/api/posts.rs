use super::{ApiError, ApiResult, AppState, CollectionResponse, MessageResponse};
use crate::posts::{
    CreatePostInput, DeletePostInput, PostDetailsView, PostFeedView, PostService, UserPostView,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct PostCreatedResponse {
    publicacao_id: String,
}

pub(crate) async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<CreatePostInput>,
) -> Result<(StatusCode, Json<PostCreatedResponse>), ApiError> {
    let service = PostService::new(state.database.clone());
    let publicacao_id = service.create_post(payload)?;
    Ok((
        StatusCode::CREATED,
        Json(PostCreatedResponse { publicacao_id }),
    ))
}

pub(crate) async fn list_posts(
    State(state): State<AppState>,
) -> ApiResult<CollectionResponse<PostFeedView>> {
    let service = PostService::new(state.database.clone());
    let posts = service.list_posts()?;
    Ok(Json(CollectionResponse::new(posts)))
}

pub(crate) async fn list_user_posts(
    State(state): State<AppState>,
    Path(usuario_id): Path<String>,
) -> ApiResult<CollectionResponse<UserPostView>> {
    let service = PostService::new(state.database.clone());
    let posts = service.list_user_posts(&usuario_id)?;
    Ok(Json(CollectionResponse::new(posts)))
}

pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(publicacao_id): Path<String>,
) -> ApiResult<PostDetailsView> {
    let service = PostService::new(state.database.clone());
    let post = service.get_post(&publicacao_id)?;
    Ok(Json(post))
}

pub(crate) async fn delete_post(
    State(state): State<AppState>,
    Json(payload): Json<DeletePostInput>,
) -> ApiResult<MessageResponse> {
    let service = PostService::new(state.database.clone());
    service.delete_post(payload)?;
    Ok(Json(MessageResponse {
        mensagem: "Publicação deletada com sucesso".into(),
    }))
}
