use super::{ApiResult, AppState};
use crate::likes::{CommentLikeInput, LikeCountView, LikeService, PostLikeInput};
use axum::extract::State;
use axum::Json;

pub(crate) async fn like_post(
    State(state): State<AppState>,
    Json(payload): Json<PostLikeInput>,
) -> ApiResult<LikeCountView> {
    let service = LikeService::new(state.database.clone());
    let count = service.like_post(payload)?;
    Ok(Json(count))
}

pub(crate) async fn unlike_post(
    State(state): State<AppState>,
    Json(payload): Json<PostLikeInput>,
) -> ApiResult<LikeCountView> {
    let service = LikeService::new(state.database.clone());
    let count = service.unlike_post(payload)?;
    Ok(Json(count))
}

pub(crate) async fn like_comment(
    State(state): State<AppState>,
    Json(payload): Json<CommentLikeInput>,
) -> ApiResult<LikeCountView> {
    let service = LikeService::new(state.database.clone());
    let count = service.like_comment(payload)?;
    Ok(Json(count))
}

pub(crate) async fn unlike_comment(
    State(state): State<AppState>,
    Json(payload): Json<CommentLikeInput>,
) -> ApiResult<LikeCountView> {
    let service = LikeService::new(state.database.clone());
    let count = service.unlike_comment(payload)?;
    Ok(Json(count))
}
