use super::{ApiError, ApiResult, AppState, CollectionResponse, MessageResponse};
use crate::follows::{FollowInput, FollowService, FollowersPage, FollowingView};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct FollowersPageParams {
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_limit")]
    limit: u32,
}

pub(crate) fn default_page() -> u32 {
    1
}

pub(crate) fn default_limit() -> u32 {
    10
}

#[derive(Debug, Serialize)]
pub(crate) struct FollowCreatedResponse {
    seguidor_id: String,
}

pub(crate) async fn follow_user(
    State(state): State<AppState>,
    Json(payload): Json<FollowInput>,
) -> Result<(StatusCode, Json<FollowCreatedResponse>), ApiError> {
    let service = FollowService::new(state.database.clone());
    let seguidor_id = service.follow_user(payload)?;
    Ok((
        StatusCode::CREATED,
        Json(FollowCreatedResponse { seguidor_id }),
    ))
}

pub(crate) async fn list_followers(
    State(state): State<AppState>,
    Path(usuario_id): Path<String>,
    Query(params): Query<FollowersPageParams>,
) -> ApiResult<FollowersPage> {
    let service = FollowService::new(state.database.clone());
    let page = service.list_followers(&usuario_id, params.page, params.limit)?;
    Ok(Json(page))
}

pub(crate) async fn list_following(
    State(state): State<AppState>,
    Path(usuario_id): Path<String>,
) -> ApiResult<CollectionResponse<FollowingView>> {
    let service = FollowService::new(state.database.clone());
    let following = service.list_following(&usuario_id)?;
    Ok(Json(CollectionResponse::new(following)))
}

pub(crate) async fn unfollow_user(
    State(state): State<AppState>,
    Json(payload): Json<FollowInput>,
) -> ApiResult<MessageResponse> {
    let service = FollowService::new(state.database.clone());
    service.unfollow_user(payload)?;
    Ok(Json(MessageResponse {
        mensagem: "Deixou de seguir o usuário com sucesso".into(),
    }))
}
