use super::{ApiError, ApiResult, AppState, CollectionResponse};
use crate::users::{CreateUserInput, UpdateUserInput, UserProfileView, UserService, UserView};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct ListUsersParams {
    #[serde(default)]
    nick: Option<String>,
    #[serde(default)]
    nome: Option<String>,
}

pub(crate) async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserInput>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let service = UserService::new(state.database.clone());
    let user = service.create_user(payload)?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub(crate) async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListUsersParams>,
) -> ApiResult<CollectionResponse<UserView>> {
    let service = UserService::new(state.database.clone());
    let nick = params.nick.as_deref().filter(|v| !v.is_empty());
    let nome = params.nome.as_deref().filter(|v| !v.is_empty());
    let users = service.list_users(nick, nome)?;
    Ok(Json(CollectionResponse::new(users)))
}

pub(crate) async fn get_user(
    State(state): State<AppState>,
    Path(usuario_id): Path<String>,
) -> ApiResult<UserProfileView> {
    let service = UserService::new(state.database.clone());
    let user = service.get_user(&usuario_id)?;
    Ok(Json(user))
}

pub(crate) async fn update_user(
    State(state): State<AppState>,
    Path(usuario_id): Path<String>,
    Json(payload): Json<UpdateUserInput>,
) -> ApiResult<UserView> {
    let service = UserService::new(state.database.clone());
    let user = service.update_user(&usuario_id, payload)?;
    Ok(Json(user))
}
