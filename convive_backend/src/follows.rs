use crate::database::models::{FollowRecord, FollowedProfile, FollowerProfile};
use crate::database::repositories::{FollowRepository, UserRepository};
use crate::database::Database;
use crate::error::{ServiceError, ServiceResult};
use crate::utils::non_empty;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone)]
pub struct FollowService {
    database: Database,
}

impl FollowService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Records that `usuario_id` now follows `usuario_a_seguir_id` and
    /// returns the id of the new edge.
    pub fn follow_user(&self, input: FollowInput) -> ServiceResult<String> {
        let (Some(follower_id), Some(target_id)) = (
            non_empty(input.usuario_id),
            non_empty(input.usuario_a_seguir_id),
        ) else {
            return Err(ServiceError::Invalid(
                "Todos os campos são obrigatórios".into(),
            ));
        };
        if follower_id == target_id {
            return Err(ServiceError::Invalid(
                "Você não pode seguir a si mesmo".into(),
            ));
        }

        let target = self
            .database
            .with_repositories(|repos| repos.users().get(&target_id))?;
        if target.is_none() {
            return Err(ServiceError::Invalid(
                "Usuário a ser seguido não encontrado".into(),
            ));
        }

        let existing = self
            .database
            .with_repositories(|repos| repos.follows().find_edge(&target_id, &follower_id))?;
        if existing.is_some() {
            return Err(ServiceError::Invalid("Você já segue este usuário".into()));
        }

        let record = FollowRecord {
            id: Uuid::new_v4().to_string(),
            followed_id: target_id,
            follower_id,
        };
        self.database
            .with_repositories(|repos| repos.follows().create(&record))?;
        Ok(record.id)
    }

    /// Pages through the accounts following `user_id`. Unknown ids simply
    /// produce an empty page.
    pub fn list_followers(&self, user_id: &str, page: u32, limit: u32) -> ServiceResult<FollowersPage> {
        let page = i64::from(page);
        let limit = i64::from(limit);
        let offset = (page - 1).max(0) * limit;

        let (rows, total) = self.database.with_repositories(|repos| {
            let follows = repos.follows();
            let rows = follows.list_followers_page(user_id, limit, offset)?;
            let total = follows.count_followers(user_id)?;
            Ok((rows, total))
        })?;

        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Ok(FollowersPage {
            data: rows.into_iter().map(FollowerView::from_profile).collect(),
            total,
            current_page: page,
            total_pages,
        })
    }

    pub fn list_following(&self, user_id: &str) -> ServiceResult<Vec<FollowingView>> {
        let rows = self
            .database
            .with_repositories(|repos| repos.follows().list_following(user_id))?;
        Ok(rows.into_iter().map(FollowingView::from_profile).collect())
    }

    pub fn unfollow_user(&self, input: FollowInput) -> ServiceResult<()> {
        let (Some(follower_id), Some(target_id)) = (
            non_empty(input.usuario_id),
            non_empty(input.usuario_a_seguir_id),
        ) else {
            return Err(ServiceError::Invalid(
                "Todos os campos são obrigatórios".into(),
            ));
        };

        let Some(edge) = self
            .database
            .with_repositories(|repos| repos.follows().find_edge(&target_id, &follower_id))?
        else {
            return Err(ServiceError::Invalid("Você não segue este usuário".into()));
        };
        self.database
            .with_repositories(|repos| repos.follows().delete(&edge.id))?;
        Ok(())
    }
}

/// Input shared by the follow and unfollow operations: `usuario_id` is the
/// acting account, `usuario_a_seguir_id` the one being followed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowInput {
    #[serde(default)]
    pub usuario_id: Option<String>,
    #[serde(default)]
    pub usuario_a_seguir_id: Option<String>,
}

/// One account following the requested user. `seguidor_id` is that
/// account's user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowerView {
    pub seguidor_id: String,
    pub nome: String,
    pub nick: String,
    pub imagem: String,
}

/// One account the requested user follows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowingView {
    pub usuario_id: String,
    pub nome: String,
    pub nick: String,
    pub imagem: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowersPage {
    pub data: Vec<FollowerView>,
    pub total: i64,
    #[serde(rename = "currentPage")]
    pub current_page: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl FollowerView {
    fn from_profile(profile: FollowerProfile) -> Self {
        Self {
            seguidor_id: profile.follower_id,
            nome: profile.name,
            nick: profile.nick,
            imagem: profile.image,
        }
    }
}

impl FollowingView {
    fn from_profile(profile: FollowedProfile) -> Self {
        Self {
            usuario_id: profile.followed_id,
            nome: profile.name,
            nick: profile.nick,
            imagem: profile.image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::users::{CreateUserInput, UserService};
    use rusqlite::Connection;

    fn setup_database() -> Database {
        let conn = Connection::open_in_memory().expect("in-memory db");
        let db = Database::from_connection(conn, true);
        db.ensure_migrations().expect("migrations");
        db
    }

    fn create_user(db: &Database, nick: &str) -> String {
        let view = UserService::new(db.clone())
            .create_user(CreateUserInput {
                nome: Some(format!("User {nick}")),
                email: Some(format!("{nick}@example.com")),
                senha: Some("segredo".into()),
                nascimento: Some("2000-01-01".into()),
                nick: Some(nick.into()),
            })
            .expect("create user");
        view.id
    }

    fn follow(service: &FollowService, follower: &str, target: &str) -> ServiceResult<String> {
        service.follow_user(FollowInput {
            usuario_id: Some(follower.into()),
            usuario_a_seguir_id: Some(target.into()),
        })
    }

    #[test]
    fn follow_rejects_self_and_unknown_targets() {
        let db = setup_database();
        let ana = create_user(&db, "ana");
        let service = FollowService::new(db);

        match follow(&service, &ana, &ana) {
            Err(ServiceError::Invalid(msg)) => {
                assert_eq!(msg, "Você não pode seguir a si mesmo")
            }
            other => panic!("unexpected result: {other:?}"),
        }

        match follow(&service, &ana, "missing") {
            Err(ServiceError::Invalid(msg)) => {
                assert_eq!(msg, "Usuário a ser seguido não encontrado")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn following_twice_is_rejected_and_leaves_one_edge() {
        let db = setup_database();
        let ana = create_user(&db, "ana");
        let bia = create_user(&db, "bia");
        let service = FollowService::new(db);

        follow(&service, &ana, &bia).expect("first follow");
        match follow(&service, &ana, &bia) {
            Err(ServiceError::Invalid(msg)) => assert_eq!(msg, "Você já segue este usuário"),
            other => panic!("unexpected result: {other:?}"),
        }

        let page = service.list_followers(&bia, 1, 10).expect("followers");
        assert_eq!(page.total, 1);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].seguidor_id, ana);
        assert_eq!(page.data[0].nick, "ana");
    }

    #[test]
    fn followers_are_paged_with_ceiling_page_count() {
        let db = setup_database();
        let star = create_user(&db, "star");
        let service = FollowService::new(db.clone());

        for i in 0..12 {
            let fan = create_user(&db, &format!("fan{i}"));
            follow(&service, &fan, &star).expect("follow");
        }

        let page = service.list_followers(&star, 2, 5).expect("page two");
        assert_eq!(page.data.len(), 5);
        assert_eq!(page.total, 12);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 3);

        let tail = service.list_followers(&star, 3, 5).expect("page three");
        assert_eq!(tail.data.len(), 2);

        let past_the_end = service.list_followers(&star, 4, 5).expect("page four");
        assert!(past_the_end.data.is_empty());
        assert_eq!(past_the_end.total, 12);
    }

    #[test]
    fn followers_page_serializes_camel_case_fields() {
        let db = setup_database();
        let service = FollowService::new(db);

        let page = service.list_followers("missing", 1, 10).expect("empty page");
        assert_eq!(page.total, 0);

        let encoded = serde_json::to_value(&page).expect("serialize");
        assert!(encoded.get("currentPage").is_some());
        assert!(encoded.get("totalPages").is_some());
        assert!(encoded.get("current_page").is_none());
    }

    #[test]
    fn list_following_returns_followed_profiles() {
        let db = setup_database();
        let ana = create_user(&db, "ana");
        let bia = create_user(&db, "bia");
        let caio = create_user(&db, "caio");
        let service = FollowService::new(db);

        follow(&service, &ana, &bia).expect("follow bia");
        follow(&service, &ana, &caio).expect("follow caio");

        let following = service.list_following(&ana).expect("following");
        assert_eq!(following.len(), 2);
        let nicks: Vec<_> = following.iter().map(|f| f.nick.as_str()).collect();
        assert!(nicks.contains(&"bia"));
        assert!(nicks.contains(&"caio"));
    }

    #[test]
    fn unfollow_removes_the_edge_once() {
        let db = setup_database();
        let ana = create_user(&db, "ana");
        let bia = create_user(&db, "bia");
        let service = FollowService::new(db);

        follow(&service, &ana, &bia).expect("follow");

        let input = || FollowInput {
            usuario_id: Some(ana.clone()),
            usuario_a_seguir_id: Some(bia.clone()),
        };
        service.unfollow_user(input()).expect("unfollow");

        match service.unfollow_user(input()) {
            Err(ServiceError::Invalid(msg)) => assert_eq!(msg, "Você não segue este usuário"),
            other => panic!("unexpected result: {other:?}"),
        }

        let page = service.list_followers(&bia, 1, 10).expect("followers");
        assert_eq!(page.total, 0);
    }
}
