use crate::database::repositories::{CommentRepository, PostRepository};
use crate::database::Database;
use crate::error::{ServiceError, ServiceResult};
use crate::utils::non_empty;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct LikeService {
    database: Database,
}

impl LikeService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    pub fn like_post(&self, input: PostLikeInput) -> ServiceResult<LikeCountView> {
        self.adjust_post_likes(input, 1)
    }

    pub fn unlike_post(&self, input: PostLikeInput) -> ServiceResult<LikeCountView> {
        self.adjust_post_likes(input, -1)
    }

    pub fn like_comment(&self, input: CommentLikeInput) -> ServiceResult<LikeCountView> {
        self.adjust_comment_likes(input, 1)
    }

    pub fn unlike_comment(&self, input: CommentLikeInput) -> ServiceResult<LikeCountView> {
        self.adjust_comment_likes(input, -1)
    }

    fn adjust_post_likes(&self, input: PostLikeInput, delta: i64) -> ServiceResult<LikeCountView> {
        let Some(post_id) = non_empty(input.publicacao_id) else {
            return Err(ServiceError::Invalid(
                "Todos os campos são obrigatórios".into(),
            ));
        };
        let Some(post) = self
            .database
            .with_repositories(|repos| repos.posts().get(&post_id))?
        else {
            return Err(ServiceError::Invalid("Publicação não encontrada".into()));
        };

        // Decrements floor at zero; the tally never goes negative.
        let like_count = (post.like_count + delta).max(0);
        self.database
            .with_repositories(|repos| repos.posts().set_like_count(&post_id, like_count))?;
        Ok(LikeCountView {
            qtd_likes: like_count,
        })
    }

    fn adjust_comment_likes(
        &self,
        input: CommentLikeInput,
        delta: i64,
    ) -> ServiceResult<LikeCountView> {
        let Some(comment_id) = non_empty(input.comentario_id) else {
            return Err(ServiceError::Invalid(
                "Todos os campos são obrigatórios".into(),
            ));
        };
        let Some(comment) = self
            .database
            .with_repositories(|repos| repos.comments().get(&comment_id))?
        else {
            return Err(ServiceError::Invalid("Comentário não encontrado".into()));
        };

        let like_count = (comment.like_count + delta).max(0);
        self.database
            .with_repositories(|repos| repos.comments().set_like_count(&comment_id, like_count))?;
        Ok(LikeCountView {
            qtd_likes: like_count,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostLikeInput {
    #[serde(default)]
    pub publicacao_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentLikeInput {
    #[serde(default)]
    pub comentario_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeCountView {
    pub qtd_likes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::{CommentService, CreateCommentInput};
    use crate::database::Database;
    use crate::posts::{CreatePostInput, PostService};
    use crate::users::{CreateUserInput, UserService};
    use rusqlite::Connection;

    fn setup_database() -> Database {
        let conn = Connection::open_in_memory().expect("in-memory db");
        let db = Database::from_connection(conn, true);
        db.ensure_migrations().expect("migrations");
        db
    }

    fn seed_post(db: &Database) -> String {
        let user = UserService::new(db.clone())
            .create_user(CreateUserInput {
                nome: Some("Ana".into()),
                email: Some("ana@example.com".into()),
                senha: Some("segredo".into()),
                nascimento: Some("2000-01-01".into()),
                nick: Some("ana".into()),
            })
            .expect("create user");
        PostService::new(db.clone())
            .create_post(CreatePostInput {
                publicacao: Some("Publicação".into()),
                usuario_id: Some(user.id),
            })
            .expect("create post")
    }

    #[test]
    fn post_likes_accumulate_and_floor_at_zero() {
        let db = setup_database();
        let post_id = seed_post(&db);
        let service = LikeService::new(db);

        let input = || PostLikeInput {
            publicacao_id: Some(post_id.clone()),
        };

        assert_eq!(service.like_post(input()).unwrap().qtd_likes, 1);
        assert_eq!(service.like_post(input()).unwrap().qtd_likes, 2);
        assert_eq!(service.unlike_post(input()).unwrap().qtd_likes, 1);
        assert_eq!(service.unlike_post(input()).unwrap().qtd_likes, 0);
        assert_eq!(service.unlike_post(input()).unwrap().qtd_likes, 0);
    }

    #[test]
    fn comment_likes_accumulate_and_floor_at_zero() {
        let db = setup_database();
        let post_id = seed_post(&db);
        let author = UserService::new(db.clone())
            .list_users(Some("ana"), None)
            .expect("list users")
            .remove(0);
        let comment_id = CommentService::new(db.clone())
            .create_comment(CreateCommentInput {
                publicacao_id: Some(post_id),
                usuario_id: Some(author.id),
                comentario: Some("Oi".into()),
            })
            .expect("create comment");
        let service = LikeService::new(db);

        let input = || CommentLikeInput {
            comentario_id: Some(comment_id.clone()),
        };

        assert_eq!(service.like_comment(input()).unwrap().qtd_likes, 1);
        assert_eq!(service.unlike_comment(input()).unwrap().qtd_likes, 0);
        assert_eq!(service.unlike_comment(input()).unwrap().qtd_likes, 0);
    }

    #[test]
    fn missing_targets_are_rejected() {
        let db = setup_database();
        let service = LikeService::new(db);

        let no_post = service.like_post(PostLikeInput {
            publicacao_id: Some("missing".into()),
        });
        match no_post {
            Err(ServiceError::Invalid(msg)) => assert_eq!(msg, "Publicação não encontrada"),
            other => panic!("unexpected result: {other:?}"),
        }

        let no_comment = service.unlike_comment(CommentLikeInput {
            comentario_id: Some("missing".into()),
        });
        match no_comment {
            Err(ServiceError::Invalid(msg)) => assert_eq!(msg, "Comentário não encontrado"),
            other => panic!("unexpected result: {other:?}"),
        }

        let no_field = service.like_post(PostLikeInput {
            publicacao_id: None,
        });
        match no_field {
            Err(ServiceError::Invalid(msg)) => {
                assert_eq!(msg, "Todos os campos são obrigatórios")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
