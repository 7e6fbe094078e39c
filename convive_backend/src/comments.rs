use crate::database::models::{CommentRecord, CommentWithAuthor};
use crate::database::repositories::{CommentRepository, PostRepository, UserRepository};
use crate::database::Database;
use crate::error::{ServiceError, ServiceResult};
use crate::utils::non_empty;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone)]
pub struct CommentService {
    database: Database,
}

impl CommentService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Stores a new comment and returns its id.
    pub fn create_comment(&self, input: CreateCommentInput) -> ServiceResult<String> {
        let (Some(post_id), Some(author_id), Some(body)) = (
            non_empty(input.publicacao_id),
            non_empty(input.usuario_id),
            non_empty(input.comentario),
        ) else {
            return Err(ServiceError::Invalid(
                "Todos os campos são obrigatórios".into(),
            ));
        };

        let post = self
            .database
            .with_repositories(|repos| repos.posts().get(&post_id))?;
        if post.is_none() {
            return Err(ServiceError::Invalid("Publicação não encontrada".into()));
        }
        let author = self
            .database
            .with_repositories(|repos| repos.users().get(&author_id))?;
        if author.is_none() {
            return Err(ServiceError::Invalid("Usuário não encontrado".into()));
        }

        let record = CommentRecord {
            id: Uuid::new_v4().to_string(),
            post_id,
            author_id,
            body,
            like_count: 0,
        };
        self.database
            .with_repositories(|repos| repos.comments().create(&record))?;
        Ok(record.id)
    }

    pub fn list_for_post(&self, post_id: &str) -> ServiceResult<Vec<CommentView>> {
        let comments = self
            .database
            .with_repositories(|repos| repos.comments().list_for_post_with_authors(post_id))?;
        Ok(comments.into_iter().map(CommentView::from_row).collect())
    }

    pub fn delete_comment(&self, input: DeleteCommentInput) -> ServiceResult<()> {
        let (Some(comment_id), Some(requester_id)) =
            (non_empty(input.comentario_id), non_empty(input.usuario_id))
        else {
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
        if comment.author_id != requester_id {
            return Err(ServiceError::Forbidden("Usuário não autorizado".into()));
        }
        self.database
            .with_repositories(|repos| repos.comments().delete(&comment_id))?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentInput {
    #[serde(default)]
    pub publicacao_id: Option<String>,
    #[serde(default)]
    pub usuario_id: Option<String>,
    #[serde(default)]
    pub comentario: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCommentInput {
    #[serde(default)]
    pub comentario_id: Option<String>,
    #[serde(default)]
    pub usuario_id: Option<String>,
}

/// One row of a post's comment listing. As in the feed rows, the author
/// image ships inside a one-element array; like tallies are not included
/// here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub comentario_id: String,
    pub comentario: String,
    pub usuario_id: String,
    pub nick: String,
    pub imagem: Vec<String>,
}

impl CommentView {
    fn from_row(row: CommentWithAuthor) -> Self {
        Self {
            comentario_id: row.comment.id,
            comentario: row.comment.body,
            usuario_id: row.comment.author_id,
            nick: row.author_nick,
            imagem: vec![row.author_image],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn create_post(db: &Database, author_id: &str) -> String {
        PostService::new(db.clone())
            .create_post(CreatePostInput {
                publicacao: Some("Publicação".into()),
                usuario_id: Some(author_id.into()),
            })
            .expect("create post")
    }

    #[test]
    fn create_comment_checks_post_before_author() {
        let db = setup_database();
        let author_id = create_user(&db, "ana");
        let service = CommentService::new(db.clone());

        let missing_post = service.create_comment(CreateCommentInput {
            publicacao_id: Some("missing".into()),
            usuario_id: Some("also-missing".into()),
            comentario: Some("Oi".into()),
        });
        match missing_post {
            Err(ServiceError::Invalid(msg)) => assert_eq!(msg, "Publicação não encontrada"),
            other => panic!("unexpected result: {other:?}"),
        }

        let post_id = create_post(&db, &author_id);
        let missing_author = service.create_comment(CreateCommentInput {
            publicacao_id: Some(post_id),
            usuario_id: Some("missing".into()),
            comentario: Some("Oi".into()),
        });
        match missing_author {
            Err(ServiceError::Invalid(msg)) => assert_eq!(msg, "Usuário não encontrado"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn listed_comments_carry_author_fields_but_no_likes() {
        let db = setup_database();
        let author_id = create_user(&db, "ana");
        let post_id = create_post(&db, &author_id);
        let service = CommentService::new(db);

        service
            .create_comment(CreateCommentInput {
                publicacao_id: Some(post_id.clone()),
                usuario_id: Some(author_id.clone()),
                comentario: Some("Primeiro".into()),
            })
            .expect("create comment");

        let listed = service.list_for_post(&post_id).expect("list comments");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].comentario, "Primeiro");
        assert_eq!(listed[0].nick, "ana");
        assert_eq!(listed[0].imagem, vec!["assets/dog.jpg".to_string()]);

        let encoded = serde_json::to_value(&listed[0]).expect("serialize");
        assert!(encoded.get("qtd_likes").is_none());
        assert!(encoded.get("criado_em").is_none());
    }

    #[test]
    fn listing_comments_of_an_unknown_post_yields_an_empty_page() {
        let db = setup_database();
        let service = CommentService::new(db);
        let listed = service.list_for_post("missing").expect("list comments");
        assert!(listed.is_empty());
    }

    #[test]
    fn delete_comment_enforces_ownership() {
        let db = setup_database();
        let author_id = create_user(&db, "ana");
        let intruder_id = create_user(&db, "bia");
        let post_id = create_post(&db, &author_id);
        let service = CommentService::new(db);

        let comment_id = service
            .create_comment(CreateCommentInput {
                publicacao_id: Some(post_id),
                usuario_id: Some(author_id.clone()),
                comentario: Some("Meu".into()),
            })
            .expect("create comment");

        let denied = service.delete_comment(DeleteCommentInput {
            comentario_id: Some(comment_id.clone()),
            usuario_id: Some(intruder_id),
        });
        match denied {
            Err(ServiceError::Forbidden(msg)) => assert_eq!(msg, "Usuário não autorizado"),
            other => panic!("unexpected result: {other:?}"),
        }

        service
            .delete_comment(DeleteCommentInput {
                comentario_id: Some(comment_id.clone()),
                usuario_id: Some(author_id),
            })
            .expect("owner deletes");

        let repeat = service.delete_comment(DeleteCommentInput {
            comentario_id: Some(comment_id),
            usuario_id: Some("anyone".into()),
        });
        match repeat {
            Err(ServiceError::Invalid(msg)) => assert_eq!(msg, "Comentário não encontrado"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
