use crate::database::models::{
    CommentWithAuthor, PostRecord, PostWithAuthor, PostWithCommentCount, UserRecord,
};
use crate::database::repositories::{CommentRepository, PostRepository, UserRepository};
use crate::database::Database;
use crate::error::{ServiceError, ServiceResult};
use crate::utils::{non_empty, now_utc_iso};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostService {
    database: Database,
}

impl PostService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Stores a new post and returns its id.
    pub fn create_post(&self, input: CreatePostInput) -> ServiceResult<String> {
        let (Some(body), Some(author_id)) =
            (non_empty(input.publicacao), non_empty(input.usuario_id))
        else {
            return Err(ServiceError::Invalid(
                "Todos os campos são obrigatórios".into(),
            ));
        };

        let author = self
            .database
            .with_repositories(|repos| repos.users().get(&author_id))?;
        if author.is_none() {
            return Err(ServiceError::Invalid("Usuário não encontrado".into()));
        }

        let record = PostRecord {
            id: Uuid::new_v4().to_string(),
            author_id,
            body,
            like_count: 0,
            created_at: now_utc_iso(),
        };
        self.database
            .with_repositories(|repos| repos.posts().create(&record))?;
        Ok(record.id)
    }

    pub fn list_posts(&self) -> ServiceResult<Vec<PostFeedView>> {
        let posts = self
            .database
            .with_repositories(|repos| repos.posts().list_with_authors())?;
        Ok(posts.into_iter().map(PostFeedView::from_row).collect())
    }

    pub fn list_user_posts(&self, author_id: &str) -> ServiceResult<Vec<UserPostView>> {
        let Some(author) = self
            .database
            .with_repositories(|repos| repos.users().get(author_id))?
        else {
            return Err(ServiceError::NotFound("Usuário não encontrado".into()));
        };
        let posts = self.database.with_repositories(|repos| {
            repos
                .posts()
                .list_for_author_with_comment_counts(author_id)
        })?;
        Ok(posts
            .into_iter()
            .map(|row| UserPostView::from_row(row, &author))
            .collect())
    }

    pub fn get_post(&self, post_id: &str) -> ServiceResult<PostDetailsView> {
        let Some(post) = self
            .database
            .with_repositories(|repos| repos.posts().get_with_author(post_id))?
        else {
            return Err(ServiceError::NotFound("Publicação não encontrada".into()));
        };
        let comments = self
            .database
            .with_repositories(|repos| repos.comments().list_for_post_with_authors(post_id))?;
        Ok(PostDetailsView::from_rows(post, comments))
    }

    pub fn delete_post(&self, input: DeletePostInput) -> ServiceResult<()> {
        let (Some(post_id), Some(requester_id)) =
            (non_empty(input.publicacao_id), non_empty(input.usuario_id))
        else {
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
        if post.author_id != requester_id {
            return Err(ServiceError::Forbidden("Usuário não autorizado".into()));
        }
        self.database
            .with_repositories(|repos| repos.posts().delete(&post_id))?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostInput {
    #[serde(default)]
    pub publicacao: Option<String>,
    #[serde(default)]
    pub usuario_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePostInput {
    #[serde(default)]
    pub publicacao_id: Option<String>,
    #[serde(default)]
    pub usuario_id: Option<String>,
}

/// One row of the global feed. The author image ships inside a one-element
/// array, which is what the frontend consuming this API expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFeedView {
    pub publicacao_id: String,
    pub publicacao: String,
    pub usuario_id: String,
    pub nick: String,
    pub imagem: Vec<String>,
    pub qtd_likes: i64,
    pub criado_em: String,
}

/// One row of a single author's feed, comment tally included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPostView {
    pub publicacao_id: String,
    pub publicacao: String,
    pub usuario_id: String,
    pub nick: String,
    pub imagem: Vec<String>,
    pub qtd_likes: i64,
    pub qtd_comentarios: i64,
    pub criado_em: String,
}

/// Full projection of a post with its comments embedded. Here the author
/// image is a plain string, unlike the feed rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailsView {
    pub publicacao_id: String,
    pub publicacao: String,
    pub usuario_id: String,
    pub nick: String,
    pub imagem: String,
    pub qtd_likes: i64,
    pub criado_em: String,
    pub comentarios: Vec<PostCommentView>,
}

/// Comment as embedded in a post's detail projection. Comments carry no
/// timestamp of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCommentView {
    pub comentario_id: String,
    pub comentario: String,
    pub usuario_id: String,
    pub nick: String,
    pub imagem: String,
    pub qtd_likes: i64,
}

impl PostFeedView {
    fn from_row(row: PostWithAuthor) -> Self {
        Self {
            publicacao_id: row.post.id,
            publicacao: row.post.body,
            usuario_id: row.post.author_id,
            nick: row.author_nick,
            imagem: vec![row.author_image],
            qtd_likes: row.post.like_count,
            criado_em: row.post.created_at,
        }
    }
}

impl UserPostView {
    fn from_row(row: PostWithCommentCount, author: &UserRecord) -> Self {
        Self {
            publicacao_id: row.post.id,
            publicacao: row.post.body,
            usuario_id: row.post.author_id,
            nick: author.nick.clone(),
            imagem: vec![author.image.clone()],
            qtd_likes: row.post.like_count,
            qtd_comentarios: row.comment_count,
            criado_em: row.post.created_at,
        }
    }
}

impl PostDetailsView {
    fn from_rows(row: PostWithAuthor, comments: Vec<CommentWithAuthor>) -> Self {
        Self {
            publicacao_id: row.post.id,
            publicacao: row.post.body,
            usuario_id: row.post.author_id,
            nick: row.author_nick,
            imagem: row.author_image,
            qtd_likes: row.post.like_count,
            criado_em: row.post.created_at,
            comentarios: comments
                .into_iter()
                .map(|comment| PostCommentView {
                    comentario_id: comment.comment.id,
                    comentario: comment.comment.body,
                    usuario_id: comment.comment.author_id,
                    nick: comment.author_nick,
                    imagem: comment.author_image,
                    qtd_likes: comment.comment.like_count,
                })
                .collect(),
        }
    }
}
