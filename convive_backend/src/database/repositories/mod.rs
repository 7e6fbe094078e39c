mod comments;
mod follows;
mod posts;
mod users;

use super::models::{
    CommentRecord, CommentWithAuthor, FollowRecord, FollowedProfile, FollowerProfile, PostRecord,
    PostWithAuthor, PostWithCommentCount, UserRecord,
};
use anyhow::Result;
use rusqlite::Connection;

pub trait UserRepository {
    fn create(&self, record: &UserRecord) -> Result<()>;
    fn get(&self, id: &str) -> Result<Option<UserRecord>>;
    fn list(&self, nick: Option<&str>, name: Option<&str>) -> Result<Vec<UserRecord>>;
    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;
    fn find_by_nick(&self, nick: &str) -> Result<Option<UserRecord>>;
    fn update(&self, record: &UserRecord) -> Result<()>;
}

pub trait PostRepository {
    fn create(&self, record: &PostRecord) -> Result<()>;
    fn get(&self, id: &str) -> Result<Option<PostRecord>>;
    fn get_with_author(&self, id: &str) -> Result<Option<PostWithAuthor>>;
    fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>>;
    fn list_for_author_with_comment_counts(&self, author_id: &str)
        -> Result<Vec<PostWithCommentCount>>;
    fn set_like_count(&self, id: &str, like_count: i64) -> Result<()>;
    fn delete(&self, id: &str) -> Result<()>;
}

pub trait CommentRepository {
    fn create(&self, record: &CommentRecord) -> Result<()>;
    fn get(&self, id: &str) -> Result<Option<CommentRecord>>;
    fn list_for_post_with_authors(&self, post_id: &str) -> Result<Vec<CommentWithAuthor>>;
    fn set_like_count(&self, id: &str, like_count: i64) -> Result<()>;
    fn delete(&self, id: &str) -> Result<()>;
}

pub trait FollowRepository {
    fn create(&self, record: &FollowRecord) -> Result<()>;
    fn find_edge(&self, followed_id: &str, follower_id: &str) -> Result<Option<FollowRecord>>;
    fn count_followers(&self, followed_id: &str) -> Result<i64>;
    fn list_followers_page(
        &self,
        followed_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FollowerProfile>>;
    fn list_following(&self, follower_id: &str) -> Result<Vec<FollowedProfile>>;
    fn delete(&self, id: &str) -> Result<()>;
}

pub struct SqliteRepositories<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRepositories<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn users(&self) -> impl UserRepository + '_ {
        users::SqliteUserRepository { conn: self.conn }
    }

    pub fn posts(&self) -> impl PostRepository + '_ {
        posts::SqlitePostRepository { conn: self.conn }
    }

    pub fn comments(&self) -> impl CommentRepository + '_ {
        comments::SqliteCommentRepository { conn: self.conn }
    }

    pub fn follows(&self) -> impl FollowRepository + '_ {
        follows::SqliteFollowRepository { conn: self.conn }
    }
}
