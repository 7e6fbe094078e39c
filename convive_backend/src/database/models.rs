use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub nick: String,
    pub email: String,
    pub password_hash: String,
    pub birth_date: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: String,
    pub author_id: String,
    pub body: String,
    pub like_count: i64,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub body: String,
    pub like_count: i64,
}

/// One follow edge: `follower_id` follows `followed_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowRecord {
    pub id: String,
    pub followed_id: String,
    pub follower_id: String,
}

/// Post joined with its author's public profile fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostWithAuthor {
    pub post: PostRecord,
    pub author_nick: String,
    pub author_image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostWithCommentCount {
    pub post: PostRecord,
    pub comment_count: i64,
}

/// Comment joined with its author's public profile fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentWithAuthor {
    pub comment: CommentRecord,
    pub author_nick: String,
    pub author_image: String,
}

/// Profile of one account on the follower side of an edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowerProfile {
    pub follower_id: String,
    pub name: String,
    pub nick: String,
    pub image: String,
}

/// Profile of one account on the followed side of an edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowedProfile {
    pub followed_id: String,
    pub name: String,
    pub nick: String,
    pub image: String,
}
