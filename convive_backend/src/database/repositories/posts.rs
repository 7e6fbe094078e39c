use crate::database::models::{PostRecord, PostWithAuthor, PostWithCommentCount};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

pub(super) struct SqlitePostRepository<'conn> {
    pub(super) conn: &'conn Connection,
}

impl<'conn> super::PostRepository for SqlitePostRepository<'conn> {
    fn create(&self, record: &PostRecord) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO posts (id, author_id, body, like_count, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                record.id,
                record.author_id,
                record.body,
                record.like_count,
                record.created_at
            ],
        )?;
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<PostRecord>> {
        Ok(self
            .conn
            .query_row(
                r#"
                SELECT id, author_id, body, like_count, created_at
                FROM posts
                WHERE id = ?1
                "#,
                params![id],
                |row| {
                    Ok(PostRecord {
                        id: row.get(0)?,
                        author_id: row.get(1)?,
                        body: row.get(2)?,
                        like_count: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                },
            )
            .optional()?)
    }

    fn get_with_author(&self, id: &str) -> Result<Option<PostWithAuthor>> {
        Ok(self
            .conn
            .query_row(
                r#"
                SELECT p.id, p.author_id, p.body, p.like_count, p.created_at, u.nick, u.image
                FROM posts p
                INNER JOIN users u ON u.id = p.author_id
                WHERE p.id = ?1
                "#,
                params![id],
                |row| {
                    Ok(PostWithAuthor {
                        post: PostRecord {
                            id: row.get(0)?,
                            author_id: row.get(1)?,
                            body: row.get(2)?,
                            like_count: row.get(3)?,
                            created_at: row.get(4)?,
                        },
                        author_nick: row.get(5)?,
                        author_image: row.get(6)?,
                    })
                },
            )
            .optional()?)
    }

    fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT p.id, p.author_id, p.body, p.like_count, p.created_at, u.nick, u.image
            FROM posts p
            INNER JOIN users u ON u.id = p.author_id
            ORDER BY datetime(p.created_at) ASC
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(PostWithAuthor {
                post: PostRecord {
                    id: row.get(0)?,
                    author_id: row.get(1)?,
                    body: row.get(2)?,
                    like_count: row.get(3)?,
                    created_at: row.get(4)?,
                },
                author_nick: row.get(5)?,
                author_image: row.get(6)?,
            })
        })?;
        let mut posts = Vec::new();
        for row in rows {
            posts.push(row?);
        }
        Ok(posts)
    }

    fn list_for_author_with_comment_counts(
        &self,
        author_id: &str,
    ) -> Result<Vec<PostWithCommentCount>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT p.id, p.author_id, p.body, p.like_count, p.created_at,
                   (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count
            FROM posts p
            WHERE p.author_id = ?1
            ORDER BY datetime(p.created_at) ASC
            "#,
        )?;
        let rows = stmt.query_map(params![author_id], |row| {
            Ok(PostWithCommentCount {
                post: PostRecord {
                    id: row.get(0)?,
                    author_id: row.get(1)?,
                    body: row.get(2)?,
                    like_count: row.get(3)?,
                    created_at: row.get(4)?,
                },
                comment_count: row.get(5)?,
            })
        })?;
        let mut posts = Vec::new();
        for row in rows {
            posts.push(row?);
        }
        Ok(posts)
    }

    fn set_like_count(&self, id: &str, like_count: i64) -> Result<()> {
        self.conn.execute(
            r#"
            UPDATE posts
            SET like_count = ?2
            WHERE id = ?1
            "#,
            params![id, like_count],
        )?;
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.conn.execute(
            r#"
            DELETE FROM posts
            WHERE id = ?1
            "#,
            params![id],
        )?;
        Ok(())
    }
}
