use crate::database::models::{CommentRecord, CommentWithAuthor};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

pub(super) struct SqliteCommentRepository<'conn> {
    pub(super) conn: &'conn Connection,
}

impl<'conn> super::CommentRepository for SqliteCommentRepository<'conn> {
    fn create(&self, record: &CommentRecord) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO comments (id, post_id, author_id, body, like_count)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                record.id,
                record.post_id,
                record.author_id,
                record.body,
                record.like_count
            ],
        )?;
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<CommentRecord>> {
        Ok(self
            .conn
            .query_row(
                r#"
                SELECT id, post_id, author_id, body, like_count
                FROM comments
                WHERE id = ?1
                "#,
                params![id],
                |row| {
                    Ok(CommentRecord {
                        id: row.get(0)?,
                        post_id: row.get(1)?,
                        author_id: row.get(2)?,
                        body: row.get(3)?,
                        like_count: row.get(4)?,
                    })
                },
            )
            .optional()?)
    }

    fn list_for_post_with_authors(&self, post_id: &str) -> Result<Vec<CommentWithAuthor>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT c.id, c.post_id, c.author_id, c.body, c.like_count, u.nick, u.image
            FROM comments c
            INNER JOIN users u ON u.id = c.author_id
            WHERE c.post_id = ?1
            "#,
        )?;
        let rows = stmt.query_map(params![post_id], |row| {
            Ok(CommentWithAuthor {
                comment: CommentRecord {
                    id: row.get(0)?,
                    post_id: row.get(1)?,
                    author_id: row.get(2)?,
                    body: row.get(3)?,
                    like_count: row.get(4)?,
                },
                author_nick: row.get(5)?,
                author_image: row.get(6)?,
            })
        })?;
        let mut comments = Vec::new();
        for row in rows {
            comments.push(row?);
        }
        Ok(comments)
    }

    fn set_like_count(&self, id: &str, like_count: i64) -> Result<()> {
        self.conn.execute(
            r#"
            UPDATE comments
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
            DELETE FROM comments
            WHERE id = ?1
            "#,
            params![id],
        )?;
        Ok(())
    }
}
