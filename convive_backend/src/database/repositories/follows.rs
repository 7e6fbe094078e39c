use crate::database::models::{FollowRecord, FollowedProfile, FollowerProfile};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

pub(super) struct SqliteFollowRepository<'conn> {
    pub(super) conn: &'conn Connection,
}

impl<'conn> super::FollowRepository for SqliteFollowRepository<'conn> {
    fn create(&self, record: &FollowRecord) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO follows (id, followed_id, follower_id)
            VALUES (?1, ?2, ?3)
            "#,
            params![record.id, record.followed_id, record.follower_id],
        )?;
        Ok(())
    }

    fn find_edge(&self, followed_id: &str, follower_id: &str) -> Result<Option<FollowRecord>> {
        Ok(self
            .conn
            .query_row(
                r#"
                SELECT id, followed_id, follower_id
                FROM follows
                WHERE followed_id = ?1 AND follower_id = ?2
                LIMIT 1
                "#,
                params![followed_id, follower_id],
                |row| {
                    Ok(FollowRecord {
                        id: row.get(0)?,
                        followed_id: row.get(1)?,
                        follower_id: row.get(2)?,
                    })
                },
            )
            .optional()?)
    }

    fn count_followers(&self, followed_id: &str) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            r#"
            SELECT COUNT(*)
            FROM follows
            WHERE followed_id = ?1
            "#,
            params![followed_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn list_followers_page(
        &self,
        followed_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FollowerProfile>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT f.follower_id, u.name, u.nick, u.image
            FROM follows f
            INNER JOIN users u ON u.id = f.follower_id
            WHERE f.followed_id = ?1
            LIMIT ?2 OFFSET ?3
            "#,
        )?;
        let rows = stmt.query_map(params![followed_id, limit, offset], |row| {
            Ok(FollowerProfile {
                follower_id: row.get(0)?,
                name: row.get(1)?,
                nick: row.get(2)?,
                image: row.get(3)?,
            })
        })?;
        let mut followers = Vec::new();
        for row in rows {
            followers.push(row?);
        }
        Ok(followers)
    }

    fn list_following(&self, follower_id: &str) -> Result<Vec<FollowedProfile>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT f.followed_id, u.name, u.nick, u.image
            FROM follows f
            INNER JOIN users u ON u.id = f.followed_id
            WHERE f.follower_id = ?1
            "#,
        )?;
        let rows = stmt.query_map(params![follower_id], |row| {
            Ok(FollowedProfile {
                followed_id: row.get(0)?,
                name: row.get(1)?,
                nick: row.get(2)?,
                image: row.get(3)?,
            })
        })?;
        let mut following = Vec::new();
        for row in rows {
            following.push(row?);
        }
        Ok(following)
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.conn.execute(
            r#"
            DELETE FROM follows
            WHERE id = ?1
            "#,
            params![id],
        )?;
        Ok(())
    }
}
