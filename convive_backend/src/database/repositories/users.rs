use crate::database::models::UserRecord;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

pub(super) struct SqliteUserRepository<'conn> {
    pub(super) conn: &'conn Connection,
}

impl<'conn> super::UserRepository for SqliteUserRepository<'conn> {
    fn create(&self, record: &UserRecord) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO users (id, name, nick, email, password_hash, birth_date, image)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                record.id,
                record.name,
                record.nick,
                record.email,
                record.password_hash,
                record.birth_date,
                record.image
            ],
        )?;
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<UserRecord>> {
        Ok(self
            .conn
            .query_row(
                r#"
                SELECT id, name, nick, email, password_hash, birth_date, image
                FROM users
                WHERE id = ?1
                "#,
                params![id],
                |row| {
                    Ok(UserRecord {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        nick: row.get(2)?,
                        email: row.get(3)?,
                        password_hash: row.get(4)?,
                        birth_date: row.get(5)?,
                        image: row.get(6)?,
                    })
                },
            )
            .optional()?)
    }

    fn list(&self, nick: Option<&str>, name: Option<&str>) -> Result<Vec<UserRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, nick, email, password_hash, birth_date, image
            FROM users
            WHERE (?1 IS NULL OR nick = ?1)
              AND (?2 IS NULL OR name = ?2)
            "#,
        )?;
        let rows = stmt.query_map(params![nick, name], |row| {
            Ok(UserRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                nick: row.get(2)?,
                email: row.get(3)?,
                password_hash: row.get(4)?,
                birth_date: row.get(5)?,
                image: row.get(6)?,
            })
        })?;
        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        Ok(self
            .conn
            .query_row(
                r#"
                SELECT id, name, nick, email, password_hash, birth_date, image
                FROM users
                WHERE email = ?1
                LIMIT 1
                "#,
                params![email],
                |row| {
                    Ok(UserRecord {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        nick: row.get(2)?,
                        email: row.get(3)?,
                        password_hash: row.get(4)?,
                        birth_date: row.get(5)?,
                        image: row.get(6)?,
                    })
                },
            )
            .optional()?)
    }

    fn find_by_nick(&self, nick: &str) -> Result<Option<UserRecord>> {
        Ok(self
            .conn
            .query_row(
                r#"
                SELECT id, name, nick, email, password_hash, birth_date, image
                FROM users
                WHERE nick = ?1
                LIMIT 1
                "#,
                params![nick],
                |row| {
                    Ok(UserRecord {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        nick: row.get(2)?,
                        email: row.get(3)?,
                        password_hash: row.get(4)?,
                        birth_date: row.get(5)?,
                        image: row.get(6)?,
                    })
                },
            )
            .optional()?)
    }

    fn update(&self, record: &UserRecord) -> Result<()> {
        self.conn.execute(
            r#"
            UPDATE users
            SET name = ?2, nick = ?3, email = ?4
            WHERE id = ?1
            "#,
            params![record.id, record.name, record.nick, record.email],
        )?;
        Ok(())
    }
}
