use crate::Database;
use crate::models::{Catalog, MessageRow, NewMessage, UserRow};
use anyhow::Result;
use motivai_types::models::{BackgroundMusic, Theme, VoiceModel};
use rusqlite::{Connection, Row};

const USER_COLUMNS: &str = "id, name, email, password, created_at";
const MESSAGE_COLUMNS: &str =
    "id, user_id, content, audio_url, theme_id, voice_model_id, background_music_id, created_at";

impl Database {
    // -- Users --

    /// Insert a user and return its id. Returns `None` when the email is already registered.
    pub fn create_user(&self, name: &str, email: &str, password_hash: &str) -> Result<Option<i64>> {
        self.with_conn_mut(|conn| {
            let inserted = conn.execute(
                "INSERT INTO users (name, email, password) VALUES (?1, ?2, ?3)",
                (name, email, password_hash),
            );
            match inserted {
                Ok(_) => Ok(Some(conn.last_insert_rowid())),
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
                {
                    Ok(None)
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS),
                [email],
                user_from_row,
            )
            .optional()
        })
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
                [id],
                user_from_row,
            )
            .optional()
        })
    }

    pub fn list_users(&self) -> Result<Vec<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS))?;
            let rows = stmt
                .query_map([], user_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Catalog --

    pub fn list_themes(&self) -> Result<Vec<Theme>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, description, icon FROM themes ORDER BY id")?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(Theme {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        description: row.get(2)?,
                        icon: row.get(3)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn list_voice_models(&self) -> Result<Vec<VoiceModel>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, image, preview_url, description, category
                 FROM voice_models ORDER BY id",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(VoiceModel {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        image: row.get(2)?,
                        preview_url: row.get(3)?,
                        description: row.get(4)?,
                        category: row.get(5)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn list_background_music(&self) -> Result<Vec<BackgroundMusic>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, file, category FROM background_music ORDER BY id")?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(BackgroundMusic {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        file: row.get(2)?,
                        category: row.get(3)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn catalog_contains(&self, catalog: Catalog, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let sql = format!("SELECT EXISTS (SELECT 1 FROM {} WHERE id = ?1)", catalog.table());
            Ok(conn.query_row(&sql, [id], |r| r.get(0))?)
        })
    }

    // -- Messages --

    pub fn insert_message(&self, msg: &NewMessage<'_>) -> Result<MessageRow> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO messages
                    (content, audio_url, user_id, theme_id, voice_model_id, background_music_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    msg.content,
                    msg.audio_url,
                    msg.user_id,
                    msg.theme_id,
                    msg.voice_model_id,
                    msg.background_music_id,
                ],
            )?;
            let id = conn.last_insert_rowid();
            query_message(conn, id)
        })
    }

    /// Messages owned by `user_id`, newest first.
    pub fn messages_for_user(&self, user_id: i64) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM messages WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
                MESSAGE_COLUMNS
            ))?;
            let rows = stmt
                .query_map([user_id], message_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

fn query_message(conn: &Connection, id: i64) -> Result<MessageRow> {
    let row = conn.query_row(
        &format!("SELECT {} FROM messages WHERE id = ?1", MESSAGE_COLUMNS),
        [id],
        message_from_row,
    )?;
    Ok(row)
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        content: row.get(2)?,
        audio_url: row.get(3)?,
        theme_id: row.get(4)?,
        voice_model_id: row.get(5)?,
        background_music_id: row.get(6)?,
        created_at: row.get(7)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn message<'a>(user_id: i64, content: &'a str) -> NewMessage<'a> {
        NewMessage {
            user_id,
            content,
            audio_url: None,
            theme_id: "joke",
            voice_model_id: "drew",
            background_music_id: Some("funny"),
        }
    }

    #[test]
    fn duplicate_email_is_reported_not_raised() {
        let db = db();
        let first = db.create_user("Ann", "ann@x.com", "hash").unwrap();
        assert!(first.is_some());

        let second = db.create_user("Other Ann", "ann@x.com", "hash2").unwrap();
        assert!(second.is_none());
        assert_eq!(db.list_users().unwrap().len(), 1);
    }

    #[test]
    fn user_lookups_by_email_and_id_agree() {
        let db = db();
        let id = db.create_user("Ann", "ann@x.com", "hash").unwrap().unwrap();

        let by_email = db.get_user_by_email("ann@x.com").unwrap().unwrap();
        let by_id = db.get_user_by_id(id).unwrap().unwrap();
        assert_eq!(by_email.id, id);
        assert_eq!(by_id.email, "ann@x.com");
        assert_eq!(by_id.password, "hash");
        assert!(by_id.to_public().is_ok());

        assert!(db.get_user_by_id(id + 1).unwrap().is_none());
        assert!(db.get_user_by_email("nobody@x.com").unwrap().is_none());
    }

    #[test]
    fn catalog_is_listed_in_id_order() {
        let db = db();
        let themes: Vec<String> = db.list_themes().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(themes, ["advice", "compliment", "joke", "motivation"]);

        let voices = db.list_voice_models().unwrap();
        assert_eq!(voices.len(), 3);
        assert_eq!(voices[0].id, "clyde");
        assert_eq!(voices[0].preview_url.as_deref(), Some("/sample-audio.mp3"));

        assert_eq!(db.list_background_music().unwrap().len(), 6);
    }

    #[test]
    fn catalog_membership() {
        let db = db();
        assert!(db.catalog_contains(Catalog::Themes, "joke").unwrap());
        assert!(!db.catalog_contains(Catalog::Themes, "drew").unwrap());
        assert!(db.catalog_contains(Catalog::VoiceModels, "drew").unwrap());
        assert!(db.catalog_contains(Catalog::BackgroundMusic, "calm").unwrap());
    }

    #[test]
    fn messages_are_scoped_to_owner_newest_first() {
        let db = db();
        let ann = db.create_user("Ann", "ann@x.com", "h").unwrap().unwrap();
        let bob = db.create_user("Bob", "bob@x.com", "h").unwrap().unwrap();

        let first = db.insert_message(&message(ann, "first")).unwrap();
        let second = db.insert_message(&message(ann, "second")).unwrap();
        db.insert_message(&message(bob, "bob's")).unwrap();

        assert_eq!(first.background_music_id.as_deref(), Some("funny"));

        let ids: Vec<i64> = db.messages_for_user(ann).unwrap().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert_eq!(db.messages_for_user(bob).unwrap().len(), 1);
    }

    #[test]
    fn message_with_unknown_theme_violates_foreign_key() {
        let db = db();
        let ann = db.create_user("Ann", "ann@x.com", "h").unwrap().unwrap();
        let mut msg = message(ann, "hello");
        msg.theme_id = "nope";
        assert!(db.insert_message(&msg).is_err());
    }
}
