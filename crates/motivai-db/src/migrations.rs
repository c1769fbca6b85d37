use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT NOT NULL,
                email       TEXT NOT NULL UNIQUE,
                password    TEXT NOT NULL,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE themes (
                id          TEXT PRIMARY KEY,
                name        TEXT NOT NULL,
                description TEXT,
                icon        TEXT
            );

            CREATE TABLE voice_models (
                id          TEXT PRIMARY KEY,
                name        TEXT NOT NULL,
                image       TEXT,
                preview_url TEXT,
                description TEXT,
                category    TEXT
            );

            CREATE TABLE background_music (
                id          TEXT PRIMARY KEY,
                name        TEXT NOT NULL,
                file        TEXT,
                category    TEXT
            );

            CREATE TABLE messages (
                id                  INTEGER PRIMARY KEY AUTOINCREMENT,
                content             TEXT NOT NULL,
                audio_url           TEXT,
                user_id             INTEGER NOT NULL REFERENCES users(id),
                theme_id            TEXT NOT NULL REFERENCES themes(id),
                voice_model_id      TEXT NOT NULL REFERENCES voice_models(id),
                background_music_id TEXT REFERENCES background_music(id),
                created_at          TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE INDEX idx_messages_user
                ON messages(user_id, created_at);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_twice_is_a_no_op() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        run(&conn).unwrap();

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
