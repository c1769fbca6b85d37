use anyhow::Result;
use rusqlite::{Connection, params};

use crate::models::Catalog;

struct ThemeSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
}

struct VoiceModelSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: &'static str,
}

struct MusicSeed {
    id: &'static str,
    name: &'static str,
    category: &'static str,
}

const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=40&width=40";
const SAMPLE_AUDIO: &str = "/sample-audio.mp3";

const THEMES: &[ThemeSeed] = &[
    ThemeSeed {
        id: "motivation",
        name: "Motivation",
        description: "Inspiring messages to boost your day",
        icon: "Flame",
    },
    ThemeSeed {
        id: "compliment",
        name: "Compliment",
        description: "Kind words to make you feel special",
        icon: "Heart",
    },
    ThemeSeed {
        id: "joke",
        name: "Joke",
        description: "Funny content to make you laugh",
        icon: "Sparkles",
    },
    ThemeSeed {
        id: "advice",
        name: "Advice",
        description: "Wisdom to guide your decisions",
        icon: "Lightbulb",
    },
];

const VOICE_MODELS: &[VoiceModelSeed] = &[
    VoiceModelSeed {
        id: "rachel",
        name: "Rachel",
        description: "Warm and professional female voice, perfect for narration",
        category: "professional",
    },
    VoiceModelSeed {
        id: "drew",
        name: "Drew",
        description: "Deep and authoritative male voice, ideal for motivation",
        category: "motivation",
    },
    VoiceModelSeed {
        id: "clyde",
        name: "Clyde",
        description: "Friendly and approachable male voice",
        category: "casual",
    },
];

const BACKGROUND_MUSIC: &[MusicSeed] = &[
    MusicSeed { id: "motivational", name: "Motivational Upbeat", category: "motivation" },
    MusicSeed { id: "inspirational", name: "Inspirational Piano", category: "motivation" },
    MusicSeed { id: "happy", name: "Happy Acoustic", category: "compliment" },
    MusicSeed { id: "funny", name: "Funny Tunes", category: "joke" },
    MusicSeed { id: "calm", name: "Calm Meditation", category: "advice" },
    MusicSeed { id: "energetic", name: "Energetic Pop", category: "general" },
];

/// Rows inserted per catalog table by one seeding pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub themes: usize,
    pub voice_models: usize,
    pub background_music: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.themes == 0 && self.voice_models == 0 && self.background_music == 0
    }
}

/// Fill every empty catalog table with its fixed rows, in a single transaction.
/// Tables that already hold any row are left untouched.
pub fn run(conn: &mut Connection) -> Result<SeedReport> {
    let tx = conn.transaction()?;
    let mut report = SeedReport::default();

    if is_empty(&tx, Catalog::Themes)? {
        for t in THEMES {
            tx.execute(
                "INSERT INTO themes (id, name, description, icon) VALUES (?1, ?2, ?3, ?4)",
                params![t.id, t.name, t.description, t.icon],
            )?;
        }
        report.themes = THEMES.len();
    }

    if is_empty(&tx, Catalog::VoiceModels)? {
        for v in VOICE_MODELS {
            tx.execute(
                "INSERT INTO voice_models (id, name, image, preview_url, description, category)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![v.id, v.name, PLACEHOLDER_IMAGE, SAMPLE_AUDIO, v.description, v.category],
            )?;
        }
        report.voice_models = VOICE_MODELS.len();
    }

    if is_empty(&tx, Catalog::BackgroundMusic)? {
        for m in BACKGROUND_MUSIC {
            tx.execute(
                "INSERT INTO background_music (id, name, file, category) VALUES (?1, ?2, ?3, ?4)",
                params![m.id, m.name, SAMPLE_AUDIO, m.category],
            )?;
        }
        report.background_music = BACKGROUND_MUSIC.len();
    }

    tx.commit()?;
    Ok(report)
}

fn is_empty(conn: &Connection, catalog: Catalog) -> Result<bool> {
    let sql = format!("SELECT NOT EXISTS (SELECT 1 FROM {})", catalog.table());
    Ok(conn.query_row(&sql, [], |r| r.get(0))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations;

    fn fresh() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        migrations::run(&conn).unwrap();
        conn
    }

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn seeds_every_empty_table() {
        let mut conn = fresh();
        let report = run(&mut conn).unwrap();

        assert_eq!(
            report,
            SeedReport { themes: 4, voice_models: 3, background_music: 6 }
        );
        assert_eq!(count(&conn, "themes"), 4);
        assert_eq!(count(&conn, "voice_models"), 3);
        assert_eq!(count(&conn, "background_music"), 6);
    }

    #[test]
    fn second_pass_inserts_nothing() {
        let mut conn = fresh();
        run(&mut conn).unwrap();
        let again = run(&mut conn).unwrap();

        assert!(again.is_empty());
        assert_eq!(count(&conn, "themes"), 4);
    }

    #[test]
    fn only_empty_tables_are_filled() {
        let mut conn = fresh();
        conn.execute(
            "INSERT INTO themes (id, name) VALUES ('custom', 'Custom')",
            [],
        )
        .unwrap();

        let report = run(&mut conn).unwrap();
        assert_eq!(report.themes, 0);
        assert_eq!(report.voice_models, 3);
        assert_eq!(count(&conn, "themes"), 1);
    }
}
