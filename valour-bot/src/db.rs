use diesel::connection::SimpleConnection;

use valour_shared::clients::db::DbPool;
use valour_shared::errors::AppResult;

pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    telegram_id       INTEGER PRIMARY KEY,
    name              TEXT NOT NULL,
    age               INTEGER NOT NULL CHECK (age BETWEEN 16 AND 120),
    description       TEXT NOT NULL,
    photo_id          TEXT,
    gender            TEXT NOT NULL CHECK (gender IN ('Male', 'Female')),
    preferred_gender  TEXT NOT NULL CHECK (preferred_gender IN ('Male', 'Female'))
);

CREATE TABLE IF NOT EXISTS likes (
    liker_id INTEGER NOT NULL REFERENCES users(telegram_id) ON DELETE CASCADE,
    liked_id INTEGER NOT NULL REFERENCES users(telegram_id) ON DELETE CASCADE,
    PRIMARY KEY (liker_id, liked_id)
);

CREATE TABLE IF NOT EXISTS skips (
    skipper_id INTEGER NOT NULL REFERENCES users(telegram_id) ON DELETE CASCADE,
    skipped_id INTEGER NOT NULL REFERENCES users(telegram_id) ON DELETE CASCADE,
    PRIMARY KEY (skipper_id, skipped_id)
);

CREATE INDEX IF NOT EXISTS idx_users_gender ON users(gender);
CREATE INDEX IF NOT EXISTS idx_likes_liker ON likes(liker_id);
CREATE INDEX IF NOT EXISTS idx_likes_liked ON likes(liked_id);
CREATE INDEX IF NOT EXISTS idx_skips_skipper ON skips(skipper_id);
CREATE INDEX IF NOT EXISTS idx_skips_skipped ON skips(skipped_id);
"#;

/// Create the tables if needed. File databases also switch to WAL.
pub fn migrate(pool: &DbPool, database_url: &str) -> AppResult<()> {
    let mut conn = pool.get()?;

    if !is_memory(database_url) {
        conn.batch_execute("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
    }
    conn.batch_execute(SCHEMA)?;

    tracing::info!("database schema ready");
    Ok(())
}

fn is_memory(database_url: &str) -> bool {
    database_url == ":memory:" || database_url.contains("mode=memory")
}

#[cfg(test)]
pub(crate) fn test_pool() -> DbPool {
    let pool = valour_shared::clients::db::create_memory_pool().unwrap();
    migrate(&pool, ":memory:").unwrap();
    pool
}
