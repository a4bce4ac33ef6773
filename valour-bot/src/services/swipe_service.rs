use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use valour_shared::clients::db::DbPool;
use valour_shared::errors::AppResult;

use crate::models::{Like, Profile, Skip};
use crate::schema::{likes, skips, users};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    /// The like already existed; nothing changed.
    Repeated,
    /// New like, no like in the other direction yet.
    Recorded,
    /// New like that completes a mutual pair.
    Mutual,
    /// One of the two profiles no longer exists; nothing was written.
    Gone,
}

/// Insert Like(liker, liked) if absent. Returns whether a row was written.
pub fn record_like(pool: &DbPool, liker_id: i64, liked_id: i64) -> AppResult<bool> {
    Ok(matches!(like(pool, liker_id, liked_id)?, LikeOutcome::Recorded | LikeOutcome::Mutual))
}

/// Insert Skip(skipper, skipped) if absent. Returns whether a row was
/// written; nothing is written when either profile is gone.
pub fn record_skip(pool: &DbPool, skipper_id: i64, skipped_id: i64) -> AppResult<bool> {
    let mut conn = pool.get()?;

    let inserted = conn.immediate_transaction::<_, diesel::result::Error, _>(|conn| {
        if !both_registered(conn, skipper_id, skipped_id)? {
            return Ok(0);
        }
        diesel::insert_or_ignore_into(skips::table)
            .values(&Skip { skipper_id, skipped_id })
            .execute(conn)
    })?;

    Ok(inserted > 0)
}

pub fn has_liked(pool: &DbPool, liker_id: i64, liked_id: i64) -> AppResult<bool> {
    let mut conn = pool.get()?;
    Ok(like_exists(&mut conn, liker_id, liked_id)?)
}

pub fn has_skipped(pool: &DbPool, skipper_id: i64, skipped_id: i64) -> AppResult<bool> {
    let mut conn = pool.get()?;

    let found = diesel::select(exists(
        skips::table
            .filter(skips::skipper_id.eq(skipper_id))
            .filter(skips::skipped_id.eq(skipped_id)),
    ))
    .get_result(&mut conn)?;

    Ok(found)
}

/// Record a like and report whether it just completed a mutual pair.
///
/// Existence check, insert and reverse lookup share one write transaction,
/// so of two concurrent likes between the same pair exactly one observes the
/// other, and a profile deleted meanwhile is never referenced.
pub fn like(pool: &DbPool, liker_id: i64, liked_id: i64) -> AppResult<LikeOutcome> {
    let mut conn = pool.get()?;

    let outcome = conn.immediate_transaction::<_, diesel::result::Error, _>(|conn| {
        if !both_registered(conn, liker_id, liked_id)? {
            return Ok(LikeOutcome::Gone);
        }
        if insert_like(conn, liker_id, liked_id)? == 0 {
            return Ok(LikeOutcome::Repeated);
        }
        if like_exists(conn, liked_id, liker_id)? {
            Ok(LikeOutcome::Mutual)
        } else {
            Ok(LikeOutcome::Recorded)
        }
    })?;

    Ok(outcome)
}

/// Profiles `me` may be shown: preferred gender, not self, has a photo, and
/// neither liked nor skipped by `me` before. Ordered by identity.
pub fn find_candidates(pool: &DbPool, me: &Profile) -> AppResult<Vec<Profile>> {
    let mut conn = pool.get()?;

    let liked = likes::table
        .filter(likes::liker_id.eq(me.telegram_id))
        .select(likes::liked_id);
    let skipped = skips::table
        .filter(skips::skipper_id.eq(me.telegram_id))
        .select(skips::skipped_id);

    let candidates = users::table
        .filter(users::gender.eq(me.preferred_gender))
        .filter(users::telegram_id.ne(me.telegram_id))
        .filter(users::photo_id.is_not_null())
        .filter(users::photo_id.ne(""))
        .filter(users::telegram_id.ne_all(liked))
        .filter(users::telegram_id.ne_all(skipped))
        .order(users::telegram_id.asc())
        .select(Profile::as_select())
        .load(&mut conn)?;

    Ok(candidates)
}

fn both_registered(conn: &mut SqliteConnection, a: i64, b: i64) -> QueryResult<bool> {
    let wanted = if a == b { 1 } else { 2 };
    let found: i64 = users::table
        .filter(users::telegram_id.eq_any(vec![a, b]))
        .count()
        .get_result(conn)?;
    Ok(found == wanted)
}

fn insert_like(conn: &mut SqliteConnection, liker_id: i64, liked_id: i64) -> QueryResult<usize> {
    diesel::insert_or_ignore_into(likes::table)
        .values(&Like { liker_id, liked_id })
        .execute(conn)
}

fn like_exists(conn: &mut SqliteConnection, liker_id: i64, liked_id: i64) -> QueryResult<bool> {
    diesel::select(exists(
        likes::table
            .filter(likes::liker_id.eq(liker_id))
            .filter(likes::liked_id.eq(liked_id)),
    ))
    .get_result(conn)
}
