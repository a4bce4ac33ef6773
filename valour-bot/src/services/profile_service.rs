use diesel::prelude::*;
use validator::Validate;

use valour_shared::clients::db::DbPool;
use valour_shared::errors::{AppError, AppResult};

use crate::models::{Profile, ProfileFields};
use crate::schema::{likes, skips, users};

/// Insert the profile, or replace every field of the existing one.
pub fn upsert_profile(pool: &DbPool, telegram_id: i64, fields: &ProfileFields) -> AppResult<Profile> {
    fields.validate()?;

    let mut conn = pool.get()?;

    diesel::insert_into(users::table)
        .values((users::telegram_id.eq(telegram_id), fields))
        .on_conflict(users::telegram_id)
        .do_update()
        .set(fields)
        .execute(&mut conn)?;

    let profile = users::table
        .find(telegram_id)
        .select(Profile::as_select())
        .first(&mut conn)?;

    tracing::debug!(telegram_id, "profile upserted");
    Ok(profile)
}

pub fn get_profile(pool: &DbPool, telegram_id: i64) -> AppResult<Option<Profile>> {
    let mut conn = pool.get()?;

    let profile = users::table
        .find(telegram_id)
        .select(Profile::as_select())
        .first(&mut conn)
        .optional()?;

    Ok(profile)
}

pub fn require_profile(pool: &DbPool, telegram_id: i64) -> AppResult<Profile> {
    get_profile(pool, telegram_id)?.ok_or_else(|| AppError::profile_not_found(telegram_id))
}

/// Remove the profile and every like/skip naming it, in one transaction.
/// Returns whether a profile existed.
pub fn delete_profile(pool: &DbPool, telegram_id: i64) -> AppResult<bool> {
    let mut conn = pool.get()?;

    let removed = conn.transaction::<_, diesel::result::Error, _>(|conn| {
        let removed = diesel::delete(users::table.find(telegram_id)).execute(conn)?;
        diesel::delete(
            likes::table.filter(likes::liker_id.eq(telegram_id).or(likes::liked_id.eq(telegram_id))),
        )
        .execute(conn)?;
        diesel::delete(
            skips::table.filter(skips::skipper_id.eq(telegram_id).or(skips::skipped_id.eq(telegram_id))),
        )
        .execute(conn)?;
        Ok(removed > 0)
    })?;

    tracing::debug!(telegram_id, removed, "profile delete finished");
    Ok(removed)
}

/// Cheap round-trip used by the health check.
pub fn ping(pool: &DbPool) -> AppResult<()> {
    let mut conn = pool.get()?;
    users::table.count().get_result::<i64>(&mut conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::models::fixtures::fields;
    use crate::models::{Gender, Like, Skip};
    use crate::services::swipe_service;

    #[test]
    fn upsert_inserts_then_replaces_all_fields() {
        let pool = test_pool();
        let first = fields("Al", Gender::Male, Gender::Female, Some("p1"));
        let created = upsert_profile(&pool, 1, &first).unwrap();
        assert_eq!(created.fields(), first);

        let replacement = ProfileFields {
            name: "Alan".into(),
            age: 31,
            description: "new bio".into(),
            photo_id: None,
            gender: Gender::Male,
            preferred_gender: Gender::Male,
        };
        let updated = upsert_profile(&pool, 1, &replacement).unwrap();
        assert_eq!(updated.telegram_id, 1);
        assert_eq!(updated.fields(), replacement);

        let count: i64 = users::table.count().get_result(&mut pool.get().unwrap()).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn upsert_refuses_invalid_fields() {
        let pool = test_pool();
        let mut bad = fields("Al", Gender::Male, Gender::Female, Some("p1"));
        bad.age = 15;

        let err = upsert_profile(&pool, 1, &bad).unwrap_err();
        assert!(matches!(err, AppError::Known { .. }));
        assert!(get_profile(&pool, 1).unwrap().is_none());
    }

    #[test]
    fn missing_profile_is_not_found() {
        let pool = test_pool();
        assert!(get_profile(&pool, 404).unwrap().is_none());
        assert!(require_profile(&pool, 404).unwrap_err().is_not_found());
    }

    #[test]
    fn delete_removes_profile_and_every_related_row() {
        let pool = test_pool();
        for (id, name) in [(1, "X"), (2, "Y"), (3, "Z")] {
            upsert_profile(&pool, id, &fields(name, Gender::Male, Gender::Male, Some("p"))).unwrap();
        }
        swipe_service::record_like(&pool, 1, 2).unwrap();
        swipe_service::record_like(&pool, 2, 1).unwrap();
        swipe_service::record_skip(&pool, 1, 3).unwrap();
        swipe_service::record_skip(&pool, 3, 1).unwrap();
        swipe_service::record_like(&pool, 2, 3).unwrap();

        assert!(delete_profile(&pool, 1).unwrap());

        let mut conn = pool.get().unwrap();
        let remaining_likes = likes::table.select(Like::as_select()).load(&mut conn).unwrap();
        let remaining_skips = skips::table.select(Skip::as_select()).load(&mut conn).unwrap();
        drop(conn);
        assert_eq!(remaining_likes, vec![Like { liker_id: 2, liked_id: 3 }]);
        assert!(remaining_skips.is_empty());
        assert!(get_profile(&pool, 1).unwrap().is_none());
        assert!(get_profile(&pool, 2).unwrap().is_some());
    }

    #[test]
    fn delete_without_profile_reports_false() {
        let pool = test_pool();
        assert!(!delete_profile(&pool, 9).unwrap());
    }

    #[test]
    fn ping_succeeds_on_migrated_database() {
        assert!(ping(&test_pool()).is_ok());
    }
}
