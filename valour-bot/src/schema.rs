// Mirrors the tables created in `db::SCHEMA`.

diesel::table! {
    users (telegram_id) {
        telegram_id -> BigInt,
        name -> Text,
        age -> Integer,
        description -> Text,
        photo_id -> Nullable<Text>,
        gender -> Text,
        preferred_gender -> Text,
    }
}

diesel::table! {
    likes (liker_id, liked_id) {
        liker_id -> BigInt,
        liked_id -> BigInt,
    }
}

diesel::table! {
    skips (skipper_id, skipped_id) {
        skipper_id -> BigInt,
        skipped_id -> BigInt,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    users,
    likes,
    skips,
);
