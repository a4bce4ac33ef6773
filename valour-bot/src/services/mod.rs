pub mod profile_service;
pub mod swipe_service;
