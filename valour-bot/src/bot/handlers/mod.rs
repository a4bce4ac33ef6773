pub mod matching;
pub mod profile;
pub mod start;
