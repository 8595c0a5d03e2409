pub mod add_recent;
pub mod fields;
pub mod init;
pub mod pain_scores;
pub mod rate_limit;
