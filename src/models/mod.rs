pub mod application;
pub mod job;
pub mod user;
pub mod user_cv;
