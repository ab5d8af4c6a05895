pub mod jobs;
pub mod messages;
pub mod notifications;
pub mod profile;
