pub mod error;
pub mod job_service;
pub mod notification_service;
