pub mod biddb;
pub mod db;
pub mod jobdb;
pub mod messagedb;
pub mod notificationdb;
pub mod profiledb;
pub mod reviewdb;
