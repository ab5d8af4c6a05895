pub mod jobmodel;
pub mod messagemodel;
pub mod notificationmodel;
pub mod profilemodel;
