pub mod email;
pub mod message;
pub mod request;
pub mod submission;
