pub mod ticket;
pub mod ticket_comment;
pub mod user;
