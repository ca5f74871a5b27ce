pub mod delete;
pub mod post;
