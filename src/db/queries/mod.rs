pub mod categories;
pub mod links;
pub mod media;
pub mod questions;
pub mod users;
