mod categories;
mod links;
mod media;
mod questions;
mod users;

pub use categories::category_router;
pub use links::links_router;
pub use media::media_router;
pub use questions::questions_router;
pub use users::users_router;
