pub mod health;
pub mod motive;
pub mod posts;

pub use health::health_check;
pub use motive::get_motive;
pub use posts::{create_post, delete_post, list_posts, replace_post};
