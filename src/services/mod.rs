pub mod database;
pub mod quotes;

pub use database::{generate_post_id, MongoDb, PostStore};
pub use quotes::QuoteClient;
