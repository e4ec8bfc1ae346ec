use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caller-supplied post fields. Posts are schema-free: whatever JSON object the
/// caller sends is stored and returned verbatim, so the body is an open map
/// rather than a fixed record.
pub type PostDocument = serde_json::Map<String, Value>;

/// Read view of a stored post: the store-assigned id plus the document fields.
/// Only `id` is ever interpreted by this service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: String,
    #[serde(flatten)]
    pub fields: PostDocument,
}
