pub mod bucket;
pub mod listing;

pub use bucket::{Bucket, Deletion};
pub use listing::ObjectUrls;
