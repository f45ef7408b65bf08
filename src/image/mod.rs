pub mod classify;
pub mod naming;

pub use classify::{Classifier, ImageKind, classify_description};
pub use naming::{Source, object_name, resolve_name, validate_object_name};
