pub mod cache;
pub mod extractor;
pub mod html_source;
pub mod probe;
pub mod snapshot_model;
pub mod source;
