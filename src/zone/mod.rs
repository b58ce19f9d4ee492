//! Zone merging: name remapping, normalization, deduplication and ordering

pub mod fingerprint;
pub mod label;
pub mod merger;
pub mod normalize;

pub use fingerprint::{fingerprint, type_key, KeyCollision};
pub use label::{relative_label, remap_name};
pub use merger::merge_zone;
pub use normalize::{classify, normalize_records};
