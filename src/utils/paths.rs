//! Path normalization

pub fn normalize_path(path: &str) -> String {
    // Sync configs are consumed on any platform; always use forward slashes
    path.replace('\\', "/")
}
