//! Subdomain label derivation and name remapping

/// Relative label of a subdomain file stem under `apex`.
///
/// Returns `None` when the stem does not end with the apex or is the apex
/// itself; such files are not merged. The suffix test is a plain string
/// suffix, so `notexample.com` yields the label `not`.
pub fn relative_label(stem: &str, apex: &str) -> Option<String> {
    if stem == apex {
        return None;
    }
    let prefix = stem.strip_suffix(apex)?;
    Some(prefix.trim_end_matches('.').to_string())
}

/// Place `name` from a subdomain document into the apex namespace.
pub fn remap_name(name: &str, label: &str) -> String {
    if name.is_empty() {
        label.to_string()
    } else if label.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", name, label)
    }
}
