/// Used when a name has no alphanumeric characters at all
pub const FALLBACK_SLUG: &str = "stock";

/// Turn a display name into a URL path segment.
///
/// Lower-cases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-`, and trims leading and trailing dashes. Distinct names can
/// map to the same slug; callers see the collision, this function does not.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else {
            pending_dash = true;
        }
    }

    if out.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        out
    }
}
