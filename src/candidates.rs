//! Candidate filename lists for progressively-loaded images.
//!
//! A candidate is one declared filename; an attempt is a concrete path
//! derived from it (image-directory prefixed or root-relative). Candidate
//! lists come from a JSON array attribute and fall back to synthesized
//! values when the attribute is missing or malformed.

/// Directory prefix tried for every candidate.
pub const IMAGE_DIR: &str = "images/";

/// Extension appended to synthesized and extension-less candidates.
pub const DEFAULT_EXT: &str = ".png";

/// Attribute holding the candidate list on service cards.
pub const CARD_FILES_ATTR: &str = "data-files";

/// Attribute holding the candidate list on social icons.
pub const ICON_FALLBACK_ATTR: &str = "data-fallback";

/// Order in which the two attempts for one candidate are emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttemptOrder {
    /// `images/<name>` first, then `<name>` (service cards).
    PrefixedFirst,
    /// `<name>` first, then `images/<name>` (social icons).
    BareFirst,
}

/// Parses a JSON array-of-strings attribute. `None` for a missing attribute
/// or any parse failure; the caller decides the fallback.
pub fn parse_candidate_attr(raw: Option<&str>) -> Option<Vec<String>> {
    serde_json::from_str(raw?).ok()
}

/// Synthesizes a candidate from heading text: trimmed, internal whitespace
/// runs collapsed to single underscores, plus the default extension.
/// Blank text yields `None`.
pub fn synthesize_from_heading(heading: &str) -> Option<String> {
    let trimmed = heading.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut name = String::with_capacity(trimmed.len() + DEFAULT_EXT.len());
    let mut in_gap = false;
    for ch in trimmed.chars() {
        if ch.is_whitespace() {
            in_gap = true;
            continue;
        }
        if in_gap {
            name.push('_');
            in_gap = false;
        }
        name.push(ch);
    }
    name.push_str(DEFAULT_EXT);
    Some(name)
}

/// Candidate list for a service card: the `data-files` attribute, else one
/// candidate synthesized from the heading, else empty.
pub fn service_card_candidates(attr: Option<&str>, heading: Option<&str>) -> Vec<String> {
    if let Some(list) = parse_candidate_attr(attr) {
        return list;
    }
    heading
        .and_then(synthesize_from_heading)
        .into_iter()
        .collect()
}

/// Candidate list for a social icon: the `data-fallback` attribute, else the
/// element's current source, else empty.
pub fn social_icon_candidates(attr: Option<&str>, current_src: Option<&str>) -> Vec<String> {
    if let Some(list) = parse_candidate_attr(attr) {
        return list;
    }
    current_src
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .into_iter()
        .collect()
}

/// Expands candidates into the full attempt list: two attempts per
/// candidate in the given order, empty candidates dropped, duplicates
/// removed preserving first-seen order.
pub fn expand_attempts(candidates: &[String], order: AttemptOrder) -> Vec<String> {
    let mut attempts: Vec<String> = Vec::with_capacity(candidates.len() * 2);
    let mut push = |attempt: String, out: &mut Vec<String>| {
        if !out.contains(&attempt) {
            out.push(attempt);
        }
    };
    for candidate in candidates {
        if candidate.is_empty() {
            continue;
        }
        let name = ensure_extension(candidate);
        let prefixed = format!("{IMAGE_DIR}{name}");
        match order {
            AttemptOrder::PrefixedFirst => {
                push(prefixed, &mut attempts);
                push(name, &mut attempts);
            }
            AttemptOrder::BareFirst => {
                push(name, &mut attempts);
                push(prefixed, &mut attempts);
            }
        }
    }
    attempts
}

// "plumber" becomes "plumber.png"; "fb.svg" and "icons/x.webp" pass through.
fn ensure_extension(name: &str) -> String {
    let last_segment = name.rsplit('/').next().unwrap_or(name);
    if last_segment.contains('.') {
        name.to_string()
    } else {
        format!("{name}{DEFAULT_EXT}")
    }
}
