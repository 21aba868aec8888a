use std::sync::LazyLock;

use regex::Regex;

static TAG_INVALID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("tag pattern is valid"));
static TAG_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("separator pattern is valid"));

/// URL-safe form of a tag, used for both the tag page path and its display name.
///
/// Case and accent variants of the same tag normalize identically.
pub fn normalize_tag<S: AsRef<str>>(tag: S) -> String {
    normalize_tag_str(tag.as_ref())
}

fn normalize_tag_str(tag: &str) -> String {
    let tag = deunicode::deunicode(tag).to_lowercase();
    let tag = TAG_INVALID_CHARS.replace_all(&tag, "");
    let tag = TAG_SEPARATORS.replace_all(&tag, "-");
    tag.trim_matches(['-', '_']).to_owned()
}

/// Directory name for a new post, derived from its title.
pub fn slugify<S: AsRef<str>>(title: S) -> String {
    slugify_str(title.as_ref())
}

fn slugify_str(title: &str) -> String {
    title
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}
