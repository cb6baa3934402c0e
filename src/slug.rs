/// Identifier for an entry: `{last two chars of timestamp} {title} {author}`,
/// slugified.
///
/// The timestamp suffix is the seconds of the last edit, which keeps two
/// submissions of the same puzzle by the same author apart in practice. It is
/// not a uniqueness guarantee.
pub fn entry_slug(timestamp: &str, title: &str, author: &str) -> String {
    let suffix_start = timestamp
        .char_indices()
        .rev()
        .nth(1)
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    let suffix = &timestamp[suffix_start..];
    slugify(&format!("{suffix} {title} {author}"))
}

pub fn slugify(input: &str) -> String {
    let ascii = deunicode::deunicode(input).to_lowercase();

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;
    for ch in ascii.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
        } else {
            pending_separator = true;
        }
    }

    slug
}
