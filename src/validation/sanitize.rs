//! Pure string sanitizers applied before field validation.

/// Strip ASCII control characters, collapse whitespace runs to a single
/// space, and trim leading/trailing whitespace.
///
/// Total and idempotent: `sanitize_string(sanitize_string(x)) == sanitize_string(x)`.
pub fn sanitize_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;

    for c in input.chars() {
        if matches!(c, '\u{0000}'..='\u{001F}' | '\u{007F}') {
            continue;
        }
        if c.is_whitespace() {
            // Only flush a separator once a non-space character follows,
            // which trims both ends for free.
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }

    out
}

/// Sanitize and case-fold an email address.
pub fn sanitize_email(input: &str) -> String {
    sanitize_string(input).to_lowercase()
}

/// Remove HTML/attribute-breakout characters from a URL.
///
/// Does not validate well-formedness; that is the schema's job.
pub fn sanitize_url(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\''))
        .collect()
}
