//! Placeholder detection and splitting.
//!
//! A placeholder is `{{` + field name + `}}`, with the field name trimmed
//! of surrounding whitespace. There is no nesting and no escaping; the
//! field may not contain `}`. Anything that does not form a complete token
//! (an unclosed `{{`, an empty `{{}}`, a stray `}`) is literal text.

/// One piece of a split string: either literal text or a complete
/// placeholder token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text between placeholders.
    Literal(&'a str),

    /// A complete `{{ field }}` token.
    Placeholder {
        /// The token exactly as written, delimiters included.
        raw: &'a str,
        /// The field name with surrounding whitespace trimmed.
        field: &'a str,
    },
}

impl<'a> Segment<'a> {
    /// The segment's contribution to the original string.
    pub fn raw(&self) -> &'a str {
        match *self {
            Segment::Literal(text) => text,
            Segment::Placeholder { raw, .. } => raw,
        }
    }
}

/// Split `text` into alternating literal and placeholder segments, in
/// order. Concatenating [`Segment::raw`] over the result reproduces the
/// input exactly.
pub fn split(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut search = 0;

    while let Some(open) = find_from(text, search, "{{") {
        match token_end(text, open) {
            Some(close) => {
                if open > literal_start {
                    segments.push(Segment::Literal(&text[literal_start..open]));
                }
                segments.push(Segment::Placeholder {
                    raw: &text[open..close],
                    field: text[open + 2..close - 2].trim(),
                });
                literal_start = close;
                search = close;
            }
            // Not a token here; the next candidate is the next `{{`.
            None => search = open + 1,
        }
    }

    if literal_start < text.len() {
        segments.push(Segment::Literal(&text[literal_start..]));
    }
    segments
}

/// Fast existence check used during scanning, so non-templated nodes are
/// never recorded. Allocation-free.
pub fn contains_placeholder(text: &str) -> bool {
    let mut search = 0;
    while let Some(open) = find_from(text, search, "{{") {
        if token_end(text, open).is_some() {
            return true;
        }
        search = open + 1;
    }
    false
}

fn find_from(text: &str, from: usize, needle: &str) -> Option<usize> {
    if from > text.len() {
        return None;
    }
    text[from..].find(needle).map(|rel| from + rel)
}

/// End position (exclusive, past the `}}`) of the token opening at `open`,
/// or `None` if no token starts there. The field must be non-empty and
/// must not contain `}`; the first `}` after `{{` decides both.
fn token_end(text: &str, open: usize) -> Option<usize> {
    let content_start = open + 2;
    let brace = find_from(text, content_start, "}")?;
    if brace > content_start && text.as_bytes().get(brace + 1) == Some(&b'}') {
        Some(brace + 2)
    } else {
        None
    }
}
