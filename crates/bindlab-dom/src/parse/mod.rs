//! Lenient markup fragment parsing.
//!
//! A forward-only scanner over an XML-ish markup subset: elements with
//! quoted (or bare) attributes, self-closing tags, void elements, text,
//! comments, and `<!...>` declarations (both skipped). Close tags must
//! match their open tag case-insensitively. The four basic entities
//! (`&amp;` `&lt;` `&gt;` `&quot;`, plus `&apos;`) are decoded in text and
//! attribute values; anything else stays literal.

mod error;

pub use error::MarkupError;

use bindlab_core::node::{DocumentNode, FragmentParser};

use crate::node::{NodeRef, FRAGMENT_TAG};

/// Elements that never take children and need no close tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Parse a markup source string into a detached fragment.
///
/// The returned node is a synthetic [`FRAGMENT_TAG`] element whose
/// children are the parsed top-level nodes, so multi-rooted input needs no
/// special casing downstream.
pub fn parse_fragment(source: &str) -> Result<NodeRef, MarkupError> {
    let mut cursor = Cursor::new(source);
    let root = NodeRef::new_element(FRAGMENT_TAG);
    parse_nodes(&mut cursor, &root, None)?;
    Ok(root)
}

/// [`FragmentParser`] collaborator over [`parse_fragment`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupParser;

impl FragmentParser for MarkupParser {
    type Node = NodeRef;
    type Error = MarkupError;

    fn parse_fragment(&self, source: &str) -> Result<NodeRef, MarkupError> {
        parse_fragment(source)
    }
}

/// Forward-only scan position with line tracking for error messages.
struct Cursor<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
        }
    }

    fn eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.source[self.pos..].starts_with(prefix)
    }

    /// Advance `count` bytes, counting newlines.
    fn advance(&mut self, count: usize) {
        let end = (self.pos + count).min(self.source.len());
        self.line += self.source.as_bytes()[self.pos..end]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        self.pos = end;
    }

    /// Consume and return bytes while `keep` holds.
    fn take_while(&mut self, keep: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if !keep(byte) {
                break;
            }
            self.advance(1);
        }
        &self.source[start..self.pos]
    }

    /// Consume and return bytes up to (excluding) `stop`, or the rest of
    /// the input if `stop` never occurs.
    fn take_until(&mut self, stop: u8) -> &'a str {
        self.take_while(|byte| byte != stop)
    }

    fn skip_whitespace(&mut self) {
        self.take_while(|byte| byte.is_ascii_whitespace());
    }

    fn unexpected_eof(&self, context: &str) -> MarkupError {
        MarkupError::UnexpectedEof {
            context: context.to_string(),
            line: self.line,
        }
    }

    fn malformed(&self, message: impl Into<String>) -> MarkupError {
        MarkupError::MalformedTag {
            message: message.into(),
            line: self.line,
        }
    }
}

fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' || byte == b':'
}

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(tag))
}

/// Parse child nodes into `parent` until EOF (top level) or the close tag
/// of `enclosing`.
fn parse_nodes(
    cursor: &mut Cursor<'_>,
    parent: &NodeRef,
    enclosing: Option<&str>,
) -> Result<(), MarkupError> {
    loop {
        if cursor.eof() {
            return match enclosing {
                Some(tag) => Err(cursor.unexpected_eof(&format!("inside <{}>", tag))),
                None => Ok(()),
            };
        }

        if cursor.starts_with("</") {
            let line = cursor.line;
            let name = parse_close_tag(cursor)?;
            return match enclosing {
                Some(tag) if tag.eq_ignore_ascii_case(&name) => Ok(()),
                Some(tag) => Err(MarkupError::MismatchedClose {
                    expected: tag.to_string(),
                    found: name,
                    line,
                }),
                None => Err(MarkupError::StrayClose { tag: name, line }),
            };
        }

        if cursor.starts_with("<!--") {
            skip_comment(cursor)?;
            continue;
        }

        if cursor.starts_with("<!") {
            cursor.take_until(b'>');
            if cursor.eof() {
                return Err(cursor.unexpected_eof("inside declaration"));
            }
            cursor.advance(1);
            continue;
        }

        if cursor.starts_with("<") {
            let (element, tag, self_closed) = parse_open_tag(cursor)?;
            parent.append_child(&element);
            if !self_closed && !is_void(&tag) {
                parse_nodes(cursor, &element, Some(tag.as_str()))?;
            }
            continue;
        }

        let text = cursor.take_until(b'<');
        if !text.is_empty() {
            parent.append_child(&NodeRef::new_text(&decode_entities(text)));
        }
    }
}

/// Parse `<tag attr="value" ...>` or `<tag ... />`, returning the element,
/// its tag, and whether it was self-closed.
fn parse_open_tag(cursor: &mut Cursor<'_>) -> Result<(NodeRef, String, bool), MarkupError> {
    cursor.advance(1); // consume '<'
    let tag = cursor.take_while(is_name_byte);
    if tag.is_empty() {
        return Err(cursor.malformed("missing tag name after '<'"));
    }
    let tag = tag.to_string();
    let element = NodeRef::new_element(&tag);

    loop {
        cursor.skip_whitespace();
        if cursor.eof() {
            return Err(cursor.unexpected_eof(&format!("inside <{}>", tag)));
        }
        if cursor.starts_with("/>") {
            cursor.advance(2);
            return Ok((element, tag, true));
        }
        if cursor.starts_with(">") {
            cursor.advance(1);
            return Ok((element, tag, false));
        }

        let name = cursor.take_while(is_name_byte);
        if name.is_empty() {
            let unexpected = cursor.peek().unwrap_or(b'?') as char;
            return Err(cursor.malformed(format!(
                "unexpected character '{}' in <{}>",
                unexpected, tag
            )));
        }
        let name = name.to_string();

        cursor.skip_whitespace();
        if cursor.peek() == Some(b'=') {
            cursor.advance(1);
            cursor.skip_whitespace();
            let value = parse_attribute_value(cursor, &tag)?;
            element.set_attribute(&name, &value);
        } else {
            // Bare attribute, present but valueless.
            element.set_attribute(&name, "");
        }
    }
}

fn parse_attribute_value(cursor: &mut Cursor<'_>, tag: &str) -> Result<String, MarkupError> {
    match cursor.peek() {
        Some(quote @ (b'"' | b'\'')) => {
            cursor.advance(1);
            let value = cursor.take_until(quote);
            if cursor.eof() {
                return Err(cursor.unexpected_eof(&format!("inside attribute value in <{}>", tag)));
            }
            let value = decode_entities(value);
            cursor.advance(1); // closing quote
            Ok(value)
        }
        Some(_) => {
            let value = cursor.take_while(|byte| {
                !byte.is_ascii_whitespace() && byte != b'>' && byte != b'/'
            });
            if value.is_empty() {
                return Err(cursor.malformed(format!("missing attribute value in <{}>", tag)));
            }
            Ok(decode_entities(value))
        }
        None => Err(cursor.unexpected_eof(&format!("after '=' in <{}>", tag))),
    }
}

fn parse_close_tag(cursor: &mut Cursor<'_>) -> Result<String, MarkupError> {
    cursor.advance(2); // consume "</"
    let name = cursor.take_while(is_name_byte);
    if name.is_empty() {
        return Err(cursor.malformed("missing tag name after '</'"));
    }
    let name = name.to_string();
    cursor.skip_whitespace();
    if cursor.eof() {
        return Err(cursor.unexpected_eof(&format!("inside </{}>", name)));
    }
    if cursor.peek() != Some(b'>') {
        return Err(cursor.malformed(format!("expected '>' to close '</{}'", name)));
    }
    cursor.advance(1);
    Ok(name)
}

fn skip_comment(cursor: &mut Cursor<'_>) -> Result<(), MarkupError> {
    cursor.advance(4); // consume "<!--"
    match cursor.source[cursor.pos..].find("-->") {
        Some(rel) => {
            cursor.advance(rel + 3);
            Ok(())
        }
        None => Err(cursor.unexpected_eof("inside comment")),
    }
}

/// Decode the five basic entities; unknown or bare `&` stays literal.
fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').filter(|&semi| semi <= 6).and_then(|semi| {
            let replacement = match &rest[1..semi] {
                "amp" => '&',
                "lt" => '<',
                "gt" => '>',
                "quot" => '"',
                "apos" => '\'',
                _ => return None,
            };
            Some((replacement, semi + 1))
        });
        match decoded {
            Some((replacement, consumed)) => {
                out.push(replacement);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
