//! Encoding and decoding of character references.
use std::borrow::Cow;

use quick_xml::escape::{partial_escape, resolve_html5_entity};

/// The longest reference name that is looked up, including any leading `#`.
const MAX_ENTITY_LEN: usize = 32;

/// Decodes the character references of raw markup text.
///
/// Named references are resolved against the HTML5 entity table and numeric
/// references (`&#38;`, `&#x26;`) by code point. References that can't be resolved,
/// or that aren't terminated by `;`, are left as written. Invalid code points are
/// replaced with U+FFFD.
///
/// # Example
///
/// ```
/// use loupe_ast::entities::decode;
///
/// assert_eq!(decode("a&amp;b"), "a&b");
/// assert_eq!(decode("&#x3C;p&#62;"), "<p>");
/// assert_eq!(decode("&unknown; & more"), "&unknown; & more");
/// ```
pub fn decode(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        decoded.push_str(&rest[..start]);
        rest = &rest[start..];

        let reference = rest[1..]
            .char_indices()
            .take(MAX_ENTITY_LEN + 1)
            .find(|(_, c)| *c == ';')
            .and_then(|(end, _)| {
                let name = &rest[1..=end];
                resolve(name).map(|value| (value, end + 2))
            });
        match reference {
            Some((value, consumed)) => {
                decoded.push_str(&value);
                rest = &rest[consumed..];
            }
            None => {
                decoded.push('&');
                rest = &rest[1..];
            }
        }
    }
    decoded.push_str(rest);
    Cow::Owned(decoded)
}

fn resolve(name: &str) -> Option<Cow<'static, str>> {
    let Some(number) = name.strip_prefix('#') else {
        return resolve_html5_entity(name).map(Cow::Borrowed);
    };
    let code = match number.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => number.parse(),
    }
    .ok()?;
    let c = match char::from_u32(code) {
        Some('\0') | None => char::REPLACEMENT_CHARACTER,
        Some(c) => c,
    };
    Some(Cow::Owned(c.to_string()))
}

/// Encodes `&`, `<`, and `>` so that decoded text can be stored as markup.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    partial_escape(text)
}

/// Encodes an attribute value for use within double quotes.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    let escaped = partial_escape(value);
    if escaped.contains('"') {
        Cow::Owned(escaped.replace('"', "&quot;"))
    } else {
        escaped
    }
}
