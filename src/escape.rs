//! HTML escaping utilities.
//!
//! Text escaping is fast-path optimized: scan for the first escapable
//! byte with `memchr`, then bulk-copy the segments between escapes.
//! Attribute values go through `html-escape`.

use memchr::memchr3;

/// Lookup table for bytes that need escaping in text content.
const TEXT_ESCAPE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    table[b'<' as usize] = true;
    table[b'>' as usize] = true;
    table[b'&' as usize] = true;
    table
};

/// Escape HTML text content into an output buffer.
///
/// Only `<`, `>` and `&` are replaced; quotes pass through so that plain
/// prose renders unchanged.
///
/// # Example
/// ```
/// use creole_html::escape::escape_text_into;
///
/// let mut out = Vec::new();
/// escape_text_into(&mut out, "<b> & \"q\"");
/// assert_eq!(out, b"&lt;b&gt; &amp; \"q\"");
/// ```
#[inline]
pub fn escape_text_into(out: &mut Vec<u8>, input: &str) {
    let input = input.as_bytes();
    let mut pos = match memchr3(b'<', b'>', b'&', input) {
        Some(p) => p,
        None => {
            out.extend_from_slice(input);
            return;
        }
    };

    out.extend_from_slice(&input[..pos]);

    while pos < input.len() {
        let scan_start = pos;
        while pos < input.len() && !TEXT_ESCAPE_TABLE[input[pos] as usize] {
            pos += 1;
        }

        if pos > scan_start {
            out.extend_from_slice(&input[scan_start..pos]);
        }

        if pos < input.len() {
            let escape_seq: &[u8] = match input[pos] {
                b'<' => b"&lt;",
                b'>' => b"&gt;",
                _ => b"&amp;",
            };
            out.extend_from_slice(escape_seq);
            pos += 1;
        }
    }
}

/// Escape an attribute value for use inside double quotes.
#[inline]
pub fn escape_attr_into(out: &mut Vec<u8>, input: &str) {
    let encoded = html_escape::encode_double_quoted_attribute(input);
    out.extend_from_slice(encoded.as_bytes());
}

/// Escape text content and return it as a `String`.
///
/// Prefer `escape_text_into` to reuse buffers.
pub fn escape_text(input: &str) -> String {
    if memchr3(b'<', b'>', b'&', input.as_bytes()).is_none() {
        return input.to_owned();
    }
    let mut out = Vec::with_capacity(input.len() + input.len() / 8);
    escape_text_into(&mut out, input);
    // Only ASCII entity sequences are inserted between valid UTF-8 runs.
    String::from_utf8(out).unwrap_or_default()
}
