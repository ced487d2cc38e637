use std::borrow::Cow;

use memchr::memchr3;

#[inline]
pub(crate) fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    let len = bytes.len();
    while i < len {
        match bytes[i] {
            b' ' | b'\n' | b'\r' | b'\t' => i += 1,
            _ => break,
        }
    }
    i
}

/// End offset (exclusive) of the JSON string literal opening at `start`.
#[inline]
pub(crate) fn parse_json_string_end(bytes: &[u8], start: usize) -> Result<usize, ()> {
    let len = bytes.len();
    if start >= len || bytes[start] != b'"' {
        return Err(());
    }
    let mut i = start + 1;
    while i < len {
        match bytes[i] {
            b'"' => return Ok(i + 1),
            b'\\' => {
                i += 1;
                if i >= len {
                    return Err(());
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    Err(())
}

/// End offset (exclusive) of the bracketed value opening at `start`.
///
/// Only nesting is tracked; the contents are not validated. Brackets inside
/// string literals are ignored.
pub(crate) fn balanced_end(bytes: &[u8], start: usize) -> Result<usize, ()> {
    if !matches!(bytes.get(start), Some(b'{' | b'[')) {
        return Err(());
    }
    let mut depth = 0usize;
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                i = parse_json_string_end(bytes, i)?;
                continue;
            }
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }
    Err(())
}

/// Remove commas that directly precede a closing `}` or `]`.
///
/// Whitespace between the comma and the bracket is kept. String literals are
/// copied through untouched. Returns `Cow::Borrowed` when nothing changed.
pub(crate) fn strip_trailing_commas(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    if memchr::memchr(b',', bytes).is_none() {
        return Cow::Borrowed(text);
    }

    let mut out: Option<String> = None;
    let mut copied = 0usize;
    let mut i = 0usize;
    while let Some(rel) = memchr3(b'"', b',', b'\\', &bytes[i..]) {
        let pos = i + rel;
        match bytes[pos] {
            b'"' => {
                // An unterminated literal runs to the end of the input.
                i = parse_json_string_end(bytes, pos).unwrap_or(bytes.len());
            }
            b',' => {
                let next = skip_ws(bytes, pos + 1);
                if matches!(bytes.get(next), Some(b'}' | b']')) {
                    let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
                    buf.push_str(&text[copied..pos]);
                    copied = pos + 1;
                }
                i = pos + 1;
            }
            _ => i = pos + 1,
        }
        if i >= bytes.len() {
            break;
        }
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&text[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(text),
    }
}
