//! UTF-8/16/32 helpers for the wide-character literal encodings. These sit
//! below the string/char literal scanner: it decodes one rune out of escape
//! or source text, then calls into here to append it in the encoding the
//! literal's prefix selected.

/// Number of continuation bytes implied by a UTF-8 lead byte, or `None` if
/// `lead` cannot start a UTF-8 sequence.
pub fn utf8_rune_size(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// Decode one UTF-8 scalar value starting at `bytes[0]`. Returns the
/// decoded rune and the number of bytes it consumed, or `None` if `bytes`
/// does not begin with a valid encoding.
pub fn decode_utf8(bytes: &[u8]) -> Option<(u32, usize)> {
    let len = utf8_rune_size(*bytes.first()?)?;
    if bytes.len() < len {
        return None;
    }
    std::str::from_utf8(&bytes[..len])
        .ok()
        .and_then(|s| s.chars().next())
        .map(|c| (c as u32, len))
}

/// Append `rune` to `out` as UTF-8. Runes above the Unicode range C11
/// actually permits (`>= 0x200000`) are rejected; callers report a
/// diagnostic and substitute the replacement character.
pub fn append_utf8(out: &mut Vec<u8>, rune: u32) -> bool {
    if rune >= 0x200000 {
        return false;
    }
    match char::from_u32(rune) {
        Some(c) => {
            let mut buf = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            true
        }
        None => false,
    }
}

/// Append `rune` to `out` as one or two little-endian UTF-16 code units,
/// using the same surrogate-pair formula as the reference implementation:
/// `hi = (rune >> 10) + 0xD7C0`, `lo = (rune & 0x3FF) + 0xDC00`.
pub fn append_utf16(out: &mut Vec<u8>, rune: u32) {
    if rune < 0x10000 {
        out.extend_from_slice(&(rune as u16).to_le_bytes());
    } else {
        let hi = ((rune >> 10) as u16).wrapping_add(0xD7C0);
        let lo = ((rune & 0x3FF) as u16).wrapping_add(0xDC00);
        out.extend_from_slice(&hi.to_le_bytes());
        out.extend_from_slice(&lo.to_le_bytes());
    }
}

/// Append `rune` to `out` as one little-endian UTF-32 code unit.
pub fn append_utf32(out: &mut Vec<u8>, rune: u32) {
    out.extend_from_slice(&rune.to_le_bytes());
}
