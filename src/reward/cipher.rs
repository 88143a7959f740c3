use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CipherError {
    #[error("shifting {ch:?} by {shift} leaves the Unicode scalar range")]
    OutOfRange { ch: char, shift: u32 },
}

/// `trunc(o_count / 4 + 12.75)`, summed as a real number first.
pub fn shift_for(o_count: usize) -> u32 {
    (o_count as f64 / 4.0 + 12.75) as u32
}

/// Shift every code point of `message` up by `shift`.
pub fn encode(message: &str, shift: u32) -> Result<String, CipherError> {
    message
        .chars()
        .map(|ch| {
            (ch as u32)
                .checked_add(shift)
                .and_then(char::from_u32)
                .ok_or(CipherError::OutOfRange { ch, shift })
        })
        .collect()
}

/// Shift every code point of `payload` down by `shift`.
///
/// There is no wraparound.  A result that is not a Unicode scalar value
/// (below zero, or a surrogate) becomes U+FFFD.
pub fn decode(payload: &str, shift: u32) -> String {
    payload
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            (ch as u32)
                .checked_sub(shift)
                .and_then(char::from_u32)
                .unwrap_or_else(|| {
                    log::warn!("character {i} ({ch:?}) has no code point {shift} below it");
                    char::REPLACEMENT_CHARACTER
                })
        })
        .collect()
}
