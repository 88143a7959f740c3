/// Reward layer: turns the `"O"`-class count into a shift and decodes the
/// stored message with it.
///
/// ```text
///   o_count ──▶ shift_for ──┐
///                           ├──▶ decode ──▶ message
///   secret-word.pkl ──▶ load┘
/// ```
pub mod cipher;
pub mod secret;
