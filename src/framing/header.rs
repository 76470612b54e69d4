//! Frame header validation and sequence-gap accounting.
use crate::framing::{FRAME_SIZE, PROTOCOL_VERSION, SYNC_MARKER};

/// Returns `true` if `frame` carries the expected sync marker and protocol
/// version at its head.
///
/// `frame[0]` is always `SYNC_MARKER[1]`; it is reconstructed by the
/// synchronizer rather than re-checked here.
pub fn validate(frame: &[u8; FRAME_SIZE]) -> bool {
    frame[0] == SYNC_MARKER[1] && frame[1] == PROTOCOL_VERSION
}

/// Extracts the big-endian sequence number carried in `frame[2..4]`.
pub fn sequence_number(frame: &[u8; FRAME_SIZE]) -> u16 {
    u16::from_be_bytes([frame[2], frame[3]])
}

/// Updates `last_sequence` with `observed` and returns the number of frames
/// that appear to have been lost in between, i.e. `(observed - (last+1)) mod
/// 65536`. A gap of `0` means `observed` was exactly the expected next value.
pub fn sequence_gap(last_sequence: &mut u16, observed: u16) -> u16 {
    let expected = last_sequence.wrapping_add(1);
    let gap = observed.wrapping_sub(expected);
    *last_sequence = observed;
    gap
}
