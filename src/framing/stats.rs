//! Per-[`super::Coder`] byte accounting.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Total bytes pulled from the source, including sync scanning.
    pub received_bytes: u64,
    /// Bytes belonging to frames that passed FEC and header validation.
    pub valid_frame_bytes: u64,
    /// Bytes belonging to frames that failed FEC or header validation, plus
    /// the estimated bytes carried by frames inferred lost from sequence gaps.
    pub invalid_frame_bytes: u64,
    /// Bytes that Reed-Solomon reported as corrected (not merely detected).
    pub corrected_bytes: u64,
}
