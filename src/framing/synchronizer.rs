use tracing::trace;

use crate::framing::{ByteSource, ReadOutcome, SYNC_MARKER};

/// Scans a byte stream for the two-byte sync marker that opens every frame.
///
/// Unlike a bit-shift-tolerant sync scanner, the marker here is always
/// byte-aligned: the link is a clocked serial connection, not a bitstream
/// recovered from a physical-layer symbol clock, so there is nothing to
/// bit-shift against.
#[derive(Debug, Default)]
pub struct Synchronizer {
    state: SyncState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SyncState {
    #[default]
    Idle,
    SawFirst,
}

impl Synchronizer {
    pub fn new() -> Self {
        Synchronizer::default()
    }

    /// Pulls bytes from `source` until the sync marker has been seen, or the
    /// source is exhausted. Returns `true` once synchronized, `false` on eof.
    ///
    /// Bytes that do not contribute to a match are simply discarded; there is
    /// no way to "push back" on a byte-at-a-time callback source.
    pub fn synchronize<S: ByteSource>(&mut self, source: &mut S) -> bool {
        self.state = SyncState::Idle;
        loop {
            let byte = match source.read_byte() {
                ReadOutcome::Byte(b) => b,
                ReadOutcome::Timeout => continue,
                ReadOutcome::Eof => return false,
            };

            self.state = match (self.state, byte) {
                (SyncState::Idle, b) if b == SYNC_MARKER[0] => SyncState::SawFirst,
                (SyncState::SawFirst, b) if b == SYNC_MARKER[1] => {
                    trace!("frame sync acquired");
                    return true;
                }
                (SyncState::SawFirst, b) if b == SYNC_MARKER[0] => SyncState::SawFirst,
                _ => SyncState::Idle,
            };
        }
    }
}
