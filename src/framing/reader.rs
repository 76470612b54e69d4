use tracing::debug;

use crate::framing::synchronizer::Synchronizer;
use crate::framing::{ByteSource, ReadOutcome, Stats, FRAME_SIZE, SYNC_MARKER};

/// Result of attempting to read one frame from the stream.
pub enum FrameReadOutcome {
    /// A (possibly partial, zero-padded) frame buffer.
    Frame([u8; FRAME_SIZE]),
    /// The source is exhausted; there is no more stream to read.
    Eof,
}

/// Wraps a [`ByteSource`] to tally every byte pulled, sync scanning included,
/// into [`Stats::received_bytes`].
struct CountingSource<'a, S> {
    inner: &'a mut S,
    stats: &'a mut Stats,
}

impl<S: ByteSource> ByteSource for CountingSource<'_, S> {
    fn read_byte(&mut self) -> ReadOutcome {
        let outcome = self.inner.read_byte();
        if matches!(outcome, ReadOutcome::Byte(_)) {
            self.stats.received_bytes += 1;
        }
        outcome
    }
}

/// Synchronizes on the next frame marker and reads the remainder of the
/// frame. A timeout or eof partway through a frame is treated as the end of
/// that frame only: the rest of the buffer is left zero-filled and handed to
/// the caller, which will almost certainly fail FEC but keeps the decode
/// loop moving. Only a failure to find the sync marker at all ends the
/// stream.
pub fn read_frame<S: ByteSource>(source: &mut S, stats: &mut Stats) -> FrameReadOutcome {
    let mut counting = CountingSource {
        inner: source,
        stats,
    };

    if !Synchronizer::new().synchronize(&mut counting) {
        return FrameReadOutcome::Eof;
    }

    let mut frame = [0u8; FRAME_SIZE];
    frame[0] = SYNC_MARKER[1];
    for slot in frame.iter_mut().skip(1) {
        match counting.read_byte() {
            ReadOutcome::Byte(b) => *slot = b,
            ReadOutcome::Timeout | ReadOutcome::Eof => {
                debug!("partial frame: stream ended mid-frame, continuing with zero padding");
                break;
            }
        }
    }
    FrameReadOutcome::Frame(frame)
}
