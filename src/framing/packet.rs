//! Packet reassembly from frame payload bytes.
use crate::framing::{
    ByteSink, FRAME_DATASIZE, FRAME_HEADERSIZE, FRAME_SIZE, PACKET_HEADERSIZE, PACKET_MAXSIZE,
    PROTOCOL_VERSION,
};

/// Header embedded at the start of the first frame carrying a packet.
///
/// `altitude` occupies the two bytes immediately following the 12-byte
/// primary header (frame bytes 16-17); those bytes are consumed as header
/// and are not streamed to the [`ByteSink`] — payload streaming begins at
/// frame byte 18.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PacketHeader {
    pub payload_id: u8,
    /// Payload byte count, i.e. the wire's header-inclusive `length` field
    /// with `PACKET_HEADERSIZE` already subtracted. Callers never see the
    /// wire value directly.
    pub length: u16,
    pub latitude: i32,
    pub longitude: i32,
    pub altitude: u16,
}

fn parse_header(frame: &[u8; FRAME_SIZE]) -> PacketHeader {
    PacketHeader {
        payload_id: frame[5],
        length: u16::from_be_bytes([frame[6], frame[7]]),
        latitude: i32::from_be_bytes([frame[8], frame[9], frame[10], frame[11]]),
        longitude: i32::from_be_bytes([frame[12], frame[13], frame[14], frame[15]]),
        altitude: u16::from_be_bytes([frame[16], frame[17]]),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReassemblyState {
    AwaitingHeader,
    InPacket { remaining: i32 },
}

/// Bytes lost per missed frame, used to estimate how much of an in-progress
/// packet a run of dropped frames would have carried. This deliberately uses
/// the frame's total size minus its header (252), not the true 220-byte data
/// region; see the design notes for why that arithmetic is preserved as-is.
const LOST_BYTES_PER_FRAME: i32 = (FRAME_SIZE - FRAME_HEADERSIZE) as i32;

/// Reassembles packets from a sequence of frame payloads.
///
/// A packet spans one or more frames. The first frame of a packet carries a
/// [`PacketHeader`] immediately after the frame header; every payload byte
/// after that, across as many frames as needed, is streamed to the sink
/// until `length - PACKET_HEADERSIZE` bytes have been written.
#[derive(Debug)]
pub struct Reassembler {
    state: ReassemblyState,
    header: PacketHeader,
    valid: bool,
    max_size: u16,
}

impl Default for ReassemblyState {
    fn default() -> Self {
        ReassemblyState::AwaitingHeader
    }
}

impl Default for Reassembler {
    fn default() -> Self {
        Reassembler::with_max_size(PACKET_MAXSIZE)
    }
}

impl Reassembler {
    pub fn new() -> Self {
        Reassembler::default()
    }

    /// Builds a reassembler that rejects any packet-start header declaring a
    /// wire `length` greater than `max_size`, in place of the crate default
    /// [`PACKET_MAXSIZE`].
    pub fn with_max_size(max_size: u16) -> Self {
        Reassembler {
            state: ReassemblyState::default(),
            header: PacketHeader::default(),
            valid: false,
            max_size,
        }
    }

    /// Feeds one frame's worth of payload into the reassembler.
    ///
    /// `frame_valid` reflects whether this frame passed FEC and header
    /// checks. `gap` is the number of frames inferred lost immediately
    /// before this one. Returns `Some((header, valid))` whenever a packet
    /// completes (successfully or not) as a result of processing this frame.
    pub fn accept_frame<W: ByteSink>(
        &mut self,
        frame: &[u8; FRAME_SIZE],
        frame_valid: bool,
        gap: u16,
        sink: &mut W,
    ) -> Option<(PacketHeader, bool)> {
        if let ReassemblyState::InPacket { remaining } = &mut self.state {
            if gap > 0 {
                *remaining -= LOST_BYTES_PER_FRAME * i32::from(gap);
            }
        }

        match self.state {
            ReassemblyState::AwaitingHeader => {
                let mut header = parse_header(frame);
                let wire_length = header.length;
                self.valid = frame_valid;

                let bad_version = frame[4] != PROTOCOL_VERSION;
                let bad_length = wire_length < PACKET_HEADERSIZE || wire_length > self.max_size;

                let mut remaining = if bad_version || bad_length {
                    -1
                } else {
                    i32::from(wire_length) - i32::from(PACKET_HEADERSIZE)
                };

                // The wire carries the header-inclusive total; the callback
                // sees the payload length instead, matching the subtraction
                // the decoder this is bit-compatible with performs up front.
                header.length = wire_length.saturating_sub(PACKET_HEADERSIZE);
                self.header = header;

                if remaining > 0 {
                    // Streaming starts after the 12-byte primary header *and*
                    // the 2-byte altitude field (frame bytes 16-17), which is
                    // parsed above but not itself part of the payload stream.
                    remaining = stream_region(
                        sink,
                        frame,
                        FRAME_HEADERSIZE + PACKET_HEADERSIZE as usize + 2,
                        FRAME_DATASIZE,
                        remaining,
                    );
                }
                self.state = ReassemblyState::InPacket { remaining };
            }
            ReassemblyState::InPacket { remaining } => {
                self.valid &= frame_valid;
                let remaining = if remaining > 0 {
                    stream_region(sink, frame, FRAME_HEADERSIZE, FRAME_DATASIZE, remaining)
                } else {
                    remaining
                };
                self.state = ReassemblyState::InPacket { remaining };
            }
        }

        self.complete()
    }

    fn complete(&mut self) -> Option<(PacketHeader, bool)> {
        if let ReassemblyState::InPacket { remaining } = self.state {
            if remaining == 0 {
                self.state = ReassemblyState::AwaitingHeader;
                return Some((self.header, self.valid));
            } else if remaining < 0 {
                self.state = ReassemblyState::AwaitingHeader;
                return Some((self.header, false));
            }
        }
        None
    }
}

/// Streams `frame[start..end]` into `sink` while `remaining` bytes are still
/// wanted, decrementing as it goes. Returns `-1` if the sink refuses a byte,
/// aborting the rest of the region; otherwise returns the updated remaining
/// count (which may still be positive if the region ran out first).
fn stream_region<W: ByteSink>(
    sink: &mut W,
    frame: &[u8; FRAME_SIZE],
    start: usize,
    end: usize,
    mut remaining: i32,
) -> i32 {
    for &byte in &frame[start..end] {
        if remaining <= 0 {
            break;
        }
        if !sink.write_byte(byte) {
            return -1;
        }
        remaining -= 1;
    }
    remaining
}
