//! Frame synchronization, Reed-Solomon(255,223) forward error correction, and
//! packet reassembly for the downlink byte stream.
//!
//! The pipeline has two layers. The frame layer ([`synchronizer`], [`reader`],
//! [`fec`], [`header`]) turns a raw byte stream into a sequence of fixed-size,
//! FEC-corrected, sequence-checked frames. The packet layer ([`packet`])
//! reassembles those frames into variable-length packets, tolerating lost
//! frames by estimating how much payload they would have carried. [`coder`]
//! ties both layers together behind a single [`Coder::run`] call.
mod coder;
mod fec;
mod header;
mod io;
mod packet;
mod reader;
mod stats;
mod synchronizer;

pub use coder::{Coder, CoderBuilder};
pub use fec::{DefaultFec, FecDecoder};
pub use io::{ByteSink, ByteSource, IoByteSink, IoByteSource, ReadOutcome};
pub use packet::PacketHeader;
pub use stats::Stats;

/// Two-byte marker that opens every frame on the wire.
pub const SYNC_MARKER: [u8; 2] = [0xAA, 0x5A];

/// Protocol version carried in both the frame header and the packet header.
pub const PROTOCOL_VERSION: u8 = 0x01;

/// Total size of a frame, sync marker through the last Reed-Solomon parity byte.
pub const FRAME_SIZE: usize = 256;

/// Size of the frame header: sync marker (2), version (1), sequence low byte (1).
pub const FRAME_HEADERSIZE: usize = 4;

/// Exclusive upper bound of the region carrying header + payload bytes, i.e.
/// bytes `FRAME_HEADERSIZE..FRAME_DATASIZE` (220 bytes) are message data and
/// `FRAME_DATASIZE..FRAME_SIZE` (32 bytes) is Reed-Solomon parity.
pub const FRAME_DATASIZE: usize = 224;

/// Size of a packet header embedded at the start of the first frame of a packet.
pub const PACKET_HEADERSIZE: u16 = 12;

/// Largest `length` a packet header may declare.
pub const PACKET_MAXSIZE: u16 = 420;

/// Length, in bytes, of an RS(255,223) codeword.
pub const RS_CODEWORD_LEN: usize = 255;

/// Number of Reed-Solomon parity bytes appended to each codeword.
pub const RS_PARITY_LEN: usize = 32;
