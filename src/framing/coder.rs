use tracing::{debug, span, Level};

use crate::error::{Error, Result};
use crate::framing::fec::{DefaultFec, FecDecoder};
use crate::framing::header;
use crate::framing::packet::{PacketHeader, Reassembler};
use crate::framing::reader::{read_frame, FrameReadOutcome};
use crate::framing::{ByteSink, ByteSource, Stats, FRAME_SIZE, PACKET_HEADERSIZE, PACKET_MAXSIZE};

/// Builds a [`Coder`] with optional overrides of its defaults.
///
/// Grounded in the builder-style construction used throughout this crate's
/// teacher lineage (e.g. a `Decoder::new().with_*()` chain): defaults cover
/// the common case, and only deployments with unusual requirements need to
/// reach for the setters.
pub struct CoderBuilder {
    fec: Box<dyn FecDecoder>,
    packet_max_size: u16,
}

impl Default for CoderBuilder {
    fn default() -> Self {
        CoderBuilder {
            fec: Box::new(DefaultFec),
            packet_max_size: PACKET_MAXSIZE,
        }
    }
}

impl CoderBuilder {
    pub fn new() -> Self {
        CoderBuilder::default()
    }

    /// Overrides the Reed-Solomon implementation used to correct frames.
    #[must_use]
    pub fn with_fec(mut self, fec: Box<dyn FecDecoder>) -> Self {
        self.fec = fec;
        self
    }

    /// Overrides the ceiling a packet-start header's `length` field may
    /// declare before the packet is rejected as malformed. Defaults to
    /// [`PACKET_MAXSIZE`].
    pub fn with_packet_max_size(mut self, max: u16) -> Result<Self> {
        validate_packet_max_size(max)?;
        self.packet_max_size = max;
        Ok(self)
    }

    pub fn build(self) -> Coder {
        Coder {
            sequence: 0xFFFF,
            fec: self.fec,
            reassembler: Reassembler::with_max_size(self.packet_max_size),
            stats: Stats::default(),
        }
    }
}

/// Decodes a downlink byte stream into packets.
///
/// A `Coder` is single-threaded and synchronous: [`Coder::run`] drives the
/// whole pipeline (resync, frame read, FEC, header validation, sequence-gap
/// accounting, packet reassembly) to completion against whatever
/// [`ByteSource`]/[`ByteSink`] the caller provides.
pub struct Coder {
    sequence: u16,
    fec: Box<dyn FecDecoder>,
    reassembler: Reassembler,
    stats: Stats,
}

impl Default for Coder {
    fn default() -> Self {
        CoderBuilder::default().build()
    }
}

impl Coder {
    pub fn new() -> Self {
        Coder::default()
    }

    pub fn builder() -> CoderBuilder {
        CoderBuilder::new()
    }

    #[must_use]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Runs the decode loop until `source` is exhausted.
    ///
    /// `on_packet` is called once per completed packet (successfully
    /// reassembled or abandoned), with the packet header and whether every
    /// frame contributing to it passed FEC and header validation.
    pub fn run<S, W, F>(&mut self, source: &mut S, sink: &mut W, mut on_packet: F) -> Result<()>
    where
        S: ByteSource,
        W: ByteSink,
        F: FnMut(&PacketHeader, bool),
    {
        loop {
            let mut frame = match read_frame(source, &mut self.stats) {
                FrameReadOutcome::Eof => return Ok(()),
                FrameReadOutcome::Frame(frame) => frame,
            };

            let observed = header::sequence_number(&frame);
            let span = span!(Level::TRACE, "frame", sequence = observed);
            let _guard = span.enter();

            let fec_ok = self.correct(&mut frame);
            let header_ok = header::validate(&frame);
            let frame_valid = fec_ok && header_ok;

            let gap = header::sequence_gap(&mut self.sequence, observed);
            if gap > 0 {
                debug!(gap, "sequence gap detected");
                self.stats.invalid_frame_bytes += gap as u64 * FRAME_SIZE as u64;
            }

            if frame_valid {
                self.stats.valid_frame_bytes += FRAME_SIZE as u64;
            } else {
                self.stats.invalid_frame_bytes += FRAME_SIZE as u64;
            }

            if let Some((packet_header, valid)) =
                self.reassembler.accept_frame(&frame, frame_valid, gap, sink)
            {
                on_packet(&packet_header, valid);
            }
        }
    }

    fn correct(&mut self, frame: &mut [u8; FRAME_SIZE]) -> bool {
        let codeword: &mut [u8; 255] = (&mut frame[1..FRAME_SIZE])
            .try_into()
            .expect("frame body is always 255 bytes");
        match self.fec.decode(codeword) {
            Ok(num_corrected) => {
                self.stats.corrected_bytes += u64::from(num_corrected);
                true
            }
            Err(()) => false,
        }
    }
}

/// Validates that a configured value makes sense as a packet size ceiling.
///
/// Exposed for callers assembling their own [`CoderBuilder`] extensions that
/// want to reuse the same bound the reassembler enforces.
pub fn validate_packet_max_size(max: u16) -> Result<()> {
    if max < PACKET_HEADERSIZE {
        return Err(Error::InvalidPacketMaxSize {
            given: max,
            minimum: PACKET_HEADERSIZE,
        });
    }
    Ok(())
}
