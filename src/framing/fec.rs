//! Reed-Solomon(255,223) forward error correction over a single frame.
//!
//! Frames are not interleaved: each 255-byte codeword (the frame sans its
//! leading sync byte) is corrected as one RS block, unlike a CCSDS CADU which
//! interleaves several codewords per block.
use rs2::{correct_message, RSState};

use crate::framing::RS_CODEWORD_LEN;

/// Pluggable Reed-Solomon implementation.
///
/// `decode` corrects `codeword` in place and returns the number of symbol
/// errors corrected, or `Err(())` if the block is uncorrectable. Kept as a
/// trait so a given deployment can swap in a different RS implementation
/// without touching the framing logic.
pub trait FecDecoder {
    fn decode(&self, codeword: &mut [u8; RS_CODEWORD_LEN]) -> Result<u32, ()>;
}

/// [`FecDecoder`] backed by the `rs2` crate's RS(255,223) implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFec;

impl FecDecoder for DefaultFec {
    fn decode(&self, codeword: &mut [u8; RS_CODEWORD_LEN]) -> Result<u32, ()> {
        let zult = correct_message(codeword);
        let num_corrected = match zult.state {
            RSState::Uncorrectable(_) => return Err(()),
            RSState::Corrected(num) => num,
            _ => 0,
        };
        let message = zult.message.ok_or(())?;
        codeword[..message.len()].copy_from_slice(&message);
        Ok(num_corrected as u32)
    }
}
