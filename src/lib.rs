//! Byte-stream resynchronization, Reed-Solomon(255,223) forward error correction,
//! and two-level packet reassembly for a one-way radio downlink.
//!
//! A [`framing::Coder`] owns no I/O of its own; callers supply byte-at-a-time
//! [`framing::ByteSource`] and [`framing::ByteSink`] implementations and drive
//! the decode loop with [`framing::Coder::run`]. This mirrors the half-duplex,
//! callback-driven contract of the radio link itself: bytes arrive one at a
//! time, possibly with gaps, and there is no way to ask the transmitter to
//! resend anything.

mod error;

pub mod framing;

pub use error::{Error, Result};
