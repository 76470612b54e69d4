#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("packet_max_size ({given}) must be >= PACKET_HEADERSIZE ({minimum})")]
    InvalidPacketMaxSize { given: u16, minimum: u16 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Integrity check or correction error executing the FEC algorithm.
    #[error("integrity algorithm error: {0}")]
    IntegrityAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, Error>;
