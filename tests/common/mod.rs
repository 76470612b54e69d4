use stratolink::framing::{
    ByteSink, ByteSource, FecDecoder, ReadOutcome, FRAME_DATASIZE, FRAME_HEADERSIZE, FRAME_SIZE,
    PACKET_HEADERSIZE, PROTOCOL_VERSION, SYNC_MARKER,
};

/// In-memory [`ByteSource`] over a fixed byte buffer.
pub struct VecSource {
    data: Vec<u8>,
    pos: usize,
}

impl VecSource {
    pub fn new(data: Vec<u8>) -> Self {
        VecSource { data, pos: 0 }
    }
}

impl ByteSource for VecSource {
    fn read_byte(&mut self) -> ReadOutcome {
        match self.data.get(self.pos) {
            Some(&b) => {
                self.pos += 1;
                ReadOutcome::Byte(b)
            }
            None => ReadOutcome::Eof,
        }
    }
}

/// In-memory [`ByteSink`] that always accepts bytes.
#[derive(Default)]
pub struct VecSink(pub Vec<u8>);

impl ByteSink for VecSink {
    fn write_byte(&mut self, byte: u8) -> bool {
        self.0.push(byte);
        true
    }
}

/// A [`FecDecoder`] that performs no correction at all, for tests that
/// exercise framing and reassembly logic independent of real Reed-Solomon
/// parity, which these synthetic fixtures don't compute.
pub struct NoOpFec;

impl FecDecoder for NoOpFec {
    fn decode(&self, _codeword: &mut [u8; 255]) -> Result<u32, ()> {
        Ok(0)
    }
}

/// Describes the first frame's packet header fields.
pub struct PacketFields {
    pub payload_id: u8,
    pub latitude: i32,
    pub longitude: i32,
    pub altitude: u16,
}

impl Default for PacketFields {
    fn default() -> Self {
        PacketFields {
            payload_id: 1,
            latitude: 0,
            longitude: 0,
            altitude: 0,
        }
    }
}

const FRAME_DATA_LEN: usize = FRAME_DATASIZE - FRAME_HEADERSIZE; // 220
// Bytes left for payload in the first frame once the 12-byte packet header
// and the 2-byte altitude field (consumed as header, not streamed, see
// PacketHeader) are accounted for.
const FIRST_FRAME_PAYLOAD_CAP: usize = FRAME_DATA_LEN - PACKET_HEADERSIZE as usize - 2; // 206

/// Appends the wire bytes (leading sync marker included) for a single frame
/// carrying `data` (220 bytes, zero-padded/truncated) at `sequence`.
pub fn push_frame(stream: &mut Vec<u8>, sequence: u16, data: &[u8; FRAME_DATA_LEN]) {
    stream.push(SYNC_MARKER[0]);
    stream.push(SYNC_MARKER[1]);
    stream.push(PROTOCOL_VERSION);
    stream.extend_from_slice(&sequence.to_be_bytes());
    stream.extend_from_slice(data);
    stream.extend(std::iter::repeat(0u8).take(FRAME_SIZE - FRAME_DATASIZE)); // parity, unused by NoOpFec
}

/// Appends a frame whose header fails validation (wrong protocol version),
/// still carrying an otherwise-plausible data region.
pub fn push_bad_version_frame(stream: &mut Vec<u8>, sequence: u16) {
    stream.push(SYNC_MARKER[0]);
    stream.push(SYNC_MARKER[1]);
    stream.push(PROTOCOL_VERSION + 1);
    stream.extend_from_slice(&sequence.to_be_bytes());
    stream.extend(std::iter::repeat(0xEEu8).take(FRAME_DATA_LEN));
    stream.extend(std::iter::repeat(0u8).take(FRAME_SIZE - FRAME_DATASIZE));
}

/// Builds the wire-format byte stream for one packet, splitting `payload`
/// across as many consecutive frames (starting at `start_seq`) as needed.
/// Returns the stream plus the sequence number one past the last frame
/// written, so callers can chain further frames afterward.
pub fn build_packet_stream(
    fields: &PacketFields,
    payload: &[u8],
    start_seq: u16,
) -> (Vec<u8>, u16) {
    let mut stream = Vec::new();
    let length = PACKET_HEADERSIZE + payload.len() as u16;

    let mut first = [0u8; FRAME_DATA_LEN];
    first[0] = PROTOCOL_VERSION;
    first[1] = fields.payload_id;
    first[2..4].copy_from_slice(&length.to_be_bytes());
    first[4..8].copy_from_slice(&fields.latitude.to_be_bytes());
    first[8..12].copy_from_slice(&fields.longitude.to_be_bytes());
    let altitude_bytes = fields.altitude.to_be_bytes();
    let first_chunk_len = payload.len().min(FIRST_FRAME_PAYLOAD_CAP);
    first[12..14].copy_from_slice(&altitude_bytes);
    first[14..14 + first_chunk_len].copy_from_slice(&payload[..first_chunk_len]);

    let mut seq = start_seq;
    push_frame(&mut stream, seq, &first);
    seq = seq.wrapping_add(1);

    let mut offset = first_chunk_len;
    while offset < payload.len() {
        let chunk_len = (payload.len() - offset).min(FRAME_DATA_LEN);
        let mut data = [0u8; FRAME_DATA_LEN];
        data[..chunk_len].copy_from_slice(&payload[offset..offset + chunk_len]);
        push_frame(&mut stream, seq, &data);
        seq = seq.wrapping_add(1);
        offset += chunk_len;
    }

    (stream, seq)
}
