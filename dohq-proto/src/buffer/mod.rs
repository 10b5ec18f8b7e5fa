use std::collections::HashMap;

pub mod reader;
pub mod writer;

pub use reader::ReaderError;
pub use writer::WriterError;

/// Largest message a DoH exchange can carry, bounded by the 16 bit length
/// used by DNS over streams.
pub const MAX_PACKET_SIZE: usize = 65_535;

#[derive(Clone, Debug, Default)]
pub struct BytePacketBuffer {
    pub buf: Vec<u8>,
    pub pos: usize,
    writing_labels: HashMap<String, usize>,
}

impl From<Vec<u8>> for BytePacketBuffer {
    fn from(buf: Vec<u8>) -> Self {
        Self {
            buf,
            pos: 0,
            writing_labels: HashMap::default(),
        }
    }
}

impl From<&[u8]> for BytePacketBuffer {
    fn from(value: &[u8]) -> Self {
        Self::from(value.to_vec())
    }
}

impl BytePacketBuffer {
    /// Current position within buffer
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Bytes written so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
