use super::BytePacketBuffer;

#[derive(Debug)]
pub enum ReaderError {
    EndOfBuffer,
    TooManyJumps(usize),
    InvalidClass(u16),
    InvalidRecordLength { expected: u16, found: usize },
}

impl std::fmt::Display for ReaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EndOfBuffer => write!(f, "reading out of buffer"),
            Self::TooManyJumps(size) => write!(f, "too many jumps when reading: {size}"),
            Self::InvalidClass(value) => write!(f, "invalid class: {value}"),
            Self::InvalidRecordLength { expected, found } => write!(
                f,
                "record data length mismatch: expected {expected}, found {found}"
            ),
        }
    }
}

impl std::error::Error for ReaderError {}

const MAX_JUMPS: usize = 5;

impl BytePacketBuffer {
    /// Step the buffer position forward a specific number of steps
    pub fn step(&mut self, steps: usize) -> Result<(), ReaderError> {
        if self.pos + steps > self.buf.len() {
            return Err(ReaderError::EndOfBuffer);
        }
        self.pos += steps;

        Ok(())
    }

    /// Change the buffer position
    fn seek(&mut self, pos: usize) -> Result<(), ReaderError> {
        if pos > self.buf.len() {
            return Err(ReaderError::EndOfBuffer);
        }
        self.pos = pos;

        Ok(())
    }

    /// Read a single byte and move the position one step forward
    pub fn read(&mut self) -> Result<u8, ReaderError> {
        let res = self.get(self.pos)?;
        self.pos += 1;

        Ok(res)
    }

    /// Get a single byte, without changing the buffer position
    fn get(&self, pos: usize) -> Result<u8, ReaderError> {
        self.buf.get(pos).copied().ok_or(ReaderError::EndOfBuffer)
    }

    /// Get a range of bytes
    pub fn get_range(&self, start: usize, len: usize) -> Result<&[u8], ReaderError> {
        self.buf
            .get(start..start + len)
            .ok_or(ReaderError::EndOfBuffer)
    }

    /// Read `len` bytes, stepping forward accordingly
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, ReaderError> {
        let res = self.get_range(self.pos, len)?.to_vec();
        self.pos += len;

        Ok(res)
    }

    /// Read two bytes, stepping two steps forward
    pub fn read_u16(&mut self) -> Result<u16, ReaderError> {
        let res = ((self.read()? as u16) << 8) | (self.read()? as u16);

        Ok(res)
    }

    /// Read four bytes, stepping four steps forward
    pub fn read_u32(&mut self) -> Result<u32, ReaderError> {
        let res = ((self.read()? as u32) << 24)
            | ((self.read()? as u32) << 16)
            | ((self.read()? as u32) << 8)
            | (self.read()? as u32);

        Ok(res)
    }

    /// Read a qname
    ///
    /// Turns `[3]www[7]example[3]org[0]` into `www.example.org`, following
    /// compression pointers along the way. The shared position ends up right
    /// after the name as it is written at the current offset, not after the
    /// label a pointer led to.
    pub fn read_qname(&mut self) -> Result<String, ReaderError> {
        let mut pos = self.pos();

        let mut jumped = false;
        let mut jumps_performed = 0;

        let mut sections: Vec<String> = Vec::new();

        loop {
            // Packets come from the network, a pointer cycle must not hang us.
            if jumps_performed > MAX_JUMPS {
                return Err(ReaderError::TooManyJumps(MAX_JUMPS));
            }

            let len = self.get(pos)?;

            // Two most significant bits set: pointer to another offset
            if (len & 0xC0) == 0xC0 {
                if !jumped {
                    self.seek(pos + 2)?;
                }

                let b2 = self.get(pos + 1)? as u16;
                pos = ((((len as u16) ^ 0xC0) << 8) | b2) as usize;

                jumped = true;
                jumps_performed += 1;

                continue;
            }

            pos += 1;

            // Root label ends the name
            if len == 0 {
                break;
            }

            let str_buffer = self.get_range(pos, len as usize)?;
            sections.push(String::from_utf8_lossy(str_buffer).into_owned());

            pos += len as usize;
        }

        if !jumped {
            self.seek(pos)?;
        }

        Ok(sections.join("."))
    }
}

#[cfg(test)]
mod tests {
    use crate::buffer::{BytePacketBuffer, ReaderError};

    #[test]
    fn should_read_simple_qname() {
        let mut buffer =
            BytePacketBuffer::from(&b"\x03www\x07example\x03org\x00\x12\x34"[..]);
        assert_eq!(buffer.read_qname().unwrap(), "www.example.org");
        assert_eq!(buffer.pos, 17);
        assert_eq!(buffer.read_u16().unwrap(), 0x1234);
    }

    #[test]
    fn should_read_qname_with_pointer() {
        let mut buffer =
            BytePacketBuffer::from(&b"\x07example\x03org\x00\x03ns1\xC0\x00\xFF"[..]);
        assert_eq!(buffer.read_qname().unwrap(), "example.org");
        assert_eq!(buffer.read_qname().unwrap(), "ns1.example.org");
        assert_eq!(buffer.pos, 19);
        assert_eq!(buffer.read().unwrap(), 0xFF);
    }

    #[test]
    fn should_keep_label_case() {
        let mut buffer = BytePacketBuffer::from(&b"\x07ExAmPlE\x03ORG\x00"[..]);
        assert_eq!(buffer.read_qname().unwrap(), "ExAmPlE.ORG");
    }

    #[test]
    fn should_fail_on_pointer_loop() {
        let mut buffer = BytePacketBuffer::from(&b"\xC0\x00"[..]);
        assert!(matches!(
            buffer.read_qname(),
            Err(ReaderError::TooManyJumps(_))
        ));
    }

    #[test]
    fn should_fail_on_truncated_label() {
        let mut buffer = BytePacketBuffer::from(&b"\x07exam"[..]);
        assert!(matches!(buffer.read_qname(), Err(ReaderError::EndOfBuffer)));
    }

    #[test]
    fn should_fail_reading_past_the_end() {
        let mut buffer = BytePacketBuffer::from(&b"\x01"[..]);
        assert!(matches!(buffer.read_u16(), Err(ReaderError::EndOfBuffer)));
        assert!(buffer.step(10).is_err());
    }
}
