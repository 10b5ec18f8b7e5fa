use super::{BytePacketBuffer, MAX_PACKET_SIZE};

#[derive(Debug)]
pub enum WriterError {
    EndOfBuffer,
    EmptyLabel,
    LabelTooLong(usize),
    CharacterStringTooLong(usize),
}

impl std::fmt::Display for WriterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EndOfBuffer => write!(f, "writing out of buffer"),
            Self::EmptyLabel => write!(f, "empty label when writing"),
            Self::LabelTooLong(len) => write!(f, "single label too long when writing: {len}"),
            Self::CharacterStringTooLong(len) => {
                write!(f, "character string too long when writing: {len}")
            }
        }
    }
}

impl std::error::Error for WriterError {}

impl BytePacketBuffer {
    fn set(&mut self, pos: usize, val: u8) -> Result<(), WriterError> {
        match self.buf.get_mut(pos) {
            Some(slot) => {
                *slot = val;
                Ok(())
            }
            None => Err(WriterError::EndOfBuffer),
        }
    }

    pub fn set_u16(&mut self, pos: usize, val: u16) -> Result<(), WriterError> {
        self.set(pos, (val >> 8) as u8)?;
        self.set(pos + 1, (val & 0xFF) as u8)?;

        Ok(())
    }

    fn write(&mut self, val: u8) -> Result<(), WriterError> {
        if self.pos >= MAX_PACKET_SIZE {
            return Err(WriterError::EndOfBuffer);
        }
        if self.pos < self.buf.len() {
            self.buf[self.pos] = val;
        } else {
            self.buf.push(val);
        }
        self.pos += 1;
        Ok(())
    }

    pub fn write_u8(&mut self, val: u8) -> Result<(), WriterError> {
        self.write(val)
    }

    pub fn write_u16(&mut self, val: u16) -> Result<(), WriterError> {
        self.write((val >> 8) as u8)?;
        self.write((val & 0xFF) as u8)?;

        Ok(())
    }

    pub fn write_u32(&mut self, val: u32) -> Result<(), WriterError> {
        self.write(((val >> 24) & 0xFF) as u8)?;
        self.write(((val >> 16) & 0xFF) as u8)?;
        self.write(((val >> 8) & 0xFF) as u8)?;
        self.write((val & 0xFF) as u8)?;

        Ok(())
    }

    /// Write a `<character-string>`, a length octet followed by at most 255 bytes
    pub fn write_character_string(&mut self, value: &[u8]) -> Result<(), WriterError> {
        if value.len() > 0xff {
            return Err(WriterError::CharacterStringTooLong(value.len()));
        }
        self.write_u8(value.len() as u8)?;
        for b in value {
            self.write_u8(*b)?;
        }
        Ok(())
    }

    fn write_label(&mut self, label: &str) -> Result<(), WriterError> {
        // a zero length octet is the root label, it would end the name early
        if label.is_empty() {
            return Err(WriterError::EmptyLabel);
        }
        if label.len() > 0x3f {
            return Err(WriterError::LabelTooLong(label.len()));
        }
        self.write_character_string(label.as_bytes())
    }

    fn recursive_write_qname(&mut self, qname: &str) -> Result<bool, WriterError> {
        if let Some(index) = self.writing_labels.get(qname) {
            self.write_u16(0xC000 | (*index as u16))?;
            Ok(true)
        } else {
            // pointers only have 14 bits of offset
            if self.pos() < 0x4000 {
                self.writing_labels.insert(qname.to_string(), self.pos());
            }
            if let Some((head, tail)) = qname.split_once('.') {
                self.write_label(head)?;
                self.recursive_write_qname(tail)
            } else {
                self.write_label(qname)?;
                Ok(false)
            }
        }
    }

    /// Write a qname, reusing the suffixes already written through pointers.
    /// A trailing dot is accepted and ignored.
    pub fn write_qname(&mut self, qname: &str) -> Result<(), WriterError> {
        let qname = qname.strip_suffix('.').unwrap_or(qname);
        if qname.is_empty() {
            return self.write_u8(0);
        }
        if qname.split('.').any(str::is_empty) {
            return Err(WriterError::EmptyLabel);
        }
        if !self.recursive_write_qname(qname)? {
            self.write_u8(0)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::buffer::{BytePacketBuffer, WriterError};

    #[test]
    fn should_write_root_qname() {
        let mut buffer = BytePacketBuffer::default();
        buffer.write_qname("").unwrap();
        assert_eq!(buffer.as_bytes(), &[0]);
    }

    #[test]
    fn should_write_simple_qname() {
        let mut buffer = BytePacketBuffer::default();
        buffer.write_qname("www.foo.bar").unwrap();
        assert_eq!(buffer.as_bytes(), b"\x03www\x03foo\x03bar\x00");
        assert_eq!(buffer.pos, 13);
    }

    #[test]
    fn should_ignore_trailing_dot() {
        let mut buffer = BytePacketBuffer::default();
        buffer.write_qname("foo.bar.").unwrap();
        assert_eq!(buffer.as_bytes(), b"\x03foo\x03bar\x00");
    }

    #[test]
    fn should_write_qname_with_redirect() {
        let mut buffer = BytePacketBuffer::default();
        buffer.write_qname("www.foo.bar").unwrap();
        buffer.write_qname("what.foo.bar").unwrap();
        assert_eq!(&buffer.as_bytes()[13..], b"\x04what\xC0\x04");
        assert_eq!(buffer.pos, 20);
    }

    #[test]
    fn should_reject_long_label() {
        let mut buffer = BytePacketBuffer::default();
        let label = "a".repeat(64);
        assert!(matches!(
            buffer.write_qname(&label),
            Err(WriterError::LabelTooLong(64))
        ));
    }

    #[test]
    fn should_reject_empty_label() {
        let mut buffer = BytePacketBuffer::default();
        assert!(matches!(
            buffer.write_qname("a..b"),
            Err(WriterError::EmptyLabel)
        ));
        assert!(buffer.as_bytes().is_empty());
    }

    #[test]
    fn should_reject_doubled_trailing_dot() {
        let mut buffer = BytePacketBuffer::default();
        assert!(matches!(
            buffer.write_qname("example.org.."),
            Err(WriterError::EmptyLabel)
        ));
        assert!(matches!(
            buffer.write_qname(".example.org"),
            Err(WriterError::EmptyLabel)
        ));
    }

    #[test]
    fn should_patch_written_u16() {
        let mut buffer = BytePacketBuffer::default();
        buffer.write_u16(0).unwrap();
        buffer.write_u8(42).unwrap();
        buffer.set_u16(0, 0xABCD).unwrap();
        assert_eq!(buffer.as_bytes(), &[0xAB, 0xCD, 42]);
        assert!(buffer.set_u16(2, 1).is_err());
    }
}
