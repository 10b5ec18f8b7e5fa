use crate::buffer::{BytePacketBuffer, ReaderError, WriterError};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ResponseCode {
    /// No error condition
    #[default]
    NoError = 0,
    /// The name server was unable to interpret the query.
    FormatError = 1,
    /// The name server was unable to process this query due to a problem with the name server.
    ServerFailure = 2,
    /// The domain name referenced in the query does not exist (NXDOMAIN).
    NameError = 3,
    /// The name server does not support the requested kind of query.
    NotImplemented = 4,
    /// The name server refuses to perform the specified operation for policy reasons.
    Refused = 5,
}

impl ResponseCode {
    /// Codes outside of RFC 1035 are read as `ServerFailure`
    pub fn from_num(num: u8) -> ResponseCode {
        match num {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormatError,
            2 => ResponseCode::ServerFailure,
            3 => ResponseCode::NameError,
            4 => ResponseCode::NotImplemented,
            5 => ResponseCode::Refused,
            _ => ResponseCode::ServerFailure,
        }
    }
}

/// Message header, without the section counts which are derived from the
/// packet content when writing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    /// Identifier copied from the query into the reply.
    pub id: u16,

    /// RD, directs the name server to pursue the query recursively.
    pub recursion_desired: bool,
    /// TC, the message was truncated by the transmission channel.
    pub truncated_message: bool,
    /// AA, the responding name server is an authority for the name in question.
    pub authoritative_answer: bool,
    /// Kind of query, 0 being a standard query.
    pub opcode: u8,
    /// QR, whether this message is a query (false) or a response (true).
    pub response: bool,

    pub response_code: ResponseCode,
    pub checking_disabled: bool,
    pub authed_data: bool,
    /// Z, reserved.
    pub z: bool,
    /// RA, recursive query support is available in the name server.
    pub recursion_available: bool,
}

impl Header {
    /// Header of a standard query asking for recursion.
    pub fn question(id: u16) -> Self {
        Self {
            id,
            recursion_desired: true,
            ..Default::default()
        }
    }

    pub fn response(id: u16) -> Self {
        Self {
            id,
            response: true,
            recursion_desired: true,
            recursion_available: true,
            ..Default::default()
        }
    }

    pub fn response_from(request: &Self) -> Self {
        Self {
            opcode: request.opcode,
            recursion_desired: request.recursion_desired,
            ..Self::response(request.id)
        }
    }

    pub fn read(buffer: &mut BytePacketBuffer) -> Result<Self, ReaderError> {
        let id = buffer.read_u16()?;

        let head = buffer.read()?;
        let tail = buffer.read()?;

        Ok(Self {
            id,
            recursion_desired: (head & (1 << 0)) > 0,
            truncated_message: (head & (1 << 1)) > 0,
            authoritative_answer: (head & (1 << 2)) > 0,
            opcode: (head >> 3) & 0x0F,
            response: (head & (1 << 7)) > 0,
            response_code: ResponseCode::from_num(tail & 0x0F),
            checking_disabled: (tail & (1 << 4)) > 0,
            authed_data: (tail & (1 << 5)) > 0,
            z: (tail & (1 << 6)) > 0,
            recursion_available: (tail & (1 << 7)) > 0,
        })
    }

    pub fn write(&self, buffer: &mut BytePacketBuffer) -> Result<(), WriterError> {
        buffer.write_u16(self.id)?;

        buffer.write_u8(
            (self.recursion_desired as u8)
                | ((self.truncated_message as u8) << 1)
                | ((self.authoritative_answer as u8) << 2)
                | ((self.opcode & 0x0F) << 3)
                | ((self.response as u8) << 7),
        )?;

        buffer.write_u8(
            (self.response_code as u8)
                | ((self.checking_disabled as u8) << 4)
                | ((self.authed_data as u8) << 5)
                | ((self.z as u8) << 6)
                | ((self.recursion_available as u8) << 7),
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Header, ResponseCode};
    use crate::buffer::BytePacketBuffer;

    #[test]
    fn should_write_question_flags() {
        let mut buffer = BytePacketBuffer::default();
        Header::question(0x1234).write(&mut buffer).unwrap();
        assert_eq!(buffer.as_bytes(), &[0x12, 0x34, 0x01, 0x00]);
    }

    #[test]
    fn should_read_response_flags() {
        let mut buffer = BytePacketBuffer::from(&[0x00u8, 0x00, 0x81, 0x83][..]);
        let header = Header::read(&mut buffer).unwrap();
        assert!(header.response);
        assert!(header.recursion_desired);
        assert!(header.recursion_available);
        assert_eq!(header.response_code, ResponseCode::NameError);
    }
}
