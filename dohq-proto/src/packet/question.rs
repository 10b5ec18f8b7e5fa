use super::QueryType;
use crate::buffer::{BytePacketBuffer, ReaderError, WriterError};

/// CLASS fields appear in resource records.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(u16)]
pub enum DnsClass {
    /// IN - the Internet
    #[default]
    Internet = 1,
    /// CS - the CSNET class (Obsolete - used only for examples in some obsolete RFCs)
    Csnet = 2,
    /// CH - the CHAOS class
    Chaos = 3,
    /// HS - Hesiod [Dyer 87]
    Hesiod = 4,
}

impl TryFrom<u16> for DnsClass {
    type Error = ReaderError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Internet),
            2 => Ok(Self::Csnet),
            3 => Ok(Self::Chaos),
            4 => Ok(Self::Hesiod),
            other => Err(ReaderError::InvalidClass(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// QNAME, the domain name the question is about.
    pub name: String,
    /// QTYPE, the type of record asked for.
    pub qtype: QueryType,
    /// QCLASS, IN for anything on the Internet.
    pub qclass: DnsClass,
}

impl Question {
    pub fn new<N: Into<String>>(name: N, qtype: QueryType) -> Self {
        Self {
            name: name.into(),
            qtype,
            qclass: DnsClass::default(),
        }
    }

    pub fn read(buffer: &mut BytePacketBuffer) -> Result<Self, ReaderError> {
        let name = buffer.read_qname()?;
        let qtype = QueryType::from_num(buffer.read_u16()?);
        let qclass = DnsClass::try_from(buffer.read_u16()?)?;

        Ok(Self {
            name,
            qtype,
            qclass,
        })
    }

    pub fn write(&self, buffer: &mut BytePacketBuffer) -> Result<(), WriterError> {
        buffer.write_qname(&self.name)?;
        buffer.write_u16(self.qtype.into_num())?;
        buffer.write_u16(self.qclass as u16)?;

        Ok(())
    }
}
