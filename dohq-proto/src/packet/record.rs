use super::QueryType;
use crate::buffer::{BytePacketBuffer, ReaderError, WriterError};
use std::net::Ipv4Addr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(clippy::upper_case_acronyms)]
pub enum Record {
    /// Any other type, RDATA kept as is so the record can be written back
    Unknown {
        domain: String,
        qtype: u16,
        class: u16,
        data: Vec<u8>,
        ttl: u32,
    }, // 0
    A {
        domain: String,
        addr: Ipv4Addr,
        ttl: u32,
    }, // 1
    NS {
        domain: String,
        host: String,
        ttl: u32,
    }, // 2
    CNAME {
        domain: String,
        host: String,
        ttl: u32,
    }, // 5
    /// One or more `<character-string>` as they were on the wire
    TXT {
        domain: String,
        data: Vec<Vec<u8>>,
        ttl: u32,
    }, // 16
}

impl Record {
    pub fn read(buffer: &mut BytePacketBuffer) -> Result<Record, ReaderError> {
        let domain = buffer.read_qname()?;

        let qtype_num = buffer.read_u16()?;
        let qtype = QueryType::from_num(qtype_num);
        let class = buffer.read_u16()?;
        let ttl = buffer.read_u32()?;
        // RDLENGTH, size of the record specific data that follows
        let data_len = buffer.read_u16()?;
        let start = buffer.pos();
        let end = start + data_len as usize;

        let record = match qtype {
            QueryType::A => {
                let raw_addr = buffer.read_u32()?;
                Record::A {
                    domain,
                    addr: Ipv4Addr::from(raw_addr),
                    ttl,
                }
            }
            QueryType::NS => {
                let host = buffer.read_qname()?;
                Record::NS { domain, host, ttl }
            }
            QueryType::CNAME => {
                let host = buffer.read_qname()?;
                Record::CNAME { domain, host, ttl }
            }
            QueryType::TXT => {
                let mut data = Vec::new();
                while buffer.pos() < end {
                    let len = buffer.read()? as usize;
                    data.push(buffer.read_bytes(len)?);
                }
                Record::TXT { domain, data, ttl }
            }
            QueryType::Unknown(_) => Record::Unknown {
                domain,
                qtype: qtype_num,
                class,
                data: buffer.read_bytes(data_len as usize)?,
                ttl,
            },
        };

        if buffer.pos() != end {
            return Err(ReaderError::InvalidRecordLength {
                expected: data_len,
                found: buffer.pos() - start,
            });
        }

        Ok(record)
    }

    fn write_preamble(
        buffer: &mut BytePacketBuffer,
        domain: &str,
        qtype: QueryType,
        class: u16,
        ttl: u32,
    ) -> Result<(), WriterError> {
        buffer.write_qname(domain)?;
        buffer.write_u16(qtype.into_num())?;
        buffer.write_u16(class)?;
        buffer.write_u32(ttl)?;
        Ok(())
    }

    /// Writes the record data behind a length placeholder that gets patched
    /// once the size is known.
    fn write_sized<F>(buffer: &mut BytePacketBuffer, inner: F) -> Result<(), WriterError>
    where
        F: FnOnce(&mut BytePacketBuffer) -> Result<(), WriterError>,
    {
        let pos = buffer.pos();
        buffer.write_u16(0)?;

        inner(buffer)?;

        let size = buffer.pos() - (pos + 2);
        buffer.set_u16(pos, size as u16)
    }

    pub fn write(&self, buffer: &mut BytePacketBuffer) -> Result<usize, WriterError> {
        let start_pos = buffer.pos();

        match self {
            Record::A { domain, addr, ttl } => {
                Self::write_preamble(buffer, domain, QueryType::A, 1, *ttl)?;
                buffer.write_u16(4)?;
                for octet in addr.octets() {
                    buffer.write_u8(octet)?;
                }
            }
            Record::NS { domain, host, ttl } => {
                Self::write_preamble(buffer, domain, QueryType::NS, 1, *ttl)?;
                Self::write_sized(buffer, |buffer| buffer.write_qname(host))?;
            }
            Record::CNAME { domain, host, ttl } => {
                Self::write_preamble(buffer, domain, QueryType::CNAME, 1, *ttl)?;
                Self::write_sized(buffer, |buffer| buffer.write_qname(host))?;
            }
            Record::TXT { domain, data, ttl } => {
                Self::write_preamble(buffer, domain, QueryType::TXT, 1, *ttl)?;
                Self::write_sized(buffer, |buffer| {
                    for chunk in data {
                        buffer.write_character_string(chunk)?;
                    }
                    Ok(())
                })?;
            }
            Record::Unknown {
                domain,
                qtype,
                class,
                data,
                ttl,
            } => {
                Self::write_preamble(buffer, domain, QueryType::Unknown(*qtype), *class, *ttl)?;
                Self::write_sized(buffer, |buffer| {
                    for b in data {
                        buffer.write_u8(*b)?;
                    }
                    Ok(())
                })?;
            }
        }

        Ok(buffer.pos() - start_pos)
    }
}
