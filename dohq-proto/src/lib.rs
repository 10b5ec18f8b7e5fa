pub mod buffer;
pub mod packet;

pub use buffer::{BytePacketBuffer, ReaderError, WriterError};
pub use packet::header::{Header, ResponseCode};
pub use packet::question::{DnsClass, Question};
pub use packet::record::Record;
pub use packet::{DnsPacket, QueryType};

#[cfg(test)]
mod tests {
    use crate::{DnsPacket, Header, QueryType, Question, Record, ResponseCode, WriterError};
    use similar_asserts::assert_eq;
    use std::net::Ipv4Addr;

    // www.example.org A, answered through a CNAME, captured from a resolver
    const CNAME_RESPONSE: &[u8] = &[
        0x00, 0x00, 0x81, 0x80, 0x00, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, // header
        0x03, b'w', b'w', b'w', 0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'o', b'r',
        b'g', 0x00, 0x00, 0x01, 0x00, 0x01, // question
        0xC0, 0x0C, 0x00, 0x05, 0x00, 0x01, 0x00, 0x00, 0x00, 0x3C, 0x00, 0x02, 0xC0, 0x10, // cname
        0xC0, 0x10, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x3C, 0x00, 0x04, 0x5D, 0xB8,
        0xD7, 0x0E, // a
    ];

    #[test]
    fn should_read_response_packet() {
        let packet = DnsPacket::try_from(CNAME_RESPONSE).unwrap();
        assert_eq!(packet.header.id, 0);
        assert!(packet.header.response);
        assert!(packet.header.recursion_desired);
        assert!(!packet.header.truncated_message);
        assert_eq!(packet.header.response_code, ResponseCode::NoError);

        assert_eq!(
            packet.questions,
            vec![Question::new("www.example.org", QueryType::A)]
        );
        assert_eq!(
            packet.answers,
            vec![
                Record::CNAME {
                    domain: "www.example.org".into(),
                    host: "example.org".into(),
                    ttl: 60,
                },
                Record::A {
                    domain: "example.org".into(),
                    addr: Ipv4Addr::new(93, 184, 215, 14),
                    ttl: 60,
                },
            ]
        );
        assert!(packet.authorities.is_empty());
        assert!(packet.resources.is_empty());
    }

    #[test]
    fn should_write_query_packet() {
        let buffer = DnsPacket::query(0, "example.org", QueryType::A)
            .create_buffer()
            .unwrap();
        assert_eq!(
            buffer.as_bytes(),
            b"\x00\x00\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\x07example\x03org\x00\x00\x01\x00\x01"
        );
    }

    #[test]
    fn should_read_back_written_response() {
        let request = DnsPacket::query(7, "example.org", QueryType::TXT);
        let response = DnsPacket::response_from(&request)
            .with_answer(Record::TXT {
                domain: "example.org".into(),
                data: vec![b"v=spf1 -all".to_vec()],
                ttl: 300,
            })
            .with_authority(Record::NS {
                domain: "example.org".into(),
                host: "a.iana-servers.net".into(),
                ttl: 300,
            });
        let buffer = response.create_buffer().unwrap();
        let decoded = DnsPacket::try_from(buffer.as_bytes()).unwrap();
        assert_eq!(decoded, response);
        assert_eq!(decoded.header, Header::response_from(&request.header));
    }

    #[test]
    fn should_fail_on_truncated_packet() {
        assert!(DnsPacket::try_from(&CNAME_RESPONSE[..40]).is_err());
    }

    #[test]
    fn should_refuse_query_with_empty_label() {
        for name in ["a..b", "example.org.."] {
            assert!(matches!(
                DnsPacket::query(0, name, QueryType::A).create_buffer(),
                Err(WriterError::EmptyLabel)
            ));
        }
    }

    #[test]
    fn should_write_back_response_with_unknown_record() {
        let packet = DnsPacket::response_from(&DnsPacket::query(0, "example.org", QueryType::A))
            .with_answer(Record::Unknown {
                domain: "example.org".into(),
                qtype: 28,
                class: 1,
                data: vec![0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
                ttl: 60,
            })
            .with_answer(Record::A {
                domain: "example.org".into(),
                addr: Ipv4Addr::new(93, 184, 215, 14),
                ttl: 60,
            });
        let buffer = packet.create_buffer().unwrap();
        let decoded = DnsPacket::try_from(buffer).unwrap();
        assert_eq!(decoded.answers, packet.answers);
    }
}
