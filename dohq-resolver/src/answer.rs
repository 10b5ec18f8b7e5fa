use crate::prelude::RecordType;
use dohq_proto::Record;

/// Joins the character strings of a TXT record into the single value they
/// were split from.
pub fn combine_txt(chunks: &[Vec<u8>]) -> String {
    String::from_utf8_lossy(&chunks.concat()).into_owned()
}

/// One string per answer of the requested type. Records of another type,
/// like the CNAME preceding the addresses of an alias, are left out.
pub fn normalize(record_type: RecordType, answers: Vec<Record>) -> Vec<String> {
    answers
        .into_iter()
        .filter_map(|record| match (record_type, record) {
            (RecordType::A, Record::A { addr, .. }) => Some(addr.to_string()),
            (RecordType::CNAME, Record::CNAME { host, .. }) => Some(host),
            (RecordType::NS, Record::NS { host, .. }) => Some(host),
            (RecordType::TXT, Record::TXT { data, .. }) => Some(combine_txt(&data)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{combine_txt, normalize};
    use crate::prelude::RecordType;
    use dohq_proto::Record;
    use similar_asserts::assert_eq;
    use std::net::Ipv4Addr;

    #[test]
    fn should_join_txt_chunks() {
        let chunks = vec![b"1|".to_vec(), b"www.example.org".to_vec()];
        assert_eq!(combine_txt(&chunks), "1|www.example.org");
    }

    #[test]
    fn should_replace_invalid_utf8() {
        assert_eq!(combine_txt(&[vec![b'o', 0xFF, b'k']]), "o\u{FFFD}k");
        assert_eq!(combine_txt(&[]), "");
    }

    #[test]
    fn should_keep_one_entry_per_txt_record() {
        let answers = vec![
            Record::TXT {
                domain: "example.org".into(),
                data: vec![b"1|".to_vec(), b"www.example.org".to_vec()],
                ttl: 300,
            },
            Record::TXT {
                domain: "example.org".into(),
                data: vec![b"v=spf1 -all".to_vec()],
                ttl: 300,
            },
        ];
        assert_eq!(
            normalize(RecordType::TXT, answers),
            vec!["1|www.example.org".to_string(), "v=spf1 -all".to_string()]
        );
    }

    #[test]
    fn should_skip_alias_records() {
        let answers = vec![
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
        ];
        assert_eq!(
            normalize(RecordType::A, answers.clone()),
            vec!["93.184.215.14".to_string()]
        );
        assert_eq!(
            normalize(RecordType::CNAME, answers),
            vec!["example.org".to_string()]
        );
    }
}
