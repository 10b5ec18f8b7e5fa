use clap::Args;
use dohq_resolver::{RecordType, Resolver};

/// Resolves the domain with the operation matching the record type
async fn resolve(resolver: &dyn Resolver, record_type: RecordType, domain: &str) -> Vec<String> {
    match record_type {
        RecordType::A => resolver.a(domain).await,
        RecordType::CNAME => resolver.cname(domain).await,
        RecordType::NS => resolver.ns(domain).await,
        RecordType::TXT => resolver.txt(domain).await,
    }
}

#[derive(Args, Debug)]
pub struct Command {
    /// Domain name to look up
    domain: String,
}

impl Command {
    fn print(lines: &[String]) {
        for line in lines {
            println!("{line}");
        }
    }

    pub async fn run(&self, resolver: &dyn Resolver, record_type: RecordType) -> usize {
        tracing::debug!("looking up {record_type} for {}", self.domain);
        let records = resolve(resolver, record_type, &self.domain).await;
        if records.is_empty() {
            tracing::info!("no {record_type} record found for {}", self.domain);
        }
        Self::print(&records);
        records.len()
    }

    pub async fn run_all(&self, resolver: &dyn Resolver) -> usize {
        let lines = self.collect_all(resolver).await;
        if lines.is_empty() {
            tracing::info!("no record found for {}", self.domain);
        }
        Self::print(&lines);
        lines.len()
    }

    async fn collect_all(&self, resolver: &dyn Resolver) -> Vec<String> {
        let found = futures::future::join_all(
            RecordType::ALL
                .iter()
                .map(|record_type| resolve(resolver, *record_type, &self.domain)),
        )
        .await;

        RecordType::ALL
            .iter()
            .zip(found)
            .flat_map(|(record_type, records)| {
                records
                    .into_iter()
                    .map(move |record| format!("{record_type}\t{record}"))
            })
            .collect()
    }
}
