use clap::Parser;
use std::process::ExitCode;

mod cmd;
mod config;
mod resolver;

fn init_logs() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, registry, EnvFilter};

    let _ = registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("{}=info,dohq_resolver=warn", env!("CARGO_PKG_NAME")).into()
        }))
        .with(
            fmt::layer()
                .with_ansi(cfg!(debug_assertions))
                .with_writer(std::io::stderr),
        )
        .try_init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logs();

    match cmd::Args::parse().run().await {
        Ok(0) => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::from(2)
        }
    }
}
