use chrono::Utc;
use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use std::io::BufWriter;
use wifi_clients::config::Args;
use wifi_clients::output::write_store;
use wifi_clients::snmp::SnmpSession;
use wifi_clients::wireless::poll_clients;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    wifi_clients::logging::init(args.verbose);

    let config = args.session_config().await?;
    let session = SnmpSession::open(&config).await?;

    let polled_at = Utc::now();
    let store = poll_clients(&session)
        .await
        .wrap_err_with(|| format!("polling {} failed", session.target()))?;

    // Nothing is printed unless the whole poll succeeded
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_store(
        &mut out,
        &store,
        args.format,
        &session.target().to_string(),
        polled_at,
    )?;

    Ok(())
}
