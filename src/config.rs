//! Command-line configuration

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::Parser;

use crate::error::PollError;
use crate::output::OutputFormat;
use crate::snmp::{SessionConfig, SnmpVersion};

#[derive(Parser, Debug, Clone)]
#[command(name = "wifi-clients")]
#[command(author = "Aviv E")]
#[command(version = "0.1.0")]
#[command(about = "List the wireless clients registered on a MikroTik board via SNMP")]
pub struct Args {
    /// Device address (IP, hostname, or host:port)
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Read community
    #[arg(short, long, default_value = "public")]
    pub community: String,

    /// SNMP version
    #[arg(short = 's', long = "snmp-version", value_enum, default_value_t = SnmpVersion::V1)]
    pub snmp_version: SnmpVersion,

    /// UDP port used when TARGET has none
    #[arg(short, long, default_value = "161")]
    pub port: u16,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value = "1")]
    pub timeout: u64,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Lines)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub async fn session_config(&self) -> Result<SessionConfig, PollError> {
        Ok(SessionConfig {
            target: resolve_target(&self.target, self.port).await?,
            version: self.snmp_version,
            community: self.community.clone(),
            timeout: Duration::from_secs(self.timeout),
        })
    }
}

/// First address for `target`; `port` applies when `target` carries none
pub async fn resolve_target(target: &str, port: u16) -> Result<SocketAddr, PollError> {
    if let Ok(addr) = target.parse::<SocketAddr>() {
        return Ok(addr);
    }
    let bare = target.trim_start_matches('[').trim_end_matches(']');
    if let Ok(ip) = bare.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, port));
    }

    let query = if target.contains(':') {
        target.to_string()
    } else {
        format!("{}:{}", target, port)
    };
    let mut addrs = tokio::net::lookup_host(&query)
        .await
        .map_err(|e| PollError::Resolve {
            target: target.to_string(),
            reason: e.to_string(),
        })?;
    addrs.next().ok_or_else(|| PollError::Resolve {
        target: target.to_string(),
        reason: "no addresses found".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_version_flags_are_distinct() {
        let err = Args::try_parse_from(["wifi-clients", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);

        let args =
            Args::try_parse_from(["wifi-clients", "--snmp-version", "v2c", "router"]).unwrap();
        assert_eq!(args.snmp_version, SnmpVersion::V2c);
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["wifi-clients", "192.168.88.1"]).unwrap();
        assert_eq!(args.target, "192.168.88.1");
        assert_eq!(args.community, "public");
        assert_eq!(args.snmp_version, SnmpVersion::V1);
        assert_eq!(args.port, 161);
        assert_eq!(args.timeout, 1);
        assert_eq!(args.format, OutputFormat::Lines);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_target_is_required() {
        assert!(Args::try_parse_from(["wifi-clients"]).is_err());
    }

    #[test]
    fn test_options() {
        let args = Args::try_parse_from([
            "wifi-clients", "-c", "private", "-s", "v2c", "-f", "json", "-vv", "router",
        ])
        .unwrap();
        assert_eq!(args.community, "private");
        assert_eq!(args.snmp_version, SnmpVersion::V2c);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.verbose, 2);
    }

    #[tokio::test]
    async fn test_resolve_literal_addresses() {
        let addr = resolve_target("10.0.0.1", 161).await.unwrap();
        assert_eq!(addr, "10.0.0.1:161".parse().unwrap());
        let addr = resolve_target("10.0.0.1:1161", 161).await.unwrap();
        assert_eq!(addr.port(), 1161);
        let addr = resolve_target("::1", 162).await.unwrap();
        assert_eq!(addr, "[::1]:162".parse().unwrap());
    }
}
