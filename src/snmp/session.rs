use std::net::SocketAddr;
use std::time::Duration;

use async_snmp::{Auth, Client, ErrorStatus, Retry, UdpClient};
use tracing::{debug, info};

use crate::error::{PollError, TransportError};
use crate::snmp::{ManagementService, Oid, Value, VarBind};

/// Protocol version used for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SnmpVersion {
    #[default]
    V1,
    V2c,
}

impl std::fmt::Display for SnmpVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnmpVersion::V1 => write!(f, "v1"),
            SnmpVersion::V2c => write!(f, "v2c"),
        }
    }
}

/// Everything needed to open one read-only session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub target: SocketAddr,
    pub version: SnmpVersion,
    pub community: String,
    pub timeout: Duration,
}

/// A community-based SNMP session to one device
pub struct SnmpSession {
    client: UdpClient,
    target: SocketAddr,
}

impl SnmpSession {
    /// Open the session. No request is sent yet.
    pub async fn open(config: &SessionConfig) -> Result<Self, PollError> {
        let auth = match config.version {
            SnmpVersion::V1 => Auth::v1(config.community.clone()),
            SnmpVersion::V2c => Auth::v2c(config.community.clone()),
        };

        // A lost reply is fatal to the run, so the library must not retry.
        let client = Client::builder(config.target, auth)
            .request_timeout(config.timeout)
            .retry(Retry::none())
            .connect()
            .await
            .map_err(|e| PollError::Session {
                target: config.target.to_string(),
                reason: e.to_string(),
            })?;

        info!(target_addr = %config.target, version = %config.version, "session opened");
        Ok(Self {
            client,
            target: config.target,
        })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

impl ManagementService for SnmpSession {
    async fn get_next(&self, key: &Oid) -> Result<VarBind, TransportError> {
        debug!(%key, "GETNEXT");
        match self.client.get_next(&to_library_oid(key)).await {
            Ok(response) => Ok(first_or_end(key, response.varbinds)),
            Err(err) => next_error(key, &err),
        }
    }

    async fn get_batch(&self, keys: &[Oid]) -> Result<Vec<VarBind>, TransportError> {
        debug!(count = keys.len(), "GET");
        let oids: Vec<async_snmp::Oid> = keys.iter().map(to_library_oid).collect();
        match self.client.get_many(&oids).await {
            Ok(response) => Ok(response
                .varbinds
                .into_iter()
                .map(from_library_varbind)
                .collect()),
            Err(err) => batch_error(keys, &err),
        }
    }
}

fn to_library_oid(oid: &Oid) -> async_snmp::Oid {
    async_snmp::Oid::from_slice(oid.arcs())
}

fn from_library_varbind(vb: async_snmp::VarBind) -> VarBind {
    VarBind::new(Oid::from_slice(vb.oid.arcs()), from_library_value(vb.value))
}

/// An empty GETNEXT response means there is nothing after `key`
fn first_or_end(key: &Oid, varbinds: Vec<async_snmp::VarBind>) -> VarBind {
    varbinds
        .into_iter()
        .next()
        .map(from_library_varbind)
        .unwrap_or_else(|| VarBind::new(key.clone(), Value::EndOfMibView))
}

fn from_library_value(value: async_snmp::Value) -> Value {
    use async_snmp::Value as Lib;

    match value {
        Lib::Integer(v) => Value::Integer(i64::from(v)),
        Lib::Counter32(v) => Value::Counter32(v),
        Lib::Gauge32(v) => Value::Gauge32(v),
        Lib::TimeTicks(v) => Value::TimeTicks(v),
        Lib::Counter64(v) => Value::Counter64(v),
        Lib::OctetString(bytes) => Value::OctetString(bytes.to_vec()),
        Lib::NoSuchObject => Value::NoSuchObject,
        Lib::NoSuchInstance => Value::NoSuchInstance,
        Lib::EndOfMibView => Value::EndOfMibView,
        _ => Value::Other,
    }
}

fn is_no_such_name(err: &async_snmp::Error) -> bool {
    matches!(
        err.exchange_source(),
        async_snmp::Error::Snmp {
            status: ErrorStatus::NoSuchName,
            ..
        }
    )
}

/// v1 agents signal the end of the tree with noSuchName instead of endOfMibView
fn next_error(key: &Oid, err: &async_snmp::Error) -> Result<VarBind, TransportError> {
    if is_no_such_name(err) {
        debug!(%key, "noSuchName on GETNEXT, treating as end of tree");
        return Ok(VarBind::new(key.clone(), Value::EndOfMibView));
    }
    Err(map_error(err))
}

/// v1 answers a GET naming one missing object with noSuchName and no values
/// at all. Every key in the batch is then reported as missing, so the
/// record keeps its defaults instead of aborting the run.
fn batch_error(keys: &[Oid], err: &async_snmp::Error) -> Result<Vec<VarBind>, TransportError> {
    if is_no_such_name(err) {
        debug!(count = keys.len(), "noSuchName on GET, batch left unset");
        return Ok(keys
            .iter()
            .map(|key| VarBind::new(key.clone(), Value::NoSuchInstance))
            .collect());
    }
    Err(map_error(err))
}

fn map_error(err: &async_snmp::Error) -> TransportError {
    match err.exchange_source() {
        async_snmp::Error::Timeout { .. } => TransportError::Timeout,
        async_snmp::Error::Snmp { status, .. } => TransportError::Status(status.to_string()),
        other => TransportError::Protocol(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> SocketAddr {
        "192.168.88.1:161".parse().unwrap()
    }

    fn status_error(status: ErrorStatus) -> async_snmp::Error {
        async_snmp::Error::Snmp {
            target: agent(),
            status,
            index: 1,
            oid: None,
            metadata: Box::default(),
        }
    }

    fn key() -> Oid {
        "1.3.6.1.4.1.14988.1.1.1.2.1.1".parse().unwrap()
    }

    #[test]
    fn test_integer_widens() {
        assert_eq!(
            from_library_value(async_snmp::Value::Integer(-58)),
            Value::Integer(-58)
        );
        assert_eq!(
            from_library_value(async_snmp::Value::Integer(i32::MIN)),
            Value::Integer(i64::from(i32::MIN))
        );
    }

    #[test]
    fn test_octet_string_copies_bytes() {
        let mac: &[u8] = &[0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x01];
        assert_eq!(
            from_library_value(async_snmp::Value::from(mac)),
            Value::OctetString(mac.to_vec())
        );
    }

    #[test]
    fn test_numeric_and_exception_kinds() {
        use async_snmp::Value as Lib;

        assert_eq!(from_library_value(Lib::Counter32(7)), Value::Counter32(7));
        assert_eq!(from_library_value(Lib::Gauge32(8)), Value::Gauge32(8));
        assert_eq!(from_library_value(Lib::TimeTicks(9)), Value::TimeTicks(9));
        assert_eq!(
            from_library_value(Lib::Counter64(u64::MAX)),
            Value::Counter64(u64::MAX)
        );
        assert_eq!(from_library_value(Lib::NoSuchObject), Value::NoSuchObject);
        assert_eq!(from_library_value(Lib::NoSuchInstance), Value::NoSuchInstance);
        assert_eq!(from_library_value(Lib::EndOfMibView), Value::EndOfMibView);
        assert_eq!(from_library_value(Lib::Null), Value::Other);
        assert_eq!(from_library_value(Lib::IpAddress([10, 0, 0, 1])), Value::Other);
    }

    #[test]
    fn test_empty_next_response_is_end_of_tree() {
        let vb = first_or_end(&key(), Vec::new());
        assert_eq!(vb.oid, key());
        assert_eq!(vb.value, Value::EndOfMibView);
    }

    #[test]
    fn test_map_timeout() {
        let err = async_snmp::Error::Timeout {
            target: agent(),
            elapsed: Duration::from_secs(1),
            retries: 0,
        };
        assert_eq!(map_error(&err), TransportError::Timeout);
    }

    #[test]
    fn test_map_status() {
        let err = status_error(ErrorStatus::GenErr);
        assert_eq!(map_error(&err), TransportError::Status("genErr".to_string()));
    }

    #[test]
    fn test_map_other_errors_to_protocol() {
        let err = async_snmp::Error::Auth { target: agent() };
        assert!(matches!(map_error(&err), TransportError::Protocol(_)));
    }

    #[test]
    fn test_no_such_name_on_next_ends_walk() {
        let vb = next_error(&key(), &status_error(ErrorStatus::NoSuchName)).unwrap();
        assert_eq!(vb.oid, key());
        assert_eq!(vb.value, Value::EndOfMibView);
    }

    #[test]
    fn test_other_status_on_next_is_an_error() {
        let result = next_error(&key(), &status_error(ErrorStatus::GenErr));
        assert_eq!(result, Err(TransportError::Status("genErr".to_string())));
    }

    #[test]
    fn test_no_such_name_on_batch_leaves_keys_unset() {
        let keys = vec![key().child(&[3]), key().child(&[4])];
        let binds = batch_error(&keys, &status_error(ErrorStatus::NoSuchName)).unwrap();
        assert_eq!(binds.len(), 2);
        for (bind, key) in binds.iter().zip(&keys) {
            assert_eq!(&bind.oid, key);
            assert_eq!(bind.value, Value::NoSuchInstance);
        }
    }

    #[test]
    fn test_timeout_on_batch_is_an_error() {
        let err = async_snmp::Error::Timeout {
            target: agent(),
            elapsed: Duration::from_secs(1),
            retries: 0,
        };
        assert_eq!(batch_error(&[key()], &err), Err(TransportError::Timeout));
    }
}
