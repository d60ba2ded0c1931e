//! Error types shared by the transport and the poller

use thiserror::Error;

use crate::snmp::Oid;

/// Failure of a single request/response round trip
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("agent returned error status {0}")]
    Status(String),
    #[error("{0}")]
    Protocol(String),
}

/// Where in the poll a transport failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Walk,
    Fetch,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Walk => write!(f, "walk"),
            Stage::Fetch => write!(f, "fetch"),
        }
    }
}

/// Fatal errors that abort a poll run
#[derive(Debug, Error)]
pub enum PollError {
    #[error("cannot resolve target {target:?}: {reason}")]
    Resolve { target: String, reason: String },

    #[error("cannot open session to {target}: {reason}")]
    Session { target: String, reason: String },

    #[error("{stage} failed at {key}: {source}")]
    Transport {
        stage: Stage,
        key: Oid,
        #[source]
        source: TransportError,
    },
}

impl PollError {
    pub fn walk(key: &Oid, source: TransportError) -> Self {
        PollError::Transport {
            stage: Stage::Walk,
            key: key.clone(),
            source,
        }
    }

    pub fn fetch(key: &Oid, source: TransportError) -> Self {
        PollError::Transport {
            stage: Stage::Fetch,
            key: key.clone(),
            source,
        }
    }
}
