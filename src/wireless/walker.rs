use tracing::{debug, info};

use crate::error::TransportError;
use crate::snmp::{ManagementService, Oid, VarBind};
use crate::wireless::{ADDR_COLUMN, ClientIdentity, MacAddress, registration_entry};

/// Outcome of one discovery step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkStep {
    Client {
        identity: ClientIdentity,
        cursor: Oid,
    },
    EndOfTree,
}

/// Ask for the entry after `cursor` in the client address column.
///
/// A reply that is not a 6-byte address inside that column ends the walk.
pub async fn discover_next<S: ManagementService>(
    service: &S,
    cursor: &Oid,
) -> Result<WalkStep, TransportError> {
    let reply = service.get_next(cursor).await?;
    Ok(interpret(cursor, reply))
}

fn interpret(cursor: &Oid, reply: VarBind) -> WalkStep {
    let column = registration_entry().child(&[ADDR_COLUMN]);

    if !reply.oid.starts_with(&column) || reply.oid.len() <= column.len() {
        debug!(key = %reply.oid, "left the address column");
        return WalkStep::EndOfTree;
    }
    if reply.oid <= *cursor {
        debug!(key = %reply.oid, %cursor, "agent did not advance");
        return WalkStep::EndOfTree;
    }

    let mac = reply.value.as_bytes().and_then(MacAddress::from_bytes);
    let (Some(mac), Some(ifindex)) = (mac, reply.oid.last_arc()) else {
        debug!(key = %reply.oid, kind = reply.value.kind(), "not a client address");
        return WalkStep::EndOfTree;
    };

    WalkStep::Client {
        identity: ClientIdentity { mac, ifindex },
        cursor: reply.oid,
    }
}

/// Restartable scan over the registration table
pub struct TreeWalker<'a, S> {
    service: &'a S,
    cursor: Oid,
    finished: bool,
    found: usize,
}

impl<'a, S: ManagementService> TreeWalker<'a, S> {
    pub fn new(service: &'a S) -> Self {
        Self {
            service,
            cursor: registration_entry().child(&[ADDR_COLUMN]),
            finished: false,
            found: 0,
        }
    }

    pub fn cursor(&self) -> &Oid {
        &self.cursor
    }

    /// The next client, or `None` once the table is exhausted.
    /// One round trip per call until finished.
    pub async fn next(&mut self) -> Result<Option<ClientIdentity>, TransportError> {
        if self.finished {
            return Ok(None);
        }
        match discover_next(self.service, &self.cursor).await? {
            WalkStep::Client { identity, cursor } => {
                debug!(mac = %identity.mac, ifindex = identity.ifindex, "client found");
                self.cursor = cursor;
                self.found += 1;
                Ok(Some(identity))
            }
            WalkStep::EndOfTree => {
                info!(clients = self.found, "registration table walk complete");
                self.finished = true;
                Ok(None)
            }
        }
    }
}
