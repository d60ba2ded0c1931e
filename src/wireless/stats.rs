use std::collections::HashMap;

use tracing::debug;

use crate::error::TransportError;
use crate::snmp::{ManagementService, Oid, Value};
use crate::wireless::decode::{decode_integer, decode_uptime, decode_volume};
use crate::wireless::{ClientIdentity, ClientStats, registration_entry};

/// Registration-table columns read for every client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Strength,
    TxBytes,
    RxBytes,
    TxRate,
    RxRate,
    Uptime,
    Tx0,
    Rx0,
    Tx1,
    Rx1,
}

impl Attribute {
    /// Request order
    pub const ALL: [Attribute; 10] = [
        Attribute::Strength,
        Attribute::TxBytes,
        Attribute::RxBytes,
        Attribute::TxRate,
        Attribute::RxRate,
        Attribute::Uptime,
        Attribute::Tx0,
        Attribute::Rx0,
        Attribute::Tx1,
        Attribute::Rx1,
    ];

    /// Column number under the registration-table entry
    pub fn column(self) -> u32 {
        match self {
            Attribute::Strength => 3,
            Attribute::TxBytes => 4,
            Attribute::RxBytes => 5,
            Attribute::TxRate => 8,
            Attribute::RxRate => 9,
            Attribute::Uptime => 11,
            Attribute::Tx0 => 13,
            Attribute::Rx0 => 14,
            Attribute::Tx1 => 15,
            Attribute::Rx1 => 16,
        }
    }

    /// `entry.<column>.<6 mac octets>.<ifindex>`
    pub fn key_for(self, identity: &ClientIdentity) -> Oid {
        registration_entry()
            .child(&[self.column()])
            .child(&instance_index(identity))
    }

    /// Decode `value` into the field this attribute owns.
    /// Returns false when the value kind does not fit.
    fn apply(self, value: &Value, stats: &mut ClientStats) -> bool {
        match self {
            Attribute::Strength => set_integer(value, &mut stats.strength),
            Attribute::TxBytes => set_volume(value, &mut stats.tx_bytes, &mut stats.tx_volume),
            Attribute::RxBytes => set_volume(value, &mut stats.rx_bytes, &mut stats.rx_volume),
            Attribute::TxRate => set_integer(value, &mut stats.tx_rate),
            Attribute::RxRate => set_integer(value, &mut stats.rx_rate),
            Attribute::Uptime => match decode_uptime(value) {
                Some(uptime) => {
                    stats.uptime = uptime.to_string();
                    true
                }
                None => false,
            },
            Attribute::Tx0 => set_integer(value, &mut stats.tx0),
            Attribute::Rx0 => set_integer(value, &mut stats.rx0),
            Attribute::Tx1 => set_integer(value, &mut stats.tx1),
            Attribute::Rx1 => set_integer(value, &mut stats.rx1),
        }
    }
}

fn set_integer(value: &Value, field: &mut i64) -> bool {
    match decode_integer(value) {
        Some(v) => {
            *field = v;
            true
        }
        None => false,
    }
}

fn set_volume(value: &Value, raw: &mut u64, display: &mut String) -> bool {
    match decode_volume(value) {
        Some(volume) => {
            *raw = volume.raw;
            *display = volume.display;
            true
        }
        None => false,
    }
}

fn instance_index(identity: &ClientIdentity) -> Vec<u32> {
    let mut arcs: Vec<u32> = identity.mac.octets().iter().map(|b| u32::from(*b)).collect();
    arcs.push(identity.ifindex);
    arcs
}

/// The batched request for one client, each key tagged with its attribute
pub fn build_request(identity: &ClientIdentity) -> Vec<(Oid, Attribute)> {
    Attribute::ALL
        .iter()
        .map(|attr| (attr.key_for(identity), *attr))
        .collect()
}

/// Fetch every attribute for `identity` in a single round trip and
/// populate `stats`.
///
/// Replies are matched back by key. Keys nobody asked for, exception
/// values and repeated keys are skipped. On error `stats` is untouched.
pub async fn fetch_stats<S: ManagementService>(
    service: &S,
    identity: &ClientIdentity,
    stats: &mut ClientStats,
) -> Result<(), TransportError> {
    let request = build_request(identity);
    let keys: Vec<Oid> = request.iter().map(|(key, _)| key.clone()).collect();
    let mut pending: HashMap<Oid, Attribute> = request.into_iter().collect();

    let reply = service.get_batch(&keys).await?;

    for vb in reply {
        let Some(attr) = pending.remove(&vb.oid) else {
            debug!(key = %vb.oid, "ignoring unrequested attribute");
            continue;
        };
        if vb.value.is_exception() {
            debug!(key = %vb.oid, kind = vb.value.kind(), "attribute not available");
            continue;
        }
        if !attr.apply(&vb.value, stats) {
            debug!(key = %vb.oid, ?attr, kind = vb.value.kind(), "unexpected value kind");
        }
    }

    Ok(())
}
