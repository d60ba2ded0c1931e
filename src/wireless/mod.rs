//! Wireless client discovery over the MikroTik registration table
//! (`MIKROTIK-MIB::mtxrWlRtabTable`).

mod aggregate;
pub mod decode;
mod stats;
mod types;
mod walker;

pub use aggregate::*;
pub use stats::{Attribute, build_request, fetch_stats};
pub use types::*;
pub use walker::*;

use crate::snmp::Oid;

/// `mtxrWlRtabEntry`, one row per registered client
pub const REGISTRATION_ENTRY: &[u32] = &[1, 3, 6, 1, 4, 1, 14988, 1, 1, 1, 2, 1];

/// `mtxrWlRtabAddr`, the column the walk scans
pub const ADDR_COLUMN: u32 = 1;

pub fn registration_entry() -> Oid {
    Oid::from_slice(REGISTRATION_ENTRY)
}
