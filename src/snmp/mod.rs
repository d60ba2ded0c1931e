mod memory;
mod session;
mod value;

pub use memory::MemoryTable;
pub use session::{SessionConfig, SnmpSession, SnmpVersion};
pub use value::*;

use std::future::Future;

use crate::error::TransportError;

/// Request/response access to a device's management tree.
///
/// Each call is exactly one blocking round trip; retries and timeouts
/// belong to the implementation.
pub trait ManagementService {
    /// The first entry strictly after `key` in tree order
    fn get_next(&self, key: &Oid) -> impl Future<Output = Result<VarBind, TransportError>>;

    /// All `keys` in one request. Reply order is not guaranteed to match
    /// request order.
    fn get_batch(&self, keys: &[Oid]) -> impl Future<Output = Result<Vec<VarBind>, TransportError>>;
}
