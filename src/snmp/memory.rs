//! In-memory stand-in for a device agent.
//!
//! Used by the unit and integration tests to drive the poller without a
//! network. It is not a real agent and is never used by the binary.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::TransportError;
use crate::snmp::{ManagementService, Oid, Value, VarBind};

/// An in-memory management tree that answers like an agent.
///
/// Entries are kept sorted so GETNEXT follows tree order. Missing keys in a
/// batch come back as `NoSuchInstance`; walking past the last entry yields
/// `EndOfMibView`.
#[derive(Debug, Default)]
pub struct MemoryTable {
    entries: BTreeMap<Oid, Value>,
    reverse_batches: bool,
    fail_batch_on: Option<Oid>,
    fail_next_on: Option<Oid>,
    round_trips: AtomicUsize,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, oid: Oid, value: Value) {
        self.entries.insert(oid, value);
    }

    /// Answer batches in reverse request order
    pub fn with_reversed_batches(mut self) -> Self {
        self.reverse_batches = true;
        self
    }

    /// Time out any batch that asks for `oid`
    pub fn with_batch_timeout_on(mut self, oid: Oid) -> Self {
        self.fail_batch_on = Some(oid);
        self
    }

    /// Time out a GETNEXT issued from `oid`
    pub fn with_next_timeout_on(mut self, oid: Oid) -> Self {
        self.fail_next_on = Some(oid);
        self
    }

    pub fn round_trips(&self) -> usize {
        self.round_trips.load(Ordering::Relaxed)
    }

    fn lookup_next(&self, key: &Oid) -> VarBind {
        self.entries
            .range((Bound::Excluded(key), Bound::Unbounded))
            .next()
            .map(|(oid, value)| VarBind::new(oid.clone(), value.clone()))
            .unwrap_or_else(|| VarBind::new(key.clone(), Value::EndOfMibView))
    }
}

impl ManagementService for MemoryTable {
    async fn get_next(&self, key: &Oid) -> Result<VarBind, TransportError> {
        self.round_trips.fetch_add(1, Ordering::Relaxed);
        if self.fail_next_on.as_ref() == Some(key) {
            return Err(TransportError::Timeout);
        }
        Ok(self.lookup_next(key))
    }

    async fn get_batch(&self, keys: &[Oid]) -> Result<Vec<VarBind>, TransportError> {
        self.round_trips.fetch_add(1, Ordering::Relaxed);
        if let Some(ref poison) = self.fail_batch_on {
            if keys.contains(poison) {
                return Err(TransportError::Timeout);
            }
        }

        let mut out: Vec<VarBind> = keys
            .iter()
            .map(|key| {
                let value = self
                    .entries
                    .get(key)
                    .cloned()
                    .unwrap_or(Value::NoSuchInstance);
                VarBind::new(key.clone(), value)
            })
            .collect();
        if self.reverse_batches {
            out.reverse();
        }
        Ok(out)
    }
}
