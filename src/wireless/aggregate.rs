use tracing::{debug, error};

use crate::error::PollError;
use crate::snmp::ManagementService;
use crate::wireless::{ClientRecord, ClientStore, TreeWalker, fetch_stats};

/// Walk the registration table and enrich each client as it is found.
///
/// Every client is fetched before the walk moves on. Any transport failure
/// aborts the poll and discards what was collected so far, so callers
/// never see a partial store.
pub async fn poll_clients<S: ManagementService>(service: &S) -> Result<ClientStore, PollError> {
    let mut store = ClientStore::new();
    let mut walker = TreeWalker::new(service);

    loop {
        let cursor = walker.cursor().clone();
        let identity = match walker.next().await {
            Ok(Some(identity)) => identity,
            Ok(None) => break,
            Err(e) => {
                error!(%cursor, error = %e, "walk failed");
                return Err(PollError::walk(&cursor, e));
            }
        };

        let mut record = ClientRecord::new(identity);
        if let Err(e) = fetch_stats(service, &identity, &mut record.stats).await {
            error!(mac = %identity.mac, error = %e, "stat fetch failed");
            return Err(PollError::fetch(walker.cursor(), e));
        }
        debug!(mac = %identity.mac, uptime = %record.stats.uptime, "client enriched");
        store.push(record);
    }

    Ok(store)
}
