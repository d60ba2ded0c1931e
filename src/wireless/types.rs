use serde::{Serialize, Serializer};

/// A 6-byte link-layer address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Exactly six bytes, or nothing
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        <[u8; 6]>::try_from(bytes).ok().map(Self)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

/// Lowercase hex octets joined by `-`, e.g. `aa-bb-cc-dd-ee-01`
impl std::fmt::Display for MacAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02x}-{:02x}-{:02x}-{:02x}-{:02x}-{:02x}",
            a, b, c, d, e, g
        )
    }
}

impl Serialize for MacAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The key of one registration-table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ClientIdentity {
    pub mac: MacAddress,
    pub ifindex: u32,
}

/// Values read for one client by the stat fetch.
///
/// Fields the device did not answer keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientStats {
    pub strength: i64,
    pub tx_bytes: u64,
    pub rx_bytes: u64,
    pub tx_volume: String,
    pub rx_volume: String,
    pub tx_rate: i64,
    pub rx_rate: i64,
    pub uptime: String,
    pub tx0: i64,
    pub rx0: i64,
    pub tx1: i64,
    pub rx1: i64,
}

/// One connected wireless client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientRecord {
    #[serde(flatten)]
    identity: ClientIdentity,
    #[serde(flatten)]
    pub stats: ClientStats,
}

impl ClientRecord {
    pub fn new(identity: ClientIdentity) -> Self {
        Self {
            identity,
            stats: ClientStats::default(),
        }
    }

    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }
}

/// Clients in discovery order
#[derive(Debug, Clone, Default)]
pub struct ClientStore {
    records: Vec<ClientRecord>,
}

impl ClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ClientRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Discovery order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ClientRecord> {
        self.records.iter()
    }

    /// Last discovered first; the order records are emitted in
    pub fn iter_rev(&self) -> impl Iterator<Item = &ClientRecord> {
        self.records.iter().rev()
    }
}
