use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A dotted numeric management key, e.g. `1.3.6.1.4.1.14988`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Oid(Vec<u32>);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OidParseError {
    #[error("empty OID")]
    Empty,
    #[error("invalid arc {arc:?} in OID {input:?}")]
    InvalidArc { input: String, arc: String },
}

impl Oid {
    pub fn new(arcs: Vec<u32>) -> Self {
        Self(arcs)
    }

    pub fn from_slice(arcs: &[u32]) -> Self {
        Self(arcs.to_vec())
    }

    pub fn arcs(&self) -> &[u32] {
        &self.0
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// New key with `arcs` appended
    pub fn child(&self, arcs: &[u32]) -> Self {
        let mut out = Vec::with_capacity(self.0.len() + arcs.len());
        out.extend_from_slice(&self.0);
        out.extend_from_slice(arcs);
        Self(out)
    }

    pub fn starts_with(&self, prefix: &Oid) -> bool {
        self.0.starts_with(&prefix.0)
    }

    pub fn last_arc(&self) -> Option<u32> {
        self.0.last().copied()
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", arc)?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for Oid {
    type Err = OidParseError;

    /// Accepts `1.3.6.1` as well as the net-snmp style `.1.3.6.1`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('.');
        if trimmed.is_empty() {
            return Err(OidParseError::Empty);
        }
        trimmed
            .split('.')
            .map(|arc| {
                arc.parse::<u32>().map_err(|_| OidParseError::InvalidArc {
                    input: s.to_string(),
                    arc: arc.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Oid)
    }
}

/// A typed value returned by the agent.
///
/// Exception kinds (`NoSuchObject`, `NoSuchInstance`, `EndOfMibView`) are
/// carried as values, not errors, the way v2c agents report them per
/// varbind. `Other` covers every kind this poller never decodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    Counter32(u32),
    Gauge32(u32),
    TimeTicks(u32),
    Counter64(u64),
    OctetString(Vec<u8>),
    NoSuchObject,
    NoSuchInstance,
    EndOfMibView,
    Other,
}

impl Value {
    /// Numeric kinds as a signed integer; `None` for anything else
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Integer(v) => Some(v),
            Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => Some(i64::from(v)),
            Value::Counter64(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Numeric kinds as an unsigned integer; negative integers yield `None`
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::Integer(v) => u64::try_from(v).ok(),
            Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => Some(u64::from(v)),
            Value::Counter64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::OctetString(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn is_exception(&self) -> bool {
        matches!(
            self,
            Value::NoSuchObject | Value::NoSuchInstance | Value::EndOfMibView
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Counter32(_) => "Counter32",
            Value::Gauge32(_) => "Gauge32",
            Value::TimeTicks(_) => "TimeTicks",
            Value::Counter64(_) => "Counter64",
            Value::OctetString(_) => "OCTET STRING",
            Value::NoSuchObject => "noSuchObject",
            Value::NoSuchInstance => "noSuchInstance",
            Value::EndOfMibView => "endOfMibView",
            Value::Other => "other",
        }
    }
}

/// One key/value pair of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarBind {
    pub oid: Oid,
    pub value: Value,
}

impl VarBind {
    pub fn new(oid: Oid, value: Value) -> Self {
        Self { oid, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let oid: Oid = ".1.3.6.1.4.1.14988".parse().unwrap();
        assert_eq!(oid.arcs(), &[1, 3, 6, 1, 4, 1, 14988]);
        assert_eq!(oid.to_string(), "1.3.6.1.4.1.14988");
        assert_eq!("1.3".parse::<Oid>().unwrap(), Oid::new(vec![1, 3]));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("".parse::<Oid>(), Err(OidParseError::Empty));
        assert_eq!(".".parse::<Oid>(), Err(OidParseError::Empty));
        assert!("1.3.x.1".parse::<Oid>().is_err());
        assert!("1..3".parse::<Oid>().is_err());
    }

    #[test]
    fn test_child_and_prefix() {
        let table = Oid::new(vec![1, 3, 6]);
        let entry = table.child(&[1, 42]);
        assert_eq!(entry.arcs(), &[1, 3, 6, 1, 42]);
        assert!(entry.starts_with(&table));
        assert!(!table.starts_with(&entry));
        assert_eq!(entry.last_arc(), Some(42));
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = Oid::new(vec![1, 3, 6, 1, 9]);
        let b = Oid::new(vec![1, 3, 6, 2]);
        let c = Oid::new(vec![1, 3, 6, 1, 9, 0]);
        assert!(a < b);
        assert!(a < c);
        assert!(c < b);
    }

    #[test]
    fn test_numeric_accessors() {
        assert_eq!(Value::Integer(-71).as_i64(), Some(-71));
        assert_eq!(Value::Integer(-71).as_u64(), None);
        assert_eq!(Value::Counter32(2048).as_u64(), Some(2048));
        assert_eq!(Value::Counter64(u64::MAX).as_i64(), None);
        assert_eq!(Value::Counter64(u64::MAX).as_u64(), Some(u64::MAX));
        assert_eq!(Value::TimeTicks(100000).as_i64(), Some(100000));
        assert_eq!(Value::OctetString(vec![1, 2]).as_u64(), None);
        assert_eq!(Value::OctetString(vec![1, 2]).as_bytes(), Some(&[1u8, 2][..]));
    }

    #[test]
    fn test_exceptions() {
        assert!(Value::NoSuchInstance.is_exception());
        assert!(Value::EndOfMibView.is_exception());
        assert!(!Value::Other.is_exception());
        assert!(!Value::Integer(0).is_exception());
    }
}
