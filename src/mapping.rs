//! Consistency-level and data-type mapping tables.
//!
//! Both tables are immutable after construction and owned by the driver
//! instance. The type table is composed from a base set shared by every
//! adapter plus this client's own entries, so the shared table is never
//! mutated in place.

use std::collections::HashMap;

/// Consistency levels as the underlying client encodes them, with the CQL
/// binary protocol codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum NativeConsistency {
    Any = 0x0000,
    One = 0x0001,
    Two = 0x0002,
    Three = 0x0003,
    Quorum = 0x0004,
    All = 0x0005,
    LocalQuorum = 0x0006,
    EachQuorum = 0x0007,
}

/// Symbolic-name lookup for consistency levels.
///
/// Entries are symmetric: each level resolves from its upper-case wire name
/// and its lower-case alias, and from nothing else.
#[derive(Debug, Clone)]
pub struct ConsistencyMap {
    entries: HashMap<&'static str, NativeConsistency>,
}

impl ConsistencyMap {
    pub fn new() -> Self {
        use NativeConsistency::*;
        let entries = HashMap::from([
            ("ONE", One),
            ("one", One),
            ("TWO", Two),
            ("two", Two),
            ("THREE", Three),
            ("three", Three),
            ("QUORUM", Quorum),
            ("quorum", Quorum),
            ("LOCAL_QUORUM", LocalQuorum),
            ("localQuorum", LocalQuorum),
            ("EACH_QUORUM", EachQuorum),
            ("eachQuorum", EachQuorum),
            ("ALL", All),
            ("all", All),
            ("ANY", Any),
            ("any", Any),
        ]);
        Self { entries }
    }

    /// Resolve a symbolic name to the client's native level.
    pub fn resolve(&self, name: &str) -> Option<NativeConsistency> {
        self.entries.get(name).copied()
    }
}

impl Default for ConsistencyMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Data types as the underlying client encodes them (CQL protocol codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum NativeType {
    Custom = 0x0000,
    Ascii = 0x0001,
    BigInt = 0x0002,
    Blob = 0x0003,
    Boolean = 0x0004,
    Counter = 0x0005,
    Decimal = 0x0006,
    Double = 0x0007,
    Float = 0x0008,
    Int = 0x0009,
    Text = 0x000A,
    Timestamp = 0x000B,
    Uuid = 0x000C,
    Varchar = 0x000D,
    VarInt = 0x000E,
    TimeUuid = 0x000F,
    Inet = 0x0010,
    List = 0x0020,
    Map = 0x0021,
    Set = 0x0022,
}

/// Abstract type tags every adapter understands.
const BASE_TYPES: &[(&str, NativeType)] = &[
    ("ascii", NativeType::Ascii),
    ("bigint", NativeType::BigInt),
    ("blob", NativeType::Blob),
    ("boolean", NativeType::Boolean),
    ("double", NativeType::Double),
    ("int", NativeType::Int),
    ("text", NativeType::Text),
    ("timestamp", NativeType::Timestamp),
    ("uuid", NativeType::Uuid),
];

/// Tags this client implementation understands natively on top of the base
/// set.
const CLIENT_TYPES: &[(&str, NativeType)] = &[
    ("counter", NativeType::Counter),
    ("decimal", NativeType::Decimal),
    ("float", NativeType::Float),
    ("varchar", NativeType::Varchar),
    ("varint", NativeType::VarInt),
    ("timeuuid", NativeType::TimeUuid),
    ("inet", NativeType::Inet),
    ("list", NativeType::List),
    ("map", NativeType::Map),
    ("set", NativeType::Set),
];

/// Abstract-tag lookup for data types.
#[derive(Debug, Clone)]
pub struct TypeMap {
    entries: HashMap<&'static str, NativeType>,
}

impl TypeMap {
    pub fn new() -> Self {
        Self::compose(BASE_TYPES, CLIENT_TYPES)
    }

    /// Base table first, client entries second; a client entry wins when
    /// both tables carry the same tag.
    fn compose(base: &[(&'static str, NativeType)], client: &[(&'static str, NativeType)]) -> Self {
        let mut entries = HashMap::with_capacity(base.len() + client.len());
        for (tag, native) in base.iter().chain(client) {
            entries.insert(*tag, *native);
        }
        Self { entries }
    }

    /// Resolve an abstract tag to the client's native type.
    pub fn resolve(&self, tag: &str) -> Option<NativeType> {
        self.entries.get(tag).copied()
    }
}

impl Default for TypeMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consistency_names_resolve_in_both_cases() {
        let map = ConsistencyMap::new();
        let pairs = [
            ("ONE", "one", NativeConsistency::One),
            ("TWO", "two", NativeConsistency::Two),
            ("THREE", "three", NativeConsistency::Three),
            ("QUORUM", "quorum", NativeConsistency::Quorum),
            ("LOCAL_QUORUM", "localQuorum", NativeConsistency::LocalQuorum),
            ("EACH_QUORUM", "eachQuorum", NativeConsistency::EachQuorum),
            ("ALL", "all", NativeConsistency::All),
            ("ANY", "any", NativeConsistency::Any),
        ];
        for (upper, lower, native) in pairs {
            assert_eq!(map.resolve(upper), Some(native));
            assert_eq!(map.resolve(lower), Some(native));
        }
    }

    #[test]
    fn unknown_consistency_does_not_resolve() {
        let map = ConsistencyMap::new();
        assert_eq!(map.resolve("SERIAL"), None);
        assert_eq!(map.resolve("Quorum"), None);
    }

    #[test]
    fn type_map_carries_base_and_client_tags() {
        let map = TypeMap::new();
        assert_eq!(map.resolve("text"), Some(NativeType::Text));
        assert_eq!(map.resolve("counter"), Some(NativeType::Counter));
        assert_eq!(map.resolve("set"), Some(NativeType::Set));
        assert_eq!(map.resolve("tinyint"), None);
    }

    #[test]
    fn client_entries_override_base_entries() {
        let map = TypeMap::compose(
            &[("text", NativeType::Ascii)],
            &[("text", NativeType::Varchar)],
        );
        assert_eq!(map.resolve("text"), Some(NativeType::Varchar));
    }
}
