// Tests module
// Fee scenarios: the five canonical set_fee_rate outcomes
// Governance invariants: properties over arbitrary rates and identities
// Integration: RocksDB persistence and concurrent writers
