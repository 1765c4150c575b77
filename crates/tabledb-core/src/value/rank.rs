use crate::value::Value;
use tabledb_primitives::KindFamily;

///
/// Canonical Value Rank
///
/// Stable rank used by the total key comparator for pairs that have no
/// semantic ordering: family order first, then the sentinels in
/// `Empty < JsonNull < Null < Absent` order.
///
/// IMPORTANT:
/// Rank order is part of deterministic index-scan behavior and must remain
/// fixed.
///
#[must_use]
pub const fn canonical_rank(value: &Value) -> u8 {
    match value {
        Value::Empty => SENTINEL_BASE,
        Value::JsonNull => SENTINEL_BASE + 1,
        Value::Null => SENTINEL_BASE + 2,
        Value::Absent => SENTINEL_BASE + 3,
        Value::Array(_) => 10,
        Value::Map(_) => 11,
        Value::Record(_) => 12,
        _ => match value.kind() {
            Some(kind) => family_rank(kind.family()),
            None => SENTINEL_BASE + 3,
        },
    }
}

const SENTINEL_BASE: u8 = 20;

const fn family_rank(family: KindFamily) -> u8 {
    match family {
        KindFamily::Numeric => 0,
        KindFamily::Textual => 1,
        KindFamily::Enum => 2,
        KindFamily::Bool => 3,
        KindFamily::Temporal => 4,
        KindFamily::Binary => 5,
        KindFamily::Complex | KindFamily::Json => 10,
    }
}
