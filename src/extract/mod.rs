//! Field extractors: pure functions from raw API documents to metric groups.
//!
//! Each extractor consumes one or more [`Payload`](armorywatch_client::Payload)
//! documents and produces a typed group of named metrics. Extractors never
//! fail: an empty or partially-populated document yields the metric's
//! zero/empty value. Each group's `apply` writes its complete key set into
//! a record unconditionally, so consumers never see a missing key for an
//! enabled category.

mod basics;
mod mythic;
mod pvp;
mod raid;
mod realm_status;

pub use basics::CharacterMetrics;
pub use mythic::MythicPlusMetrics;
pub use pvp::PvpMetrics;
pub use raid::RaidMetrics;
pub use realm_status::RealmMetrics;

use serde_json::Value;

/// Integer field, zero-defaulted.
pub(crate) fn int(value: Option<&Value>) -> i64 {
    value.and_then(Value::as_i64).unwrap_or(0)
}

/// String field.
pub(crate) fn text(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

/// The `name` field of a `{"name": ..., ...}` subobject.
pub(crate) fn name_of(value: Option<&Value>) -> Option<String> {
    text(value.and_then(|v| v.get("name")))
}

/// Array field as a slice, empty when absent or mistyped.
pub(crate) fn array(value: Option<&Value>) -> &[Value] {
    value.and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}
