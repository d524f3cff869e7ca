//! Shape inference for freshly closed `( ... )` groups.
//!
//! A group carrying any of the size keys is promoted to [`BoxMetrics`];
//! everything else stays a generic [`Group`]. The rule is purely key-based,
//! so `(Full: 16)` becomes box metrics even when it is meant as padding.
//! [`crate::query::Insets`] reads both shapes.

use crate::model::{BoxMetrics, Group, Value, probe};

/// Keys whose presence (bare or `@`-prefixed) triggers promotion.
pub const BOX_METRICS_KEYS: [&str; 4] = ["Width", "Height", "Full", "FlexWeight"];

/// Whether `group` has the box-metrics shape.
pub fn is_box_metrics(group: &Group) -> bool {
    BOX_METRICS_KEYS
        .iter()
        .any(|key| probe(group, key).is_some())
}

/// Promote `group` to [`Value::BoxMetrics`] if it has the shape, otherwise
/// wrap it as [`Value::Group`].
pub fn promote(group: Group) -> Value {
    if !is_box_metrics(&group) {
        return Value::Group(group);
    }

    let int = |key: &str| probe(&group, key).and_then(Value::as_i64);
    let metrics = BoxMetrics {
        width: int("Width"),
        height: int("Height"),
        full: int("Full"),
        flex_weight: probe(&group, "FlexWeight").and_then(Value::as_f64),
        top: int("Top"),
        bottom: int("Bottom"),
        left: int("Left"),
        right: int("Right"),
    };
    log::trace!("promoted group with {} keys to box metrics", group.len());
    Value::BoxMetrics(metrics)
}
