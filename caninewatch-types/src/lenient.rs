//! Permissive number decoding.
//!
//! The backend computes percentages as floats and echoes them back as
//! `50.0`, while the client model treats activity as a whole percent.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Number {
    Int(i64),
    Float(f64),
}

/// Accept an integer or a float and truncate toward zero.
pub(crate) fn whole_percent<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Number>::deserialize(deserializer)?;
    Ok(match value {
        Some(Number::Int(i)) => i.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        Some(Number::Float(f)) if f.is_finite() => f.trunc() as i32,
        _ => 0,
    })
}
