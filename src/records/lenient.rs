//! Field coercions for values whose JSON type varies across the dataset.

use serde::de::Error;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Integer(i64),
    Float(f64),
    String(String),
}

/// Identifier that may arrive as a JSON string or a JSON number.
pub(super) fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::Integer(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::String(s) => s,
    }))
}

/// Integer that may arrive as an integral float or a numeric string.
pub(super) fn opt_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Integer(i)) => Ok(Some(i)),
        Some(Scalar::Float(f)) if f.fract() == 0.0 && f.is_finite() => Ok(Some(f as i64)),
        Some(Scalar::Float(f)) => Err(D::Error::custom(format!(
            "expected an integer, got {}",
            f
        ))),
        Some(Scalar::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected an integer, got {:?}", s))),
    }
}
