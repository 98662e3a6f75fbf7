// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lenient field deserializers.
//!
//! Editor text fields deliver numbers and flags as strings, and stored
//! configurations are hand-edited. These helpers accept either form and fall
//! back to a neutral value instead of failing the whole document.

use alloc::string::{String, ToString};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn to_f64(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };
    v.is_finite().then_some(v)
}

/// A number or numeric string; anything else becomes `NaN` for the normalizer to replace.
pub(crate) fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(to_f64(&value).unwrap_or_else(|| {
        if !value.is_null() {
            tracing::debug!(%value, "non-numeric value in numeric field");
        }
        f64::NAN
    }))
}

/// An optional number: `null`, `""` and non-numeric input are `None`.
pub(crate) fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(to_f64(&value))
}

/// An optional non-negative count (tick counts, decimal places).
pub(crate) fn opt_count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(to_f64(&value).filter(|v| *v >= 0.0).map(|v| {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "counts are small non-negative integers; `as` saturates"
        )]
        let n = v as u32;
        n
    }))
}

/// A boolean, or the strings `"true"`/`"false"`.
pub(crate) fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match &value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        _ => false,
    })
}

/// A string; numbers are printed, `null` and other shapes become empty.
pub(crate) fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// An enumerated value; unknown variants fall back to the default.
pub(crate) fn or_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let value = Value::deserialize(d)?;
    Ok(T::deserialize(value).unwrap_or_else(|err| {
        tracing::warn!(%err, "unrecognized option, using default");
        T::default()
    }))
}

/// An optional enumerated value; `null`, `""` and unknown variants are `None`.
pub(crate) fn opt_variant<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value = Value::deserialize(d)?;
    match &value {
        Value::Null => return Ok(None),
        Value::String(s) if s.is_empty() => return Ok(None),
        _ => {}
    }
    Ok(T::deserialize(value)
        .map_err(|err| tracing::warn!(%err, "unrecognized option, leaving unset"))
        .ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Fields {
        #[serde(deserialize_with = "number")]
        n: f64,
        #[serde(deserialize_with = "opt_number")]
        o: Option<f64>,
        #[serde(deserialize_with = "opt_count")]
        c: Option<u32>,
        #[serde(deserialize_with = "flag")]
        f: bool,
        #[serde(deserialize_with = "text")]
        t: String,
    }

    #[test]
    fn strings_from_text_fields_are_accepted() {
        let p: Fields =
            serde_json::from_str(r#"{"n":"12.5","o":"","c":"2","f":"true","t":7}"#).unwrap();
        assert_eq!(p.n, 12.5);
        assert_eq!(p.o, None);
        assert_eq!(p.c, Some(2));
        assert!(p.f);
        assert_eq!(p.t, "7");
    }

    #[test]
    fn garbage_degrades_instead_of_failing() {
        let p: Fields =
            serde_json::from_str(r#"{"n":"abc","o":{},"c":-3,"f":"false","t":null}"#).unwrap();
        assert!(p.n.is_nan());
        assert_eq!(p.o, None);
        assert_eq!(p.c, None);
        assert!(!p.f);
        assert_eq!(p.t, "");
    }
}
