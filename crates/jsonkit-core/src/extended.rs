//! Extended JSON codec (MongoDB Extended JSON v2 subset).
//!
//! Values that plain JSON cannot carry without losing their type are written
//! as `$`-prefixed wrapper objects. Two modes are supported:
//!
//! - **Relaxed** (default): native JSON numbers wherever lossless, ISO-8601
//!   strings for dates between 1970 and 9999.
//! - **Canonical**: every number and date gets an explicit type wrapper.
//!
//! | Value | canonical | relaxed |
//! |---|---|---|
//! | `Integer` in i32 range | `{"$numberInt":"7"}` | `7` |
//! | `Integer` beyond i32 | `{"$numberLong":"7000000000"}` | `7000000000` |
//! | `Float` | `{"$numberDouble":"1.5"}` | `1.5` |
//! | non-finite `Float` | `{"$numberDouble":"NaN"}` | same |
//! | `Date` | `{"$date":{"$numberLong":"0"}}` | `{"$date":"1970-01-01T00:00:00.000Z"}` |
//! | `Binary` | `{"$binary":{"base64":"AQI=","subType":"00"}}` | same |
//!
//! Decoding recognises wrappers only in their exact shape; an object that
//! merely contains a `$date` key among others stays a plain object. Relaxed
//! decoding is lenient about payload types (numbers inside numeric wrappers,
//! `{"$date": <millis>}`, the legacy `{"$binary": "...", "$type": "00"}`
//! form); strict decoding accepts only string payloads.
//!
//! # Example
//! ```
//! use jsonkit_core::{ExtendedCodec, Value};
//!
//! let date = Value::date_from_millis(1_669_902_255_177).unwrap();
//! let codec = ExtendedCodec::relaxed();
//! let text = codec.encode_str(&date).unwrap();
//! assert_eq!(text, r#"{"$date":"2022-12-01T13:44:15.177Z"}"#);
//! assert_eq!(codec.decode_str(&text).unwrap(), date);
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Datelike, Utc};
use serde_json::{json, Map as JsonMap, Value as Json};

use crate::error::{CodecError, Result};
use crate::types::{format_date, number_to_value, Binary, Map, Value};

/// Extended JSON encoder/decoder for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedCodec {
    relaxed: bool,
}

impl Default for ExtendedCodec {
    fn default() -> Self {
        Self::relaxed()
    }
}

impl ExtendedCodec {
    pub fn new(relaxed: bool) -> Self {
        Self { relaxed }
    }

    pub fn relaxed() -> Self {
        Self::new(true)
    }

    pub fn canonical() -> Self {
        Self::new(false)
    }

    pub fn is_relaxed(&self) -> bool {
        self.relaxed
    }

    // ----------------------------------------------------------------
    // Encoding

    /// Lower a value to JSON, wrapping typed values.
    pub fn to_json(&self, value: &Value) -> Json {
        match value {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Integer(i) => self.integer_to_json(*i),
            Value::Float(f) => self.float_to_json(*f),
            Value::String(s) => Json::String(s.clone()),
            Value::Date(date) => self.date_to_json(date),
            Value::Binary(bin) => json!({
                "$binary": {
                    "base64": STANDARD.encode(&bin.bytes),
                    "subType": format!("{:02x}", bin.subtype),
                }
            }),
            Value::Array(arr) => Json::Array(arr.iter().map(|item| self.to_json(item)).collect()),
            Value::Object(map) => Json::Object(
                map.iter()
                    .map(|(key, child)| (key.clone(), self.to_json(child)))
                    .collect(),
            ),
        }
    }

    /// Encode a value to compact extended JSON text.
    pub fn encode_str(&self, value: &Value) -> Result<String> {
        Ok(serde_json::to_string(&self.to_json(value))?)
    }

    fn integer_to_json(&self, i: i64) -> Json {
        if self.relaxed {
            Json::from(i)
        } else if i32::try_from(i).is_ok() {
            json!({ "$numberInt": i.to_string() })
        } else {
            json!({ "$numberLong": i.to_string() })
        }
    }

    fn float_to_json(&self, f: f64) -> Json {
        match serde_json::Number::from_f64(f) {
            Some(n) if self.relaxed => Json::Number(n),
            _ => json!({ "$numberDouble": format_double(f) }),
        }
    }

    fn date_to_json(&self, date: &DateTime<Utc>) -> Json {
        if self.relaxed && (1970..=9999).contains(&date.year()) {
            json!({ "$date": format_date(date) })
        } else {
            json!({ "$date": { "$numberLong": date.timestamp_millis().to_string() } })
        }
    }

    // ----------------------------------------------------------------
    // Decoding

    /// Lift JSON into a value, unwrapping typed wrappers.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Extended`] when a wrapper has the right shape but
    /// an invalid payload (e.g. `{"$numberLong": "abc"}`).
    pub fn from_json(&self, value: Json) -> Result<Value> {
        let mut path = Vec::new();
        self.lift(value, &mut path)
    }

    /// Parse extended JSON text.
    pub fn decode_str(&self, text: &str) -> Result<Value> {
        let json: Json = serde_json::from_str(text)?;
        self.from_json(json)
    }

    fn lift(&self, value: Json, path: &mut Vec<String>) -> Result<Value> {
        match value {
            Json::Null => Ok(Value::Null),
            Json::Bool(b) => Ok(Value::Bool(b)),
            Json::Number(n) => Ok(number_to_value(&n)),
            Json::String(s) => Ok(Value::String(s)),
            Json::Array(arr) => {
                let mut out = Vec::with_capacity(arr.len());
                for (i, item) in arr.into_iter().enumerate() {
                    path.push(i.to_string());
                    out.push(self.lift(item, path)?);
                    path.pop();
                }
                Ok(Value::Array(out))
            }
            Json::Object(map) => {
                if let Some(typed) = self.lift_wrapper(&map, path)? {
                    return Ok(typed);
                }
                let mut out = Map::with_capacity(map.len());
                for (key, child) in map {
                    path.push(key.clone());
                    let child = self.lift(child, path)?;
                    path.pop();
                    out.insert(key, child);
                }
                Ok(Value::Object(out))
            }
        }
    }

    /// Recognise a wrapper object. `Ok(None)` means "plain object".
    fn lift_wrapper(&self, map: &JsonMap<String, Json>, path: &[String]) -> Result<Option<Value>> {
        if map.len() == 2 && self.relaxed {
            if let (Some(Json::String(b64)), Some(Json::String(subtype))) =
                (map.get("$binary"), map.get("$type"))
            {
                return self.binary(b64, subtype, path).map(Some);
            }
        }
        if map.len() != 1 {
            return Ok(None);
        }
        let Some((key, payload)) = map.iter().next() else {
            return Ok(None);
        };
        let typed = match key.as_str() {
            "$numberInt" => {
                let i = self.numeric_payload::<i32>(payload, "$numberInt", path)?;
                Value::Integer(i as i64)
            }
            "$numberLong" => Value::Integer(self.numeric_payload::<i64>(payload, "$numberLong", path)?),
            "$numberDouble" => Value::Float(self.double_payload(payload, path)?),
            "$date" => Value::Date(self.date_payload(payload, path)?),
            "$binary" => match payload {
                Json::Object(inner) if inner.len() == 2 => {
                    match (inner.get("base64"), inner.get("subType")) {
                        (Some(Json::String(b64)), Some(Json::String(subtype))) => {
                            self.binary(b64, subtype, path)?
                        }
                        _ => return Err(invalid(path, "$binary needs string base64 and subType")),
                    }
                }
                _ => return Err(invalid(path, "$binary must be {base64, subType}")),
            },
            _ => return Ok(None),
        };
        Ok(Some(typed))
    }

    fn numeric_payload<T>(&self, payload: &Json, tag: &str, path: &[String]) -> Result<T>
    where
        T: std::str::FromStr + TryFrom<i64>,
    {
        match payload {
            Json::String(s) => s
                .parse::<T>()
                .map_err(|_| invalid(path, &format!("{tag} value {s:?} is out of range or not an integer"))),
            Json::Number(n) if self.relaxed => n
                .as_i64()
                .and_then(|i| T::try_from(i).ok())
                .ok_or_else(|| invalid(path, &format!("{tag} value {n} is out of range or not an integer"))),
            _ => Err(invalid(path, &format!("{tag} payload must be a string"))),
        }
    }

    fn double_payload(&self, payload: &Json, path: &[String]) -> Result<f64> {
        match payload {
            Json::String(s) => match s.as_str() {
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                "NaN" => Ok(f64::NAN),
                other => other
                    .parse::<f64>()
                    .map_err(|_| invalid(path, &format!("$numberDouble value {other:?} is not a number"))),
            },
            Json::Number(n) if self.relaxed => n
                .as_f64()
                .ok_or_else(|| invalid(path, "$numberDouble value is not a number")),
            _ => Err(invalid(path, "$numberDouble payload must be a string")),
        }
    }

    fn date_payload(&self, payload: &Json, path: &[String]) -> Result<DateTime<Utc>> {
        let millis = match payload {
            Json::String(iso) => {
                return DateTime::parse_from_rfc3339(iso)
                    .map(|date| date.with_timezone(&Utc))
                    .map_err(|err| invalid(path, &format!("$date {iso:?} is not ISO-8601: {err}")));
            }
            Json::Object(inner) if inner.len() == 1 => match inner.get("$numberLong") {
                Some(long) => self.numeric_payload::<i64>(long, "$numberLong", path)?,
                None => return Err(invalid(path, "$date object must be {$numberLong}")),
            },
            Json::Number(n) if self.relaxed => n
                .as_i64()
                .ok_or_else(|| invalid(path, "$date milliseconds must be an integer"))?,
            _ => return Err(invalid(path, "unsupported $date payload")),
        };
        match Value::date_from_millis(millis) {
            Some(Value::Date(date)) => Ok(date),
            _ => Err(invalid(path, &format!("$date {millis} is out of range"))),
        }
    }

    fn binary(&self, b64: &str, subtype: &str, path: &[String]) -> Result<Value> {
        let bytes = STANDARD
            .decode(b64)
            .map_err(|err| invalid(path, &format!("$binary base64 is invalid: {err}")))?;
        let subtype = u8::from_str_radix(subtype, 16)
            .ok()
            .filter(|_| (1..=2).contains(&subtype.len()))
            .ok_or_else(|| invalid(path, &format!("$binary subType {subtype:?} is not a hex byte")))?;
        Ok(Value::Binary(Binary { subtype, bytes }))
    }
}

/// `$numberDouble` text: shortest round-trip form, always with a fraction or exponent.
fn format_double(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f == f64::INFINITY {
        "Infinity".to_string()
    } else if f == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        format!("{f:?}")
    }
}

fn invalid(path: &[String], message: &str) -> CodecError {
    CodecError::Extended {
        path: pointer(path),
        message: message.to_string(),
    }
}

/// Render a path as a JSON pointer (RFC 6901 escaping).
fn pointer(path: &[String]) -> String {
    if path.is_empty() {
        return "/".to_string();
    }
    path.iter()
        .map(|segment| format!("/{}", segment.replace('~', "~0").replace('/', "~1")))
        .collect()
}
