//! JSON shape hooks for the well-known types.
//!
//! After a message serializes to an object, [`pack`] replaces the object
//! with the type's canonical shape when its qualified name matches the
//! table below. Before parsing, [`unpack`] wraps the incoming JSON value
//! back into the object form the field walk expects.
//!
//! | qualified name | JSON shape |
//! |---|---|
//! | `google.protobuf.Empty` | `{}` |
//! | `google.protobuf.Duration` | `"<sec>[.<nanos>]s"` |
//! | `google.protobuf.Timestamp` | RFC 3339 UTC string |
//! | `google.protobuf.*Value` wrappers | the inner `value`, unwrapped |
//! | `google.protobuf.Value` | the active oneof variant, unwrapped |
//! | `google.protobuf.Struct` | the `fields` map as an object |
//! | `google.protobuf.ListValue` | the `values` list as an array |
//! | `google.protobuf.FieldMask` | comma-joined camelCase paths |

use serde_json::{json, Map, Value};

use crate::error::DecodeError;

const EMPTY: &str = "google.protobuf.Empty";
const DURATION: &str = "google.protobuf.Duration";
const TIMESTAMP: &str = "google.protobuf.Timestamp";
const STRUCT: &str = "google.protobuf.Struct";
const VALUE: &str = "google.protobuf.Value";
const LIST_VALUE: &str = "google.protobuf.ListValue";
const FIELD_MASK: &str = "google.protobuf.FieldMask";

const WRAPPERS: [&str; 9] = [
    "google.protobuf.DoubleValue",
    "google.protobuf.FloatValue",
    "google.protobuf.Int64Value",
    "google.protobuf.UInt64Value",
    "google.protobuf.Int32Value",
    "google.protobuf.UInt32Value",
    "google.protobuf.BoolValue",
    "google.protobuf.StringValue",
    "google.protobuf.BytesValue",
];

/// True if the qualified name has a special JSON shape.
pub fn is_well_known(name: &str) -> bool {
    matches!(
        name,
        EMPTY | DURATION | TIMESTAMP | STRUCT | VALUE | LIST_VALUE | FIELD_MASK
    ) || WRAPPERS.contains(&name)
}

/// Replace a serialized object with the type's canonical JSON shape.
///
/// `value` is the object produced by the field walk (with defaults kept,
/// see the serializer). Non-well-known names pass through unchanged.
pub(crate) fn pack(name: &str, value: Value) -> Value {
    if !is_well_known(name) {
        return value;
    }
    let object = match value {
        Value::Object(object) => object,
        other => return other,
    };
    match name {
        EMPTY => Value::Object(Map::new()),
        DURATION => {
            let seconds = object_i64(&object, "seconds");
            let nanos = object_i32(&object, "nanos");
            Value::String(format_duration(seconds, nanos))
        }
        TIMESTAMP => {
            let seconds = object_i64(&object, "seconds");
            let nanos = object_i32(&object, "nanos");
            Value::String(format_timestamp(seconds, nanos))
        }
        STRUCT => object
            .get("fields")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new())),
        LIST_VALUE => object
            .get("values")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())),
        VALUE => {
            // The object holds the single active oneof variant. An unset
            // Value renders as null.
            let mut entries = object.into_iter();
            match entries.next() {
                Some((key, inner)) => match key.as_str() {
                    "nullValue" | "null_value" => Value::Null,
                    _ => inner,
                },
                None => Value::Null,
            }
        }
        FIELD_MASK => {
            let paths = match object.get("paths") {
                Some(Value::Array(paths)) => paths
                    .iter()
                    .filter_map(Value::as_str)
                    .map(snake_to_camel)
                    .collect::<Vec<_>>(),
                _ => Vec::new(),
            };
            Value::String(paths.join(","))
        }
        wrapper => object
            .get("value")
            .cloned()
            .unwrap_or_else(|| wrapper_default(wrapper)),
    }
}

/// Wrap an incoming JSON value back into the object form the generated
/// deserializer expects. Returns `None` for non-well-known names.
pub(crate) fn unpack(name: &str, value: &Value) -> Result<Option<Value>, DecodeError> {
    if !is_well_known(name) {
        return Ok(None);
    }
    let wrapped = match name {
        EMPTY => match value {
            Value::Object(_) => Value::Object(Map::new()),
            _ => return Err(DecodeError::illegal_value("expected JSON object", EMPTY)),
        },
        DURATION => {
            let text = value
                .as_str()
                .ok_or_else(|| DecodeError::illegal_value("expected duration string", DURATION))?;
            let (seconds, nanos) = parse_duration(text)?;
            json!({ "seconds": seconds.to_string(), "nanos": nanos })
        }
        TIMESTAMP => {
            let text = value
                .as_str()
                .ok_or_else(|| DecodeError::illegal_value("expected timestamp string", TIMESTAMP))?;
            let (seconds, nanos) = parse_timestamp(text)?;
            json!({ "seconds": seconds.to_string(), "nanos": nanos })
        }
        STRUCT => match value {
            Value::Object(_) => json!({ "fields": value.clone() }),
            _ => return Err(DecodeError::illegal_value("expected JSON object", STRUCT)),
        },
        LIST_VALUE => match value {
            Value::Array(_) => json!({ "values": value.clone() }),
            _ => return Err(DecodeError::illegal_value("expected JSON array", LIST_VALUE)),
        },
        VALUE => match value {
            Value::Null => json!({ "nullValue": Value::Null }),
            Value::Bool(_) => json!({ "boolValue": value.clone() }),
            Value::Number(_) => json!({ "numberValue": value.clone() }),
            Value::String(_) => json!({ "stringValue": value.clone() }),
            Value::Array(_) => json!({ "listValue": value.clone() }),
            Value::Object(_) => json!({ "structValue": value.clone() }),
        },
        FIELD_MASK => {
            let text = value
                .as_str()
                .ok_or_else(|| DecodeError::illegal_value("expected paths string", FIELD_MASK))?;
            let paths: Vec<Value> = if text.is_empty() {
                Vec::new()
            } else {
                text.split(',')
                    .map(|path| Value::String(camel_to_snake(path.trim())))
                    .collect()
            };
            json!({ "paths": paths })
        }
        _wrapper => json!({ "value": value.clone() }),
    };
    Ok(Some(wrapped))
}

/// The unwrapped JSON form of a wrapper message holding its default.
fn wrapper_default(name: &str) -> Value {
    match name {
        "google.protobuf.DoubleValue" | "google.protobuf.FloatValue" => Value::from(0),
        "google.protobuf.Int64Value" | "google.protobuf.UInt64Value" => {
            Value::String("0".to_string())
        }
        "google.protobuf.Int32Value" | "google.protobuf.UInt32Value" => Value::from(0),
        "google.protobuf.BoolValue" => Value::Bool(false),
        _ => Value::String(String::new()),
    }
}

// Readers tolerant of the two forms the field walk emits: 64-bit integers
// arrive as strings, 32-bit as numbers.

fn object_i64(object: &Map<String, Value>, key: &str) -> i64 {
    match object.get(key) {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.parse().unwrap_or(0),
        _ => 0,
    }
}

fn object_i32(object: &Map<String, Value>, key: &str) -> i32 {
    object_i64(object, key) as i32
}

/// Format a Duration as `"<sec>[.<nanos>]s"`.
///
/// Nine fractional digits whenever nanos is nonzero; the sign is shared by
/// both components.
pub fn format_duration(seconds: i64, nanos: i32) -> String {
    if nanos == 0 {
        format!("{seconds}s")
    } else {
        let sign = if seconds < 0 || nanos < 0 { "-" } else { "" };
        format!(
            "{}{}.{:09}s",
            sign,
            seconds.unsigned_abs(),
            nanos.unsigned_abs()
        )
    }
}

/// Parse a Duration string.
///
/// Accepts 1 to 9 fractional digits (canonical writers emit 0, 3, 6, or
/// 9). Nanos are re-signed to match the seconds component regardless of
/// how the JSON was formatted.
pub fn parse_duration(text: &str) -> Result<(i64, i32), DecodeError> {
    let body = text
        .strip_suffix('s')
        .ok_or_else(|| DecodeError::illegal_value("missing 's' suffix", "duration"))?;
    let (negative, body) = match body.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, body),
    };
    let (sec_text, frac_text) = match body.split_once('.') {
        Some((sec, frac)) => (sec, Some(frac)),
        None => (body, None),
    };
    let seconds: i64 = sec_text
        .parse()
        .map_err(|_| DecodeError::illegal_value("malformed seconds", "duration"))?;
    let nanos = match frac_text {
        Some(frac) => {
            if frac.is_empty() || frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                return Err(DecodeError::illegal_value(
                    "malformed fractional seconds",
                    "duration",
                ));
            }
            let mut digits = frac.to_string();
            while digits.len() < 9 {
                digits.push('0');
            }
            digits
                .parse::<i32>()
                .map_err(|_| DecodeError::illegal_value("malformed fractional seconds", "duration"))?
        }
        None => 0,
    };
    if negative {
        Ok((-seconds, -nanos))
    } else {
        Ok((seconds, nanos))
    }
}

/// Format a Timestamp as an RFC 3339 UTC string with a `Z` suffix.
///
/// Fractional digits are trimmed to 0, 3, 6, or 9.
pub fn format_timestamp(seconds: i64, nanos: i32) -> String {
    let days = seconds.div_euclid(86_400);
    let secs_of_day = seconds.rem_euclid(86_400);
    let (year, month, day) = civil_from_days(days);
    let hour = secs_of_day / 3600;
    let minute = secs_of_day % 3600 / 60;
    let second = secs_of_day % 60;

    let frac = if nanos == 0 {
        String::new()
    } else if nanos % 1_000_000 == 0 {
        format!(".{:03}", nanos / 1_000_000)
    } else if nanos % 1_000 == 0 {
        format!(".{:06}", nanos / 1_000)
    } else {
        format!(".{nanos:09}")
    };

    format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}{frac}Z")
}

/// Parse an RFC 3339 timestamp, accepting up to 9 fractional digits and
/// either a `Z` suffix or a `±hh:mm` offset.
pub fn parse_timestamp(text: &str) -> Result<(i64, i32), DecodeError> {
    let bad = || DecodeError::illegal_value("malformed RFC 3339 timestamp", "timestamp");

    let (date_text, rest) = text
        .split_once(['T', 't'])
        .ok_or_else(bad)?;

    let mut date_parts = date_text.splitn(3, '-');
    let year: i64 = date_parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
    let month: i64 = date_parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
    let day: i64 = date_parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
    if !(1..=9999).contains(&year) || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(bad());
    }

    // Split the time from its zone designator.
    let (time_text, offset_seconds) = if let Some(t) = rest.strip_suffix(['Z', 'z']) {
        (t, 0i64)
    } else if let Some(plus) = rest.rfind('+') {
        (&rest[..plus], parse_offset(&rest[plus + 1..])?)
    } else if let Some(minus) = rest.rfind('-') {
        (&rest[..minus], -parse_offset(&rest[minus + 1..])?)
    } else {
        return Err(bad());
    };

    let (clock_text, frac_text) = match time_text.split_once('.') {
        Some((clock, frac)) => (clock, Some(frac)),
        None => (time_text, None),
    };
    let mut clock_parts = clock_text.splitn(3, ':');
    let hour: i64 = clock_parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
    let minute: i64 = clock_parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
    let second: i64 = clock_parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
    if !(0..=23).contains(&hour) || !(0..=59).contains(&minute) || !(0..=59).contains(&second) {
        return Err(bad());
    }

    let nanos = match frac_text {
        Some(frac) => {
            if frac.is_empty() || frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                return Err(bad());
            }
            let mut digits = frac.to_string();
            while digits.len() < 9 {
                digits.push('0');
            }
            digits.parse::<i32>().map_err(|_| bad())?
        }
        None => 0,
    };

    let days = days_from_civil(year, month, day);
    let seconds = days * 86_400 + hour * 3600 + minute * 60 + second - offset_seconds;
    Ok((seconds, nanos))
}

fn parse_offset(text: &str) -> Result<i64, DecodeError> {
    let bad = || DecodeError::illegal_value("malformed zone offset", "timestamp");
    let (hours, minutes) = text.split_once(':').ok_or_else(bad)?;
    let hours: i64 = hours.parse().map_err(|_| bad())?;
    let minutes: i64 = minutes.parse().map_err(|_| bad())?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return Err(bad());
    }
    Ok(hours * 3600 + minutes * 60)
}

/// Days since 1970-01-01 for a proleptic Gregorian civil date.
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let yoe = year - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`].
fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    (if month <= 2 { year + 1 } else { year }, month, day)
}

/// `foo_bar_baz` to `fooBarBaz`.
pub(crate) fn snake_to_camel(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut upper_next = false;
    for c in path.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `fooBarBaz` to `foo_bar_baz`.
pub(crate) fn camel_to_snake(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 4);
    for c in path.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
