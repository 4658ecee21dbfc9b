//! Wire encoding policy shared by every tracker schema.
//!
//! All schema types derive serde with `rename_all = "camelCase"` and accept the
//! snake-case logical name as an alias on decode. This module holds the pieces
//! that cannot be expressed as derive attributes: the naming rule itself, the
//! date-time format and the validate-then-encode entry points.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::errors::{TrackerApiError, TrackerError};
use crate::domain::validation::Validate;

/// Offset format used by the tracker API (`+0300`), tried after RFC 3339.
const TRACKER_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Convert a logical `snake_case` field name to its camel-cased wire name.
///
/// The first word is kept as is; every following word gets its first letter
/// upper-cased and the rest lower-cased.
///
/// ```
/// use yatracker::domain::models::wire::to_camel_case;
///
/// assert_eq!(to_camel_case("created_by"), "createdBy");
/// assert_eq!(to_camel_case("summary"), "summary");
/// ```
pub fn to_camel_case(name: &str) -> String {
    let mut words = name.split('_');
    let mut out = words.next().unwrap_or_default().to_string();
    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}

/// Format a date-time with millisecond precision and an explicit numeric offset.
pub fn format_datetime(value: &DateTime<FixedOffset>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, false)
}

/// Parse an RFC 3339 date-time, falling back to the tracker's `+hhmm` offset form.
pub fn parse_datetime(raw: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, TRACKER_DATETIME_FORMAT))
}

/// Validate a request and serialize it to a JSON body.
///
/// Unset optional fields are skipped by the schema derives, so the body never
/// carries `null` entries.
pub fn encode<T>(request: &T) -> Result<String, TrackerError>
where
    T: Serialize + Validate,
{
    request.validate()?;
    serde_json::to_string(request).map_err(|e| TrackerApiError::Encode(e).into())
}

/// Decode a response body, ignoring fields the schema does not declare.
pub fn decode<T>(body: &[u8]) -> Result<T, TrackerApiError>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|source| TrackerApiError::Decode {
        source,
        body: String::from_utf8_lossy(body).into_owned(),
    })
}

/// Serde adapter for required date-time fields.
pub mod datetime {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_datetime(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_datetime(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional date-time fields.
///
/// Pair with `#[serde(default, skip_serializing_if = "Option::is_none")]`.
pub mod datetime_opt {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(
        value: &Option<DateTime<FixedOffset>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => super::datetime::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| super::parse_datetime(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// Serde adapter for optional text fields that configuration sources may hand
/// over as numbers (an unquoted org id in YAML or in the environment).
pub mod lenient_string_opt {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Str(String),
        UInt(u64),
        Int(i64),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Text>::deserialize(deserializer)?.map(|text| match text {
            Text::Str(value) => value,
            Text::UInt(value) => value.to_string(),
            Text::Int(value) => value.to_string(),
        }))
    }
}
