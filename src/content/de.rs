//! Lenient field decoding for CMS documents
//!
//! GROQ projections emit `null` for attributes a document does not have,
//! where `#[serde(default)]` only covers missing keys.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Decode `null` as the type's default
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a timestamp given as RFC 3339, a naive datetime or a bare date.
/// Unparseable values become `None`.
pub fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let parsed = parse_datetime(raw.trim());
    if parsed.is_none() {
        tracing::debug!("Ignoring unparseable timestamp {:?}", raw);
    }
    Ok(parsed)
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_datetime_forms() {
        let midnight = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        assert_eq!(parse_datetime("2024-03-05"), Some(midnight));
        assert_eq!(parse_datetime("2024-03-05T00:00:00Z"), Some(midnight));
        assert_eq!(parse_datetime("2024-03-05T00:00:00.000"), Some(midnight));
        assert_eq!(
            parse_datetime("2024-03-05T03:00:00+03:00"),
            Some(midnight)
        );
        assert_eq!(parse_datetime("last tuesday"), None);
    }
}
