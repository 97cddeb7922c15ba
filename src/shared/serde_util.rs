//! Custom serde helpers for backend wire formats.

/// Deserializes a Unix-millis `u64` into `DateTime<Utc>`.
///
/// The backend's WebSocket sends bar times as epoch milliseconds, not ISO 8601
/// strings.
pub mod timestamp_ms {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        DateTime::<Utc>::from_timestamp_millis(millis as i64)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", millis)))
    }
}

/// Deserializes a transaction time that may arrive as epoch millis or as an
/// RFC 3339 string, depending on the endpoint.
pub mod flexible_time {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Millis(ms) => DateTime::<Utc>::from_timestamp_millis(ms)
                .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", ms))),
            Raw::Text(s) => s
                .parse::<DateTime<Utc>>()
                .map_err(|e| serde::de::Error::custom(format!("Invalid timestamp '{}': {}", s, e))),
        }
    }
}

/// Optional variant of [`flexible_time`] for fields that may be absent or null.
pub mod flexible_time_opt {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<Raw> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(Raw::Millis(ms)) => Ok(DateTime::<Utc>::from_timestamp_millis(ms)),
            Some(Raw::Text(s)) => Ok(s.parse::<DateTime<Utc>>().ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(with = "super::flexible_time")]
        time: DateTime<Utc>,
    }

    #[test]
    fn test_flexible_time_from_millis() {
        let row: Row = serde_json::from_str(r#"{"time": 1740076800000}"#).unwrap();
        assert_eq!(row.time.timestamp_millis(), 1740076800000);
    }

    #[test]
    fn test_flexible_time_from_rfc3339() {
        let row: Row = serde_json::from_str(r#"{"time": "2025-02-20T18:40:00Z"}"#).unwrap();
        assert_eq!(row.time.timestamp(), 1740076800);
    }

    #[test]
    fn test_flexible_time_rejects_garbage() {
        let result: Result<Row, _> = serde_json::from_str(r#"{"time": "yesterday"}"#);
        assert!(result.is_err());
    }
}
