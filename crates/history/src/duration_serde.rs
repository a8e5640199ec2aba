// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Serde helpers for Duration serialization.
//!
//! Durations serialize as compact unit strings (`"250ms"`). Deserialization also
//! accepts integer milliseconds and `{ secs, nanos }` tables.

use crate::duration;
use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

#[derive(Deserialize)]
#[serde(untagged)]
enum DurationRepr {
    Text(String),
    Millis(u64),
    Parts { secs: u64, nanos: u32 },
}

impl DurationRepr {
    fn into_duration<E: serde::de::Error>(self) -> Result<Duration, E> {
        match self {
            Self::Text(text) => duration::parse(&text).map_err(E::custom),
            Self::Millis(ms) => Ok(Duration::from_millis(ms)),
            Self::Parts { secs, nanos } => Ok(Duration::new(secs, nanos)),
        }
    }
}

pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&duration::format(*value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    DurationRepr::deserialize(deserializer)?.into_duration()
}

/// Same encoding for `Vec<Duration>`.
pub mod seq {
    use super::DurationRepr;
    use crate::duration;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(values: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            seq.serialize_element(&duration::format(*value))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<DurationRepr>::deserialize(deserializer)?
            .into_iter()
            .map(DurationRepr::into_duration)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Holder {
        #[serde(with = "super")]
        single: Duration,
        #[serde(with = "super::seq")]
        many: Vec<Duration>,
    }

    #[test]
    fn test_serializes_as_compact_text() {
        let holder = Holder {
            single: Duration::from_millis(1_500),
            many: vec![Duration::from_millis(100), Duration::ZERO],
        };
        let json = serde_json::to_string(&holder).unwrap();
        assert_eq!(json, r#"{"single":"1.5s","many":["100ms","0s"]}"#);
    }

    #[test]
    fn test_deserializes_all_representations() {
        let json = r#"{"single":{"secs":2,"nanos":5},"many":["1m",250,"3us"]}"#;
        let holder: Holder = serde_json::from_str(json).unwrap();
        assert_eq!(holder.single, Duration::new(2, 5));
        assert_eq!(
            holder.many,
            vec![
                Duration::from_secs(60),
                Duration::from_millis(250),
                Duration::from_micros(3),
            ]
        );
    }

    #[test]
    fn test_rejects_bad_text() {
        let json = r#"{"single":"soon","many":[]}"#;
        let err = serde_json::from_str::<Holder>(json).unwrap_err();
        assert!(err.to_string().contains("soon"));
    }
}
