//! Lenient deserializers for fields the stored data is sloppy about.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Coerce a money amount that may arrive as a number, a numeric string, or
/// garbage. Anything unparsable counts as 0.
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
        Junk(IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Int(amount)) => amount,
        Some(Raw::Float(amount)) if amount.is_finite() => amount as i64,
        Some(Raw::Text(raw)) => {
            let raw = raw.trim();
            raw.parse::<i64>()
                .or_else(|_| raw.parse::<f64>().map(|f| f as i64))
                .unwrap_or(0)
        }
        _ => 0,
    })
}

/// Tags may be stored as a plain array or as a JSON-encoded string (legacy
/// rows). Absent or undecodable input is an empty list.
pub fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Encoded(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::List(tags)) => tags,
        Some(Raw::Encoded(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct AmountHolder {
        #[serde(default, deserialize_with = "super::lenient_amount")]
        amount: i64,
    }

    #[derive(Deserialize)]
    struct TagsHolder {
        #[serde(default, deserialize_with = "super::lenient_tags")]
        tags: Vec<String>,
    }

    fn amount(json: &str) -> i64 {
        serde_json::from_str::<AmountHolder>(json).unwrap().amount
    }

    #[test]
    fn amounts_coerce_like_parse_float_or_zero() {
        assert_eq!(amount(r#"{"amount": 400000}"#), 400_000);
        assert_eq!(amount(r#"{"amount": "400000"}"#), 400_000);
        assert_eq!(amount(r#"{"amount": " 250 "}"#), 250);
        assert_eq!(amount(r#"{"amount": 99.9}"#), 99);
        assert_eq!(amount(r#"{"amount": "oops"}"#), 0);
        assert_eq!(amount(r#"{"amount": null}"#), 0);
        assert_eq!(amount(r#"{"amount": [1, 2]}"#), 0);
        assert_eq!(amount(r#"{}"#), 0);
    }

    #[test]
    fn tags_decode_from_either_shape() {
        let holder: TagsHolder = serde_json::from_str(r#"{"tags": ["a", "b"]}"#).unwrap();
        assert_eq!(holder.tags, vec!["a", "b"]);

        let holder: TagsHolder = serde_json::from_str(r#"{"tags": "[\"a\"]"}"#).unwrap();
        assert_eq!(holder.tags, vec!["a"]);

        let holder: TagsHolder = serde_json::from_str(r#"{"tags": "not json"}"#).unwrap();
        assert!(holder.tags.is_empty());

        let holder: TagsHolder = serde_json::from_str(r#"{"tags": null}"#).unwrap();
        assert!(holder.tags.is_empty());
    }
}
