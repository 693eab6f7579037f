use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Signed(i64),
    Unsigned(u64),
}

/// Accepts an identifier sent either as a JSON string or a JSON integer and
/// keeps it as a string. Primary keys arrive as UUID strings, some older
/// payloads carry integers.
pub fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => Ok(s),
        StringOrNumber::Signed(n) => Ok(n.to_string()),
        StringOrNumber::Unsigned(n) => Ok(n.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "deserialize_string_or_number")]
        id: String,
    }

    #[test]
    fn test_accepts_integer_id() {
        let holder: Holder = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(holder.id, "42");
    }

    #[test]
    fn test_accepts_string_id() {
        let holder: Holder = serde_json::from_str(r#"{"id": "u-7"}"#).unwrap();
        assert_eq!(holder.id, "u-7");
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(serde_json::from_str::<Holder>(r#"{"id": true}"#).is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"id": null}"#).is_err());
    }
}
