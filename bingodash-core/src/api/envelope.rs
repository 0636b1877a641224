use bingodash_model::WirePagination;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{
    ApiResult, DEFAULT_ERROR_MESSAGE, UNREADABLE_ERROR_MESSAGE,
};

/// A decoded response body.
///
/// The backend answers either with the bare payload or with
/// `{ "data": payload, "pagination": {...} }`; both land here.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub data: T,
    pub pagination: Option<WirePagination>,
}

impl<T> Envelope<T> {
    pub fn decode(body: &[u8]) -> ApiResult<Self>
    where
        T: DeserializeOwned,
    {
        let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(body)?
        };
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> ApiResult<Self>
    where
        T: DeserializeOwned,
    {
        match value {
            Value::Object(mut map)
                if map.get("data").is_some_and(|d| !d.is_null()) =>
            {
                let pagination = map
                    .remove("pagination")
                    .filter(|p| !p.is_null())
                    .map(serde_json::from_value)
                    .transpose()?;
                let data = map.remove("data").unwrap_or(Value::Null);
                Ok(Self {
                    data: serde_json::from_value(data)?,
                    pagination,
                })
            }
            bare => Ok(Self {
                data: serde_json::from_value(bare)?,
                pagination: None,
            }),
        }
    }
}

/// Human-readable message of an error response body.
///
/// Looks at `message`, then `error.message`, then a string `error`.
pub fn extract_error_message(body: &[u8]) -> String {
    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return UNREADABLE_ERROR_MESSAGE.to_string();
    };

    let message = value
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| {
            value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
        })
        .or_else(|| value.get("error").and_then(Value::as_str))
        .filter(|m| !m.trim().is_empty());

    message.unwrap_or(DEFAULT_ERROR_MESSAGE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn decodes_bare_payload() {
        let env: Envelope<Vec<Item>> =
            Envelope::decode(br#"[{"id":"a"}]"#).unwrap();
        assert_eq!(env.data, [Item { id: "a".into() }]);
        assert!(env.pagination.is_none());
    }

    #[test]
    fn decodes_wrapped_payload_with_pagination() {
        let env: Envelope<Vec<Item>> = Envelope::decode(
            br#"{"data":[{"id":"a"}],"pagination":{"total":1,"page":1,"limit":10,"totalPages":1}}"#,
        )
        .unwrap();
        assert_eq!(env.data.len(), 1);
        assert_eq!(env.pagination.unwrap().page_size, 10);
    }

    #[test]
    fn null_data_falls_back_to_whole_body() {
        let env: Envelope<Value> =
            Envelope::decode(br#"{"data":null,"ok":true}"#).unwrap();
        assert_eq!(env.data["ok"], true);
    }

    #[test]
    fn empty_body_decodes_as_null() {
        let env: Envelope<Option<Item>> = Envelope::decode(b"  ").unwrap();
        assert!(env.data.is_none());
    }

    #[test]
    fn error_message_precedence() {
        assert_eq!(
            extract_error_message(br#"{"message":"top","error":{"message":"nested"}}"#),
            "top"
        );
        assert_eq!(
            extract_error_message(br#"{"error":{"message":"nested"}}"#),
            "nested"
        );
        assert_eq!(extract_error_message(br#"{"error":"flat"}"#), "flat");
        assert_eq!(extract_error_message(br#"{"status":500}"#), "Request failed");
        assert_eq!(extract_error_message(b"<html>"), "An error occurred");
    }
}
