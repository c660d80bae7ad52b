//! Free-form request options
//!
//! Most endpoints accept extra keys (filters, paging, scoring) beside their
//! required fields. Callers pass them as a JSON object which is merged
//! shallowly into the request body. Named fields are written last and win
//! on a key collision.

use crate::error::{ApiError, ApiResult};
use serde::Serialize;
use serde_json::{Map, Value};

/// Extra request body keys
pub type Options = Map<String, Value>;

/// Serialize any struct (for example [`crate::types::Filters`]) into options
pub fn options_from<T: Serialize>(value: &T) -> ApiResult<Options> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Options::new()),
        other => Err(ApiError::config(format!(
            "options must serialize to a JSON object, got {other}"
        ))),
    }
}

/// Build a request body from caller options and the endpoint's named fields
pub(crate) fn merge_options<I>(options: Options, named: I) -> Value
where
    I: IntoIterator<Item = (&'static str, Value)>,
{
    let mut body = options;
    for (key, value) in named {
        body.insert(key.to_string(), value);
    }
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn opts(value: Value) -> Options {
        match value {
            Value::Object(map) => map,
            _ => panic!("test options must be an object"),
        }
    }

    #[test]
    fn test_extra_options_pass_through() {
        let body = merge_options(
            opts(json!({"top_k": 10, "filters": {"channels": ["rust"]}})),
            [("user_id", json!("123"))],
        );
        assert_eq!(body["user_id"], "123");
        assert_eq!(body["top_k"], 10);
        assert_eq!(body["filters"]["channels"][0], "rust");
    }

    #[test]
    fn test_named_field_wins_on_collision() {
        let body = merge_options(
            opts(json!({"user_id": "999", "event_type": "share"})),
            [("user_id", json!("123")), ("event_type", json!("like"))],
        );
        assert_eq!(body["user_id"], "123");
        assert_eq!(body["event_type"], "like");
        assert_eq!(body.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_options() {
        let body = merge_options(Options::new(), [("query", json!("rust"))]);
        assert_eq!(body, json!({"query": "rust"}));
    }

    #[test]
    fn test_options_from_struct() {
        #[derive(Serialize)]
        struct Paging {
            top_k: u32,
            page_number: u32,
        }

        let options = options_from(&Paging {
            top_k: 25,
            page_number: 2,
        })
        .unwrap();
        assert_eq!(options["top_k"], 25);
        assert_eq!(options["page_number"], 2);

        assert!(options_from(&()).unwrap().is_empty());
        assert!(matches!(options_from(&42), Err(ApiError::Config(_))));
    }
}
