use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Header multimap: header name to its ordered values.
pub type HeaderMap = BTreeMap<String, Vec<String>>;

/// Response handed back to the Lambda invoker.
pub trait ServiceResponse {
    /// Response body, if any
    fn body(&self) -> Option<&str>;
    /// Response headers; `None` only for a default-constructed response
    fn headers(&self) -> Option<&HeaderMap>;
    /// HTTP status code (not validated)
    fn status_code(&self) -> i32;
    /// HTTP reason phrase, if any
    fn reason_phrase(&self) -> Option<&str>;
}

/// Immutable [`ServiceResponse`] value.
///
/// The header collection passed to [`DefaultServiceResponse::new`] is copied
/// entry by entry. Entries without a name or without a value list are
/// dropped, empty value lists are kept:
///
/// ```
/// use restgate::service::DefaultServiceResponse;
///
/// let a = DefaultServiceResponse::new(
///     None,
///     vec![(None, Some(vec!["0_0".to_string()])), (Some("1".to_string()), Some(vec!["1_0".to_string()]))],
///     200,
///     None,
/// );
/// let b = DefaultServiceResponse::new(None, vec![("1".to_string(), vec!["1_0".to_string()])], 200, None);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawServiceResponse")]
pub struct DefaultServiceResponse {
    body: Option<String>,
    headers: Option<HeaderMap>,
    status_code: i32,
    reason_phrase: Option<String>,
}

impl DefaultServiceResponse {
    pub fn new<I, K, V>(
        body: Option<String>,
        headers: I,
        status_code: i32,
        reason_phrase: Option<String>,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Option<String>>,
        V: Into<Option<Vec<String>>>,
    {
        Self {
            body,
            headers: Some(copy_headers(headers)),
            status_code,
            reason_phrase,
        }
    }
}

fn copy_headers<I, K, V>(headers: I) -> HeaderMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<Option<String>>,
    V: Into<Option<Vec<String>>>,
{
    headers
        .into_iter()
        .filter_map(|(name, values)| Some((name.into()?, values.into()?)))
        .collect()
}

impl ServiceResponse for DefaultServiceResponse {
    fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    fn headers(&self) -> Option<&HeaderMap> {
        self.headers.as_ref()
    }

    fn status_code(&self) -> i32 {
        self.status_code
    }

    fn reason_phrase(&self) -> Option<&str> {
        self.reason_phrase.as_deref()
    }
}

/// Wire shape; JSON may carry `null` value lists which are dropped like in `new`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawServiceResponse {
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    headers: Option<BTreeMap<String, Option<Vec<String>>>>,
    #[serde(default)]
    status_code: i32,
    #[serde(default)]
    reason_phrase: Option<String>,
}

impl From<RawServiceResponse> for DefaultServiceResponse {
    fn from(raw: RawServiceResponse) -> Self {
        Self {
            body: raw.body,
            headers: raw.headers.map(copy_headers),
            status_code: raw.status_code,
            reason_phrase: raw.reason_phrase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_has_no_headers() {
        let resp = DefaultServiceResponse::default();
        assert_eq!(resp.body(), None);
        assert_eq!(resp.headers(), None);
        assert_eq!(resp.status_code(), 0);
        assert_eq!(resp.reason_phrase(), None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let resp = DefaultServiceResponse::new(
            Some("hi".into()),
            vec![("X-A".to_string(), vec!["1".to_string()])],
            201,
            Some("Created".into()),
        );
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            value,
            json!({
                "body": "hi",
                "headers": {"X-A": ["1"]},
                "statusCode": 201,
                "reasonPhrase": "Created"
            })
        );
    }

    #[test]
    fn test_deserialize_drops_null_value_lists() {
        let resp: DefaultServiceResponse = serde_json::from_value(json!({
            "headers": {"1": ["1_0"], "0": null},
            "statusCode": 200
        }))
        .unwrap();
        let expected =
            DefaultServiceResponse::new(None, vec![("1".to_string(), vec!["1_0".to_string()])], 200, None);
        assert_eq!(resp, expected);
    }

    #[test]
    fn test_deserialize_missing_headers_is_none() {
        let resp: DefaultServiceResponse =
            serde_json::from_value(json!({"statusCode": 204})).unwrap();
        assert_eq!(resp.headers(), None);
        assert_eq!(resp.status_code(), 204);
    }
}
