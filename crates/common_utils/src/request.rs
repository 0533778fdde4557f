//! Turning parameter objects into transport-agnostic HTTP requests.

use std::collections::HashSet;

use error_stack::{report, ResultExt};
#[cfg(feature = "logs")]
use sdk_env::logger;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::{
    consts,
    errors::{CustomResult, RequestError},
    ext_traits::Encode,
    field_store::RawFieldStore,
};

/// Header name and value pairs.
pub type Headers = HashSet<(String, String)>;

/// HTTP methods used by the API.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

/// A fully resolved request, ready to be handed to an HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
}

impl Request {
    /// Creates a request without headers or body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HashSet::new(),
            body: None,
        }
    }

    /// Sets a header, replacing any value already set under the same name.
    pub fn add_header(&mut self, header: &str, value: &str) {
        self.headers
            .retain(|(name, _)| !name.eq_ignore_ascii_case(header));
        self.headers.insert((header.to_string(), value.to_string()));
    }

    /// Adds the headers sent with every request.
    pub fn add_default_headers(&mut self) {
        self.add_header(consts::USER_AGENT_HEADER, consts::USER_AGENT);
        if self.body.is_some() {
            self.add_header(consts::CONTENT_TYPE_HEADER, consts::JSON_CONTENT_TYPE);
        }
    }

    /// The value of a header, if present.
    pub fn header(&self, header: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(header))
            .map(|(_, value)| value.as_str())
    }
}

/// Checks that a path parameter is usable as a URL path segment.
///
/// `.` and `..` are rejected since they would be dropped from the path and
/// address a different endpoint.
pub fn path_parameter<'a>(
    parameter_name: &'static str,
    value: &'a str,
) -> CustomResult<&'a str, RequestError> {
    match value {
        "" => Err(report!(RequestError::MissingPathParameter { parameter_name })),
        "." | ".." => Err(report!(RequestError::InvalidPathParameter {
            parameter_name,
            value: value.to_string(),
        })),
        _ => Ok(value),
    }
}

/// An endpoint call: path parameters, query parameters and body.
///
/// Usually implemented through [`impl_api_params!`](crate::impl_api_params!).
pub trait ApiParams {
    /// The HTTP method of the endpoint.
    const METHOD: Method;

    /// Path segments relative to the base URL, unencoded.
    fn path_segments(&self) -> CustomResult<Vec<&str>, RequestError>;

    /// Query parameters, if the endpoint accepts any.
    fn query(&self) -> Option<&RawFieldStore> {
        None
    }

    /// Extra header parameters, encoded like query parameters.
    fn headers(&self) -> Option<&RawFieldStore> {
        None
    }

    /// The JSON body, if the endpoint accepts one.
    fn body(&self) -> CustomResult<Option<Value>, RequestError> {
        Ok(None)
    }

    /// The full URL of the call against `base_url`.
    fn url(&self, base_url: &Url) -> CustomResult<Url, RequestError> {
        let mut url = base_url.clone();
        let segments = self.path_segments()?;

        url.path_segments_mut()
            .map_err(|()| {
                report!(RequestError::InvalidBaseUrl {
                    base_url: base_url.to_string(),
                })
            })?
            .pop_if_empty()
            .extend(segments);

        let pairs = self.query().map(encode_query).unwrap_or_default();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(url)
    }

    /// The serialized body, or `None` for body-less endpoints.
    fn body_content(&self) -> CustomResult<Option<Vec<u8>>, RequestError> {
        self.body()?
            .map(|body| {
                body.encode_to_vec()
                    .change_context(RequestError::BodyEncodingFailed)
            })
            .transpose()
    }

    /// Builds the request with default headers attached.
    fn build_request(&self, base_url: &Url) -> CustomResult<Request, RequestError> {
        let mut request = Request::new(Self::METHOD, self.url(base_url)?);
        request.body = self.body_content()?;
        request.add_default_headers();
        for (header, value) in self.headers().map(encode_query).unwrap_or_default() {
            request.add_header(&header, &value);
        }

        #[cfg(feature = "logs")]
        logger::debug!(method = %request.method, url = %request.url, has_body = request.body.is_some(), "request built");

        Ok(request)
    }
}

/// Flattens a query store into name and value pairs in insertion order.
///
/// Absent and `null` values are skipped, strings are sent as they are, numbers
/// and booleans as their JSON text, arrays as one pair per element and objects
/// as compact JSON.
pub fn encode_query(store: &RawFieldStore) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in store.fields() {
        match value {
            Value::Array(items) => pairs.extend(
                items
                    .iter()
                    .filter_map(encode_query_value)
                    .map(|item| (key.clone(), item)),
            ),
            other => pairs.extend(encode_query_value(other).map(|item| (key.clone(), item))),
        }
    }
    pairs
}

fn encode_query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            Some(value.to_string())
        }
    }
}
