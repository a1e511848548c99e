//! Authenticated request builder and fetcher for the Meetup API.
//!
//! # Design
//! `MeetupClient` owns the API key, the base URL, the group and the headers
//! sent with every request. All of it is fixed at construction and only read
//! afterwards. Each call builds a fresh query, runs one GET through the
//! injected `Transport`, and hands the response to the classifier. There is
//! no retry and no partial success: a failed call fails as a whole.

use serde_json::Value;
use url::form_urlencoded;

use crate::classify;
use crate::credentials::ApiKey;
use crate::error::ApiError;
use crate::http::{HttpRequest, Transport};
use crate::types::{Event, EventsQuery, Params};

pub const DEFAULT_BASE_URL: &str = "http://api.meetup.com";
pub const DEFAULT_GROUP: &str = "Kubernetes-London";

const EVENTS_RESOURCE: &str = "events";
const API_KEY_PARAM: &str = "key";
const REDACTED: &str = "REDACTED";

// The API sits behind bot protection that bans requests without a
// browser-like user agent.
const USER_AGENT: &str = "Mozilla/5.0";
const ACCEPT_CHARSET: &str = "utf-8";

/// Synchronous client for the Meetup events API.
#[derive(Debug, Clone)]
pub struct MeetupClient<T> {
    api_key: ApiKey,
    base_url: String,
    group: String,
    headers: Vec<(String, String)>,
    transport: T,
}

impl<T: Transport> MeetupClient<T> {
    pub fn new(api_key: ApiKey, transport: T) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            group: DEFAULT_GROUP.to_string(),
            headers: vec![
                ("user-agent".to_string(), USER_AGENT.to_string()),
                ("accept-charset".to_string(), ACCEPT_CHARSET.to_string()),
            ],
            transport,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_group(mut self, group: &str) -> Self {
        self.group = group.to_string();
        self
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// URL-encode `params` plus the API key into a query string.
    ///
    /// The key always wins over a caller-supplied `key` parameter.
    pub fn build_query(&self, params: &Params) -> String {
        encode_query(params, self.api_key.expose())
    }

    pub fn build_fetch(&self, resource: &str, params: &Params) -> HttpRequest {
        HttpRequest {
            url: self.url(resource, &self.build_query(params)),
            headers: self.headers.clone(),
        }
    }

    /// GET `{base_url}/{resource}/?{query}` and decode the JSON response.
    pub fn fetch(&self, resource: &str, params: &Params) -> Result<Value, ApiError> {
        let request = self.build_fetch(resource, params);
        let logged = self.url(resource, &encode_query(params, REDACTED));
        tracing::info!(url = %logged, "requesting");
        let response = self.transport.execute(&request)?;
        classify::process_response(response)
    }

    /// Raw JSON collection of the group's events.
    pub fn get_events(&self, params: &Params) -> Result<Value, ApiError> {
        self.fetch(&self.events_resource(), params)
    }

    /// Events decoded into `Event` values with `rsvp_limit` left as sent.
    pub fn list_events(&self, query: &EventsQuery) -> Result<Vec<Event>, ApiError> {
        let value = self.get_events(&query.to_params())?;
        serde_json::from_value(value).map_err(ApiError::UnexpectedShape)
    }

    fn events_resource(&self) -> String {
        format!("{}/{EVENTS_RESOURCE}", self.group)
    }

    fn url(&self, resource: &str, query: &str) -> String {
        format!("{}/{resource}/?{query}", self.base_url)
    }
}

fn encode_query(params: &Params, key: &str) -> String {
    let mut merged = params.clone();
    merged.insert(API_KEY_PARAM.to_string(), key.to_string());
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(merged.iter())
        .finish()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;

    use super::*;
    use crate::http::HttpResponse;

    /// Records requests and replies with a canned response.
    struct FakeTransport {
        status: u16,
        body: String,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl FakeTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for FakeTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.borrow_mut().push(request.clone());
            Ok(HttpResponse {
                status: self.status,
                headers: Vec::new(),
                body: self.body.as_bytes().to_vec(),
            })
        }
    }

    struct DownTransport;

    impl Transport for DownTransport {
        fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            Err(ApiError::Transport("connection refused".to_string()))
        }
    }

    fn client(transport: &FakeTransport) -> MeetupClient<&FakeTransport> {
        MeetupClient::new(ApiKey::new("KEY").unwrap(), transport)
    }

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn pairs(query: &str) -> Vec<(String, String)> {
        form_urlencoded::parse(query.as_bytes()).into_owned().collect()
    }

    #[test]
    fn build_query_contains_each_pair_once() {
        let transport = FakeTransport::replying(200, "[]");
        let query = client(&transport).build_query(&params(&[("a", "1"), ("b", "2")]));
        let mut got = pairs(&query);
        got.sort();
        assert_eq!(
            got,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
                ("key".to_string(), "KEY".to_string()),
            ]
        );
    }

    #[test]
    fn build_query_encodes_reserved_characters() {
        let transport = FakeTransport::replying(200, "[]");
        let query = client(&transport).build_query(&params(&[("text", "a b&c=d")]));
        assert!(query.contains("text=a+b%26c%3Dd"), "{query}");
    }

    #[test]
    fn api_key_overrides_caller_key() {
        let transport = FakeTransport::replying(200, "[]");
        let query = client(&transport).build_query(&params(&[("key", "spoofed")]));
        assert_eq!(pairs(&query), vec![("key".to_string(), "KEY".to_string())]);
    }

    #[test]
    fn build_query_does_not_mutate_params() {
        let transport = FakeTransport::replying(200, "[]");
        let input = params(&[("a", "1")]);
        client(&transport).build_query(&input);
        assert_eq!(input, params(&[("a", "1")]));
    }

    #[test]
    fn build_fetch_produces_correct_request() {
        let transport = FakeTransport::replying(200, "[]");
        let req = client(&transport).build_fetch("Kubernetes-London/events", &params(&[("sign", "true")]));
        assert_eq!(
            req.url,
            "http://api.meetup.com/Kubernetes-London/events/?key=KEY&sign=true"
        );
        assert_eq!(
            req.headers,
            vec![
                ("user-agent".to_string(), "Mozilla/5.0".to_string()),
                ("accept-charset".to_string(), "utf-8".to_string()),
            ]
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let transport = FakeTransport::replying(200, "[]");
        let req = client(&transport)
            .with_base_url("http://localhost:3000/")
            .build_fetch("g/events", &Params::new());
        assert_eq!(req.url, "http://localhost:3000/g/events/?key=KEY");
    }

    #[test]
    fn get_events_targets_group_events() {
        let transport = FakeTransport::replying(200, "[]");
        let value = client(&transport)
            .with_group("rust-london")
            .get_events(&Params::new())
            .unwrap();
        assert_eq!(value, json!([]));
        let seen = transport.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].url, "http://api.meetup.com/rust-london/events/?key=KEY");
    }

    #[test]
    fn fetch_returns_decoded_value_unchanged() {
        let body = r#"{"nested":{"list":[1,2.5,"x",null,true]}}"#;
        let transport = FakeTransport::replying(200, body);
        let value = client(&transport).fetch("anything", &Params::new()).unwrap();
        assert_eq!(value, serde_json::from_str::<Value>(body).unwrap());
    }

    #[test]
    fn fetch_surfaces_typed_errors() {
        let transport = FakeTransport::replying(401, r#"{"errors":[{"code":"auth_fail"}]}"#);
        let err = client(&transport).get_events(&Params::new()).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { .. }));

        let transport = FakeTransport::replying(500, r#"{"errors":[]}"#);
        let err = client(&transport).get_events(&Params::new()).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { status: 500, .. }));

        let transport = FakeTransport::replying(404, r#"{"errors":[]}"#);
        let err = client(&transport).get_events(&Params::new()).unwrap_err();
        assert!(matches!(err, ApiError::Client { status: 404, .. }));
    }

    #[test]
    fn transport_failure_propagates() {
        let client = MeetupClient::new(ApiKey::new("KEY").unwrap(), DownTransport);
        let err = client.get_events(&Params::new()).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn list_events_decodes_typed_events() {
        let body = r#"[{"created":1,"local_date":"2020-01-01","local_time":"18:00",
            "venue":{"name":"V"},"name":"N","yes_rsvp_count":5,"waitlist_count":0,"rsvp_limit":30}]"#;
        let transport = FakeTransport::replying(200, body);
        let events = client(&transport).list_events(&EventsQuery::recent_past()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].venue.name, "V");
        assert_eq!(events[0].rsvp_limit, Some(30));
        assert!(transport.seen.borrow()[0].url.contains("scroll=recent_past"));
    }

    #[test]
    fn list_events_rejects_wrong_shape() {
        let transport = FakeTransport::replying(200, r#"{"not":"a list"}"#);
        let err = client(&transport).list_events(&EventsQuery::default()).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedShape(_)));
    }
}
