//! Route table of the status service.
//!
//! Routing is a pure function of method and URI so it can be exercised
//! without a network stack; the firmware forwards every request here and
//! writes the returned [`Response`] back.

use crate::config::NOT_FOUND_BODY;
use crate::dashboard::Dashboard;
use crate::station::ReadingSource;
use log::debug;
use std::borrow::Cow;
use std::sync::{Arc, Mutex};

pub const CONTENT_TYPE_HTML: &str = "text/html";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Patch,
    Other,
}

#[derive(Debug, PartialEq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Cow<'static, [u8]>,
}

impl Response {
    fn ok(content_type: &'static str, body: Cow<'static, [u8]>) -> Self {
        Self {
            status: 200,
            content_type,
            body,
        }
    }

    fn not_found() -> Self {
        Self {
            status: 404,
            content_type: CONTENT_TYPE_TEXT,
            body: Cow::Borrowed(NOT_FOUND_BODY.as_bytes()),
        }
    }
}

/// The reading source and the page, shared with the HTTP worker.
pub struct StatusService<S> {
    source: S,
    dashboard: Dashboard,
}

pub type SharedService<S> = Arc<Mutex<StatusService<S>>>;

impl<S: ReadingSource> StatusService<S> {
    pub fn new(source: S, dashboard: Dashboard) -> Self {
        Self { source, dashboard }
    }

    pub fn into_shared(self) -> SharedService<S> {
        Arc::new(Mutex::new(self))
    }

    #[cfg(test)]
    pub(crate) fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn handle(&mut self, method: Method, uri: &str) -> Response {
        let path = uri.split(['?', '#']).next().unwrap_or_default();
        debug!("{:?} {}", method, path);

        match (method, path) {
            (Method::Get, "/") => Response::ok(CONTENT_TYPE_HTML, self.dashboard.render()),
            (Method::Get, "/sensors") => {
                // the whole reading is taken before serialising
                let reading = self.source.poll();
                let body = serde_json::to_vec(&reading).unwrap_or_default();
                Response::ok(CONTENT_TYPE_JSON, Cow::Owned(body))
            }
            _ => Response::not_found(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Reading;
    use serde_json::Value;

    struct Fixed {
        reading: Reading,
        polls: usize,
    }

    impl ReadingSource for Fixed {
        fn poll(&mut self) -> Reading {
            self.polls += 1;
            self.reading
        }
    }

    fn service(reading: Reading) -> StatusService<Fixed> {
        StatusService::new(Fixed { reading, polls: 0 }, Dashboard::Embedded)
    }

    fn json(response: &Response) -> serde_json::Map<String, Value> {
        match serde_json::from_slice(&response.body).unwrap() {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn sensors_returns_four_fields() {
        let mut svc = service(Reading {
            temperature: 22.5,
            humidity: 41.0,
            pressure: 1013.25,
            timestamp: 4200,
        });

        let response = svc.handle(Method::Get, "/sensors");
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, CONTENT_TYPE_JSON);

        let body = json(&response);
        assert_eq!(body.len(), 4);
        assert_eq!(body["temperature"].as_f64(), Some(22.5));
        assert_eq!(body["humidity"].as_f64(), Some(41.0));
        assert_eq!(body["pressure"].as_f64(), Some(1013.25));
        assert_eq!(body["timestamp"].as_u64(), Some(4200));
        assert_eq!(svc.source.polls, 1);
    }

    #[test]
    fn sensors_with_zero_reading_is_still_valid_json() {
        let mut svc = service(Reading::default());
        let body = json(&svc.handle(Method::Get, "/sensors"));

        let mut keys: Vec<_> = body.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["humidity", "pressure", "temperature", "timestamp"]);
        assert!(body.values().all(|v| v.as_f64() == Some(0.0)));
    }

    #[test]
    fn every_request_polls_again() {
        let mut svc = service(Reading::default());
        svc.handle(Method::Get, "/sensors");
        svc.handle(Method::Get, "/sensors?refresh=1");
        assert_eq!(svc.source.polls, 2);
    }

    #[test]
    fn root_serves_page_without_touching_sensors() {
        let mut svc = service(Reading::default());

        let first = svc.handle(Method::Get, "/");
        let second = svc.handle(Method::Get, "/");

        assert_eq!(first.status, 200);
        assert_eq!(first.content_type, CONTENT_TYPE_HTML);
        assert!(!first.body.is_empty());
        assert_eq!(first, second);
        assert_eq!(svc.source.polls, 0);
    }

    #[test]
    fn root_serves_flashed_page_and_ignores_query() {
        let path =
            std::env::temp_dir().join(format!("klima-{}-http-root.html", std::process::id()));
        std::fs::write(&path, b"<html>flashed</html>").unwrap();
        let mut svc = StatusService::new(
            Fixed {
                reading: Reading::default(),
                polls: 0,
            },
            Dashboard::File(path.clone()),
        );

        let plain = svc.handle(Method::Get, "/");
        let with_query = svc.handle(Method::Get, "/?x=1");
        std::fs::remove_file(&path).ok();

        assert_eq!(plain.status, 200);
        assert_eq!(plain.content_type, CONTENT_TYPE_HTML);
        assert_eq!(&*plain.body, b"<html>flashed</html>");
        assert_eq!(plain, with_query);
        assert_eq!(svc.source.polls, 0);
    }

    #[test]
    fn unknown_paths_are_not_found() {
        let mut svc = service(Reading::default());

        for uri in ["/index.html", "/sensor", "/sensors/", "/api/sensors", ""] {
            let response = svc.handle(Method::Get, uri);
            assert_eq!(response.status, 404, "{uri}");
            assert_eq!(response.content_type, CONTENT_TYPE_TEXT);
            assert_eq!(&*response.body, b"Nicht gefunden");
        }
        assert_eq!(svc.source.polls, 0);
    }

    #[test]
    fn only_get_is_routed() {
        let mut svc = service(Reading::default());

        for method in [Method::Post, Method::Put, Method::Delete, Method::Head] {
            assert_eq!(svc.handle(method, "/sensors").status, 404);
            assert_eq!(svc.handle(method, "/").status, 404);
        }
        assert_eq!(svc.source.polls, 0);
    }

    #[test]
    fn shared_service_handles_through_lock() {
        let shared = service(Reading::default()).into_shared();
        let response = shared.lock().unwrap().handle(Method::Get, "/sensors");
        assert_eq!(response.status, 200);
    }
}
