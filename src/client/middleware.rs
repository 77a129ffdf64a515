// File: ./src/client/middleware.rs
//! Tower layer filling in request headers the caller left unset.
use http::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use http::Request;
use std::task::{Context, Poll};
use tower_layer::Layer;
use tower_service::Service;

/// Headers sent with every feed request unless the request already has them.
pub fn feed_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    let agent = format!("confline/{}", env!("CARGO_PKG_VERSION"));
    if let Ok(value) = HeaderValue::from_str(&agent) {
        headers.insert(USER_AGENT, value);
    }
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/csv, text/plain;q=0.9, */*;q=0.1"),
    );
    headers
}

#[derive(Clone, Debug)]
pub struct DefaultHeadersLayer {
    defaults: HeaderMap,
}

impl DefaultHeadersLayer {
    pub fn new(defaults: HeaderMap) -> Self {
        Self { defaults }
    }
}

impl<S> Layer<S> for DefaultHeadersLayer {
    type Service = DefaultHeaders<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DefaultHeaders {
            inner,
            defaults: self.defaults.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DefaultHeaders<S> {
    inner: S,
    defaults: HeaderMap,
}

impl<S, B> Service<Request<B>> for DefaultHeaders<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let headers = req.headers_mut();
        for (name, value) in &self.defaults {
            if !headers.contains_key(name) {
                headers.insert(name.clone(), value.clone());
            }
        }
        self.inner.call(req)
    }
}
