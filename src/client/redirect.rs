// File: ./src/client/redirect.rs
//! Tower middleware following HTTP redirects.
//!
//! Spreadsheet CSV exports answer with a 307 to a short-lived download host,
//! so the feed client has to chase `Location` headers itself.
use http::{Request, Response, Uri};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower_layer::Layer;
use tower_service::Service;

#[derive(Clone, Debug)]
pub struct FollowRedirectLayer {
    max_redirects: usize,
}

impl FollowRedirectLayer {
    pub fn new(max_redirects: usize) -> Self {
        Self { max_redirects }
    }
}

impl<S> Layer<S> for FollowRedirectLayer {
    type Service = FollowRedirectService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        FollowRedirectService {
            inner,
            max_redirects: self.max_redirects,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FollowRedirectService<S> {
    inner: S,
    max_redirects: usize,
}

/// Resolves a `Location` value against the URI that produced it.
pub fn resolve_location(base: &Uri, location: &str) -> Option<Uri> {
    let parts = location.parse::<Uri>().ok()?.into_parts();
    let mut builder = Uri::builder();

    match parts.scheme {
        Some(scheme) => builder = builder.scheme(scheme),
        None => {
            if let Some(s) = base.scheme() {
                builder = builder.scheme(s.clone());
            }
        }
    }
    match parts.authority {
        Some(authority) => builder = builder.authority(authority),
        None => {
            if let Some(a) = base.authority() {
                builder = builder.authority(a.clone());
            }
        }
    }
    let path = parts
        .path_and_query
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());
    builder.path_and_query(path).build().ok()
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for FollowRedirectService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::error::Error + Send + Sync + 'static,
    ReqBody: Clone + Send + 'static,
    ResBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let mut inner = self.inner.clone();
        let max_redirects = self.max_redirects;

        Box::pin(async move {
            let mut current_req = req;
            let mut hops = 0;

            loop {
                let req_clone = current_req.clone();
                let response = inner.call(current_req).await?;

                if hops >= max_redirects || !response.status().is_redirection() {
                    return Ok(response);
                }

                let next = response
                    .headers()
                    .get(http::header::LOCATION)
                    .and_then(|l| l.to_str().ok())
                    .and_then(|l| resolve_location(req_clone.uri(), l));

                let Some(next_uri) = next else {
                    return Ok(response);
                };

                log::debug!("Following redirect {} -> {}", req_clone.uri(), next_uri);
                current_req = req_clone;
                *current_req.uri_mut() = next_uri;
                hops += 1;
            }
        })
    }
}
