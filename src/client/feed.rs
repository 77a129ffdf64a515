// File: ./src/client/feed.rs
// HTTP client fetching the deadline sheet.
use crate::client::cert::NoVerifier;
use crate::client::middleware::{DefaultHeaders, DefaultHeadersLayer, feed_headers};
use crate::client::redirect::{FollowRedirectLayer, FollowRedirectService};
use crate::model::{RawRecord, parse_valid_records};

use anyhow::{Context, Result, anyhow};
use http::{Request, Uri};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use std::sync::Arc;
use tower::{ServiceBuilder, ServiceExt};

pub const MAX_REDIRECTS: usize = 5;

type HttpsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, String>;
type FeedService = DefaultHeaders<FollowRedirectService<HttpsClient>>;

#[derive(Clone, Debug)]
pub struct FeedClient {
    service: FeedService,
}

impl FeedClient {
    pub fn new(insecure: bool) -> Result<Self> {
        let tls_config_builder = rustls::ClientConfig::builder();

        let tls_config = if insecure {
            log::warn!("TLS certificate verification is disabled");
            tls_config_builder
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(NoVerifier))
                .with_no_client_auth()
        } else {
            let mut root_store = rustls::RootCertStore::empty();
            let result = rustls_native_certs::load_native_certs();
            for err in &result.errors {
                log::debug!("Skipping native certificate: {}", err);
            }
            root_store.add_parsable_certificates(result.certs);
            if root_store.is_empty() {
                return Err(anyhow!("No valid system certificates found."));
            }
            tls_config_builder
                .with_root_certificates(root_store)
                .with_no_client_auth()
        };

        let https_connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls_config)
            .https_or_http()
            .enable_http1()
            .build();

        let http_client: HttpsClient = Client::builder(TokioExecutor::new()).build(https_connector);

        let service = ServiceBuilder::new()
            .layer(DefaultHeadersLayer::new(feed_headers()))
            .layer(FollowRedirectLayer::new(MAX_REDIRECTS))
            .service(http_client);

        Ok(Self { service })
    }

    /// GETs `url` and returns the body as text.
    ///
    /// Any non-2xx final status is an error. No retries.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let uri: Uri = url
            .parse()
            .with_context(|| format!("Invalid feed URL '{}'", url))?;
        let req = Request::get(uri).body(String::new())?;

        log::info!("Fetching feed from {}", url);
        let response = self
            .service
            .clone()
            .oneshot(req)
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP error! status: {}", status.as_u16()));
        }

        let bytes = response.into_body().collect().await?.to_bytes();
        log::debug!("Feed returned {} bytes", bytes.len());
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Fetches the CSV export and keeps the well-formed rows.
    pub async fn load_records(&self, url: &str) -> Result<Vec<RawRecord>> {
        let csv_text = self.fetch_text(url).await?;
        let records = parse_valid_records(&csv_text);
        log::info!("Loaded {} conference record(s)", records.len());
        Ok(records)
    }
}
