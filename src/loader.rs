// File: ./src/loader.rs
//! Start-up join of the chart renderer and the feed.
//!
//! The renderer bootstrap and the feed download run concurrently; the caller
//! gets both or the first error. Nothing is retried.
use crate::client::FeedClient;
use crate::model::RawRecord;
use anyhow::Result;
use std::future::Future;

/// A ready renderer together with the rows to draw into it.
pub struct Loaded<R> {
    pub renderer: R,
    pub records: Vec<RawRecord>,
}

impl<R> Loaded<R> {
    /// A feed with no usable row is still a successful load.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub async fn initialize<R, B>(bootstrap: B, client: &FeedClient, url: &str) -> Result<Loaded<R>>
where
    B: Future<Output = Result<R>>,
{
    let (renderer, records) = tokio::try_join!(bootstrap, client.load_records(url))?;
    if records.is_empty() {
        log::warn!("Feed at {} has no valid conference rows", url);
    }
    Ok(Loaded { renderer, records })
}
