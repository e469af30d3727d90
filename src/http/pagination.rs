//! Page-by-page bulk fetching.

use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;

use crate::errors::AppError;

/// One page of a list response. Property names are matched after key folding.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Page<T> {
    #[serde(rename = "data", default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(rename = "currentpage", default)]
    pub current_page: u32,
    #[serde(rename = "perpage", default)]
    pub per_page: u32,
    #[serde(rename = "totalitems", default)]
    pub total_items: u64,
    #[serde(rename = "totalpages", default)]
    pub total_pages: u32,
}

#[async_trait]
pub trait PageSource: Send {
    type Item: Send;

    /// Fetches page `page` (1-based) of at most `limit` records.
    async fn fetch_page(&mut self, page: u32, limit: u32) -> Result<Page<Self::Item>, AppError>;
}

/// Concatenates every page in the order the backend returns them.
///
/// Stops on an empty page or once the backend-reported last page has been
/// read. Any failing page aborts the whole fetch.
pub async fn fetch_all_pages<S>(source: &mut S, limit: u32) -> Result<Vec<S::Item>, AppError>
where
    S: PageSource + ?Sized,
{
    let mut records = Vec::new();
    let mut page = 1;
    let mut reported_total = None;

    loop {
        let batch = source.fetch_page(page, limit).await?;
        debug!(
            "Fetched page {}/{} ({} records)",
            page,
            batch.total_pages,
            batch.data.len()
        );

        if batch.data.is_empty() {
            break;
        }

        reported_total = Some(batch.total_items);
        let last_page = batch.total_pages;
        records.extend(batch.data);

        if page >= last_page {
            break;
        }
        page += 1;
    }

    if let Some(total) = reported_total {
        if total != records.len() as u64 {
            warn!(
                "Fetched {} records but the backend reported {} in total",
                records.len(),
                total
            );
        }
    }

    Ok(records)
}
