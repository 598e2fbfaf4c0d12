//! Bounded-concurrency fetching of the remaining pages of a collection.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use futures::stream::{FuturesUnordered, StreamExt};
use log::debug;

use crate::error::Result;

type PageFuture<T> = Pin<Box<dyn Future<Output = (usize, Result<Vec<T>>)> + Send>>;

/// Fetch `pages` with at most `max_concurrent` requests in flight.
///
/// Items come back in page order regardless of arrival order. The first
/// failing page aborts the whole fetch.
///
/// ```ignore
/// let first = client.list_products_paged(&query).await?;
/// let rest = fetch_remaining_pages(first.remaining_pages(), |page| { ... }, 4).await?;
/// ```
pub async fn fetch_remaining_pages<T, F, Fut>(
    pages: Vec<usize>,
    fetch_page: F,
    max_concurrent: usize,
) -> Result<Vec<T>>
where
    T: Send + 'static,
    F: Fn(usize) -> Fut,
    Fut: Future<Output = Result<Vec<T>>> + Send + 'static,
{
    if pages.is_empty() {
        return Ok(Vec::new());
    }

    let max_concurrent = max_concurrent.max(1);
    debug!(
        "Fetching {} pages, {} at a time",
        pages.len(),
        max_concurrent
    );

    let start = |page: usize| -> PageFuture<T> {
        let fut = fetch_page(page);
        Box::pin(async move { (page, fut.await) })
    };

    let mut by_page: BTreeMap<usize, Vec<T>> = BTreeMap::new();
    let mut queue = pages.into_iter();
    let mut running: FuturesUnordered<PageFuture<T>> =
        queue.by_ref().take(max_concurrent).map(start).collect();

    while let Some((page, result)) = running.next().await {
        let items = result?;
        debug!("Page {} returned {} items", page, items.len());
        by_page.insert(page, items);

        if let Some(next) = queue.next() {
            running.push(start(next));
        }
    }

    Ok(by_page.into_values().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_no_pages() {
        let items: Vec<u32> = fetch_remaining_pages(vec![], |_| async { Ok(vec![1]) }, 4)
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_items_in_page_order() {
        // Later pages finish first
        let items = fetch_remaining_pages(
            vec![2, 3, 4],
            |page| async move {
                tokio::time::sleep(Duration::from_millis(40 - 10 * page as u64)).await;
                Ok(vec![page * 10, page * 10 + 1])
            },
            4,
        )
        .await
        .unwrap();

        assert_eq!(items, vec![20, 21, 30, 31, 40, 41]);
    }

    #[tokio::test]
    async fn test_respects_concurrency_limit() {
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let items = fetch_remaining_pages(
            vec![2, 3, 4, 5, 6],
            |page| {
                let running = running.clone();
                let peak = peak.clone();
                async move {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    running.fetch_sub(1, Ordering::SeqCst);
                    Ok(vec![page])
                }
            },
            2,
        )
        .await
        .unwrap();

        assert_eq!(items, vec![2, 3, 4, 5, 6]);
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_failure_aborts() {
        let result: Result<Vec<usize>> = fetch_remaining_pages(
            vec![2, 3],
            |page| async move {
                if page == 3 {
                    Err(ApiError::Http {
                        status: 502,
                        body: String::new(),
                    }
                    .into())
                } else {
                    Ok(vec![page])
                }
            },
            2,
        )
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.as_api().and_then(ApiError::status), Some(502));
    }
}
