//! Classify many URLs with a bounded number of fetches in flight.

use tokio::task::JoinSet;

use crate::classifier::{self, Verdict};
use crate::error::ClassificationError;
use crate::fetch::SiteFetcher;

/// Classifies `urls`, keeping up to `max_concurrent` fetches running at once on
/// the blocking pool. The returned verdicts are in input order regardless of
/// completion order; with `max_concurrent == 1` sites are fetched one by one.
pub async fn classify_all(
    urls: Vec<String>,
    fetcher: &SiteFetcher,
    max_concurrent: usize,
) -> Vec<Verdict> {
    let max_concurrent = max_concurrent.max(1);
    let total = urls.len();
    let mut verdicts: Vec<Option<Verdict>> = vec![None; total];
    let mut pending = urls.into_iter().enumerate();
    let mut join_set = JoinSet::new();

    loop {
        while join_set.len() < max_concurrent {
            let Some((idx, url)) = pending.next() else {
                break;
            };
            let fetcher = fetcher.clone();
            join_set.spawn_blocking(move || {
                let verdict = classifier::classify(&url, &fetcher);
                tracing::debug!(
                    row = idx + 1,
                    %url,
                    label = verdict.label.as_str(),
                    "row classified"
                );
                (idx, verdict)
            });
        }

        match join_set.join_next().await {
            Some(Ok((idx, verdict))) => verdicts[idx] = Some(verdict),
            Some(Err(e)) => tracing::error!("classification task failed: {e}"),
            None => break,
        }
    }

    verdicts
        .into_iter()
        .map(|v| {
            v.unwrap_or_else(|| {
                Verdict::from_error(&ClassificationError::Worker(
                    "task panicked or was cancelled".to_string(),
                ))
            })
        })
        .collect()
}
