//! `sitecheck check` – classify URLs and print one line per URL.

use anyhow::Result;
use sitecheck_core::fetch::SiteFetcher;
use sitecheck_core::sync::classify_all;
use sitecheck_core::url_model::normalize_url;

pub async fn run_check(urls: Vec<String>, concurrency: usize) -> Result<()> {
    let urls: Vec<String> = urls.iter().map(|u| normalize_url(u)).collect();
    let verdicts = classify_all(urls.clone(), &SiteFetcher::curl(), concurrency).await;
    for (url, verdict) in urls.iter().zip(&verdicts) {
        println!("{}", format_line(url, verdict.label.as_str(), &verdict.explanation));
    }
    Ok(())
}

pub(crate) fn format_line(url: &str, label: &str, explanation: &str) -> String {
    if explanation.is_empty() {
        format!("{url}  {label}")
    } else {
        format!("{url}  {label}  {explanation}")
    }
}
