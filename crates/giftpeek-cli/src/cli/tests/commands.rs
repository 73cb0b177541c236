//! Tests for command helpers: link parsing, output lines, batch resolution.

use crate::cli::commands::{format_line, parse_link, resolve_all, resolve_bounded};
use giftpeek_core::fetch::{FetchError, FetchedPage, PageFetcher};
use giftpeek_core::suggestion::GiftSuggestion;
use giftpeek_core::{LinkPreviewResolver, PreviewCache, PreviewResult};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Every page carries an og:image named after its path; counts fetches.
#[derive(Default)]
struct EchoFetcher {
    calls: AtomicUsize,
}

impl PageFetcher for EchoFetcher {
    fn fetch(&self, url: &Url, _abort: &AtomicBool) -> Result<FetchedPage, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let body = format!(
            r#"<meta property="og:image" content="{}.png">"#,
            url.path()
        );
        Ok(FetchedPage {
            status: 200,
            content_type: Some("text/html".to_string()),
            body: body.into_bytes(),
            truncated: false,
        })
    }
}

/// Holds each fetch open briefly and records the peak number in flight.
#[derive(Default)]
struct SlowFetcher {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl PageFetcher for SlowFetcher {
    fn fetch(&self, _url: &Url, _abort: &AtomicBool) -> Result<FetchedPage, FetchError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(20));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(FetchedPage {
            status: 404,
            ..FetchedPage::default()
        })
    }
}

fn suggestion(title: &str, link: Option<&str>) -> GiftSuggestion {
    GiftSuggestion {
        id: None,
        wishlist_id: "w1".to_string(),
        title: title.to_string(),
        description: None,
        link: link.map(str::to_string),
        suggested_by: "u1".to_string(),
        created_at: "2024-12-01T10:00:00Z".to_string(),
        is_favorited: false,
        is_purchased: false,
        purchased_by: None,
        sort_order: 0,
    }
}

#[test]
fn parse_link_accepts_http_and_https_only() {
    assert!(parse_link("https://example.com/a").is_ok());
    assert!(parse_link(" http://example.com/a ").is_ok());
    assert!(parse_link("ftp://example.com/a").is_err());
    assert!(parse_link("example.com/a").is_err());
}

#[test]
fn format_line_shows_image_or_dash() {
    let image = PreviewResult::ImageReference(Url::parse("https://example.com/i.png").unwrap());
    assert_eq!(format_line("Scarf", &image), "Scarf\thttps://example.com/i.png");
    assert_eq!(format_line("Scarf", &PreviewResult::NotAvailable), "Scarf\t-");
}

#[tokio::test]
async fn resolve_all_keeps_order_and_skips_unusable_links() {
    let fetcher = Arc::new(EchoFetcher::default());
    let resolver = LinkPreviewResolver::new(Arc::new(PreviewCache::new()), fetcher.clone());
    let suggestions = vec![
        suggestion("Scarf", Some("https://shop.example.com/scarf")),
        suggestion("Card", None),
        suggestion("Book", Some("https://books.example.com/novel")),
        suggestion("Typo", Some("books.example.com")),
        suggestion("Scarf again", Some("https://shop.example.com/scarf")),
    ];

    let results = resolve_all(&resolver, &suggestions, 2).await.unwrap();
    assert_eq!(results.len(), 5);
    assert_eq!(
        results[0].image_url().map(Url::as_str),
        Some("https://shop.example.com/scarf.png")
    );
    assert_eq!(results[1], PreviewResult::NotAvailable);
    assert_eq!(
        results[2].image_url().map(Url::as_str),
        Some("https://books.example.com/novel.png")
    );
    assert_eq!(results[3], PreviewResult::NotAvailable);
    assert_eq!(results[4], results[0]);
    // The duplicate link may race its twin; at most one extra fetch.
    assert!((2..=3).contains(&fetcher.calls.load(Ordering::SeqCst)));
}

#[tokio::test]
async fn resolve_all_with_zero_jobs_still_runs() {
    let fetcher = Arc::new(EchoFetcher::default());
    let resolver = LinkPreviewResolver::new(Arc::new(PreviewCache::new()), fetcher);
    let suggestions = vec![suggestion("Mug", Some("https://shop.example.com/mug"))];
    let results = resolve_all(&resolver, &suggestions, 0).await.unwrap();
    assert!(results[0].is_available());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn resolve_bounded_caps_fetches_in_flight() {
    let fetcher = Arc::new(SlowFetcher::default());
    let resolver = LinkPreviewResolver::new(Arc::new(PreviewCache::new()), fetcher.clone());
    let links = (0..6)
        .map(|i| (i, Url::parse(&format!("https://shop.example.com/{i}")).unwrap()))
        .collect();

    let results = resolve_bounded(&resolver, links, 6, 2).await.unwrap();
    assert_eq!(results.len(), 6);
    assert!(results.iter().all(|r| *r == PreviewResult::NotAvailable));
    assert_eq!(resolver.cache().len(), 6);
    let peak = fetcher.peak.load(Ordering::SeqCst);
    assert!((1..=2).contains(&peak), "peak in flight was {peak}");
}

#[tokio::test]
async fn resolve_bounded_leaves_unlinked_slots_unavailable() {
    let fetcher = Arc::new(EchoFetcher::default());
    let resolver = LinkPreviewResolver::new(Arc::new(PreviewCache::new()), fetcher);
    let link = Url::parse("https://shop.example.com/mug").unwrap();

    let results = resolve_bounded(&resolver, vec![(2, link)], 3, 4).await.unwrap();
    assert_eq!(results[0], PreviewResult::NotAvailable);
    assert_eq!(results[1], PreviewResult::NotAvailable);
    assert_eq!(
        results[2].image_url().map(Url::as_str),
        Some("https://shop.example.com/mug.png")
    );
}
