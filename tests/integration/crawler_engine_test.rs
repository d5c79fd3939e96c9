// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;
use url::Url;

use toolscout::domain::models::crawl::CrawlTarget;
use toolscout::domain::services::crawler_engine::{CrawlSpec, CrawlerEngine};
use toolscout::domain::services::extraction_service::ExtractionStrategy;
use toolscout::domain::services::frontier::PriorityStrategy;

use super::helpers::MockRenderEngine;

fn spec(priority: PriorityStrategy) -> CrawlSpec {
    CrawlSpec {
        extraction: ExtractionStrategy::MainContent,
        priority,
        timeout: Duration::from_secs(5),
        settle: Duration::from_millis(0),
        max_content_chars: 100_000,
    }
}

fn target(max_depth: u32, max_pages: usize) -> CrawlTarget {
    CrawlTarget::new(Url::parse("https://site.test/").unwrap(), max_depth, max_pages)
}

const SEED_HTML: &str = r#"
    <html><head><title>Site</title></head><body>
        <main>
            <p>Accueil du site de génération vidéo.</p>
            <a href="/a">Page A</a>
            <a href="/b">Page B</a>
            <a href="/c">Page C</a>
            <a href="https://external.test/x">Externe</a>
        </main>
    </body></html>
"#;

#[tokio::test]
async fn test_same_origin_bounded_crawl() {
    let engine = MockRenderEngine::new(vec![
        ("https://site.test/", SEED_HTML),
        ("https://site.test/a", "<html><body><main>Contenu A</main></body></html>"),
        ("https://site.test/b", "<html><body><main>Contenu B</main></body></html>"),
        ("https://site.test/c", "<html><body><main>Contenu C</main></body></html>"),
    ]);

    let report = CrawlerEngine::crawl(&engine, &target(2, 5), &spec(PriorityStrategy::Fifo))
        .await
        .unwrap();

    // The external link is dropped by the same-origin filter
    assert_eq!(report.outcome.pages_discovered, 4);
    assert_eq!(report.outcome.pages_processed, 4);
    assert!(report.outcome.pages_processed <= 5);
    assert!(!engine.calls().iter().any(|u| u.contains("external.test")));

    // Every page was visited exactly once
    let mut calls = engine.calls();
    calls.sort();
    calls.dedup();
    assert_eq!(calls.len(), 4);

    // External link is still reported for downstream classification
    assert!(report
        .links
        .iter()
        .any(|l| l.url.as_str() == "https://external.test/x"));

    assert_eq!(report.outcome.title.as_deref(), Some("Site"));
    assert!(report.outcome.content.contains("Contenu A"));
}

#[tokio::test]
async fn test_max_pages_stops_crawl() {
    let engine = MockRenderEngine::new(vec![
        ("https://site.test/", SEED_HTML),
        ("https://site.test/a", "<html><body><main>Contenu A</main></body></html>"),
        ("https://site.test/b", "<html><body><main>Contenu B</main></body></html>"),
        ("https://site.test/c", "<html><body><main>Contenu C</main></body></html>"),
    ]);

    let report = CrawlerEngine::crawl(&engine, &target(2, 2), &spec(PriorityStrategy::Fifo))
        .await
        .unwrap();

    assert_eq!(report.outcome.pages_processed, 2);
    assert_eq!(engine.calls().len(), 2);
}

#[tokio::test]
async fn test_pricing_links_crawled_first() {
    let seed = r#"
        <html><body><main>
            <p>Accueil</p>
            <a href="/about">A propos</a>
            <a href="/blog">Blog</a>
            <a href="/pricing">Tarifs</a>
        </main></body></html>
    "#;
    let engine = MockRenderEngine::new(vec![
        ("https://site.test/", seed),
        ("https://site.test/about", "<html><body><main>Equipe</main></body></html>"),
        ("https://site.test/blog", "<html><body><main>Articles</main></body></html>"),
        (
            "https://site.test/pricing",
            "<html><body><main>19 euros par mois</main></body></html>",
        ),
    ]);

    CrawlerEngine::crawl(&engine, &target(2, 10), &spec(PriorityStrategy::PricingFirst))
        .await
        .unwrap();

    let calls = engine.calls();
    assert_eq!(calls[0], "https://site.test/");
    // The pricing page jumps the queue ahead of same-depth links
    assert_eq!(calls[1], "https://site.test/pricing");
}

#[tokio::test]
async fn test_pricing_crawl_falls_back_to_homepage() {
    let seed = r#"
        <html><body><main>
            <p>Outil de montage vidéo, offre gratuite et offre pro.</p>
            <a href="/about">A propos</a>
        </main></body></html>
    "#;
    let engine = MockRenderEngine::new(vec![
        ("https://site.test/", seed),
        ("https://site.test/about", "<html><body><main>Equipe</main></body></html>"),
    ]);

    let report = CrawlerEngine::crawl(
        &engine,
        &target(2, 10),
        &spec(PriorityStrategy::PricingFirst),
    )
    .await
    .unwrap();

    // No pricing page exists anywhere, the homepage content still feeds the analysis
    assert!(report.outcome.content.contains("offre gratuite"));
    assert_eq!(report.outcome.pages_processed, 2);
}

#[tokio::test]
async fn test_page_failure_skips_and_continues() {
    let seed = r#"
        <html><body><main>
            <p>Accueil</p>
            <a href="/broken">Cassé</a>
            <a href="/ok">OK</a>
        </main></body></html>
    "#;
    let engine = MockRenderEngine::new(vec![
        ("https://site.test/", seed),
        ("https://site.test/ok", "<html><body><main>Page OK</main></body></html>"),
    ]);

    let report = CrawlerEngine::crawl(&engine, &target(2, 10), &spec(PriorityStrategy::Fifo))
        .await
        .unwrap();

    // /broken failed to render, the crawl still returns partial results
    assert_eq!(report.outcome.pages_processed, 2);
    assert!(report.outcome.content.contains("Page OK"));
}

#[tokio::test]
async fn test_content_truncated_to_cap() {
    let engine = MockRenderEngine::new(vec![(
        "https://site.test/",
        "<html><body><main>Un contenu assez long pour être tronqué</main></body></html>",
    )]);

    let mut bounded = spec(PriorityStrategy::Fifo);
    bounded.max_content_chars = 10;

    let report = CrawlerEngine::crawl(&engine, &target(0, 1), &bounded)
        .await
        .unwrap();

    assert_eq!(report.outcome.content_length, 10);
    assert_eq!(report.outcome.content.chars().count(), 10);
}
