//! Cart persistence and the resume decision across a simulated restart.

use std::path::PathBuf;

use serde_json::json;
use storefront_cache::{Cache, KvBackend, MemoryBackend};
use storefront_commerce::prelude::*;

fn store_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("storefront-commerce-it-{}", std::process::id()))
        .join(name)
}

fn sources() -> Vec<CatalogSource> {
    vec![
        CatalogSource::new(
            "A",
            json!([
                {"id": 5, "name": "Tea", "category": "Drinks", "currentPrice": 10, "originalPrice": 15},
                {"id": 6, "name": "Rice", "category": "Pantry", "currentPrice": 35}
            ]),
        ),
        CatalogSource::new("B", json!({"items": [{"id": 5, "name": "Dates", "currentPrice": "20"}]})),
    ]
}

fn open(path: &PathBuf) -> Storefront {
    Storefront::open(&sources(), Cache::open(path).unwrap(), StorefrontConfig::default())
}

fn lines(store: &Storefront) -> Vec<(String, i64)> {
    store
        .cart_items()
        .iter()
        .map(|i| (i.id.to_string(), i.quantity))
        .collect()
}

#[test]
fn test_resume_round_trip() {
    let path = store_path("resume.json");
    let _ = std::fs::remove_file(&path);

    let mut first = open(&path);
    assert_eq!(first.resume_state(), ResumeState::Resolved);
    first.add_by_id("A-5").unwrap();
    first.add_by_id("A-5").unwrap();
    first.add_by_id("B-5").unwrap();
    first.update_quantity("B-5", 2);
    let before = lines(&first);
    drop(first);

    let mut second = open(&path);
    assert!(second.needs_resume_decision());
    second.resolve_resume(ResumeAction::Resume).unwrap();
    assert_eq!(lines(&second), before);
    assert_eq!(second.totals().subtotal_current.amount_cents, 2 * 1000 + 3 * 2000);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_start_new_discards_saved_cart() {
    let path = store_path("start-new.json");
    let _ = std::fs::remove_file(&path);

    let mut first = open(&path);
    first.add_by_id("A-6").unwrap();
    drop(first);

    let mut second = open(&path);
    second.resolve_resume(ResumeAction::StartNew).unwrap();
    assert!(second.cart().is_empty());
    drop(second);

    let third = open(&path);
    assert!(!third.needs_resume_decision());
    assert!(third.cart().is_empty());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_corrupt_saved_cart_skips_prompt() {
    let path = store_path("corrupt.json");
    let _ = std::fs::remove_file(&path);

    let cache = Cache::open(&path).unwrap();
    cache.set_raw("storefront-cart", "{not a cart").unwrap();
    cache.set_raw("storefront-admin-mode", "yes").unwrap();

    let store = Storefront::open(&sources(), cache, StorefrontConfig::default());
    assert_eq!(store.resume_state(), ResumeState::Resolved);
    assert!(store.cart().is_empty());
    assert!(!store.is_admin());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_quota_failure_keeps_cart_usable() {
    let backend = MemoryBackend::with_capacity(48);
    backend.set("storefront-admin-mode", "false").unwrap();
    let mut store = Storefront::open(&sources(), Cache::new(backend), StorefrontConfig::default());

    store.add_by_id("A-5").unwrap();
    store.add_by_id("A-6").unwrap();

    assert!(!store.is_cart_persisted());
    assert_eq!(store.cart().item_count(), 2);
    assert_eq!(store.totals().subtotal_current.amount_cents, 4500);
    assert!(store.checkout_snapshot().is_some());
}

#[test]
fn test_merged_catalog_and_categories() {
    let path = store_path("catalog.json");
    let _ = std::fs::remove_file(&path);

    let store = open(&path);
    let ids: Vec<_> = store.catalog().products().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["A-5", "A-6", "B-5"]);
    assert_eq!(store.categories(), vec!["all", "Drinks", "Pantry", "uncategorized"]);
    assert_eq!(store.merge_report().products, 3);

    let _ = std::fs::remove_file(&path);
}
