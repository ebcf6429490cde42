//! Cache-aside behavior of memoized computations

use crate::test_utils::FlakyBackend;
use memo_domain::{CallArgs, Error, KeyValueBackend};
use memo_infrastructure::Memoizer;
use memo_providers::cache::MokaBackend;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const TTL: Duration = Duration::from_secs(300);

fn moka() -> Arc<dyn KeyValueBackend> {
    Arc::new(MokaBackend::new())
}

#[tokio::test]
async fn test_square_is_computed_once_per_input() {
    let calls = Arc::new(AtomicUsize::new(0));
    let memo = Memoizer::new(moka(), "sq", TTL).unwrap();

    let counter = Arc::clone(&calls);
    let square = memo.wrap(move |x: u64| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Infallible>(x * x)
        }
    });

    assert_eq!(square.call(4).await.unwrap(), 16);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert_eq!(square.call(4).await.unwrap(), 16);
    assert_eq!(calls.load(Ordering::SeqCst), 1, "second call must be a hit");

    assert_eq!(square.call(5).await.unwrap(), 25);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let stats = square.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.stores, 2);
    assert_eq!(stats.store_failures, 0);
}

#[tokio::test]
async fn test_result_is_stored_as_json_under_derived_key() {
    let backend = Arc::new(FlakyBackend::new());
    let memo = Memoizer::new(backend.clone(), "sq", TTL).unwrap();
    let square = memo.wrap(|(x,): (u64,)| async move { Ok::<_, Infallible>(x * x) });

    assert_eq!(square.call((4,)).await.unwrap(), 16);

    let key = square.key_for(&(4u64,)).unwrap();
    assert_eq!(
        key.as_str(),
        "sq:46b1884167c4edd308bcf0c04163dd02d05c9742b35e86b57b5f7ed1b82f3850"
    );
    assert_eq!(backend.peek(key.as_str()).await, Some(b"16".to_vec()));
}

#[tokio::test]
async fn test_keyword_order_does_not_change_the_key() {
    let calls = AtomicUsize::new(0);
    let memo = Memoizer::new(moka(), "area", TTL).unwrap();

    let first = CallArgs::new().kwarg("width", 3).kwarg("height", 4);
    let second = CallArgs::new().kwarg("height", 4).kwarg("width", 3);
    assert_eq!(memo.key_for(&first).unwrap(), memo.key_for(&second).unwrap());

    for args in [&first, &second] {
        let area = memo
            .get_or_compute(args, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Infallible>(12u64)
            })
            .await
            .unwrap();
        assert_eq!(area, 12);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_json_object_field_order_does_not_change_the_key() {
    let memo = Memoizer::new(moka(), "obj", TTL).unwrap();

    let a = serde_json::json!({"a": 1, "b": {"x": true, "y": [1, 2]}});
    let b = serde_json::json!({"b": {"y": [1, 2], "x": true}, "a": 1});

    assert_eq!(memo.key_for(&a).unwrap(), memo.key_for(&b).unwrap());
}

#[tokio::test]
async fn test_positional_order_changes_the_key() {
    let memo = Memoizer::new(moka(), "pair", TTL).unwrap();

    let ab = memo.key_for(&(1, 2)).unwrap();
    let ba = memo.key_for(&(2, 1)).unwrap();

    assert_ne!(ab, ba);
}

#[tokio::test]
async fn test_namespaces_do_not_share_entries() {
    let backend = moka();
    let calls = AtomicUsize::new(0);
    let square = Memoizer::new(Arc::clone(&backend), "sq", TTL).unwrap();
    let cube = square.with_namespace("cube").unwrap();

    let sq = square
        .get_or_compute(&3u64, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Infallible>(9u64)
        })
        .await
        .unwrap();
    let cu = cube
        .get_or_compute(&3u64, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Infallible>(27u64)
        })
        .await
        .unwrap();

    assert_eq!((sq, cu), (9, 27));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_ne!(square.key_for(&3u64).unwrap(), cube.key_for(&3u64).unwrap());
}

#[tokio::test]
async fn test_entry_is_recomputed_after_ttl_expires() {
    let calls = Arc::new(AtomicUsize::new(0));
    let memo = Memoizer::new(moka(), "short", Duration::from_millis(50)).unwrap();

    let counter = Arc::clone(&calls);
    let double = memo.wrap(move |x: u64| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Infallible>(x * 2)
        }
    });

    assert_eq!(double.call(21).await.unwrap(), 42);
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(double.call(21).await.unwrap(), 42);

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Report {
    total: u64,
    label: String,
    tags: Vec<String>,
}

#[derive(Serialize)]
struct ReportQuery<'a> {
    account: &'a str,
    year: u16,
}

#[tokio::test]
async fn test_structured_inputs_and_results_round_trip() {
    let calls = AtomicUsize::new(0);
    let memo = Memoizer::new(moka(), "report", TTL).unwrap();
    let query = ReportQuery {
        account: "acme",
        year: 2024,
    };
    let expected = Report {
        total: 1200,
        label: "acme/2024".to_string(),
        tags: vec!["annual".to_string()],
    };

    for _ in 0..2 {
        let report = memo
            .get_or_compute(&query, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Infallible>(expected.clone())
            })
            .await
            .unwrap();
        assert_eq!(report, expected);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unit_and_empty_inputs_are_memoized() {
    let calls = AtomicUsize::new(0);
    let memo = Memoizer::new(moka(), "const", TTL).unwrap();

    for _ in 0..3 {
        let value = memo
            .get_or_compute(&CallArgs::new(), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Infallible>("fixed".to_string())
            })
            .await
            .unwrap();
        assert_eq!(value, "fixed");
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_invalid_namespace_is_rejected() {
    for namespace in ["", "has:colon", "has space"] {
        let result = Memoizer::new(moka(), namespace, TTL);
        assert!(
            matches!(result, Err(Error::Configuration { .. })),
            "namespace {namespace:?} must be rejected"
        );
    }
}

#[tokio::test]
async fn test_zero_ttl_is_rejected() {
    let result = Memoizer::new(moka(), "sq", Duration::ZERO);
    assert!(matches!(result, Err(Error::Configuration { .. })));

    let memo = Memoizer::new(moka(), "sq", TTL).unwrap();
    assert!(memo.with_ttl(Duration::ZERO).is_err());
}
