//! Cache TTL behavior under an injected clock.

use std::sync::Arc;
use std::time::Duration;

use ieum_core::cache::PredictionCache;
use ieum_core::constants::CACHE_TTL;
use ieum_test_utils::ManualClock;

#[test]
fn entries_age_out_with_the_clock() {
    let clock = Arc::new(ManualClock::new());
    let mut cache = PredictionCache::with_clock(clock.clone());

    cache.set("오늘 회의에서", 7, "논의한 내용");
    clock.advance(CACHE_TTL - Duration::from_secs(1));
    assert_eq!(
        cache.get("오늘 회의에서", 7),
        Some("논의한 내용".to_string())
    );

    clock.advance(Duration::from_secs(2));
    assert_eq!(cache.get("오늘 회의에서", 7), None);
    assert!(cache.is_empty());
}

#[test]
fn cleanup_only_sweeps_aged_entries() {
    let clock = Arc::new(ManualClock::new());
    let mut cache = PredictionCache::with_clock(clock.clone());

    cache.set("첫 번째 문서", 6, "내용 하나");
    clock.advance(CACHE_TTL + Duration::from_secs(1));
    cache.set("두 번째 문서", 6, "내용 둘");

    cache.cleanup();
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("두 번째 문서", 6), Some("내용 둘".to_string()));
}
