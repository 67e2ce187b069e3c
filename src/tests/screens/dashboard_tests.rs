use super::*;
use crate::test_support::ScriptedStore;

#[test]
fn stats_count_both_collections() {
    let (scripted, store) = ScriptedStore::seeded().shared();
    let stats = load_stats(store);
    assert_eq!(stats.content_sections, 8);
    assert_eq!(stats.product_cards, 3);
    let day = stats.last_updated.unwrap();
    assert_eq!(day.len(), 10);
    assert_eq!(&day[4..5], "-");

    let mut calls = scripted.calls();
    calls.sort();
    assert_eq!(calls, vec!["select content_sections", "select product_cards"]);
}

#[test]
fn failed_listing_yields_zeroes() {
    let (_, store) = ScriptedStore::seeded().failing_select().shared();
    assert_eq!(load_stats(store), DashboardStats::default());
}

#[test]
fn quick_actions_point_at_protected_screens() {
    let routes: Vec<Route> = QUICK_ACTIONS.iter().map(|a| a.route).collect();
    assert_eq!(routes, vec![Route::Content, Route::Products, Route::Settings]);
}

#[test]
fn calendar_date_uses_the_given_offset() -> anyhow::Result<()> {
    let midnight_utc = time::OffsetDateTime::from_unix_timestamp(0)?;
    assert_eq!(calendar_date(midnight_utc), "1970-01-01");
    let west = midnight_utc.to_offset(time::UtcOffset::from_hms(-5, 0, 0)?);
    assert_eq!(calendar_date(west), "1969-12-31");
    Ok(())
}
