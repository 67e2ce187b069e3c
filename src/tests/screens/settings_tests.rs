use super::*;
use crate::test_support::ScriptedStore;

fn loaded(store: ScriptedStore) -> (Arc<ScriptedStore>, SettingsScreen) {
    let (scripted, store) = store.shared();
    let mut screen = SettingsScreen::new(store);
    assert!(screen.load());
    (scripted, screen)
}

fn update_calls(scripted: &ScriptedStore) -> Vec<String> {
    scripted
        .calls()
        .into_iter()
        .filter(|c| c.starts_with("update "))
        .collect()
}

#[test]
fn pending_values_start_from_the_store() {
    let (_, screen) = loaded(ScriptedStore::seeded());
    assert_eq!(screen.value("site_title"), "Studio");
    assert!(screen.flag("show_current_cycle"));
    assert!(screen.modified_keys().is_empty());
    assert_eq!(screen.value("missing"), "");
}

#[test]
fn boolean_round_trip_through_save() -> anyhow::Result<()> {
    let (scripted, mut screen) = loaded(ScriptedStore::seeded());
    screen.set_flag("show_current_cycle", false)?;
    assert_eq!(screen.value("show_current_cycle"), "false");
    assert_eq!(screen.save_all()?, 1);

    let mut reloaded = SettingsScreen::new(scripted.clone());
    reloaded.load();
    assert!(!reloaded.flag("show_current_cycle"));
    reloaded.set_flag("show_current_cycle", true)?;
    reloaded.save_all()?;
    let stored = reloaded
        .settings()
        .iter()
        .find(|s| s.setting_key == "show_current_cycle")
        .unwrap();
    assert_eq!(stored.setting_value, "true");
    assert!(stored.flag());
    Ok(())
}

#[test]
fn only_modified_settings_are_sent() -> anyhow::Result<()> {
    let (scripted, mut screen) = loaded(ScriptedStore::seeded());
    screen.set_value("site_title", "Studio")?;
    screen.set_value("contact_email", "ops@studio.dev")?;
    assert_eq!(screen.modified_keys(), vec!["contact_email".to_string()]);
    screen.save_all()?;
    assert_eq!(
        update_calls(&scripted),
        vec!["update site_settings setting_key=contact_email".to_string()]
    );
    assert_eq!(screen.message(), Some("Settings saved successfully!"));
    assert!(screen.modified_keys().is_empty());
    Ok(())
}

#[test]
fn nothing_to_save_makes_no_calls() -> anyhow::Result<()> {
    let (scripted, mut screen) = loaded(ScriptedStore::seeded());
    assert_eq!(screen.save_all()?, 0);
    assert!(update_calls(&scripted).is_empty());
    assert_eq!(screen.message(), Some("No changes to save."));
    Ok(())
}

#[test]
fn partial_batch_failure_patches_nothing_and_reports_once() -> anyhow::Result<()> {
    let (scripted, mut screen) =
        loaded(ScriptedStore::seeded().failing_update_for(&["twitter_link"]));
    let snapshot = screen.settings().to_vec();
    screen.set_value("site_title", "New Studio")?;
    screen.set_value("twitter_link", "https://x.com/studio")?;
    screen.set_value("current_cycle_number", "5")?;

    let err = screen.save_all().unwrap_err();
    let mut sent = update_calls(&scripted);
    sent.sort();
    assert_eq!(
        sent,
        vec![
            "update site_settings setting_key=current_cycle_number".to_string(),
            "update site_settings setting_key=site_title".to_string(),
            "update site_settings setting_key=twitter_link".to_string(),
        ]
    );
    match err {
        AdminError::BatchSave { failed, mut applied } => {
            assert_eq!(failed.len(), 1);
            assert_eq!(failed[0].0, "twitter_link");
            applied.sort();
            assert_eq!(applied, vec!["current_cycle_number", "site_title"]);
        }
        other => panic!("expected a batch error, got {:?}", other),
    }
    assert_eq!(screen.settings(), snapshot.as_slice());
    assert_eq!(
        screen.message(),
        Some("Error saving settings. Please try again.")
    );
    // Pending edits survive for a retry.
    assert_eq!(screen.value("twitter_link"), "https://x.com/studio");
    Ok(())
}

#[test]
fn values_are_checked_against_the_setting_type() {
    let (_, mut screen) = loaded(ScriptedStore::seeded());
    assert!(matches!(
        screen.set_value("current_cycle_number", "five"),
        Err(AdminError::Validation(_))
    ));
    assert!(matches!(
        screen.set_value("show_current_cycle", "yes"),
        Err(AdminError::Validation(_))
    ));
    assert!(screen.set_value("nope", "x").unwrap_err().is_not_found());
    assert_eq!(screen.value("current_cycle_number"), "4");
}

#[test]
fn summary_counts_groups() {
    let (_, screen) = loaded(ScriptedStore::seeded());
    let summary = screen.summary();
    assert_eq!(summary.total, 6);
    let labels: Vec<&str> = screen.grouped().iter().map(|(l, _)| *l).collect();
    assert_eq!(summary.categories, labels.len());
    assert!(labels.contains(&"Social Links"));
    assert!(labels.contains(&"Current Cycle"));
}

#[test]
fn unknown_setting_types_load_as_text() -> anyhow::Result<()> {
    let store = ScriptedStore::seeded();
    let row = |v: serde_json::Value| match v {
        serde_json::Value::Object(m) => m,
        _ => unreachable!(),
    };
    store.inner.insert(
        "site_settings",
        &row(serde_json::json!({
            "setting_key": "footer_blurb",
            "setting_value": "Long text",
            "setting_type": "textarea",
        })),
    )?;
    store.inner.insert(
        "site_settings",
        &row(serde_json::json!({
            "setting_key": "banner_text",
            "setting_value": null,
            "setting_type": null,
        })),
    )?;

    let (_, mut screen) = loaded(store);
    assert_eq!(screen.settings().len(), 8);
    let blurb = screen
        .settings()
        .iter()
        .find(|s| s.setting_key == "footer_blurb")
        .unwrap();
    assert_eq!(blurb.setting_type, crate::model::SettingType::Text);
    assert_eq!(screen.value("banner_text"), "");
    screen.set_value("footer_blurb", "anything goes")?;
    assert_eq!(screen.modified_keys(), vec!["footer_blurb".to_string()]);
    Ok(())
}
