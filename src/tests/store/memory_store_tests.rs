use super::*;
use serde_json::json;

fn fields(v: serde_json::Value) -> Row {
    match v {
        serde_json::Value::Object(m) => m,
        _ => panic!("object expected"),
    }
}

#[test]
fn seeded_store_has_every_table() -> anyhow::Result<()> {
    let store = MemoryStore::seeded()?;
    assert_eq!(store.select("content_sections", None, None)?.len(), 8);
    assert_eq!(store.select("product_cards", None, None)?.len(), 3);
    assert_eq!(store.select("site_settings", None, None)?.len(), 6);
    Ok(())
}

#[test]
fn unknown_table_is_rejected() {
    let store = MemoryStore::new();
    assert!(matches!(
        store.select("nope", None, None),
        Err(AdminError::Store(_))
    ));
}

#[test]
fn insert_assigns_ids_and_select_filters() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let inserted = store.insert("product_cards", &fields(json!({"title": "A", "sort_order": 1})))?;
    let id = inserted[0]["id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 32);

    let found = store.select("product_cards", Some(&Match::on("id", id.as_str())), None)?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["title"], json!("A"));
    Ok(())
}

#[test]
fn open_seeds_once_and_reloads_from_disk() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    {
        let store = MemoryStore::open(dir.path(), true)?;
        store.update(
            "site_settings",
            &Match::on("setting_key", "site_title"),
            &fields(json!({"setting_value": "Renamed"})),
        )?;
    }
    assert!(dir.path().join("tables/site_settings.json").exists());

    let reopened = MemoryStore::open(dir.path(), true)?;
    let rows = reopened.select(
        "site_settings",
        Some(&Match::on("setting_key", "site_title")),
        None,
    )?;
    assert_eq!(rows[0]["setting_value"], json!("Renamed"));
    assert_eq!(reopened.select("site_settings", None, None)?.len(), 6);
    Ok(())
}

#[test]
fn open_without_seed_starts_empty() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = MemoryStore::open(dir.path(), false)?;
    assert!(store.select("content_sections", None, None)?.is_empty());
    Ok(())
}

#[test]
fn identity_survives_a_reopen() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let grant = {
        let store = MemoryStore::open(dir.path(), false)?;
        store.sign_up("Admin@Example.com", "hunter22")?
    };
    assert_eq!(grant.user.email, "admin@example.com");

    let store = MemoryStore::open(dir.path(), false)?;
    assert_eq!(store.user(&grant.access_token)?, grant.user);
    assert!(store.sign_in("admin@example.com", "hunter22").is_ok());

    let tokens = std::fs::read_to_string(dir.path().join("tokens.json"))?;
    assert!(!tokens.contains(&grant.access_token));
    Ok(())
}

#[test]
fn auth_failures_are_auth_errors() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    store.sign_up("a@b.co", "secret1")?;
    assert!(matches!(
        store.sign_up("a@b.co", "secret1"),
        Err(AdminError::Auth(_))
    ));
    assert!(matches!(
        store.sign_up("not-an-email", "secret1"),
        Err(AdminError::Auth(_))
    ));
    assert!(matches!(
        store.sign_up("c@b.co", "short"),
        Err(AdminError::Auth(_))
    ));
    assert!(matches!(
        store.sign_in("a@b.co", "wrong-pass"),
        Err(AdminError::Auth(_))
    ));
    assert!(matches!(store.user("bogus"), Err(AdminError::Auth(_))));
    Ok(())
}

#[test]
fn sign_out_revokes_the_token() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let grant = store.sign_up("a@b.co", "secret1")?;
    store.sign_out(&grant.access_token)?;
    assert!(store.user_for_token(&grant.access_token).is_none());
    assert!(store.sign_out(&grant.access_token).is_err());
    Ok(())
}

#[test]
fn failed_write_through_leaves_rows_unchanged() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = MemoryStore::open(dir.path(), true)?;
    let before = store.select("product_cards", None, None)?;
    let id = before[0]["id"].as_str().unwrap().to_string();

    // A non-empty directory where the table file belongs makes the rename fail.
    let path = dir.path().join("tables/product_cards.json");
    std::fs::remove_file(&path)?;
    std::fs::create_dir_all(path.join("blocker"))?;

    assert!(matches!(
        store.delete("product_cards", &Match::on("id", id.as_str())),
        Err(AdminError::Store(_))
    ));
    assert!(matches!(
        store.update(
            "product_cards",
            &Match::on("id", id.as_str()),
            &fields(json!({"title": "Renamed"})),
        ),
        Err(AdminError::Store(_))
    ));
    assert_eq!(store.select("product_cards", None, None)?, before);
    Ok(())
}

#[test]
fn failed_identity_write_does_not_register_the_user() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = MemoryStore::open(dir.path(), false)?;
    std::fs::create_dir_all(dir.path().join("users.json/blocker"))?;

    assert!(matches!(
        store.sign_up("a@b.co", "secret1"),
        Err(AdminError::Store(_))
    ));
    assert!(matches!(
        store.sign_in("a@b.co", "secret1"),
        Err(AdminError::Auth(_))
    ));
    Ok(())
}

#[test]
fn insert_many_is_all_or_nothing() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let batch = vec![
        fields(json!({"section_key": "hero_title", "content": "A"})),
        fields(json!({"section_key": "hero_title", "content": "B"})),
    ];
    assert!(matches!(
        store.insert_many("content_sections", &batch),
        Err(AdminError::Store(msg)) if msg.contains("duplicate key")
    ));
    assert!(store.select("content_sections", None, None)?.is_empty());

    let ok = vec![
        fields(json!({"section_key": "hero_title", "content": "A"})),
        fields(json!({"section_key": "hero_subtitle", "content": "B"})),
    ];
    let inserted = store.insert_many("content_sections", &ok)?;
    assert_eq!(inserted.len(), 2);
    assert_ne!(inserted[0]["id"], inserted[1]["id"]);
    Ok(())
}
