use super::*;
use crate::test_support::ScriptedStore;

fn loaded(store: ScriptedStore) -> (Arc<ScriptedStore>, ProductScreen) {
    let (scripted, store) = store.shared();
    let mut screen = ProductScreen::new(store);
    assert!(screen.load());
    (scripted, screen)
}

fn titles(cards: &[ProductCard]) -> Vec<&str> {
    cards.iter().map(|c| c.title.as_str()).collect()
}

#[test]
fn empty_title_is_rejected_without_a_remote_call() {
    let (scripted, mut screen) = loaded(ScriptedStore::seeded());
    let calls = scripted.calls().len();
    screen.begin_add();
    screen.update_field("title", "   ").unwrap();
    assert!(!screen.can_save());
    assert!(matches!(screen.save(), Err(AdminError::Validation(_))));
    assert_eq!(scripted.calls().len(), calls);
    assert_eq!(screen.products().len(), 3);
}

#[test]
fn new_card_is_ordered_by_sort_order_on_listing() -> anyhow::Result<()> {
    let (scripted, mut screen) = loaded(ScriptedStore::seeded());
    screen.begin_add();
    assert_eq!(screen.session().draft().unwrap().record.sort_order, 4);
    screen.update_field("title", "Widget")?;
    screen.update_field("sort_order", "3")?;
    assert!(screen.can_save());
    assert_eq!(screen.save()?, SaveOutcome::Created);
    assert_eq!(titles(screen.products()).last(), Some(&"Widget"));

    let mut reloaded = ProductScreen::new(scripted);
    reloaded.load();
    assert_eq!(
        titles(reloaded.products()),
        vec!["Tidewater", "Lanternfish", "Widget", "Driftwood"]
    );
    Ok(())
}

#[test]
fn edit_updates_the_card_in_place() -> anyhow::Result<()> {
    let (_, mut screen) = loaded(ScriptedStore::seeded());
    let id = screen.products()[1].id.clone().unwrap();
    screen.begin_edit(&id)?;
    screen.update_field("status", "pivoted")?;
    screen.save()?;
    assert_eq!(screen.products()[1].status, crate::model::ProductStatus::Pivoted);
    assert_eq!(screen.products().len(), 3);
    Ok(())
}

#[test]
fn declined_delete_sends_nothing() -> anyhow::Result<()> {
    let (scripted, mut screen) = loaded(ScriptedStore::seeded());
    let id = screen.products()[0].id.clone().unwrap();
    let calls = scripted.calls().len();
    let mut shown = None;
    let outcome = screen.delete(&id, |card| {
        shown = card.map(|c| c.title.clone());
        false
    })?;
    assert_eq!(outcome, DeleteOutcome::Declined);
    assert_eq!(shown.as_deref(), Some("Tidewater"));
    assert_eq!(scripted.calls().len(), calls);
    assert_eq!(screen.products().len(), 3);
    Ok(())
}

#[test]
fn confirmed_delete_removes_locally_after_the_store() -> anyhow::Result<()> {
    let (scripted, mut screen) = loaded(ScriptedStore::seeded());
    let id = screen.products()[0].id.clone().unwrap();
    assert_eq!(screen.delete(&id, |_| true)?, DeleteOutcome::Deleted);
    assert_eq!(titles(screen.products()), vec!["Lanternfish", "Driftwood"]);
    assert!(
        scripted
            .calls()
            .contains(&format!("delete product_cards id={}", id))
    );
    Ok(())
}

#[test]
fn delete_of_a_vanished_card_keeps_the_list() {
    let (_, mut screen) = loaded(ScriptedStore::seeded());
    let err = screen.delete("gone", |_| true).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(screen.products().len(), 3);
    assert!(screen.message().unwrap().starts_with("Error deleting product"));
}

#[test]
fn failed_delete_keeps_the_list() {
    let (_, mut screen) = loaded(ScriptedStore::seeded().failing_delete());
    let id = screen.products()[2].id.clone().unwrap();
    assert!(matches!(
        screen.delete(&id, |_| true),
        Err(AdminError::Store(_))
    ));
    assert_eq!(screen.products().len(), 3);
}

#[test]
fn cancel_discards_the_add_form() {
    let (_, mut screen) = loaded(ScriptedStore::seeded());
    screen.begin_add();
    screen.update_field("title", "Scratch").unwrap();
    screen.cancel();
    assert!(!screen.session().is_editing());
    assert!(!screen.can_save());
    assert_eq!(screen.products().len(), 3);
}
