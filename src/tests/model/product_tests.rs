use super::*;

#[test]
fn draft_is_placed_after_existing_cards() {
    let d = ProductCard::draft(3);
    assert_eq!(d.id, None);
    assert_eq!(d.sort_order, 4);
    assert_eq!(d.status, ProductStatus::Active);
    assert!(d.title.is_empty());
}

#[test]
fn set_field_parses_typed_columns() {
    let mut card = ProductCard::draft(0);
    card.set_field("status", "sunset").unwrap();
    card.set_field("sort_order", " 7 ").unwrap();
    card.set_field("title", "Widget").unwrap();
    assert_eq!(card.status, ProductStatus::Sunset);
    assert_eq!(card.sort_order, 7);
    assert_eq!(card.title, "Widget");
}

#[test]
fn set_field_rejects_bad_values_and_unknown_fields() {
    let mut card = ProductCard::draft(0);
    assert!(matches!(
        card.set_field("sort_order", "0"),
        Err(AdminError::Validation(_))
    ));
    assert!(matches!(
        card.set_field("sort_order", "two"),
        Err(AdminError::Validation(_))
    ));
    assert!(matches!(
        card.set_field("status", "RETIRED"),
        Err(AdminError::Validation(_))
    ));
    assert!(matches!(
        card.set_field("id", "abc"),
        Err(AdminError::Validation(_))
    ));
}

#[test]
fn validate_requires_a_title() {
    let mut card = ProductCard::draft(0);
    assert!(matches!(card.validate(), Err(AdminError::Validation(_))));
    card.title = "   ".to_string();
    assert!(card.validate().is_err());
    card.title = "Widget".to_string();
    assert!(card.validate().is_ok());
}

#[test]
fn rows_with_nulls_and_numeric_ids_decode() {
    let row = serde_json::json!({
        "id": 12,
        "title": "Widget",
        "description": null,
        "status": "PIVOTED",
        "cycle_info": null,
        "image_url": null,
        "modal_content": null,
        "sort_order": 2
    });
    let serde_json::Value::Object(row) = row else {
        panic!("object");
    };
    let card = ProductCard::from_row(row).unwrap();
    assert_eq!(card.id.as_deref(), Some("12"));
    assert_eq!(card.description, "");
    assert_eq!(card.status, ProductStatus::Pivoted);
}

#[test]
fn save_fields_never_include_the_id() {
    let mut card = ProductCard::draft(0);
    card.id = Some("abc".to_string());
    card.title = "Widget".to_string();
    let fields = card.save_fields().unwrap();
    assert!(!fields.contains_key("id"));
    assert_eq!(fields.get("title"), Some(&serde_json::json!("Widget")));
    assert_eq!(fields.get("status"), Some(&serde_json::json!("ACTIVE")));
    assert_eq!(fields.len(), 7);
}

#[test]
fn null_sort_order_reads_as_first_position() -> anyhow::Result<()> {
    let card: ProductCard = serde_json::from_value(serde_json::json!({
        "id": 9,
        "title": "Driftwood",
        "status": "ACTIVE",
        "sort_order": null,
    }))?;
    assert_eq!(card.sort_order, 1);
    assert_eq!(card.id.as_deref(), Some("9"));

    let missing: ProductCard = serde_json::from_value(serde_json::json!({"title": "Tidewater"}))?;
    assert_eq!(missing.sort_order, 1);
    Ok(())
}
