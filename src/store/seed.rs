//! Starter dataset for a fresh store.

use serde_json::json;

use crate::rows::Row;

fn row(v: serde_json::Value) -> Row {
    match v {
        serde_json::Value::Object(map) => map,
        _ => Row::new(),
    }
}

pub(crate) fn content_sections() -> Vec<Row> {
    [
        ("hero_title", "Building in public, one cycle at a time", "text"),
        ("hero_subtitle", "A studio shipping <em>small</em> products fast", "html"),
        ("protocol_intro", "How we pick, build and retire products", "text"),
        ("archive_heading", "Ship Log", "text"),
        ("current_cycle_title", "Current Cycle", "text"),
        ("services_intro", "Work with us on your next launch", "text"),
        ("signal_cta", "Subscribe for cycle updates", "text"),
        ("footer_note", "Made with care", "text"),
    ]
    .into_iter()
    .map(|(key, content, kind)| {
        row(json!({
            "section_key": key,
            "content": content,
            "content_type": kind,
        }))
    })
    .collect()
}

pub(crate) fn product_cards() -> Vec<Row> {
    vec![
        row(json!({
            "title": "Tidewater",
            "description": "Habit tracker for night owls",
            "status": "ACTIVE",
            "cycle_info": "Cycle 03 / Jun 2025",
            "image_url": "",
            "modal_content": "Tidewater keeps streaks honest.",
            "sort_order": 1,
        })),
        row(json!({
            "title": "Lanternfish",
            "description": "Read-later queue with expiry",
            "status": "SUNSET",
            "cycle_info": "Cycle 01 / Feb 2025",
            "image_url": "",
            "modal_content": "Retired after two cycles.",
            "sort_order": 2,
        })),
        row(json!({
            "title": "Driftwood",
            "description": "Invoice drafts from chat logs",
            "status": "PIVOTED",
            "cycle_info": "Cycle 02 / Apr 2025",
            "image_url": "",
            "modal_content": "Now a bookkeeping assistant.",
            "sort_order": 4,
        })),
    ]
}

pub(crate) fn site_settings() -> Vec<Row> {
    [
        ("site_title", "Studio", "text"),
        ("twitter_link", "https://twitter.com/studio", "text"),
        ("github_link", "https://github.com/studio", "text"),
        ("current_cycle_number", "4", "number"),
        ("show_current_cycle", "true", "boolean"),
        ("contact_email", "hello@studio.dev", "text"),
    ]
    .into_iter()
    .map(|(key, value, kind)| {
        row(json!({
            "setting_key": key,
            "setting_value": value,
            "setting_type": kind,
        }))
    })
    .collect()
}

pub(crate) fn rows_for(table: &str) -> Vec<Row> {
    match table {
        "content_sections" => content_sections(),
        "product_cards" => product_cards(),
        "site_settings" => site_settings(),
        _ => Vec::new(),
    }
}
