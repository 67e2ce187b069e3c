//! Read-only projections over in-memory collections.
//!
//! Everything here is pure and recomputed on each call.

use crate::model::{ContentSection, SettingType, SiteSetting};

pub const OTHER: &str = "Other";

/// How a rule tests a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyTest {
    Prefix(&'static str),
    Contains(&'static str),
}

impl KeyTest {
    pub fn matches(self, key: &str) -> bool {
        match self {
            KeyTest::Prefix(p) => key.starts_with(p),
            KeyTest::Contains(s) => key.contains(s),
        }
    }
}

/// Ordered `(test, label)` table; first match wins.
pub type RuleTable = &'static [(KeyTest, &'static str)];

pub const SECTION_RULES: RuleTable = &[
    (KeyTest::Prefix("hero"), "Hero Section"),
    (KeyTest::Prefix("protocol"), "Protocol Section"),
    (KeyTest::Prefix("archive"), "Ship Log Section"),
    (KeyTest::Prefix("current_cycle"), "Current Cycle Section"),
    (KeyTest::Prefix("services"), "Services Section"),
    (KeyTest::Prefix("signal"), "Signal Section"),
];

pub const SETTING_RULES: RuleTable = &[
    (KeyTest::Contains("link"), "Social Links"),
    (KeyTest::Contains("cycle"), "Current Cycle"),
    (KeyTest::Contains("title"), "Site Information"),
];

pub fn categorize(rules: RuleTable, key: &str) -> &'static str {
    rules
        .iter()
        .find(|(test, _)| test.matches(key))
        .map(|(_, label)| *label)
        .unwrap_or(OTHER)
}

pub fn section_category(section_key: &str) -> &'static str {
    categorize(SECTION_RULES, section_key)
}

pub fn setting_category(setting_key: &str) -> &'static str {
    categorize(SETTING_RULES, setting_key)
}

/// Case-insensitive substring match on key or content; empty matches all.
pub fn section_matches(section: &ContentSection, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    section.section_key.to_lowercase().contains(&term)
        || section.content.to_lowercase().contains(&term)
}

pub fn filter_sections<'a>(sections: &'a [ContentSection], term: &str) -> Vec<&'a ContentSection> {
    sections
        .iter()
        .filter(|s| section_matches(s, term))
        .collect()
}

/// Partitions `items` by label. Groups appear in order of first appearance
/// and keep the input's relative order.
pub fn group_by<'a, T>(
    items: &'a [T],
    label: impl Fn(&T) -> &'static str,
) -> Vec<(&'static str, Vec<&'a T>)> {
    let mut groups: Vec<(&'static str, Vec<&'a T>)> = Vec::new();
    for item in items {
        let l = label(item);
        match groups.iter_mut().find(|(g, _)| *g == l) {
            Some((_, members)) => members.push(item),
            None => groups.push((l, vec![item])),
        }
    }
    groups
}

pub fn group_settings(settings: &[SiteSetting]) -> Vec<(&'static str, Vec<&SiteSetting>)> {
    group_by(settings, |s| setting_category(&s.setting_key))
}

pub fn group_sections(sections: &[ContentSection]) -> Vec<(&'static str, Vec<&ContentSection>)> {
    group_by(sections, |s| section_category(&s.section_key))
}

/// `hero_main_title` -> `Hero Main Title`.
pub fn display_name(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Number,
    Checkbox,
}

pub fn input_kind(setting_type: SettingType) -> InputKind {
    match setting_type {
        SettingType::Number => InputKind::Number,
        SettingType::Boolean => InputKind::Checkbox,
        SettingType::Text => InputKind::Text,
    }
}

pub fn placeholder(setting_key: &str) -> String {
    format!("Enter {}", setting_key.replace('_', " "))
}

#[cfg(test)]
#[path = "tests/views_tests.rs"]
mod tests;
