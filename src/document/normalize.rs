//! The defaulting and forward-migration pass applied on load.
//!
//! Documents written by older versions of the schema may be missing whole
//! singletons or individual fields. This pass fills every recognized field
//! with its default so the rest of the engine can assume canonical shape.
//! It never overwrites a value that is already present, which makes it
//! idempotent by construction.

use std::collections::HashSet;

use serde_json::{Value, json};

use super::Record;

/// Top-level collection keys, in document order.
pub const COLLECTION_KEYS: [&str; 3] = ["research_papers", "projects", "blog_posts"];

/// Hero section font defaults, kept in sync with the site's stylesheet.
const HERO_DEFAULTS: [(&str, &str); 6] = [
    ("headlineFontEng", "Cinzel"),
    ("headlineFontCn", "\"Noto Serif SC\""),
    ("headlineSize", "text-5xl md:text-7xl lg:text-8xl"),
    ("subheadlineFontEng", "\"Palatino Linotype\""),
    ("subheadlineFontCn", "\"Noto Serif SC\""),
    ("subheadlineSize", "text-xl md:text-2xl lg:text-3xl"),
];

/// Apply the normalization pass to a document tree.
pub fn apply(doc: &mut Value) {
    let Some(root) = doc.as_object_mut() else {
        return;
    };

    for key in COLLECTION_KEYS {
        ensure_list(root, key);
    }
    ensure_list(root, "navigation");

    normalize_tags(root);
    normalize_hero(root);
    normalize_profile(root);
    normalize_research_page(root);

    // Homepage last: its featured-entry default points into `projects`.
    let default_featured_id = first_project_id(root);
    normalize_homepage(root, &default_featured_id);
}

/// The registry is a set, kept sorted case-insensitively for display.
/// Duplicates from legacy documents are dropped here; `add_tag` only
/// guards new insertions.
fn normalize_tags(root: &mut Record) {
    let list = ensure_list(root, "tags");
    let mut seen: HashSet<String> = HashSet::new();
    list.retain(|tag| {
        tag.as_str()
            .is_none_or(|name| seen.insert(name.to_string()))
    });
    list.sort_by_key(|tag| tag.as_str().unwrap_or_default().to_lowercase());
}

fn normalize_hero(root: &mut Record) {
    let hero = ensure_record(root, "hero");
    default_str(hero, "headline", "");
    default_str(hero, "subheadline", "");
    for (key, value) in HERO_DEFAULTS {
        default_str(hero, key, value);
    }
}

fn normalize_profile(root: &mut Record) {
    let profile = ensure_record(root, "profile");
    for key in ["name", "role", "affiliation", "bio", "email"] {
        default_str(profile, key, "");
    }
    profile.entry("showBio").or_insert(Value::Bool(false));

    let socials = ensure_record(profile, "socials");
    for key in ["github", "linkedin", "scholar", "twitter"] {
        default_str(socials, key, "");
    }
}

fn normalize_research_page(root: &mut Record) {
    let page = ensure_record(root, "researchPage");
    default_str(page, "description", "");
}

fn normalize_homepage(root: &mut Record, default_featured_id: &str) {
    let homepage = ensure_record(root, "homepage");
    default_str(homepage, "tabTitle", "Portfolio");
    default_str(homepage, "projectsDescription", "");
    default_str(homepage, "recentMode", "auto");
    homepage.entry("recentAutoLimit").or_insert(json!(3));
    homepage
        .entry("recentManualEntries")
        .or_insert_with(|| Value::Array(Vec::new()));

    let featured = ensure_record(homepage, "featuredEntry");
    default_str(featured, "type", "project");
    default_str(featured, "id", default_featured_id);
    default_str(featured, "imageOverride", "");
}

/// Id of the first project that has a non-empty id, if any.
fn first_project_id(root: &Record) -> String {
    root.get("projects")
        .and_then(Value::as_array)
        .and_then(|projects| {
            projects.iter().find_map(|p| {
                p.get("id")
                    .and_then(Value::as_str)
                    .filter(|id| !id.is_empty())
            })
        })
        .unwrap_or_default()
        .to_string()
}

fn ensure_record<'a>(parent: &'a mut Record, key: &str) -> &'a mut Record {
    let slot = parent
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Record::new()));
    if !slot.is_object() {
        // A legacy scalar in a singleton slot cannot be migrated in place.
        *slot = Value::Object(Record::new());
    }
    slot.as_object_mut().expect("slot was just made an object")
}

fn ensure_list<'a>(parent: &'a mut Record, key: &str) -> &'a mut Vec<Value> {
    let slot = parent
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if !slot.is_array() {
        // A legacy scalar in a collection slot cannot be migrated in place.
        *slot = Value::Array(Vec::new());
    }
    slot.as_array_mut().expect("slot was just made an array")
}

fn default_str(record: &mut Record, key: &str, value: &str) {
    record
        .entry(key.to_string())
        .or_insert_with(|| Value::String(value.to_string()));
}
