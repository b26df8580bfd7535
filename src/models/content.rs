// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Editable site content document.
//!
//! The server stores this document as opaque JSON and only checks that it is
//! an object. These typed structs describe the shape the site and the admin
//! editor agree on, and carry the bundled default used for seeding and as the
//! public site's offline fallback.
//!
//! Draft edits never mutate in place: every `with_*`/`add_*`/`remove_*`
//! method returns a new document, and list items are addressed by their id.
//!
//! Decoding is lenient so a partial document stored through the API still
//! loads: a missing section comes from [`default_content`], a missing field
//! inside a present section is left empty.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// The whole editable site content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(default)]
pub struct AppContent {
    pub hero: HeroSection,
    pub about: AboutSection,
    pub amenities: AmenitySection,
    pub connectivity: ConnectivitySection,
    pub developer: DeveloperSection,
    pub faq: Vec<FaqItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct HeroSection {
    /// Headline
    pub title: String,
    pub subtitle: String,
    pub project_name: String,
    pub location: String,
    pub price1_label: String,
    pub price1_value: String,
    pub price2_label: String,
    pub price2_value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(default)]
pub struct AboutSection {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(default)]
pub struct AmenitySection {
    pub title: String,
    pub subtitle: String,
    pub items: Vec<Amenity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(default)]
pub struct Amenity {
    pub id: String,
    pub title: String,
    /// Icon name understood by the site's icon set
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct ConnectivitySection {
    pub title: String,
    pub description: String,
    /// Map iframe embed URL
    pub map_url: String,
    pub items: Vec<ConnectivityItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(default)]
pub struct ConnectivityItem {
    pub id: String,
    pub location: String,
    /// Travel time label, e.g. "5 Mins"
    pub time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(default)]
pub struct DeveloperSection {
    pub title: String,
    pub description: String,
    pub stats: Vec<Stat>,
    pub updates: Vec<ConstructionUpdate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(default)]
pub struct Stat {
    pub id: String,
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(default)]
pub struct ConstructionUpdate {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    /// e.g. "In Progress" or "Completed"
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(default)]
pub struct FaqItem {
    pub id: String,
    pub question: String,
    pub answer: String,
}

impl Default for AppContent {
    fn default() -> Self {
        default_content()
    }
}

// ─── Draft Editing ───────────────────────────────────────────

/// List items addressed by a stable id.
pub trait Keyed {
    fn id(&self) -> &str;
}

macro_rules! impl_keyed {
    ($($ty:ty),*) => {
        $(impl Keyed for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

impl_keyed!(Amenity, ConnectivityItem, Stat, ConstructionUpdate, FaqItem);

/// Generate an id for a newly created list item.
pub fn new_item_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Copy of `items` with `edit` applied to the item whose id matches.
fn edited<T: Keyed + Clone>(items: &[T], id: &str, edit: impl FnOnce(&mut T)) -> Vec<T> {
    let mut edit = Some(edit);
    items
        .iter()
        .map(|item| {
            let mut item = item.clone();
            if item.id() == id {
                if let Some(edit) = edit.take() {
                    edit(&mut item);
                }
            }
            item
        })
        .collect()
}

/// Copy of `items` without the item whose id matches.
fn without<T: Keyed + Clone>(items: &[T], id: &str) -> Vec<T> {
    items.iter().filter(|item| item.id() != id).cloned().collect()
}

/// Copy of `items` with `item` appended.
fn appended<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut items = items.to_vec();
    items.push(item);
    items
}

impl AppContent {
    pub fn with_hero(&self, edit: impl FnOnce(&mut HeroSection)) -> Self {
        let mut hero = self.hero.clone();
        edit(&mut hero);
        Self {
            hero,
            ..self.clone()
        }
    }

    pub fn with_about(&self, edit: impl FnOnce(&mut AboutSection)) -> Self {
        let mut about = self.about.clone();
        edit(&mut about);
        Self {
            about,
            ..self.clone()
        }
    }

    /// Edit the amenities heading fields.
    pub fn with_amenities(&self, edit: impl FnOnce(&mut AmenitySection)) -> Self {
        let mut amenities = self.amenities.clone();
        edit(&mut amenities);
        Self {
            amenities,
            ..self.clone()
        }
    }

    /// Edit the connectivity heading, description and map URL.
    pub fn with_connectivity(&self, edit: impl FnOnce(&mut ConnectivitySection)) -> Self {
        let mut connectivity = self.connectivity.clone();
        edit(&mut connectivity);
        Self {
            connectivity,
            ..self.clone()
        }
    }

    pub fn with_developer(&self, edit: impl FnOnce(&mut DeveloperSection)) -> Self {
        let mut developer = self.developer.clone();
        edit(&mut developer);
        Self {
            developer,
            ..self.clone()
        }
    }

    // Amenities

    /// Append a placeholder amenity. Returns the new document and the item id.
    pub fn add_amenity(&self) -> (Self, String) {
        let id = new_item_id();
        let item = Amenity {
            id: id.clone(),
            title: "New Amenity".to_string(),
            icon: "Star".to_string(),
        };
        let mut next = self.clone();
        next.amenities.items = appended(&self.amenities.items, item);
        (next, id)
    }

    pub fn with_amenity(&self, id: &str, edit: impl FnOnce(&mut Amenity)) -> Self {
        let mut next = self.clone();
        next.amenities.items = edited(&self.amenities.items, id, edit);
        next
    }

    pub fn remove_amenity(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.amenities.items = without(&self.amenities.items, id);
        next
    }

    // Connectivity

    pub fn add_connectivity_item(&self) -> (Self, String) {
        let id = new_item_id();
        let item = ConnectivityItem {
            id: id.clone(),
            location: "New Location".to_string(),
            time: "10 Mins".to_string(),
        };
        let mut next = self.clone();
        next.connectivity.items = appended(&self.connectivity.items, item);
        (next, id)
    }

    pub fn with_connectivity_item(
        &self,
        id: &str,
        edit: impl FnOnce(&mut ConnectivityItem),
    ) -> Self {
        let mut next = self.clone();
        next.connectivity.items = edited(&self.connectivity.items, id, edit);
        next
    }

    pub fn remove_connectivity_item(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.connectivity.items = without(&self.connectivity.items, id);
        next
    }

    // Developer stats

    pub fn add_stat(&self) -> (Self, String) {
        let id = new_item_id();
        let item = Stat {
            id: id.clone(),
            value: "0".to_string(),
            label: "New Stat".to_string(),
        };
        let mut next = self.clone();
        next.developer.stats = appended(&self.developer.stats, item);
        (next, id)
    }

    pub fn with_stat(&self, id: &str, edit: impl FnOnce(&mut Stat)) -> Self {
        let mut next = self.clone();
        next.developer.stats = edited(&self.developer.stats, id, edit);
        next
    }

    pub fn remove_stat(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.developer.stats = without(&self.developer.stats, id);
        next
    }

    // Construction updates

    pub fn add_update(&self) -> (Self, String) {
        let id = new_item_id();
        let item = ConstructionUpdate {
            id: id.clone(),
            title: "New Tower".to_string(),
            description: "Works Started".to_string(),
            image: DEFAULT_UPDATE_IMAGE.to_string(),
            status: "In Progress".to_string(),
        };
        let mut next = self.clone();
        next.developer.updates = appended(&self.developer.updates, item);
        (next, id)
    }

    pub fn with_update(&self, id: &str, edit: impl FnOnce(&mut ConstructionUpdate)) -> Self {
        let mut next = self.clone();
        next.developer.updates = edited(&self.developer.updates, id, edit);
        next
    }

    pub fn remove_update(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.developer.updates = without(&self.developer.updates, id);
        next
    }

    // FAQ

    pub fn add_faq(&self) -> (Self, String) {
        let id = new_item_id();
        let item = FaqItem {
            id: id.clone(),
            question: "New Question".to_string(),
            answer: "New Answer".to_string(),
        };
        let next = Self {
            faq: appended(&self.faq, item),
            ..self.clone()
        };
        (next, id)
    }

    pub fn with_faq(&self, id: &str, edit: impl FnOnce(&mut FaqItem)) -> Self {
        Self {
            faq: edited(&self.faq, id, edit),
            ..self.clone()
        }
    }

    pub fn remove_faq(&self, id: &str) -> Self {
        Self {
            faq: without(&self.faq, id),
            ..self.clone()
        }
    }
}

// ─── Bundled Default ─────────────────────────────────────────

const DEFAULT_UPDATE_IMAGE: &str =
    "https://images.unsplash.com/photo-1541888946425-d81bb19240f5?q=80&w=2000&auto=format&fit=crop";

fn amenity(id: &str, title: &str, icon: &str) -> Amenity {
    Amenity {
        id: id.to_string(),
        title: title.to_string(),
        icon: icon.to_string(),
    }
}

fn place(id: &str, location: &str, time: &str) -> ConnectivityItem {
    ConnectivityItem {
        id: id.to_string(),
        location: location.to_string(),
        time: time.to_string(),
    }
}

fn stat(id: &str, value: &str, label: &str) -> Stat {
    Stat {
        id: id.to_string(),
        value: value.to_string(),
        label: label.to_string(),
    }
}

fn update(id: &str, title: &str, description: &str, status: &str, image: &str) -> ConstructionUpdate {
    ConstructionUpdate {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        status: status.to_string(),
    }
}

fn faq(id: &str, question: &str, answer: &str) -> FaqItem {
    FaqItem {
        id: id.to_string(),
        question: question.to_string(),
        answer: answer.to_string(),
    }
}

/// Content seeded on first startup and shown by the site when the API is down.
pub fn default_content() -> AppContent {
    AppContent {
        hero: HeroSection {
            title: "THINKING OF A FANTASTIC VICINITY?".to_string(),
            subtitle: "20+ PREMIUM LUXURIOUS AMENITIES | SPECIALLY CRAFTED FOR YOU AND YOUR FAMILY"
                .to_string(),
            project_name: "VIGNAHARTA INFINITY".to_string(),
            location: "CIRCLE, KANNAMWAR NAGAR 1, VIKHROLI (EAST)".to_string(),
            price1_label: "SMART 1 BHK".to_string(),
            price1_value: "Rs 44.99 Lacs*".to_string(),
            price2_label: "PREMIUM 2 BHK".to_string(),
            price2_value: "Rs 69.99 Lacs*".to_string(),
        },
        about: AboutSection {
            title: "About Project".to_string(),
            description: "At Vignaharta Enclave, every detail reflects the grandeur gesture of life in the most authentic and realistic home. Guided by a forward approach, the architecture places people at the heart of the space. Built on the foundations of comfort, it evokes a true sense of freedom, protection, and belonging.\n\nThe moment I entered the house, it felt welcoming. This feeling defines the privilege Vignaharta Enclave offers. Thoughtfully designed with a focus on light and cross-ventilation, the space resonates with the warmth and authenticity that you and your family truly deserve. It's the place you have been searching for.".to_string(),
        },
        amenities: AmenitySection {
            title: "Amenities".to_string(),
            subtitle: "Thoughtfully crafted surroundings that reflect tradition, comfort, and human-centered design approach.".to_string(),
            items: vec![
                amenity("1", "Gymnasium", "Dumbbell"),
                amenity("2", "Kids Play Area", "Gamepad2"),
                amenity("3", "Jogging Track", "Footprints"),
                amenity("4", "Yoga Deck", "Flower2"),
                amenity("5", "Swimming Pool", "Waves"),
                amenity("6", "Senior Citizen Sitout", "Armchair"),
            ],
        },
        connectivity: ConnectivitySection {
            title: "Connectivity".to_string(),
            description: "Experience the convenience of being connected to everything that matters.".to_string(),
            map_url: "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d3769.645932594676!2d72.923456!3d19.123178!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x3be7c7f3b6c7c7c7%3A0x1234567890abcdef!2sKannamwar%20Nagar%201%2C%20Vikhroli%20East%2C%20Mumbai%2C%20Maharashtra!5e0!3m2!1sen!2sin!4v1625567890123!5m2!1sen!2sin".to_string(),
            items: vec![
                place("1", "Vikhroli Station", "2 Mins"),
                place("2", "Eastern Express Highway", "5 Mins"),
                place("3", "International Airport", "25 Mins"),
                place("4", "BKC Business Bay", "20 Mins"),
                place("5", "R City Mall", "10 Mins"),
                place("6", "JVLR Connector", "8 Mins"),
            ],
        },
        developer: DeveloperSection {
            title: "About Developer".to_string(),
            description: "Vignaharta Group is focused on developing affordable yet luxurious housing. With a legacy built on trust and transparency, we aim to provide homes that are not just structures but a sanctuary for your family.".to_string(),
            stats: vec![
                stat("1", "6", "Projects"),
                stat("2", "1.12 LAC", "Sq. Ft Delivered"),
                stat("3", "449+", "Happy Families"),
                stat("4", "2.7 LAC", "Sq. Ft Ongoing"),
            ],
            updates: vec![
                update(
                    "1",
                    "Tower A Foundation",
                    "Excavation 100% Complete",
                    "In Progress",
                    DEFAULT_UPDATE_IMAGE,
                ),
                update(
                    "2",
                    "Tower B Podium",
                    "Plinth Work Underway",
                    "In Progress",
                    "https://images.unsplash.com/photo-1503387762-592deb58ef4e?q=80&w=2000&auto=format&fit=crop",
                ),
                update(
                    "3",
                    "Experience Center",
                    "Luxury Sample Flat Ready",
                    "Completed",
                    "https://images.unsplash.com/photo-1600607687939-ce8a6c25118c?q=80&w=2000&auto=format&fit=crop",
                ),
            ],
        },
        faq: vec![
            faq(
                "1",
                "When does the wealth tax turn into a tax liability for me?",
                "Wealth tax is applicable if the net wealth exceeds the prescribed limit by the tax authorities. Please consult your CA for specific details.",
            ),
            faq(
                "2",
                "What types of residential properties can foreigners buy in India?",
                "Foreigners of non-Indian origin generally cannot buy residential property unless they satisfy residency tests.",
            ),
            faq(
                "3",
                "Why should I invest in real estate through a project in Vikhroli?",
                "Vikhroli is a rapidly developing hub with excellent connectivity to both Eastern and Western suburbs.",
            ),
            faq(
                "4",
                "How can I learn more about upcoming residential projects?",
                "You can subscribe to our newsletter or contact our sales team for the latest brochures.",
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_serializes_with_site_keys() {
        let json = serde_json::to_value(default_content()).unwrap();

        assert_eq!(json["hero"]["projectName"], "VIGNAHARTA INFINITY");
        assert_eq!(json["hero"]["price1Label"], "SMART 1 BHK");
        assert!(json["connectivity"]["mapUrl"].is_string());
        assert_eq!(json["amenities"]["items"].as_array().unwrap().len(), 6);
        assert_eq!(json["faq"].as_array().unwrap().len(), 4);

        let back: AppContent = serde_json::from_value(json).unwrap();
        assert_eq!(back, default_content());
    }

    #[test]
    fn test_add_amenity_leaves_original_untouched() {
        let draft = default_content();
        let (next, id) = draft.add_amenity();

        assert_eq!(draft.amenities.items.len(), 6);
        assert_eq!(next.amenities.items.len(), 7);
        let added = next.amenities.items.last().unwrap();
        assert_eq!(added.id, id);
        assert_eq!(added.title, "New Amenity");
        assert_eq!(added.icon, "Star");
    }

    #[test]
    fn test_new_ids_are_unique() {
        let draft = default_content();
        let (draft, first) = draft.add_faq();
        let (draft, second) = draft.add_faq();

        assert_ne!(first, second);
        assert_eq!(draft.faq.len(), 6);
    }

    #[test]
    fn test_edit_targets_only_matching_id() {
        let draft = default_content();
        let next = draft.with_connectivity_item("3", |item| item.time = "30 Mins".to_string());

        assert_eq!(next.connectivity.items[2].time, "30 Mins");
        assert_eq!(draft.connectivity.items[2].time, "25 Mins");
        assert_eq!(next.connectivity.items[0], draft.connectivity.items[0]);
    }

    #[test]
    fn test_edit_unknown_id_is_noop() {
        let draft = default_content();
        assert_eq!(draft.with_stat("missing", |s| s.value = "x".into()), draft);
        assert_eq!(draft.remove_update("missing"), draft);
    }

    #[test]
    fn test_remove_by_id() {
        let draft = default_content();
        let next = draft.remove_faq("2").remove_stat("4").remove_amenity("1");

        assert!(next.faq.iter().all(|f| f.id != "2"));
        assert_eq!(next.faq.len(), 3);
        assert_eq!(next.developer.stats.len(), 3);
        assert_eq!(next.amenities.items[0].title, "Kids Play Area");
    }

    #[test]
    fn test_add_update_defaults() {
        let (next, id) = default_content().add_update();
        let added = next.developer.updates.iter().find(|u| u.id == id).unwrap();

        assert_eq!(added.title, "New Tower");
        assert_eq!(added.status, "In Progress");
        assert_eq!(added.image, DEFAULT_UPDATE_IMAGE);
    }

    #[test]
    fn test_section_edits() {
        let next = default_content()
            .with_hero(|h| h.price1_value = "Rs 49.99 Lacs*".to_string())
            .with_about(|a| a.title = "Overview".to_string());

        assert_eq!(next.hero.price1_value, "Rs 49.99 Lacs*");
        assert_eq!(next.about.title, "Overview");
        assert_eq!(next.faq, default_content().faq);
    }

    #[test]
    fn test_section_heading_edits() {
        let draft = default_content();
        let next = draft
            .with_amenities(|a| a.subtitle = "Curated for families".to_string())
            .with_connectivity(|c| c.map_url = "https://maps.example/embed".to_string())
            .with_developer(|d| d.title = "About the Builder".to_string());

        assert_eq!(next.amenities.subtitle, "Curated for families");
        assert_eq!(next.amenities.items, draft.amenities.items);
        assert_eq!(next.connectivity.map_url, "https://maps.example/embed");
        assert_eq!(next.connectivity.title, draft.connectivity.title);
        assert_eq!(next.developer.title, "About the Builder");
        assert_eq!(next.developer.stats, draft.developer.stats);
        assert_ne!(draft.developer.title, "About the Builder");
    }

    #[test]
    fn test_partial_document_decodes() {
        let content: AppContent =
            serde_json::from_value(serde_json::json!({ "hero": { "title": "Only hero" } })).unwrap();

        assert_eq!(content.hero.title, "Only hero");
        assert_eq!(content.hero.project_name, "");
        assert_eq!(content.about, default_content().about);
        assert_eq!(content.faq, default_content().faq);

        let content: AppContent = serde_json::from_value(serde_json::json!({
            "developer": { "title": "Builder", "stats": [{ "id": "9", "value": "12" }] }
        }))
        .unwrap();
        assert!(content.developer.updates.is_empty());
        assert_eq!(content.developer.stats[0].label, "");
    }

    #[test]
    fn test_wrong_types_still_rejected() {
        assert!(serde_json::from_value::<AppContent>(serde_json::json!({ "hero": 42 })).is_err());
    }
}
