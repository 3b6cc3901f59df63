//! Time slot catalog and name-based classification.
//!
//! Slots carry no category column; the category is derived by exact name
//! match against three name lists. The lists ship with Hebrew defaults and
//! can be replaced from a TOML file, so a locale or catalog change is a
//! config edit rather than a code edit.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::api::TimeSlot;

/// Slot category derived from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotCategory {
    Lesson,
    Break,
    Meeting,
}

/// Result of classifying a slot name.
/// `category` is `None` for names outside the catalog; only lessons are
/// selectable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotClassification {
    pub category: Option<SlotCategory>,
    pub is_selectable: bool,
    pub description: String,
}

/// Catalog configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub names: NameSettings,
    #[serde(default)]
    pub labels: LabelSettings,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            names: NameSettings::default(),
            labels: LabelSettings::default(),
        }
    }
}

/// Recognized slot names per category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameSettings {
    #[serde(default = "default_lesson_names")]
    pub lessons: Vec<String>,
    #[serde(default = "default_break_names")]
    pub breaks: Vec<String>,
    #[serde(default = "default_meeting_names")]
    pub meetings: Vec<String>,
}

impl Default for NameSettings {
    fn default() -> Self {
        Self {
            lessons: default_lesson_names(),
            breaks: default_break_names(),
            meetings: default_meeting_names(),
        }
    }
}

/// Display label per category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelSettings {
    #[serde(rename = "lesson", default = "default_lesson_label")]
    pub lesson_label: String,
    #[serde(rename = "break", default = "default_break_label")]
    pub break_label: String,
    #[serde(rename = "meeting", default = "default_meeting_label")]
    pub meeting_label: String,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            lesson_label: default_lesson_label(),
            break_label: default_break_label(),
            meeting_label: default_meeting_label(),
        }
    }
}

fn default_lesson_names() -> Vec<String> {
    [
        "שיעור ראשון",
        "שיעור שני",
        "שיעור שלישי",
        "שיעור רביעי",
        "שיעור חמישי",
    ]
    .map(String::from)
    .to_vec()
}

fn default_break_names() -> Vec<String> {
    ["ארוחת בוקר", "הפסקה", "הפסקת צהריים"]
        .map(String::from)
        .to_vec()
}

fn default_meeting_names() -> Vec<String> {
    ["מפגש בוקר", "מפגש סיום"].map(String::from).to_vec()
}

fn default_lesson_label() -> String {
    "שעת לימוד".to_string()
}

fn default_break_label() -> String {
    "הפסקה".to_string()
}

fn default_meeting_label() -> String {
    "מפגש".to_string()
}

/// Classifies time slots by display name.
///
/// A name listed in more than one category resolves in lesson, break,
/// meeting order.
#[derive(Debug, Clone)]
pub struct SlotCatalog {
    lessons: HashSet<String>,
    breaks: HashSet<String>,
    meetings: HashSet<String>,
    labels: LabelSettings,
}

impl Default for SlotCatalog {
    fn default() -> Self {
        Self::from_config(CatalogConfig::default())
    }
}

impl SlotCatalog {
    pub fn from_config(config: CatalogConfig) -> Self {
        Self {
            lessons: config.names.lessons.into_iter().collect(),
            breaks: config.names.breaks.into_iter().collect(),
            meetings: config.names.meetings.into_iter().collect(),
            labels: config.labels,
        }
    }

    /// Load catalog configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(SlotCatalog)` if successful
    /// * `Err` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read catalog file {}", path.as_ref().display())
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: CatalogConfig =
            toml::from_str(raw).context("Failed to parse catalog TOML")?;
        Ok(Self::from_config(config))
    }

    /// Classify a slot name. Total: unknown names yield `category = None`
    /// and `is_selectable = false` rather than an error.
    pub fn classify_name(&self, name: &str) -> SlotClassification {
        let category = if self.lessons.contains(name) {
            Some(SlotCategory::Lesson)
        } else if self.breaks.contains(name) {
            Some(SlotCategory::Break)
        } else if self.meetings.contains(name) {
            Some(SlotCategory::Meeting)
        } else {
            None
        };

        SlotClassification {
            category,
            is_selectable: category == Some(SlotCategory::Lesson),
            description: category
                .map(|c| self.label(c).to_string())
                .unwrap_or_default(),
        }
    }

    pub fn classify(&self, slot: &TimeSlot) -> SlotClassification {
        self.classify_name(&slot.name)
    }

    /// Only lesson slots accept class assignments.
    pub fn is_selectable(&self, slot: &TimeSlot) -> bool {
        self.classify_name(&slot.name).is_selectable
    }

    pub fn label(&self, category: SlotCategory) -> &str {
        match category {
            SlotCategory::Lesson => &self.labels.lesson_label,
            SlotCategory::Break => &self.labels.break_label,
            SlotCategory::Meeting => &self.labels.meeting_label,
        }
    }
}
