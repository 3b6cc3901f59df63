// ============================================================================
// JSON Parsing Functions
// ============================================================================
//
// These functions parse a store export (time slots + classes) into joined
// form. The store returns classes with their slot embedded; an export file
// keeps the two tables separate, so the join happens here.

use crate::api;
use anyhow::{Context, Result};
use std::collections::HashMap;

#[derive(serde::Deserialize)]
struct DatasetInput {
    #[serde(default)]
    pub time_slots: Vec<api::TimeSlot>,
    #[serde(default)]
    pub classes: Vec<api::Class>,
}

/// A parsed store export: the slot catalog plus every class joined to
/// its owning slot.
#[derive(Debug, Clone)]
pub struct ScheduleDataset {
    pub time_slots: Vec<api::TimeSlot>,
    pub classes: Vec<api::ClassWithTimeSlot>,
}

fn validate_input_dataset(dataset_json: &str) -> Result<()> {
    let value: serde_json::Value =
        serde_json::from_str(dataset_json).context("Invalid dataset JSON")?;
    let has_time_slots = value
        .as_object()
        .and_then(|obj| obj.get("time_slots"))
        .is_some();
    if !has_time_slots {
        anyhow::bail!("Missing required 'time_slots' field");
    }
    Ok(())
}

/// Parse a dataset from a JSON string and join classes to their slots.
///
/// Fails on dangling slot references and on classes with no grade levels,
/// so downstream grid and conflict code can assume every class carries a
/// valid slot.
///
/// # Arguments
///
/// * `dataset_json` - JSON object with `time_slots` and `classes` arrays
///
/// # Returns
///
/// A `ScheduleDataset` with every class joined to its slot.
pub fn parse_dataset_json_str(dataset_json: &str) -> Result<ScheduleDataset> {
    validate_input_dataset(dataset_json)?;

    let input: DatasetInput = serde_json::from_str(dataset_json)
        .context("Failed to deserialize dataset JSON using Serde")?;

    let slots_by_id: HashMap<&api::TimeSlotId, &api::TimeSlot> = input
        .time_slots
        .iter()
        .map(|slot| (&slot.id, slot))
        .collect();

    let mut classes = Vec::with_capacity(input.classes.len());
    for class in &input.classes {
        if class.grades.is_empty() {
            anyhow::bail!("Class '{}' has no grade levels", class.id);
        }
        let slot = slots_by_id.get(&class.time_slot_id).with_context(|| {
            format!(
                "Class '{}' references unknown time slot '{}'",
                class.id, class.time_slot_id
            )
        })?;
        classes.push(api::ClassWithTimeSlot::new(class.clone(), (*slot).clone()));
    }

    Ok(ScheduleDataset {
        time_slots: input.time_slots,
        classes,
    })
}

/// Parse a dataset from a file on disk.
pub fn parse_dataset_file(path: &std::path::Path) -> Result<ScheduleDataset> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset file {}", path.display()))?;
    parse_dataset_json_str(&raw)
}

// ============================================================================
// Tests
// ============================================================================
