use std::collections::HashMap;

use serde_json::Value;

use crate::{Dish, GenerationReason, PlanDocument};

#[derive(Default)]
struct RawReason {
    reason: Option<String>,
    source: Option<String>,
    base_dish: Option<String>,
}

fn optional_text(dish: &Value, key: &str) -> Option<String> {
    dish.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Copies reason, source and base dish from the raw model dishes onto the
/// coerced ones, matching names case-insensitively, and records them in
/// `meta.generation_reasons`.
pub fn inject_generation_reasons(raw: &Value, doc: &mut PlanDocument) {
    let Some(raw_dishes) = raw.get("dishes").and_then(Value::as_array) else {
        return;
    };
    if raw_dishes.is_empty() {
        return;
    }

    let mut by_name = HashMap::new();
    for dish in raw_dishes {
        let Some(name) = dish.get("name").and_then(Value::as_str) else {
            continue;
        };
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            continue;
        }

        by_name.insert(
            name,
            RawReason {
                reason: optional_text(dish, "reason"),
                source: optional_text(dish, "source"),
                base_dish: optional_text(dish, "base_dish"),
            },
        );
    }

    let mut reasons = Vec::with_capacity(doc.dishes.len());
    for dish in &mut doc.dishes {
        if let Some(raw) = by_name.get(&dish.name.trim().to_lowercase()) {
            if let Some(reason) = &raw.reason {
                dish.reason = reason.to_owned();
            }
            if let Some(source) = &raw.source {
                dish.source = source.to_owned();
            }
            if let Some(base_dish) = &raw.base_dish {
                dish.base_dish = base_dish.to_owned();
            }
        }

        let present = |value: &str| Some(value.to_owned()).filter(|value| !value.is_empty());
        reasons.push(GenerationReason {
            name: dish.name.to_owned(),
            source: present(&dish.source),
            base_dish: present(&dish.base_dish),
            reason: present(&dish.reason),
        });
    }

    doc.meta.generation_reasons = Some(reasons);
}

/// Makes sure every anchor dish is on the plan and at the front. With
/// `hard_lock` the anchors are flagged so later edits keep them.
pub fn apply_anchors(doc: &mut PlanDocument, anchors: &[String], hard_lock: bool) {
    let anchors: Vec<String> = anchors
        .iter()
        .filter(|anchor| !anchor.trim().is_empty())
        .map(|anchor| anchor.trim().to_owned())
        .collect();
    if anchors.is_empty() {
        return;
    }

    for anchor in &anchors {
        let key = anchor.to_lowercase();
        let dish = match doc
            .dishes
            .iter()
            .position(|dish| dish.name.trim().to_lowercase() == key)
        {
            Some(index) => doc.dishes.remove(index),
            None => Dish {
                name: anchor.to_owned(),
                category: "Main".to_owned(),
                ..Default::default()
            },
        };
        doc.dishes.insert(0, dish);
    }

    if hard_lock {
        for dish in &mut doc.dishes {
            if anchors.iter().any(|anchor| anchor.to_lowercase() == dish.name.trim().to_lowercase()) {
                dish.locked = Some(true);
            }
        }
    }

    doc.meta.anchors = Some(anchors);
}
