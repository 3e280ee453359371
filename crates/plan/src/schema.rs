use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Step {
    pub description: String,
    pub time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    pub person_role: Option<String>,
    pub is_chef: bool,
    pub tasks: Vec<String>,
    pub display_name: String,
    pub is_primary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dish {
    pub name: String,
    pub category: String,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    pub image_url: String,
    pub video_url: String,
    #[serde(rename = "videoUrl")]
    pub video_url_alias: String,
    pub reason: String,
    pub base_dish: String,
    pub source: String,
    pub similarity_note: String,
    #[serde(rename = "_locked", skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

impl Dish {
    /// Writes the video link under both keys clients read.
    pub fn set_video(&mut self, url: impl Into<String>) {
        self.video_url = url.into();
        self.video_url_alias = self.video_url.to_owned();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationReason {
    pub name: String,
    pub source: Option<String>,
    pub base_dish: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    #[serde(rename = "Time")]
    pub time: String,
    pub headcount: i64,
    pub roles: Vec<Role>,
    pub family_id: String,
    pub family_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants_display: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_reasons: Option<Vec<GenerationReason>>,
}

/// The normalized plan stored in `plan_json` and rendered to HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanDocument {
    pub meta: Meta,
    pub dishes: Vec<Dish>,
}

impl PlanDocument {
    /// Sets both the displayed participant count and the headcount.
    pub fn set_participants(&mut self, count: i64) {
        self.meta.participants_display = Some(count);
        self.meta.headcount = count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dish_serializes_both_video_keys_and_hides_unset_lock() {
        let mut dish = Dish {
            name: "Pho Bo".to_owned(),
            ..Default::default()
        };
        dish.set_video("https://example.com/v");

        let value = serde_json::to_value(&dish).unwrap();
        assert_eq!(value["video_url"], "https://example.com/v");
        assert_eq!(value["videoUrl"], "https://example.com/v");
        assert!(value.get("_locked").is_none());

        dish.locked = Some(true);
        assert_eq!(serde_json::to_value(&dish).unwrap()["_locked"], true);
    }

    #[test]
    fn meta_uses_capitalized_time_key() {
        let doc = PlanDocument {
            meta: Meta {
                time: "2025-03-01,18:00".to_owned(),
                ..Default::default()
            },
            dishes: vec![],
        };

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["meta"]["Time"], "2025-03-01,18:00");
        assert!(value["meta"].get("anchors").is_none());

        let back: PlanDocument = serde_json::from_value(value).unwrap();
        assert_eq!(back, doc);
    }
}
