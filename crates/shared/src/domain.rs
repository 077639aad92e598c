use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(PlanId);
id_newtype!(FeatureId);
id_newtype!(SignupId);
id_newtype!(ApplicationId);
id_newtype!(MessageId);

/// A pricing tier as served by `GET /plans`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    pub duration: String,
    pub price: f64,
    pub original_price: f64,
    #[serde(default)]
    pub popular: bool,
    pub features: Vec<String>,
    pub color: String,
    pub button_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Plan {
    /// Discount against the original price, rounded to whole percent.
    pub fn savings_percent(&self) -> u32 {
        if self.original_price <= 0.0 || self.price >= self.original_price {
            return 0;
        }
        ((1.0 - self.price / self.original_price) * 100.0).round() as u32
    }
}

/// A feature descriptor as served by `GET /features`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: FeatureId,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

fn default_active() -> bool {
    true
}

/// Hero block carried inside the settings document. Every field is optional so a
/// partially populated document still decodes; missing fields are filled from defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<BTreeMap<String, String>>,
}

/// Application-wide settings document served by `GET /settings`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_data: Option<HeroData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_email: Option<String>,
    /// Social network name to link target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<BTreeMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_decodes_backend_shape_with_naive_timestamps() {
        let raw = serde_json::json!({
            "id": "0b7f",
            "duration": "1 Month",
            "price": 12.0,
            "original_price": 15.0,
            "popular": false,
            "features": ["EPG Included"],
            "color": "from-blue-500 to-blue-600",
            "button_text": "Get Started",
            "created_at": "2024-05-01T10:00:00.123456",
            "updated_at": "2024-05-01T10:00:00.123456"
        });
        let plan: Plan = serde_json::from_value(raw).expect("plan");
        assert_eq!(plan.id, PlanId::from("0b7f"));
        assert_eq!(plan.savings_percent(), 20);
        assert!(plan.created_at.is_some());
    }

    #[test]
    fn settings_tolerate_missing_fields() {
        let settings: AppSettings =
            serde_json::from_value(serde_json::json!({ "company_name": "Acme" }))
                .expect("settings");
        assert_eq!(settings.company_name.as_deref(), Some("Acme"));
        assert!(settings.hero_data.is_none());
        assert!(settings.social_links.is_none());
    }

    #[test]
    fn savings_is_zero_without_a_discount() {
        let mut plan: Plan = serde_json::from_value(serde_json::json!({
            "id": "p",
            "duration": "1 Month",
            "price": 15.0,
            "original_price": 15.0,
            "features": [],
            "color": "",
            "button_text": ""
        }))
        .expect("plan");
        assert_eq!(plan.savings_percent(), 0);
        plan.original_price = 0.0;
        assert_eq!(plan.savings_percent(), 0);
    }
}
