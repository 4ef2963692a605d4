use crate::shared::error::AdminError;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Locally owned preset used to prefill new courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CourseTemplate {
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_inventory_mode: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CourseTemplate {
    /// Template written when no templates file exists yet
    pub fn example() -> Self {
        Self {
            template_id: "TPL-EXAMPLE-1H".to_string(),
            name: "Example Template (1h)".to_string(),
            base_sku: Some("TPL-EX-1H".to_string()),
            duration_hours: Some(1.0),
            default_description: Some("Example description".to_string()),
            default_price: Some(10000.0),
            default_inventory_mode: Some(100),
            extra: Map::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.template_id.trim().is_empty() {
            return Err(AdminError::Validation {
                message: format!("template '{}' has an empty templateId", self.name),
            }
            .into());
        }
        if self.name.trim().is_empty() {
            return Err(AdminError::Validation {
                message: format!("template '{}' has an empty name", self.template_id),
            }
            .into());
        }
        if let Some(price) = self.default_price {
            if !price.is_finite() || price < 0.0 {
                return Err(AdminError::Validation {
                    message: format!(
                        "template '{}' has an invalid defaultPrice {}",
                        self.template_id, price
                    ),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Validates every template and rejects duplicate ids.
pub fn validate_templates(templates: &[CourseTemplate]) -> Result<()> {
    let mut seen = HashSet::new();
    for template in templates {
        template.validate()?;
        if !seen.insert(template.template_id.as_str()) {
            return Err(AdminError::Validation {
                message: format!("duplicate templateId '{}'", template.template_id),
            }
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_format_is_camel_case() {
        let value = serde_json::to_value(CourseTemplate::example()).unwrap();
        assert_eq!(value["templateId"], json!("TPL-EXAMPLE-1H"));
        assert_eq!(value["baseSku"], json!("TPL-EX-1H"));
        assert_eq!(value["defaultInventoryMode"], json!(100));
    }

    #[test]
    fn test_unknown_fields_survive() {
        let template: CourseTemplate = serde_json::from_value(json!({
            "templateId": "T1",
            "name": "Sourdough",
            "color": "amber"
        }))
        .unwrap();
        assert_eq!(template.extra.get("color"), Some(&json!("amber")));
        assert!(template.base_sku.is_none());
    }

    #[test]
    fn test_example_is_valid() {
        assert!(CourseTemplate::example().validate().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let template = CourseTemplate {
            default_price: Some(-1.0),
            ..CourseTemplate::example()
        };
        assert!(template.validate().is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let templates = vec![CourseTemplate::example(), CourseTemplate::example()];
        let err = validate_templates(&templates).unwrap_err();
        assert!(err.to_string().contains("duplicate templateId"));
    }

    #[test]
    fn test_empty_id_rejected() {
        let templates = vec![CourseTemplate {
            template_id: " ".to_string(),
            ..CourseTemplate::example()
        }];
        assert!(validate_templates(&templates).is_err());
    }
}
