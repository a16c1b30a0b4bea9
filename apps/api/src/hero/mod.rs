//! Hero section template: renders a chosen sales angle into a storefront
//! page-builder section. The shape is static; only the heading, body copy,
//! and product name vary.

use serde::Serialize;

use crate::strategy::schema::SalesAngle;

pub const SECTION_TYPE: &str = "hero_section";
pub const SECTION_NAME: &str = "Hero Section - Generated by AI";
pub const CALL_TO_ACTION: &str = "Comprar Ahora";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroSection {
    #[serde(rename = "type")]
    pub section_type: String,
    pub name: String,
    pub settings: Vec<HeroSetting>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroSetting {
    #[serde(rename = "type")]
    pub setting_type: SettingType,
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingType {
    Text,
    Textarea,
    Url,
}

impl HeroSetting {
    fn new(setting_type: SettingType, id: &str, label: &str, default: Option<String>) -> Self {
        Self {
            setting_type,
            id: id.to_string(),
            label: label.to_string(),
            default,
        }
    }
}

/// Heading shown above the copy, e.g. `¡The Skeptic Resuelto! El Silent Blender`.
pub fn hero_heading(avatar_name: &str, product_name: &str) -> String {
    format!("¡{avatar_name} Resuelto! El {product_name}")
}

pub fn render_hero_section(angle: &SalesAngle, product_name: &str) -> HeroSection {
    HeroSection {
        section_type: SECTION_TYPE.to_string(),
        name: SECTION_NAME.to_string(),
        settings: vec![
            HeroSetting::new(
                SettingType::Text,
                "heading",
                "Heading",
                Some(hero_heading(&angle.avatar_name, product_name)),
            ),
            HeroSetting::new(
                SettingType::Textarea,
                "text",
                "Text",
                Some(angle.persuasive_copy.clone()),
            ),
            HeroSetting::new(SettingType::Url, "button_link", "Button link", None),
            HeroSetting::new(
                SettingType::Text,
                "button_label",
                "Button label",
                Some(CALL_TO_ACTION.to_string()),
            ),
        ],
    }
}

impl HeroSection {
    /// Copy-paste form: 4-space indent, non-ASCII characters kept as-is.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        String::from_utf8(buf).map_err(|e| {
            serde_json::Error::io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn setting<'a>(section: &'a HeroSection, id: &str) -> &'a HeroSetting {
        section.settings.iter().find(|s| s.id == id).unwrap()
    }

    fn skeptic() -> SalesAngle {
        SalesAngle {
            avatar_name: "The Skeptic".to_string(),
            pain_point_addressed: "noise".to_string(),
            persuasive_copy: "You have heard loud promises before. This one is quiet.".to_string(),
        }
    }

    #[test]
    fn test_heading_and_text_defaults() {
        let section = render_hero_section(&skeptic(), "Silent Blender");
        let heading = setting(&section, "heading").default.clone().unwrap();
        assert!(heading.contains("The Skeptic"));
        assert!(heading.contains("Silent Blender"));
        assert_eq!(
            setting(&section, "text").default.as_deref(),
            Some(skeptic().persuasive_copy.as_str())
        );
    }

    #[test]
    fn test_section_matches_fixed_template() {
        let section = render_hero_section(&skeptic(), "Silent Blender");
        let value = serde_json::to_value(&section).unwrap();
        let expected = json!({
            "type": "hero_section",
            "name": "Hero Section - Generated by AI",
            "settings": [
                {"type": "text", "id": "heading", "label": "Heading",
                 "default": "¡The Skeptic Resuelto! El Silent Blender"},
                {"type": "textarea", "id": "text", "label": "Text",
                 "default": "You have heard loud promises before. This one is quiet."},
                {"type": "url", "id": "button_link", "label": "Button link"},
                {"type": "text", "id": "button_label", "label": "Button label",
                 "default": "Comprar Ahora"}
            ]
        });
        assert_eq!(value, expected);
    }

    #[test]
    fn test_url_setting_has_no_default_key() {
        let section = render_hero_section(&skeptic(), "P");
        let value = serde_json::to_value(&section).unwrap();
        assert!(value["settings"][2].get("default").is_none());
    }

    #[test]
    fn test_pretty_json_uses_four_spaces_and_keeps_unicode() {
        let section = render_hero_section(&skeptic(), "Licuadora Silenciosa");
        let text = section.to_pretty_json().unwrap();
        assert!(text.contains("\n    \"type\": \"hero_section\""));
        assert!(text.contains("¡The Skeptic Resuelto!"));
        let reparsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed, serde_json::to_value(&section).unwrap());
    }
}
