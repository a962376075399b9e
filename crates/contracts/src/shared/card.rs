//! Контракт карточки дашборда.

use serde::{Deserialize, Serialize};

/// Prefix that marks an external link target.
pub const EXTERNAL_LINK_PREFIX: &str = "http";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardTag {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub text: String,
}

/// Свойства карточки, одинаковые для Leptos-компонента и встраиваемого элемента.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardProps {
    pub icon: String,
    pub color: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub tags: Vec<CardTag>,
}

/// Что происходит при клике по карточке.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardTarget {
    /// No path: the card is purely informational.
    Inert,
    /// Opened in a new browsing context.
    External(String),
    /// In-place navigation inside the host application.
    Internal(String),
}

impl CardTarget {
    pub fn from_path(path: Option<&str>) -> Self {
        match path {
            None => CardTarget::Inert,
            Some(p) if p.starts_with(EXTERNAL_LINK_PREFIX) => CardTarget::External(p.to_string()),
            Some(p) => CardTarget::Internal(p.to_string()),
        }
    }

    pub fn is_inert(&self) -> bool {
        matches!(self, CardTarget::Inert)
    }
}

impl CardProps {
    pub fn target(&self) -> CardTarget {
        CardTarget::from_path(self.path.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_target_resolution() {
        assert_eq!(CardTarget::from_path(None), CardTarget::Inert);
        assert_eq!(
            CardTarget::from_path(Some("https://x")),
            CardTarget::External("https://x".to_string())
        );
        assert_eq!(
            CardTarget::from_path(Some("http://intranet")),
            CardTarget::External("http://intranet".to_string())
        );
        assert_eq!(
            CardTarget::from_path(Some("/internal")),
            CardTarget::Internal("/internal".to_string())
        );
        assert!(CardTarget::from_path(None).is_inert());
    }

    #[test]
    fn test_props_from_json() {
        let props: CardProps = serde_json::from_value(json!({
            "icon": "users",
            "color": "#1890ff",
            "title": "Usuarios",
            "description": "Gestión de usuarios",
            "path": null,
            "tags": [{"color": "green", "text": "Nuevo"}]
        }))
        .unwrap();
        assert_eq!(props.target(), CardTarget::Inert);
        assert_eq!(props.tags.len(), 1);
        assert_eq!(props.tags[0].text, "Nuevo");
        assert_eq!(props.tags[0].icon, None);
    }
}
