use serde::{Deserialize, Serialize};

/// Вид действия над строкой, определяется по ключу.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    View,
    Edit,
    Delete,
    Custom(String),
}

impl ActionKind {
    pub fn from_key(key: &str) -> Self {
        match key {
            "view" => ActionKind::View,
            "edit" => ActionKind::Edit,
            "delete" => ActionKind::Delete,
            other => ActionKind::Custom(other.to_string()),
        }
    }
}

/// Кнопка действия в колонке "Действия".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub key: String,
    #[serde(default)]
    pub label: String,
    /// Name understood by the frontend icon set.
    #[serde(default)]
    pub icon: Option<String>,
}

impl ActionDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>, icon: Option<&str>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            icon: icon.map(str::to_string),
        }
    }

    pub fn kind(&self) -> ActionKind {
        ActionKind::from_key(&self.key)
    }

    /// Удаление требует подтверждения перед вызовом обработчика.
    pub fn needs_confirmation(&self) -> bool {
        self.kind() == ActionKind::Delete
    }
}

/// Стандартный набор: просмотр, редактирование, удаление.
pub fn default_actions() -> Vec<ActionDescriptor> {
    vec![
        ActionDescriptor::new("view", "Просмотр", Some("eye")),
        ActionDescriptor::new("edit", "Редактировать", Some("edit")),
        ActionDescriptor::new("delete", "Удалить", Some("delete")),
    ]
}

/// A full override replaces the set; otherwise the defaults are followed by the extras.
pub fn resolve_actions<T>(defaults: Vec<T>, overrides: Option<Vec<T>>, extras: Vec<T>) -> Vec<T> {
    match overrides {
        Some(actions) => actions,
        None => defaults.into_iter().chain(extras).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(actions: &[ActionDescriptor]) -> Vec<&str> {
        actions.iter().map(|a| a.key.as_str()).collect()
    }

    #[test]
    fn test_defaults_then_extras() {
        let extras = vec![ActionDescriptor::new("print", "Печать", Some("printer"))];
        let resolved = resolve_actions(default_actions(), None, extras);
        assert_eq!(keys(&resolved), vec!["view", "edit", "delete", "print"]);
    }

    #[test]
    fn test_override_replaces_everything() {
        let overrides = vec![ActionDescriptor::new("approve", "Утвердить", None)];
        let extras = vec![ActionDescriptor::new("print", "Печать", None)];
        let resolved = resolve_actions(default_actions(), Some(overrides), extras);
        assert_eq!(keys(&resolved), vec!["approve"]);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(ActionKind::from_key("view"), ActionKind::View);
        assert_eq!(ActionKind::from_key("edit"), ActionKind::Edit);
        assert_eq!(ActionKind::from_key("delete"), ActionKind::Delete);
        assert_eq!(
            ActionKind::from_key("print"),
            ActionKind::Custom("print".to_string())
        );
        assert!(default_actions()[2].needs_confirmation());
        assert!(!default_actions()[0].needs_confirmation());
    }
}
