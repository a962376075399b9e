use serde::Deserialize;
use std::collections::HashSet;

use super::action::ActionDescriptor;
use super::api::ApiDescriptor;
use super::column::{ColumnDescriptor, DEFAULT_STATUS_FIELD};
use super::error::RowSourceError;
use super::pagination::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use super::row::{Row, DEFAULT_ROW_KEY};
use crate::shared::form::FormDescriptor;

/// Конфигурация таблицы, передаваемая встраивающей страницей в виде JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    pub columns: Vec<ColumnDescriptor>,
    #[serde(default)]
    pub data: Vec<Row>,
    #[serde(default)]
    pub api: Option<ApiDescriptor>,
    #[serde(default = "default_row_key")]
    pub row_key: String,
    #[serde(default = "default_status_field")]
    pub status_field: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub can_create: bool,
    #[serde(default)]
    pub create_text: Option<String>,
    #[serde(default, alias = "canExportPDF")]
    pub can_export_pdf: bool,
    #[serde(default)]
    pub can_export_excel: bool,
    #[serde(default)]
    pub form_config: Option<FormDescriptor>,
    /// Replaces the default view/edit/delete set when present.
    #[serde(default)]
    pub actions: Option<Vec<ActionDescriptor>>,
    #[serde(default)]
    pub more_actions: Vec<ActionDescriptor>,
}

fn default_row_key() -> String {
    DEFAULT_ROW_KEY.to_string()
}

fn default_status_field() -> String {
    DEFAULT_STATUS_FIELD.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl TableConfig {
    pub fn from_json(json: &str) -> Result<Self, RowSourceError> {
        let config: TableConfig =
            serde_json::from_str(json).map_err(|e| RowSourceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RowSourceError> {
        if self.columns.is_empty() {
            return Err(RowSourceError::Config("не задано ни одной колонки".into()));
        }
        if !PAGE_SIZE_OPTIONS.contains(&self.page_size) {
            return Err(RowSourceError::Config(format!(
                "размер страницы {} не входит в {:?}",
                self.page_size, PAGE_SIZE_OPTIONS
            )));
        }
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.key.as_str()) {
                return Err(RowSourceError::Config(format!(
                    "повторяющийся ключ колонки \"{}\"",
                    column.key
                )));
            }
        }
        if let Some(api) = &self.api {
            if api.url.trim().is_empty() {
                return Err(RowSourceError::Config("пустой url источника данных".into()));
            }
        }
        Ok(())
    }
}
