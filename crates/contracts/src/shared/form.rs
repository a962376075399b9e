//! Схема формы просмотра/редактирования записи и значения формы.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::table::column::ColumnDescriptor;
use super::table::row::{display_value, Row};

/// Prefix used by form consumers that key initial values as `field_<name>`.
pub const FIELD_PREFIX: &str = "field_";

/// Сколько полей помещается в одну строку автоматически созданной формы.
const AUTO_FORM_COLUMNS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormLayout {
    #[default]
    Vertical,
    Horizontal,
    Inline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Number,
    Textarea,
    Checkbox,
    Date,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormElement {
    #[serde(rename = "type", default)]
    pub kind: FieldKind,
    /// 1-based grid row.
    pub row: usize,
    /// 0-based grid column.
    #[serde(default)]
    pub col: usize,
    pub label: String,
    /// Row field this element edits.
    pub field_id: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSection {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub elements: Vec<FormElement>,
}

impl FormSection {
    /// Элементы, сгруппированные по строкам сетки и упорядоченные по колонкам.
    pub fn grid_rows(&self) -> Vec<(usize, Vec<&FormElement>)> {
        let mut rows: Vec<(usize, Vec<&FormElement>)> = Vec::new();
        for element in &self.elements {
            match rows.iter_mut().find(|(row, _)| *row == element.row) {
                Some((_, items)) => items.push(element),
                None => rows.push((element.row, vec![element])),
            }
        }
        rows.sort_by_key(|(row, _)| *row);
        for (_, items) in rows.iter_mut() {
            items.sort_by_key(|e| e.col);
        }
        rows
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDescriptor {
    #[serde(default)]
    pub layout: FormLayout,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub sections: Vec<FormSection>,
}

impl FormDescriptor {
    /// Форма по умолчанию: одно текстовое поле на колонку, по два в строке.
    pub fn from_columns(columns: &[ColumnDescriptor]) -> Self {
        let elements = columns
            .iter()
            .enumerate()
            .map(|(index, column)| FormElement {
                kind: FieldKind::Text,
                row: index / AUTO_FORM_COLUMNS + 1,
                col: index % AUTO_FORM_COLUMNS,
                label: column.title.clone(),
                field_id: column.data_index.clone(),
                required: true,
                placeholder: Some(format!("Введите {}", column.title)),
            })
            .collect();

        Self {
            layout: FormLayout::Vertical,
            name: "Форма".to_string(),
            description: "Форма сгенерирована автоматически".to_string(),
            sections: vec![FormSection {
                name: "Данные".to_string(),
                description: "Информация о записи".to_string(),
                elements,
            }],
        }
    }

    /// Caller-supplied schema, or one synthesized from the columns.
    pub fn resolve(custom: Option<FormDescriptor>, columns: &[ColumnDescriptor]) -> Self {
        custom.unwrap_or_else(|| Self::from_columns(columns))
    }

    pub fn elements(&self) -> impl Iterator<Item = &FormElement> {
        self.sections.iter().flat_map(|s| s.elements.iter())
    }
}

/// Значения формы, переданные рендереру как структурированное отображение.
///
/// Keys are the row's own field names; elements find their value by `field_id`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
    values: Row,
}

impl FormValues {
    pub fn from_row(row: &Row) -> Self {
        Self { values: row.clone() }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn text(&self, field: &str) -> String {
        self.values
            .get(field)
            .and_then(display_value)
            .unwrap_or_default()
    }

    pub fn set(&mut self, field: &str, value: Value) {
        self.values.insert(field.to_string(), value);
    }

    /// Stores raw input text, typed according to the element kind.
    pub fn set_input(&mut self, field: &str, kind: FieldKind, input: &str) {
        let value = match kind {
            FieldKind::Number => input
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(|n| match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                        Value::from(f as i64)
                    }
                    _ => Value::Number(n),
                })
                .unwrap_or_else(|| Value::String(input.to_string())),
            FieldKind::Checkbox => Value::Bool(input == "true"),
            _ => Value::String(input.to_string()),
        };
        self.set(field, value);
    }

    /// Legacy view with every key renamed to `field_<key>`.
    pub fn prefixed(&self) -> Row {
        self.values
            .iter()
            .map(|(key, value)| (format!("{}{}", FIELD_PREFIX, key), value.clone()))
            .collect()
    }

    pub fn into_row(self) -> Row {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("Nombre", "name"),
            ColumnDescriptor::new("Email", "email"),
            ColumnDescriptor::new("Edad", "age"),
        ]
    }

    #[test]
    fn test_synthesized_form_layout() {
        let form = FormDescriptor::from_columns(&columns());
        assert_eq!(form.sections.len(), 1);

        let placement: Vec<(usize, usize)> = form.elements().map(|e| (e.row, e.col)).collect();
        assert_eq!(placement, vec![(1, 0), (1, 1), (2, 0)]);

        let first = form.elements().next().unwrap();
        assert_eq!(first.field_id, "name");
        assert_eq!(first.label, "Nombre");
        assert_eq!(first.kind, FieldKind::Text);
        assert!(first.required);
        assert_eq!(first.placeholder.as_deref(), Some("Введите Nombre"));
    }

    #[test]
    fn test_custom_form_wins() {
        let custom: FormDescriptor = serde_json::from_value(json!({
            "name": "Alta",
            "sections": [{
                "name": "General",
                "elements": [
                    {"type": "number", "row": 1, "label": "Edad", "fieldId": "age"}
                ]
            }]
        }))
        .unwrap();
        let resolved = FormDescriptor::resolve(Some(custom.clone()), &columns());
        assert_eq!(resolved, custom);
        assert_eq!(resolved.layout, FormLayout::Vertical);
        assert_eq!(resolved.elements().next().unwrap().kind, FieldKind::Number);
    }

    #[test]
    fn test_grid_rows_group_and_order() {
        let section = FormSection {
            name: "S".into(),
            description: String::new(),
            elements: serde_json::from_value(json!([
                {"row": 2, "col": 1, "label": "d", "fieldId": "d"},
                {"row": 1, "col": 1, "label": "b", "fieldId": "b"},
                {"row": 2, "col": 0, "label": "c", "fieldId": "c"},
                {"row": 1, "col": 0, "label": "a", "fieldId": "a"}
            ]))
            .unwrap(),
        };
        let grid: Vec<(usize, Vec<&str>)> = section
            .grid_rows()
            .into_iter()
            .map(|(row, items)| (row, items.iter().map(|e| e.field_id.as_str()).collect()))
            .collect();
        assert_eq!(grid, vec![(1, vec!["a", "b"]), (2, vec!["c", "d"])]);
    }

    #[test]
    fn test_values_keep_every_field_and_prefix_on_demand() {
        let row: Row = serde_json::from_value(json!({"id": 1, "name": "Ana", "activo": true})).unwrap();
        let values = FormValues::from_row(&row);
        assert_eq!(values.len(), 3);
        assert_eq!(values.get("name"), Some(&json!("Ana")));

        let prefixed = values.prefixed();
        assert_eq!(prefixed.len(), 3);
        assert_eq!(prefixed["field_id"], json!(1));
        assert_eq!(prefixed["field_name"], json!("Ana"));
        assert_eq!(prefixed["field_activo"], json!(true));
    }

    #[test]
    fn test_set_input_types_values() {
        let mut values = FormValues::default();
        values.set_input("age", FieldKind::Number, "42");
        values.set_input("price", FieldKind::Number, "9.5");
        values.set_input("code", FieldKind::Number, "abc");
        values.set_input("name", FieldKind::Text, "Luis");
        values.set_input("active", FieldKind::Checkbox, "true");

        assert_eq!(values.get("age"), Some(&json!(42)));
        assert_eq!(values.get("price"), Some(&json!(9.5)));
        assert_eq!(values.get("code"), Some(&json!("abc")));
        assert_eq!(values.text("name"), "Luis");
        assert_eq!(values.get("active"), Some(&json!(true)));
    }
}
