use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

use super::row::{display_value, Row};

/// Поле, которое отображается цветным индикатором "активен / неактивен".
pub const DEFAULT_STATUS_FIELD: &str = "activo";

/// Описание одной колонки таблицы.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    pub title: String,
    pub data_index: String,
    pub key: String,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub searchable: bool,
}

impl ColumnDescriptor {
    pub fn new(title: impl Into<String>, data_index: impl Into<String>) -> Self {
        let data_index = data_index.into();
        Self {
            title: title.into(),
            key: data_index.clone(),
            data_index,
            sortable: false,
            searchable: false,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Per-column filter: keeps the row when the stringified field contains `value`.
    ///
    /// Empty filter value keeps everything; missing or null fields never match.
    pub fn filter_matches(&self, row: &Row, value: &str) -> bool {
        if value.is_empty() {
            return true;
        }
        row.get(&self.data_index)
            .and_then(display_value)
            .map(|text| text.to_lowercase().contains(&value.to_lowercase()))
            .unwrap_or(false)
    }

    /// Compares two rows by this column's field.
    pub fn compare_rows(&self, a: &Row, b: &Row) -> Ordering {
        compare_values(a.get(&self.data_index), b.get(&self.data_index))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Текущая сортировка таблицы: поле и направление.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub field: String,
    pub direction: SortDirection,
}

impl SortState {
    /// Клик по заголовку: по возрастанию → по убыванию → без сортировки.
    pub fn toggle(current: Option<SortState>, field: &str) -> Option<SortState> {
        match current {
            Some(state) if state.field == field => match state.direction {
                SortDirection::Ascending => Some(SortState {
                    field: state.field,
                    direction: SortDirection::Descending,
                }),
                SortDirection::Descending => None,
            },
            _ => Some(SortState {
                field: field.to_string(),
                direction: SortDirection::Ascending,
            }),
        }
    }
}

/// Сортирует строки по полю (стабильная сортировка).
pub fn sort_rows(rows: &mut [Row], field: &str, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let cmp = compare_values(a.get(field), b.get(field));
        match direction {
            SortDirection::Ascending => cmp,
            SortDirection::Descending => cmp.reverse(),
        }
    });
}

/// Comparator for sortable columns.
///
/// Values are ranked first: text values (natural, case-insensitive order),
/// then numeric values (JSON numbers and numeric strings, by value), then
/// null or missing. Two nulls are equal.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = SortKey::of(a);
    let b = SortKey::of(b);
    a.rank().cmp(&b.rank()).then_with(|| match (&a, &b) {
        (SortKey::Text(x), SortKey::Text(y)) => natural_cmp(x, y),
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(y),
        _ => Ordering::Equal,
    })
}

enum SortKey {
    Text(String),
    Number(f64),
    Empty,
}

impl SortKey {
    fn of(value: Option<&Value>) -> Self {
        match value.filter(|v| !v.is_null()) {
            None => SortKey::Empty,
            Some(v) => match as_number(v) {
                Some(n) => SortKey::Number(n),
                None => SortKey::Text(display_value(v).unwrap_or_default()),
            },
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Text(_) => 0,
            SortKey::Number(_) => 1,
            SortKey::Empty => 2,
        }
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Chunk {
    Text(String),
    Digits(String),
}

fn chunks(s: &str) -> Vec<Chunk> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_digits = false;

    for ch in s.chars() {
        let is_digit = ch.is_ascii_digit();
        if !current.is_empty() && is_digit != in_digits {
            result.push(make_chunk(std::mem::take(&mut current), in_digits));
        }
        in_digits = is_digit;
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        result.push(make_chunk(current, in_digits));
    }
    result
}

fn make_chunk(s: String, digits: bool) -> Chunk {
    if digits {
        Chunk::Digits(s)
    } else {
        Chunk::Text(s)
    }
}

fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Natural string order: digit runs compare by numeric value, text runs
/// case-insensitively, and a text run sorts before a digit run.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a_chunks = chunks(a);
    let b_chunks = chunks(b);

    for (x, y) in a_chunks.iter().zip(b_chunks.iter()) {
        let ord = match (x, y) {
            (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
            (Chunk::Digits(x), Chunk::Digits(y)) => cmp_digit_runs(x, y),
            (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Less,
            (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a_chunks.len().cmp(&b_chunks.len())
}

/// Значения `1`, `true` и `"true"` считаются активными, всё остальное — нет.
pub fn is_active_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sorted_values(values: Value, direction: SortDirection) -> Vec<Value> {
        let mut rows: Vec<Row> = values
            .as_array()
            .unwrap()
            .iter()
            .map(|v| serde_json::from_value(json!({ "v": v })).unwrap())
            .collect();
        sort_rows(&mut rows, "v", direction);
        rows.into_iter().map(|r| r["v"].clone()).collect()
    }

    #[test]
    fn test_numbers_sort_numerically_with_nulls_last() {
        assert_eq!(
            sorted_values(json!([3, 1, null, 2]), SortDirection::Ascending),
            vec![json!(1), json!(2), json!(3), json!(null)]
        );
    }

    #[test]
    fn test_mixed_strings_use_natural_order() {
        assert_eq!(
            sorted_values(json!(["b", "a", "10", "2"]), SortDirection::Ascending),
            vec![json!("a"), json!("b"), json!("2"), json!("10")]
        );
    }

    #[test]
    fn test_descending_reverses_order() {
        assert_eq!(
            sorted_values(json!([1, 3, 2]), SortDirection::Descending),
            vec![json!(3), json!(2), json!(1)]
        );
    }

    #[test]
    fn test_missing_field_sorts_like_null() {
        let mut rows: Vec<Row> = serde_json::from_value(json!([
            {"id": 1},
            {"id": 2, "v": "x"}
        ]))
        .unwrap();
        sort_rows(&mut rows, "v", SortDirection::Ascending);
        assert_eq!(rows[0]["id"], json!(2));
    }

    #[test]
    fn test_natural_cmp() {
        assert_eq!(natural_cmp("item2", "item10"), Ordering::Less);
        assert_eq!(natural_cmp("Item", "item"), Ordering::Equal);
        assert_eq!(natural_cmp("abc", "abd"), Ordering::Less);
        assert_eq!(natural_cmp("007", "7"), Ordering::Equal);
        assert_eq!(natural_cmp("a", "a1"), Ordering::Less);
    }

    #[test]
    fn test_numeric_strings_compare_as_numbers() {
        assert_eq!(
            compare_values(Some(&json!("9.5")), Some(&json!(10))),
            Ordering::Less
        );
    }

    #[test]
    fn test_text_sorts_before_numbers() {
        assert_eq!(
            sorted_values(json!([10, "1.7 kg", null, "1.5", "b"]), SortDirection::Ascending),
            vec![json!("b"), json!("1.7 kg"), json!("1.5"), json!(10), json!(null)]
        );
    }

    #[test]
    fn test_mixed_decimal_and_unit_values_sort_consistently() {
        let mut values = Vec::new();
        for a in 0..12 {
            for b in [1, 5, 7, 10, 25] {
                values.push(json!(format!("{}.{}", a, b)));
                values.push(json!(format!("{}.{} kg", a, b)));
                values.push(json!(format!("-{}x", b)));
            }
        }
        values.push(Value::Null);
        let sorted = sorted_values(Value::Array(values.clone()), SortDirection::Ascending);
        assert_eq!(sorted.len(), values.len());
        for pair in sorted.windows(2) {
            assert_ne!(
                compare_values(Some(&pair[0]), Some(&pair[1])),
                Ordering::Greater,
                "{} > {}",
                pair[0],
                pair[1]
            );
        }
        assert_eq!(sorted.last(), Some(&Value::Null));

        // Текст с единицами всегда раньше чисел, числа сравниваются по значению
        let (x, y, z) = (json!("1.10"), json!("1.5"), json!("1.7 kg"));
        assert_eq!(compare_values(Some(&x), Some(&y)), Ordering::Less);
        assert_eq!(compare_values(Some(&z), Some(&y)), Ordering::Less);
        assert_eq!(compare_values(Some(&z), Some(&x)), Ordering::Less);
    }

    #[test]
    fn test_column_filter() {
        let column = ColumnDescriptor::new("Nombre", "name").searchable();
        let row: Row = serde_json::from_value(json!({"name": "Juan Pérez", "age": null})).unwrap();

        assert!(column.filter_matches(&row, "juan"));
        assert!(column.filter_matches(&row, ""));
        assert!(!column.filter_matches(&row, "maria"));

        let age = ColumnDescriptor::new("Edad", "age");
        assert!(!age.filter_matches(&row, "0"));
        let missing = ColumnDescriptor::new("X", "missing");
        assert!(!missing.filter_matches(&row, "a"));
    }

    #[test]
    fn test_active_flag() {
        assert!(is_active_flag(Some(&json!(1))));
        assert!(is_active_flag(Some(&json!(true))));
        assert!(is_active_flag(Some(&json!("true"))));
        assert!(!is_active_flag(Some(&json!(0))));
        assert!(!is_active_flag(Some(&json!("1"))));
        assert!(!is_active_flag(Some(&json!(false))));
        assert!(!is_active_flag(Some(&json!(null))));
        assert!(!is_active_flag(None));
    }

    #[test]
    fn test_sort_toggle_cycles() {
        let s = SortState::toggle(None, "name");
        assert_eq!(s.as_ref().map(|s| s.direction), Some(SortDirection::Ascending));
        let s = SortState::toggle(s, "name");
        assert_eq!(s.as_ref().map(|s| s.direction), Some(SortDirection::Descending));
        assert_eq!(SortState::toggle(s, "name"), None);

        let s = SortState::toggle(None, "name");
        let s = SortState::toggle(s, "age").unwrap();
        assert_eq!(s.field, "age");
        assert_eq!(s.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_descriptor_deserializes_camel_case() {
        let column: ColumnDescriptor = serde_json::from_value(json!({
            "title": "Nombre",
            "dataIndex": "name",
            "key": "name",
            "sortable": true
        }))
        .unwrap();
        assert_eq!(column.data_index, "name");
        assert!(column.sortable);
        assert!(!column.searchable);
    }
}
