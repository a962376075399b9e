use serde_json::{Map, Value};

/// Одна запись таблицы: открытое отображение "поле → значение".
///
/// Таблица никогда не изменяет строки, только читает их.
pub type Row = Map<String, Value>;

/// Default key field used to identify rows.
pub const DEFAULT_ROW_KEY: &str = "id";

/// Строковое представление значения для поиска, сортировки и отображения.
///
/// Strings are returned verbatim, numbers and booleans as their JSON text,
/// nested arrays/objects as compact JSON. `null` maps to `None`.
pub fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Text shown in a table cell; missing and null fields render empty.
pub fn cell_text(row: &Row, field: &str) -> String {
    row.get(field).and_then(display_value).unwrap_or_default()
}

/// Identity of a row under the given key field, falling back to its position.
pub fn row_key(row: &Row, key_field: &str, index: usize) -> String {
    row.get(key_field)
        .and_then(display_value)
        .unwrap_or_else(|| format!("#{}", index))
}

/// Проверяет, содержит ли хотя бы одно поле строки подстроку (без учёта регистра).
///
/// `query_lower` must already be lowercased.
pub fn row_matches(row: &Row, query_lower: &str) -> bool {
    row.values().any(|value| {
        display_value(value)
            .map(|text| text.to_lowercase().contains(query_lower))
            .unwrap_or(false)
    })
}

/// Фильтрует строки по общему поисковому запросу.
///
/// Пустой запрос возвращает все строки в исходном порядке.
pub fn filter_rows(rows: &[Row], query: &str) -> Vec<Row> {
    if query.is_empty() {
        return rows.to_vec();
    }

    let query_lower = query.to_lowercase();
    rows.iter()
        .filter(|row| row_matches(row, &query_lower))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Row> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_query_keeps_all_rows_in_order() {
        let data = rows(json!([
            {"id": 2, "name": "Beta"},
            {"id": 1, "name": "Alpha"},
            {"id": 3, "name": null}
        ]));
        assert_eq!(filter_rows(&data, ""), data);
    }

    #[test]
    fn test_filter_is_case_insensitive_over_all_fields() {
        let data = rows(json!([
            {"id": 1, "name": "Alpha", "city": "Madrid"},
            {"id": 2, "name": "Beta", "city": "Lima"},
            {"id": 3, "name": "Gamma", "city": "MADRID norte"}
        ]));

        let result = filter_rows(&data, "madrid");
        let ids: Vec<_> = result.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!(1), json!(3)]);

        let result = filter_rows(&data, "ET");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0]["name"], json!("Beta"));
    }

    #[test]
    fn test_filter_matches_numbers_and_skips_nulls() {
        let data = rows(json!([
            {"id": 10, "note": null},
            {"id": 20, "note": "null"}
        ]));

        assert_eq!(filter_rows(&data, "10").len(), 1);
        // Only the literal string "null" matches, not a null value.
        let result = filter_rows(&data, "null");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0]["id"], json!(20));
    }

    #[test]
    fn test_nested_values_are_searched_as_json() {
        let data = rows(json!([
            {"id": 1, "meta": {"owner": "Ana"}},
            {"id": 2, "meta": {"owner": "Luis"}}
        ]));
        let result = filter_rows(&data, "ana");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0]["id"], json!(1));
    }

    #[test]
    fn test_cell_text_and_row_key() {
        let row: Row = serde_json::from_value(json!({"id": 7, "flag": true, "empty": null})).unwrap();
        assert_eq!(cell_text(&row, "id"), "7");
        assert_eq!(cell_text(&row, "flag"), "true");
        assert_eq!(cell_text(&row, "empty"), "");
        assert_eq!(cell_text(&row, "missing"), "");
        assert_eq!(row_key(&row, "id", 0), "7");
        assert_eq!(row_key(&row, "uuid", 4), "#4");
    }
}
