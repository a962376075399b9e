//! Описание удалённого источника строк и разбор его ответа.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::error::RowSourceError;
use super::row::Row;

/// Имя параметра адресной строки, из которого берётся токен.
pub const TOKEN_QUERY_PARAM: &str = "token";

/// Откуда брать bearer-токен для запроса.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TokenSource {
    #[default]
    None,
    /// `token: true` — токен читается из параметра `token` текущей страницы.
    PageQuery,
    Literal(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawToken {
    Flag(bool),
    Value(String),
}

impl<'de> Deserialize<'de> for TokenSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawToken>::deserialize(deserializer)?;
        Ok(match raw {
            None | Some(RawToken::Flag(false)) => TokenSource::None,
            Some(RawToken::Flag(true)) => TokenSource::PageQuery,
            Some(RawToken::Value(s)) if s == "true" => TokenSource::PageQuery,
            Some(RawToken::Value(s)) if s.is_empty() => TokenSource::None,
            Some(RawToken::Value(s)) => TokenSource::Literal(s),
        })
    }
}

/// Remote data source of a table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDescriptor {
    pub url: String,
    /// Path to the row array inside the response; dots descend into nested objects.
    #[serde(default)]
    pub api_data_prop: Option<String>,
    #[serde(default)]
    pub token: TokenSource,
}

impl ApiDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_data_prop: None,
            token: TokenSource::None,
        }
    }

    pub fn with_data_prop(mut self, prop: impl Into<String>) -> Self {
        self.api_data_prop = Some(prop.into());
        self
    }

    pub fn with_token(mut self, token: TokenSource) -> Self {
        self.token = token;
        self
    }

    /// Вычисляет токен для одного запроса, не изменяя описание.
    ///
    /// `page_query` is the current page's query string, with or without the leading `?`.
    pub fn resolve_token(&self, page_query: &str) -> Option<String> {
        match &self.token {
            TokenSource::None => None,
            TokenSource::Literal(token) => Some(token.clone()),
            TokenSource::PageQuery => token_from_query(page_query),
        }
    }

    /// Value of the `Authorization` header, if a token resolves.
    pub fn authorization_header(&self, page_query: &str) -> Option<String> {
        self.resolve_token(page_query)
            .map(|token| format!("Bearer {}", token))
    }

    pub fn extract_rows(&self, payload: Value) -> Result<Vec<Row>, RowSourceError> {
        extract_rows(payload, self.api_data_prop.as_deref())
    }
}

#[derive(Deserialize)]
struct PageQuery {
    token: Option<String>,
}

/// Разбирается только пара `token=...`: остальные параметры страницы
/// (`filter[x]=1`, повторяющиеся ключи) не должны мешать.
fn token_from_query(page_query: &str) -> Option<String> {
    let pair = page_query
        .trim_start_matches('?')
        .split('&')
        .find(|pair| pair.split('=').next() == Some(TOKEN_QUERY_PARAM))?;

    match serde_qs::from_str::<PageQuery>(pair) {
        Ok(query) => query.token.filter(|token| !token.is_empty()),
        Err(e) => {
            log::warn!("Не удалось разобрать параметр {}: {}", TOKEN_QUERY_PARAM, e);
            None
        }
    }
}

/// Извлекает массив строк из ответа API.
///
/// Один объект превращается в массив из одного элемента; всё остальное — ошибка.
pub fn extract_rows(payload: Value, data_prop: Option<&str>) -> Result<Vec<Row>, RowSourceError> {
    let target = match data_prop.filter(|p| !p.is_empty()) {
        Some(path) => lookup_path(payload, path).ok_or_else(|| {
            RowSourceError::UnexpectedPayload(format!("поле \"{}\" отсутствует", path))
        })?,
        None => payload,
    };

    match target {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(row) => Ok(row),
                _ => Err(RowSourceError::NonObjectRow { index }),
            })
            .collect(),
        Value::Object(row) => Ok(vec![row]),
        other => Err(RowSourceError::UnexpectedPayload(kind_name(&other).to_string())),
    }
}

fn lookup_path(payload: Value, path: &str) -> Option<Value> {
    let mut current = payload;

    // A key that itself contains dots wins over nested lookup.
    if let Value::Object(map) = &mut current {
        if let Some(value) = map.remove(path) {
            return Some(value);
        }
    }

    for segment in path.split('.') {
        current = match current {
            Value::Object(mut map) => map.remove(segment)?,
            _ => return None,
        };
    }
    Some(current)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "логическое значение",
        Value::Number(_) => "число",
        Value::String(_) => "строка",
        Value::Array(_) => "массив",
        Value::Object(_) => "объект",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rows_under_data_prop() {
        let api = ApiDescriptor::new("/api/items").with_data_prop("items");
        let rows = api
            .extract_rows(json!({"items": [{"id": 1}, {"id": 2}], "total": 2}))
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], json!(1));
        assert_eq!(rows[1]["id"], json!(2));
    }

    #[test]
    fn test_bare_object_becomes_single_row() {
        let rows = extract_rows(json!({"id": 1}), None).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], json!(1));
    }

    #[test]
    fn test_string_payload_is_an_error() {
        let err = extract_rows(json!("oops"), None).unwrap_err();
        assert!(matches!(err, RowSourceError::UnexpectedPayload(_)));
    }

    #[test]
    fn test_missing_data_prop_is_an_error() {
        let err = extract_rows(json!({"data": []}), Some("items")).unwrap_err();
        assert!(matches!(err, RowSourceError::UnexpectedPayload(_)));
    }

    #[test]
    fn test_nested_data_prop() {
        let rows = extract_rows(
            json!({"result": {"page": {"rows": [{"id": "a"}]}}}),
            Some("result.page.rows"),
        )
        .unwrap();
        assert_eq!(rows[0]["id"], json!("a"));

        let rows = extract_rows(json!({"a.b": [{"id": 1}]}), Some("a.b")).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_non_object_items_are_rejected() {
        let err = extract_rows(json!([{"id": 1}, 5]), None).unwrap_err();
        assert_eq!(err, RowSourceError::NonObjectRow { index: 1 });
    }

    #[test]
    fn test_token_source_deserialization() {
        let api: ApiDescriptor =
            serde_json::from_value(json!({"url": "/x", "apiDataProp": "data", "token": true}))
                .unwrap();
        assert_eq!(api.token, TokenSource::PageQuery);
        assert_eq!(api.api_data_prop.as_deref(), Some("data"));

        let api: ApiDescriptor =
            serde_json::from_value(json!({"url": "/x", "token": "abc"})).unwrap();
        assert_eq!(api.token, TokenSource::Literal("abc".to_string()));

        let api: ApiDescriptor = serde_json::from_value(json!({"url": "/x"})).unwrap();
        assert_eq!(api.token, TokenSource::None);

        let api: ApiDescriptor =
            serde_json::from_value(json!({"url": "/x", "token": false})).unwrap();
        assert_eq!(api.token, TokenSource::None);
    }

    #[test]
    fn test_token_from_page_query() {
        let api = ApiDescriptor::new("/x").with_token(TokenSource::PageQuery);
        assert_eq!(
            api.resolve_token("?lang=es&token=secret123"),
            Some("secret123".to_string())
        );
        assert_eq!(api.resolve_token("?lang=es"), None);
        assert_eq!(api.resolve_token(""), None);
        assert_eq!(
            api.authorization_header("token=t1"),
            Some("Bearer t1".to_string())
        );
    }

    #[test]
    fn test_token_next_to_structured_query_params() {
        let api = ApiDescriptor::new("/x").with_token(TokenSource::PageQuery);
        let abc = Some("abc".to_string());
        assert_eq!(api.resolve_token("?filter[estado]=1&token=abc"), abc);
        assert_eq!(api.resolve_token("?tab=1&tab=2&token=abc"), abc);
        assert_eq!(api.resolve_token("?ids[]=1&token=abc"), abc);
        assert_eq!(
            api.resolve_token("?token=a%20b&page=2"),
            Some("a b".to_string())
        );
        assert_eq!(api.resolve_token("?token=&page=2"), None);
        assert_eq!(api.resolve_token("?tokens=abc"), None);
    }

    #[test]
    fn test_literal_token_and_no_token() {
        let api = ApiDescriptor::new("/x").with_token(TokenSource::Literal("abc".into()));
        assert_eq!(api.resolve_token("?token=other"), Some("abc".to_string()));

        let api = ApiDescriptor::new("/x");
        assert_eq!(api.authorization_header("?token=other"), None);
    }
}
