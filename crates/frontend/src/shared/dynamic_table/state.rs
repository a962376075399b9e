use super::form::FormMode;
use contracts::shared::table::column::{sort_rows, ColumnDescriptor, SortState};
use contracts::shared::table::pagination::normalize_page_size;
use contracts::shared::table::row::filter_rows;
use contracts::shared::table::{PaginationState, Row};
use leptos::prelude::*;
use std::collections::HashMap;

/// Критерии отбора: общий поиск, фильтры колонок и сортировка.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowQuery {
    pub search_query: String,
    /// Активные фильтры колонок: column key → значение
    pub column_filters: HashMap<String, String>,
    pub sort: Option<SortState>,
}

impl RowQuery {
    pub fn set_column_filter(&mut self, key: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.column_filters.remove(key);
        } else {
            self.column_filters.insert(key.to_string(), value.to_string());
        }
    }

    pub fn column_filter(&self, key: &str) -> String {
        self.column_filters.get(key).cloned().unwrap_or_default()
    }

    pub fn toggle_sort(&mut self, field: &str) {
        self.sort = SortState::toggle(self.sort.take(), field);
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableState {
    pub query: RowQuery,
    pub pagination: PaginationState,
}

impl TableState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            query: RowQuery::default(),
            pagination: PaginationState::default().with_page_size(page_size),
        }
    }

    /// Новый поисковый запрос; показ начинается с первой страницы.
    pub fn set_search(&mut self, query: String) {
        self.query.search_query = query;
        self.pagination.set_page(1);
    }

    pub fn set_column_filter(&mut self, key: &str, value: &str) {
        self.query.set_column_filter(key, value);
        self.pagination.set_page(1);
    }

    pub fn toggle_sort(&mut self, field: &str) {
        self.query.toggle_sort(field);
    }

    /// Смена размера страницы относительно реально показанной страницы.
    pub fn change_page_size(&mut self, page_size: usize, filtered_count: usize) {
        let page = self.pagination.effective_page(filtered_count);
        self.pagination.set_page(page);
        self.pagination.set_page_size(page_size);
    }
}

/// Размер страницы приводится к одному из `PAGE_SIZE_OPTIONS`.
pub fn create_state(page_size: usize) -> RwSignal<TableState> {
    RwSignal::new(TableState::with_page_size(normalize_page_size(page_size)))
}

/// Поколения запросов к endpoint: применяется только ответ последнего начатого.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchFence {
    generation: u64,
}

impl FetchFence {
    /// Начинает новый запрос (или отменяет текущий, если источник убран).
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation == ticket
    }
}

/// Строка, открытая в модальном окне.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowSelection(Option<(FormMode, Row)>);

impl RowSelection {
    pub fn open(&mut self, mode: FormMode, row: Row) {
        self.0 = Some((mode, row));
    }

    pub fn close(&mut self) {
        self.0 = None;
    }

    pub fn current(&self) -> Option<(FormMode, Row)> {
        self.0.clone()
    }
}

/// Search, column filters and sort over the active row source.
///
/// Pagination is applied separately so the caller can keep the filtered set
/// for export.
pub fn filtered_rows(rows: &[Row], columns: &[ColumnDescriptor], query: &RowQuery) -> Vec<Row> {
    let mut result = filter_rows(rows, &query.search_query);

    if !query.column_filters.is_empty() {
        result.retain(|row| {
            query.column_filters.iter().all(|(key, value)| {
                columns
                    .iter()
                    .find(|c| &c.key == key)
                    .map(|c| c.filter_matches(row, value))
                    .unwrap_or(true)
            })
        });
    }

    if let Some(sort) = &query.sort {
        let field = columns
            .iter()
            .find(|c| c.key == sort.field)
            .map(|c| c.data_index.as_str())
            .unwrap_or(sort.field.as_str());
        sort_rows(&mut result, field, sort.direction);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn rows(values: Vec<Value>) -> Vec<Row> {
        values
            .into_iter()
            .filter_map(|v| v.as_object().cloned())
            .collect()
    }

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("ID", "id").sortable(),
            ColumnDescriptor::new("Nombre", "name").sortable().searchable(),
            ColumnDescriptor::new("Ciudad", "city").searchable(),
        ]
    }

    fn sample() -> Vec<Row> {
        rows(vec![
            json!({"id": 3, "name": "Carla", "city": "Lima"}),
            json!({"id": 1, "name": "Ana", "city": "Quito"}),
            json!({"id": null, "name": "Bruno", "city": "Lima"}),
            json!({"id": 2, "name": "Diego"}),
        ])
    }

    fn ids(rows: &[Row]) -> Vec<Value> {
        rows.iter()
            .map(|r| r.get("id").cloned().unwrap_or(Value::Null))
            .collect()
    }

    #[test]
    fn test_default_state_shows_everything_in_order() {
        let query = RowQuery::default();
        let result = filtered_rows(&sample(), &columns(), &query);
        assert_eq!(ids(&result), vec![json!(3), json!(1), Value::Null, json!(2)]);
    }

    #[test]
    fn test_sort_cycle_with_nulls_last() {
        let mut state = TableState::default();
        state.toggle_sort("id");
        let asc = filtered_rows(&sample(), &columns(), &state.query);
        assert_eq!(ids(&asc), vec![json!(1), json!(2), json!(3), Value::Null]);

        state.toggle_sort("id");
        let desc = filtered_rows(&sample(), &columns(), &state.query);
        assert_eq!(ids(&desc)[0], Value::Null);

        state.toggle_sort("id");
        assert!(state.query.sort.is_none());
    }

    #[test]
    fn test_column_filters_combine_with_search() {
        let mut query = RowQuery::default();
        query.set_column_filter("city", "lima");
        let by_city = filtered_rows(&sample(), &columns(), &query);
        assert_eq!(by_city.len(), 2);
        assert_eq!(query.column_filter("city"), "lima");

        query.search_query = "bru".into();
        let both = filtered_rows(&sample(), &columns(), &query);
        assert_eq!(ids(&both), vec![Value::Null]);

        // Строка без поля city исключается, пока фильтр активен
        query.search_query = "diego".into();
        assert!(filtered_rows(&sample(), &columns(), &query).is_empty());

        query.set_column_filter("city", "   ");
        assert!(query.column_filters.is_empty());
        assert_eq!(filtered_rows(&sample(), &columns(), &query).len(), 1);
    }

    #[test]
    fn test_page_size_from_config() {
        let state = TableState::with_page_size(50);
        assert_eq!(state.pagination.page_size, 50);
        assert_eq!(state.pagination.current, 1);
    }

    #[test]
    fn test_search_returns_to_first_page() {
        let mut state = TableState::default();
        state.pagination.reseed(100);
        state.pagination.set_page(4);
        state.set_search("ana".into());
        assert_eq!(state.pagination.current, 1);
        // total не зависит от поиска
        assert_eq!(state.pagination.total, 100);
    }

    #[test]
    fn test_page_size_change_uses_visible_page() {
        let mut state = TableState::default();
        state.pagination.reseed(100);
        state.pagination.set_page(9);
        // После фильтрации осталось 25 строк: реально показана 3-я страница (строки 20..25)
        state.change_page_size(20, 25);
        assert_eq!(state.pagination.page_size, 20);
        assert_eq!(state.pagination.current, 2);
    }

    #[test]
    fn test_unsupported_page_size_snaps_to_option() {
        let state = TableState::with_page_size(normalize_page_size(15));
        assert_eq!(state.pagination.page_size, 10);
    }

    #[test]
    fn test_out_of_order_responses_are_dropped() {
        let mut fence = FetchFence::default();
        let first = fence.begin();
        let second = fence.begin();

        // Второй запрос завершился раньше первого
        assert!(fence.is_current(second));
        assert!(!fence.is_current(first));

        // api убран: ответ второго запроса тоже устарел
        fence.begin();
        assert!(!fence.is_current(second));
    }

    #[test]
    fn test_closing_modal_clears_selection() {
        let row = rows(vec![json!({"id": 1, "name": "Ana"})]).remove(0);
        let mut selection = RowSelection::default();
        assert_eq!(selection.current(), None);

        selection.open(FormMode::Edit, row.clone());
        assert_eq!(selection.current(), Some((FormMode::Edit, row)));

        selection.close();
        assert_eq!(selection.current(), None);
    }
}
