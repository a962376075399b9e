/// Утилиты для списков: подсветка совпадений, строка поиска, индикаторы сортировки
use contracts::shared::table::column::{SortDirection, SortState};
use leptos::prelude::*;

/// Разбивает `text` на фрагменты `(кусок, совпал)` по вхождениям `query` без учёта регистра.
///
/// Позиции ищутся в нижнем регистре; если длина строки при этом меняется
/// (редкие символы Unicode), подсветка не делается.
pub fn split_matches<'a>(text: &'a str, query: &str) -> Vec<(&'a str, bool)> {
    let query = query.trim();
    if query.is_empty() {
        return vec![(text, false)];
    }
    let text_lower = text.to_lowercase();
    let query_lower = query.to_lowercase();
    if text_lower.len() != text.len() || !text_lower.contains(&query_lower) {
        return vec![(text, false)];
    }

    let mut parts = Vec::new();
    let mut last_pos = 0;
    while let Some(pos) = text_lower[last_pos..].find(&query_lower) {
        let start = last_pos + pos;
        let end = start + query_lower.len();
        if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            return vec![(text, false)];
        }
        if start > last_pos {
            parts.push((&text[last_pos..start], false));
        }
        parts.push((&text[start..end], true));
        last_pos = end;
    }
    if last_pos < text.len() {
        parts.push((&text[last_pos..], false));
    }
    parts
}

/// Подсветка совпадений в тексте (case-insensitive)
pub fn highlight_matches(text: &str, query: &str) -> AnyView {
    let parts = split_matches(text, query)
        .into_iter()
        .map(|(part, matched)| {
            let part = part.to_string();
            if matched {
                view! {
                    <span style="background-color: #ff9800; color: white; padding: 1px 2px; border-radius: 2px; font-weight: 500;">
                        {part}
                    </span>
                }
                .into_any()
            } else {
                view! { <span>{part}</span> }.into_any()
            }
        })
        .collect_view();

    view! { <>{parts}</> }.into_any()
}

/// Строка поиска с кнопкой очистки. Каждое изменение сразу уходит в `on_change`.
#[component]
pub fn SearchInput(
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Поиск...".to_string()
    } else {
        placeholder
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    view! {
        <div style="position: relative; display: inline-flex; align-items: center;">
            <span style="position: absolute; left: 8px; color: #999; display: inline-flex;">
                {crate::shared::icons::icon("search")}
            </span>
            <input
                type="text"
                placeholder=placeholder
                style=move || format!(
                    "width: 250px; padding: 6px 32px 6px 30px; border: 1px solid #ddd; border-radius: 4px; font-size: 15px; background: {};",
                    if is_filter_active() { "#fffbea" } else { "white" }
                )
                prop:value=move || value.get()
                on:input=move |ev| on_change.run(event_target_value(&ev))
            />
            <Show when=move || !value.get().is_empty()>
                <button
                    style="position: absolute; right: 6px; background: none; border: none; cursor: pointer; padding: 4px; display: inline-flex; align-items: center; color: #666; line-height: 1;"
                    on:click=move |_| on_change.run(String::new())
                    title="Очистить"
                >
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// Индикатор сортировки для заголовка
pub fn sort_indicator(sort: Option<&SortState>, field: &str) -> &'static str {
    match sort {
        Some(s) if s.field == field => match s.direction {
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
        },
        _ => " ⇅",
    }
}

pub fn sort_class(sort: Option<&SortState>, field: &str) -> &'static str {
    match sort {
        Some(s) if s.field == field => "sort-indicator sort-indicator--active",
        _ => "sort-indicator",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_matches_case_insensitive() {
        assert_eq!(
            split_matches("Ana Banana", "an"),
            vec![
                ("An", true),
                ("a B", false),
                ("an", true),
                ("an", true),
                ("a", false)
            ]
        );
    }

    #[test]
    fn test_split_matches_without_query_or_match() {
        assert_eq!(split_matches("texto", ""), vec![("texto", false)]);
        assert_eq!(split_matches("texto", "  "), vec![("texto", false)]);
        assert_eq!(split_matches("texto", "zz"), vec![("texto", false)]);
    }

    #[test]
    fn test_sort_indicator() {
        let sort = SortState {
            field: "name".into(),
            direction: SortDirection::Descending,
        };
        assert_eq!(sort_indicator(Some(&sort), "name"), " ▼");
        assert_eq!(sort_indicator(Some(&sort), "age"), " ⇅");
        assert_eq!(sort_indicator(None, "name"), " ⇅");
        assert_eq!(sort_class(Some(&sort), "name"), "sort-indicator sort-indicator--active");
    }
}
