//! DashboardCard — карточка раздела для главной страницы.
//!
//! Клик по карточке зависит от `path`:
//! - `None` — карточка неактивна (без эффекта наведения, обычный курсор);
//! - `http...` — ссылка открывается в новой вкладке;
//! - иначе — навигация внутри приложения.
//!
//! # Пример
//! ```rust,ignore
//! <DashboardCard
//!     icon="users"
//!     color="#1890ff"
//!     title="Пользователи"
//!     description="Управление учётными записями"
//!     path="/users"
//!     tags=vec![CardTag { color: Some("green".into()), icon: None, text: "Новое".into() }]
//! />
//! ```

use crate::shared::icons::icon_or_text;
use crate::shared::navigation;
use contracts::shared::card::{CardProps, CardTag, CardTarget};
use leptos::prelude::*;

const TRANSITION: &str = "transition: all 0.3s ease;";

fn card_style(hovered: bool, inert: bool) -> String {
    let shadow = if hovered {
        "0 14px 28px rgba(0, 0, 0, 0.25)"
    } else {
        "0 10px 20px rgba(0, 0, 0, 0.1)"
    };
    let transform = if hovered && !inert {
        "translateY(-5px)"
    } else {
        "none"
    };
    let cursor = if inert { "default" } else { "pointer" };
    format!(
        "width: 100%; height: 300px; border-radius: 16px; overflow: hidden; background: #ffffff; \
         display: flex; flex-direction: column; {TRANSITION} box-shadow: {shadow}; \
         transform: {transform}; cursor: {cursor};"
    )
}

fn header_style(color: &str, hovered: bool) -> String {
    format!(
        "background: {}; padding: 30px 20px; text-align: center; {TRANSITION} transform: {};",
        color,
        if hovered { "scale(1.05)" } else { "none" }
    )
}

fn lift(hovered: bool, px: u32) -> String {
    if hovered {
        format!("translateY(-{}px)", px)
    } else {
        "none".to_string()
    }
}

fn tag_style(color: Option<&str>, hovered: bool) -> String {
    let color = color.unwrap_or("#8c8c8c");
    format!(
        "padding: 5px 10px; border-radius: 20px; font-size: 12px; display: inline-flex; \
         align-items: center; gap: 5px; border: 1px solid {color}; color: {color}; {TRANSITION} \
         transform: {};",
        if hovered { "scale(1.05)" } else { "none" }
    )
}

/// Цель клика вычисляется из текущего значения `path`.
fn click_target(path: MaybeProp<String>) -> Memo<CardTarget> {
    Memo::new(move |_| CardTarget::from_path(path.get().as_deref()))
}

#[component]
pub fn DashboardCard(
    /// Имя иконки из набора или произвольный текст (эмодзи)
    #[prop(into)]
    icon: String,
    /// CSS-цвет шапки карточки
    #[prop(into)]
    color: String,
    #[prop(into)]
    title: String,
    #[prop(into)]
    description: String,
    /// Куда ведёт клик; `None` — карточка только для информации
    #[prop(optional, into)]
    path: MaybeProp<String>,
    #[prop(optional)]
    tags: Vec<CardTag>,
) -> impl IntoView {
    let target = click_target(path);
    let inert = move || target.with(|t| t.is_inert());
    let (hovered, set_hovered) = signal(false);

    let handle_click = move |_| target.with_untracked(navigation::follow);

    let tags_view = tags
        .into_iter()
        .map(|tag| {
            let tag_color = tag.color.clone();
            view! {
                <span style=move || tag_style(tag_color.as_deref(), hovered.get())>
                    {tag.icon.as_deref().map(icon_or_text)}
                    {tag.text}
                </span>
            }
        })
        .collect_view();

    view! {
        <div
            class=move || if inert() { "dashboard-card dashboard-card--inert" } else { "dashboard-card" }
            style=move || card_style(hovered.get(), inert())
            on:click=handle_click
            on:mouseenter=move |_| set_hovered.set(true)
            on:mouseleave=move |_| set_hovered.set(false)
        >
            <div style=move || header_style(&color, hovered.get())>
                <div style=move || format!(
                    "font-size: 3rem; color: #fff; {TRANSITION} transform: {};",
                    lift(hovered.get(), 5)
                )>
                    {icon_or_text(&icon)}
                </div>
            </div>
            <div style="padding: 20px; flex: 1; display: flex; flex-direction: column; justify-content: space-between;">
                <div>
                    <h3 style=move || format!(
                        "color: #000; margin: 0 0 10px 0; {TRANSITION} transform: {};",
                        lift(hovered.get(), 2)
                    )>
                        {title}
                    </h3>
                    <span style=move || format!(
                        "font-size: 14px; color: #666; {TRANSITION} opacity: {};",
                        if hovered.get() { "1" } else { "0.8" }
                    )>
                        {description}
                    </span>
                </div>
                <div style="display: flex; flex-wrap: wrap; gap: 5px; margin-top: 15px;">
                    {tags_view}
                </div>
            </div>
        </div>
    }
}

/// Та же карточка, но с пропсами одной структурой (для встраивания).
#[component]
pub fn DashboardCardFromProps(props: CardProps) -> impl IntoView {
    let CardProps {
        icon,
        color,
        title,
        description,
        path,
        tags,
    } = props;

    view! {
        <DashboardCard
            icon=icon
            color=color
            title=title
            description=description
            path=path
            tags=tags
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inert_card_never_lifts_or_shows_pointer() {
        let style = card_style(true, true);
        assert!(style.contains("cursor: default"));
        assert!(style.contains("transform: none"));
        // Elevation still follows hover.
        assert!(style.contains("0 14px 28px"));
    }

    #[test]
    fn test_active_card_hover() {
        let idle = card_style(false, false);
        assert!(idle.contains("cursor: pointer"));
        assert!(idle.contains("transform: none"));

        let hovered = card_style(true, false);
        assert!(hovered.contains("translateY(-5px)"));
    }

    #[test]
    fn test_header_and_tags() {
        assert!(header_style("#ff0000", true).contains("background: #ff0000"));
        assert!(header_style("#ff0000", true).contains("scale(1.05)"));
        assert!(tag_style(None, false).contains("#8c8c8c"));
        assert!(tag_style(Some("green"), true).contains("color: green"));
        assert_eq!(lift(false, 2), "none");
        assert_eq!(lift(true, 2), "translateY(-2px)");
    }

    #[test]
    fn test_click_target_follows_path() {
        let path = RwSignal::new(None::<String>);
        let target = click_target(MaybeProp::from(Signal::derive(move || path.get())));
        assert_eq!(target.get_untracked(), CardTarget::Inert);

        path.set(Some("/users".to_string()));
        assert_eq!(target.get_untracked(), CardTarget::Internal("/users".to_string()));

        path.set(Some("https://leptos.dev".to_string()));
        assert_eq!(
            target.get_untracked(),
            CardTarget::External("https://leptos.dev".to_string())
        );
    }
}
