use contracts::shared::table::action::{default_actions, resolve_actions};
use contracts::shared::table::{ActionDescriptor, ActionKind, Row};
use leptos::prelude::*;

/// Кнопка в колонке "Действия": описание плюс необязательный обработчик.
#[derive(Clone)]
pub struct TableAction {
    pub descriptor: ActionDescriptor,
    pub on_click: Option<Callback<Row>>,
}

impl TableAction {
    pub fn new(descriptor: ActionDescriptor) -> Self {
        Self {
            descriptor,
            on_click: None,
        }
    }

    pub fn with_handler(mut self, on_click: Callback<Row>) -> Self {
        self.on_click = Some(on_click);
        self
    }

    pub fn kind(&self) -> ActionKind {
        self.descriptor.kind()
    }
}

impl From<ActionDescriptor> for TableAction {
    fn from(descriptor: ActionDescriptor) -> Self {
        Self::new(descriptor)
    }
}

/// Что делает таблица при нажатии на действие.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    /// Открыть модальное окно формы
    OpenView(Row),
    OpenEdit(Row),
    /// Показать подтверждение удаления
    ConfirmDelete(Row),
    /// Передать строку обработчику действия
    Invoke(Row),
    /// Обработчика нет, только запись в лог
    Unhandled { key: String, row: Row },
}

/// View/edit/delete are handled by the table; any other key goes to its handler.
///
/// A caller handler on view/edit replaces the built-in modal.
pub fn plan_action(kind: &ActionKind, key: &str, has_handler: bool, row: Row) -> ActionOutcome {
    match kind {
        ActionKind::View if !has_handler => ActionOutcome::OpenView(row),
        ActionKind::Edit if !has_handler => ActionOutcome::OpenEdit(row),
        ActionKind::Delete => ActionOutcome::ConfirmDelete(row),
        _ if has_handler => ActionOutcome::Invoke(row),
        _ => ActionOutcome::Unhandled {
            key: key.to_string(),
            row,
        },
    }
}

/// Итоговый набор действий для строки.
pub fn resolve_table_actions(
    overrides: Option<Vec<TableAction>>,
    extras: Vec<TableAction>,
) -> Vec<TableAction> {
    let defaults = default_actions().into_iter().map(TableAction::from).collect();
    resolve_actions(defaults, overrides, extras)
}
