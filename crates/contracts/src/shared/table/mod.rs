//! Модель данных динамической таблицы: строки, колонки, действия,
//! источник данных, пагинация и конфигурация для встраивания.

pub mod action;
pub mod api;
pub mod column;
pub mod config;
pub mod error;
pub mod pagination;
pub mod row;

pub use action::{ActionDescriptor, ActionKind};
pub use api::{ApiDescriptor, TokenSource};
pub use column::ColumnDescriptor;
pub use config::TableConfig;
pub use error::RowSourceError;
pub use pagination::{PaginationState, PAGE_SIZE_OPTIONS};
pub use row::Row;
