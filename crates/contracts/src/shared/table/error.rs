use thiserror::Error;

/// Ошибки получения строк таблицы из удалённого источника.
///
/// Ни одна из них не фатальна: таблица показывает сообщение и пустой набор строк.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowSourceError {
    #[error("Данные API имеют неожиданный формат: {0}")]
    UnexpectedPayload(String),

    #[error("Элемент {index} в данных API не является объектом")]
    NonObjectRow { index: usize },

    #[error("Ошибка загрузки данных API: HTTP {0}")]
    Http(u16),

    #[error("Ошибка загрузки данных API: {0}")]
    Network(String),

    #[error("Не удалось разобрать ответ API: {0}")]
    Decode(String),

    #[error("Некорректная конфигурация: {0}")]
    Config(String),
}
