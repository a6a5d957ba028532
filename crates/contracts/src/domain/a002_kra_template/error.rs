use thiserror::Error;

/// Почему шаблон KRA нельзя сохранить
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Template code is required")]
    MissingCode,

    #[error("Template title is required")]
    MissingTitle,

    #[error("Select at least one KRA")]
    Empty,

    #[error("KRA weights must add up to 100%, currently {total}%")]
    Unbalanced { total: i64 },

    #[error("KRA {0} is listed more than once")]
    DuplicateKra(String),
}
