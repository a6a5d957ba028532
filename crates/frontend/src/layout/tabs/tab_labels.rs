//! Заголовки табов.
//!
//! Разделы меню берут заголовок из `contracts::system::auth::menu`,
//! служебные табы перечислены здесь.

use contracts::system::auth::menu::label_for_key;

/// Таб конструктора шаблона KRA (открывается из списка шаблонов)
pub const TEMPLATE_BUILDER_KEY: &str = "a002_kra_template_builder";

/// Читаемый заголовок таба. Fallback: сам ключ.
pub fn tab_label_for_key(key: &str) -> &str {
    match key {
        TEMPLATE_BUILDER_KEY => "New KRA template",
        _ => label_for_key(key).unwrap_or(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_labels() {
        assert_eq!(tab_label_for_key("a001_kra"), "Key Result Areas");
        assert_eq!(tab_label_for_key(TEMPLATE_BUILDER_KEY), "New KRA template");
        assert_eq!(tab_label_for_key("unknown_tab"), "unknown_tab");
    }
}
