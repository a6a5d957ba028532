/// Универсальные утилиты для работы со списками (поиск, сортировка, UI компоненты)
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use std::cmp::Ordering;

/// Минимальная длина поискового запроса
pub const MIN_FILTER_LEN: usize = 3;

/// Trait для типов данных, поддерживающих поиск
pub trait Searchable {
    /// Проверяет, соответствует ли объект поисковому запросу
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Активен ли фильтр (не короче `MIN_FILTER_LEN` без пробелов по краям)
pub fn is_filter_active(filter: &str) -> bool {
    filter.trim().chars().count() >= MIN_FILTER_LEN
}

/// Регистронезависимое вхождение `filter` хотя бы в одно из полей
pub fn any_field_contains<'a>(fields: impl IntoIterator<Item = &'a str>, filter: &str) -> bool {
    let filter = filter.trim().to_lowercase();
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&filter))
}

/// Сравнение строк без учёта регистра
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Сортирует список по указанному полю
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending { cmp } else { cmp.reverse() }
    });
}

/// Фильтрует список по поисковому запросу
pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    if !is_filter_active(filter) {
        return items;
    }

    items
        .into_iter()
        .filter(|item| item.matches_filter(filter))
        .collect()
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending { " ▲" } else { " ▼" }
    } else {
        " ⇅"
    }
}

/// Компонент поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра (для отображения)
    #[prop(into)]
    value: Signal<String>,
    /// Callback для обновления значения фильтра
    #[prop(into)]
    on_change: Callback<String>,
    /// Placeholder текст
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        format!("Search (min. {} chars)...", MIN_FILTER_LEN)
    } else {
        placeholder
    };

    // Локальное состояние для input (до debounce)
    let (input_value, set_input_value) = signal(value.get_untracked());

    // Таймер debounce; при новом вводе предыдущий отменяется через drop
    let pending = StoredValue::new_local(None::<Timeout>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        let timeout = Timeout::new(300, move || on_change.run(new_value));
        pending.set_value(Some(timeout));
    };

    let clear_filter = move |_| {
        pending.set_value(None);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                placeholder=placeholder
                class:search-input--active=move || is_filter_active(&value.get())
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Clear">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        name: &'static str,
        score: i32,
    }

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            any_field_contains([self.name], filter)
        }
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "score" => self.score.cmp(&other.score),
                _ => cmp_ignore_case(self.name, other.name),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Revenue Growth", score: 3 },
            Row { name: "code quality", score: 1 },
            Row { name: "Customer NPS", score: 2 },
        ]
    }

    #[test]
    fn test_short_filter_returns_all() {
        assert_eq!(filter_list(rows(), "re").len(), 3);
        assert_eq!(filter_list(rows(), "   ").len(), 3);
    }

    #[test]
    fn test_filter_case_insensitive() {
        let found = filter_list(rows(), "GROW");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Revenue Growth");
        assert!(filter_list(rows(), "zzz").is_empty());
    }

    #[test]
    fn test_sort_list() {
        let mut data = rows();
        sort_list(&mut data, "name", true);
        let names: Vec<_> = data.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["code quality", "Customer NPS", "Revenue Growth"]);

        sort_list(&mut data, "score", false);
        let scores: Vec<_> = data.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![3, 2, 1]);
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("name", "name", true), " ▲");
        assert_eq!(get_sort_indicator("name", "name", false), " ▼");
        assert_eq!(get_sort_indicator("name", "score", true), " ⇅");
    }
}
