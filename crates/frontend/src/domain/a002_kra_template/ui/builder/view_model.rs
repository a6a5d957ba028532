use contracts::domain::a001_kra::Kra;
use contracts::domain::a002_kra_template::{KraTemplate, KraTemplateDto};
use contracts::domain::a003_department::DepartmentId;
use contracts::shared::weights::WeightAllocation;
use leptos::prelude::*;

use crate::shared::data_store::PmsDataStore;
use crate::shared::list_utils::filter_list;

/// Значение поля веса: нечисловой или пустой ввод даёт 0, диапазон не ограничивается
pub fn parse_weight_input(raw: &str) -> i32 {
    raw.trim().parse::<i32>().unwrap_or(0)
}

/// Код шаблона уникален без учёта регистра
pub fn ensure_unique_code(code: &str, templates: &[KraTemplate]) -> Result<(), String> {
    let code = code.trim();
    if templates
        .iter()
        .any(|t| t.base.code.eq_ignore_ascii_case(code))
    {
        return Err(format!("Template code '{}' is already used", code));
    }
    Ok(())
}

/// Каталог KRA для шаблона: общие KRA плюс KRA выбранного подразделения
pub fn catalogue_for(kras: Vec<Kra>, department_id: Option<DepartmentId>, search: &str) -> Vec<Kra> {
    filter_list(kras, search)
        .into_iter()
        .filter(|k| match (department_id, k.department_id) {
            (None, _) | (_, None) => true,
            (Some(selected), Some(own)) => selected == own,
        })
        .collect()
}

/// ViewModel конструктора шаблона KRA
#[derive(Clone, Copy)]
pub struct KraTemplateBuilderViewModel {
    pub allocation: RwSignal<WeightAllocation>,
    pub form: RwSignal<KraTemplateDto>,
    pub error: RwSignal<Option<String>>,
    pub search: RwSignal<String>,
    store: PmsDataStore,
}

impl KraTemplateBuilderViewModel {
    pub fn new(store: PmsDataStore) -> Self {
        Self {
            allocation: RwSignal::new(WeightAllocation::new()),
            form: RwSignal::new(KraTemplateDto::default()),
            error: RwSignal::new(None),
            search: RwSignal::new(String::new()),
            store,
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.allocation.with(|a| a.is_balanced())
    }

    pub fn total_weight(&self) -> i64 {
        self.allocation.with(|a| a.total_weight())
    }

    pub fn catalogue(&self) -> Vec<Kra> {
        let department_id = self.form.with(|f| f.department_id);
        let search = self.search.get();
        catalogue_for(self.store.kras.get(), department_id, &search)
    }

    /// Выбранные KRA в порядке выбора вместе с весами
    pub fn selected_rows(&self) -> Vec<(Kra, i32)> {
        let kras = self.store.kras.get();
        self.allocation.with(|a| {
            a.items()
                .filter_map(|(id, weight)| {
                    kras.iter()
                        .find(|k| k.to_string_id() == id)
                        .map(|k| (k.clone(), weight))
                })
                .collect()
        })
    }

    pub fn toggle_kra(&self, kra: &Kra) {
        let id = kra.to_string_id();
        self.allocation
            .update(|a| a.toggle(&id, kra.default_weight));
        self.error.set(None);
    }

    pub fn set_weight(&self, kra_id: &str, raw: &str) {
        let weight = parse_weight_input(raw);
        self.allocation.update(|a| a.set_weight(kra_id, weight));
    }

    pub fn auto_balance(&self) {
        self.allocation.update(|a| a.auto_balance());
        log::debug!(
            "Auto-balanced {} KRA",
            self.allocation.with_untracked(|a| a.len())
        );
    }

    /// Сохранить шаблон в хранилище; при успехе конструктор очищается
    pub fn save_command(&self) -> bool {
        let form = self.form.get_untracked();
        let unique = self
            .store
            .templates
            .with_untracked(|templates| ensure_unique_code(&form.code, templates));
        let result = unique.and_then(|_| {
            self.allocation
                .with_untracked(|a| KraTemplate::from_allocation(&form, a))
                .map_err(|e| e.to_string())
        });

        match result {
            Ok(template) => {
                self.store.add_template(template);
                self.allocation.update(|a| a.reset());
                self.form.set(KraTemplateDto::default());
                self.error.set(None);
                true
            }
            Err(e) => {
                log::warn!("Template rejected: {}", e);
                self.error.set(Some(e));
                false
            }
        }
    }

    pub fn cancel_command(&self) {
        self.allocation.update(|a| a.reset());
        self.form.set(KraTemplateDto::default());
        self.search.set(String::new());
        self.error.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::mock_data::{self, dept_id, DEPT_ENGINEERING};

    #[test]
    fn test_parse_weight_input() {
        assert_eq!(parse_weight_input("40"), 40);
        assert_eq!(parse_weight_input(" 25 "), 25);
        assert_eq!(parse_weight_input("abc"), 0);
        assert_eq!(parse_weight_input(""), 0);
        // без ограничения диапазона
        assert_eq!(parse_weight_input("150"), 150);
        assert_eq!(parse_weight_input("-5"), -5);
    }

    #[test]
    fn test_ensure_unique_code() {
        let templates = mock_data::templates();
        assert!(ensure_unique_code("tpl-eng-ic", &templates).is_err());
        assert!(ensure_unique_code("TPL-NEW", &templates).is_ok());
    }

    #[test]
    fn test_catalogue_for_department() {
        let eng = dept_id(DEPT_ENGINEERING);
        let codes: Vec<String> = catalogue_for(mock_data::kras(), Some(eng), "")
            .into_iter()
            .map(|k| k.base.code)
            .collect();
        assert_eq!(
            codes,
            vec!["KRA-001", "KRA-002", "KRA-003", "KRA-004", "KRA-007", "KRA-008"]
        );
        assert_eq!(catalogue_for(mock_data::kras(), None, "").len(), 9);
    }

    #[test]
    fn test_builder_flow_produces_valid_template() {
        let kras = mock_data::kras();
        let mut allocation = WeightAllocation::new();
        for kra in kras.iter().take(3) {
            allocation.toggle(&kra.to_string_id(), kra.default_weight);
        }
        // 30 + 25 + 15
        assert!(!allocation.is_balanced());
        allocation.set_weight(&kras[2].to_string_id(), parse_weight_input("45"));
        assert!(allocation.is_balanced());

        let dto = KraTemplateDto {
            code: "TPL-ENG-SR".into(),
            description: "Senior engineer".into(),
            ..Default::default()
        };
        let template = KraTemplate::from_allocation(&dto, &allocation).unwrap();
        assert_eq!(template.items.len(), 3);
        assert_eq!(template.items[2].weight, 45);
    }
}
