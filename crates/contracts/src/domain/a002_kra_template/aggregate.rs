use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::error::TemplateError;
use crate::domain::a003_department::DepartmentId;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, Origin};
use crate::shared::weights::{WeightAllocation, FULL_WEIGHT};

crate::uuid_aggregate_id!(
    /// Уникальный идентификатор шаблона KRA
    KraTemplateId
);

/// Строка шаблона: KRA и назначенный ему вес
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KraTemplateItem {
    #[serde(rename = "kraId")]
    pub kra_id: String,
    pub weight: i32,
}

/// Шаблон KRA для назначения сотрудникам подразделения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KraTemplate {
    #[serde(flatten)]
    pub base: BaseAggregate<KraTemplateId>,

    #[serde(rename = "departmentId")]
    pub department_id: Option<DepartmentId>,

    /// Строки в порядке выбора
    pub items: Vec<KraTemplateItem>,
}

impl KraTemplate {
    /// Собрать шаблон из состояния конструктора.
    ///
    /// Распределение должно быть сбалансировано; строки сохраняют порядок выбора.
    pub fn from_allocation(
        dto: &KraTemplateDto,
        allocation: &WeightAllocation,
    ) -> Result<Self, TemplateError> {
        if dto.code.trim().is_empty() {
            return Err(TemplateError::MissingCode);
        }
        if dto.description.trim().is_empty() {
            return Err(TemplateError::MissingTitle);
        }

        let items: Vec<KraTemplateItem> = allocation
            .items()
            .map(|(kra_id, weight)| KraTemplateItem {
                kra_id: kra_id.to_string(),
                weight,
            })
            .collect();
        Self::validate_items(&items)?;

        let mut base = BaseAggregate::new(
            KraTemplateId::new_v4(),
            dto.code.trim().to_string(),
            dto.description.trim().to_string(),
        );
        base.comment = dto.comment.clone();

        Ok(Self {
            base,
            department_id: dto.department_id,
            items,
        })
    }

    /// Непустой список без повторов, сумма весов ровно 100
    pub fn validate_items(items: &[KraTemplateItem]) -> Result<(), TemplateError> {
        if items.is_empty() {
            return Err(TemplateError::Empty);
        }

        let mut seen = HashSet::new();
        for item in items {
            if !seen.insert(item.kra_id.as_str()) {
                return Err(TemplateError::DuplicateKra(item.kra_id.clone()));
            }
        }

        let total: i64 = items.iter().map(|i| i.weight as i64).sum();
        if total != FULL_WEIGHT as i64 {
            return Err(TemplateError::Unbalanced { total });
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        self.base.validate_base()?;
        Self::validate_items(&self.items).map_err(|e| e.to_string())
    }

    pub fn total_weight(&self) -> i64 {
        self.items.iter().map(|i| i.weight as i64).sum()
    }

    /// Восстановить состояние конструктора для редактирования шаблона
    pub fn to_allocation(&self) -> WeightAllocation {
        let mut allocation = WeightAllocation::new();
        for item in &self.items {
            allocation.toggle(&item.kra_id, item.weight);
        }
        allocation
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }
}

impl AggregateRoot for KraTemplate {
    type Id = KraTemplateId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "kra_template"
    }

    fn element_name() -> &'static str {
        "KRA Template"
    }

    fn list_name() -> &'static str {
        "KRA Templates"
    }

    fn origin() -> Origin {
        Origin::Self_
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Поля формы конструктора шаблона (без строк: они живут в `WeightAllocation`)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct KraTemplateDto {
    pub code: String,
    pub description: String,
    pub comment: Option<String>,

    #[serde(rename = "departmentId")]
    pub department_id: Option<DepartmentId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> KraTemplateDto {
        KraTemplateDto {
            code: "TPL-ENG".into(),
            description: "Engineering IC".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_balanced_allocation() {
        let mut alloc = WeightAllocation::new();
        alloc.toggle("kra-001", 0);
        alloc.toggle("kra-002", 0);
        alloc.toggle("kra-003", 0);
        alloc.auto_balance();

        let template = KraTemplate::from_allocation(&dto(), &alloc).unwrap();
        assert_eq!(template.items.len(), 3);
        assert_eq!(template.items[0].kra_id, "kra-001");
        assert_eq!(template.items[0].weight, 34);
        assert_eq!(template.total_weight(), 100);
        assert!(template.validate().is_ok());
    }

    #[test]
    fn test_unbalanced_allocation_rejected() {
        let mut alloc = WeightAllocation::new();
        alloc.toggle("kra-001", 30);
        alloc.toggle("kra-002", 30);
        assert_eq!(
            KraTemplate::from_allocation(&dto(), &alloc).unwrap_err(),
            TemplateError::Unbalanced { total: 60 }
        );
    }

    #[test]
    fn test_empty_allocation_rejected() {
        let alloc = WeightAllocation::new();
        assert_eq!(
            KraTemplate::from_allocation(&dto(), &alloc).unwrap_err(),
            TemplateError::Empty
        );
    }

    #[test]
    fn test_form_fields_required() {
        let mut alloc = WeightAllocation::new();
        alloc.toggle("kra-001", 100);

        let mut form = dto();
        form.code = " ".into();
        assert_eq!(
            KraTemplate::from_allocation(&form, &alloc).unwrap_err(),
            TemplateError::MissingCode
        );

        let mut form = dto();
        form.description.clear();
        assert_eq!(
            KraTemplate::from_allocation(&form, &alloc).unwrap_err(),
            TemplateError::MissingTitle
        );
    }

    #[test]
    fn test_duplicate_items_rejected() {
        let items = vec![
            KraTemplateItem { kra_id: "a".into(), weight: 50 },
            KraTemplateItem { kra_id: "a".into(), weight: 50 },
        ];
        assert_eq!(
            KraTemplate::validate_items(&items).unwrap_err(),
            TemplateError::DuplicateKra("a".into())
        );
    }

    #[test]
    fn test_round_trip_to_allocation() {
        let mut alloc = WeightAllocation::new();
        alloc.toggle("kra-002", 60);
        alloc.toggle("kra-001", 40);
        let template = KraTemplate::from_allocation(&dto(), &alloc).unwrap();
        assert_eq!(template.to_allocation(), alloc);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TemplateError::Unbalanced { total: 90 }.to_string(),
            "KRA weights must add up to 100%, currently 90%"
        );
    }
}
