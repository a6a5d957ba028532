use serde::{Deserialize, Serialize};

use crate::domain::a003_department::DepartmentId;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, Origin};

// ============================================================================
// ID Type
// ============================================================================

crate::uuid_aggregate_id!(
    /// Уникальный идентификатор KRA
    KraId
);

// ============================================================================
// Category
// ============================================================================

/// Направление, к которому относится KRA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KraCategory {
    #[default]
    Delivery,
    Quality,
    People,
    Growth,
    Customer,
}

impl KraCategory {
    pub const ALL: [KraCategory; 5] = [
        KraCategory::Delivery,
        KraCategory::Quality,
        KraCategory::People,
        KraCategory::Growth,
        KraCategory::Customer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            KraCategory::Delivery => "Delivery",
            KraCategory::Quality => "Quality",
            KraCategory::People => "People",
            KraCategory::Growth => "Growth",
            KraCategory::Customer => "Customer",
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Key Result Area: критерий оценки с весом по умолчанию
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kra {
    #[serde(flatten)]
    pub base: BaseAggregate<KraId>,

    #[serde(rename = "departmentId")]
    pub department_id: Option<DepartmentId>,

    pub category: KraCategory,

    /// Вес, который получает KRA при добавлении в шаблон (0-100)
    #[serde(rename = "defaultWeight")]
    pub default_weight: i32,
}

impl Kra {
    pub fn new_for_insert(
        code: String,
        description: String,
        department_id: Option<DepartmentId>,
        category: KraCategory,
        default_weight: i32,
    ) -> Self {
        Self {
            base: BaseAggregate::new(KraId::new_v4(), code, description),
            department_id,
            category,
            default_weight,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &KraDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.department_id = dto.department_id;
        self.category = dto.category;
        self.default_weight = dto.default_weight;
        self.base.touch();
    }

    pub fn validate(&self) -> Result<(), String> {
        self.base.validate_base()?;
        if !(0..=100).contains(&self.default_weight) {
            return Err("Default weight must be within 0-100".into());
        }
        Ok(())
    }
}

impl AggregateRoot for Kra {
    type Id = KraId;

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
        "a001"
    }

    fn collection_name() -> &'static str {
        "kra"
    }

    fn element_name() -> &'static str {
        "KRA"
    }

    fn list_name() -> &'static str {
        "Key Result Areas"
    }

    fn origin() -> Origin {
        Origin::Self_
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления KRA
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KraDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,

    #[serde(rename = "departmentId")]
    pub department_id: Option<DepartmentId>,

    pub category: KraCategory,

    #[serde(rename = "defaultWeight")]
    pub default_weight: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Kra {
        Kra::new_for_insert(
            "KRA-001".into(),
            "Revenue growth".into(),
            None,
            KraCategory::Growth,
            25,
        )
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_default_weight() {
        let mut kra = sample();
        kra.default_weight = 101;
        assert!(kra.validate().is_err());
        kra.default_weight = -1;
        assert!(kra.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        let mut kra = sample();
        kra.base.description = "  ".into();
        assert!(kra.validate().is_err());
    }

    #[test]
    fn test_update_from_dto() {
        let mut kra = sample();
        let dto = KraDto {
            code: Some("KRA-100".into()),
            description: "Customer satisfaction".into(),
            category: KraCategory::Customer,
            default_weight: 40,
            ..Default::default()
        };
        kra.update(&dto);
        assert_eq!(kra.code(), "KRA-100");
        assert_eq!(kra.category, KraCategory::Customer);
        assert_eq!(kra.default_weight, 40);
        assert_eq!(kra.metadata().version, 1);
    }

    #[test]
    fn test_full_name() {
        assert_eq!(Kra::full_name(), "a001_kra");
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["code"], "KRA-001");
        assert_eq!(json["defaultWeight"], 25);
        assert_eq!(json["category"], "growth");
    }
}
