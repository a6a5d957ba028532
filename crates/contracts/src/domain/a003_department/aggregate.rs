use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, Origin};

crate::uuid_aggregate_id!(
    /// Уникальный идентификатор подразделения
    DepartmentId
);

/// Подразделение компании
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    #[serde(flatten)]
    pub base: BaseAggregate<DepartmentId>,

    /// Руководитель подразделения (id пользователя)
    #[serde(rename = "headUserId")]
    pub head_user_id: Option<String>,

    #[serde(rename = "isActive")]
    pub is_active: bool,
}

impl Department {
    pub fn new_for_insert(code: String, description: String, head_user_id: Option<String>) -> Self {
        Self {
            base: BaseAggregate::new(DepartmentId::new_v4(), code, description),
            head_user_id,
            is_active: true,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn validate(&self) -> Result<(), String> {
        self.base.validate_base()
    }
}

impl AggregateRoot for Department {
    type Id = DepartmentId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "department"
    }

    fn element_name() -> &'static str {
        "Department"
    }

    fn list_name() -> &'static str {
        "Departments"
    }

    fn origin() -> Origin {
        Origin::Self_
    }
}
