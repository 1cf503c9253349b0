use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    pub id: String,
    /// Display name. Freshly added roster rows have an empty name until edited.
    pub name: String,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Participant {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }
}
