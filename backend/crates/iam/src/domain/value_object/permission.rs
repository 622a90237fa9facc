use serde::{Deserialize, Serialize};
use std::fmt;

/// Fine-grained catalog permission carried on the user and inside access
/// tokens. Stored and serialized by code (`create_coffee`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    CreateCoffee,
    UpdateCoffee,
    DeleteCoffee,
}

impl Permission {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Permission::CreateCoffee => "create_coffee",
            Permission::UpdateCoffee => "update_coffee",
            Permission::DeleteCoffee => "delete_coffee",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "create_coffee" => Some(Permission::CreateCoffee),
            "update_coffee" => Some(Permission::UpdateCoffee),
            "delete_coffee" => Some(Permission::DeleteCoffee),
            _ => None,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
