use serde::{Deserialize, Serialize};

/// What a campaign measures its targets in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    #[default]
    Quantity,
    Value,
}

impl GoalType {
    /// Storage code
    pub fn code(&self) -> &'static str {
        match self {
            GoalType::Quantity => "quantity",
            GoalType::Value => "value",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GoalType::Quantity => "Quantity",
            GoalType::Value => "Value",
        }
    }

    pub fn all() -> Vec<GoalType> {
        vec![GoalType::Quantity, GoalType::Value]
    }

    /// Accepts the storage code as well as the legacy Portuguese codes
    /// still present in imported rows.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "quantity" | "quantidade" => Some(GoalType::Quantity),
            "value" | "valor" => Some(GoalType::Value),
            _ => None,
        }
    }

    /// Pick the figure matching this goal type out of a (quantity, value) pair
    pub fn select(&self, quantity: f64, value: f64) -> f64 {
        match self {
            GoalType::Quantity => quantity,
            GoalType::Value => value,
        }
    }
}

impl std::fmt::Display for GoalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_accepts_legacy_codes() {
        assert_eq!(GoalType::from_code("quantidade"), Some(GoalType::Quantity));
        assert_eq!(GoalType::from_code("Valor"), Some(GoalType::Value));
        assert_eq!(GoalType::from_code("value"), Some(GoalType::Value));
        assert_eq!(GoalType::from_code("units"), None);
    }

    #[test]
    fn test_select() {
        assert_eq!(GoalType::Quantity.select(3.0, 40.0), 3.0);
        assert_eq!(GoalType::Value.select(3.0, 40.0), 40.0);
    }
}
