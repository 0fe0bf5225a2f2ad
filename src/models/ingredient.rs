use serde::{Deserialize, Serialize};

use super::{amount_or_default, default_amount, default_name, name_or_default};

/// Total quantity of one ingredient required by the planned menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientDemand {
    #[serde(default = "default_name", deserialize_with = "name_or_default")]
    pub name: String,

    #[serde(default = "default_amount", deserialize_with = "amount_or_default")]
    pub amount_needed: f64,
}

impl IngredientDemand {
    pub fn new(name: impl Into<String>, amount_needed: f64) -> Self {
        Self {
            name: name.into(),
            amount_needed,
        }
    }
}

/// Stock of one ingredient in a pantry snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryEntry {
    #[serde(default = "default_name", deserialize_with = "name_or_default")]
    pub name: String,

    #[serde(default = "default_amount", deserialize_with = "amount_or_default")]
    pub amount_on_hand: f64,
}

impl PantryEntry {
    pub fn new(name: impl Into<String>, amount_on_hand: f64) -> Self {
        Self {
            name: name.into(),
            amount_on_hand,
        }
    }
}

/// Demand joined with stock. `have` stays 0 when the pantry lacks the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledNeed {
    pub name: String,
    pub need: f64,
    #[serde(default)]
    pub have: f64,
}

impl ReconciledNeed {
    pub fn new(name: impl Into<String>, need: f64, have: f64) -> Self {
        Self {
            name: name.into(),
            need,
            have,
        }
    }

    /// Positive shortfall, floored at zero.
    #[inline]
    pub fn deficit(&self) -> f64 {
        (self.need - self.have).max(0.0)
    }
}

impl From<&IngredientDemand> for ReconciledNeed {
    fn from(demand: &IngredientDemand) -> Self {
        Self::new(demand.name.clone(), demand.amount_needed, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let entry: PantryEntry = serde_json::from_str("{}").unwrap();
        assert_eq!(entry.name, "unnamed");
        assert_eq!(entry.amount_on_hand, 0.0);

        let demand: IngredientDemand = serde_json::from_str(r#"{"name": "Leek"}"#).unwrap();
        assert_eq!(demand.name, "Leek");
        assert_eq!(demand.amount_needed, 0.0);
    }

    #[test]
    fn test_null_fields_use_defaults() {
        let entry: PantryEntry =
            serde_json::from_str(r#"{"name": "Milk", "amountOnHand": null}"#).unwrap();
        assert_eq!(entry.name, "Milk");
        assert_eq!(entry.amount_on_hand, 0.0);

        let demand: IngredientDemand =
            serde_json::from_str(r#"{"name": null, "amountNeeded": 3}"#).unwrap();
        assert_eq!(demand.name, "unnamed");
        assert_eq!(demand.amount_needed, 3.0);
    }

    #[test]
    fn test_camel_case_wire_names() {
        let demand: IngredientDemand =
            serde_json::from_str(r#"{"name": "Carrot", "amountNeeded": 2.5}"#).unwrap();
        assert_eq!(demand.amount_needed, 2.5);

        let json = serde_json::to_value(PantryEntry::new("Yogurt", 2.0)).unwrap();
        assert_eq!(json["amountOnHand"], 2.0);
    }

    #[test]
    fn test_deficit_floors_at_zero() {
        assert_eq!(ReconciledNeed::new("Carrot", 1.0, 3.0).deficit(), 0.0);
        assert_eq!(ReconciledNeed::new("Yogurt", 4.0, 2.0).deficit(), 2.0);
    }
}
