//! Search criteria and their boolean combination policy.
//!
//! # Invariants
//! - Address criteria always AND street, postal code and city together.
//! - Multi-criteria search ORs the cuisine group, the name match and the
//!   address group, and yields nothing when no cuisine type is selected.
//!   Filling in more fields widens the result rather than narrowing it.

use crate::model::cuisine_type::CuisineTypeId;
use crate::search::predicate::Predicate;
use serde::{Deserialize, Serialize};

/// Column of `proposes` used in cuisine membership checks.
pub(crate) const PROPOSES_CUISINE_COLUMN: &str = "p.cuisine_type_id";

/// Substring filters over a restaurant address.
///
/// Empty fields match every restaurant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressCriteria {
    pub street: String,
    pub postal_code: String,
    pub city: String,
}

impl AddressCriteria {
    pub fn new(
        street: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            postal_code: postal_code.into(),
            city: city.into(),
        }
    }

    /// `street AND postal_code AND city` substring group.
    pub fn to_predicate(&self) -> Predicate {
        Predicate::all_of(
            Predicate::contains("r.street_name", &self.street),
            [
                Predicate::contains("r.postal_code", &self.postal_code),
                Predicate::contains("r.city", &self.city),
            ],
        )
    }
}

/// Combined search form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiCriteria {
    pub name: String,
    pub address: AddressCriteria,
    pub cuisine_type_ids: Vec<CuisineTypeId>,
}

impl MultiCriteria {
    /// Builds `cuisine OR name OR address`.
    ///
    /// Returns `None` when `cuisine_type_ids` is empty; the search then has
    /// no results, whatever the other fields hold.
    pub fn to_predicate(&self) -> Option<Predicate> {
        let cuisine = Predicate::id_in(PROPOSES_CUISINE_COLUMN, &self.cuisine_type_ids)?;
        Some(Predicate::any_of(
            cuisine,
            [
                Predicate::contains("r.name", &self.name),
                self.address.to_predicate(),
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{AddressCriteria, MultiCriteria};

    #[test]
    fn empty_cuisine_selection_yields_no_predicate() {
        let criteria = MultiCriteria {
            name: "burger".to_string(),
            address: AddressCriteria::new("", "44000", ""),
            cuisine_type_ids: Vec::new(),
        };
        assert!(criteria.to_predicate().is_none());
    }

    #[test]
    fn multi_criteria_ors_groups_and_ands_address() {
        let criteria = MultiCriteria {
            name: "central".to_string(),
            address: AddressCriteria::new("rue", "44", "Nantes"),
            cuisine_type_ids: vec![2, 5],
        };
        let predicate = criteria.to_predicate().unwrap();
        let sql = predicate.sql();

        assert!(sql.starts_with("(p.cuisine_type_id IN (?, ?) OR r.name LIKE ?"));
        assert!(sql.contains(
            "OR (r.street_name LIKE ? ESCAPE '\\' AND r.postal_code LIKE ? ESCAPE '\\' AND r.city LIKE ? ESCAPE '\\')"
        ));
        assert_eq!(predicate.params().len(), 6);
    }
}
