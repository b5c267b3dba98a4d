// Domain models shared across the client services
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
    pub avatar_letter: String,
    pub is_admin: bool,
}

impl Participant {
    pub fn new(name: &str) -> Self {
        let avatar_letter = name
            .chars()
            .find(|c| c.is_alphanumeric())
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string());
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            avatar_letter,
            is_admin: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Party {
    pub id: Uuid,
    pub title: String,
    pub date_range: String,
    pub participants: Vec<Participant>,
}

impl Party {
    /// Create a party. Duplicate participant ids are dropped (first entry
    /// wins) and the first participant is promoted when no admin is set.
    pub fn new(title: &str, date_range: &str, participants: Vec<Participant>) -> Self {
        let mut unique: Vec<Participant> = Vec::with_capacity(participants.len());
        for p in participants {
            if !unique.iter().any(|existing| existing.id == p.id) {
                unique.push(p);
            }
        }
        if !unique.is_empty() && !unique.iter().any(|p| p.is_admin) {
            unique[0].is_admin = true;
        }
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            date_range: date_range.to_string(),
            participants: unique,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bill {
    pub id: Uuid,
    pub title: String,
    pub creator: String,
    pub date: String,
    pub is_completed: bool,
}

impl Bill {
    pub fn new(title: &str, creator: &str, date: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            creator: creator.to_string(),
            date: date.to_string(),
            is_completed: false,
        }
    }

    /// Whether `nickname` may edit this bill's title and date. The caller
    /// passes the authenticated identity in; nothing is inferred here.
    pub fn is_editable_by(&self, nickname: &str) -> bool {
        self.creator == nickname
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price_per_unit: u32,
    pub total_quantity: u32,
    pub user_quantity: u32,
}

impl Product {
    /// Claim one more unit. No-op at the available-quantity cap.
    pub fn increment(&mut self) {
        if self.user_quantity < self.total_quantity {
            self.user_quantity += 1;
        }
    }

    /// Release one claimed unit. No-op at zero.
    pub fn decrement(&mut self) {
        if self.user_quantity > 0 {
            self.user_quantity -= 1;
        }
    }

    pub fn line_total(&self) -> u64 {
        u64::from(self.user_quantity) * u64::from(self.price_per_unit)
    }
}

/// Amount owed by the current user for `products`, in minor currency units.
pub fn bill_total(products: &[Product]) -> u64 {
    products.iter().map(Product::line_total).sum()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductFormError {
    #[error("price per unit is not a non-negative integer")]
    InvalidPrice,
    #[error("total quantity is not a non-negative integer")]
    InvalidQuantity,
}

/// Raw user-entered fields behind the add-product sheet.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub price_per_unit: String,
    pub total_quantity: String,
}

impl ProductForm {
    /// Build a product with nothing claimed yet. Rejects the whole form when
    /// either numeric field does not parse; no product is created then.
    pub fn build(&self) -> Result<Product, ProductFormError> {
        let price_per_unit: u32 = self
            .price_per_unit
            .trim()
            .parse()
            .map_err(|_| ProductFormError::InvalidPrice)?;
        let total_quantity: u32 = self
            .total_quantity
            .trim()
            .parse()
            .map_err(|_| ProductFormError::InvalidQuantity)?;
        Ok(Product {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            price_per_unit,
            total_quantity,
            user_quantity: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: u32, total: u32) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Chips".to_string(),
            price_per_unit: price,
            total_quantity: total,
            user_quantity: 0,
        }
    }

    #[test]
    fn total_of_empty_list_is_zero() {
        assert_eq!(bill_total(&[]), 0);
    }

    #[test]
    fn total_sums_claimed_quantities_times_price() {
        let mut a = product(50, 3);
        a.user_quantity = 2;
        let mut b = product(120, 5);
        b.user_quantity = 1;
        assert_eq!(bill_total(&[a, b]), 2 * 50 + 120);
    }

    #[test]
    fn increment_twice_claims_two_units() {
        let mut p = product(50, 3);
        p.increment();
        p.increment();
        assert_eq!(p.user_quantity, 2);
        assert_eq!(p.line_total(), 100);
    }

    #[test]
    fn increment_stops_at_total_quantity() {
        let mut p = product(10, 2);
        for _ in 0..5 {
            p.increment();
        }
        assert_eq!(p.user_quantity, 2);
        p.increment();
        assert_eq!(p.user_quantity, 2);
    }

    #[test]
    fn decrement_stops_at_zero() {
        let mut p = product(10, 2);
        p.decrement();
        assert_eq!(p.user_quantity, 0);
        p.increment();
        p.decrement();
        p.decrement();
        assert_eq!(p.user_quantity, 0);
    }

    #[test]
    fn quantity_stays_in_bounds_under_mixed_taps() {
        let mut p = product(30, 3);
        for step in [1, 1, -1, 1, 1, 1, 1, -1, -1, -1, -1, -1] {
            if step > 0 {
                p.increment();
            } else {
                p.decrement();
            }
            assert!(p.user_quantity <= p.total_quantity);
        }
        assert_eq!(p.user_quantity, 0);
    }

    #[test]
    fn form_with_valid_fields_builds_unclaimed_product() {
        let form = ProductForm {
            name: " Chips ".to_string(),
            price_per_unit: "50".to_string(),
            total_quantity: "3".to_string(),
        };
        let p = form.build().unwrap();
        assert_eq!(p.name, "Chips");
        assert_eq!(p.price_per_unit, 50);
        assert_eq!(p.total_quantity, 3);
        assert_eq!(p.user_quantity, 0);
    }

    #[test]
    fn form_with_non_numeric_price_is_rejected() {
        let form = ProductForm {
            name: "Chips".to_string(),
            price_per_unit: "abc".to_string(),
            total_quantity: "3".to_string(),
        };
        assert_eq!(form.build(), Err(ProductFormError::InvalidPrice));
    }

    #[test]
    fn form_with_negative_quantity_is_rejected() {
        let form = ProductForm {
            name: "Chips".to_string(),
            price_per_unit: "50".to_string(),
            total_quantity: "-1".to_string(),
        };
        assert_eq!(form.build(), Err(ProductFormError::InvalidQuantity));
    }

    #[test]
    fn party_promotes_first_participant_when_no_admin() {
        let party = Party::new(
            "Afterwork",
            "18.09-27.10",
            vec![Participant::new("@kiselik"), Participant::new("@honer")],
        );
        assert!(party.participants[0].is_admin);
        assert!(!party.participants[1].is_admin);
    }

    #[test]
    fn party_drops_duplicate_participant_ids() {
        let p = Participant::new("@kiselik");
        let party = Party::new("Afterwork", "18.09-27.10", vec![p.clone(), p]);
        assert_eq!(party.participants.len(), 1);
    }
}
