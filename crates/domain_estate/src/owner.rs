//! Owner aggregate and property lots

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{LotId, OwnerId, ThirdPartyId};

use crate::error::EstateError;

/// A co-owner of the condominium
///
/// Every owner is linked to a third-party reference used on ledger lines
/// posted to the jurisdiction's owner account. An owner carries zero or more
/// property lots; the sum of their lot shares is the owner's weight in the
/// general property, used by the year-end ventilation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Owner {
    /// Unique identifier
    pub id: OwnerId,
    /// Third-party reference carried on ledger lines
    pub third_party: ThirdPartyId,
    /// Display name
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    /// Contact email
    #[validate(email)]
    pub email: Option<String>,
    /// Property lots held by this owner
    pub lots: Vec<PropertyLot>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Owner {
    /// Creates a new owner with a fresh third-party reference
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: OwnerId::new_v7(),
            third_party: ThirdPartyId::new_v7(),
            name: name.into(),
            email: None,
            lots: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Sets the contact email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Adds a property lot
    pub fn add_lot(&mut self, lot: PropertyLot) {
        self.lots.push(lot);
    }

    /// Sum of the owner's lot shares (tantièmes of the general property)
    pub fn lot_shares(&self) -> Decimal {
        self.lots.iter().map(|l| l.shares).sum()
    }

    /// Validates the owner's contact data
    pub fn check(&self) -> Result<(), EstateError> {
        self.validate()
            .map_err(|e| EstateError::Validation(e.to_string()))
    }
}

/// A property lot with its share of the general property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyLot {
    /// Unique identifier
    pub id: LotId,
    /// Lot number as printed on the co-ownership regulation
    pub num: u32,
    /// Share weight of the general property (tantièmes)
    pub shares: Decimal,
    /// Free-form description
    pub description: Option<String>,
}

impl PropertyLot {
    /// Creates a new lot
    pub fn new(num: u32, shares: Decimal) -> Self {
        Self {
            id: LotId::new_v7(),
            num,
            shares,
            description: None,
        }
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
