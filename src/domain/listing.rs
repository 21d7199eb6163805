//! Listing domain types.
//!
//! These types are independent of both the HTTP DTOs and the storage rows.
//! Repos convert rows into `Listing`; handlers convert DTOs into
//! `NewListing` / `ListingPatch`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Computers,
    Phones,
    Tablets,
    Monitors,
    Peripherals,
    Components,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    New,
    LikeNew,
    Good,
    Fair,
    ForParts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListingStatus {
    #[default]
    Available,
    Pending,
    Sold,
}

/// Stored value did not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! text_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

text_enum!(Category, "category", {
    Computers => "computers",
    Phones => "phones",
    Tablets => "tablets",
    Monitors => "monitors",
    Peripherals => "peripherals",
    Components => "components",
    Other => "other",
});

text_enum!(Condition, "condition", {
    New => "new",
    LikeNew => "like-new",
    Good => "good",
    Fair => "fair",
    ForParts => "for-parts",
});

text_enum!(ListingStatus, "status", {
    Available => "available",
    Pending => "pending",
    Sold => "sold",
});

/// A validated, non-negative, finite price.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Price(f64);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    #[error("price must be a number")]
    NotANumber,
    #[error("price must not be negative")]
    Negative,
}

impl Price {
    pub fn new(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::NotANumber);
        }
        if value < 0.0 {
            return Err(PriceError::Negative);
        }
        Ok(Self(value))
    }

    /// Coerce a numeric string (`"300"`, `" 12.50 "`).
    pub fn parse(raw: &str) -> Result<Self, PriceError> {
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| PriceError::NotANumber)?;
        Self::new(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub condition: Condition,
    pub price: Price,
    pub images: Vec<String>,
    pub seller_id: Uuid,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.seller_id == user_id
    }

    /// Overwrite every field the patch carries. The seller is not part of
    /// the patch, so ownership survives any update.
    pub fn apply(&mut self, patch: ListingPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(condition) = patch.condition {
            self.condition = condition;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Everything needed to create a listing. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub condition: Condition,
    pub price: Price,
    pub images: Vec<String>,
    pub seller_id: Uuid,
    pub status: ListingStatus,
}

/// Explicit-presence partial update: `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub condition: Option<Condition>,
    pub price: Option<Price>,
    pub images: Option<Vec<String>>,
    pub status: Option<ListingStatus>,
}

impl ListingPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Public projection of the seller attached to listing responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerProjection {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl SellerProjection {
    pub fn unresolved(id: Uuid) -> Self {
        Self {
            id,
            name: None,
            email: None,
        }
    }
}

/// A listing together with its resolved seller.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingView {
    pub listing: Listing,
    pub seller: SellerProjection,
}

/// Per-seller dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SellerStats {
    pub total_listings: i64,
    pub active_listings: i64,
    pub sold_listings: i64,
    pub total_value: f64,
}
