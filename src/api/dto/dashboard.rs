use serde::Serialize;

use crate::domain::SellerStats;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_listings: i64,
    pub active_listings: i64,
    pub sold_listings: i64,
    // Two decimals, as a string.
    pub total_value: String,
}

impl From<SellerStats> for StatsResponse {
    fn from(s: SellerStats) -> Self {
        Self {
            total_listings: s.total_listings,
            active_listings: s.active_listings,
            sold_listings: s.sold_listings,
            total_value: format!("{:.2}", s.total_value),
        }
    }
}
