//! Dashboard metrics derived from the store's aggregate queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{InventoryCounts, PetStore};

/// Available counts below this are flagged as low stock.
pub const LOW_STOCK_THRESHOLD: u64 = 5;

/// Presentation-ready summary of the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
  pub total:              u64,
  pub available:          u64,
  pub sold:               u64,
  pub revenue:            f64,
  /// `sold / total * 100`, or 0 for an empty store.
  pub percent_sold:       f64,
  /// `revenue / sold`, or 0 when nothing has been sold.
  pub average_sold_price: f64,
  /// The available count when it is below [`LOW_STOCK_THRESHOLD`], else 0.
  pub low_stock:          u64,
  pub generated_at:       DateTime<Utc>,
}

impl DashboardMetrics {
  pub fn from_counts(counts: InventoryCounts, generated_at: DateTime<Utc>) -> Self {
    let percent_sold = if counts.total > 0 {
      counts.sold as f64 / counts.total as f64 * 100.0
    } else {
      0.0
    };

    // Guarded on `sold`, not `total`: a store with pets but no sales must not
    // divide by zero.
    let average_sold_price = if counts.sold > 0 {
      counts.revenue / counts.sold as f64
    } else {
      0.0
    };

    let low_stock = if counts.available < LOW_STOCK_THRESHOLD {
      counts.available
    } else {
      0
    };

    Self {
      total: counts.total,
      available: counts.available,
      sold: counts.sold,
      revenue: counts.revenue,
      percent_sold,
      average_sold_price,
      low_stock,
      generated_at,
    }
  }

  /// Whether the low-stock alert should be shown.
  pub fn is_low_stock(&self) -> bool { self.available < LOW_STOCK_THRESHOLD }
}

/// Read the current aggregates from `store` and build the dashboard.
pub async fn load<S: PetStore>(store: &S) -> Result<DashboardMetrics, S::Error> {
  let counts = store.counts().await?;
  Ok(DashboardMetrics::from_counts(counts, Utc::now()))
}
