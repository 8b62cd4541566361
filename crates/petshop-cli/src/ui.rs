//! Plain-text rendering for list, detail and dashboard output.

use std::fmt::Write as _;

use chrono::Local;
use petshop_core::{
  currency::format_fcfa,
  dashboard::{DashboardMetrics, LOW_STOCK_THRESHOLD},
  listing::PetRow,
  pet::Pet,
};

// ─── List ─────────────────────────────────────────────────────────────────────

pub fn table(rows: &[PetRow]) -> String {
  if rows.is_empty() {
    return "No pets found.\n".to_string();
  }

  let name_w = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0).max(4);
  let breed_w = rows.iter().map(|r| r.breed.chars().count()).max().unwrap_or(0).max(5);
  let price_w = rows.iter().map(|r| r.price.chars().count()).max().unwrap_or(0).max(5);

  let mut out = String::new();
  let _ = writeln!(
    out,
    "{:>3}  {:<name_w$}  {:<breed_w$}  {:>price_w$}  Status",
    "#", "Name", "Breed", "Price"
  );
  for (i, r) in rows.iter().enumerate() {
    let _ = writeln!(
      out,
      "{:>3}  {:<name_w$}  {:<breed_w$}  {:>price_w$}  {}",
      i + 1,
      r.name,
      r.breed,
      r.price,
      r.status
    );
  }
  out
}

// ─── Detail ───────────────────────────────────────────────────────────────────

pub fn detail(pet: &Pet) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "Id:      {}", pet.id);
  let _ = writeln!(out, "Name:    {}", pet.name);
  let _ = writeln!(out, "Breed:   {}", pet.breed);
  let _ = writeln!(out, "Price:   {}", format_fcfa(pet.price));
  let _ = writeln!(out, "Status:  {}", pet.status_label());
  if let Some(details) = &pet.details {
    let _ = writeln!(out, "Details: {details}");
  }
  if let Some(uri) = &pet.image_uri {
    let _ = writeln!(out, "Image:   {uri}");
  }
  out
}

// ─── Dashboard ────────────────────────────────────────────────────────────────

pub fn dashboard(business_name: &str, m: &DashboardMetrics) -> String {
  let updated = m.generated_at.with_timezone(&Local).format("%b %d, %Y %H:%M");

  let mut out = String::new();
  let _ = writeln!(out, "{business_name}");
  let _ = writeln!(out, "Last updated: {updated}");
  let _ = writeln!(out);
  let _ = writeln!(out, "Total pets:  {:<6} {:.1}% sold", m.total, m.percent_sold);
  let _ = writeln!(out, "In stock:    {:<6} Pets available", m.available);
  let _ = writeln!(
    out,
    "Revenue:     {}  (Avg. {} per pet)",
    format_fcfa(m.revenue),
    format_fcfa(m.average_sold_price)
  );
  let _ = writeln!(out, "Low stock:   {}", m.low_stock);
  if m.is_low_stock() {
    let _ = writeln!(out, "  fewer than {LOW_STOCK_THRESHOLD} pets available");
  }
  out
}
