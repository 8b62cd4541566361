//! Display formatting for prices and revenue.
//!
//! Amounts are kept in CFA francs, which have no minor unit in everyday use.

/// Format `amount` as whole francs with comma thousands separators,
/// e.g. `1500.0` becomes `"1,500 FCFA"`.
pub fn format_fcfa(amount: f64) -> String {
  let rounded = amount.round();
  let negative = rounded < 0.0;
  let digits = format!("{:.0}", rounded.abs());

  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(ch);
  }

  if negative {
    format!("-{grouped} FCFA")
  } else {
    format!("{grouped} FCFA")
  }
}
