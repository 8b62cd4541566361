//! Raw text input for adding or editing a pet.
//!
//! Entry screens collect strings; [`PetForm::parse`] turns them into a typed
//! [`NewPet`] or reports which field is wrong, and [`PetEdit::apply`] changes
//! only the fields a user actually supplied. The store never validates.

use crate::{
  Error, Result,
  pet::{NewPet, Pet},
};

/// Unvalidated field values as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct PetForm {
  pub name:      String,
  pub breed:     String,
  pub price:     String,
  pub details:   String,
  pub image_uri: Option<String>,
  pub available: bool,
}

impl PetForm {
  pub fn parse(&self) -> Result<NewPet> {
    let name = required("name", &self.name)?;
    let breed = required("breed", &self.breed)?;
    let price = parse_price(&self.price)?;

    Ok(NewPet {
      name,
      breed,
      price,
      available: self.available,
      details: non_empty(&self.details),
      image_uri: self.image_uri.as_deref().and_then(non_empty),
    })
  }
}

/// A partial edit of a stored pet. `None` keeps the stored value untouched,
/// even if it would not pass [`PetForm::parse`] today.
#[derive(Debug, Clone, Default)]
pub struct PetEdit {
  pub name:      Option<String>,
  pub breed:     Option<String>,
  pub price:     Option<String>,
  /// `Some("")` clears the details.
  pub details:   Option<String>,
  /// `Some("")` clears the image reference.
  pub image_uri: Option<String>,
  pub available: Option<bool>,
}

impl PetEdit {
  pub fn apply(self, mut pet: Pet) -> Result<Pet> {
    if let Some(name) = self.name {
      pet.name = required("name", &name)?;
    }
    if let Some(breed) = self.breed {
      pet.breed = required("breed", &breed)?;
    }
    if let Some(price) = self.price {
      pet.price = parse_price(&price)?;
    }
    if let Some(details) = self.details {
      pet.details = non_empty(&details);
    }
    if let Some(uri) = self.image_uri {
      pet.image_uri = non_empty(&uri);
    }
    if let Some(available) = self.available {
      pet.available = available;
    }
    Ok(pet)
  }
}

fn required(field: &'static str, text: &str) -> Result<String> {
  non_empty(text).ok_or(Error::MissingField(field))
}

fn parse_price(text: &str) -> Result<f64> {
  let text = text.trim();
  if text.is_empty() {
    return Err(Error::MissingField("price"));
  }
  let price: f64 = text
    .parse()
    .map_err(|_| Error::InvalidPrice(text.to_owned()))?;
  if !price.is_finite() || price < 0.0 {
    return Err(Error::InvalidPrice(text.to_owned()));
  }
  Ok(price)
}

fn non_empty(s: &str) -> Option<String> {
  let s = s.trim();
  (!s.is_empty()).then(|| s.to_owned())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn form(name: &str, breed: &str, price: &str) -> PetForm {
    PetForm {
      name: name.into(),
      breed: breed.into(),
      price: price.into(),
      available: true,
      ..Default::default()
    }
  }

  #[test]
  fn parses_and_trims() {
    let mut f = form("  Rex ", "Labrador", " 150 ");
    f.details = "  friendly ".into();
    f.image_uri = Some("content://media/42".into());
    let pet = f.parse().unwrap();
    assert_eq!(pet.name, "Rex");
    assert_eq!(pet.price, 150.0);
    assert_eq!(pet.details.as_deref(), Some("friendly"));
    assert_eq!(pet.image_uri.as_deref(), Some("content://media/42"));
    assert!(pet.available);
  }

  #[test]
  fn required_fields() {
    assert!(matches!(form("", "Lab", "1").parse(), Err(Error::MissingField("name"))));
    assert!(matches!(form("Rex", " ", "1").parse(), Err(Error::MissingField("breed"))));
    assert!(matches!(form("Rex", "Lab", "").parse(), Err(Error::MissingField("price"))));
  }

  #[test]
  fn bad_prices() {
    for price in ["abc", "-5", "inf", "NaN", "1,5"] {
      assert!(
        matches!(form("Rex", "Lab", price).parse(), Err(Error::InvalidPrice(_))),
        "{price} should be rejected"
      );
    }
  }

  #[test]
  fn blank_optionals_become_none() {
    let mut f = form("Rex", "Lab", "10");
    f.details = "   ".into();
    f.image_uri = Some(String::new());
    let pet = f.parse().unwrap();
    assert_eq!(pet.details, None);
    assert_eq!(pet.image_uri, None);
  }

  // ── Edits ─────────────────────────────────────────────────────────────────

  fn stored() -> Pet {
    let mut pet = NewPet::new("Rex", "Labrador", 150.0).with_id(7);
    pet.details = Some("  spaced  ".into());
    pet.image_uri = Some("content://media/42".into());
    pet
  }

  #[test]
  fn empty_edit_keeps_stored_values_verbatim() {
    assert_eq!(PetEdit::default().apply(stored()).unwrap(), stored());
  }

  #[test]
  fn edit_changes_only_supplied_fields() {
    let edit = PetEdit {
      price: Some(" 200 ".into()),
      available: Some(false),
      ..Default::default()
    };
    let pet = edit.apply(stored()).unwrap();
    assert_eq!(pet.price, 200.0);
    assert!(!pet.available);
    assert_eq!(pet.name, "Rex");
    assert_eq!(pet.details.as_deref(), Some("  spaced  "));
    assert_eq!(pet.id, 7);
  }

  #[test]
  fn edit_tolerates_blank_stored_name() {
    let mut pet = stored();
    pet.name = String::new();
    let edit = PetEdit { available: Some(false), ..Default::default() };
    assert_eq!(edit.apply(pet).unwrap().name, "");
  }

  #[test]
  fn edit_validates_supplied_fields() {
    let blank = PetEdit { name: Some("  ".into()), ..Default::default() };
    assert!(matches!(blank.apply(stored()), Err(Error::MissingField("name"))));

    let negative = PetEdit { price: Some("-1".into()), ..Default::default() };
    assert!(matches!(negative.apply(stored()), Err(Error::InvalidPrice(_))));
  }

  #[test]
  fn edit_clears_optionals_with_blank_text() {
    let edit = PetEdit {
      details: Some(String::new()),
      image_uri: Some(" ".into()),
      ..Default::default()
    };
    let pet = edit.apply(stored()).unwrap();
    assert_eq!(pet.details, None);
    assert_eq!(pet.image_uri, None);
  }
}
