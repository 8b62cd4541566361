//! A list of pets with pluggable selection behaviour.
//!
//! Front ends feed a [`PetList`] the pets they read from the store and supply
//! a [`PetSelection`] handler for the primary action (open or edit) and the
//! secondary action (typically delete).

use crate::{currency::format_fcfa, pet::Pet};

/// What happens when the user picks an item.
pub trait PetSelection {
  fn on_select(&mut self, pet: &Pet);
  fn on_select_secondary(&mut self, pet: &Pet);
}

/// One display line of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetRow {
  pub name:   String,
  pub breed:  String,
  pub price:  String,
  pub status: &'static str,
}

impl From<&Pet> for PetRow {
  fn from(pet: &Pet) -> Self {
    Self {
      name:   pet.name.clone(),
      breed:  pet.breed.clone(),
      price:  format_fcfa(pet.price),
      status: pet.status_label(),
    }
  }
}

pub struct PetList<H> {
  pets:    Vec<Pet>,
  handler: H,
}

impl<H: PetSelection> PetList<H> {
  pub fn new(pets: Vec<Pet>, handler: H) -> Self { Self { pets, handler } }

  /// Swap in a fresh result set, e.g. after a search.
  pub fn replace(&mut self, pets: Vec<Pet>) { self.pets = pets; }

  pub fn len(&self) -> usize { self.pets.len() }

  pub fn is_empty(&self) -> bool { self.pets.is_empty() }

  pub fn get(&self, index: usize) -> Option<&Pet> { self.pets.get(index) }

  pub fn iter(&self) -> impl Iterator<Item = &Pet> { self.pets.iter() }

  pub fn rows(&self) -> Vec<PetRow> { self.pets.iter().map(PetRow::from).collect() }

  /// Run the primary action on the item at `index`. Returns `false` if there
  /// is no such item.
  pub fn select(&mut self, index: usize) -> bool {
    match self.pets.get(index) {
      Some(pet) => {
        self.handler.on_select(pet);
        true
      }
      None => false,
    }
  }

  /// Run the secondary action on the item at `index`.
  pub fn select_secondary(&mut self, index: usize) -> bool {
    match self.pets.get(index) {
      Some(pet) => {
        self.handler.on_select_secondary(pet);
        true
      }
      None => false,
    }
  }

  pub fn handler(&self) -> &H { &self.handler }

  pub fn into_handler(self) -> H { self.handler }
}
