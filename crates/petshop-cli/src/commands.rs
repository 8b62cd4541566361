//! Subcommand implementations. [`run`] opens the store once; each command
//! then performs a single operation and prints the result.

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use petshop_core::{
  dashboard,
  form::{PetEdit, PetForm},
  listing::{PetList, PetSelection},
  paths::expand_tilde,
  pet::Pet,
  store::PetStore,
};
use petshop_store_sqlite::SqliteStore;

use crate::{Command, Pick, Resolved, ui};

pub async fn run(command: Command, cfg: &Resolved) -> Result<()> {
  let store = open_store(&cfg.store_path).await?;
  execute(&store, command, &cfg.business_name).await
}

async fn open_store(path: &Path) -> Result<SqliteStore> {
  let path = expand_tilde(path);
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("creating {}", parent.display()))?;
  }
  let store = SqliteStore::open(&path)
    .await
    .with_context(|| format!("opening store at {}", path.display()))?;
  tracing::debug!(path = %path.display(), "opened store");
  Ok(store)
}

async fn execute(store: &SqliteStore, command: Command, business_name: &str) -> Result<()> {
  match command {
    Command::Add { name, breed, price, details, image, sold } => {
      let form = PetForm {
        name,
        breed,
        price,
        details,
        image_uri: image,
        available: !sold,
      };
      let new = form.parse()?;
      let id = store.insert(new).await.context("adding pet")?;
      println!("Pet added with id {id}");
    }

    Command::List { pick } => {
      let pets = store.get_all().await.context("listing pets")?;
      pick_from(&store, pets, pick).await?;
    }

    Command::Search { query, pick } => {
      let pets = store.search(&query).await.context("searching pets")?;
      pick_from(&store, pets, pick).await?;
    }

    Command::Show { id } => {
      let pet = store
        .get(id)
        .await
        .context("reading pet")?
        .ok_or_else(|| anyhow!("no pet with id {id}"))?;
      print!("{}", ui::detail(&pet));
    }

    Command::Update { id, name, breed, price, details, image, available } => {
      let current = store
        .get(id)
        .await
        .context("reading pet")?
        .ok_or_else(|| anyhow!("no pet with id {id}"))?;

      let edit = PetEdit {
        name,
        breed,
        price,
        details,
        image_uri: image,
        available,
      };
      let pet = edit.apply(current)?;

      if store.update(pet).await.context("updating pet")? == 0 {
        bail!("no pet with id {id}");
      }
      println!("Pet updated successfully");
    }

    Command::Delete { id } => {
      if store.delete(id).await.context("deleting pet")? == 0 {
        bail!("no pet with id {id}");
      }
      println!("Pet deleted successfully");
    }

    Command::Clear { yes } => {
      if !yes {
        bail!("refusing to delete all data without --yes; this cannot be undone");
      }
      store.clear_all().await.context("clearing data")?;
      println!("All data cleared successfully");
    }

    Command::Dashboard => {
      let metrics = dashboard::load(store).await.context("updating metrics")?;
      print!("{}", ui::dashboard(business_name, &metrics));
    }
  }

  Ok(())
}

// ─── Row selection ────────────────────────────────────────────────────────────

/// Remembers which pet each action picked; the action itself runs after the
/// list has been printed.
#[derive(Default)]
struct Picked {
  open:   Option<Pet>,
  remove: Option<Pet>,
}

impl PetSelection for Picked {
  fn on_select(&mut self, pet: &Pet) { self.open = Some(pet.clone()); }

  fn on_select_secondary(&mut self, pet: &Pet) { self.remove = Some(pet.clone()); }
}

async fn pick_from(store: &SqliteStore, pets: Vec<Pet>, pick: Pick) -> Result<()> {
  let mut list = PetList::new(pets, Picked::default());
  print!("{}", ui::table(&list.rows()));

  if let Some(n) = pick.open
    && !n.checked_sub(1).is_some_and(|i| list.select(i))
  {
    bail!("no row {n}");
  }
  if let Some(n) = pick.remove
    && !n.checked_sub(1).is_some_and(|i| list.select_secondary(i))
  {
    bail!("no row {n}");
  }

  let picked = list.into_handler();
  if let Some(pet) = picked.open {
    println!();
    print!("{}", ui::detail(&pet));
  }
  if let Some(pet) = picked.remove {
    if !pick.yes {
      bail!("refusing to delete {} without --yes", pet.name);
    }
    if store.delete(pet.id).await.context("deleting pet")? == 0 {
      bail!("pet {} was already removed", pet.id);
    }
    println!("Deleted {}", pet.name);
  }
  Ok(())
}
