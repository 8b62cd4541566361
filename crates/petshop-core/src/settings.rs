//! User preferences with change notification.
//!
//! [`Settings`] owns the current [`Preferences`] and publishes a
//! [`PreferenceChange`] on an injected broadcast channel whenever a value
//! actually changes. Persisting preferences is the caller's concern.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use tokio::sync::{broadcast, watch};

use crate::{Error, Result};

/// Capacity used by [`Settings::with_channel`].
pub const CHANGE_CHANNEL_CAPACITY: usize = 16;

// ─── Values ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
  pub dark_mode:     bool,
  pub notifications: bool,
  pub business_name: String,
}

impl Default for Preferences {
  fn default() -> Self {
    Self {
      dark_mode:     false,
      notifications: true,
      business_name: "Pet Store".to_owned(),
    }
  }
}

impl Preferences {
  /// Apply `change` in place. Returns `true` if the value differed.
  pub fn apply(&mut self, change: &PreferenceChange) -> bool {
    match change {
      PreferenceChange::DarkMode(v) => replace_if_changed(&mut self.dark_mode, v),
      PreferenceChange::Notifications(v) => {
        replace_if_changed(&mut self.notifications, v)
      }
      PreferenceChange::BusinessName(v) => {
        replace_if_changed(&mut self.business_name, v)
      }
    }
  }

  /// The changes that would turn `self` into `target`.
  pub fn diff(&self, target: &Preferences) -> Vec<PreferenceChange> {
    let mut changes = Vec::new();
    if self.dark_mode != target.dark_mode {
      changes.push(PreferenceChange::DarkMode(target.dark_mode));
    }
    if self.notifications != target.notifications {
      changes.push(PreferenceChange::Notifications(target.notifications));
    }
    if self.business_name != target.business_name {
      changes.push(PreferenceChange::BusinessName(target.business_name.clone()));
    }
    changes
  }
}

fn replace_if_changed<T: PartialEq + Clone>(slot: &mut T, value: &T) -> bool {
  if slot == value {
    return false;
  }
  *slot = value.clone();
  true
}

// ─── Keys and changes ────────────────────────────────────────────────────────

/// String keys under which preferences are addressed.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum PreferenceKey {
  DarkMode,
  Notifications,
  BusinessName,
}

/// A single preference set to a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "snake_case")]
pub enum PreferenceChange {
  DarkMode(bool),
  Notifications(bool),
  BusinessName(String),
}

impl PreferenceChange {
  pub fn key(&self) -> PreferenceKey {
    match self {
      PreferenceChange::DarkMode(_) => PreferenceKey::DarkMode,
      PreferenceChange::Notifications(_) => PreferenceKey::Notifications,
      PreferenceChange::BusinessName(_) => PreferenceKey::BusinessName,
    }
  }

  /// Build a change from a string key and raw value.
  pub fn parse(key: &str, value: &str) -> Result<Self> {
    let key = PreferenceKey::from_str(key)
      .map_err(|_| Error::UnknownPreference(key.to_owned()))?;

    let flag = |value: &str| -> Result<bool> {
      value.trim().parse().map_err(|_| Error::InvalidPreferenceValue {
        key:   key.into(),
        value: value.to_owned(),
      })
    };

    Ok(match key {
      PreferenceKey::DarkMode => PreferenceChange::DarkMode(flag(value)?),
      PreferenceKey::Notifications => PreferenceChange::Notifications(flag(value)?),
      PreferenceKey::BusinessName => PreferenceChange::BusinessName(value.trim().to_owned()),
    })
  }
}

/// Partial update body: absent fields are left untouched. Unknown keys are
/// rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreferencesPatch {
  pub dark_mode:     Option<bool>,
  pub notifications: Option<bool>,
  pub business_name: Option<String>,
}

impl PreferencesPatch {
  pub fn into_changes(self) -> Vec<PreferenceChange> {
    let mut changes = Vec::new();
    if let Some(v) = self.dark_mode {
      changes.push(PreferenceChange::DarkMode(v));
    }
    if let Some(v) = self.notifications {
      changes.push(PreferenceChange::Notifications(v));
    }
    if let Some(v) = self.business_name {
      changes.push(PreferenceChange::BusinessName(v.trim().to_owned()));
    }
    changes
  }
}

// ─── Settings ────────────────────────────────────────────────────────────────

/// Live preferences shared by every front end.
pub struct Settings {
  state:  watch::Sender<Preferences>,
  notify: broadcast::Sender<PreferenceChange>,
}

impl Settings {
  pub fn new(initial: Preferences, notify: broadcast::Sender<PreferenceChange>) -> Self {
    Self { state: watch::Sender::new(initial), notify }
  }

  /// Create settings with a fresh notification channel.
  pub fn with_channel(initial: Preferences) -> Self {
    let (notify, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
    Self::new(initial, notify)
  }

  pub fn current(&self) -> Preferences { self.state.borrow().clone() }

  /// Receive every change applied from now on.
  pub fn subscribe(&self) -> broadcast::Receiver<PreferenceChange> {
    self.notify.subscribe()
  }

  /// Observe whole-snapshot updates instead of individual changes.
  pub fn watch(&self) -> watch::Receiver<Preferences> { self.state.subscribe() }

  /// Apply `change`, notifying listeners if the value changed.
  pub fn apply(&self, change: PreferenceChange) -> bool {
    let changed = self.state.send_if_modified(|prefs| prefs.apply(&change));
    if changed {
      // No listeners is not an error.
      let _ = self.notify.send(change);
    }
    changed
  }

  /// Set a preference by string key.
  pub fn set(&self, key: &str, value: &str) -> Result<bool> {
    Ok(self.apply(PreferenceChange::parse(key, value)?))
  }

  /// Restore defaults. Returns the changes that were applied.
  pub fn reset(&self) -> Vec<PreferenceChange> {
    let changes = self.current().diff(&Preferences::default());
    for change in &changes {
      self.apply(change.clone());
    }
    changes
  }
}

impl Default for Settings {
  fn default() -> Self { Self::with_channel(Preferences::default()) }
}
