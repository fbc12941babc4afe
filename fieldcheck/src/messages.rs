//! Failure slots and caller-supplied message overrides.
//!
//! Every string validator publishes a fixed, ordered list of default messages.
//! Each position in that list is a *slot* naming one failure condition. Callers
//! may override any subset of slots; unset slots fall back to the default text.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer};

use crate::error::ContractViolation;

/// A named failure condition of one validator.
pub trait Slot: Copy + Eq + fmt::Debug + 'static {
    /// Every slot, in published index order.
    const ALL: &'static [Self];

    /// Position of this slot in the published default-message list.
    fn index(self) -> usize;
}

/// Override table mapping each slot to an optional replacement message.
#[derive(Clone, PartialEq, Eq)]
pub struct Messages<S: Slot> {
    overrides: Vec<Option<String>>,
    _slot: PhantomData<S>,
}

impl<S: Slot> Messages<S> {
    /// An empty table: every slot uses its default text.
    #[must_use]
    pub fn new() -> Self {
        Self {
            overrides: vec![None; S::ALL.len()],
            _slot: PhantomData,
        }
    }

    /// Build a table from a positional list, where `None` keeps the default.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::TooManyMessages`] if the list has more
    /// entries than the validator has slots.
    pub fn from_positional(mut list: Vec<Option<String>>) -> Result<Self, ContractViolation> {
        let slots = S::ALL.len();
        if list.len() > slots {
            return Err(ContractViolation::TooManyMessages {
                given: list.len(),
                slots,
            });
        }
        list.resize(slots, None);
        Ok(Self {
            overrides: list,
            _slot: PhantomData,
        })
    }

    /// Override one slot.
    #[must_use]
    pub fn with(mut self, slot: S, message: impl Into<String>) -> Self {
        self.set(slot, message);
        self
    }

    /// Override one slot in place.
    pub fn set(&mut self, slot: S, message: impl Into<String>) {
        if let Some(entry) = self.overrides.get_mut(slot.index()) {
            *entry = Some(message.into());
        }
    }

    /// The override for `slot`, if any.
    #[must_use]
    pub fn get(&self, slot: S) -> Option<&str> {
        self.overrides
            .get(slot.index())
            .and_then(Option::as_deref)
    }

    /// Whether no slot is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.iter().all(Option::is_none)
    }

    /// Resolve the message for a failing slot.
    ///
    /// An override wins verbatim unless it is exactly the slot's literal
    /// default text. Otherwise `template` may render a bound-aware version of
    /// the default; if it declines, the literal default is returned.
    #[must_use]
    pub fn resolve(
        &self,
        slot: S,
        defaults: &[&'static str],
        template: impl Fn(S) -> Option<String>,
    ) -> String {
        let default = defaults.get(slot.index()).copied().unwrap_or_default();
        match self.get(slot) {
            Some(text) if text != default => text.to_owned(),
            _ => template(slot).unwrap_or_else(|| default.to_owned()),
        }
    }
}

impl<S: Slot> Default for Messages<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Slot> fmt::Debug for Messages<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                S::ALL
                    .iter()
                    .filter_map(|slot| self.get(*slot).map(|text| (slot, text))),
            )
            .finish()
    }
}

/// Deserialized from a positional array of `string | null` entries.
impl<'de, S: Slot> Deserialize<'de> for Messages<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let list = Vec::<Option<String>>::deserialize(deserializer)?;
        Self::from_positional(list).map_err(serde::de::Error::custom)
    }
}
