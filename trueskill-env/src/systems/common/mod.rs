mod player;

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
pub use player::Player;

pub type PlayersByName = HashMap<String, RefCell<Player>>;

/// Number of standard deviations subtracted from mu for a conservative display rating.
pub const CONSERVATIVE_STDEVS: f64 = 3.;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub mu: f64,
    pub sig: f64,
}

impl Rating {
    /// A skill level the player very likely exceeds.
    pub fn conservative(&self) -> f64 {
        self.mu - CONSERVATIVE_STDEVS * self.sig
    }
}
