use crate::config::RatingEnvironmentConfig;
use crate::error::{RatingError, Result};
use crate::systems::{
    EpUpdateReport, Player, PlayersByName, Rating, TrueSkill, check_match_shape,
};
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell, RefMut};
use std::collections::hash_map::Entry;
use std::fmt;
use std::ops::DerefMut;

/// Names a player registered in a `RatingEnvironment`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerHandle(String);

impl PlayerHandle {
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PlayerHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owns every player's rating and applies match outcomes to them. Updates take `&mut self`,
/// so matches within one environment are always rated one at a time.
#[derive(Debug)]
pub struct RatingEnvironment {
    config: RatingEnvironmentConfig,
    system: TrueSkill,
    players: PlayersByName,
}

impl RatingEnvironment {
    pub fn new(config: RatingEnvironmentConfig) -> Result<Self> {
        config.validate()?;
        let system = TrueSkill::from_config(&config);
        tracing::info!("Rating environment ready: {:?}", system);
        Ok(Self {
            config,
            system,
            players: PlayersByName::new(),
        })
    }

    pub fn config(&self) -> &RatingEnvironmentConfig {
        &self.config
    }

    pub fn system(&self) -> &TrueSkill {
        &self.system
    }

    /// Registers a player at the configured default rating.
    pub fn make_player(&mut self, name: impl Into<String>) -> Result<PlayerHandle> {
        let (mu, sigma) = (self.config.mu0, self.config.sigma0);
        self.make_player_with(name, mu, sigma)
    }

    pub fn make_player_with(
        &mut self,
        name: impl Into<String>,
        mu: f64,
        sigma: f64,
    ) -> Result<PlayerHandle> {
        let name = name.into();
        if !mu.is_finite() || !(sigma * sigma).is_finite() || sigma <= 0. {
            return Err(RatingError::invalid_config(format!(
                "player {} needs a finite mu and a positive sigma with finite variance, got ({}, {})",
                name, mu, sigma
            )));
        }
        match self.players.entry(name) {
            Entry::Occupied(entry) => Err(RatingError::DuplicatePlayer {
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                let handle = PlayerHandle(entry.key().clone());
                tracing::debug!("Registered {} at mu={} sigma={}", handle, mu, sigma);
                entry.insert(RefCell::new(Player::with_rating(handle.name(), mu, sigma)));
                Ok(handle)
            }
        }
    }

    pub fn handle(&self, name: &str) -> Option<PlayerHandle> {
        self.players
            .contains_key(name)
            .then(|| PlayerHandle(name.to_owned()))
    }

    pub fn player(&self, handle: &PlayerHandle) -> Result<Ref<'_, Player>> {
        self.players
            .get(handle.name())
            .map(RefCell::borrow)
            .ok_or_else(|| RatingError::UnknownPlayer {
                name: handle.name().to_owned(),
            })
    }

    /// A copy of the player's current rating.
    pub fn rating(&self, handle: &PlayerHandle) -> Result<Rating> {
        Ok(self.player(handle)?.approx_posterior)
    }

    pub fn players(&self) -> impl Iterator<Item = Ref<'_, Player>> {
        self.players.values().map(RefCell::borrow)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Rates one match. `ranks[i]` is the placement of `teams[i]`: lower is better and equal
    /// ranks tie. Nothing is modified unless the whole match is valid. The per-comparison
    /// reports are returned only when `return_report` is set.
    pub fn rate(
        &mut self,
        teams: &[Vec<PlayerHandle>],
        ranks: &[usize],
        return_report: bool,
    ) -> Result<Vec<EpUpdateReport>> {
        check_match_shape(teams, ranks)?;

        // Borrowing every participant up front both verifies that handles are distinct
        // and guarantees that an invalid match never touches any rating.
        let mut guards: Vec<Vec<RefMut<Player>>> = teams
            .iter()
            .map(|team| {
                team.iter()
                    .map(|handle| self.borrow_participant(handle))
                    .collect::<Result<_>>()
            })
            .collect::<Result<_>>()?;

        let mut standings: Vec<Vec<&mut Player>> = guards
            .iter_mut()
            .map(|team| team.iter_mut().map(DerefMut::deref_mut).collect())
            .collect();

        let reports = self.system.round_update(&mut standings, ranks);
        tracing::debug!(
            "Rated a match between {} teams with {} comparisons",
            teams.len(),
            reports.len()
        );

        Ok(if return_report { reports } else { vec![] })
    }

    fn borrow_participant(&self, handle: &PlayerHandle) -> Result<RefMut<'_, Player>> {
        self.players
            .get(handle.name())
            .ok_or_else(|| RatingError::UnknownPlayer {
                name: handle.name().to_owned(),
            })?
            .try_borrow_mut()
            .map_err(|_| {
                RatingError::invalid_match(format!("{} appears more than once", handle))
            })
    }
}
