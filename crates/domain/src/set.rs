use chrono::{DateTime, Utc};
use derive_more::Deref;
use log::debug;
use uuid::Uuid;

use crate::Difficulty;

#[derive(Debug, Clone, PartialEq)]
pub struct Set {
    pub id: SetID,
    pub status: SetStatus,
    pub difficulty: Difficulty,
    /// Rest after this set in seconds.
    pub rest_duration: u32,
    pub rest_started_at: Option<DateTime<Utc>>,
    pub rest_ended_at: Option<DateTime<Utc>>,
}

impl Set {
    #[must_use]
    pub fn new(difficulty: Difficulty, rest_duration: u32) -> Self {
        Self {
            id: SetID::random(),
            status: SetStatus::Unstarted,
            difficulty,
            rest_duration,
            rest_started_at: None,
            rest_ended_at: None,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == SetStatus::Finished
    }

    /// Whether the set has been performed, i.e. counts towards progress.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.status > SetStatus::Unstarted
    }

    pub(crate) fn rest(&mut self, now: DateTime<Utc>) -> bool {
        match self.status {
            SetStatus::Unstarted => {
                self.status = SetStatus::Resting;
                self.rest_started_at = Some(now);
                self.rest_ended_at = None;
                true
            }
            SetStatus::Resting | SetStatus::Finished => {
                debug!("ignored rest of {:?} set {}", self.status, *self.id);
                false
            }
        }
    }

    pub(crate) fn finish(&mut self, now: DateTime<Utc>) -> bool {
        match self.status {
            SetStatus::Unstarted => {
                self.status = SetStatus::Finished;
                true
            }
            SetStatus::Resting => {
                self.status = SetStatus::Finished;
                self.rest_started_at = None;
                self.rest_ended_at = Some(now);
                true
            }
            SetStatus::Finished => {
                debug!("ignored finish of finished set {}", *self.id);
                false
            }
        }
    }

    pub(crate) fn unstart(&mut self) -> bool {
        let changed = self.status != SetStatus::Unstarted
            || self.rest_started_at.is_some()
            || self.rest_ended_at.is_some();
        self.status = SetStatus::Unstarted;
        self.rest_started_at = None;
        self.rest_ended_at = None;
        changed
    }

    pub(crate) fn transition(&mut self, status: SetStatus, now: DateTime<Utc>) -> bool {
        match status {
            SetStatus::Unstarted => self.unstart(),
            SetStatus::Resting => self.rest(now),
            SetStatus::Finished => self.finish(now),
        }
    }

    /// Copy of the set that has not been performed yet.
    #[must_use]
    pub fn to_unstarted(&self) -> Self {
        Self::new(self.difficulty, self.rest_duration)
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetID(Uuid);

impl SetID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for SetID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SetID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Lifecycle position of a set.
///
/// The order of the variants is meaningful: a set moves from `Unstarted` over `Resting` to
/// `Finished`.
#[derive(Clone, Copy, Default, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum SetStatus {
    #[default]
    Unstarted = 0,
    Resting = 1,
    Finished = 2,
}

impl TryFrom<u8> for SetStatus {
    type Error = SetStatusError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SetStatus::Unstarted),
            1 => Ok(SetStatus::Resting),
            2 => Ok(SetStatus::Finished),
            _ => Err(SetStatusError::Invalid(value)),
        }
    }
}

impl From<SetStatus> for u8 {
    fn from(value: SetStatus) -> Self {
        value as u8
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SetStatusError {
    #[error("Invalid set status: {0}")]
    Invalid(u8),
}
