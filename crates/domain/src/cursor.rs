use chrono::{DateTime, Duration, Utc};

use crate::{Exercise, Set, SetID, SetStatus, Workout};

/// Location of a set inside a workout, ordered like the workout itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub exercise_idx: usize,
    pub set_idx: usize,
}

impl Workout {
    /// The set the trainee is currently at: the first set which is not finished.
    ///
    /// Returns `None` once every set is finished.
    #[must_use]
    pub fn current_set_and_exercise(&self) -> Option<(&Exercise, &Set)> {
        self.sets().find(|(_, set)| !set.is_finished())
    }

    #[must_use]
    pub fn current_position(&self) -> Option<Position> {
        self.positions()
            .find(|(_, set)| !set.is_finished())
            .map(|(position, _)| position)
    }

    #[must_use]
    pub fn has_unfinished_sets(&self) -> bool {
        self.current_set_and_exercise().is_some()
    }

    #[must_use]
    pub fn position_of(&self, set_id: SetID) -> Option<Position> {
        self.positions()
            .find(|(_, set)| set.id == set_id)
            .map(|(position, _)| position)
    }

    /// First unstarted set behind the given set, skipping resting and finished sets.
    #[must_use]
    pub fn next_unstarted_set(&self, after: SetID) -> Option<(&Exercise, &Set)> {
        self.upcoming_sets(after).next()
    }

    /// All unstarted sets behind the given set in workout order.
    ///
    /// The iterator is empty if the set does not exist.
    pub fn upcoming_sets(&self, after: SetID) -> impl Iterator<Item = (&Exercise, &Set)> {
        let start = self.position_of(after);
        self.positions()
            .filter(move |(position, _)| start.is_some_and(|start| *position > start))
            .filter(|(_, set)| set.status == SetStatus::Unstarted)
            .map(move |(position, set)| (&self.exercises[position.exercise_idx], set))
    }

    /// The set whose rest is running.
    #[must_use]
    pub fn resting_set(&self) -> Option<(&Exercise, &Set)> {
        self.sets().find(|(_, set)| set.status == SetStatus::Resting)
    }

    #[must_use]
    pub fn remaining_rest(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.resting_set().and_then(|(_, set)| set.remaining_rest(now))
    }

    fn positions(&self) -> impl Iterator<Item = (Position, &Set)> {
        self.exercises
            .iter()
            .enumerate()
            .flat_map(|(exercise_idx, exercise)| {
                exercise.sets.iter().enumerate().map(move |(set_idx, set)| {
                    (
                        Position {
                            exercise_idx,
                            set_idx,
                        },
                        set,
                    )
                })
            })
    }
}
