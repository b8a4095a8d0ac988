use chrono::{DateTime, Utc};
use log::debug;

use crate::{
    Difficulty, Position, Set, SetID, SetStatus, Workout, adjust_rest_duration,
    clamp_rest_duration,
};

/// Partial change of a set. Fields left at `None` stay untouched.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SetUpdate {
    pub difficulty: Option<Difficulty>,
    pub status: Option<SetStatus>,
    /// Rest in seconds, negative values are clamped to zero.
    pub rest_duration: Option<i64>,
}

/// Mutations of a single set.
///
/// Each operation returns a new workout and leaves the given one untouched. An unknown set id
/// results in an unchanged copy, as the set may have been deleted in the meantime.
pub struct SetActions<'a> {
    workout: &'a Workout,
    set_id: SetID,
}

impl<'a> SetActions<'a> {
    #[must_use]
    pub fn new(workout: &'a Workout, set_id: SetID) -> Self {
        Self { workout, set_id }
    }

    #[must_use]
    pub fn update(&self, update: SetUpdate, now: DateTime<Utc>) -> Workout {
        self.modify(|workout, position| {
            let set = set_mut(workout, position);
            if let Some(difficulty) = update.difficulty {
                set.difficulty = difficulty;
            }
            if let Some(rest_duration) = update.rest_duration {
                set.rest_duration = clamp_rest_duration(rest_duration);
            }
            match update.status {
                Some(SetStatus::Resting) => rest_at(workout, position, now),
                Some(status) => {
                    set_mut(workout, position).transition(status, now);
                }
                None => {}
            }
        })
    }

    /// Start the rest after the set. A rest running for another set is finished beforehand.
    #[must_use]
    pub fn rest(&self, now: DateTime<Utc>) -> Workout {
        self.modify(|workout, position| rest_at(workout, position, now))
    }

    #[must_use]
    pub fn finish(&self, now: DateTime<Utc>) -> Workout {
        self.modify(|workout, position| {
            set_mut(workout, position).finish(now);
        })
    }

    #[must_use]
    pub fn unstart(&self) -> Workout {
        self.modify(|workout, position| {
            set_mut(workout, position).unstart();
        })
    }

    /// Check or uncheck the set.
    ///
    /// - Unchecking a finished set in front of a resting current set finishes the current set
    ///   first.
    /// - Checking the current set starts its rest.
    /// - Checking a set behind the current set finishes it without rest.
    #[must_use]
    pub fn toggle(&self, now: DateTime<Utc>) -> Workout {
        self.modify(|workout, position| {
            let cursor = workout.current_position();
            let status = set_mut(workout, position).status;
            match status {
                SetStatus::Finished => {
                    if let Some(cursor) = cursor.filter(|cursor| position < *cursor) {
                        let current = set_mut(workout, cursor);
                        if current.status == SetStatus::Resting {
                            current.finish(now);
                        }
                    }
                    set_mut(workout, position).unstart();
                }
                SetStatus::Resting => {
                    set_mut(workout, position).unstart();
                }
                SetStatus::Unstarted => {
                    if cursor.is_some_and(|cursor| position > cursor) {
                        set_mut(workout, position).finish(now);
                    } else {
                        rest_at(workout, position, now);
                    }
                }
            }
        })
    }

    /// Remove the set. An exercise left without sets is not removed.
    #[must_use]
    pub fn delete(&self) -> Workout {
        self.modify(|workout, position| {
            workout.exercises[position.exercise_idx]
                .sets
                .remove(position.set_idx);
        })
    }

    #[must_use]
    pub fn adjust_rest(&self, delta: i64) -> Workout {
        self.modify(|workout, position| {
            let set = set_mut(workout, position);
            set.rest_duration = adjust_rest_duration(set.rest_duration, delta);
        })
    }

    #[must_use]
    pub fn set_rest(&self, seconds: i64) -> Workout {
        self.modify(|workout, position| {
            set_mut(workout, position).rest_duration = clamp_rest_duration(seconds);
        })
    }

    fn modify(&self, f: impl FnOnce(&mut Workout, Position)) -> Workout {
        let Some(position) = self.workout.position_of(self.set_id) else {
            debug!("set {} not found", *self.set_id);
            return self.workout.clone();
        };
        let mut workout = self.workout.clone();
        f(&mut workout, position);
        workout
    }
}

fn set_mut(workout: &mut Workout, position: Position) -> &mut Set {
    &mut workout.exercises[position.exercise_idx].sets[position.set_idx]
}

fn rest_at(workout: &mut Workout, position: Position, now: DateTime<Utc>) {
    let target = set_mut(workout, position);
    if target.status != SetStatus::Unstarted {
        target.rest(now);
        return;
    }
    for set in workout
        .exercises
        .iter_mut()
        .flat_map(|exercise| exercise.sets.iter_mut())
        .filter(|set| set.status == SetStatus::Resting)
    {
        set.finish(now);
    }
    set_mut(workout, position).rest(now);
}
