use chrono::{DateTime, Utc};
use log::debug;
use spotter_domain::{
    DifficultyType, ExerciseMetaID, SetActions, Workout, WorkoutActions, WorkoutID,
};

use crate::Settings;

#[allow(async_fn_in_trait)]
pub trait OngoingWorkoutService {
    async fn get_ongoing_workout(&self) -> Result<Option<OngoingWorkoutState>, String>;
    async fn set_ongoing_workout(
        &self,
        ongoing_workout: Option<OngoingWorkoutState>,
    ) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait OngoingWorkoutRepository {
    async fn read_ongoing_workout(&self) -> Result<Option<OngoingWorkoutState>, String>;
    async fn write_ongoing_workout(
        &self,
        ongoing_workout: Option<OngoingWorkoutState>,
    ) -> Result<(), String>;
}

/// Record that allows resuming the workout in progress after a restart.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct OngoingWorkoutState {
    pub workout_id: u128,
    pub opened_at: DateTime<Utc>,
}

impl OngoingWorkoutState {
    #[must_use]
    pub fn new(workout_id: WorkoutID, opened_at: DateTime<Utc>) -> Self {
        Self {
            workout_id: workout_id.as_u128(),
            opened_at,
        }
    }

    #[must_use]
    pub fn belongs_to(&self, workout: &Workout) -> bool {
        self.workout_id == workout.id.as_u128()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestAdjustment {
    Increase,
    Decrease,
}

/// Owner of the workout in progress.
///
/// All changes go through [`OngoingWorkout::apply`], which replaces the workout by the result of
/// a pure action and counts the revisions, so views can detect that they are outdated.
#[derive(Debug, Clone)]
pub struct OngoingWorkout {
    workout: Workout,
    revision: u64,
}

impl OngoingWorkout {
    #[must_use]
    pub fn new(workout: Workout) -> Self {
        Self {
            workout,
            revision: 0,
        }
    }

    #[must_use]
    pub fn get(&self) -> &Workout {
        &self.workout
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn state(&self, opened_at: DateTime<Utc>) -> OngoingWorkoutState {
        OngoingWorkoutState::new(self.workout.id, opened_at)
    }

    /// Returns whether the workout has changed.
    ///
    /// An ended workout is a historical record and is not changed anymore.
    pub fn apply(&mut self, action: impl FnOnce(&Workout) -> Workout) -> bool {
        if self.workout.is_ended() {
            debug!("ignored change of ended workout {}", *self.workout.id);
            return false;
        }
        let workout = action(&self.workout);
        if workout == self.workout {
            return false;
        }
        self.workout = workout;
        self.revision += 1;
        true
    }

    /// Change the rest of the currently resting set by one rest step.
    pub fn adjust_rest(&mut self, adjustment: RestAdjustment, settings: &Settings) -> bool {
        let Some((_, set)) = self.workout.resting_set() else {
            debug!("no resting set to adjust");
            return false;
        };
        let set_id = set.id;
        let step = i64::from(settings.rest_step);
        let delta = match adjustment {
            RestAdjustment::Increase => step,
            RestAdjustment::Decrease => -step,
        };
        self.apply(|w| SetActions::new(w, set_id).adjust_rest(delta))
    }

    /// Finish the resting set once its rest is over.
    pub fn complete_rest(&mut self, now: DateTime<Utc>) -> bool {
        let Some((_, set)) = self.workout.resting_set() else {
            return false;
        };
        if !set.rest_timer().is_some_and(|timer| timer.is_over(now)) {
            return false;
        }
        let set_id = set.id;
        self.apply(|w| SetActions::new(w, set_id).finish(now))
    }

    pub fn add_exercise(
        &mut self,
        meta_id: ExerciseMetaID,
        difficulty_type: DifficultyType,
        settings: &Settings,
    ) -> bool {
        self.apply(|w| {
            WorkoutActions::new(w).add_exercise(meta_id, difficulty_type, settings.default_rest)
        })
    }

    /// End the workout. A running rest ends at the same time.
    pub fn finish(&mut self, now: DateTime<Utc>, settings: &Settings) -> bool {
        let rest_ended = match self.workout.resting_set() {
            Some((_, set)) => {
                let set_id = set.id;
                self.apply(|w| SetActions::new(w, set_id).finish(now))
            }
            None => false,
        };
        let discarded = settings.discard_unstarted_sets_on_finish
            && self.apply(|w| WorkoutActions::new(w).discard_unstarted_sets());
        let ended = self.apply(|w| WorkoutActions::new(w).finish(now));
        ended || discarded || rest_ended
    }

    #[must_use]
    pub fn into_inner(self) -> Workout {
        self.workout
    }
}
