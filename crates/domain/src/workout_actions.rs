use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::{
    Difficulty, DifficultyType, Exercise, ExerciseID, ExerciseMetaID, Name, Set, SetStatus,
    Workout,
};

/// Mutations affecting the workout as a whole.
pub struct WorkoutActions<'a> {
    workout: &'a Workout,
}

impl<'a> WorkoutActions<'a> {
    #[must_use]
    pub fn new(workout: &'a Workout) -> Self {
        Self { workout }
    }

    /// Arrange the exercises in the given order.
    ///
    /// The ids must be a permutation of the current exercise ids, otherwise the workout stays
    /// unchanged.
    #[must_use]
    pub fn reorder_exercises(&self, ordered_ids: &[ExerciseID]) -> Workout {
        let current = self
            .workout
            .exercises
            .iter()
            .map(|e| e.id)
            .collect::<BTreeSet<_>>();
        let requested = ordered_ids.iter().copied().collect::<BTreeSet<_>>();

        if requested.len() != ordered_ids.len()
            || ordered_ids.len() != self.workout.exercises.len()
            || requested != current
        {
            debug!("ignored reordering of exercises: ids are no permutation");
            return self.workout.clone();
        }

        Workout {
            exercises: ordered_ids
                .iter()
                .filter_map(|id| self.workout.exercise(*id).cloned())
                .collect(),
            ..self.workout.clone()
        }
    }

    /// End the workout.
    ///
    /// Unfinished sets are kept as they are, see [`WorkoutActions::discard_unstarted_sets`].
    #[must_use]
    pub fn finish(&self, now: DateTime<Utc>) -> Workout {
        if self.workout.is_ended() {
            debug!("ignored finish of ended workout {}", *self.workout.id);
            return self.workout.clone();
        }
        let ended_at = if now < self.workout.started_at {
            warn!(
                "end time {now} of workout {} is before start time {}",
                *self.workout.id, self.workout.started_at
            );
            self.workout.started_at
        } else {
            now
        };
        Workout {
            ended_at: Some(ended_at),
            ..self.workout.clone()
        }
    }

    /// Append an exercise with a single unstarted set.
    #[must_use]
    pub fn add_exercise(
        &self,
        meta_id: ExerciseMetaID,
        difficulty_type: DifficultyType,
        rest_duration: u32,
    ) -> Workout {
        let mut workout = self.workout.clone();
        workout.exercises.push(Exercise::new(
            meta_id,
            rest_duration,
            vec![Set::new(Difficulty::zero(difficulty_type), rest_duration)],
        ));
        workout
    }

    #[must_use]
    pub fn rename(&self, name: Name) -> Workout {
        Workout {
            name,
            ..self.workout.clone()
        }
    }

    /// Remove all sets which have not been started and every exercise left without sets.
    #[must_use]
    pub fn discard_unstarted_sets(&self) -> Workout {
        let mut workout = self.workout.clone();
        for exercise in &mut workout.exercises {
            exercise
                .sets
                .retain(|set| set.status != SetStatus::Unstarted);
        }
        WorkoutActions::new(&workout).remove_empty_exercises()
    }

    #[must_use]
    pub fn remove_empty_exercises(&self) -> Workout {
        let mut workout = self.workout.clone();
        workout.exercises.retain(|exercise| !exercise.sets.is_empty());
        workout
    }
}
