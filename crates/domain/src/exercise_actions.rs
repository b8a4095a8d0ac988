use log::debug;

use crate::{
    Difficulty, DifficultyType, Exercise, ExerciseID, Set, SetStatus, Workout,
    clamp_rest_duration,
};

/// Mutations of a single exercise of a workout.
pub struct ExerciseActions<'a> {
    workout: &'a Workout,
    exercise_id: ExerciseID,
}

impl<'a> ExerciseActions<'a> {
    #[must_use]
    pub fn new(workout: &'a Workout, exercise_id: ExerciseID) -> Self {
        Self {
            workout,
            exercise_id,
        }
    }

    /// Append an unstarted set with the difficulty of the last set.
    ///
    /// Without a fitting last set the set starts at zero.
    #[must_use]
    pub fn duplicate_last_set(&self, difficulty_type: DifficultyType) -> Workout {
        self.modify(|exercise| {
            let difficulty = match exercise.sets.last() {
                Some(last) if last.difficulty.fits(difficulty_type) => last.difficulty,
                _ => Difficulty::zero(difficulty_type),
            };
            exercise
                .sets
                .push(Set::new(difficulty, exercise.rest_duration));
        })
    }

    /// Change the default rest of the exercise.
    ///
    /// Only sets which have not been started yet take over the new duration.
    #[must_use]
    pub fn update_rest(&self, seconds: i64) -> Workout {
        self.modify(|exercise| {
            let rest_duration = clamp_rest_duration(seconds);
            exercise.rest_duration = rest_duration;
            for set in exercise
                .sets
                .iter_mut()
                .filter(|set| set.status == SetStatus::Unstarted)
            {
                set.rest_duration = rest_duration;
            }
        })
    }

    #[must_use]
    pub fn update_note(&self, note: &str) -> Workout {
        self.modify(|exercise| {
            let note = note.trim();
            exercise.note = (!note.is_empty()).then(|| note.to_string());
        })
    }

    #[must_use]
    pub fn delete(&self) -> Workout {
        if self.workout.exercise(self.exercise_id).is_none() {
            debug!("exercise {} not found", *self.exercise_id);
            return self.workout.clone();
        }
        let mut workout = self.workout.clone();
        workout.exercises.retain(|e| e.id != self.exercise_id);
        workout
    }

    fn modify(&self, f: impl FnOnce(&mut Exercise)) -> Workout {
        let mut workout = self.workout.clone();
        if let Some(exercise) = workout
            .exercises
            .iter_mut()
            .find(|e| e.id == self.exercise_id)
        {
            f(exercise);
        } else {
            debug!("exercise {} not found", *self.exercise_id);
        }
        workout
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{
        Reps, Time, Weight,
        workout::tests::{NOW, exercise, set, workout, workout_in_progress},
    };

    use super::*;

    #[test]
    fn test_duplicate_last_set() {
        let original = workout_in_progress();
        let workout = ExerciseActions::new(&original, 1.into())
            .duplicate_last_set(DifficultyType::Weight);
        let sets = &workout.exercise(1.into()).unwrap().sets;

        assert_eq!(sets.len(), 3);
        let new = &sets[2];
        assert!(original.set(new.id).is_none());
        assert_eq!(new.status, SetStatus::Unstarted);
        assert_eq!(
            new.difficulty,
            Difficulty::Weight {
                weight: Weight::new(100.0).unwrap(),
                reps: Reps::new(8).unwrap()
            }
        );
        assert_eq!(new.rest_started_at, None);
        assert_eq!(new.rest_ended_at, None);
        assert_eq!(original, workout_in_progress());
    }

    #[rstest]
    #[case(DifficultyType::Weight, Difficulty::Weight { weight: Weight::ZERO, reps: Reps::ZERO })]
    #[case(
        DifficultyType::BodyWeight,
        Difficulty::BodyWeight { added_weight: Weight::ZERO, reps: Reps::ZERO }
    )]
    #[case(DifficultyType::Time, Difficulty::Time { time: Time::ZERO })]
    fn test_duplicate_last_set_of_empty_exercise(
        #[case] difficulty_type: DifficultyType,
        #[case] expected: Difficulty,
    ) {
        let mut empty = exercise(1, vec![]);
        empty.rest_duration = 120;
        let workout = ExerciseActions::new(&workout(vec![empty]), 1.into())
            .duplicate_last_set(difficulty_type);
        let sets = &workout.exercise(1.into()).unwrap().sets;

        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].difficulty, expected);
        assert_eq!(sets[0].rest_duration, 120);
    }

    #[test]
    fn test_duplicate_last_set_with_mismatching_difficulty() {
        let workout = ExerciseActions::new(&workout_in_progress(), 2.into())
            .duplicate_last_set(DifficultyType::Time);
        assert_eq!(
            workout.exercise(2.into()).unwrap().sets[2].difficulty,
            Difficulty::Time { time: Time::ZERO }
        );
    }

    #[test]
    fn test_duplicate_last_set_of_unknown_exercise() {
        let original = workout_in_progress();
        assert_eq!(
            ExerciseActions::new(&original, 9.into()).duplicate_last_set(DifficultyType::Weight),
            original
        );
    }

    #[test]
    fn test_update_rest() {
        let workout = ExerciseActions::new(&workout_in_progress(), 1.into()).update_rest(60);
        let exercise = workout.exercise(1.into()).unwrap();

        assert_eq!(exercise.rest_duration, 60);
        assert_eq!(exercise.sets[0].rest_duration, 90);
        assert_eq!(exercise.sets[1].rest_duration, 90);

        let workout = ExerciseActions::new(&workout_in_progress(), 2.into()).update_rest(-5);
        let exercise = workout.exercise(2.into()).unwrap();

        assert_eq!(exercise.rest_duration, 0);
        assert!(exercise.sets.iter().all(|s| s.rest_duration == 0));
    }

    #[test]
    fn test_update_rest_keeps_running_rest() {
        let original = workout_in_progress();
        let workout = ExerciseActions::new(&original, 1.into()).update_rest(300);
        assert_eq!(workout.remaining_rest(*NOW), original.remaining_rest(*NOW));
    }

    #[rstest]
    #[case("  slow eccentric ", Some("slow eccentric"))]
    #[case("   ", None)]
    fn test_update_note(#[case] note: &str, #[case] expected: Option<&str>) {
        let workout = ExerciseActions::new(&workout_in_progress(), 2.into()).update_note(note);
        assert_eq!(
            workout.exercise(2.into()).unwrap().note.as_deref(),
            expected
        );
    }

    #[test]
    fn test_delete() {
        let workout = ExerciseActions::new(&workout_in_progress(), 1.into()).delete();
        assert_eq!(
            workout.exercises.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![2.into()]
        );
        assert_eq!(
            workout.current_set_and_exercise().map(|(_, s)| s.id),
            Some(21.into())
        );
    }

    #[test]
    fn test_delete_empty_exercise() {
        let original = workout(vec![
            exercise(1, vec![]),
            exercise(2, vec![set(21, SetStatus::Unstarted, 10.0, 10)]),
        ]);
        let workout = ExerciseActions::new(&original, 1.into()).delete();
        assert_eq!(workout.exercises.len(), 1);
    }

    #[test]
    fn test_delete_unknown_exercise() {
        let original = workout_in_progress();
        assert_eq!(ExerciseActions::new(&original, 9.into()).delete(), original);
    }
}
