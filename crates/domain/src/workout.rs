use chrono::{DateTime, Duration, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, ExerciseMetaID, Name, ReadError, Set, SetID, UpdateError,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn read_workout(&self, id: WorkoutID) -> Result<Workout, ReadError>;
    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError>;
    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub name: Name,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub exercises: Vec<Exercise>,
}

impl Workout {
    #[must_use]
    pub fn new(name: Name, now: DateTime<Utc>) -> Self {
        Self {
            id: WorkoutID::random(),
            name,
            started_at: now,
            ended_at: None,
            exercises: vec![],
        }
    }

    /// Start a new workout with the exercises and sets of a past one.
    ///
    /// Difficulties and rest durations are kept, everything else starts from scratch.
    #[must_use]
    pub fn from_template(template: &Workout, name: Name, now: DateTime<Utc>) -> Self {
        Self {
            exercises: template
                .exercises
                .iter()
                .filter(|e| !e.sets.is_empty())
                .map(Exercise::to_unstarted)
                .collect(),
            ..Self::new(name, now)
        }
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Length of the workout, up to `now` if it is still in progress.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        (self.ended_at.unwrap_or(now) - self.started_at).max(Duration::zero())
    }

    /// All sets in workout order together with their exercise.
    pub fn sets(&self) -> impl Iterator<Item = (&Exercise, &Set)> {
        self.exercises
            .iter()
            .flat_map(|exercise| exercise.sets.iter().map(move |set| (exercise, set)))
    }

    #[must_use]
    pub fn exercise(&self, id: ExerciseID) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn set(&self, id: SetID) -> Option<(&Exercise, &Set)> {
        self.sets().find(|(_, s)| s.id == id)
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
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

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// One movement performed within a workout.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub meta_id: ExerciseMetaID,
    pub note: Option<String>,
    /// Default rest of new sets in seconds.
    pub rest_duration: u32,
    pub sets: Vec<Set>,
}

impl Exercise {
    #[must_use]
    pub fn new(meta_id: ExerciseMetaID, rest_duration: u32, sets: Vec<Set>) -> Self {
        Self {
            id: ExerciseID::random(),
            meta_id,
            note: None,
            rest_duration,
            sets,
        }
    }

    #[must_use]
    pub fn to_unstarted(&self) -> Self {
        Self {
            note: self.note.clone(),
            ..Self::new(
                self.meta_id,
                self.rest_duration,
                self.sets.iter().map(Set::to_unstarted).collect(),
            )
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.sets.iter().all(Set::is_finished)
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
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

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use pretty_assertions::assert_eq;

    use crate::{Difficulty, Reps, SetStatus, Weight};

    use super::*;

    pub(crate) static NOW: std::sync::LazyLock<DateTime<Utc>> =
        std::sync::LazyLock::new(|| DateTime::from_timestamp(1_700_000_000, 0).unwrap());

    pub(crate) fn set(id: u128, status: SetStatus, weight: f32, reps: u32) -> Set {
        Set {
            id: id.into(),
            status,
            difficulty: Difficulty::Weight {
                weight: Weight::new(weight).unwrap(),
                reps: Reps::new(reps).unwrap(),
            },
            rest_duration: 90,
            rest_started_at: (status == SetStatus::Resting).then(|| *NOW - Duration::seconds(30)),
            rest_ended_at: (status == SetStatus::Finished).then(|| *NOW - Duration::seconds(60)),
        }
    }

    pub(crate) fn exercise(id: u128, sets: Vec<Set>) -> Exercise {
        Exercise {
            id: id.into(),
            meta_id: id.into(),
            note: None,
            rest_duration: 90,
            sets,
        }
    }

    pub(crate) fn workout(exercises: Vec<Exercise>) -> Workout {
        Workout {
            id: 1.into(),
            name: Name::new("Push").unwrap(),
            started_at: *NOW - Duration::minutes(30),
            ended_at: None,
            exercises,
        }
    }

    /// Two exercises with two sets each, `first` finished, `second` resting, the rest unstarted.
    pub(crate) fn workout_in_progress() -> Workout {
        workout(vec![
            exercise(
                1,
                vec![
                    set(11, SetStatus::Finished, 100.0, 10),
                    set(12, SetStatus::Resting, 100.0, 8),
                ],
            ),
            exercise(
                2,
                vec![
                    set(21, SetStatus::Unstarted, 40.0, 12),
                    set(22, SetStatus::Unstarted, 40.0, 12),
                ],
            ),
        ])
    }

    #[test]
    fn test_workout_sets_order() {
        assert_eq!(
            workout_in_progress()
                .sets()
                .map(|(e, s)| (e.id, s.id))
                .collect::<Vec<_>>(),
            vec![
                (1.into(), 11.into()),
                (1.into(), 12.into()),
                (2.into(), 21.into()),
                (2.into(), 22.into()),
            ]
        );
    }

    #[test]
    fn test_workout_lookup() {
        let workout = workout_in_progress();
        assert_eq!(workout.exercise(2.into()).map(|e| e.sets.len()), Some(2));
        assert_eq!(workout.exercise(3.into()), None);
        assert_eq!(
            workout.set(21.into()).map(|(e, s)| (e.id, s.status)),
            Some((2.into(), SetStatus::Unstarted))
        );
        assert_eq!(workout.set(99.into()), None);
    }

    #[test]
    fn test_workout_from_template() {
        let template = workout_in_progress();
        let workout = Workout::from_template(&template, Name::new("Push").unwrap(), *NOW);

        assert_ne!(workout.id, template.id);
        assert_eq!(workout.started_at, *NOW);
        assert_eq!(workout.ended_at, None);
        assert_eq!(workout.exercises.len(), 2);
        for (exercise, original) in workout.exercises.iter().zip(&template.exercises) {
            assert_ne!(exercise.id, original.id);
            assert_eq!(exercise.meta_id, original.meta_id);
            assert_eq!(exercise.rest_duration, original.rest_duration);
            for (set, original) in exercise.sets.iter().zip(&original.sets) {
                assert_ne!(set.id, original.id);
                assert_eq!(set.status, SetStatus::Unstarted);
                assert_eq!(set.difficulty, original.difficulty);
                assert_eq!(set.rest_started_at, None);
                assert_eq!(set.rest_ended_at, None);
            }
        }
    }

    #[test]
    fn test_workout_from_template_skips_empty_exercises() {
        let template = workout(vec![exercise(1, vec![])]);
        let workout = Workout::from_template(&template, Name::new("Legs").unwrap(), *NOW);
        assert!(workout.exercises.is_empty());
    }

    #[test]
    fn test_workout_elapsed() {
        let mut workout = workout_in_progress();
        assert_eq!(workout.elapsed(*NOW), Duration::minutes(30));
        workout.ended_at = Some(*NOW - Duration::minutes(5));
        assert!(workout.is_ended());
        assert_eq!(
            workout.elapsed(*NOW + Duration::hours(1)),
            Duration::minutes(25)
        );
    }

    #[test]
    fn test_exercise_is_finished() {
        assert!(exercise(1, vec![set(1, SetStatus::Finished, 0.0, 5)]).is_finished());
        assert!(!exercise(1, vec![set(1, SetStatus::Resting, 0.0, 5)]).is_finished());
    }

    #[test]
    fn test_workout_id_nil() {
        assert!(WorkoutID::nil().is_nil());
        assert_eq!(ExerciseID::nil(), ExerciseID::default());
    }
}
