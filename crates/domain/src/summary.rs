use std::{
    iter::Sum,
    ops::{Add, AddAssign},
};

use chrono::Duration;
use log::debug;

use crate::{DifficultyType, Exercise, ExerciseCatalog, Weight, Workout};

/// Totals of all performed sets.
///
/// Only sets that have left the unstarted state are taken into account.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total_reps: u32,
    /// Moved weight in kg.
    pub total_volume: f32,
    /// Hold time in seconds.
    pub total_hold_time: u32,
    pub completed_sets: usize,
    pub total_sets: usize,
    /// Length of the ended workouts.
    pub duration: Option<Duration>,
}

impl Add for Summary {
    type Output = Summary;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            total_reps: self.total_reps + rhs.total_reps,
            total_volume: self.total_volume + rhs.total_volume,
            total_hold_time: self.total_hold_time + rhs.total_hold_time,
            completed_sets: self.completed_sets + rhs.completed_sets,
            total_sets: self.total_sets + rhs.total_sets,
            duration: match (self.duration, rhs.duration) {
                (Some(a), Some(b)) => Some(a + b),
                (a, b) => a.or(b),
            },
        }
    }
}

impl AddAssign for Summary {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Summary {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Summary::default(), Add::add)
    }
}

impl Workout {
    #[must_use]
    pub fn summarize(&self, catalog: &impl ExerciseCatalog, body_weight: Weight) -> Summary {
        let mut summary = self
            .exercises
            .iter()
            .map(|e| e.summarize(catalog.difficulty_type(e.meta_id), body_weight))
            .sum::<Summary>();
        summary.duration = self
            .ended_at
            .map(|ended_at| (ended_at - self.started_at).max(Duration::zero()));
        summary
    }
}

impl Exercise {
    /// Totals of the exercise.
    ///
    /// Without a known difficulty type the sets are interpreted by the shape of their payload.
    #[must_use]
    pub fn summarize(
        &self,
        difficulty_type: Option<DifficultyType>,
        body_weight: Weight,
    ) -> Summary {
        let mut summary = Summary {
            total_sets: self.sets.len(),
            ..Summary::default()
        };
        for set in self.sets.iter().filter(|s| s.is_done()) {
            summary.completed_sets += 1;
            let difficulty_type = difficulty_type.unwrap_or(set.difficulty.natural_type());
            if !set.difficulty.fits(difficulty_type) {
                debug!(
                    "skipped set {} in summary: difficulty does not fit {difficulty_type}",
                    *set.id
                );
                continue;
            }
            if difficulty_type.counts_reps() {
                summary.total_reps += set.difficulty.reps().map_or(0, u32::from);
            }
            if let Some(time) = set.difficulty.hold_time() {
                summary.total_hold_time += u32::from(time);
            }
            summary.total_volume += set.difficulty.volume(difficulty_type, body_weight);
        }
        summary
    }
}

/// Totals over many workouts, e.g. the whole training history.
#[must_use]
pub fn lifetime_summary(
    workouts: &[Workout],
    catalog: &impl ExerciseCatalog,
    body_weight: Weight,
) -> Summary {
    workouts
        .iter()
        .map(|w| w.summarize(catalog, body_weight))
        .sum()
}
