use crate::{DifficultyType, Reps, Time, Weight};

/// Effort of a single set.
///
/// The shape of the payload is determined by the [`DifficultyType`] of the exercise definition.
/// `BodyWeight` carries the load added on top of the trainee's body weight, which is zero for
/// plain body weight exercises.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Difficulty {
    Weight { weight: Weight, reps: Reps },
    BodyWeight { added_weight: Weight, reps: Reps },
    Time { time: Time },
}

impl Difficulty {
    #[must_use]
    pub fn zero(difficulty_type: DifficultyType) -> Self {
        match difficulty_type {
            DifficultyType::Weight => Difficulty::Weight {
                weight: Weight::ZERO,
                reps: Reps::ZERO,
            },
            DifficultyType::BodyWeight | DifficultyType::WeightedBodyWeight => {
                Difficulty::BodyWeight {
                    added_weight: Weight::ZERO,
                    reps: Reps::ZERO,
                }
            }
            DifficultyType::Time => Difficulty::Time { time: Time::ZERO },
        }
    }

    /// Type used when no catalog entry is available.
    #[must_use]
    pub fn natural_type(&self) -> DifficultyType {
        match self {
            Difficulty::Weight { .. } => DifficultyType::Weight,
            Difficulty::BodyWeight { .. } => DifficultyType::WeightedBodyWeight,
            Difficulty::Time { .. } => DifficultyType::Time,
        }
    }

    #[must_use]
    pub fn fits(&self, difficulty_type: DifficultyType) -> bool {
        matches!(
            (self, difficulty_type),
            (Difficulty::Weight { .. }, DifficultyType::Weight)
                | (
                    Difficulty::BodyWeight { .. },
                    DifficultyType::BodyWeight | DifficultyType::WeightedBodyWeight
                )
                | (Difficulty::Time { .. }, DifficultyType::Time)
        )
    }

    #[must_use]
    pub fn reps(&self) -> Option<Reps> {
        match self {
            Difficulty::Weight { reps, .. } | Difficulty::BodyWeight { reps, .. } => Some(*reps),
            Difficulty::Time { .. } => None,
        }
    }

    /// Moved weight for the given body weight.
    ///
    /// The body weight only counts for body weight exercises. Plain body weight exercises ignore
    /// any added weight that may be left over from an earlier edit.
    #[must_use]
    pub fn volume(&self, difficulty_type: DifficultyType, body_weight: Weight) -> f32 {
        let body_weight = if difficulty_type.includes_body_weight() {
            body_weight
        } else {
            Weight::ZERO
        };
        match self {
            Difficulty::Weight { weight, reps } => *weight * *reps,
            Difficulty::BodyWeight { reps, .. }
                if difficulty_type == DifficultyType::BodyWeight =>
            {
                body_weight * *reps
            }
            Difficulty::BodyWeight { added_weight, reps } => {
                #[allow(clippy::cast_precision_loss)]
                let reps = u32::from(*reps) as f32;
                (body_weight + *added_weight) * reps
            }
            Difficulty::Time { .. } => 0.0,
        }
    }

    #[must_use]
    pub fn hold_time(&self) -> Option<Time> {
        match self {
            Difficulty::Time { time } => Some(*time),
            Difficulty::Weight { .. } | Difficulty::BodyWeight { .. } => None,
        }
    }
}
