use std::collections::BTreeMap;

use derive_more::Deref;
use uuid::Uuid;

use crate::Name;

/// Lookup of how the sets of an exercise definition are measured.
///
/// The catalog itself lives outside of this crate. Everything that needs to interpret a
/// [`Difficulty`](crate::Difficulty) payload only depends on this trait.
pub trait ExerciseCatalog {
    fn difficulty_type(&self, id: ExerciseMetaID) -> Option<DifficultyType>;
}

impl ExerciseCatalog for BTreeMap<ExerciseMetaID, DifficultyType> {
    fn difficulty_type(&self, id: ExerciseMetaID) -> Option<DifficultyType> {
        self.get(&id).copied()
    }
}

impl ExerciseCatalog for BTreeMap<ExerciseMetaID, ExerciseMeta> {
    fn difficulty_type(&self, id: ExerciseMetaID) -> Option<DifficultyType> {
        self.get(&id).map(|meta| meta.difficulty_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseMeta {
    pub id: ExerciseMetaID,
    pub name: Name,
    pub difficulty_type: DifficultyType,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseMetaID(Uuid);

impl ExerciseMetaID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseMetaID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseMetaID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
)]
#[strum(serialize_all = "kebab-case")]
pub enum DifficultyType {
    Weight,
    BodyWeight,
    WeightedBodyWeight,
    Time,
}

impl DifficultyType {
    #[must_use]
    pub fn includes_body_weight(self) -> bool {
        match self {
            DifficultyType::BodyWeight | DifficultyType::WeightedBodyWeight => true,
            DifficultyType::Weight | DifficultyType::Time => false,
        }
    }

    #[must_use]
    pub fn counts_reps(self) -> bool {
        match self {
            DifficultyType::Weight
            | DifficultyType::BodyWeight
            | DifficultyType::WeightedBodyWeight => true,
            DifficultyType::Time => false,
        }
    }
}
