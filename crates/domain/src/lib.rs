#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

mod catalog;
mod cursor;
mod difficulty;
mod error;
mod exercise_actions;
mod measure;
mod name;
mod rest;
mod service;
mod set;
mod set_actions;
mod summary;
mod workout;
mod workout_actions;

pub use catalog::*;
pub use cursor::*;
pub use difficulty::*;
pub use error::*;
pub use exercise_actions::*;
pub use measure::*;
pub use name::*;
pub use rest::*;
pub use service::*;
pub use set::*;
pub use set_actions::*;
pub use summary::*;
pub use workout::*;
pub use workout_actions::*;
