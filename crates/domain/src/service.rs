use log::{debug, error};

use crate::{
    CreateError, DeleteError, ReadError, UpdateError, Workout, WorkoutID, WorkoutRepository,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn get_workout(&self, id: WorkoutID) -> Result<Workout, ReadError>;
    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError>;
    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_workouts(),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn get_workout(&self, id: WorkoutID) -> Result<Workout, ReadError> {
        log_on_error!(
            self.repository.read_workout(id),
            ReadError,
            "get",
            "workout"
        )
    }

    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError> {
        log_on_error!(
            self.repository.create_workout(workout),
            CreateError,
            "create",
            "workout"
        )
    }

    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError> {
        log_on_error!(
            self.repository.replace_workout(workout),
            UpdateError,
            "replace",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::BTreeMap};

    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use crate::{
        SetActions, StorageError,
        workout::tests::{NOW, workout_in_progress},
    };

    use super::*;

    #[derive(Default)]
    struct Repository {
        workouts: RefCell<BTreeMap<WorkoutID, Workout>>,
        offline: bool,
    }

    impl Repository {
        fn check_connection(&self) -> Result<(), StorageError> {
            if self.offline {
                Err(StorageError::NoConnection)
            } else {
                Ok(())
            }
        }
    }

    impl WorkoutRepository for Repository {
        async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError> {
            self.check_connection()?;
            Ok(self.workouts.borrow().values().cloned().collect())
        }

        async fn read_workout(&self, id: WorkoutID) -> Result<Workout, ReadError> {
            self.check_connection()?;
            self.workouts
                .borrow()
                .get(&id)
                .cloned()
                .ok_or(ReadError::NotFound)
        }

        async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError> {
            self.check_connection()?;
            let mut workouts = self.workouts.borrow_mut();
            if workouts.contains_key(&workout.id) {
                return Err(CreateError::Conflict);
            }
            workouts.insert(workout.id, workout.clone());
            Ok(workout)
        }

        async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError> {
            self.check_connection()?;
            let mut workouts = self.workouts.borrow_mut();
            match workouts.get_mut(&workout.id) {
                Some(stored) => {
                    *stored = workout.clone();
                    Ok(workout)
                }
                None => Err(UpdateError::NotFound),
            }
        }

        async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
            self.check_connection()?;
            self.workouts
                .borrow_mut()
                .remove(&id)
                .map(|_| id)
                .ok_or(DeleteError::NotFound)
        }
    }

    #[test]
    fn test_service_round_trip() {
        let service = Service::new(Repository::default());
        let workout = workout_in_progress();

        let created = block_on(service.create_workout(workout.clone())).unwrap();
        assert_eq!(created, workout);
        assert!(matches!(
            block_on(service.create_workout(workout.clone())),
            Err(CreateError::Conflict)
        ));

        let edited = SetActions::new(&workout, 12.into()).finish(*NOW);
        assert_eq!(block_on(service.replace_workout(edited.clone())).unwrap(), edited);
        assert_eq!(block_on(service.get_workout(workout.id)).unwrap(), edited);
        assert_eq!(block_on(service.get_workouts()).unwrap(), vec![edited]);

        assert_eq!(block_on(service.delete_workout(workout.id)).unwrap(), workout.id);
        assert!(matches!(
            block_on(service.get_workout(workout.id)),
            Err(ReadError::NotFound)
        ));
        assert!(matches!(
            block_on(service.delete_workout(workout.id)),
            Err(DeleteError::NotFound)
        ));
    }

    #[test]
    fn test_service_without_connection() {
        let service = Service::new(Repository {
            offline: true,
            ..Repository::default()
        });
        assert!(matches!(
            block_on(service.get_workouts()),
            Err(ReadError::Storage(StorageError::NoConnection))
        ));
        assert!(matches!(
            block_on(service.replace_workout(workout_in_progress())),
            Err(UpdateError::Storage(StorageError::NoConnection))
        ));
    }
}
