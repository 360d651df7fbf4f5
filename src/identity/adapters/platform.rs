//! Profile repository backed by the platform data store.

use std::sync::Arc;

use async_trait::async_trait;
use crate::identity::{
    domain::{Profile, ProfileId},
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};
use crate::platform::{
    domain::{Collection, OnConflict, Query, from_record, to_record},
    ports::DataStore,
};

/// [`ProfileRepository`] over the `profiles` collection.
#[derive(Debug)]
pub struct PlatformProfileRepository<S: DataStore> {
    store: Arc<S>,
}

impl<S: DataStore> Clone for PlatformProfileRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DataStore> PlatformProfileRepository<S> {
    /// Creates a repository over the given store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn delete_where(
        &self,
        collection: Collection,
        query: &Query,
    ) -> ProfileRepositoryResult<usize> {
        self.store
            .delete(collection, query)
            .await
            .map_err(ProfileRepositoryError::persistence)
    }
}

fn by_id(id: ProfileId) -> Query {
    Query::new().eq("id", id.to_string())
}

#[async_trait]
impl<S: DataStore> ProfileRepository for PlatformProfileRepository<S> {
    async fn find_by_id(&self, id: ProfileId) -> ProfileRepositoryResult<Option<Profile>> {
        self.store
            .select(Collection::Profiles, &by_id(id).limit(1))
            .await
            .map_err(ProfileRepositoryError::persistence)?
            .into_iter()
            .next()
            .map(|row| from_record(row).map_err(ProfileRepositoryError::persistence))
            .transpose()
    }

    async fn list_all(&self) -> ProfileRepositoryResult<Vec<Profile>> {
        self.store
            .select(Collection::Profiles, &Query::new())
            .await
            .map_err(ProfileRepositoryError::persistence)?
            .into_iter()
            .map(|row| from_record(row).map_err(ProfileRepositoryError::persistence))
            .collect()
    }

    async fn provision(&self, profile: &Profile) -> ProfileRepositoryResult<bool> {
        let record = to_record(profile).map_err(ProfileRepositoryError::persistence)?;
        let stored = self
            .store
            .upsert(Collection::Profiles, record, &OnConflict::ignore(&["id"]))
            .await
            .map_err(ProfileRepositoryError::persistence)?;
        Ok(stored.is_some())
    }

    async fn update(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let patch = to_record(profile).map_err(ProfileRepositoryError::persistence)?;
        let updated = self
            .store
            .update(Collection::Profiles, &by_id(profile.id()), patch)
            .await
            .map_err(ProfileRepositoryError::persistence)?;
        if updated.is_empty() {
            return Err(ProfileRepositoryError::NotFound(profile.id()));
        }
        Ok(())
    }

    async fn delete(&self, id: ProfileId) -> ProfileRepositoryResult<()> {
        if self.find_by_id(id).await?.is_none() {
            return Err(ProfileRepositoryError::NotFound(id));
        }
        let user = id.to_string();
        let owned_tasks = self
            .store
            .select(Collection::Tasks, &Query::new().eq("primary_poc", user.as_str()))
            .await
            .map_err(ProfileRepositoryError::persistence)?;
        for task_id in owned_tasks.iter().filter_map(|task| task.get("id")).cloned() {
            let by_task = Query::new().eq("task_id", task_id.clone());
            self.delete_where(Collection::TaskComments, &by_task).await?;
            self.delete_where(Collection::TaskAssignments, &by_task).await?;
            self.delete_where(Collection::Tasks, &Query::new().eq("id", task_id))
                .await?;
        }

        let by_user = Query::new().eq("user_id", user.as_str());
        self.delete_where(Collection::TaskAssignments, &by_user).await?;
        self.delete_where(Collection::TaskComments, &by_user).await?;
        self.delete_where(Collection::DailyAttendance, &by_user).await?;

        self.delete_where(Collection::Profiles, &by_id(id)).await?;
        tracing::debug!(
            profile_id = %id,
            tasks = owned_tasks.len(),
            "profile deleted with owned tasks"
        );
        Ok(())
    }
}
