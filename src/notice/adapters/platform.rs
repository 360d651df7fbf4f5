//! Notice repository backed by the platform data store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};

use crate::notice::{
    domain::{Notice, NoticeCategory, NoticeId, NoticeTag, TagId},
    ports::{NoticeRepository, NoticeRepositoryError, NoticeRepositoryResult},
};
use crate::platform::{
    domain::{Collection, Direction, Procedure, Query, Record, from_record, to_record},
    ports::DataStore,
};

/// One `notice_tag_assignments` row.
#[derive(Debug, Serialize, Deserialize)]
struct TagAssignment {
    notice_id: NoticeId,
    tag_id: TagId,
}

/// [`NoticeRepository`] over `notices`, `notice_tag_assignments`,
/// `notice_categories` and `notice_tags`.
#[derive(Debug)]
pub struct PlatformNoticeRepository<S: DataStore> {
    store: Arc<S>,
}

impl<S: DataStore> Clone for PlatformNoticeRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DataStore> PlatformNoticeRepository<S> {
    /// Creates a repository over the given store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn select<T: DeserializeOwned + Send>(
        &self,
        collection: Collection,
        query: &Query,
    ) -> NoticeRepositoryResult<Vec<T>> {
        self.store
            .select(collection, query)
            .await
            .map_err(NoticeRepositoryError::persistence)?
            .into_iter()
            .map(|row| from_record(row).map_err(NoticeRepositoryError::persistence))
            .collect()
    }

    async fn tag_map(
        &self,
        query: &Query,
    ) -> NoticeRepositoryResult<HashMap<NoticeId, Vec<TagId>>> {
        let rows: Vec<TagAssignment> = self.select(Collection::NoticeTagAssignments, query).await?;
        let mut tags: HashMap<NoticeId, Vec<TagId>> = HashMap::new();
        for row in rows {
            tags.entry(row.notice_id).or_default().push(row.tag_id);
        }
        Ok(tags)
    }
}

fn by_id(id: NoticeId) -> Query {
    Query::new().eq("id", id.to_string())
}

fn tags_of(id: NoticeId) -> Query {
    Query::new()
        .eq("notice_id", id.to_string())
        .order_by("tag_id", Direction::Ascending)
}

fn first_row<T: DeserializeOwned>(
    collection: Collection,
    rows: Vec<Record>,
) -> NoticeRepositoryResult<T> {
    let row = rows
        .into_iter()
        .next()
        .ok_or(NoticeRepositoryError::MissingRow(collection.as_str()))?;
    from_record(row).map_err(NoticeRepositoryError::persistence)
}

fn object(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}

#[async_trait]
impl<S: DataStore> NoticeRepository for PlatformNoticeRepository<S> {
    async fn store(&self, notice: &Notice) -> NoticeRepositoryResult<()> {
        let record = to_record(notice).map_err(NoticeRepositoryError::persistence)?;
        self.store
            .insert(Collection::Notices, vec![record])
            .await
            .map_err(NoticeRepositoryError::persistence)?;
        Ok(())
    }

    async fn find_by_id(&self, id: NoticeId) -> NoticeRepositoryResult<Option<Notice>> {
        let Some(notice) = self
            .select::<Notice>(Collection::Notices, &by_id(id).limit(1))
            .await?
            .into_iter()
            .next()
        else {
            return Ok(None);
        };
        let mut tags = self.tag_map(&tags_of(id)).await?;
        Ok(Some(notice.with_tag_ids(tags.remove(&id).unwrap_or_default())))
    }

    async fn list_all(&self) -> NoticeRepositoryResult<Vec<Notice>> {
        let query = Query::new()
            .order_by("is_pinned", Direction::Descending)
            .order_by("published_at", Direction::Descending);
        let notices: Vec<Notice> = self.select(Collection::Notices, &query).await?;
        let mut tags = self
            .tag_map(&Query::new().order_by("tag_id", Direction::Ascending))
            .await?;
        Ok(notices
            .into_iter()
            .map(|notice| {
                let tag_ids = tags.remove(&notice.id()).unwrap_or_default();
                notice.with_tag_ids(tag_ids)
            })
            .collect())
    }

    async fn delete(&self, id: NoticeId) -> NoticeRepositoryResult<()> {
        self.store
            .delete(
                Collection::NoticeTagAssignments,
                &Query::new().eq("notice_id", id.to_string()),
            )
            .await
            .map_err(NoticeRepositoryError::persistence)?;
        let removed = self
            .store
            .delete(Collection::Notices, &by_id(id))
            .await
            .map_err(NoticeRepositoryError::persistence)?;
        if removed == 0 {
            return Err(NoticeRepositoryError::NotFound(id));
        }
        Ok(())
    }

    async fn assign_tag(&self, notice_id: NoticeId, tag_id: TagId) -> NoticeRepositoryResult<()> {
        let record = to_record(&TagAssignment { notice_id, tag_id })
            .map_err(NoticeRepositoryError::persistence)?;
        match self
            .store
            .insert(Collection::NoticeTagAssignments, vec![record])
            .await
        {
            Ok(_) => Ok(()),
            Err(err) if err.is_unique_violation() => {
                Err(NoticeRepositoryError::DuplicateTagAssignment { notice_id, tag_id })
            }
            Err(err) => Err(NoticeRepositoryError::persistence(err)),
        }
    }

    async fn increment_views(&self, id: NoticeId) -> NoticeRepositoryResult<Option<i64>> {
        let result = self
            .store
            .rpc(
                Procedure::IncrementNoticeViews,
                json!({ "notice_id_param": id }),
            )
            .await
            .map_err(NoticeRepositoryError::persistence)?;
        Ok(result.as_i64())
    }

    async fn categories(&self) -> NoticeRepositoryResult<Vec<NoticeCategory>> {
        let query = Query::new().order_by("name", Direction::Ascending);
        self.select(Collection::NoticeCategories, &query).await
    }

    async fn tags(&self) -> NoticeRepositoryResult<Vec<NoticeTag>> {
        let query = Query::new().order_by("name", Direction::Ascending);
        self.select(Collection::NoticeTags, &query).await
    }

    async fn create_category(
        &self,
        name: &str,
        color: Option<&str>,
        icon: Option<&str>,
    ) -> NoticeRepositoryResult<NoticeCategory> {
        let record = object(json!({ "name": name, "color": color, "icon": icon }));
        let rows = self
            .store
            .insert(Collection::NoticeCategories, vec![record])
            .await
            .map_err(NoticeRepositoryError::persistence)?;
        first_row(Collection::NoticeCategories, rows)
    }

    async fn create_tag(&self, name: &str) -> NoticeRepositoryResult<NoticeTag> {
        let record = object(json!({ "name": name }));
        let rows = match self.store.insert(Collection::NoticeTags, vec![record]).await {
            Ok(rows) => rows,
            Err(err) if err.is_unique_violation() => {
                return Err(NoticeRepositoryError::DuplicateTagName(name.to_owned()));
            }
            Err(err) => return Err(NoticeRepositoryError::persistence(err)),
        };
        first_row(Collection::NoticeTags, rows)
    }
}
