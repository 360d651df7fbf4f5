//! Publishing, reading and removing notices.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{NoticeServiceError, NoticeServiceResult};
use crate::access::{Action, Resource, authorize};
use crate::identity::domain::Principal;
use crate::notice::{
    domain::{
        ImageUpload, NewNotice, Notice, NoticeCategory, NoticeDomainError, NoticeFilter,
        NoticeId, NoticeTag, TagId, sort_notices,
    },
    ports::{NoticeRepository, NoticeRepositoryError},
};
use crate::platform::ports::ObjectStorage;

/// Bucket notice images are uploaded to unless configured otherwise.
pub const DEFAULT_IMAGE_BUCKET: &str = "notice-images";

const UPLOAD_SUFFIX_LEN: usize = 12;

/// Notice board service.
#[derive(Clone)]
pub struct NoticeService<R, O, C>
where
    R: NoticeRepository,
    O: ObjectStorage,
    C: Clock + Send + Sync,
{
    notices: Arc<R>,
    storage: Arc<O>,
    clock: Arc<C>,
    bucket: String,
}

impl<R, O, C> NoticeService<R, O, C>
where
    R: NoticeRepository,
    O: ObjectStorage,
    C: Clock + Send + Sync,
{
    /// Creates a notice service uploading to [`DEFAULT_IMAGE_BUCKET`].
    #[must_use]
    pub fn new(notices: Arc<R>, storage: Arc<O>, clock: Arc<C>) -> Self {
        Self {
            notices,
            storage,
            clock,
            bucket: DEFAULT_IMAGE_BUCKET.to_owned(),
        }
    }

    /// Overrides the image bucket.
    #[must_use]
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Publishes a notice with optional tags and image.
    ///
    /// The image is uploaded first and its public URL stored on the notice.
    /// Repeated tag ids are attached once.
    ///
    /// # Errors
    ///
    /// Returns [`NoticeServiceError::Access`] unless the author is an admin,
    /// [`NoticeServiceError::Domain`] for blank fields or a rejected image,
    /// and [`NoticeServiceError::Storage`] when the upload fails.
    pub async fn create_notice(
        &self,
        new_notice: NewNotice,
        tag_ids: &[TagId],
        image: Option<ImageUpload>,
        author: &Principal,
    ) -> NoticeServiceResult<Notice> {
        authorize(author, &Action::PublishNotice, &Resource::None)?;
        let mut notice = Notice::new(new_notice, author, &*self.clock)?;
        if let Some(upload) = image {
            let url = self.upload_image(upload).await?;
            notice.set_image_url(url);
        }
        self.notices.store(&notice).await?;
        self.attach_tags(notice.id(), tag_ids).await?;
        info!(
            notice_id = %notice.id(),
            author = %author.id(),
            pinned = notice.is_pinned(),
            tags = tag_ids.len(),
            "notice published"
        );
        self.get_notice(notice.id()).await
    }

    async fn upload_image(&self, upload: ImageUpload) -> NoticeServiceResult<String> {
        upload.validate()?;
        let extension = upload.extension()?;
        let path = self.upload_path(&extension);
        self.storage
            .upload(&self.bucket, &path, upload.into_object())
            .await?;
        debug!(bucket = %self.bucket, path = %path, "notice image uploaded");
        Ok(self.storage.public_url(&self.bucket, &path))
    }

    fn upload_path(&self, extension: &str) -> String {
        let millis = self.clock.utc().timestamp_millis();
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(UPLOAD_SUFFIX_LEN)
            .collect();
        format!("{millis}-{suffix}.{extension}")
    }

    async fn attach_tags(&self, notice_id: NoticeId, tag_ids: &[TagId]) -> NoticeServiceResult<()> {
        let mut attached: Vec<TagId> = Vec::with_capacity(tag_ids.len());
        for &tag_id in tag_ids {
            if attached.contains(&tag_id) {
                warn!(notice_id = %notice_id, tag_id = %tag_id, "duplicate tag ignored");
                continue;
            }
            match self.notices.assign_tag(notice_id, tag_id).await {
                Ok(()) => {}
                Err(NoticeRepositoryError::DuplicateTagAssignment { .. }) => {
                    warn!(
                        notice_id = %notice_id,
                        tag_id = %tag_id,
                        "tag already attached; skipping"
                    );
                }
                Err(err) => return Err(err.into()),
            }
            attached.push(tag_id);
        }
        Ok(())
    }

    /// Deletes a notice and its tag assignments.
    ///
    /// # Errors
    ///
    /// Returns [`NoticeServiceError::Access`] unless the requester is an
    /// admin and [`NoticeServiceError::NoticeNotFound`] for an unknown id.
    pub async fn delete_notice(
        &self,
        notice_id: NoticeId,
        requester: &Principal,
    ) -> NoticeServiceResult<()> {
        authorize(requester, &Action::DeleteNotice, &Resource::None)?;
        self.notices.delete(notice_id).await.map_err(|err| match err {
            NoticeRepositoryError::NotFound(id) => NoticeServiceError::NoticeNotFound(id),
            other => other.into(),
        })?;
        info!(notice_id = %notice_id, deleted_by = %requester.id(), "notice deleted");
        Ok(())
    }

    /// Records one view and returns the new count.
    ///
    /// Every call counts; repeated opens by the same reader are not merged.
    ///
    /// # Errors
    ///
    /// Returns [`NoticeServiceError::NoticeNotFound`] for an unknown id.
    pub async fn increment_view(&self, notice_id: NoticeId) -> NoticeServiceResult<i64> {
        self.notices
            .increment_views(notice_id)
            .await?
            .ok_or(NoticeServiceError::NoticeNotFound(notice_id))
    }

    /// Loads a notice with its tags.
    ///
    /// # Errors
    ///
    /// Returns [`NoticeServiceError::NoticeNotFound`] for an unknown id.
    pub async fn get_notice(&self, notice_id: NoticeId) -> NoticeServiceResult<Notice> {
        self.notices
            .find_by_id(notice_id)
            .await?
            .ok_or(NoticeServiceError::NoticeNotFound(notice_id))
    }

    /// Lists notices matching `filter`, pinned first, then newest first.
    ///
    /// # Errors
    ///
    /// Returns [`NoticeServiceError::Repository`] when the read fails.
    pub async fn list_notices(&self, filter: NoticeFilter) -> NoticeServiceResult<Vec<Notice>> {
        let mut notices: Vec<Notice> = self
            .notices
            .list_all()
            .await?
            .into_iter()
            .filter(|notice| filter.matches(notice))
            .collect();
        sort_notices(&mut notices);
        Ok(notices)
    }

    /// Lists categories by name.
    ///
    /// # Errors
    ///
    /// Returns [`NoticeServiceError::Repository`] when the read fails.
    pub async fn categories(&self) -> NoticeServiceResult<Vec<NoticeCategory>> {
        Ok(self.notices.categories().await?)
    }

    /// Lists tags by name.
    ///
    /// # Errors
    ///
    /// Returns [`NoticeServiceError::Repository`] when the read fails.
    pub async fn tags(&self) -> NoticeServiceResult<Vec<NoticeTag>> {
        Ok(self.notices.tags().await?)
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns [`NoticeServiceError::Access`] unless the requester is an
    /// admin and [`NoticeServiceError::Domain`] for a blank name.
    pub async fn create_category(
        &self,
        name: &str,
        color: Option<&str>,
        icon: Option<&str>,
        requester: &Principal,
    ) -> NoticeServiceResult<NoticeCategory> {
        authorize(requester, &Action::ManageNoticeTaxonomy, &Resource::None)?;
        let category = self
            .notices
            .create_category(non_blank(name)?, color, icon)
            .await?;
        info!(category_id = %category.id, name = %category.name, "notice category created");
        Ok(category)
    }

    /// Creates a tag.
    ///
    /// # Errors
    ///
    /// Returns [`NoticeServiceError::Access`] unless the requester is an
    /// admin, [`NoticeServiceError::Domain`] for a blank name and a
    /// conflict when the name is taken.
    pub async fn create_tag(
        &self,
        name: &str,
        requester: &Principal,
    ) -> NoticeServiceResult<NoticeTag> {
        authorize(requester, &Action::ManageNoticeTaxonomy, &Resource::None)?;
        let tag = self.notices.create_tag(non_blank(name)?).await?;
        info!(tag_id = %tag.id, name = %tag.name, "notice tag created");
        Ok(tag)
    }
}

fn non_blank(name: &str) -> Result<&str, NoticeDomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(NoticeDomainError::EmptyName)
    } else {
        Ok(trimmed)
    }
}
