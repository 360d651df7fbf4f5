//! Tests for notice construction, images, filtering and ordering.

use chrono::Duration;
use rstest::rstest;

use crate::clock::ManualClock;
use crate::identity::domain::{Principal, ProfileId, Role};
use crate::notice::domain::{
    CategoryId, ImageUpload, MAX_IMAGE_BYTES, NewNotice, Notice, NoticeDomainError, NoticeFilter,
    TagId, sort_notices,
};
use crate::platform::domain::{from_record, to_record};
use crate::test_support::fixed_now;

fn admin() -> Principal {
    Principal::new(ProfileId::new(), Role::Admin, "Ada Admin")
}

fn publish(title: &str, pinned: bool, clock: &ManualClock) -> Notice {
    let mut new_notice = NewNotice::new(title, "Body");
    if pinned {
        new_notice = new_notice.pinned();
    }
    Notice::new(new_notice, &admin(), clock).expect("valid notice")
}

#[rstest]
fn new_notice_records_author_and_time() {
    let clock = ManualClock::new(fixed_now());
    let author = admin();

    let notice = Notice::new(
        NewNotice::new("  Office closed  ", "Friday")
            .in_category(CategoryId::new(2))
            .with_video_url("https://video.test/1"),
        &author,
        &clock,
    )
    .expect("valid notice");

    assert_eq!(notice.title(), "Office closed");
    assert_eq!(notice.author_id(), Some(author.id()));
    assert_eq!(notice.author_name(), Some("Ada Admin"));
    assert_eq!(notice.category_id(), Some(CategoryId::new(2)));
    assert_eq!(notice.video_url(), Some("https://video.test/1"));
    assert_eq!(notice.view_count(), 0);
    assert_eq!(notice.published_at(), fixed_now());
    assert!(!notice.is_pinned());
}

#[rstest]
#[case("", "Body", NoticeDomainError::EmptyTitle)]
#[case("Title", "   ", NoticeDomainError::EmptyContent)]
fn blank_fields_are_rejected(
    #[case] title: &str,
    #[case] content: &str,
    #[case] expected: NoticeDomainError,
) {
    let clock = ManualClock::new(fixed_now());

    let err = Notice::new(NewNotice::new(title, content), &admin(), &clock)
        .expect_err("blank field must fail");

    assert_eq!(err, expected);
}

#[rstest]
fn blank_video_url_is_dropped() {
    let clock = ManualClock::new(fixed_now());

    let notice = Notice::new(
        NewNotice::new("Title", "Body").with_video_url("  "),
        &admin(),
        &clock,
    )
    .expect("valid notice");

    assert_eq!(notice.video_url(), None);
}

#[rstest]
fn tag_ids_are_not_written_with_the_row() {
    let clock = ManualClock::new(fixed_now());
    let notice = publish("Tagged", false, &clock).with_tag_ids(vec![TagId::new(1)]);

    let record = to_record(&notice).expect("record");
    let restored: Notice = from_record(record.clone()).expect("notice");

    assert!(!record.contains_key("tag_ids"));
    assert!(restored.tag_ids().is_empty());
    assert_eq!(restored.title(), "Tagged");
}

#[rstest]
fn pinned_notices_sort_first_then_newest() {
    let clock = ManualClock::new(fixed_now());
    let old_pinned = publish("Old pinned", true, &clock);
    clock.advance(Duration::hours(1));
    let fresh = publish("Fresh", false, &clock);
    clock.advance(Duration::hours(1));
    let new_pinned = publish("New pinned", true, &clock);
    let mut notices = vec![fresh, old_pinned, new_pinned];

    sort_notices(&mut notices);

    let titles: Vec<&str> = notices.iter().map(Notice::title).collect();
    assert_eq!(titles, ["New pinned", "Old pinned", "Fresh"]);
}

#[rstest]
fn filter_combines_category_and_tag() {
    let clock = ManualClock::new(fixed_now());
    let notice = Notice::new(
        NewNotice::new("Title", "Body").in_category(CategoryId::new(1)),
        &admin(),
        &clock,
    )
    .expect("valid notice")
    .with_tag_ids(vec![TagId::new(7)]);

    assert!(NoticeFilter::all().matches(&notice));
    assert!(NoticeFilter::all().in_category(CategoryId::new(1)).matches(&notice));
    assert!(NoticeFilter::all().tagged(TagId::new(7)).matches(&notice));
    assert!(
        NoticeFilter::all()
            .in_category(CategoryId::new(1))
            .tagged(TagId::new(7))
            .matches(&notice)
    );
    assert!(!NoticeFilter::all().in_category(CategoryId::new(2)).matches(&notice));
    assert!(
        !NoticeFilter::all()
            .in_category(CategoryId::new(1))
            .tagged(TagId::new(8))
            .matches(&notice)
    );
}

#[rstest]
#[case("photo.PNG", Ok("png".to_owned()))]
#[case("archive.tar.gz", Ok("gz".to_owned()))]
#[case("README", Err(NoticeDomainError::MissingImageExtension("README".to_owned())))]
#[case("trailing.", Err(NoticeDomainError::MissingImageExtension("trailing.".to_owned())))]
fn image_extension(#[case] file_name: &str, #[case] expected: Result<String, NoticeDomainError>) {
    let upload = ImageUpload::new(file_name, vec![0; 4], "image/png");

    assert_eq!(upload.extension(), expected);
}

#[rstest]
fn image_at_the_limit_is_accepted() {
    let upload = ImageUpload::new("big.jpg", vec![0; MAX_IMAGE_BYTES], "image/jpeg");

    assert_eq!(upload.validate(), Ok(()));
}

#[rstest]
fn image_over_the_limit_is_rejected() {
    let upload = ImageUpload::new("big.jpg", vec![0; MAX_IMAGE_BYTES + 1], "image/jpeg");

    assert_eq!(
        upload.validate(),
        Err(NoticeDomainError::ImageTooLarge {
            size: MAX_IMAGE_BYTES + 1,
            limit: MAX_IMAGE_BYTES,
        })
    );
}
