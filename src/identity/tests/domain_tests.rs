//! Tests for profile and role domain types.

use rstest::rstest;

use crate::identity::domain::{Profile, ProfileId, ProfileUpdate, Role};
use crate::platform::domain::{from_record, to_record};
use crate::test_support::manual_clock;

#[rstest]
#[case("admin", Role::Admin)]
#[case(" Collaborator ", Role::Collaborator)]
#[case("MEMBER", Role::Member)]
fn roles_parse_case_insensitively(#[case] raw: &str, #[case] expected: Role) {
    assert_eq!(Role::try_from(raw), Ok(expected));
}

#[rstest]
fn unknown_role_is_rejected() {
    assert!(Role::try_from("owner").is_err());
}

#[rstest]
#[case(Some("Ada Lovelace"), "Ada Lovelace")]
#[case(Some("   "), "ada@example.com")]
#[case(None, "ada@example.com")]
fn display_name_falls_back_to_email(#[case] full_name: Option<&str>, #[case] expected: &str) {
    let clock = manual_clock();
    let profile = Profile::new(
        ProfileId::new(),
        "ada@example.com",
        full_name.map(str::to_owned),
        &*clock,
    );

    assert_eq!(profile.display_name(), expected);
    assert_eq!(profile.role(), Role::Member);
}

#[rstest]
fn update_trims_and_clears_blank_fields() {
    let clock = manual_clock();
    let mut profile = Profile::new(ProfileId::new(), "a@x.io", Some("A".to_owned()), &*clock);
    clock.advance(chrono::Duration::minutes(1));

    profile.apply_update(
        ProfileUpdate::new()
            .with_full_name("  Ada  ")
            .with_phone(" ")
            .with_designation("Engineer")
            .with_present(true),
        &*clock,
    );

    assert_eq!(profile.full_name(), Some("Ada"));
    assert_eq!(profile.phone(), None);
    assert_eq!(profile.designation(), Some("Engineer"));
    assert!(profile.present());
    assert!(profile.updated_at() > profile.created_at());
}

#[rstest]
fn profile_record_uses_column_names() {
    let clock = manual_clock();
    let profile = Profile::new(ProfileId::new(), "a@x.io", None, &*clock);

    let record = to_record(&profile).expect("record");
    let restored: Profile = from_record(record.clone()).expect("profile");

    assert_eq!(record.get("role"), Some(&serde_json::json!("member")));
    assert!(record.contains_key("full_name"));
    assert_eq!(restored, profile);
}
