//! Unit tests for claims, roles and access levels.

use crate::auth::{AccessLevel, Claims, Role};
use chrono::{Duration, Utc};
use rstest::rstest;
use uuid::Uuid;

#[test]
fn test_claims_new_sets_correct_fields() {
    let user_id = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::hours(1);

    let claims = Claims::new(user_id, expires_at);

    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.user_id(), user_id);
    assert!(claims.iat <= Utc::now().timestamp());
    assert_eq!(claims.exp, expires_at.timestamp());
}

#[rstest]
#[case("Admin", Some(Role::Admin))]
#[case("bookkeeper", Some(Role::Bookkeeper))]
#[case(" REPORTVIEWER ", Some(Role::ReportViewer))]
#[case("Registered", None)]
#[case("", None)]
fn test_role_parse(#[case] name: &str, #[case] expected: Option<Role>) {
    assert_eq!(Role::parse(name), expected);
}

#[rstest]
#[case(&[Role::Admin], AccessLevel::Admin, true, true)]
#[case(&[Role::ReportViewer, Role::Bookkeeper], AccessLevel::Bookkeeper, true, true)]
#[case(&[Role::ReportViewer], AccessLevel::ReportViewer, true, false)]
#[case(&[Role::Bookkeeper, Role::Admin], AccessLevel::Admin, true, true)]
#[case(&[], AccessLevel::Registered, false, false)]
fn test_access_level_from_roles(
    #[case] roles: &[Role],
    #[case] level: AccessLevel,
    #[case] read: bool,
    #[case] write: bool,
) {
    let resolved = AccessLevel::from_roles(roles.iter().copied());
    assert_eq!(resolved, level);
    assert_eq!(resolved.can_read(), read);
    assert_eq!(resolved.can_write(), write);
}

#[rstest]
#[case("Registered", Some(AccessLevel::Registered))]
#[case(" Bookkeeper ", Some(AccessLevel::Bookkeeper))]
#[case("ReportViewer", Some(AccessLevel::ReportViewer))]
#[case("Admin", None)]
#[case("bookkeeper", None)]
#[case("", None)]
fn test_parse_assignable(#[case] name: &str, #[case] expected: Option<AccessLevel>) {
    assert_eq!(AccessLevel::parse_assignable(name), expected);
}

#[test]
fn test_level_role_mapping() {
    assert_eq!(AccessLevel::Registered.role(), None);
    for role in Role::ALL {
        assert_eq!(AccessLevel::from_roles([role]).role(), Some(role));
    }
}

#[test]
fn test_role_names_round_trip() {
    for role in Role::ALL {
        assert_eq!(Role::parse(role.as_str()), Some(role));
        assert_eq!(role.to_string(), role.as_str());
    }
    assert_eq!(AccessLevel::Registered.as_str(), "Registered");
}
