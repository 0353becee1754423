//! Resolution behavior: literal and dynamic matching, sibling order,
//! captures, canonicalization, and not-found reporting.

use path_router::{Capture, Matcher, NavigationState, Outcome, RegisterError};

mod common;

#[test]
fn test_literal_route_dispatch() {
    let (mut router, log) = common::recording_router::<&str>();
    router
        .register("/projects/list", |_, _| Outcome::Handled("list"))
        .unwrap();
    router
        .register("/projects/new", |_, _| Outcome::Handled("new"))
        .unwrap();

    assert!(router.route("/projects/new", NavigationState::Push).unwrap());
    assert!(router.route("/projects/list", NavigationState::Push).unwrap());

    let log = log.borrow();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].0.as_ref().unwrap().0, "new");
    assert_eq!(log[0].1, "/projects/new");
    assert_eq!(log[1].0.as_ref().unwrap().0, "list");
    assert_eq!(log[1].1, "/projects/list");
}

#[test]
fn test_captures_arrive_in_registration_order() {
    let (mut router, log) = common::recording_router::<String>();
    router
        .register(r"/projects/{[a-z]+}/tickets/{[0-9]+}", |_, captures| {
            let joined: Vec<&str> = captures.iter().map(|c| c.text().unwrap()).collect();
            Outcome::Handled(joined.join(","))
        })
        .unwrap();

    assert!(router
        .route("/projects/alpha/tickets/42", NavigationState::Push)
        .unwrap());
    assert_eq!(log.borrow()[0].0.as_ref().unwrap().0, "alpha,42");
}

#[test]
fn test_single_dynamic_segment_capture_is_first_argument() {
    let (mut router, log) = common::recording_router::<String>();
    router
        .register(r"/users/{[0-9]+}", |_, captures| {
            Outcome::Handled(captures[0].text().unwrap().to_string())
        })
        .unwrap();

    assert!(router.route("/users/7", NavigationState::Push).unwrap());
    assert_eq!(log.borrow()[0].0.as_ref().unwrap().0, "7");
}

#[test]
fn test_duplicate_route_rejected() {
    let (mut router, _log) = common::recording_router::<&str>();
    router
        .register("/users/me", |_, _| Outcome::Handled("a"))
        .unwrap();

    let err = router
        .register("/users/me", |_, _| Outcome::Handled("b"))
        .unwrap_err();
    assert!(matches!(err, RegisterError::DuplicateRoute { .. }));

    // Equivalent spellings address the same node.
    let err = router
        .register("users/me/", |_, _| Outcome::Handled("c"))
        .unwrap_err();
    assert!(matches!(err, RegisterError::DuplicateRoute { .. }));
}

#[test]
fn test_repeated_slashes_are_equivalent() {
    let (mut router, log) = common::recording_router::<&str>();
    router
        .register("/a/b", |_, _| Outcome::Handled("ab"))
        .unwrap();

    assert!(router.route("/a//b/", NavigationState::Push).unwrap());
    assert_eq!(log.borrow()[0].1, "/a/b");
}

#[test]
fn test_sibling_order_pattern_registered_first_wins() {
    let (mut router, log) = common::recording_router::<String>();
    router
        .register(r"/users/{[a-z]+}", |_, captures| {
            Outcome::Handled(format!("pattern:{}", captures[0].text().unwrap()))
        })
        .unwrap();
    router
        .register("/users/me", |_, _| Outcome::Handled("literal".to_string()))
        .unwrap();

    // Siblings are tried in registration order, not by specificity: the
    // pattern accepts "me", so the literal sibling is never consulted.
    assert!(router.route("/users/me", NavigationState::Push).unwrap());
    assert_eq!(log.borrow()[0].0.as_ref().unwrap().0, "pattern:me");
}

#[test]
fn test_sibling_order_literal_registered_first_wins() {
    let (mut router, log) = common::recording_router::<String>();
    router
        .register("/users/me", |_, _| Outcome::Handled("literal".to_string()))
        .unwrap();
    router
        .register(r"/users/{[a-z]+}", |_, captures| {
            Outcome::Handled(format!("pattern:{}", captures[0].text().unwrap()))
        })
        .unwrap();

    assert!(router.route("/users/me", NavigationState::Push).unwrap());
    assert_eq!(log.borrow()[0].0.as_ref().unwrap().0, "literal");

    assert!(router.route("/users/kim", NavigationState::Push).unwrap());
    assert_eq!(log.borrow()[1].0.as_ref().unwrap().0, "pattern:kim");
}

#[test]
fn test_not_found_notifies_null_context() {
    let (mut router, log) = common::recording_router::<&str>();
    router.register("/a", |_, _| Outcome::Handled("a")).unwrap();

    assert!(!router.route("/nope/nothing", NavigationState::Push).unwrap());

    let log = log.borrow();
    assert_eq!(log.len(), 1);
    assert!(log[0].0.is_none());
    assert_eq!(log[0].1, "/nope/nothing");
}

#[test]
fn test_percent_roundtrip_in_canonical_path() {
    let (mut router, log) = common::recording_router::<String>();
    router
        .register("/files/{.+}", |_, captures| {
            Outcome::Handled(captures[0].text().unwrap().to_string())
        })
        .unwrap();

    assert!(router
        .route("/files/caf%C3%A9", NavigationState::Push)
        .unwrap());

    let log = log.borrow();
    // Matching saw the decoded segment; the notification re-encoded it.
    assert_eq!(log[0].0.as_ref().unwrap().0, "café");
    assert_eq!(log[0].1, "/files/caf%C3%A9");
}

#[test]
fn test_declined_handler_tries_next_sibling() {
    let (mut router, log) = common::recording_router::<&str>();
    router
        .register(r"/items/{[a-z0-9]+}", |_, captures| {
            if captures[0].text().unwrap().starts_with("legacy") {
                Outcome::Declined
            } else {
                Outcome::Handled("first")
            }
        })
        .unwrap();
    router
        .register(r"/items/{legacy.*}", |_, _| Outcome::Handled("second"))
        .unwrap();

    assert!(router.route("/items/legacy7", NavigationState::Push).unwrap());
    assert_eq!(log.borrow()[0].0.as_ref().unwrap().0, "second");

    assert!(router.route("/items/fresh", NavigationState::Push).unwrap());
    assert_eq!(log.borrow()[1].0.as_ref().unwrap().0, "first");
}

#[test]
fn test_scoped_registration_equals_flat() {
    let (mut router, log) = common::recording_router::<&str>();
    let mut settings = router
        .register("/settings", |_, _| Outcome::Handled("settings"))
        .unwrap();
    settings
        .register("/profile", |_, _| Outcome::Handled("profile"))
        .unwrap();
    assert_eq!(settings.prefix(), "/settings");

    assert!(router.route("/settings", NavigationState::Push).unwrap());
    assert!(router
        .route("/settings/profile", NavigationState::Push)
        .unwrap());

    let log = log.borrow();
    assert_eq!(log[0].0.as_ref().unwrap().0, "settings");
    assert_eq!(log[1].0.as_ref().unwrap().0, "profile");
    assert_eq!(log[1].1, "/settings/profile");
}

#[test]
fn test_root_route() {
    let (mut router, log) = common::recording_router::<&str>();
    router.register("/", |_, _| Outcome::Handled("home")).unwrap();

    assert!(router.route("/", NavigationState::Push).unwrap());
    assert!(router.route("", NavigationState::Push).unwrap());

    let log = log.borrow();
    assert_eq!(log[0].1, "/");
    assert_eq!(log[1].1, "/");
}

#[test]
fn test_explicit_matcher_sequence_with_predicate() {
    let (mut router, log) = common::recording_router::<String>();
    let pattern = vec![
        Matcher::literal("users"),
        Matcher::predicate(|segment| {
            segment
                .strip_prefix('@')
                .map(|rest| Capture::Text(rest.to_string()))
        }),
    ];
    router
        .register(pattern, |_, captures| {
            Outcome::Handled(captures[0].text().unwrap().to_string())
        })
        .unwrap();

    assert!(router.route("/users/@alice", NavigationState::Push).unwrap());
    assert_eq!(log.borrow()[0].0.as_ref().unwrap().0, "alice");

    assert!(!router.route("/users/alice", NavigationState::Push).unwrap());
}

#[test]
fn test_sticky_pattern_hands_groups_to_handler() {
    let (mut router, log) = common::recording_router::<String>();
    let pattern = vec![
        Matcher::literal("tickets"),
        Matcher::pattern_sticky(r"^([A-Z]+)-([0-9]+)$").unwrap(),
    ];
    router
        .register(pattern, |_, captures| match &captures[0] {
            Capture::Groups(groups) => Outcome::Handled(format!(
                "{}/{}",
                groups[1].as_deref().unwrap(),
                groups[2].as_deref().unwrap()
            )),
            Capture::Text(_) => Outcome::Declined,
        })
        .unwrap();

    assert!(router.route("/tickets/CORE-42", NavigationState::Push).unwrap());
    assert_eq!(log.borrow()[0].0.as_ref().unwrap().0, "CORE/42");
}

#[test]
fn test_current_path_tracks_successes_only() {
    let (mut router, _log) = common::recording_router::<&str>();
    router.register("/a", |_, _| Outcome::Handled("a")).unwrap();

    assert_eq!(router.current_path(), None);

    router.route("/a/", NavigationState::Push).unwrap();
    assert_eq!(router.current_path(), Some("/a"));

    router.route("/missing", NavigationState::Push).unwrap();
    assert_eq!(router.current_path(), Some("/a"));
}

#[test]
fn test_invalid_template_fails_registration() {
    let (mut router, _log) = common::recording_router::<&str>();
    let err = router
        .register("/bad/{[0-9", |_, _| Outcome::Handled("x"))
        .unwrap_err();
    assert!(matches!(err, RegisterError::InvalidMatcher { .. }));
}
