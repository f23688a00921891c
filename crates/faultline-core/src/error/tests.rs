//! Tests for the error value model

use super::*;
use crate::classification::Classification;
use serde_json::json;
use std::error::Error as StdError;

fn three_links() -> AppError {
    AppError::new("c3", "m3")
        .with_cause(AppError::new("c2", "m2").with_cause(AppError::new("c1", "m1")))
}

#[inline(never)]
fn load_user() -> AppError {
    AppError::not_found("USER_NOT_FOUND", "user not found")
}

#[test]
fn test_display_uses_code_and_message() {
    let err = AppError::internal("DB_DOWN", "database unavailable");
    assert_eq!(err.to_string(), "DB_DOWN: database unavailable");

    let err = AppError::foreign("connection reset");
    assert_eq!(err.to_string(), "connection reset");

    let err = AppError::new("", "no code given");
    assert_eq!(err.code(), GENERIC_CODE);
    assert_eq!(err.to_string(), "no code given");
}

#[test]
fn test_new_defaults() {
    let err = AppError::new("c1", "m1");
    assert_eq!(err.classification(), Classification::None);
    assert_eq!(err.status_code(), None);
    assert!(err.cause().is_none());
    assert!(err.input().is_none());
    assert!(!err.panic());
}

#[test]
fn test_constructors_set_classification() {
    let cases = [
        (AppError::bad_request("c", "m"), Classification::BadRequest, 400),
        (AppError::unauthorized("c", "m"), Classification::Unauthorized, 401),
        (AppError::forbidden("c", "m"), Classification::Forbidden, 403),
        (AppError::not_found("c", "m"), Classification::NotFound, 404),
        (AppError::timeout("c", "m"), Classification::Timeout, 441),
        (AppError::internal("c", "m"), Classification::InternalError, 500),
        (AppError::not_implemented("c", "m"), Classification::NotImplemented, 501),
        (AppError::unavailable("c", "m"), Classification::Unavailable, 503),
        (AppError::unknown("c", "m"), Classification::Unknown, 520),
    ];

    for (err, class, status) in cases {
        assert_eq!(err.classification(), class);
        assert_eq!(err.status_code(), Some(status));
    }
}

#[test]
fn test_constructor_stack_points_at_caller() {
    let err = load_user();
    let trace = err.stacktrace().expect("debug builds resolve symbols");

    assert_eq!(trace.caller().function, "load_user");
    assert!(
        trace
            .iter()
            .all(|f| f.function != "build" && f.function != "not_found")
    );
}

#[test]
fn test_each_link_captures_its_own_stack() {
    let inner = load_user();
    let outer = AppError::internal("WRAP", "wrapped").with_cause(inner);

    let outer_site = &outer.stacktrace().unwrap().caller().function;
    let inner_site = &outer.cause().unwrap().stacktrace().unwrap().caller().function;
    assert_eq!(inner_site, "load_user");
    assert_ne!(outer_site, inner_site);
}

#[test]
fn test_unwrap_walks_exact_depth() {
    let err = three_links();
    assert_eq!(err.depth(), 2);

    let mut current = Some(&err);
    let mut steps = 0;
    while let Some(link) = current {
        current = link.cause();
        steps += 1;
    }
    assert_eq!(steps, 3);

    assert_eq!(AppError::new("solo", "m").depth(), 0);
}

#[test]
fn test_is_searches_cause_chain() {
    let e3 = three_links();

    assert!(e3.is(&AppError::new("c1", "anything")));
    assert!(e3.is(&AppError::new("c3", "x")));
    assert!(!e3.is(&AppError::new("c9", "x")));

    // Only the receiver's chain is searched, never the target's.
    let target = AppError::new("c9", "x").with_cause(AppError::new("c3", "y"));
    assert!(!e3.is(&target));
}

#[test]
fn test_is_type_compares_requested_classification() {
    let err = AppError::bad_request("INVALID", "bad payload");
    assert!(err.is_type(Classification::BadRequest));
    // Comparing each link's classification with itself would match on the
    // first link regardless of the argument. Only the requested
    // classification may match.
    assert!(!err.is_type(Classification::NotFound));

    let chained = AppError::internal("WRAP", "wrapped")
        .with_cause(AppError::timeout("SLOW", "upstream timed out"));
    assert!(chained.is_type(Classification::InternalError));
    assert!(chained.is_type(Classification::Timeout));
    assert!(!chained.is_type(Classification::Forbidden));
}

#[test]
fn test_root_error() {
    let err = three_links();
    assert_eq!(err.root_error().code(), "c1");
    assert_eq!(err.root_error().root_error().code(), "c1");

    let solo = AppError::new("solo", "m");
    assert_eq!(solo.root_error().code(), "solo");
}

#[test]
fn test_all_inputs_outer_to_inner() {
    let link1 = AppError::new("c1", "m1").with_input(1);
    let link2 = AppError::new("c2", "m2").with_input(2).with_cause(link1);
    let link3 = AppError::new("c3", "m3").with_input(3).with_cause(link2);

    assert_eq!(link3.all_inputs(), vec![&json!(3), &json!(2), &json!(1)]);
}

#[test]
fn test_all_inputs_skips_links_without_input() {
    let err = AppError::new("c2", "m2")
        .with_cause(AppError::new("c1", "m1").with_input(Input::new().with("user_id", 7)));

    let inputs = err.all_inputs();
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0]["user_id"], 7);
}

#[test]
fn test_panic_is_visible_from_outer_links() {
    let inner = AppError::new("c1", "m1").with_panic();
    let outer = AppError::new("c2", "m2").with_cause(inner);

    assert!(outer.is_panic());
    assert!(!outer.panic());
    assert!(!AppError::new("c3", "m3").is_panic());
}

#[test]
fn test_error_with_cause() {
    let err = AppError::new("c2", "m2")
        .with_cause(AppError::new("c1", "m1"))
        .with_cause("disk full");
    // The last with_cause replaces the earlier one.
    assert_eq!(err.error_with_cause(), "c2: m2\ndisk full");

    assert_eq!(three_links().error_with_cause(), "c3: m3\nc2: m2\nc1: m1");
}

#[test]
fn test_foreign_cause_is_lifted() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing");
    let err = AppError::internal("CONFIG", "cannot load config").with_cause(io);

    let cause = err.cause().unwrap();
    assert_eq!(cause.classification(), Classification::InternalError);
    assert_eq!(cause.code(), GENERIC_CODE);
    assert_eq!(cause.message(), "config.toml missing");
    assert!(cause.stacktrace().is_none());
    assert!(cause.input().is_none());
}

#[test]
fn test_optional_cause_none_is_noop() {
    let err = AppError::new("c1", "m1").with_optional_cause(None::<AppError>);
    assert!(err.cause().is_none());

    let err = AppError::new("c1", "m1").with_optional_cause(Some("boom"));
    assert_eq!(err.cause().unwrap().message(), "boom");
}

#[test]
fn test_anyhow_keeps_structured_errors() {
    let wrapped: anyhow::Error = AppError::not_found("c1", "m1").into();
    let err = AppError::internal("c2", "m2").with_cause(wrapped);
    assert_eq!(err.cause().unwrap().classification(), Classification::NotFound);

    let plain = anyhow::anyhow!("plain failure");
    let err = AppError::internal("c2", "m2").with_cause(plain);
    assert_eq!(err.cause().unwrap().message(), "plain failure");
}

#[test]
fn test_source_chain_interop() {
    let err = three_links();
    let dyn_err: &(dyn StdError + 'static) = &err;

    assert_eq!(dyn_err.source().unwrap().to_string(), "c2: m2");
    assert!(is(dyn_err, &AppError::new("c1", "x")));
    assert_eq!(unwrap(dyn_err).unwrap().code(), "c2");

    let boxed: Box<dyn StdError + Send + Sync> = Box::new(err);
    assert_eq!(find_app_error(boxed.as_ref()).unwrap().code(), "c3");
}

#[test]
fn test_builder_mutators() {
    let err = AppError::foreign("raw")
        .with_code("RAW")
        .with_message("raw failure")
        .with_classification(Classification::Unavailable)
        .with_caller();

    assert_eq!(err.to_string(), "RAW: raw failure");
    assert_eq!(err.status_code(), Some(503));
    assert_eq!(
        err.stacktrace().unwrap().caller().function,
        "test_builder_mutators"
    );
}

#[test]
fn test_parse() {
    let err = AppError::parse("code1: aaa: bbb");
    assert_eq!(err.code(), "code1");
    assert_eq!(err.message(), "aaa: bbb");
    assert_eq!(err.to_string(), "code1: aaa: bbb");
    assert_eq!(err.classification(), Classification::Unknown);

    let err = AppError::parse("no delimiter");
    assert_eq!(err.code(), "no delimiter");
    assert_eq!(err.message(), "no delimiter");

    assert_eq!(parse_error_message("a: b"), Some(("a", "b")));
    assert_eq!(parse_error_message("ab"), None);
}

#[test]
fn test_verbose_format_includes_stacks_and_causes() {
    let err = AppError::internal("c2", "e2").with_cause(load_user());
    let rendered = format!("{:#}", err);

    assert!(rendered.starts_with("c2: e2"));
    assert!(rendered.contains("\n\nUSER_NOT_FOUND: user not found"));
    assert!(rendered.contains("load_user\t"));
}

fn long_chain(len: usize) -> AppError {
    let mut err = AppError::foreign("root cause").with_code("ROOT");
    for i in 1..len {
        err = AppError::foreign(format!("link {}", i)).with_cause(err);
    }
    err
}

#[test]
fn test_long_chain_is_walked_in_full() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let len = MAX_CHAIN_DEPTH + 76;
    let err = long_chain(len);

    assert_eq!(err.chain().count(), len);
    assert_eq!(err.depth(), len - 1);
    assert_eq!(err.root_error().code(), "ROOT");
    assert!(err.is_code("ROOT"));
    assert!(err.is(&AppError::new("ROOT", "any")));
    assert!(!err.is_code("missing"));

    let found = find_app_error(&err).unwrap();
    assert_eq!(found.root_error().code(), "ROOT");
}

#[test]
fn test_very_deep_chain_does_not_overflow_stack() {
    let err = long_chain(100_000);

    let copy = err.clone();
    assert_eq!(copy, err);
    assert_eq!(copy.depth(), 99_999);

    let rendered = format!("{:?}", err.cause().unwrap().cause().unwrap().root_error());
    assert!(rendered.contains("ROOT"));
    let full = format!("{:?}", copy);
    assert!(full.ends_with("}]"));

    drop(copy);
    drop(err);
}
