//! Public-holiday approval workflow.

#[path = "../common/mod.rs"]
mod common;

use bve::holidays::{self, HolidayError};
use bve::model::HolidayState;
use bve::Env;
use common::Fixture;

#[test]
fn test_company_defaults_to_acting_user() {
    let mut fx = Fixture::new();
    let bob = fx.bob;
    let carol = fx.carol;

    let mut env = Env::new(&mut fx.store, &mut fx.registry, bob);
    let calendar = holidays::create(&mut env, 2026, None).unwrap();
    assert_eq!(calendar.company_id, Some(2));
    assert_eq!(calendar.state, HolidayState::Draft);
    assert_eq!(calendar.state.label(), "To Approve");
    assert_eq!(calendar.display_name(), "Public holidays 2026");

    let explicit = holidays::create(&mut env, 2026, Some(7)).unwrap();
    assert_eq!(explicit.company_id, Some(7));

    let mut env = Env::new(&mut fx.store, &mut fx.registry, carol);
    assert_eq!(holidays::create(&mut env, 2027, None).unwrap().company_id, None);
}

#[test]
fn test_validate_then_reset() {
    let mut fx = Fixture::new();
    let mut env = fx.env();

    let calendar = holidays::create(&mut env, 2026, None).unwrap();
    holidays::add_line(&mut env, calendar.id, "2026-12-25", "Christmas Day").unwrap();
    holidays::add_line(&mut env, calendar.id, "2026-01-01", "New Year's Day").unwrap();

    let lines = holidays::lines(&env, calendar.id).unwrap();
    assert_eq!(
        lines.iter().map(|l| l.date.as_str()).collect::<Vec<_>>(),
        vec!["2026-01-01", "2026-12-25"]
    );
    assert!(lines.iter().all(|l| !l.scheduled));

    holidays::validate(&mut env, &[calendar.id]).unwrap();
    let approved = holidays::get(&env, calendar.id).unwrap();
    assert_eq!(approved.state, HolidayState::Validate);
    assert_eq!(approved.state.label(), "Approved");
    assert!(holidays::lines(&env, calendar.id).unwrap().iter().all(|l| l.scheduled));

    holidays::reset(&mut env, &[calendar.id]).unwrap();
    assert_eq!(holidays::get(&env, calendar.id).unwrap().state, HolidayState::Draft);
    assert!(holidays::lines(&env, calendar.id).unwrap().iter().all(|l| !l.scheduled));
}

#[test]
fn test_validate_is_all_or_nothing() {
    let mut fx = Fixture::new();
    let mut env = fx.env();

    let calendar = holidays::create(&mut env, 2026, None).unwrap();
    holidays::add_line(&mut env, calendar.id, "2026-05-01", "Labour Day").unwrap();

    assert!(matches!(
        holidays::validate(&mut env, &[calendar.id, 9999]),
        Err(HolidayError::NotFound(9999))
    ));
    assert_eq!(holidays::get(&env, calendar.id).unwrap().state, HolidayState::Draft);
    assert!(holidays::lines(&env, calendar.id).unwrap().iter().all(|l| !l.scheduled));
}

#[test]
fn test_line_validation() {
    let mut fx = Fixture::new();
    let mut env = fx.env();
    let calendar = holidays::create(&mut env, 2026, None).unwrap();

    assert!(matches!(
        holidays::add_line(&mut env, calendar.id, "25/12/2026", "Christmas Day"),
        Err(HolidayError::InvalidDate(_))
    ));
    assert!(matches!(
        holidays::add_line(&mut env, calendar.id, "2026-13-45", "Christmas Day"),
        Err(HolidayError::InvalidDate(_))
    ));
    assert!(matches!(
        holidays::add_line(&mut env, 9999, "2026-12-25", "Christmas Day"),
        Err(HolidayError::NotFound(9999))
    ));
}
