//! Public-holiday approval workflow.
//!
//! A calendar starts in draft ("To Approve"). Validating it rebuilds the
//! schedule entries of every line and marks it approved; resetting removes
//! them and returns it to draft.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::env::Env;
use crate::model::{CompanyId, HolidayId, HolidayLine, HolidayLineId, HolidayState, PublicHoliday};
use crate::platform::{Host, PlatformError};

/// Errors raised by the holiday workflow.
#[derive(Debug, thiserror::Error)]
pub enum HolidayError {
    #[error("Public holiday calendar {0} not found")]
    NotFound(HolidayId),

    #[error("Invalid holiday date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

pub type HolidayResult<T> = Result<T, HolidayError>;

/// `YYYY-MM-DD` with month and day in range. Month lengths are not checked.
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("date pattern")
});

/// Create a draft calendar; the company defaults to the acting user's.
pub fn create<H: Host>(
    env: &mut Env<'_, H>,
    year: i32,
    company_id: Option<CompanyId>,
) -> HolidayResult<PublicHoliday> {
    let company_id = match company_id {
        Some(id) => Some(id),
        None => env.host.user_company(env.user)?,
    };
    let id = env.host.insert_holiday(year, company_id)?;
    get(env, id)
}

pub fn get<H: Host>(env: &Env<'_, H>, id: HolidayId) -> HolidayResult<PublicHoliday> {
    env.host.get_holiday(id)?.ok_or(HolidayError::NotFound(id))
}

/// Add a dated line to a calendar.
pub fn add_line<H: Host>(
    env: &mut Env<'_, H>,
    holiday: HolidayId,
    date: &str,
    name: &str,
) -> HolidayResult<HolidayLineId> {
    check_date(date)?;
    get(env, holiday)?;
    Ok(env.host.add_holiday_line(holiday, date, name)?)
}

pub fn lines<H: Host>(env: &Env<'_, H>, holiday: HolidayId) -> HolidayResult<Vec<HolidayLine>> {
    Ok(env.host.holiday_lines(holiday)?)
}

/// Rebuild every line's schedule, then approve each calendar.
pub fn validate<H: Host>(env: &mut Env<'_, H>, ids: &[HolidayId]) -> HolidayResult<()> {
    env.transaction(|env| -> HolidayResult<()> {
        for &id in ids {
            let holiday = get(env, id)?;
            debug!("hr_public_holiday reinit: {}", holiday.display_name());
            for line in &holiday.line_ids {
                env.host.reinit_line(*line)?;
            }
            env.host.set_holiday_state(id, HolidayState::Validate)?;
            info!(id, year = holiday.year, "public holidays approved");
        }
        Ok(())
    })
}

/// Remove every line's schedule, then return each calendar to draft.
pub fn reset<H: Host>(env: &mut Env<'_, H>, ids: &[HolidayId]) -> HolidayResult<()> {
    env.transaction(|env| -> HolidayResult<()> {
        for &id in ids {
            let holiday = get(env, id)?;
            debug!("hr_public_holiday reset: {}", holiday.display_name());
            for line in &holiday.line_ids {
                env.host.reset_line(*line)?;
            }
            env.host.set_holiday_state(id, HolidayState::Draft)?;
            info!(id, year = holiday.year, "public holidays reset to draft");
        }
        Ok(())
    })
}

fn check_date(date: &str) -> HolidayResult<()> {
    if DATE.is_match(date) {
        Ok(())
    } else {
        Err(HolidayError::InvalidDate(date.to_string()))
    }
}
