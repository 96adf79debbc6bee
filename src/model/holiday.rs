//! Public-holiday calendars and their approval state.

use serde::{Deserialize, Serialize};

use super::{CompanyId, HolidayId, HolidayLineId};

/// Approval state of a public-holiday calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayState {
    /// To approve.
    #[default]
    Draft,
    /// Approved.
    Validate,
}

impl HolidayState {
    pub fn as_str(&self) -> &'static str {
        match self {
            HolidayState::Draft => "draft",
            HolidayState::Validate => "validate",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(HolidayState::Draft),
            "validate" => Some(HolidayState::Validate),
            _ => None,
        }
    }

    /// Label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            HolidayState::Draft => "To Approve",
            HolidayState::Validate => "Approved",
        }
    }
}

/// A public-holiday calendar for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicHoliday {
    pub id: HolidayId,
    pub year: i32,
    pub company_id: Option<CompanyId>,
    pub state: HolidayState,
    pub line_ids: Vec<HolidayLineId>,
}

impl PublicHoliday {
    pub fn display_name(&self) -> String {
        format!("Public holidays {}", self.year)
    }
}

/// A single holiday date whose dependent schedule is recomputed on approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayLine {
    pub id: HolidayLineId,
    pub holiday_id: HolidayId,
    pub date: String,
    pub name: String,
    /// Whether dependent schedule entries currently exist for this line.
    pub scheduled: bool,
}
