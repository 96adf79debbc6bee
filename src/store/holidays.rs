//! Public-holiday calendars and lines.

use rusqlite::{params, OptionalExtension};

use super::SqliteStore;
use crate::model::{CompanyId, HolidayId, HolidayLine, HolidayLineId, HolidayState, PublicHoliday};
use crate::platform::{HolidayStore, PlatformError, PlatformResult};

impl HolidayStore for SqliteStore {
    fn insert_holiday(&mut self, year: i32, company_id: Option<CompanyId>) -> PlatformResult<HolidayId> {
        self.conn.execute(
            "INSERT INTO hr_holidays_public (year, company_id, state) VALUES (?, ?, ?)",
            params![year, company_id, HolidayState::Draft.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_holiday(&self, id: HolidayId) -> PlatformResult<Option<PublicHoliday>> {
        let row = self
            .conn
            .query_row(
                "SELECT year, company_id, state FROM hr_holidays_public WHERE id = ?",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, i32>(0)?,
                        row.get::<_, Option<CompanyId>>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        let Some((year, company_id, state)) = row else {
            return Ok(None);
        };
        let state = HolidayState::parse(&state).ok_or(PlatformError::Corrupt {
            what: "holiday state",
            value: state,
        })?;
        let line_ids = self.holiday_lines(id)?.into_iter().map(|l| l.id).collect();

        Ok(Some(PublicHoliday {
            id,
            year,
            company_id,
            state,
            line_ids,
        }))
    }

    fn set_holiday_state(&mut self, id: HolidayId, state: HolidayState) -> PlatformResult<()> {
        let changed = self.conn.execute(
            "UPDATE hr_holidays_public SET state = ? WHERE id = ?",
            params![state.as_str(), id],
        )?;
        super::expect_row(changed, "public holiday", id)
    }

    fn add_holiday_line(&mut self, holiday: HolidayId, date: &str, name: &str) -> PlatformResult<HolidayLineId> {
        self.conn.execute(
            "INSERT INTO hr_holidays_public_line (holiday_id, date, name) VALUES (?, ?, ?)",
            params![holiday, date, name],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn holiday_lines(&self, holiday: HolidayId) -> PlatformResult<Vec<HolidayLine>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, holiday_id, date, name, scheduled FROM hr_holidays_public_line \
             WHERE holiday_id = ? ORDER BY date, id",
        )?;
        let lines = stmt
            .query_map(params![holiday], |row| {
                Ok(HolidayLine {
                    id: row.get(0)?,
                    holiday_id: row.get(1)?,
                    date: row.get(2)?,
                    name: row.get(3)?,
                    scheduled: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lines)
    }

    fn reinit_line(&mut self, line: HolidayLineId) -> PlatformResult<()> {
        let changed = self.conn.execute(
            "UPDATE hr_holidays_public_line SET scheduled = 1 WHERE id = ?",
            params![line],
        )?;
        super::expect_row(changed, "holiday line", line)
    }

    fn reset_line(&mut self, line: HolidayLineId) -> PlatformResult<()> {
        let changed = self.conn.execute(
            "UPDATE hr_holidays_public_line SET scheduled = 0 WHERE id = ?",
            params![line],
        )?;
        super::expect_row(changed, "holiday line", line)
    }
}
