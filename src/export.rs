//! CSV export of a finished roster.
//!
//! - [`assignments_csv`]: one row per (shift, volunteer) pair, shifts
//!   ordered by start time and then ID.
//! - [`group_hours_csv`]: assigned hours summed per group.

use crate::error::{Result, RosterError};
use crate::models::{Roster, Shift};
use crate::scheduler::RosterKpi;

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Writes the roster's assignments as CSV.
///
/// Columns: `shift_id, volunteer_id, volunteer_name, start, end,
/// duration_hours`. Volunteer IDs unknown to the roster get an empty name.
pub fn assignments_csv(roster: &Roster) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "shift_id",
        "volunteer_id",
        "volunteer_name",
        "start",
        "end",
        "duration_hours",
    ])?;

    let mut shifts: Vec<&Shift> = roster.shifts().iter().collect();
    shifts.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

    for shift in shifts {
        let start = shift.start.format(TIME_FORMAT).to_string();
        let end = shift.end.format(TIME_FORMAT).to_string();
        let duration = format!("{:.2}", shift.duration_hours());
        for volunteer_id in &shift.assigned {
            let name = roster
                .volunteer(volunteer_id)
                .map_or("", |v| v.name.as_str());
            writer.write_record([
                shift.id.as_str(),
                volunteer_id.as_str(),
                name,
                start.as_str(),
                end.as_str(),
                duration.as_str(),
            ])?;
        }
    }

    finish(writer)
}

/// Writes assigned hours per group as CSV (`group, assigned_hours`).
///
/// Ungrouped volunteers are reported under an empty group name, first.
pub fn group_hours_csv(roster: &Roster) -> Result<String> {
    let kpi = RosterKpi::calculate(roster);
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["group", "assigned_hours"])?;
    for (group, hours) in &kpi.hours_by_group {
        let hours = format!("{hours:.2}");
        writer.write_record([group.as_deref().unwrap_or(""), hours.as_str()])?;
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| RosterError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| RosterError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, Volunteer};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_csv_rows_sorted_by_start() {
        let mut roster = Roster::new(
            vec![
                Volunteer::new("v1").with_name("Alice").with_group("A"),
                Volunteer::new("v2").with_name("Bob, Jr.").with_group("A"),
            ],
            vec![
                Shift::new("late", at(14, 0), at(15, 30)),
                Shift::new("early", at(9, 0), at(11, 0)),
            ],
        );
        roster.prefill(&[Assignment::new("late", "v1"), Assignment::new("early", "v2")]);

        let csv = assignments_csv(&roster).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "shift_id,volunteer_id,volunteer_name,start,end,duration_hours"
        );
        assert_eq!(lines[1], "early,v2,\"Bob, Jr.\",2025-03-01T09:00,2025-03-01T11:00,2.00");
        assert_eq!(lines[2], "late,v1,Alice,2025-03-01T14:00,2025-03-01T15:30,1.50");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_csv_header_only_when_empty() {
        let roster = Roster::new(vec![], vec![Shift::new("s1", at(9, 0), at(10, 0))]);
        let csv = assignments_csv(&roster).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_group_hours() {
        let mut roster = Roster::new(
            vec![
                Volunteer::new("v1").with_group("B"),
                Volunteer::new("v2").with_group("A"),
                Volunteer::new("v3").with_group("A"),
                Volunteer::new("v4"),
            ],
            vec![
                Shift::new("s1", at(9, 0), at(11, 0)),
                Shift::new("s2", at(12, 0), at(13, 30)),
            ],
        );
        roster.prefill(&[
            Assignment::new("s1", "v2"),
            Assignment::new("s2", "v3"),
            Assignment::new("s2", "v1"),
        ]);

        let csv = group_hours_csv(&roster).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["group,assigned_hours", ",0.00", "A,3.50", "B,1.50"]);
    }
}
