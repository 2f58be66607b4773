//! Aggregate counters over a fetched guest list.

use serde::Serialize;

use super::columns::ColumnLayout;
use super::records::RecordSet;

/// Cell values that count as a recorded check-in, compared case-folded.
pub const ATTENDANCE_TRUTHY: [&str; 3] = ["ok", "sim", "true"];

/// RSVP counts as confirmed only on a literal (case-folded) "sim".
pub fn is_confirmed_value(value: &str) -> bool {
    value.to_lowercase() == "sim"
}

pub fn is_attended_value(value: &str) -> bool {
    let folded = value.to_lowercase();
    ATTENDANCE_TRUTHY.iter().any(|truthy| *truthy == folded)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttendanceMetrics {
    pub total: usize,
    pub confirmed: usize,
    pub attended: usize,
}

/// Count totals, confirmations, and check-ins. A role with no backing
/// column contributes zero instead of failing.
pub fn compute_metrics(set: &RecordSet, layout: &ColumnLayout) -> AttendanceMetrics {
    let confirmed = set
        .records()
        .iter()
        .filter(|record| record.cell(&layout.rsvp).is_some_and(is_confirmed_value))
        .count();
    let attended = set
        .records()
        .iter()
        .filter(|record| record.cell(&layout.attendance).is_some_and(is_attended_value))
        .count();

    AttendanceMetrics {
        total: set.len(),
        confirmed,
        attended,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_from(rows: &[&[&str]]) -> RecordSet {
        RecordSet::from_grid(
            rows.iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn total_counts_every_record() {
        let set = set_from(&[&["Nome"], &["Ana"], &["Bruno"], &[""]]);
        let metrics = compute_metrics(&set, &set.layout());
        assert_eq!(metrics.total, set.len());
        assert_eq!(metrics.total, 3);
    }

    #[test]
    fn confirmed_and_attended_fold_case() {
        let set = set_from(&[
            &["Nome", "Presença", "Comparecimento"],
            &["Ana", "Sim", "Ok"],
            &["Bruno", "SIM", "TRUE"],
            &["Carla", "sim ", "sim"],
            &["Dora", "Não", ""],
        ]);
        let metrics = compute_metrics(&set, &set.layout());

        // "sim " keeps its trailing space and does not match.
        assert_eq!(metrics.confirmed, 2);
        assert_eq!(metrics.attended, 3);
    }

    #[test]
    fn absent_attendance_column_counts_zero_attended() {
        let set = set_from(&[
            &["Nome", "Presença"],
            &["Ana", "Sim"],
            &["Bruno", "sim"],
        ]);
        let metrics = compute_metrics(&set, &set.layout());
        assert_eq!(metrics.attended, 0);
        assert_eq!(metrics.confirmed, 2);
    }

    #[test]
    fn absent_rsvp_column_counts_zero_confirmed() {
        let set = set_from(&[&["Nome"], &["Ana"]]);
        let metrics = compute_metrics(&set, &set.layout());
        assert_eq!(metrics.confirmed, 0);
    }

    #[test]
    fn single_guest_scenario() {
        let set = set_from(&[
            &["Nome", "Presença", "Comparecimento"],
            &["Ana", "Sim", "Ok"],
        ]);
        let metrics = compute_metrics(&set, &set.layout());
        assert_eq!(
            metrics,
            AttendanceMetrics { total: 1, confirmed: 1, attended: 1 }
        );
    }
}
