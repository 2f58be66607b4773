//! Semantic roles and header resolution.
//!
//! Deployments disagree on what the attendance column is called, and some
//! omit columns entirely. Resolution maps each role to the column actually
//! present in the header, or marks it absent, so every consumer has to say
//! what it does when a column is missing.

use std::fmt;

/// Exact header names for the fixed roles.
pub const NAME_COLUMN: &str = "Nome";
pub const CITY_COLUMN: &str = "Cidade";
pub const PHONE_COLUMN: &str = "Telefone";
pub const RSVP_COLUMN: &str = "Presença";

/// Accepted attendance headers, highest priority first.
pub const ATTENDANCE_ALIASES: [&str; 3] = ["Comparecimento", "Compareceu", "Presença Confirmada"];

/// The semantic fields of a guest row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuestField {
    Name,
    City,
    Phone,
    Rsvp,
    Attendance,
}

impl GuestField {
    pub const ALL: [GuestField; 5] = [
        GuestField::Name,
        GuestField::City,
        GuestField::Phone,
        GuestField::Rsvp,
        GuestField::Attendance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GuestField::Name => "name",
            GuestField::City => "city",
            GuestField::Phone => "phone",
            GuestField::Rsvp => "rsvp",
            GuestField::Attendance => "attendance",
        }
    }

    /// The header this role is expected under. For attendance that is the
    /// highest-priority alias; the resolver may bind a lower one.
    pub fn expected_column(&self) -> &'static str {
        match self {
            GuestField::Name => NAME_COLUMN,
            GuestField::City => CITY_COLUMN,
            GuestField::Phone => PHONE_COLUMN,
            GuestField::Rsvp => RSVP_COLUMN,
            GuestField::Attendance => ATTENDANCE_ALIASES[0],
        }
    }
}

impl fmt::Display for GuestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a role landed in the header, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnBinding {
    /// Bound to `name` at 1-based sheet column `index`.
    Present { name: String, index: u32 },
    Absent,
}

impl ColumnBinding {
    pub fn is_present(&self) -> bool {
        matches!(self, ColumnBinding::Present { .. })
    }

    pub fn index(&self) -> Option<u32> {
        match self {
            ColumnBinding::Present { index, .. } => Some(*index),
            ColumnBinding::Absent => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ColumnBinding::Present { name, .. } => Some(name),
            ColumnBinding::Absent => None,
        }
    }
}

/// Resolved role-to-column mapping for one fetched header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub name: ColumnBinding,
    pub city: ColumnBinding,
    pub phone: ColumnBinding,
    pub rsvp: ColumnBinding,
    pub attendance: ColumnBinding,
}

impl ColumnLayout {
    pub fn binding(&self, field: GuestField) -> &ColumnBinding {
        match field {
            GuestField::Name => &self.name,
            GuestField::City => &self.city,
            GuestField::Phone => &self.phone,
            GuestField::Rsvp => &self.rsvp,
            GuestField::Attendance => &self.attendance,
        }
    }

    /// Roles with no backing column, in declaration order.
    pub fn missing_fields(&self) -> Vec<GuestField> {
        GuestField::ALL
            .into_iter()
            .filter(|field| !self.binding(*field).is_present())
            .collect()
    }
}

/// Resolve the header into a [`ColumnLayout`].
///
/// Fixed roles match their exact header name; attendance takes the first
/// alias (in priority order) found anywhere in the header. Duplicate headers
/// bind to their first occurrence. Never fails.
pub fn resolve_columns(headers: &[String]) -> ColumnLayout {
    let exact = |wanted: &str| bind(headers, wanted);

    let attendance = ATTENDANCE_ALIASES
        .iter()
        .find_map(|alias| match bind(headers, alias) {
            ColumnBinding::Absent => None,
            present => Some(present),
        })
        .unwrap_or(ColumnBinding::Absent);

    ColumnLayout {
        name: exact(NAME_COLUMN),
        city: exact(CITY_COLUMN),
        phone: exact(PHONE_COLUMN),
        rsvp: exact(RSVP_COLUMN),
        attendance,
    }
}

fn bind(headers: &[String], wanted: &str) -> ColumnBinding {
    match headers.iter().position(|h| h == wanted) {
        Some(i) => ColumnBinding::Present {
            name: wanted.to_string(),
            index: i as u32 + 1,
        },
        None => ColumnBinding::Absent,
    }
}
