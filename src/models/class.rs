use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::CourseRef;

/// Teaching shift of a class. Serialized with the backend's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Shift {
    #[serde(rename = "Matutino")]
    Morning,
    #[serde(rename = "Vespertino")]
    Afternoon,
    #[serde(rename = "Noturno")]
    Evening,
}

impl Shift {
    pub const ALL: [Shift; 3] = [Shift::Morning, Shift::Afternoon, Shift::Evening];

    pub fn as_str(self) -> &'static str {
        match self {
            Shift::Morning => "Matutino",
            Shift::Afternoon => "Vespertino",
            Shift::Evening => "Noturno",
        }
    }

    /// Accepts the backend names as well as the English ones, ignoring case
    /// and surrounding whitespace. Anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "matutino" | "morning" => Some(Shift::Morning),
            "vespertino" | "afternoon" => Some(Shift::Afternoon),
            "noturno" | "evening" => Some(Shift::Evening),
            _ => None,
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A class ("turma").
///
/// The students of a class are deliberately not stored here; the reverse
/// relation is computed on demand by [`crate::roster::ClassRoster`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "turno", default)]
    pub shift: Option<Shift>,
    #[serde(rename = "dataInicio", default)]
    pub start_date: Option<NaiveDate>,
    /// Derived from the course hours, the shift and the start date.
    #[serde(rename = "dataFim", default)]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "cursos", default)]
    pub courses: Vec<CourseRef>,
}

impl ClassRecord {
    pub fn new(id: Option<i64>, shift: Option<Shift>) -> Self {
        Self {
            id,
            shift,
            start_date: None,
            end_date: None,
            courses: Vec::new(),
        }
    }

    /// The course the class form edits: the first one in the list.
    pub fn primary_course(&self) -> Option<&CourseRef> {
        self.courses.first()
    }

    pub fn has_course(&self, name: &str) -> bool {
        self.courses.iter().any(|c| c.name == name)
    }
}

/// Input of the class form. The end date is never part of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClassRequest {
    pub shift: Shift,
    pub course_slug: String,
    pub start_date: NaiveDate,
}
