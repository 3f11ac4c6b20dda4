//! Candidate types

use serde::{Deserialize, Serialize};

/// A candidate going through the recruiting pipeline.
///
/// Owned by the surrounding application; the directory layer only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub surname: String,
    /// Matriculation id, e.g. "s123456"
    pub matricola: String,
    pub degree_course: String,
}

impl Candidate {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        matricola: impl Into<String>,
        degree_course: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            matricola: matricola.into(),
            degree_course: degree_course.into(),
        }
    }

    /// "Name Surname", as stored in the directory `cn`
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}
