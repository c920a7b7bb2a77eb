//! Student records.

/// Highest (numerically largest) supported priority tier.
pub const MAX_PRIORITY: u8 = 5;

/// A student with ranked course preferences for each half of the day.
///
/// Preference lists are in rank order, most preferred first, and may
/// name courses that do not exist in the catalog. Assignment state is
/// not stored here; each optimization attempt keeps its own
/// [`Roster`](super::Roster).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Student {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub grade: String,
    /// Priority tier in `1..=MAX_PRIORITY`, 1 being served first.
    pub priority: u8,
    /// Ranked morning preferences (course names).
    pub am_preferences: Vec<String>,
    /// Ranked afternoon preferences (course names).
    pub pm_preferences: Vec<String>,
}

impl Student {
    /// Creates a student with empty contact details.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_enroll::model::Student;
    ///
    /// let s = Student::new(1, 2)
    ///     .with_am_preferences(["Bio", "Chem"])
    ///     .with_pm_preferences(["Art"]);
    /// assert_eq!(s.priority, 2);
    /// assert_eq!(s.am_preferences.len(), 2);
    /// ```
    pub fn new(id: u32, priority: u8) -> Self {
        Self {
            id,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            grade: String::new(),
            priority,
            am_preferences: Vec::new(),
            pm_preferences: Vec::new(),
        }
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = grade.into();
        self
    }

    pub fn with_am_preferences<I, S>(mut self, prefs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.am_preferences = prefs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_pm_preferences<I, S>(mut self, prefs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pm_preferences = prefs.into_iter().map(Into::into).collect();
        self
    }

    /// Full display name, `"first last"`.
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Whether the priority lies in the supported range.
    pub fn has_valid_priority(&self) -> bool {
        (1..=MAX_PRIORITY).contains(&self.priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_joins_parts() {
        let s = Student::new(1, 1).with_name("Ada", "Lovelace");
        assert_eq!(s.name(), "Ada Lovelace");
        assert_eq!(Student::new(2, 1).with_name("Solo", "").name(), "Solo");
    }

    #[test]
    fn test_priority_range() {
        assert!(Student::new(1, 1).has_valid_priority());
        assert!(Student::new(1, MAX_PRIORITY).has_valid_priority());
        assert!(!Student::new(1, 0).has_valid_priority());
        assert!(!Student::new(1, 6).has_valid_priority());
    }
}
