//! Course records and time slots.

/// Part of the day a course occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeSlot {
    /// Morning half-day.
    #[cfg_attr(feature = "serde", serde(rename = "AM"))]
    Am,
    /// Afternoon half-day.
    #[cfg_attr(feature = "serde", serde(rename = "PM"))]
    Pm,
    /// Occupies both halves of the day.
    FullDay,
}

impl TimeSlot {
    /// Whether a course in this slot can satisfy a morning request.
    ///
    /// Full-day courses occupy the morning too, so they compete for
    /// the AM pick.
    pub fn covers_morning(self) -> bool {
        matches!(self, TimeSlot::Am | TimeSlot::FullDay)
    }

    /// Whether a course in this slot can satisfy an afternoon request.
    pub fn is_afternoon(self) -> bool {
        matches!(self, TimeSlot::Pm)
    }

    /// Wire name used by the surrounding application.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeSlot::Am => "AM",
            TimeSlot::Pm => "PM",
            TimeSlot::FullDay => "FullDay",
        }
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A course offered in exactly one time slot with a fixed seat capacity.
///
/// Capacity does not change for the duration of an optimization run.
///
/// # Examples
///
/// ```
/// use u_enroll::model::{Course, TimeSlot};
///
/// let bio = Course::new(1, "Biology", TimeSlot::Am, 20);
/// assert_eq!(bio.capacity, 20);
/// assert!(bio.time_slot.covers_morning());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Course {
    /// Identifier assigned by the caller's store.
    pub id: u32,
    /// Unique course name; preferences reference courses by this name.
    pub name: String,
    /// Slot the course runs in.
    pub time_slot: TimeSlot,
    /// Maximum number of enrolled students.
    pub capacity: u32,
}

impl Course {
    pub fn new(id: u32, name: impl Into<String>, time_slot: TimeSlot, capacity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            time_slot,
            capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_coverage() {
        assert!(TimeSlot::Am.covers_morning());
        assert!(TimeSlot::FullDay.covers_morning());
        assert!(!TimeSlot::Pm.covers_morning());
        assert!(TimeSlot::Pm.is_afternoon());
        assert!(!TimeSlot::FullDay.is_afternoon());
    }

    #[test]
    fn test_slot_display() {
        assert_eq!(TimeSlot::Am.to_string(), "AM");
        assert_eq!(TimeSlot::FullDay.to_string(), "FullDay");
    }
}
