//! Scheduling results returned to the caller.

use super::engine::EngineKind;
use crate::model::{AssignmentSnapshot, SectionSummary, StudentAssignment};
use crate::scoring::{SatisfactionSummary, SatisfactionThresholds};
use std::time::Duration;

/// Summary of one run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunRecord {
    pub run: usize,
    /// Engine that produced the result.
    pub engine: EngineKind,
    pub seed: u64,
    /// `None` when the run produced no schedule.
    pub score: Option<f64>,
    /// The exact solver was invoked for this run.
    pub exact_attempted: bool,
    /// The exact engine was selected but the heuristic stood in.
    pub fell_back: bool,
}

/// Seat usage across the catalog.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillStatistics {
    pub total_capacity: u64,
    pub total_enrolled: u64,
    /// `total_enrolled / total_capacity`, 0 when there are no seats.
    pub overall_ratio: f64,
    pub min_course_fill: f64,
    /// Courses with seats whose fill ratio is below `min_course_fill`,
    /// in catalog order.
    pub underfilled: Vec<String>,
}

impl FillStatistics {
    pub fn from_sections(sections: &[SectionSummary], min_course_fill: f64) -> Self {
        let total_capacity: u64 = sections.iter().map(|s| u64::from(s.capacity)).sum();
        let total_enrolled: u64 = sections.iter().map(|s| u64::from(s.enrolled_count)).sum();
        let overall_ratio = if total_capacity == 0 {
            0.0
        } else {
            total_enrolled as f64 / total_capacity as f64
        };
        let underfilled = sections
            .iter()
            .filter(|s| s.capacity > 0 && s.fill_ratio() < min_course_fill)
            .map(|s| s.name.clone())
            .collect();
        Self {
            total_capacity,
            total_enrolled,
            overall_ratio,
            min_course_fill,
            underfilled,
        }
    }
}

/// Best schedule across all runs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleReport {
    /// Summed satisfaction score, lower is better.
    pub score: f64,
    pub students: Vec<StudentAssignment>,
    pub sections: Vec<SectionSummary>,
    pub fill: FillStatistics,
    pub satisfaction: SatisfactionSummary,
    pub runs: Vec<RunRecord>,
    /// Index of the winning run.
    pub best_run: usize,
    /// Engine of the winning run.
    pub engine: EngineKind,
    pub elapsed: Duration,
}

impl ScheduleReport {
    pub(crate) fn new(
        snapshot: AssignmentSnapshot,
        runs: Vec<RunRecord>,
        best_run: usize,
        engine: EngineKind,
        elapsed: Duration,
        thresholds: &SatisfactionThresholds,
        min_course_fill: f64,
    ) -> Self {
        let fill = FillStatistics::from_sections(&snapshot.sections, min_course_fill);
        let satisfaction = SatisfactionSummary::tally(
            thresholds,
            snapshot.students.iter().map(|s| s.satisfaction_score),
        );
        Self {
            score: snapshot.score,
            students: snapshot.students,
            sections: snapshot.sections,
            fill,
            satisfaction,
            runs,
            best_run,
            engine,
            elapsed,
        }
    }

    pub fn student(&self, student_id: u32) -> Option<&StudentAssignment> {
        self.students.iter().find(|s| s.student_id == student_id)
    }

    pub fn section(&self, name: &str) -> Option<&SectionSummary> {
        self.sections.iter().find(|s| s.name == name)
    }
}

/// Result of a scheduling request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScheduleOutcome {
    Scheduled(Box<ScheduleReport>),
    /// No run produced a schedule.
    NoValidSchedule { runs: Vec<RunRecord> },
}

impl ScheduleOutcome {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, ScheduleOutcome::Scheduled(_))
    }

    pub fn report(&self) -> Option<&ScheduleReport> {
        match self {
            ScheduleOutcome::Scheduled(report) => Some(report.as_ref()),
            ScheduleOutcome::NoValidSchedule { .. } => None,
        }
    }

    pub fn into_report(self) -> Option<ScheduleReport> {
        match self {
            ScheduleOutcome::Scheduled(report) => Some(*report),
            ScheduleOutcome::NoValidSchedule { .. } => None,
        }
    }

    pub fn runs(&self) -> &[RunRecord] {
        match self {
            ScheduleOutcome::Scheduled(report) => report.runs.as_slice(),
            ScheduleOutcome::NoValidSchedule { runs } => runs.as_slice(),
        }
    }
}
