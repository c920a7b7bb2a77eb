//! 0/1 integer program for the assignment problem.
//!
//! Built from a [`SchedulingProblem`] into owned data, then handed to
//! HiGHS with a wall-clock limit.

use super::config::ExactConfig;
use crate::coordinator::PriorityWeights;
use crate::model::{Placement, SchedulingProblem, TimeSlot};
use good_lp::solvers::highs::highs;
use good_lp::solvers::{SolutionStatus, WithTimeLimit};
use good_lp::{
    constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable,
};
use std::time::Duration;

/// Placements keyed by student position, plus objective value and how
/// the solver stopped.
pub(crate) struct Solved {
    pub placements: Vec<(usize, Placement)>,
    pub objective: f64,
    pub status: SolutionStatus,
}

/// Owned model data, indexed by position in the solve order.
#[derive(Debug, Clone)]
pub(crate) struct Formulation {
    /// Student positions, in variable creation order.
    order: Vec<usize>,
    am_courses: Vec<usize>,
    pm_courses: Vec<usize>,
    full_day_courses: Vec<usize>,
    /// Seat capacity per catalog position.
    capacities: Vec<f64>,
    weights: Vec<f64>,
    /// Penalty per student per AM course, aligned with `am_courses`.
    am_costs: Vec<Vec<f64>>,
    pm_costs: Vec<Vec<f64>>,
    full_day_penalty: f64,
}

struct StudentVars {
    am: Vec<Variable>,
    pm: Vec<Variable>,
    full_day: Vec<Variable>,
    penalty: Variable,
}

impl Formulation {
    pub(crate) fn build(
        problem: &SchedulingProblem,
        weights: &PriorityWeights,
        config: &ExactConfig,
        order: &[usize],
    ) -> Self {
        let catalog = problem.catalog();
        let am_courses = catalog.indices_in(TimeSlot::Am);
        let pm_courses = catalog.indices_in(TimeSlot::Pm);
        let full_day_courses = catalog.indices_in(TimeSlot::FullDay);

        let costs = |courses: &[usize], prefs: &[String]| -> Vec<f64> {
            courses
                .iter()
                .map(|&c| {
                    let name = &catalog.course(c).name;
                    if prefs.iter().any(|p| p == name) {
                        0.0
                    } else {
                        config.half_day_penalty
                    }
                })
                .collect()
        };

        let students: Vec<_> = order.iter().map(|&s| problem.student(s)).collect();

        Self {
            order: order.to_vec(),
            capacities: catalog
                .courses()
                .iter()
                .map(|c| f64::from(c.capacity))
                .collect(),
            weights: students.iter().map(|s| weights.weight(s.priority)).collect(),
            am_costs: students
                .iter()
                .map(|s| costs(&am_courses, &s.am_preferences))
                .collect(),
            pm_costs: students
                .iter()
                .map(|s| costs(&pm_courses, &s.pm_preferences))
                .collect(),
            am_courses,
            pm_courses,
            full_day_courses,
            full_day_penalty: config.full_day_penalty,
        }
    }

    pub(crate) fn num_students(&self) -> usize {
        self.order.len()
    }

    /// Solves the model within `time_limit`.
    ///
    /// A solve stopped by the limit still returns its incumbent with
    /// [`SolutionStatus::TimeLimit`]; callers must check the placements
    /// for completeness.
    pub(crate) fn solve(&self, time_limit: Duration) -> Result<Solved, ResolutionError> {
        let mut vars = ProblemVariables::new();
        let student_vars: Vec<StudentVars> = (0..self.num_students())
            .map(|_| StudentVars {
                am: vars.add_vector(variable().binary(), self.am_courses.len()),
                pm: vars.add_vector(variable().binary(), self.pm_courses.len()),
                full_day: vars.add_vector(variable().binary(), self.full_day_courses.len()),
                penalty: vars.add(variable().min(0.0)),
            })
            .collect();

        let objective: Expression = student_vars
            .iter()
            .zip(&self.weights)
            .map(|(sv, &w)| w * sv.penalty)
            .sum();

        let mut model = vars
            .minimise(objective)
            .using(highs)
            .with_time_limit(time_limit.as_secs_f64());

        for (k, sv) in student_vars.iter().enumerate() {
            let am_sum: Expression = sv.am.iter().copied().sum();
            let pm_sum: Expression = sv.pm.iter().copied().sum();
            let fd_sum: Expression = sv.full_day.iter().copied().sum();
            let exclusive = am_sum.clone() + fd_sum.clone();
            model.add_constraint(constraint!(am_sum == pm_sum));
            model.add_constraint(constraint!(exclusive == 1));

            let charged: Expression = sv
                .am
                .iter()
                .zip(&self.am_costs[k])
                .chain(sv.pm.iter().zip(&self.pm_costs[k]))
                .map(|(&v, &cost)| cost * v)
                .sum::<Expression>()
                + self.full_day_penalty * fd_sum;
            let penalty = sv.penalty;
            model.add_constraint(constraint!(penalty == charged));
        }

        for (family, courses) in [
            (Family::Am, &self.am_courses),
            (Family::Pm, &self.pm_courses),
            (Family::FullDay, &self.full_day_courses),
        ] {
            for (j, &course) in courses.iter().enumerate() {
                let load: Expression = student_vars.iter().map(|sv| family.of(sv)[j]).sum();
                let cap = self.capacities[course];
                model.add_constraint(constraint!(load <= cap));
            }
        }

        let solution = model.solve()?;
        let status = solution.status();

        let chosen = |vs: &[Variable], courses: &[usize]| {
            vs.iter()
                .position(|&v| solution.value(v) > 0.5)
                .map(|j| courses[j])
        };
        let mut objective_value = 0.0;
        let placements = student_vars
            .iter()
            .enumerate()
            .map(|(k, sv)| {
                let placement = Placement {
                    am: chosen(&sv.am, &self.am_courses),
                    pm: chosen(&sv.pm, &self.pm_courses),
                    full_day: chosen(&sv.full_day, &self.full_day_courses),
                };
                objective_value += self.weights[k] * self.penalty_of(k, &placement);
                (self.order[k], placement)
            })
            .collect();

        Ok(Solved {
            placements,
            objective: objective_value,
            status,
        })
    }

    /// Penalty charged to the student at solve position `k`.
    fn penalty_of(&self, k: usize, placement: &Placement) -> f64 {
        let lookup = |courses: &[usize], costs: &[f64], course: Option<usize>| {
            course
                .and_then(|c| courses.iter().position(|&x| x == c))
                .map_or(0.0, |j| costs[j])
        };
        let full_day = if placement.full_day.is_some() {
            self.full_day_penalty
        } else {
            0.0
        };
        lookup(&self.am_courses, &self.am_costs[k], placement.am)
            + lookup(&self.pm_courses, &self.pm_costs[k], placement.pm)
            + full_day
    }
}

#[derive(Clone, Copy)]
enum Family {
    Am,
    Pm,
    FullDay,
}

impl Family {
    fn of(self, sv: &StudentVars) -> &[Variable] {
        match self {
            Family::Am => &sv.am,
            Family::Pm => &sv.pm,
            Family::FullDay => &sv.full_day,
        }
    }
}
