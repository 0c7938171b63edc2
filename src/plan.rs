//! Plan representations (C7): sequential plans (returned by EHC and the baseline searches) and
//! layered plans (returned by Graphplan), their display format, and replay-based validators.
//!
//! Grounded on the spec's own display contract (`Name(arg1, arg2, ...)`, one action or layer per
//! line); the validators are a direct restatement of `state::{applicable, apply, satisfies}`
//! chained over a plan instead of a single transition.

use crate::grounder::GroundProblem;
use crate::intern::ActionId;
use crate::state::{apply, satisfies};

/// A totally-ordered sequence of ground actions, one applied after another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialPlan {
    pub actions: Vec<ActionId>,
}

impl SequentialPlan {
    pub fn new(actions: Vec<ActionId>) -> Self {
        SequentialPlan { actions }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Checks that every action in `plan` is applicable in the state reached so far, and that the
/// final state satisfies `problem.goal`.
pub fn validate_sequential(plan: &SequentialPlan, problem: &GroundProblem) -> bool {
    let mut state = problem.init.clone();
    for &id in &plan.actions {
        let action = problem.action(id);
        if !crate::state::applicable(action, &state) {
            return false;
        }
        state = apply(action, &state);
    }
    satisfies(&state, &problem.goal)
}

/// A plan grouped into layers: actions within a layer are pairwise non-conflicting and are
/// applied together (as Graphplan's noop-augmented levels allow), one layer after another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayeredPlan {
    pub layers: Vec<Vec<ActionId>>,
}

impl LayeredPlan {
    pub fn new(layers: Vec<Vec<ActionId>>) -> Self {
        LayeredPlan { layers }
    }

    /// The layers flattened into one sequential ordering (layer order preserved, arbitrary order
    /// within a layer — valid because layer members are pairwise non-mutex by construction).
    pub fn flatten(&self) -> SequentialPlan {
        SequentialPlan::new(self.layers.iter().flatten().copied().collect())
    }

    pub fn validate(&self, problem: &GroundProblem) -> bool {
        validate_layered(self, problem)
    }
}

/// Checks that every layer's actions are jointly applicable against the state reached so far (all
/// preconditions hold before any layer effect is applied), and that the final state satisfies
/// `problem.goal`.
pub fn validate_layered(plan: &LayeredPlan, problem: &GroundProblem) -> bool {
    let mut state = problem.init.clone();
    for layer in &plan.layers {
        if !layer.iter().all(|&id| crate::state::applicable(problem.action(id), &state)) {
            return false;
        }
        let mut next = state.clone();
        for &id in layer {
            let action = problem.action(id);
            for &f in &action.adds {
                next.add(f);
            }
        }
        for &id in layer {
            let action = problem.action(id);
            for &f in &action.deletes {
                next.del(f);
            }
        }
        state = next;
    }
    satisfies(&state, &problem.goal)
}

/// Renders a sequential plan using a catalog for human-readable `Name(arg1, arg2, ...)` lines.
pub fn display_sequential(plan: &SequentialPlan, problem: &GroundProblem) -> String {
    plan.actions
        .iter()
        .map(|&id| problem.catalog.action_name(id))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders a layered plan, one line per layer, actions within a layer comma-separated.
pub fn display_layered(plan: &LayeredPlan, problem: &GroundProblem) -> String {
    plan.layers
        .iter()
        .map(|layer| {
            layer
                .iter()
                .map(|&id| problem.catalog.action_name(id))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Cfg;
    use crate::schema::{ActionSchema, PredTemplate, PredicateSchema, ProblemSpec};

    fn cake_spec() -> ProblemSpec {
        ProblemSpec {
            objects: vec!["cake".into()],
            predicates: vec![
                PredicateSchema::new("Have", ["?x"]),
                PredicateSchema::new("NotHave", ["?x"]),
                PredicateSchema::new("Eaten", ["?x"]),
                PredicateSchema::new("NotEaten", ["?x"]),
            ],
            actions: vec![
                ActionSchema::new(
                    "Eat",
                    ["?x"],
                    vec![PredTemplate::of("Have", ["?x"])],
                    vec![PredTemplate::of("Eaten", ["?x"]), PredTemplate::of("NotHave", ["?x"])],
                    vec![PredTemplate::of("Have", ["?x"]), PredTemplate::of("NotEaten", ["?x"])],
                )
                .unwrap(),
            ],
            init: vec![
                ("Have".into(), vec!["cake".into()]),
                ("NotEaten".into(), vec!["cake".into()]),
            ],
            goal: vec![("Eaten".into(), vec!["cake".into()])],
        }
    }

    #[test]
    fn sequential_plan_validates_and_displays() {
        let spec = cake_spec();
        let problem = GroundProblem::build(&spec, &Cfg::default()).unwrap();
        let eat = problem.action_ids().next().unwrap();
        let plan = SequentialPlan::new(vec![eat]);
        assert!(validate_sequential(&plan, &problem));
        assert_eq!(display_sequential(&plan, &problem), "Eat(cake)");
    }

    #[test]
    fn empty_sequential_plan_fails_unmet_goal() {
        let spec = cake_spec();
        let problem = GroundProblem::build(&spec, &Cfg::default()).unwrap();
        let plan = SequentialPlan::new(vec![]);
        assert!(!validate_sequential(&plan, &problem));
    }
}
