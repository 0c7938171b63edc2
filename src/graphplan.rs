//! The Graphplan engine (C4): leveled planning-graph expansion with mutex analysis, and backward
//! layered-plan extraction with memoized failure.
//!
//! Grounded on `examples/original_source/autoplan/planning_graph.py`'s `PlanningGraph`
//! (`_expand_graph`, `_possible_goal`, `_extract_solution`), restated over interned `FactId`s
//! with an explicit frame stack for extraction (spec design note §9) instead of the Python's
//! native recursion over hashable frozensets.

use crate::config::Limits;
use crate::grounder::GroundProblem;
use crate::intern::{ActionId, FactId};
use crate::plan::LayeredPlan;
use itertools::Itertools;
use std::collections::{HashMap, HashSet};

/// A real ground action or a synthetic `NoOp(f)` propagating a single fact unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionRef {
    Real(ActionId),
    NoOp(FactId),
}

impl ActionRef {
    fn preconditions(&self, problem: &GroundProblem) -> Vec<FactId> {
        match self {
            ActionRef::Real(id) => problem.action(*id).preconditions.clone(),
            ActionRef::NoOp(f) => vec![*f],
        }
    }
    fn adds(&self, problem: &GroundProblem) -> Vec<FactId> {
        match self {
            ActionRef::Real(id) => problem.action(*id).adds.clone(),
            ActionRef::NoOp(f) => vec![*f],
        }
    }
    fn deletes(&self, problem: &GroundProblem) -> Vec<FactId> {
        match self {
            ActionRef::Real(id) => problem.action(*id).deletes.clone(),
            ActionRef::NoOp(_) => vec![],
        }
    }
}

fn canon(a: ActionRef, b: ActionRef) -> (ActionRef, ActionRef) {
    if ordkey(a) <= ordkey(b) {
        (a, b)
    } else {
        (b, a)
    }
}
fn ordkey(a: ActionRef) -> (u8, u32) {
    match a {
        ActionRef::Real(id) => (0, id.to_u32()),
        ActionRef::NoOp(f) => (1, f.to_u32()),
    }
}
fn canon_facts(a: FactId, b: FactId) -> (FactId, FactId) {
    if a.to_u32() <= b.to_u32() {
        (a, b)
    } else {
        (b, a)
    }
}

/// One level of the planning graph: the facts reachable by this layer, the actions applicable at
/// this layer (real ground actions plus a `NoOp` per fact), the mutex relations computed at this
/// layer, and a reverse index from each fact in the *next* layer back to the actions here that
/// add it (used both for fact-mutex computation and for extraction candidates).
pub struct Level {
    pub facts: HashSet<FactId>,
    pub actions: Vec<ActionRef>,
    pub mutex_actions: HashSet<(ActionRef, ActionRef)>,
    pub mutex_facts: HashSet<(FactId, FactId)>,
    producers: HashMap<FactId, Vec<ActionRef>>,
}

fn expand(problem: &GroundProblem, prev: &Level) -> Level {
    let mut actions = Vec::new();
    for &f in &prev.facts {
        actions.push(ActionRef::NoOp(f));
    }
    for id in problem.action_ids() {
        let a = problem.action(id);
        if a.preconditions.iter().all(|f| prev.facts.contains(f)) {
            actions.push(ActionRef::Real(id));
        }
    }

    let mut facts = prev.facts.clone();
    let mut producers: HashMap<FactId, Vec<ActionRef>> = HashMap::new();
    for &a in &actions {
        for f in a.adds(problem) {
            facts.insert(f);
            producers.entry(f).or_default().push(a);
        }
    }

    // Action mutexes (inconsistent effects, interference, competing needs).
    let mut mutex_actions: HashSet<(ActionRef, ActionRef)> = HashSet::new();
    for (i, &a) in actions.iter().enumerate() {
        let a_adds: HashSet<FactId> = a.adds(problem).into_iter().collect();
        let a_dels: HashSet<FactId> = a.deletes(problem).into_iter().collect();
        let a_pre: HashSet<FactId> = a.preconditions(problem).into_iter().collect();
        for &b in actions.iter().skip(i + 1) {
            let b_adds: HashSet<FactId> = b.adds(problem).into_iter().collect();
            let b_dels: HashSet<FactId> = b.deletes(problem).into_iter().collect();
            let b_pre: HashSet<FactId> = b.preconditions(problem).into_iter().collect();

            let inconsistent = a_dels.iter().any(|f| b_adds.contains(f)) || b_dels.iter().any(|f| a_adds.contains(f));
            let interference = a_dels.iter().any(|f| b_pre.contains(f)) || b_dels.iter().any(|f| a_pre.contains(f));
            let competing = a_pre.iter().any(|&p| {
                b_pre
                    .iter()
                    .any(|&q| p != q && prev.mutex_facts.contains(&canon_facts(p, q)))
            });

            if inconsistent || interference || competing {
                mutex_actions.insert(canon(a, b));
            }
        }
    }

    // Fact mutexes (inconsistent support): {f,g} mutex iff every producer pair is action-mutex.
    let new_facts: Vec<FactId> = facts.difference(&prev.facts).copied().chain(prev.facts.iter().copied()).collect();
    let mut mutex_facts = HashSet::new();
    for (i, &f) in new_facts.iter().enumerate() {
        let empty = Vec::new();
        let prod_f = producers.get(&f).unwrap_or(&empty);
        for &g in new_facts.iter().skip(i + 1) {
            let prod_g = producers.get(&g).unwrap_or(&empty);
            if prod_f.is_empty() || prod_g.is_empty() {
                continue;
            }
            let all_mutex = prod_f
                .iter()
                .cartesian_product(prod_g.iter())
                .all(|(&a, &b)| a != b && mutex_actions.contains(&canon(a, b)));
            if all_mutex {
                mutex_facts.insert(canon_facts(f, g));
            }
        }
    }

    Level {
        facts,
        actions,
        mutex_actions,
        mutex_facts,
        producers,
    }
}

fn level0(problem: &GroundProblem) -> Level {
    Level {
        facts: problem.init.iter().collect(),
        actions: Vec::new(),
        mutex_actions: HashSet::new(),
        mutex_facts: HashSet::new(),
        producers: HashMap::new(),
    }
}

fn normalize(mut v: Vec<FactId>) -> Vec<FactId> {
    v.sort_by_key(|f| f.to_u32());
    v.dedup();
    v
}

fn goal_reachable_and_non_mutex(level: &Level, goal: &[FactId]) -> bool {
    if !goal.iter().all(|f| level.facts.contains(f)) {
        return false;
    }
    goal.iter().enumerate().all(|(i, &g)| {
        goal[i + 1..]
            .iter()
            .all(|&h| !level.mutex_facts.contains(&canon_facts(g, h)))
    })
}

struct Frame {
    layer: usize,
    combos: std::vec::IntoIter<Vec<ActionRef>>,
}

fn candidate_combos(levels: &[Level], layer: usize, goal: &[FactId]) -> Vec<Vec<ActionRef>> {
    let producer_level = &levels[layer];
    let empty = Vec::new();
    let per_goal: Vec<&Vec<ActionRef>> = goal.iter().map(|g| producer_level.producers.get(g).unwrap_or(&empty)).collect();
    if per_goal.iter().any(|c| c.is_empty()) {
        return Vec::new();
    }
    per_goal
        .into_iter()
        .map(|c| c.iter().copied())
        .multi_cartesian_product()
        .filter(|combo| {
            combo
                .iter()
                .enumerate()
                .all(|(i, &a)| combo[i + 1..].iter().all(|&b| a == b || !producer_level.mutex_actions.contains(&canon(a, b))))
        })
        .collect()
}

/// Extracts a layered real-action plan from the current top of `levels`, if one exists, using
/// an explicit stack of `(layer, candidate-iterator)` frames with memoized failed goal sets.
fn extract(problem: &GroundProblem, levels: &[Level], top_goal: Vec<FactId>) -> Option<LayeredPlan> {
    let n = levels.len() - 1;
    let top_goal = normalize(top_goal);
    if n == 0 {
        return if top_goal.iter().all(|f| problem.init.is_set(*f)) {
            Some(LayeredPlan::new(vec![]))
        } else {
            None
        };
    }

    let mut memo: HashSet<(usize, Vec<FactId>)> = HashSet::new();
    let mut goals: Vec<Vec<FactId>> = vec![top_goal.clone()];
    let mut stack: Vec<Frame> = vec![Frame {
        layer: n,
        combos: candidate_combos(levels, n, &top_goal).into_iter(),
    }];
    let mut chosen: Vec<Vec<ActionRef>> = Vec::new();

    loop {
        let depth = stack.len();
        if depth == 0 {
            return None;
        }
        let goal_key = (stack[depth - 1].layer, goals[depth - 1].clone());
        if memo.contains(&goal_key) {
            stack.pop();
            goals.pop();
            chosen.truncate(depth - 1);
            continue;
        }
        let frame = stack.last_mut().unwrap();
        match frame.combos.next() {
            None => {
                memo.insert(goal_key);
                stack.pop();
                goals.pop();
                chosen.truncate(depth - 1);
            }
            Some(combo) => {
                chosen.truncate(depth - 1);
                chosen.push(combo.clone());
                let layer = frame.layer;
                let new_goal = normalize(combo.iter().flat_map(|a| a.preconditions(problem)).collect());
                if layer - 1 == 0 {
                    if new_goal.iter().all(|f| problem.init.is_set(*f)) {
                        let mut layers = Vec::with_capacity(chosen.len());
                        for combo in &chosen {
                            let real: Vec<ActionId> = combo
                                .iter()
                                .filter_map(|a| match a {
                                    ActionRef::Real(id) => Some(*id),
                                    ActionRef::NoOp(_) => None,
                                })
                                .collect();
                            layers.push(real);
                        }
                        layers.reverse();
                        dedup_each(&mut layers);
                        return Some(LayeredPlan::new(layers));
                    }
                    // this combo doesn't bottom out at init; try the next one at this frame
                } else {
                    stack.push(Frame {
                        layer: layer - 1,
                        combos: candidate_combos(levels, layer - 1, &new_goal).into_iter(),
                    });
                    goals.push(new_goal);
                }
            }
        }
    }
}

fn dedup_each(layers: &mut [Vec<ActionId>]) {
    for layer in layers {
        layer.sort_by_key(|a| a.to_u32());
        layer.dedup();
    }
}

/// Builds a leveled planning graph and extracts a layered plan, or determines that none exists.
pub fn solve(problem: &GroundProblem) -> Option<LayeredPlan> {
    solve_with_limits(problem, &Limits::default())
}

pub fn solve_with_limits(problem: &GroundProblem, limits: &Limits) -> Option<LayeredPlan> {
    let mut levels = vec![level0(problem)];
    let mut iterations = 0usize;
    loop {
        let top = levels.last().unwrap();
        if goal_reachable_and_non_mutex(top, &problem.goal) {
            tracing::trace!(level = levels.len() - 1, "attempting extraction");
            if let Some(plan) = extract(problem, &levels, problem.goal.clone()) {
                (|| -> anyhow::Result<()> {
                    anyhow::ensure!(plan.validate(problem), "extracted plan does not reach the goal when replayed");
                    Ok(())
                })()
                .expect("internal invariant violated: graphplan extraction is unsound, not merely a planning failure");
                return Some(plan);
            }
        }
        let next = expand(problem, levels.last().unwrap());
        let leveled_off = {
            let top = levels.last().unwrap();
            next.facts == top.facts && next.mutex_facts == top.mutex_facts
        };
        tracing::debug!(level = levels.len(), facts = next.facts.len(), actions = next.actions.len(), "expanded graphplan level");
        if leveled_off {
            return None;
        }
        levels.push(next);
        iterations += 1;
        if let Some(max) = limits.max_graph_levels {
            if iterations >= max {
                return None;
            }
        }
    }
}
