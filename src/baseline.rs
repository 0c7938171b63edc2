//! Uninformed baseline search (C8, extra): breadth-first and depth-first search over ground
//! states, used to sanity-check the heuristic searches against a search procedure with no
//! heuristic guidance at all.
//!
//! Grounded on `examples/original_source/autoplan/strips.py`'s `breadth_first_search`/
//! `depth_first_search`. The original has an off-by-one: its frontier is seeded with `(init, [])`
//! and a transition's action is only appended to the path when expanding a node already reached by
//! at least one action, which silently drops the very first action of any solution found directly
//! from `init`. Fixed here by recording the action taken to reach each state on the transition
//! itself rather than inferring it when a node is re-expanded.

use crate::grounder::GroundProblem;
use crate::plan::SequentialPlan;
use crate::state::{applicable, apply, satisfies, State};
use std::collections::{HashSet, VecDeque};

/// Breadth-first search over ground states; returns a shortest plan by action count, if any.
pub fn bfs(problem: &GroundProblem) -> Option<SequentialPlan> {
    if satisfies(&problem.init, &problem.goal) {
        return Some(SequentialPlan::new(vec![]));
    }
    let mut visited: HashSet<State> = HashSet::new();
    visited.insert(problem.init.clone());
    let mut queue: VecDeque<(State, Vec<crate::intern::ActionId>)> = VecDeque::new();
    queue.push_back((problem.init.clone(), Vec::new()));

    while let Some((state, path)) = queue.pop_front() {
        for id in problem.action_ids() {
            let action = problem.action(id);
            if !applicable(action, &state) {
                continue;
            }
            let next_state = apply(action, &state);
            if !visited.insert(next_state.clone()) {
                continue;
            }
            let mut next_path = path.clone();
            next_path.push(id);
            if satisfies(&next_state, &problem.goal) {
                return Some(SequentialPlan::new(next_path));
            }
            queue.push_back((next_state, next_path));
        }
    }
    None
}

/// Depth-first search over ground states; returns the first plan found (not necessarily
/// shortest), or `None` if the goal is unreachable.
pub fn dfs(problem: &GroundProblem) -> Option<SequentialPlan> {
    if satisfies(&problem.init, &problem.goal) {
        return Some(SequentialPlan::new(vec![]));
    }
    let mut visited: HashSet<State> = HashSet::new();
    visited.insert(problem.init.clone());
    let mut stack: Vec<(State, Vec<crate::intern::ActionId>)> = vec![(problem.init.clone(), Vec::new())];

    while let Some((state, path)) = stack.pop() {
        for id in problem.action_ids() {
            let action = problem.action(id);
            if !applicable(action, &state) {
                continue;
            }
            let next_state = apply(action, &state);
            if !visited.insert(next_state.clone()) {
                continue;
            }
            let mut next_path = path.clone();
            next_path.push(id);
            if satisfies(&next_state, &problem.goal) {
                return Some(SequentialPlan::new(next_path));
            }
            stack.push((next_state, next_path));
        }
    }
    None
}
