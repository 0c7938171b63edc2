//! Enforced hill climbing (C6): h_FF-guided plateau search.
//!
//! Grounded on `examples/original_source/autoplan/strips.py`'s `enforced_hill_climbing_search`
//! for the control flow (reset-per-plateau breadth-first search, accept the first strictly
//! h-improving successor, append the sub-plan, recompute h from there); the `Node`/`Rc` parent-
//! chain plan reconstruction follows the older teacher revision's `classical/search.rs` `Node`
//! type, since the Python original threads an edge list rather than a linked node chain.

use crate::grounder::GroundProblem;
use crate::intern::ActionId;
use crate::plan::SequentialPlan;
use crate::rpg::RelaxedGraph;
use crate::state::{applicable, apply, satisfies, State};
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

struct Node {
    state: State,
    parent: Option<Rc<Node>>,
    action: Option<ActionId>,
}

fn extract_plan(mut node: Rc<Node>) -> SequentialPlan {
    let mut actions = Vec::new();
    while let Some(a) = node.action {
        actions.push(a);
        node = node.parent.clone().expect("a node with an action always has a parent");
    }
    actions.reverse();
    SequentialPlan::new(actions)
}

/// Searches for a sequential plan from `problem.init` to `problem.goal` by enforced hill
/// climbing, guided by the h_FF heuristic. Returns `None` if a plateau exhausts without finding
/// a strictly h-improving state (EHC is incomplete; Graphplan remains the complete fallback).
pub fn search(problem: &GroundProblem) -> Option<SequentialPlan> {
    search_with_limit(problem, None)
}

pub fn search_with_limit(problem: &GroundProblem, max_expansions: Option<usize>) -> Option<SequentialPlan> {
    let mut rpg = RelaxedGraph::new(problem);
    let root = Rc::new(Node {
        state: problem.init.clone(),
        parent: None,
        action: None,
    });
    if satisfies(&root.state, &problem.goal) {
        return Some(SequentialPlan::new(vec![]));
    }
    let mut h = rpg.h_ff(&root.state, &problem.goal)?;
    let mut current = root;
    let mut expansions = 0usize;

    loop {
        let mut visited: HashSet<State> = HashSet::new();
        visited.insert(current.state.clone());
        let mut queue: VecDeque<Rc<Node>> = VecDeque::new();
        queue.push_back(current.clone());
        let mut better: Option<(Rc<Node>, Option<usize>)> = None;

        'plateau: while let Some(node) = queue.pop_front() {
            if let Some(max) = max_expansions {
                if expansions >= max {
                    return None;
                }
            }
            expansions += 1;
            for id in problem.action_ids() {
                let action = problem.action(id);
                if !applicable(action, &node.state) {
                    continue;
                }
                let next_state = apply(action, &node.state);
                if !visited.insert(next_state.clone()) {
                    continue;
                }
                let next = Rc::new(Node {
                    state: next_state.clone(),
                    parent: Some(node.clone()),
                    action: Some(id),
                });
                if satisfies(&next_state, &problem.goal) {
                    better = Some((next, Some(0)));
                    break 'plateau;
                }
                match rpg.h_ff(&next_state, &problem.goal) {
                    None => continue, // relaxed dead end, never worth expanding
                    Some(nh) if nh < h => {
                        better = Some((next, Some(nh)));
                        break 'plateau;
                    }
                    Some(_) => queue.push_back(next),
                }
            }
        }

        match better {
            None => return None,
            Some((node, nh)) => {
                if satisfies(&node.state, &problem.goal) {
                    return Some(extract_plan(node));
                }
                h = nh.expect("a non-goal accepted successor always carries its h value");
                current = node;
            }
        }
    }
}
