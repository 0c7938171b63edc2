//! The relaxed planning graph (C5) and the h_FF heuristic it supports.
//!
//! Grounded on `examples/original_source/autoplan/planning_graph.py`'s `RelaxedPlanningGraph`
//! (`reset`, `_expand_graph`, `_extract_solution_relaxed`): delete-relaxation forward expansion
//! with a precondition-counter ready queue, and backward relaxed-plan extraction with a
//! fewest-preconditions difficulty tie-break. Reusable buffers are kept on the struct and cleared
//! by [`RelaxedGraph::reset`] so repeated calls from [`crate::ehc`] don't reallocate per state.

use crate::grounder::GroundProblem;
use crate::intern::{ActionId, FactId};
use crate::state::State;
use std::collections::{HashSet, VecDeque};

/// A relaxed (delete-ignoring) planning graph, rebuildable in place via [`RelaxedGraph::reset`].
pub struct RelaxedGraph<'p> {
    problem: &'p GroundProblem,
    fact_layer: Vec<Option<usize>>,
    action_layer: Vec<Option<usize>>,
    remaining: Vec<usize>,
}

impl<'p> RelaxedGraph<'p> {
    pub fn new(problem: &'p GroundProblem) -> Self {
        let num_facts = problem.catalog.facts.len();
        let num_actions = problem.num_actions();
        RelaxedGraph {
            problem,
            fact_layer: vec![None; num_facts],
            action_layer: vec![None; num_actions],
            remaining: vec![0; num_actions],
        }
    }

    /// Rebuilds the forward relaxed graph from `state`, returning the highest fact layer reached
    /// (or `None` if the ready queue drains with facts still unreached — never actually happens
    /// here since every fact layer starts at `None` and the graph always levels off).
    fn reset(&mut self, state: &State) -> usize {
        self.fact_layer.iter_mut().for_each(|l| *l = None);
        self.action_layer.iter_mut().for_each(|l| *l = None);
        for (id, action) in self.problem.catalog.actions.iter().enumerate() {
            self.remaining[id] = action.preconditions.len();
        }

        let mut queue: VecDeque<(FactId, usize)> = VecDeque::new();
        for f in state.iter() {
            self.fact_layer[usize::from(f)] = Some(0);
            queue.push_back((f, 0));
        }

        let mut max_layer = 0;
        while let Some((f, layer)) = queue.pop_front() {
            for &a in self.problem.reverse.dependent_on(f) {
                let idx = usize::from(a);
                if self.remaining[idx] == 0 {
                    continue; // already fired from a previous fact at an earlier layer
                }
                self.remaining[idx] -= 1;
                if self.remaining[idx] == 0 {
                    self.action_layer[idx] = Some(layer);
                    let next = layer + 1;
                    for &add in &self.problem.action(a).adds {
                        let slot = &mut self.fact_layer[usize::from(add)];
                        if slot.is_none() {
                            *slot = Some(next);
                            max_layer = max_layer.max(next);
                            queue.push_back((add, next));
                        }
                    }
                }
            }
        }
        // Zero-precondition actions never get dequeued by the loop above; give them layer 0.
        for (idx, action) in self.problem.catalog.actions.iter().enumerate() {
            if action.preconditions.is_empty() && self.action_layer[idx].is_none() {
                self.action_layer[idx] = Some(0);
            }
        }
        max_layer
    }

    /// Extracts a relaxed plan achieving `goal` from the graph just built by `reset`, or `None`
    /// if some goal fact never reaches a layer.
    fn extract(&self, goal: &[FactId]) -> Option<Vec<ActionId>> {
        let mut max_layer = 0;
        for &g in goal {
            max_layer = max_layer.max(self.fact_layer[usize::from(g)]?);
        }

        let mut goals_at: Vec<HashSet<FactId>> = vec![HashSet::new(); max_layer + 1];
        for &g in goal {
            let layer = self.fact_layer[usize::from(g)]?;
            goals_at[layer].insert(g);
        }

        let mut chosen: Vec<ActionId> = Vec::new();
        let mut marked: HashSet<FactId> = HashSet::new();
        for layer in (1..=max_layer).rev() {
            let layer_goals: Vec<FactId> = goals_at[layer].iter().copied().collect();
            for g in layer_goals {
                if marked.contains(&g) {
                    continue;
                }
                let achiever = self
                    .problem
                    .reverse
                    .achievers_of(g)
                    .iter()
                    .copied()
                    .filter(|&a| self.action_layer[usize::from(a)] == Some(layer - 1))
                    .min_by_key(|&a| {
                        self.problem
                            .action(a)
                            .preconditions
                            .iter()
                            .map(|&p| self.fact_layer[usize::from(p)].unwrap_or(0))
                            .sum::<usize>()
                    })
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "relaxed plan extraction: goal fact {g:?} reaches layer {layer} but has no achiever at layer {}",
                            layer - 1
                        )
                    })
                    .expect("ready-queue invariant: every relaxed-reachable fact has an achiever one layer below it");
                chosen.push(achiever);
                // Mark every add-effect of the chosen achiever, not just `g`: it is produced for
                // free alongside `g` and must not trigger a second, possibly different, achiever
                // if it later surfaces as a goal at its own layer (spec §4.4.1 step 4).
                for &f in &self.problem.action(achiever).adds {
                    marked.insert(f);
                }
                for &p in &self.problem.action(achiever).preconditions {
                    let p_layer = self.fact_layer[usize::from(p)]?;
                    if p_layer > 0 {
                        goals_at[p_layer].insert(p);
                    }
                }
            }
        }
        chosen.sort_by_key(|a| a.to_u32());
        chosen.dedup();
        Some(chosen)
    }

    /// The h_FF heuristic: the number of distinct actions in a delete-relaxed plan achieving
    /// `goal` from `state`, or `None` if `goal` is unreachable even ignoring deletes (a sound
    /// proof that it is unreachable in the real problem too).
    pub fn h_ff(&mut self, state: &State, goal: &[FactId]) -> Option<usize> {
        self.reset(state);
        self.extract(goal).map(|plan| plan.len())
    }
}
