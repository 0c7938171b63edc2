//! State algebra (C3): the set-of-facts algebra used by every search procedure, plus the
//! reverse-precondition/achiever index the relaxed planning graph needs to expand in time
//! linear in the reachability graph rather than quadratic in actions × layers.
//!
//! Grounded on the teacher's `classical::state::{State, Operators}`; simplified relative to the
//! teacher because STRIPS facts are monotone presence (no `Lit` polarity is needed).

use crate::catalog::Action;
use crate::intern::{ActionId, FactId};
use fixedbitset::FixedBitSet;

/// An immutable-in-spirit set of facts (mutated only by `apply`/`add`/`del`, never shared).
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct State {
    facts: FixedBitSet,
}

impl State {
    pub fn new(num_facts: usize) -> Self {
        State {
            facts: FixedBitSet::with_capacity(num_facts),
        }
    }

    pub fn is_set(&self, f: FactId) -> bool {
        self.facts.contains(usize::from(f))
    }

    pub fn add(&mut self, f: FactId) {
        self.facts.insert(usize::from(f));
    }

    pub fn del(&mut self, f: FactId) {
        self.facts.set(usize::from(f), false);
    }

    pub fn iter(&self) -> impl Iterator<Item = FactId> + '_ {
        self.facts.ones().map(FactId::from)
    }

    pub fn entails(&self, f: FactId) -> bool {
        self.is_set(f)
    }

    pub fn entails_all(&self, facts: &[FactId]) -> bool {
        facts.iter().all(|&f| self.entails(f))
    }
}

/// `applicable(a, s) ≜ a.preconditions ⊆ s`.
pub fn applicable(action: &Action, s: &State) -> bool {
    s.entails_all(&action.preconditions)
}

/// `apply(a, s) ≜ (s ∪ a.adds) \ a.deletes`. Adds are applied before deletes (deletes win on
/// overlap), though overlap is rejected at grounding time so this never actually matters.
pub fn apply(action: &Action, s: &State) -> State {
    let mut next = s.clone();
    for &f in &action.adds {
        next.add(f);
    }
    for &f in &action.deletes {
        next.del(f);
    }
    next
}

/// `satisfies(s, g) ≜ g ⊆ s`.
pub fn satisfies(s: &State, goal: &[FactId]) -> bool {
    s.entails_all(goal)
}

/// A reverse precondition/achiever index over the ground action catalog: for each fact, which
/// actions have it as a precondition (`dependent_on`) and which have it as an add-effect
/// (`achievers_of`). Built once per problem and shared read-only by Graphplan, the RPG and EHC.
#[derive(Debug)]
pub struct ReverseIndex {
    dependent_on: Vec<Vec<ActionId>>,
    achievers_of: Vec<Vec<ActionId>>,
}

impl ReverseIndex {
    pub fn build(actions: &[Action], num_facts: usize) -> Self {
        let mut dependent_on = vec![Vec::new(); num_facts];
        let mut achievers_of = vec![Vec::new(); num_facts];
        for (i, action) in actions.iter().enumerate() {
            let id = ActionId::from(i);
            for &p in &action.preconditions {
                dependent_on[usize::from(p)].push(id);
            }
            for &a in &action.adds {
                achievers_of[usize::from(a)].push(id);
            }
        }
        ReverseIndex {
            dependent_on,
            achievers_of,
        }
    }

    pub fn dependent_on(&self, f: FactId) -> &[ActionId] {
        &self.dependent_on[usize::from(f)]
    }

    pub fn achievers_of(&self, f: FactId) -> &[ActionId] {
        &self.achievers_of[usize::from(f)]
    }
}
