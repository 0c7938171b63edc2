//! The grounder (C2): expands lifted [`crate::schema::ProblemSpec`] schemas into the ground
//! catalog and the initial state / goal. Grounded on the teacher's `World::new` /
//! `ground_action_schema` (enumeration over object permutations) and the Python original's
//! `Domain.__init__` (`itertools.permutations(self.objects, nparams)`), which is the direct
//! source of the default without-repetition grounding rule.

use crate::catalog::{Action, Catalog, Fact};
use crate::config::{Cfg, RepetitionPolicy};
use crate::error::Error;
use crate::intern::{ActionId, FactId, Sym};
use crate::schema::{Holed, ProblemSpec};
use crate::state::{ReverseIndex, State};
use itertools::Itertools;

/// A fully grounded problem: the catalog, the initial state, the goal fact set, and the reverse
/// precondition/achiever index shared read-only by Graphplan, the RPG and EHC.
#[derive(Debug)]
pub struct GroundProblem {
    pub catalog: Catalog,
    pub init: State,
    pub goal: Vec<FactId>,
    pub reverse: ReverseIndex,
}

impl GroundProblem {
    pub fn build(spec: &ProblemSpec, cfg: &Cfg) -> Result<Self, Error> {
        let mut catalog = Catalog::default();
        for o in &spec.objects {
            catalog.symbols.intern(o);
        }

        // C2.1: ground every predicate schema into its full fact extension.
        for pred in &spec.predicates {
            let sym = catalog.symbols.intern(&pred.name);
            for args in arg_tuples(spec.objects.len(), pred.arity(), cfg.repetition) {
                let args: Box<[Sym]> = args.into_iter().map(|i| object_sym(&catalog, spec, i)).collect();
                catalog.facts.intern(Fact { predicate: sym, args });
            }
        }

        // C2.2: ground every action schema into its full action extension.
        for action in &spec.actions {
            let name_sym = catalog.symbols.intern(&action.name);
            for args in arg_tuples(spec.objects.len(), action.arity(), cfg.repetition) {
                let arg_syms: Vec<Sym> = args.iter().map(|&i| object_sym(&catalog, spec, i)).collect();

                let bind = |templates: &[crate::schema::PredTemplateResolved],
                            catalog: &mut Catalog|
                 -> Result<Vec<FactId>, Error> {
                    let mut out = Vec::with_capacity(templates.len());
                    for t in templates {
                        let pred_sym = catalog
                            .symbols
                            .get(&t.predicate)
                            .ok_or_else(|| Error::UnknownObject(t.predicate.clone()))?;
                        let mut fact_args = Vec::with_capacity(t.args.len());
                        for a in &t.args {
                            let sym = match a {
                                Holed::Param(i) => arg_syms[*i],
                                Holed::Full(name) => catalog
                                    .symbols
                                    .get(name)
                                    .ok_or_else(|| Error::UnknownObject(name.clone()))?,
                            };
                            fact_args.push(sym);
                        }
                        let fact = Fact {
                            predicate: pred_sym,
                            args: fact_args.into_boxed_slice(),
                        };
                        out.push(catalog.facts.intern(fact));
                    }
                    Ok(out)
                };

                let preconditions = bind(&action.pre, &mut catalog)?;
                let adds = bind(&action.add, &mut catalog)?;
                let deletes = bind(&action.del, &mut catalog)?;

                if adds.iter().any(|a| deletes.contains(a)) {
                    let name = crate::catalog::display_sexpr(&catalog.symbols, name_sym, &arg_syms);
                    return Err(Error::OverlappingAddDelete(name));
                }

                catalog.actions.push(Action {
                    name: name_sym,
                    args: arg_syms.into_boxed_slice(),
                    preconditions,
                    adds,
                    deletes,
                });
            }
        }

        let init = ground_literals(&mut catalog, &spec.init, |name| Error::UnknownObject(name.to_string()))?;
        let mut init_state = State::new(catalog.facts.len());
        for f in init {
            init_state.add(f);
        }

        let goal = ground_literals(&mut catalog, &spec.goal, |name| Error::GoalOutsideUniverse(name.to_string()))?;

        tracing::debug!(
            facts = catalog.facts.len(),
            actions = catalog.actions.len(),
            "grounded problem"
        );

        let reverse = ReverseIndex::build(&catalog.actions, catalog.facts.len());

        Ok(GroundProblem {
            catalog,
            init: init_state,
            goal,
            reverse,
        })
    }

    pub fn action(&self, id: ActionId) -> &Action {
        &self.catalog.actions[usize::from(id)]
    }

    pub fn num_actions(&self) -> usize {
        self.catalog.actions.len()
    }

    pub fn action_ids(&self) -> impl Iterator<Item = ActionId> {
        (0..self.num_actions()).map(ActionId::from)
    }
}

fn object_sym(catalog: &Catalog, spec: &ProblemSpec, index: usize) -> Sym {
    catalog.symbols.get(&spec.objects[index]).expect("object was interned above")
}

fn ground_literals(
    catalog: &mut Catalog,
    literals: &[crate::schema::GroundLiteral],
    err: impl Fn(&str) -> Error,
) -> Result<Vec<FactId>, Error> {
    let mut out = Vec::with_capacity(literals.len());
    for (pred_name, args) in literals {
        let pred_sym = catalog.symbols.get(pred_name).ok_or_else(|| err(pred_name))?;
        let mut arg_syms = Vec::with_capacity(args.len());
        for a in args {
            arg_syms.push(catalog.symbols.get(a).ok_or_else(|| err(a))?);
        }
        let fact = Fact {
            predicate: pred_sym,
            args: arg_syms.into_boxed_slice(),
        };
        out.push(catalog.facts.get_ref(&fact).unwrap_or_else(|| catalog.facts.intern(fact)));
    }
    Ok(out)
}

/// Enumerates index-tuples of length `k` drawn from `0..n`, per the configured repetition
/// policy: permutations without repetition (default) or the full cartesian product.
fn arg_tuples(n: usize, k: usize, policy: RepetitionPolicy) -> Vec<Vec<usize>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    match policy {
        RepetitionPolicy::WithoutRepetition => (0..n).permutations(k).collect(),
        RepetitionPolicy::WithRepetition => std::iter::repeat_n(0..n, k).multi_cartesian_product().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ActionSchema, PredTemplate, PredicateSchema};

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
                ActionSchema::new(
                    "Bake",
                    ["?x"],
                    vec![PredTemplate::of("NotHave", ["?x"])],
                    vec![PredTemplate::of("Have", ["?x"])],
                    vec![PredTemplate::of("NotHave", ["?x"])],
                )
                .unwrap(),
            ],
            init: vec![
                ("Have".into(), vec!["cake".into()]),
                ("NotEaten".into(), vec!["cake".into()]),
            ],
            goal: vec![("Have".into(), vec!["cake".into()]), ("Eaten".into(), vec!["cake".into()])],
        }
    }

    #[test]
    fn grounds_cake_domain() {
        let spec = cake_spec();
        let problem = GroundProblem::build(&spec, &Cfg::default()).unwrap();
        assert_eq!(problem.catalog.facts.len(), 4);
        assert_eq!(problem.num_actions(), 2);
        assert_eq!(problem.goal.len(), 2);
    }

    #[test]
    fn idempotent_grounding() {
        let spec = cake_spec();
        let a = GroundProblem::build(&spec, &Cfg::default()).unwrap();
        let b = GroundProblem::build(&spec, &Cfg::default()).unwrap();
        assert_eq!(a.catalog.facts.len(), b.catalog.facts.len());
        assert_eq!(a.num_actions(), b.num_actions());
    }

    #[test]
    fn rejects_overlapping_add_delete() {
        let mut spec = cake_spec();
        // Eat both adds and deletes NotHave -> fine already disjoint; force a conflict instead.
        spec.actions[0] = ActionSchema::new(
            "Bad",
            ["?x"],
            vec![PredTemplate::of("Have", ["?x"])],
            vec![PredTemplate::of("Have", ["?x"])],
            vec![PredTemplate::of("Have", ["?x"])],
        )
        .unwrap();
        let err = GroundProblem::build(&spec, &Cfg::default()).unwrap_err();
        assert!(matches!(err, Error::OverlappingAddDelete(_)));
    }

    #[test]
    fn unbound_parameter_is_rejected_at_schema_construction() {
        let err = ActionSchema::new("Bad", ["?x"], vec![PredTemplate::of("Have", ["?y"])], vec![], vec![])
            .unwrap_err();
        assert!(matches!(err, Error::UnboundParameter { .. }));
    }
}
