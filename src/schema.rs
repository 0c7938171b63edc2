//! Lifted problem description: the schemas, objects, init and goal a caller hands to
//! [`crate::catalog::GroundProblem::build`] before anything is grounded.

/// A value that is either already bound to a concrete name, or a hole to be filled with the
/// `n`-th formal parameter of the enclosing action at grounding time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Holed<A> {
    Full(A),
    Param(usize),
}

/// A predicate schema: a name plus an ordered list of formal parameter slots.
#[derive(Debug, Clone)]
pub struct PredicateSchema {
    pub name: String,
    pub params: Vec<String>,
}

impl PredicateSchema {
    pub fn new(name: impl Into<String>, params: impl IntoIterator<Item = impl Into<String>>) -> Self {
        PredicateSchema {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A predicate template occurring in an action's pre/add/del list: a predicate name applied to
/// a mix of bound constants and holes referring to the action's own formal parameters (written
/// with a leading `?`, resolved against the action's parameter list in [`ActionSchema::new`]).
#[derive(Debug, Clone)]
pub struct PredTemplate {
    pub predicate: String,
    pub args: Vec<Holed<String>>,
}

impl PredTemplate {
    pub fn new(predicate: impl Into<String>, args: Vec<Holed<String>>) -> Self {
        PredTemplate {
            predicate: predicate.into(),
            args,
        }
    }

    /// Shorthand for a template whose arguments are all `?`-prefixed formal-parameter names, in
    /// the order supplied (the common case for the spec's example domains).
    pub fn of(predicate: impl Into<String>, arg_params: impl IntoIterator<Item = impl Into<String>>) -> Self {
        PredTemplate {
            predicate: predicate.into(),
            args: arg_params.into_iter().map(|p| Holed::Full(p.into())).collect(),
        }
    }
}

/// An action schema: a name, ordered formal parameters, and pre/add/del predicate templates.
/// Templates reference formal parameters either by a leading `?` name (resolved here against
/// `params`) or as a bound constant object name.
#[derive(Debug, Clone)]
pub struct ActionSchema {
    pub name: String,
    pub params: Vec<String>,
    pub pre: Vec<PredTemplateResolved>,
    pub add: Vec<PredTemplateResolved>,
    pub del: Vec<PredTemplateResolved>,
}

/// A predicate template with argument holes already resolved to parameter indices.
#[derive(Debug, Clone)]
pub struct PredTemplateResolved {
    pub predicate: String,
    pub args: Vec<Holed<String>>,
}

impl ActionSchema {
    pub fn new(
        name: impl Into<String>,
        params: impl IntoIterator<Item = impl Into<String>>,
        pre: Vec<PredTemplate>,
        add: Vec<PredTemplate>,
        del: Vec<PredTemplate>,
    ) -> Result<Self, crate::error::Error> {
        let name = name.into();
        let params: Vec<String> = params.into_iter().map(Into::into).collect();
        let resolve = |templates: Vec<PredTemplate>| -> Result<Vec<PredTemplateResolved>, crate::error::Error> {
            templates
                .into_iter()
                .map(|t| {
                    let args = t
                        .args
                        .into_iter()
                        .map(|a| match a {
                            Holed::Param(i) => Ok(Holed::Param(i)),
                            Holed::Full(s) if s.starts_with('?') => match params.iter().position(|p| p == &s) {
                                Some(i) => Ok(Holed::Param(i)),
                                None => Err(crate::error::Error::UnboundParameter {
                                    action: name.clone(),
                                    param: s,
                                }),
                            },
                            Holed::Full(s) => Ok(Holed::Full(s)),
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(PredTemplateResolved {
                        predicate: t.predicate,
                        args,
                    })
                })
                .collect()
        };
        let pre = resolve(pre)?;
        let add = resolve(add)?;
        let del = resolve(del)?;
        Ok(ActionSchema {
            name,
            pre,
            add,
            del,
            params,
        })
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A literal ground fact spelled out as (predicate name, argument object names), as used in
/// `ProblemSpec::init`/`goal`.
pub type GroundLiteral = (String, Vec<String>);

/// The full lifted problem description handed to the grounder.
#[derive(Debug, Clone)]
pub struct ProblemSpec {
    pub objects: Vec<String>,
    pub predicates: Vec<PredicateSchema>,
    pub actions: Vec<ActionSchema>,
    pub init: Vec<GroundLiteral>,
    pub goal: Vec<GroundLiteral>,
}
