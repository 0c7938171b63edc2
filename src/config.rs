//! Caller-tunable configuration (§4.9). Mirrors the shape of the teacher's own
//! `classical::search::Cfg`: a small struct of knobs with a sensible `Default`.

/// How the grounder instantiates a schema's formal parameters over the object set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Default)]
pub enum RepetitionPolicy {
    /// Arguments are a k-permutation of distinct objects (no object repeated). Default; matches
    /// the source domains, where same-object arguments produce degenerate actions.
    #[default]
    WithoutRepetition,
    /// Arguments may repeat the same object (cartesian product). Needed for domains with
    /// legitimate self-referential ground facts.
    WithRepetition,
}


/// Caller-imposed bounds on search effort. `None` means unbounded (honor level-off / plateau
/// exhaustion exactly, per spec §4.3.3/§4.5).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_graph_levels: Option<usize>,
    pub max_ehc_expansions: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Cfg {
    pub repetition: RepetitionPolicy,
    pub limits: Limits,
}
