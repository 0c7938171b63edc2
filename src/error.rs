//! Construction-time error kinds (§7 of the spec). Planning-time "no plan found" outcomes are
//! never errors — every planning entry point returns `Option<_>` instead.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown object: {0}")]
    UnknownObject(String),

    #[error("action `{action}` references parameter `{param}` not declared in its signature")]
    UnboundParameter { action: String, param: String },

    #[error("ground action `{0}` has a fact in both its add-effects and delete-effects")]
    OverlappingAddDelete(String),

    #[error("goal fact `{0}` cannot be grounded from the declared predicates and objects")]
    GoalOutsideUniverse(String),
}
