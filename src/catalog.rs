//! The ground catalog (C1): interned objects/predicate-names/action-names (`Sym`), interned
//! ground facts (`FactId`) and ground actions (`ActionId`). Built once by [`crate::grounder`]
//! and never mutated afterwards.

use crate::intern::{FactId, RefPool, Sym};
use std::collections::HashMap;

/// A single symbol table shared by object names, predicate names and action names — mirroring
/// the teacher's `World`, where a state variable is an array of `SymId`s drawn from one table.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    names: Vec<String>,
    by_name: HashMap<String, Sym>,
}

impl SymbolTable {
    pub fn intern(&mut self, name: &str) -> Sym {
        if let Some(&s) = self.by_name.get(name) {
            return s;
        }
        let s: Sym = self.names.len().into();
        self.names.push(name.to_string());
        self.by_name.insert(name.to_string(), s);
        s
    }

    pub fn get(&self, name: &str) -> Option<Sym> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, s: Sym) -> &str {
        &self.names[usize::from(s)]
    }
}

/// A ground fact: a predicate name paired with an ordered tuple of object symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fact {
    pub predicate: Sym,
    pub args: Box<[Sym]>,
}

/// A ground action: an action schema instantiated with objects for each formal parameter.
#[derive(Debug, Clone)]
pub struct Action {
    pub name: Sym,
    pub args: Box<[Sym]>,
    pub preconditions: Vec<FactId>,
    pub adds: Vec<FactId>,
    pub deletes: Vec<FactId>,
}

/// The full ground catalog: every fact and action that can appear in any state or plan for this
/// problem, interned so that equality/hashing downstream is integer comparison.
#[derive(Debug, Default)]
pub struct Catalog {
    pub symbols: SymbolTable,
    pub facts: RefPool<FactId, Fact>,
    pub actions: Vec<Action>,
}

impl Catalog {
    pub fn fact_name(&self, id: FactId) -> String {
        let fact = &self.facts[id];
        display_sexpr(&self.symbols, fact.predicate, &fact.args)
    }

    pub fn action_name(&self, id: crate::intern::ActionId) -> String {
        let action = &self.actions[usize::from(id)];
        display_sexpr(&self.symbols, action.name, &action.args)
    }
}

pub(crate) fn display_sexpr(table: &SymbolTable, head: Sym, args: &[Sym]) -> String {
    if args.is_empty() {
        return table.name(head).to_string();
    }
    let rendered: Vec<&str> = args.iter().map(|&a| table.name(a)).collect();
    format!("{}({})", table.name(head), rendered.join(", "))
}
