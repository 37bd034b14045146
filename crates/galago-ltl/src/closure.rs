//! Closure computation and elementary-set enumeration.

use crate::formula::Ltl;
use indexmap::IndexSet;
use std::collections::{BTreeSet, VecDeque};
use std::fmt;
use std::hash::Hash;

/// The closure of `phi`: all sub-formulas reachable by descending into
/// `And`/`Until`/`Next` children. Negations contribute their operand but
/// are not members themselves, so every member is in positive form.
pub fn closure<P>(phi: &Ltl<P>) -> IndexSet<Ltl<P>>
where
    P: Clone + Eq + Hash + Ord + fmt::Debug,
{
    let mut members: IndexSet<Ltl<P>> = IndexSet::new();
    let mut pending: VecDeque<Ltl<P>> = VecDeque::new();
    pending.push_back(phi.clone());
    while let Some(sub) = pending.pop_front() {
        if let Ltl::Not(inner) = sub {
            pending.push_back(*inner);
            continue;
        }
        if !members.insert(sub.clone()) {
            continue;
        }
        match sub {
            Ltl::And(l, r) | Ltl::Until(l, r) => {
                pending.push_back(*l);
                pending.push_back(*r);
            }
            Ltl::Next(inner) => pending.push_back(*inner),
            _ => {}
        }
    }
    members
}

/// Enumerates the elementary sets over `closure`: every maximal,
/// propositionally consistent choice of `psi` or `!psi` per member.
///
/// This walks the full `2^n` bit-vector power set and filters by the
/// consistency predicate; the exponential cost is intrinsic to the
/// closure construction. Inconsistent candidates are dropped silently.
pub fn elementary_sets<P>(closure: &IndexSet<Ltl<P>>) -> Vec<BTreeSet<Ltl<P>>>
where
    P: Clone + Eq + Hash + Ord + fmt::Debug,
{
    let members: Vec<&Ltl<P>> = closure.iter().collect();
    let n = members.len();
    debug_assert!(n < usize::BITS as usize, "closure too large to enumerate");

    let mut sets = Vec::new();
    for mask in 0..(1usize << n) {
        let mut candidate: BTreeSet<Ltl<P>> = BTreeSet::new();
        for (i, member) in members.iter().enumerate() {
            if mask & (1 << i) != 0 {
                candidate.insert((*member).clone());
            } else {
                candidate.insert(Ltl::not((*member).clone()));
            }
        }
        if is_consistent(&candidate) {
            sets.push(candidate);
        }
    }
    sets
}

/// The local consistency predicate over one candidate set.
fn is_consistent<P>(candidate: &BTreeSet<Ltl<P>>) -> bool
where
    P: Clone + Eq + Hash + Ord + fmt::Debug,
{
    if candidate.contains(&Ltl::Not(Box::new(Ltl::True))) {
        return false;
    }
    candidate.iter().all(|member| match member {
        Ltl::And(l, r) => candidate.contains(l.as_ref()) && candidate.contains(r.as_ref()),
        Ltl::Until(l, r) => candidate.contains(r.as_ref()) || candidate.contains(l.as_ref()),
        Ltl::Not(inner) => match inner.as_ref() {
            Ltl::And(l, r) => !(candidate.contains(l.as_ref()) && candidate.contains(r.as_ref())),
            Ltl::Until(_, r) => !candidate.contains(r.as_ref()),
            _ => true,
        },
        _ => true,
    })
}
