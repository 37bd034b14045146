use std::fmt;

/// An LTL formula over atomic propositions of type `P`.
///
/// Only the minimal basis is represented; every other operator is a
/// derived constructor building a tree over these six variants, so the
/// translator can match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ltl<P> {
    True,
    Prop(P),
    Not(Box<Ltl<P>>),
    And(Box<Ltl<P>>, Box<Ltl<P>>),
    Next(Box<Ltl<P>>),
    Until(Box<Ltl<P>>, Box<Ltl<P>>),
}

impl<P> Ltl<P> {
    pub fn prop(p: P) -> Self {
        Ltl::Prop(p)
    }

    /// Negation; double negations collapse, so `not(not(phi)) == phi`.
    pub fn not(phi: Self) -> Self {
        match phi {
            Ltl::Not(inner) => *inner,
            other => Ltl::Not(Box::new(other)),
        }
    }

    pub fn and(left: Self, right: Self) -> Self {
        Ltl::And(Box::new(left), Box::new(right))
    }

    pub fn next(phi: Self) -> Self {
        Ltl::Next(Box::new(phi))
    }

    pub fn until(left: Self, right: Self) -> Self {
        Ltl::Until(Box::new(left), Box::new(right))
    }

    pub fn or(left: Self, right: Self) -> Self {
        Ltl::not(Ltl::and(Ltl::not(left), Ltl::not(right)))
    }

    pub fn implies(premise: Self, conclusion: Self) -> Self {
        Ltl::not(Ltl::and(premise, Ltl::not(conclusion)))
    }

    /// `<> phi`, as `true U phi`.
    pub fn eventually(phi: Self) -> Self {
        Ltl::until(Ltl::True, phi)
    }

    /// `[] phi`, as `!<>!phi`.
    pub fn always(phi: Self) -> Self {
        Ltl::not(Ltl::eventually(Ltl::not(phi)))
    }

    /// `[]<> phi`.
    pub fn always_eventually(phi: Self) -> Self {
        Ltl::always(Ltl::eventually(phi))
    }

    /// `<>[] phi`.
    pub fn eventually_always(phi: Self) -> Self {
        Ltl::eventually(Ltl::always(phi))
    }

    /// Rebuilds the tree with every atomic proposition mapped through `f`.
    pub fn map_props<Q>(&self, f: &mut impl FnMut(&P) -> Q) -> Ltl<Q> {
        match self {
            Ltl::True => Ltl::True,
            Ltl::Prop(p) => Ltl::Prop(f(p)),
            Ltl::Not(inner) => Ltl::Not(Box::new(inner.map_props(f))),
            Ltl::And(l, r) => Ltl::And(Box::new(l.map_props(f)), Box::new(r.map_props(f))),
            Ltl::Next(inner) => Ltl::Next(Box::new(inner.map_props(f))),
            Ltl::Until(l, r) => Ltl::Until(Box::new(l.map_props(f)), Box::new(r.map_props(f))),
        }
    }
}

impl<P: fmt::Display> fmt::Display for Ltl<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ltl::True => write!(f, "true"),
            Ltl::Prop(p) => write!(f, "{p}"),
            Ltl::Not(inner) => write!(f, "!{inner}"),
            Ltl::And(l, r) => write!(f, "({l} /\\ {r})"),
            Ltl::Next(inner) => write!(f, "(){inner}"),
            Ltl::Until(l, r) => write!(f, "({l} U {r})"),
        }
    }
}
