//! Reduction of fairness-constrained LTL checking to plain verification.
//!
//! The system is extended so that the proposition set can talk about
//! actions: states become `(state, last action)` pairs labeled with
//! which actions are currently enabled and which one was just triggered.
//! Each fairness class then turns into an implication premise over those
//! propositions, checked by the ordinary driver.

use crate::pipeline::verify_ltl;
use crate::result::VerificationResult;
use galago_ltl::Ltl;
use galago_ts::{ModelError, TransitionSystem};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;
use tracing::info;

/// A fairness condition: classes of actions under unconditional, strong,
/// and weak fairness. Classes are tried in the given order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FairnessCondition<A: Ord> {
    pub unconditional: Vec<BTreeSet<A>>,
    pub strong: Vec<BTreeSet<A>>,
    pub weak: Vec<BTreeSet<A>>,
}

impl<A: Ord> FairnessCondition<A> {
    pub fn new(
        unconditional: Vec<BTreeSet<A>>,
        strong: Vec<BTreeSet<A>>,
        weak: Vec<BTreeSet<A>>,
    ) -> Self {
        Self {
            unconditional,
            strong,
            weak,
        }
    }
}

/// Atomic propositions of the action-tracking extension.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FairAp<P, A> {
    /// A proposition of the original system.
    Original(P),
    /// The state was entered by this action.
    Triggered(A),
    /// This action has at least one successor here.
    Enabled(A),
}

/// Verifies `phi` on `ts` under the fairness condition `fc`.
///
/// Every class must pass its check for the verification to succeed; a
/// class passes when some action in it does. The first fully-failing
/// class aborts the reduction and its counterexample, projected back to
/// original states, is returned.
pub fn verify_fair_ltl<S, A, P>(
    ts: &TransitionSystem<S, A, P>,
    fc: &FairnessCondition<A>,
    phi: &Ltl<P>,
) -> Result<VerificationResult<S>, ModelError>
where
    S: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + Ord + fmt::Debug,
    P: Clone + Eq + Hash + Ord + fmt::Debug,
{
    let extended = extend_with_action_tracking(ts)?;
    let lifted = phi.map_props(&mut |p| FairAp::Original(p.clone()));

    let groups: [(&str, &[BTreeSet<A>], PremiseKind); 3] = [
        ("unconditional", &fc.unconditional, PremiseKind::Unconditional),
        ("strong", &fc.strong, PremiseKind::Strong),
        ("weak", &fc.weak, PremiseKind::Weak),
    ];
    for (kind_name, classes, kind) in groups {
        for class in classes {
            let mut last_failure = None;
            for action in class {
                let premise = kind.premise(action);
                let constraint = Ltl::implies(premise, lifted.clone());
                match verify_ltl(&extended, &constraint)? {
                    VerificationResult::Succeeded => {
                        last_failure = None;
                        break;
                    }
                    VerificationResult::Failed(cex) => last_failure = Some(cex),
                }
            }
            if let Some(cex) = last_failure {
                info!(kind = kind_name, "fairness class failed its check");
                return Ok(VerificationResult::Failed(cex.map_states(|(s, _)| s)));
            }
        }
    }
    Ok(VerificationResult::Succeeded)
}

enum PremiseKind {
    Unconditional,
    Strong,
    Weak,
}

impl PremiseKind {
    /// The fairness premise for one action, over the extended propositions.
    fn premise<P, A: Clone>(&self, action: &A) -> Ltl<FairAp<P, A>> {
        let triggered = Ltl::prop(FairAp::Triggered(action.clone()));
        let enabled = || Ltl::prop(FairAp::Enabled(action.clone()));
        match self {
            // <>[] triggered
            PremiseKind::Unconditional => Ltl::eventually_always(triggered),
            // []<> enabled => []<> triggered
            PremiseKind::Strong => Ltl::implies(
                Ltl::always_eventually(enabled()),
                Ltl::always_eventually(triggered),
            ),
            // <>[] enabled => []<> triggered
            PremiseKind::Weak => Ltl::implies(
                Ltl::eventually_always(enabled()),
                Ltl::always_eventually(triggered),
            ),
        }
    }
}

/// Pairs every state with the action that produced it and labels the
/// result with `Original`/`Triggered`/`Enabled` propositions.
fn extend_with_action_tracking<S, A, P>(
    ts: &TransitionSystem<S, A, P>,
) -> Result<TransitionSystem<(S, A), A, FairAp<P, A>>, ModelError>
where
    S: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + Ord + fmt::Debug,
    P: Clone + Eq + Hash + Ord + fmt::Debug,
{
    let mut builder = TransitionSystem::builder();
    builder.name(format!("{} + action tracking", ts.name()));
    builder.add_actions(ts.actions().iter().cloned());

    for p in ts.propositions() {
        builder.add_atomic_proposition(FairAp::Original(p.clone()));
    }
    for a in ts.actions() {
        builder.add_atomic_proposition(FairAp::Triggered(a.clone()));
        builder.add_atomic_proposition(FairAp::Enabled(a.clone()));
    }

    for s in ts.states() {
        let mut enabled: Vec<A> = Vec::new();
        for a in ts.actions() {
            if !ts.post_via(s, a)?.is_empty() {
                enabled.push(a.clone());
            }
        }
        for a in ts.actions() {
            let state = (s.clone(), a.clone());
            builder.add_state(state.clone());
            if ts.initial_states().contains(s) {
                builder.add_initial_state(state.clone());
            }
            for p in ts.label(s) {
                builder.add_label(state.clone(), FairAp::Original(p));
            }
            builder.add_label(state.clone(), FairAp::Triggered(a.clone()));
            for enabled_action in &enabled {
                builder.add_label(state.clone(), FairAp::Enabled(enabled_action.clone()));
            }
        }
    }

    for t in ts.transitions() {
        for a in ts.actions() {
            builder.add_transition(
                (t.from.clone(), a.clone()),
                t.action.clone(),
                (t.to.clone(), t.action.clone()),
            );
        }
    }

    Ok(builder.build())
}
