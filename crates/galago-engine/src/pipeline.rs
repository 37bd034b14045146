//! The verification driver: product construction, lasso search, and
//! projection of the witness back to the checked system.

use crate::lasso::LassoFinder;
use crate::result::{Counterexample, VerificationResult};
use galago_ltl::{ltl_to_nba, BuchiAutomaton, Ltl};
use galago_ts::{product, ModelError, TransitionSystem};
use std::fmt;
use std::hash::Hash;
use tracing::info;

/// Checks `ts` against an omega-regular property given as a Büchi
/// automaton for the *bad* words (the negation of the property).
///
/// The system satisfies the property iff the product with the bad-word
/// automaton admits no accepting lasso; a found lasso is projected to
/// system states and reported as the counterexample.
pub fn verify_omega_regular_property<S, A, P, Q>(
    ts: &TransitionSystem<S, A, P>,
    bad_words: &BuchiAutomaton<Q, P>,
) -> Result<VerificationResult<S>, ModelError>
where
    S: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Hash + Ord + fmt::Debug,
    Q: Clone + Eq + Hash + Ord + fmt::Debug,
{
    let prod = product(ts, bad_words);
    info!(
        system = ts.name(),
        product_states = prod.states().len(),
        product_transitions = prod.transitions().len(),
        "searching the product for accepting lassos"
    );
    let accepting = bad_words.accepting_states();
    let finder = LassoFinder::new(&prod, |state: &(S, Q)| accepting.contains(&state.1));
    match finder.search()? {
        None => Ok(VerificationResult::Succeeded),
        Some(lasso) => {
            let witness =
                Counterexample::new(lasso.prefix, lasso.cycle).map_states(|(s, _)| s);
            Ok(VerificationResult::Failed(witness))
        }
    }
}

/// Checks `ts` against the LTL property `phi` by translating the negated
/// formula and delegating to [`verify_omega_regular_property`].
pub fn verify_ltl<S, A, P>(
    ts: &TransitionSystem<S, A, P>,
    phi: &Ltl<P>,
) -> Result<VerificationResult<S>, ModelError>
where
    S: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Hash + Ord + fmt::Debug,
{
    let negated = Ltl::not(phi.clone());
    let bad_words = ltl_to_nba(&negated);
    info!(
        nba_states = bad_words.state_count(),
        "translated the negated property"
    );
    verify_omega_regular_property(ts, &bad_words)
}
