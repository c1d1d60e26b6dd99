//! Pure CNF-building helpers shared by the clause generators.

use crate::solver::{Literal, VarId};

/// A 2-literal clause stating that the variables `a` and `b` do not both hold.
pub(crate) fn not_both(a: VarId, b: VarId) -> Vec<Literal> {
    vec![-a, -b]
}

/// Tseitin-transform a DNF formula (an OR of AND-terms, each inner `Vec` a conjunction of
/// literals) into an equisatisfiable list of CNF clauses.
///
/// Each term `i` gets a fresh auxiliary variable `x_i` constrained to be equivalent to the term's
/// conjunction: one clause `(¬l_1 ∨ … ∨ ¬l_m ∨ x_i)` plus `(¬x_i ∨ l_j)` per literal. A final
/// auxiliary `y`, forced true by a unit clause, then requires at least one `x_i` to hold via
/// `(y ∨ ¬x_i)` for every term and `(¬y ∨ x_1 ∨ … ∨ x_n)`.
///
/// Auxiliaries are taken from `next_aux` upwards; the returned counter is strictly greater than
/// every id used, so threading it through successive calls keeps their auxiliary ranges disjoint.
/// An empty `terms` yields a contradictory (but well-formed) clause set, which is the correct
/// reading of an empty disjunction.
pub(crate) fn dnf_to_cnf(terms: &[Vec<Literal>], next_aux: VarId) -> (Vec<Vec<Literal>>, VarId) {
    let mut clauses = Vec::with_capacity(
        terms.iter().map(|term| term.len() + 2).sum::<usize>() + terms.len() + 2,
    );

    let mut x = next_aux;
    for term in terms {
        let mut forward = Vec::with_capacity(term.len() + 1);
        forward.push(x);
        forward.extend(term.iter().map(|lit| -lit));
        clauses.push(forward);

        for lit in term {
            clauses.push(vec![-x, *lit]);
        }

        x += 1;
    }

    let y = x;
    clauses.push(vec![y]);

    let mut disjunction = Vec::with_capacity(terms.len() + 1);
    disjunction.push(-y);
    for i in 0..terms.len() {
        let x_i = y - 1 - i as VarId;
        clauses.push(vec![y, -x_i]);
        disjunction.push(x_i);
    }
    clauses.push(disjunction);

    (clauses, y + 1)
}
