//! The cycle oracle: "starting from `start_t`, ignoring edges through
//! `skip_l`, can we reach `target_t`?"
//!
//! This is the one genuinely hard part of the system. The wait-for graph
//! `G(W)` is never materialized — traversal walks `W`'s bits directly,
//! which is why `W` is a dense bitset rather than a heap-linked graph (see
//! `DESIGN.md`).
//!
//! # Soundness
//!
//! Before a decision, `G(W)` is acyclic (an invariant the Matrix policy
//! maintains). Granting `(t, l)` only adds edges between `t` and
//! `S(l) = { t' : W[t'][l] }`. A new cycle exists iff some `t' ∈ S(l)` can
//! already reach `t` without using the `l` column — exactly what
//! [`reachable`] checks. Refuse if any can; acyclicity is preserved either
//! way.
//!
//! # Completeness
//!
//! `W` records held-*or-queued*, which is coarser than strict wait-for, so
//! the oracle may refuse schedules that would not in fact deadlock. The
//! contract is *no false acceptances*, not *no false refusals*.
//!
//! Skip semantics: `skip_l` is excluded only at the root step ("don't walk
//! back through the lock we entered on"); it does not propagate to
//! recursive calls.

use crate::bitmatrix::{BitMatrix, CELL_BITS};

/// Answers whether granting `(target_t, skip_l)` could ever close a cycle,
/// by checking if `start_t` can already reach `target_t` in `G(W)` without
/// walking back through the `skip_l` column.
///
/// A bounded visited set (capacity `W.threads()`) guards against runaway
/// recursion in the presence of a bug; it is not required for correctness
/// given the acyclicity invariant holds.
pub fn reachable(w: &BitMatrix, start_t: usize, skip_l: usize, target_t: usize) -> bool {
    let mut visited = vec![false; w.threads()];
    visited[start_t] = true;
    visit(w, start_t, Some(skip_l), target_t, &mut visited)
}

fn visit(w: &BitMatrix, u: usize, skip_l: Option<usize>, target: usize, visited: &mut [bool]) -> bool {
    for (cell_idx, &word) in w.row(u).iter().enumerate() {
        if word == 0 {
            continue;
        }
        let base = cell_idx * CELL_BITS;
        let mut remaining = word;
        while remaining != 0 {
            let bit = remaining.trailing_zeros() as usize;
            remaining &= remaining - 1;
            let ll = base + bit;
            if ll >= w.locks() {
                break;
            }
            if skip_l == Some(ll) {
                continue;
            }
            for v in 0..w.threads() {
                if v == u || !w.get(v, ll) {
                    continue;
                }
                if v == target {
                    return true;
                }
                if visited[v] {
                    continue;
                }
                visited[v] = true;
                if visit(w, v, None, target, visited) {
                    return true;
                }
            }
        }
    }
    false
}
