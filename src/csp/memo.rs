//! Memoization of derived variables (common-subexpression elimination).
//!
//! Every smart constructor (`add`, `mul`, `dot`, ...) consults this table
//! before building a derived variable and its constraint, keyed by the
//! operation tag and the *identities* of the operands. Two structurally
//! identical expressions over the same variables share one derived
//! variable and one constraint.

use std::collections::HashMap;

/// One operand in a memo key. Identity equality over variable handles,
/// bit-pattern equality over float constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum MemoArg {
    /// A variable, by arena index.
    Var(usize),
    /// A float constant, by bit pattern.
    Bits(u64),
    /// An integer exponent.
    Uint(u32),
}

impl MemoArg {
    pub(crate) fn constant(k: f64) -> MemoArg {
        MemoArg::Bits(k.to_bits())
    }
}

/// Cache from (operation tag, operand tuple) to the arena index of the
/// derived variable previously built for it.
#[derive(Debug, Default)]
pub(crate) struct MemoTable {
    cache: HashMap<(&'static str, Vec<MemoArg>), usize>,
}

impl MemoTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lookup(&self, op: &'static str, args: &[MemoArg]) -> Option<usize> {
        self.cache.get(&(op, args.to_vec())).copied()
    }

    pub(crate) fn insert(&mut self, op: &'static str, args: &[MemoArg], var: usize) {
        self.cache.insert((op, args.to_vec()), var);
    }
}
