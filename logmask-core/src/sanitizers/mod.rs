//! Rule compilation.
//!
//! `compiler` turns the declared rule definition into the ordered, immutable
//! `RuleSet` the engines run.

pub mod compiler;
