pub mod dump;
pub mod eval;
pub mod repl;
