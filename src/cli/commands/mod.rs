pub mod check;
pub mod formula;
pub mod solve;
