pub mod action;
pub mod check_in;
pub mod emotion;
