// src/ui/mod.rs
pub mod bounds;
pub mod costs;
pub mod dialog;
pub mod results;
pub mod validator;
pub mod widgets;
