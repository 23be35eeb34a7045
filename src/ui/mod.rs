pub mod mvi;
pub mod panel;
