//! Global navigation: fetches the site navigation fragment, builds the
//! nav tree and drives its overlay panels (mega-menus, search, profile).
//!
//! The page is modelled headlessly by [`dom::Document`]; the host feeds
//! UI events to [`Gnav::dispatch`] and renders the resulting tree.

pub mod breakpoint;
pub mod config;
pub mod controller;
pub mod dismissal;
pub mod dom;
pub mod error;
pub mod events;
pub mod fragment;
pub mod identity;
pub mod lazy;
pub mod logging;
pub mod menu;
pub mod profile;
pub mod search;
pub mod ui;

pub use controller::{Gnav, Services};
pub use error::GnavError;
