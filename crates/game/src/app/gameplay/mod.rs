//! Game rules: the state store, key-to-action mapping, movement and bounds,
//! objectives and scene progression. Everything here is synchronous and
//! windowless; the engine loop drives it through [`GameSession`].

mod actions;
pub(crate) mod missions;
mod movement;
mod present;
mod progression;
mod session;
mod store;
pub(crate) mod types;

#[cfg(test)]
mod test_support;

pub(crate) use actions::cue_preload_list;
pub(crate) use session::GameSession;
