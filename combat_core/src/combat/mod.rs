//! Attack resolution

mod report;
mod resolution;

pub use report::{AttackReport, ChannelReport};
pub use resolution::{
    resolve_attack, resolve_attack_with_listener, resolve_attack_with_rng, AttackListener,
};
