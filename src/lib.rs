//! Offline-verifiable capability tokens built on SHA-256 midstate
//! extension.
//!
//! A [`MasterRune`](master_rune::MasterRune) is created from a secret; it
//! hands out [`Rune`](rune::Rune)s whose [authcode](rune::Rune::authcode) is
//! the SHA-256 midstate after hashing `secret || pad || R1 || pad || R2 ||
//! …`. Anyone holding a rune can tighten it by appending a
//! [`Restriction`](restriction::Restriction) without knowing the secret,
//! since this is a public operation: SHA-256's Merkle-Damgard construction
//! lets anyone resume a hash from its midstate ([length
//! extension](doc::length_extension)). Only the holder of the secret can
//! verify that a given authcode is a genuine descendant of an issued rune.
//!
//! Two error tiers exist: structural failures reject a value at
//! construction or parse time and are surfaced as [`RuneError`](error::RuneError);
//! evaluation failures never raise and instead flow back as `(bool, String)`
//! pairs from [`Rune::are_restrictions_met`](rune::Rune::are_restrictions_met)
//! and [`MasterRune::check_with_reason`](master_rune::MasterRune::check_with_reason).


#[cfg(doc)]
pub mod doc;

mod alternative;
mod context;
mod error;
mod hash;
mod master_rune;
mod restriction;
mod rune;
mod util;

pub use alternative::{Alternative, Cond};
pub use context::{Context, ContextValue, MapContext};
pub use error::RuneError;
pub use hash::{end_shastream, pad64, sha256, Midstate};
pub use master_rune::{check, check_with_reason, MasterRune, MAX_SECRET_BYTES};
pub use restriction::Restriction;
pub use rune::Rune;
