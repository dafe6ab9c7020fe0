//! The issuer side: a rune that additionally knows the secret, and can
//! authorize or reject runes derived from it without replaying the
//! incremental midstate path.

use std::ops::{Deref, DerefMut};

use subtle::ConstantTimeEq;

use crate::context::Context;
use crate::error::RuneError;
use crate::hash::{end_shastream, Midstate};
use crate::restriction::Restriction;
use crate::rune::Rune;

/// The maximum secret length the issuance path supports: the padded secret
/// must fit in a single 64-byte SHA-256 block.
pub const MAX_SECRET_BYTES: usize = 64 - 1 - 8;

/// A [`Rune`] built and verified by the party holding the secret.
///
/// `MasterRune` derefs to the underlying [`Rune`], so [`Rune::authcode`],
/// [`Rune::to_base64`], and friends are available directly.
#[derive(Debug, Clone)]
pub struct MasterRune {
    rune: Rune,
    /// An ordinary (non-midstate) SHA-256 computation seeded with just the
    /// secret, used by [`MasterRune::is_rune_authorized`] for the fast
    /// verification path.
    secret_hash: Midstate,
    secret_len: u64,
}

impl MasterRune {
    /// Creates a fresh rune from `secret`, with no restrictions yet.
    pub fn new(secret: &[u8]) -> Self {
        Self::new_with_restrictions(secret, Vec::new())
    }

    /// Like [`MasterRune::new`], but prepends the conventional unique-id
    /// restriction.
    pub fn new_with_id(
        secret: &[u8],
        unique_id: &str,
        version: Option<&str>,
    ) -> Result<Self, RuneError> {
        let id_restriction = Restriction::unique_id(unique_id, version)?;
        Ok(Self::new_with_restrictions(secret, vec![id_restriction]))
    }

    fn new_with_restrictions(secret: &[u8], restrictions: Vec<Restriction>) -> Self {
        assert!(
            secret.len() <= MAX_SECRET_BYTES,
            "secret must fit in a single SHA-256 block alongside its terminator"
        );

        let mut midstate = Midstate::new();
        midstate.update(secret);
        midstate.extend_with_terminator();
        let (authcode, length) = midstate.state();

        let mut rune = Rune::new(authcode, Vec::new());
        // `Rune::new` reconstructs `length` from an empty restriction list,
        // which already equals 64 here; assert the invariant holds rather
        // than silently trusting it.
        debug_assert_eq!(length, 64);

        for restriction in restrictions {
            rune.add_restriction(restriction, true)
                .expect("issuer-constructed restrictions are always well-formed");
        }

        let mut secret_hash = Midstate::new();
        secret_hash.update(secret);

        Self {
            rune,
            secret_hash,
            secret_len: secret.len() as u64,
        }
    }

    /// Appends a restriction the same way [`Rune::add_restriction`] does;
    /// exposed here too since most callers build runes through the issuer.
    pub fn add_restriction(
        &mut self,
        restriction: Restriction,
        allow_idfield: bool,
    ) -> Result<(), RuneError> {
        self.rune.add_restriction(restriction, allow_idfield)
    }

    /// Fast authorization path: replays `end_shastream` / encoding pairs
    /// over a copy of the secret-seeded hasher and finalizes normally,
    /// rather than walking the incremental midstate path. The comparison
    /// against the supplied rune's authcode is constant-time.
    pub fn is_rune_authorized(&self, other: &Rune) -> bool {
        let mut hash = self.secret_hash;
        let mut total_len = self.secret_len;
        for restriction in other.restrictions() {
            let terminator = end_shastream(total_len);
            hash.update(&terminator);
            total_len += terminator.len() as u64;

            let encoded = restriction.encode();
            hash.update(encoded.as_bytes());
            total_len += encoded.len() as u64;
        }

        let digest = hash.finalize();
        let other_authcode = other.authcode();
        bool::from(digest.as_ref().ct_eq(other_authcode.as_ref()))
    }

    /// Parses `token`, checks its authcode against this issuer's secret,
    /// and evaluates its restrictions against `ctx`, all in one call.
    pub fn check_with_reason(&self, token: &str, ctx: &dyn Context) -> (bool, String) {
        let Ok(rune) = Rune::from_base64(token) else {
            return (false, "runestring invalid".to_owned());
        };
        if !self.is_rune_authorized(&rune) {
            return (false, "rune authcode invalid".to_owned());
        }
        rune.are_restrictions_met(ctx)
    }

    /// Like [`MasterRune::check_with_reason`], discarding the reason.
    pub fn check(&self, token: &str, ctx: &dyn Context) -> bool {
        self.check_with_reason(token, ctx).0
    }
}

impl Deref for MasterRune {
    type Target = Rune;

    fn deref(&self) -> &Self::Target {
        &self.rune
    }
}

impl DerefMut for MasterRune {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.rune
    }
}

/// Convenience function mirroring [`MasterRune::check`] for callers who
/// only ever check one rune against one secret.
pub fn check(secret: &[u8], token: &str, ctx: &dyn Context) -> bool {
    MasterRune::new(secret).check(token, ctx)
}

/// Convenience function mirroring [`MasterRune::check_with_reason`] for
/// callers who only ever check one rune against one secret.
pub fn check_with_reason(secret: &[u8], token: &str, ctx: &dyn Context) -> (bool, String) {
    MasterRune::new(secret).check_with_reason(token, ctx)
}
