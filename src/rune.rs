//! An ordered, append-only sequence of restrictions plus the evolving
//! authcode that authenticates them.

use std::rc::Rc;

use base64::engine::general_purpose::URL_SAFE as BASE64_URL_SAFE;
use base64::Engine as _;

use crate::context::Context;
use crate::error::RuneError;
use crate::hash::{Midstate, DIGEST_BYTES};
use crate::restriction::Restriction;

/// An ordered sequence of restrictions, plus the authcode state that binds
/// them to whoever issued the rune.
///
/// Cloning a `Rune` is cheap: the restriction list is [`Rc`]-backed, so
/// [`Clone::clone`] is a shallow copy that shares the list until one of the
/// clones calls [`Rune::add_restriction`], at which point [`Rc::make_mut`]
/// gives that clone its own private copy. [`Rune::clone_deep`] forces that
/// copy eagerly. Either way, appending to one clone never affects another.
#[derive(Debug, Clone)]
pub struct Rune {
    authcode: [u8; DIGEST_BYTES],
    length: u64,
    restrictions: Rc<Vec<Restriction>>,
}

impl Rune {
    /// Builds a rune from an already-computed authcode and restriction
    /// list, reconstructing the running byte-length the same way the
    /// issuer would have: 64 bytes for the padded secret block, then each
    /// restriction's encoded length plus the padding it brought the stream
    /// up to.
    pub fn new(authcode: [u8; DIGEST_BYTES], restrictions: Vec<Restriction>) -> Self {
        let mut length = 64u64;
        for r in &restrictions {
            length += r.encode().len() as u64;
            length += crate::hash::end_shastream(length).len() as u64;
        }
        Self {
            authcode,
            length,
            restrictions: Rc::new(restrictions),
        }
    }

    /// Like [`Rune::new`], but prepends the conventional unique-id
    /// restriction.
    pub fn new_with_id(
        authcode: [u8; DIGEST_BYTES],
        unique_id: &str,
        version: Option<&str>,
        mut restrictions: Vec<Restriction>,
    ) -> Result<Self, RuneError> {
        restrictions.insert(0, Restriction::unique_id(unique_id, version)?);
        Ok(Self::new(authcode, restrictions))
    }

    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }

    pub fn authcode(&self) -> [u8; DIGEST_BYTES] {
        self.authcode
    }

    /// Forces an eager copy of the restriction list, rather than the cheap
    /// [`Rc`]-shared copy [`Clone::clone`] gives you.
    pub fn clone_deep(&self) -> Self {
        Self {
            authcode: self.authcode,
            length: self.length,
            restrictions: Rc::new((*self.restrictions).clone()),
        }
    }

    /// Appends a restriction, extending the authcode in lockstep. Rejects
    /// an empty-field (unique-id) restriction unless this is the very
    /// first restriction on the rune, unless `allow_idfield` is set.
    pub fn add_restriction(
        &mut self,
        restriction: Restriction,
        allow_idfield: bool,
    ) -> Result<(), RuneError> {
        if restriction.is_unique_id() && !self.restrictions.is_empty() && !allow_idfield {
            return Err(RuneError::DisallowedIdField);
        }

        let encoded = restriction.encode();

        let mut midstate = Midstate::new();
        midstate.set_state(self.authcode, self.length);
        midstate.update(encoded.as_bytes());
        midstate.extend_with_terminator();
        let (digest, length) = midstate.state();
        self.authcode = digest;
        self.length = length;

        Rc::make_mut(&mut self.restrictions).push(restriction);
        Ok(())
    }

    /// Evaluates every restriction in order; the rune passes iff every
    /// restriction passes. Stops at the first failing restriction.
    pub fn are_restrictions_met(&self, ctx: &dyn Context) -> (bool, String) {
        for restriction in self.restrictions.iter() {
            if let Some(reason) = restriction.test(ctx) {
                return (false, reason);
            }
        }
        (true, String::new())
    }

    /// `base64url(authcode[32] || restrictions joined by unescaped '&')`.
    pub fn to_base64(&self) -> String {
        let mut body = Vec::with_capacity(DIGEST_BYTES + 32);
        body.extend_from_slice(&self.authcode);
        let restrstr = self
            .restrictions
            .iter()
            .map(Restriction::encode)
            .collect::<Vec<_>>()
            .join("&");
        body.extend_from_slice(restrstr.as_bytes());
        BASE64_URL_SAFE.encode(body)
    }

    /// Parses a rune from its base64url text form, accepting both padded
    /// and unpadded input.
    pub fn from_base64(s: &str) -> Result<Self, RuneError> {
        let body = decode_base64_lenient(s)?;
        if body.len() < DIGEST_BYTES {
            return Err(RuneError::AuthcodeTooShort { found: body.len() });
        }
        let authcode: [u8; DIGEST_BYTES] = body[..DIGEST_BYTES].try_into().unwrap();
        let mut rest = &body[DIGEST_BYTES..];

        let mut restrictions = Vec::new();
        while !rest.is_empty() {
            let (restriction, remainder) = Restriction::decode(rest)?;
            restrictions.push(restriction);
            rest = remainder;
        }

        Ok(Self::new(authcode, restrictions))
    }
}

impl PartialEq for Rune {
    fn eq(&self, other: &Self) -> bool {
        self.authcode == other.authcode && self.restrictions == other.restrictions
    }
}

impl Eq for Rune {}

pub(crate) fn decode_base64_lenient(s: &str) -> Result<Vec<u8>, RuneError> {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    match BASE64_URL_SAFE.decode(s) {
        Ok(bytes) => Ok(bytes),
        Err(_) => Ok(URL_SAFE_NO_PAD.decode(s)?),
    }
}
