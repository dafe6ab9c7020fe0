//! SHA-256 compresses its input in 64-byte blocks, carrying an 8-word state
//! forward from one block to the next. The final digest is simply
//! whatever that state happens to be after the last block: there is no
//! separate finalization step that mixes in secret information. This is
//! the Merkle-Damgard construction, and it has a consequence that looks
//! alarming out of context: anyone who knows `SHA256(M)` and `len(M)` can
//! compute `SHA256(M || pad(M) || X)` for any `X` they choose, without ever
//! learning `M`.
//!
//! # Why this is usually a vulnerability
//!
//! A web service that authenticates requests with `SHA256(secret ||
//! message)` is broken by exactly this trick: an attacker who observes one
//! valid `(message, digest)` pair can forge `(message || pad || extra,
//! digest')` for any `extra`, without knowing `secret`, because the digest
//! is just the midstate after hashing `secret || message`.
//!
//! # Why this crate turns it into a feature
//!
//! A rune's authcode *is* that midstate, published on purpose. Extending
//! it, appending a restriction and folding it into the hash, is defined to
//! be something anyone can do, because the whole point of a rune is that
//! holders can tighten it further without asking the issuer. What length
//! extension does *not* give an attacker is the ability to produce a valid
//! midstate for a *different prefix*: there is no way to go from
//! `SHA256(secret || R1)` to a midstate consistent with `SHA256(secret ||
//! R1')` for some other `R1'`, short of knowing `secret` and hashing it
//! directly. Removing a restriction, or editing one already appended,
//! requires restarting the whole computation from the secret, and only the
//! issuer has it.
//!
//! This is why [`MasterRune`](crate::MasterRune) never needs to see a
//! holder's extended restrictions to verify them: it replays the same
//! `end_shastream`/encoding sequence from its own copy of the secret
//! ([`MasterRune::is_rune_authorized`](crate::MasterRune::is_rune_authorized))
//! and compares the result against the authcode the holder presents. If
//! the holder only ever appended restrictions through the public midstate
//! path, the two computations land on the same digest.
