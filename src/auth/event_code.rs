//! Opaque event-id codec.
//!
//! Raw database keys never leave the process: every externally visible
//! event id is a salted, reversible short code (hashid-style, minimum
//! length 8). Decoding happens at the API boundary only; everything
//! inside the service works with canonical [`EventId`] integers.

use std::fmt;

use harsh::Harsh;

use crate::domain::EventId;

/// Minimum length of generated public codes.
const MIN_CODE_LEN: usize = 8;

/// Salted codec between internal event keys and public codes.
#[derive(Clone)]
pub struct EventCodec {
    harsh: Harsh,
}

impl fmt::Debug for EventCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The inner state derives from the salt, which must not leak.
        f.debug_struct("EventCodec").finish_non_exhaustive()
    }
}

impl EventCodec {
    /// Builds a codec with the given salt.
    ///
    /// # Errors
    ///
    /// Returns the builder error when the salt cannot seed the alphabet
    /// shuffle (never happens for non-pathological salts).
    pub fn new(salt: &str) -> Result<Self, harsh::BuildError> {
        let harsh = Harsh::builder().salt(salt).length(MIN_CODE_LEN).build()?;
        Ok(Self { harsh })
    }

    /// Encodes an internal event id into its public code.
    #[must_use]
    pub fn encode(&self, id: EventId) -> String {
        self.harsh.encode(&[id.get().unsigned_abs()])
    }

    /// Decodes a public code back to the internal event id.
    ///
    /// Undecodable input yields `None`; callers treat that the same as
    /// an id that does not resolve (not found), leaking nothing about
    /// which codes are well-formed.
    #[must_use]
    pub fn decode(&self, code: &str) -> Option<EventId> {
        let ids = self.harsh.decode(code).ok()?;
        let first = ids.first()?;
        i64::try_from(*first).ok().map(EventId::new)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn codec() -> EventCodec {
        let Ok(codec) = EventCodec::new("test-salt") else {
            panic!("codec construction failed");
        };
        codec
    }

    #[test]
    fn codes_round_trip() {
        let codec = codec();
        let code = codec.encode(EventId::new(1234));
        assert_eq!(codec.decode(&code), Some(EventId::new(1234)));
    }

    #[test]
    fn codes_meet_minimum_length_and_hide_the_key() {
        let codec = codec();
        let code = codec.encode(EventId::new(7));
        assert!(code.len() >= MIN_CODE_LEN);
        assert_ne!(code, "7");
    }

    #[test]
    fn different_salts_produce_incompatible_codes() {
        let a = codec();
        let Ok(b) = EventCodec::new("another-salt") else {
            panic!("codec construction failed");
        };
        let code = a.encode(EventId::new(99));
        assert_ne!(b.decode(&code), Some(EventId::new(99)));
    }

    #[test]
    fn garbage_decodes_to_none() {
        let codec = codec();
        assert_eq!(codec.decode("!!not-a-code!!"), None);
        assert_eq!(codec.decode(""), None);
    }
}
