//! Binary packing of a sealed envelope
//!
//! Packed layout (no crypto here, only the wire shape):
//! ```text
//! [1 byte: AAD length][AAD, 0–255 bytes][12 bytes: nonce][ciphertext + tag]
//! ```
//!
//! `unpack` validates the declared lengths before the bytes ever reach the
//! AEAD verifier, so truncated or tampered blobs fail as [`SecureError::Corrupt`]
//! with the offending bytes attached.

use crate::error::{SecureError, SecureResult};
use crate::{ADL_SIZE, MAX_DATA_SIZE, NONCE_SIZE};

/// The logical bundle of nonce, ciphertext and optional additional data.
///
/// The nonce is a fixed-size array: an envelope without one cannot be
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub nonce: [u8; NONCE_SIZE],
    pub ciphertext: Vec<u8>,
    pub additional_data: Option<Vec<u8>>,
}

/// Serialize an envelope into the packed byte layout.
///
/// Fails on an empty ciphertext or additional data longer than 255 bytes;
/// nothing is ever silently truncated.
pub fn pack(envelope: &Envelope) -> SecureResult<Vec<u8>> {
    if envelope.ciphertext.is_empty() {
        return Err(SecureError::EmptyCiphertext);
    }
    let aad = envelope.additional_data.as_deref().unwrap_or_default();
    if aad.len() > MAX_DATA_SIZE {
        return Err(SecureError::DataOverflow(aad.len()));
    }

    let mut packed =
        Vec::with_capacity(ADL_SIZE + aad.len() + NONCE_SIZE + envelope.ciphertext.len());
    packed.push(aad.len() as u8);
    packed.extend_from_slice(aad);
    packed.extend_from_slice(&envelope.nonce);
    packed.extend_from_slice(&envelope.ciphertext);
    Ok(packed)
}

/// Deserialize packed bytes back into an envelope.
///
/// The declared AAD length must leave room for the nonce and at least one
/// ciphertext byte; anything else is corrupt.
pub fn unpack(packed: &[u8]) -> SecureResult<Envelope> {
    let Some(&adl) = packed.first() else {
        return Err(SecureError::Corrupt(packed.to_vec()));
    };
    let data_len = adl as usize;
    if packed.len() < ADL_SIZE + data_len + NONCE_SIZE + 1 {
        return Err(SecureError::Corrupt(packed.to_vec()));
    }

    let nonce_start = ADL_SIZE + data_len;
    let ct_start = nonce_start + NONCE_SIZE;
    let mut nonce = [0u8; NONCE_SIZE];
    nonce.copy_from_slice(&packed[nonce_start..ct_start]);

    Ok(Envelope {
        nonce,
        ciphertext: packed[ct_start..].to_vec(),
        additional_data: (data_len > 0).then(|| packed[ADL_SIZE..nonce_start].to_vec()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn valid_envelope() -> Envelope {
        Envelope {
            nonce: [0xCC; NONCE_SIZE],
            ciphertext: vec![4, 5, 6],
            additional_data: Some(vec![1, 2, 3]),
        }
    }

    fn valid_packed() -> Vec<u8> {
        let mut packed = vec![3, 1, 2, 3];
        packed.extend_from_slice(&[0xCC; NONCE_SIZE]);
        packed.extend_from_slice(&[4, 5, 6]);
        packed
    }

    #[test]
    fn pack_known_vector() {
        assert_eq!(pack(&valid_envelope()).unwrap(), valid_packed());
    }

    #[test]
    fn unpack_known_vector() {
        assert_eq!(unpack(&valid_packed()).unwrap(), valid_envelope());
    }

    #[test]
    fn pack_without_additional_data() {
        let envelope = Envelope {
            additional_data: None,
            ..valid_envelope()
        };
        let packed = pack(&envelope).unwrap();
        assert_eq!(packed[0], 0);
        assert_eq!(unpack(&packed).unwrap(), envelope);
    }

    #[test]
    fn pack_rejects_empty_ciphertext() {
        let envelope = Envelope {
            ciphertext: vec![],
            ..valid_envelope()
        };
        assert!(matches!(pack(&envelope), Err(SecureError::EmptyCiphertext)));
    }

    #[test]
    fn pack_rejects_oversized_additional_data() {
        let envelope = Envelope {
            additional_data: Some(vec![0; MAX_DATA_SIZE + 1]),
            ..valid_envelope()
        };
        assert!(matches!(pack(&envelope), Err(SecureError::DataOverflow(256))));
    }

    #[test]
    fn unpack_rejects_empty_input() {
        assert!(matches!(unpack(&[]), Err(SecureError::Corrupt(_))));
    }

    #[test]
    fn unpack_rejects_truncated_input() {
        // Declares 3 bytes of AAD but the blob ends inside it.
        assert!(matches!(unpack(&[3, 1, 2]), Err(SecureError::Corrupt(_))));
    }

    #[test]
    fn unpack_rejects_missing_ciphertext() {
        // Header + AAD + nonce with nothing left over.
        let mut packed = vec![3, 1, 2, 3];
        packed.extend_from_slice(&[0xCC; NONCE_SIZE]);
        assert!(matches!(unpack(&packed), Err(SecureError::Corrupt(_))));
    }

    #[test]
    fn corrupt_error_carries_offending_bytes() {
        let input = vec![7, 1];
        match unpack(&input) {
            Err(SecureError::Corrupt(bytes)) => assert_eq!(bytes, input),
            other => panic!("expected Corrupt, got {other:?}"),
        }
    }

    proptest! {
        /// Packing then unpacking restores every structurally valid envelope.
        #[test]
        fn pack_unpack_roundtrip(
            nonce in proptest::array::uniform12(any::<u8>()),
            ciphertext in proptest::collection::vec(any::<u8>(), 1..=512),
            aad in proptest::option::of(proptest::collection::vec(any::<u8>(), 1..=MAX_DATA_SIZE)),
        ) {
            let envelope = Envelope { nonce, ciphertext, additional_data: aad };
            let unpacked = unpack(&pack(&envelope).unwrap()).unwrap();
            prop_assert_eq!(unpacked, envelope);
        }
    }
}
