//! Constant derivation: pad key and label, encrypt one block, truncate.
//!
//! # Compatibility contract
//!
//! The leading 8 bytes of the ciphertext block are read as a **little-endian**
//! `u64`. Together with the text encoding this pins every constant bit for
//! bit; `derive("secret", "MY_FLAG")` under UTF-8 is `0x9c67acc03e931a10`.

use common::{DeriveError, DerivedConstant, Input};
use tracing::debug;

use crate::crypto::{pad_array, Aes256Encryptor, BlockEncryptor, PadError, BLOCK_LEN, KEY_LEN};
use crate::encoding::Encoding;

/// Derives constants with a fixed encoding and block encryptor.
#[derive(Debug, Clone, Default)]
pub struct ConstantDeriver<E = Aes256Encryptor> {
    encryptor: E,
    encoding: Encoding,
}

impl ConstantDeriver {
    /// AES-256 deriver using `encoding` for both inputs.
    pub fn new(encoding: Encoding) -> Self {
        Self::with_encryptor(Aes256Encryptor, encoding)
    }
}

impl<E: BlockEncryptor> ConstantDeriver<E> {
    pub fn with_encryptor(encryptor: E, encoding: Encoding) -> Self {
        Self {
            encryptor,
            encoding,
        }
    }

    /// Derive the constant for `label` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DeriveError::InvalidEncoding`] if either string cannot be
    /// encoded, and [`DeriveError::InputTooLong`] if the encoded key exceeds
    /// [`KEY_LEN`] bytes or the encoded label exceeds [`BLOCK_LEN`] bytes.
    pub fn derive(&self, key: &str, label: &str) -> Result<DerivedConstant, DeriveError> {
        let key_bytes = self.encoding.encode(key, Input::Key)?;
        let label_bytes = self.encoding.encode(label, Input::Label)?;

        let padded_key: [u8; KEY_LEN] =
            pad_array(&key_bytes).map_err(|e| too_long(e, Input::Key))?;
        let padded_label: [u8; BLOCK_LEN] =
            pad_array(&label_bytes).map_err(|e| too_long(e, Input::Label))?;
        debug!(
            key_len = key_bytes.len(),
            label_len = label_bytes.len(),
            encoding = %self.encoding,
            "inputs padded"
        );

        let block = self.encryptor.encrypt_block(&padded_key, &padded_label);

        let mut word = [0u8; 8];
        word.copy_from_slice(&block[..8]);
        Ok(DerivedConstant::new(u64::from_le_bytes(word)))
    }
}

fn too_long(err: PadError, input: Input) -> DeriveError {
    match err {
        PadError::InputTooLong { len, target_len } => DeriveError::InputTooLong {
            input,
            len,
            capacity: target_len,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::cipher::MockBlockEncryptor;
    use crate::crypto::pad::pad;

    fn derive_hex(key: &str, label: &str) -> String {
        ConstantDeriver::new(Encoding::Utf8)
            .derive(key, label)
            .unwrap()
            .hex
    }

    #[test]
    fn known_vectors() {
        assert_eq!(derive_hex("secret", "MY_FLAG"), "0x9c67acc03e931a10");
        assert_eq!(derive_hex("secret", "MY_FLAG2"), "0x819c1f77997a3ba1");
        assert_eq!(derive_hex("", ""), "0xdb4a10d570606963");
        assert_eq!(derive_hex("clef", "FLAG_ROOT"), "0x97801ee3ab051d11");
        assert_eq!(derive_hex("clé", "ÉTAT"), "0x58e485acafe76367");
    }

    #[test]
    fn full_length_inputs_skip_padding() {
        let key = "k".repeat(KEY_LEN);
        let label = "L".repeat(BLOCK_LEN);
        assert_eq!(derive_hex(&key, &label), "0x6ddbd881b8cd8ab0");
    }

    #[test]
    fn label_one_short_of_block() {
        let c = ConstantDeriver::new(Encoding::Utf8)
            .derive("secret", "ABCDEFGHIJKLMNO")
            .unwrap();
        assert_eq!(c.value, 0x0071_567c_2b89_d052);
        assert_eq!(c.hex, "0x0071567c2b89d052");
    }

    #[test]
    fn deterministic() {
        let deriver = ConstantDeriver::new(Encoding::Utf8);
        assert_eq!(
            deriver.derive("secret", "MY_FLAG").unwrap(),
            deriver.derive("secret", "MY_FLAG").unwrap()
        );
    }

    #[test]
    fn single_byte_changes_change_the_constant() {
        let deriver = ConstantDeriver::new(Encoding::Utf8);
        let base = deriver.derive("secret", "MY_FLAG").unwrap();

        let label = b"MY_FLAG";
        for i in 0..label.len() {
            let mut changed = label.to_vec();
            changed[i] ^= 0x20;
            let changed = String::from_utf8(changed).unwrap();
            assert_ne!(deriver.derive("secret", &changed).unwrap(), base, "label byte {i}");
        }

        let key = b"secret";
        for i in 0..key.len() {
            let mut changed = key.to_vec();
            changed[i] ^= 0x20;
            let changed = String::from_utf8(changed).unwrap();
            assert_ne!(deriver.derive(&changed, "MY_FLAG").unwrap(), base, "key byte {i}");
        }
    }

    #[test]
    fn encoding_changes_the_constant() {
        let utf8 = ConstantDeriver::new(Encoding::Utf8).derive("clé", "X").unwrap();
        let latin1 = ConstantDeriver::new(Encoding::Latin1).derive("clé", "X").unwrap();
        assert_ne!(utf8, latin1);
    }

    #[test]
    fn key_too_long() {
        let err = ConstantDeriver::new(Encoding::Utf8)
            .derive(&"k".repeat(33), "MY_FLAG")
            .unwrap_err();
        assert_eq!(
            err,
            DeriveError::InputTooLong {
                input: Input::Key,
                len: 33,
                capacity: 32
            }
        );
    }

    #[test]
    fn label_too_long_counts_encoded_bytes() {
        // 8 chars, 16 bytes in UTF-8: fits exactly.
        assert!(ConstantDeriver::new(Encoding::Utf8)
            .derive("secret", "éééééééé")
            .is_ok());
        // 9 chars, 18 bytes.
        let err = ConstantDeriver::new(Encoding::Utf8)
            .derive("secret", "ééééééééé")
            .unwrap_err();
        assert_eq!(
            err,
            DeriveError::InputTooLong {
                input: Input::Label,
                len: 18,
                capacity: 16
            }
        );
    }

    #[test]
    fn latin1_rejects_unrepresentable_key() {
        let err = ConstantDeriver::new(Encoding::Latin1)
            .derive("€uro", "MY_FLAG")
            .unwrap_err();
        assert!(matches!(
            err,
            DeriveError::InvalidEncoding {
                input: Input::Key,
                ..
            }
        ));
    }

    #[test]
    fn encryptor_receives_padded_inputs() {
        let expected_key = pad(b"secret", KEY_LEN).unwrap();
        let expected_block = pad(b"MY_FLAG", BLOCK_LEN).unwrap();

        let mut mock = MockBlockEncryptor::new();
        mock.expect_encrypt_block()
            .withf(move |key, block| key[..] == expected_key[..] && block[..] == expected_block[..])
            .times(1)
            .returning(|_, _| [0xaa; BLOCK_LEN]);

        let c = ConstantDeriver::with_encryptor(mock, Encoding::Utf8)
            .derive("secret", "MY_FLAG")
            .unwrap();
        assert_eq!(c.hex, "0xaaaaaaaaaaaaaaaa");
    }

    #[test]
    fn leading_word_is_little_endian() {
        let mut mock = MockBlockEncryptor::new();
        mock.expect_encrypt_block().returning(|_, _| {
            let mut block = [0xffu8; BLOCK_LEN];
            block[..8].copy_from_slice(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);
            block
        });

        let c = ConstantDeriver::with_encryptor(mock, Encoding::Utf8)
            .derive("k", "l")
            .unwrap();
        assert_eq!(c.value, 0x0807_0605_0403_0201);
        assert_eq!(c.hex, "0x0807060504030201");
    }

    #[test]
    fn too_long_input_never_reaches_the_encryptor() {
        let mut mock = MockBlockEncryptor::new();
        mock.expect_encrypt_block().times(0);

        let deriver = ConstantDeriver::with_encryptor(mock, Encoding::Utf8);
        assert!(deriver.derive("secret", &"L".repeat(17)).is_err());
    }
}
