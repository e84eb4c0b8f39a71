pub mod vigenere {
    use crate::{
        encode::{alphabet::Symbol, text::Text},
        error::{Error, Result},
    };

    /// Basic Vigenere Encryption/Decryption over the 26 letter alphabet.
    pub struct VigenereEnc {}

    impl VigenereEnc {
        /// Adds the repeating key to the plaintext, letter by letter, mod 26.
        pub fn encrypt(plaintext: &Text, key: &[Symbol]) -> Result<Text> {
            Self::apply(plaintext, key, Symbol::shift)
        }

        /// Subtracts the repeating key from the ciphertext, letter by letter, mod 26.
        pub fn decrypt(ciphertext: &Text, key: &[Symbol]) -> Result<Text> {
            Self::apply(ciphertext, key, Symbol::unshift)
        }

        fn apply(text: &Text, key: &[Symbol], op: fn(Symbol, Symbol) -> Symbol) -> Result<Text> {
            if key.is_empty() {
                return Err(Error::InvalidKeyword);
            }
            Ok(text
                .symbols()
                .iter()
                .zip(key.iter().cycle())
                .map(|(&u, &v)| op(u, v))
                .collect())
        }
    }

    #[cfg(test)]
    use crate::encode::{keyword::Keyword, text::normalize};

    #[test]
    fn test_encrypt() {
        let key: Keyword = "LEMON".parse().unwrap();
        let cipher = VigenereEnc::encrypt(&normalize("attack at dawn"), &key).unwrap();
        assert_eq!(cipher.to_string(), "LXFOPVEFRNHR");
        assert_eq!(
            VigenereEnc::decrypt(&cipher, &key).unwrap().to_string(),
            "ATTACKATDAWN"
        );
    }

    #[test]
    fn test_quick_brown_fox() {
        let plain = normalize("THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG");
        let key: Keyword = "LION".parse().unwrap();
        let cipher = VigenereEnc::encrypt(&plain, &key).unwrap();
        assert_ne!(cipher, plain);
        assert_eq!(VigenereEnc::decrypt(&cipher, &key).unwrap(), plain);
    }

    #[test]
    fn test_identity_key() {
        let plain = normalize("nothing changes");
        assert_eq!(VigenereEnc::encrypt(&plain, &[Symbol::A]).unwrap(), plain);
    }

    #[test]
    fn test_empty_key() {
        let plain = normalize("abc");
        assert_eq!(VigenereEnc::encrypt(&plain, &[]), Err(Error::InvalidKeyword));
        assert_eq!(VigenereEnc::decrypt(&plain, &[]), Err(Error::InvalidKeyword));
    }
}
