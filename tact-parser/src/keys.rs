//! Distinct hash namespaces used throughout TACT/CASC.
//!
//! Content keys, encoding keys, and archive keys are all 16-byte MD5-shaped
//! hashes, but they name different things and must never be substituted for
//! one another. Wrapping each in its own type makes it a compile error to
//! pass one where another is expected.

use std::fmt;

const KEY_LEN: usize = 16;

macro_rules! hash_key {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub [u8; KEY_LEN]);

        impl $name {
            /// Parses a lowercase or uppercase hex string into a key.
            pub fn from_hex(s: &str) -> Option<Self> {
                if s.len() != KEY_LEN * 2 {
                    return None;
                }
                let mut bytes = [0u8; KEY_LEN];
                hex::decode_to_slice(s, &mut bytes).ok()?;
                Some(Self(bytes))
            }

            pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
                &self.0
            }

            /// Lowercase 32-char hex rendering, as used in URLs and cache paths.
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl From<[u8; KEY_LEN]> for $name {
            fn from(bytes: [u8; KEY_LEN]) -> Self {
                Self(bytes)
            }
        }
    };
}

hash_key!(ContentKey);
hash_key!(EncodingKey);
hash_key!(ArchiveKey);

/// Splits a hash into the two-level prefix tree CDN paths are addressed by.
///
/// `format(h) = h[0..2] + "/" + h[2..4] + "/" + h`
pub fn cdn_path_components(hex: &str) -> (String, String) {
    if hex.len() >= 4 {
        (hex[..2].to_string(), hex[2..4].to_string())
    } else {
        (String::new(), String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_hex() {
        let hex = "49299eae4e3a195953764bb4adb3c91f";
        let key = ContentKey::from_hex(hex).unwrap();
        assert_eq!(key.to_hex(), hex);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(ContentKey::from_hex("abcd").is_none());
    }

    #[test]
    fn cdn_path_is_pure_function_of_hash() {
        let hex = "49299eae4e3a195953764bb4adb3c91f";
        assert_eq!(cdn_path_components(hex), ("49".into(), "29".into()));
    }

    #[test]
    fn distinct_key_types_do_not_compare() {
        let hex = "00112233445566778899aabbccddeeff";
        let ck = ContentKey::from_hex(hex).unwrap();
        let ek = EncodingKey::from_hex(hex).unwrap();
        assert_eq!(ck.as_bytes(), ek.as_bytes());
        // ck == ek would not even compile: different types.
    }
}
