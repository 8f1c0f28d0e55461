//! Gitlet object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character hexadecimal strings representing SHA-1 hashes.
//! They uniquely identify every blob and commit.
//!
//! ## Format
//!
//! - Full: 40 hex characters (e.g., "abc123...def")
//! - Short: First 7 characters, used by merge log entries
//!
//! ## Storage
//!
//! Objects are stored in `<kind>/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::object::sha1_hex;
use crate::artifacts::objects::{OBJECT_ID_LENGTH, SHORT_OBJECT_ID_LENGTH};
use std::path::PathBuf;

/// Gitlet object identifier (SHA-1 hash)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Arguments
    ///
    /// * `id` - 40-character hexadecimal string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or error if invalid length/characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Hash raw content into its object ID
    pub fn hash(content: &[u8]) -> Self {
        Self(sha1_hex(content))
    }

    /// Whether `prefix` could abbreviate an object ID at all
    pub fn is_valid_prefix(prefix: &str) -> bool {
        !prefix.is_empty()
            && prefix.len() <= OBJECT_ID_LENGTH
            && prefix.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    /// For example, `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(SHORT_OBJECT_ID_LENGTH).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::ObjectId;
    use proptest::proptest;
    use std::path::PathBuf;

    proptest! {
        #[test]
        fn hashing_is_deterministic(content in proptest::collection::vec(proptest::num::u8::ANY, 0..256)) {
            assert_eq!(ObjectId::hash(&content), ObjectId::hash(&content));
        }

        #[test]
        fn distinct_content_yields_distinct_ids(
            a in proptest::collection::vec(proptest::num::u8::ANY, 0..64),
            b in proptest::collection::vec(proptest::num::u8::ANY, 0..64)
        ) {
            if a != b {
                assert_ne!(ObjectId::hash(&a), ObjectId::hash(&b));
            }
        }

        #[test]
        fn parsed_ids_are_valid_prefixes_of_themselves(id in "[0-9a-f]{40}") {
            let oid = ObjectId::try_parse(id.clone()).unwrap();
            assert!(ObjectId::is_valid_prefix(&id));
            assert_eq!(oid.as_ref(), id);
        }
    }

    #[test]
    fn hash_of_known_content() {
        // sha1("hello\n")
        assert_eq!(
            ObjectId::hash(b"hello\n").as_ref(),
            "f572d396fae9206628714fb2ce00f72e94f2258f"
        );
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(ObjectId::try_parse(String::new()).is_err());
        assert!(ObjectId::try_parse("abc".to_string()).is_err());
        assert!(ObjectId::try_parse("z".repeat(40)).is_err());
        assert!(!ObjectId::is_valid_prefix(""));
        assert!(!ObjectId::is_valid_prefix("12345g"));
    }

    #[test]
    fn splits_into_fanout_directory() {
        let oid = ObjectId::hash(b"hello\n");
        assert_eq!(
            oid.to_path(),
            PathBuf::from("f5").join("72d396fae9206628714fb2ce00f72e94f2258f")
        );
        assert_eq!(oid.to_short_oid(), "f572d39");
    }
}
