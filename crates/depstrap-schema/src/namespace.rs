//! Reversible encoding of dot-separated namespaces for the wire format.
//!
//! The runtime loader reads group identifiers and relocation prefixes with the
//! separator replaced, so that build tools which rewrite string constants
//! during repackaging cannot touch them.

/// Separator between namespace segments (`com.example`).
pub const NAMESPACE_SEPARATOR: char = '.';

/// Token written in place of every [`NAMESPACE_SEPARATOR`].
pub const WIRE_PLACEHOLDER: &str = "{}";

/// Replace every namespace separator with the wire placeholder.
pub fn encode_namespace(namespace: &str) -> String {
    namespace.replace(NAMESPACE_SEPARATOR, WIRE_PLACEHOLDER)
}

/// Inverse of [`encode_namespace`].
///
/// Exact for any namespace that does not itself contain the placeholder.
pub fn decode_namespace(encoded: &str) -> String {
    encoded.replace(WIRE_PLACEHOLDER, ".")
}

/// Serde adapter for namespace-valued fields.
pub(crate) mod wire {
    use super::{decode_namespace, encode_namespace};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode_namespace(value))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(decode_namespace(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encodes_every_separator() {
        assert_eq!(encode_namespace("com.example"), "com{}example");
        assert_eq!(encode_namespace("org.apache.commons"), "org{}apache{}commons");
        assert_eq!(encode_namespace("nodots"), "nodots");
        assert_eq!(encode_namespace(""), "");
    }

    #[test]
    fn handles_leading_and_trailing_separators() {
        assert_eq!(encode_namespace(".a."), "{}a{}");
        assert_eq!(decode_namespace("{}a{}"), ".a.");
    }

    #[test]
    fn decodes_placeholders() {
        assert_eq!(decode_namespace("com{}example"), "com.example");
    }

    proptest! {
        #[test]
        fn encoded_never_contains_separator(ns in "[a-zA-Z0-9_.-]{0,40}") {
            prop_assert!(!encode_namespace(&ns).contains(NAMESPACE_SEPARATOR));
        }

        #[test]
        fn decode_inverts_encode(ns in "[a-zA-Z0-9_.$-]{0,40}") {
            prop_assert_eq!(decode_namespace(&encode_namespace(&ns)), ns);
        }
    }
}
