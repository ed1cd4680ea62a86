use shared::{Error, Result};

/// Engine-native keys longer than this are rejected before any I/O.
const MAX_NATIVE_KEY_BYTES: usize = 255;

/// Fixed namespace/category pair under which every entry of this deployment
/// lives. Set once at configuration time, never per call.
#[derive(Clone, Debug)]
pub struct KeySpace {
    namespace: String,
    category: String,
}

impl KeySpace {
    pub fn new(namespace: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            category: category.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Map an external key to the engine-native key.
    ///
    /// Pure and synchronous: a key the engine cannot index on fails here,
    /// deterministically, and never reaches the network.
    pub fn native_key(&self, key: &str) -> Result<String> {
        if key.is_empty() {
            return Err(Error::InvalidKey("key must not be empty".to_string()));
        }
        if let Some(bad) = key.chars().find(|c| !is_key_char(*c)) {
            return Err(Error::InvalidKey(format!(
                "key contains forbidden character {bad:?}"
            )));
        }
        let native = format!("{}:{}:{}", self.namespace, self.category, key);
        if native.len() > MAX_NATIVE_KEY_BYTES {
            return Err(Error::InvalidKey(format!(
                "native key exceeds {MAX_NATIVE_KEY_BYTES} bytes"
            )));
        }
        Ok(native)
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_style_keys_are_accepted() {
        let keys = KeySpace::new("basalt", "uuid");
        assert_eq!(
            keys.native_key("abc123-def.4").unwrap(),
            "basalt:uuid:abc123-def.4"
        );
    }

    #[test]
    fn empty_key_is_rejected() {
        let keys = KeySpace::new("basalt", "uuid");
        assert!(matches!(keys.native_key(""), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn forbidden_characters_are_rejected() {
        let keys = KeySpace::new("basalt", "uuid");
        for key in ["has space", "tab\there", "naïve", "semi;colon"] {
            assert!(
                matches!(keys.native_key(key), Err(Error::InvalidKey(_))),
                "expected {key:?} to be rejected"
            );
        }
    }

    #[test]
    fn overlong_key_is_rejected() {
        let keys = KeySpace::new("basalt", "uuid");
        let key = "a".repeat(300);
        assert!(matches!(keys.native_key(&key), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn namespaces_do_not_collide() {
        let a = KeySpace::new("tenant-a", "uuid");
        let b = KeySpace::new("tenant-b", "uuid");
        assert_ne!(a.native_key("k").unwrap(), b.native_key("k").unwrap());
    }

    #[test]
    fn construction_is_deterministic() {
        let keys = KeySpace::new("basalt", "uuid");
        assert_eq!(keys.native_key("k").unwrap(), keys.native_key("k").unwrap());
    }
}
