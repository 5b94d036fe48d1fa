//! Application metadata capability
//!
//! Components that display version information receive a `MetadataProvider`
//! explicitly instead of reading it from the host runtime.

/// Supplies name and version information about the running application
pub trait MetadataProvider: Send + Sync {
    /// Application name
    fn name(&self) -> &str;

    /// Application version
    fn version(&self) -> &str;
}

/// Metadata of this crate, taken from Cargo at compile time
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageMetadata;

impl MetadataProvider for PackageMetadata {
    fn name(&self) -> &str {
        env!("CARGO_PKG_NAME")
    }

    fn version(&self) -> &str {
        crate::VERSION
    }
}

/// Caller-supplied metadata, e.g. read from an extension manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticMetadata {
    name: String,
    version: String,
}

impl StaticMetadata {
    /// Create metadata from a name and version
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl MetadataProvider for StaticMetadata {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }
}

/// Render the "name vX.Y.Z" banner shown in about screens
pub fn about_line(provider: &dyn MetadataProvider) -> String {
    format!("{} v{}", provider.name(), provider.version())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_metadata() {
        let meta = PackageMetadata;
        assert_eq!(meta.name(), "mypepe-wallet");
        assert_eq!(meta.version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_about_line_uses_injected_provider() {
        let meta = StaticMetadata::new("MyPepe", "1.4.2");
        assert_eq!(about_line(&meta), "MyPepe v1.4.2");
    }
}
