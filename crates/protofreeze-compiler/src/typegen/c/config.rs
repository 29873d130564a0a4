//! Configuration types for C header emission.

use protofreeze_core::MessageId;

/// Configuration for C header emission.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Artifact base path, source of the include guards
    pub(crate) output_base: String,
    /// Exported root pointer: identifier and message type
    pub(crate) root: Option<(String, MessageId)>,
}

impl Config {
    /// Create a new Config for the given artifact base path.
    pub fn new(output_base: impl Into<String>) -> Self {
        Self {
            output_base: output_base.into(),
            root: None,
        }
    }

    /// Declare an exported root pointer of type `message`.
    pub fn root(mut self, identifier: impl Into<String>, message: MessageId) -> Self {
        self.root = Some((identifier.into(), message));
        self
    }
}
