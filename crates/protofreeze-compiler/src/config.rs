//! Compile configuration.

/// Options for one [`compile`](crate::compile) call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompileConfig {
    /// Name of the exported root pointer. `None` means no data artifact.
    pub(crate) root_identifier: Option<String>,
    /// Artifact base path, e.g. `out/person` for `out/person.h`.
    pub(crate) output_base: String,
    pub(crate) command_line: Option<String>,
    pub(crate) input_name: Option<String>,
}

impl CompileConfig {
    pub fn new(output_base: impl Into<String>) -> Self {
        Self {
            output_base: output_base.into(),
            ..Self::default()
        }
    }

    /// Export the root message under this C identifier.
    pub fn root_identifier(mut self, value: impl Into<String>) -> Self {
        self.root_identifier = Some(value.into());
        self
    }

    /// Command line echoed into the data artifact's banner.
    pub fn command_line(mut self, value: impl Into<String>) -> Self {
        self.command_line = Some(value.into());
        self
    }

    /// Input file name echoed into the data artifact's banner.
    pub fn input_name(mut self, value: impl Into<String>) -> Self {
        self.input_name = Some(value.into());
        self
    }

    pub fn get_root_identifier(&self) -> Option<&str> {
        self.root_identifier.as_deref()
    }

    pub fn output_base(&self) -> &str {
        &self.output_base
    }

    /// File name of the layout header, without directories.
    pub fn header_file_name(&self) -> String {
        let base = self.output_base.rsplit('/').next().unwrap_or(&self.output_base);
        format!("{base}.h")
    }
}
