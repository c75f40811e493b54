use serde::{Deserialize, Serialize};

/// Compiler configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Maximum expression nesting the compiler will descend into
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

/// Deepest nesting any preset allows
pub const DEEP_MAX_DEPTH: usize = 160;

fn default_max_depth() -> usize {
    128
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

impl CompilerConfig {
    /// Create a configuration with an explicit depth limit
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Apply a depth profile to this configuration
    pub fn with_profile(mut self, profile: DepthProfile) -> Self {
        profile.apply_to(&mut self);
        self
    }

    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Depth presets for different kinds of callers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthProfile {
    /// Hand-written queries; anything deeper is almost certainly a bug
    Shallow,
    Standard,
    /// Generated queries (e.g. nested boolean trees built in loops)
    ///
    /// Capped so that compiling at the limit fits a default 2 MiB thread
    /// stack; flat chains built with `&`/`|` do not nest and are unaffected.
    Deep,
}

impl DepthProfile {
    /// Get the nesting limit for this profile
    pub fn max_depth(&self) -> usize {
        match self {
            DepthProfile::Shallow => 32,
            DepthProfile::Standard => default_max_depth(),
            DepthProfile::Deep => DEEP_MAX_DEPTH,
        }
    }

    /// Apply this profile to a CompilerConfig
    pub fn apply_to(&self, config: &mut CompilerConfig) {
        config.max_depth = self.max_depth();
    }
}

/// Index handle settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexSettings {
    /// Index name
    pub name: String,
    /// Whether unknown document types resolve to schema-less documents
    #[serde(default = "default_true")]
    pub dynamic_documents: bool,
    /// Compiler settings used for request bodies built through the index
    #[serde(default)]
    pub compiler: CompilerConfig,
}

fn default_true() -> bool {
    true
}

impl IndexSettings {
    /// Create settings for the named index
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dynamic_documents: true,
            compiler: CompilerConfig::default(),
        }
    }

    /// Set whether unknown document types are synthesized on lookup
    pub fn with_dynamic_documents(mut self, enabled: bool) -> Self {
        self.dynamic_documents = enabled;
        self
    }

    /// Set the compiler configuration
    pub fn with_compiler(mut self, compiler: CompilerConfig) -> Self {
        self.compiler = compiler;
        self
    }
}
