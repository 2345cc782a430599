pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

/// ## Runtime settings

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Nested `?` calls beyond this many are skipped.
    pub max_call_depth: usize,
    /// When false, popping an empty value stack yields 0 instead of
    /// STACK UNDERFLOW.
    pub check_underflow: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            check_underflow: true,
        }
    }
}

impl Config {
    pub fn max_call_depth(self, max_call_depth: usize) -> Config {
        Config {
            max_call_depth,
            ..self
        }
    }

    pub fn check_underflow(self, check_underflow: bool) -> Config {
        Config {
            check_underflow,
            ..self
        }
    }
}
