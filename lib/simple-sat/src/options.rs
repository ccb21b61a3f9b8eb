#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Options {
    /// Treat an empty input clause as trivially satisfied instead of contradictory.
    pub legacy_empty_clause: bool,
}

pub const DEFAULT_OPTIONS: Options = Options {
    legacy_empty_clause: false,
};

impl Default for Options {
    fn default() -> Self {
        DEFAULT_OPTIONS
    }
}
