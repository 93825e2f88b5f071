/// Resource bounds applied to every line a session executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Longest accepted token, in bytes.
    pub max_token_len: usize,
    /// Most operands the postfix parser holds at once.
    pub max_stack_depth: usize,
    /// Deepest operation tree a single expression may build.
    pub max_nesting: usize,
    /// Most parameters a function may declare.
    pub max_params: usize,
}

impl Default for Limits {
    fn default() -> Limits {
        Limits {
            max_token_len: 31,
            max_stack_depth: 64,
            max_nesting: 256,
            max_params: 4,
        }
    }
}
