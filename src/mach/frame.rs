use super::Address;
use crate::lang::Block;

/// ## Control stack entry
///
/// Each open block owns exactly one frame. A closing bracket pops its
/// own frame and nothing else, except `}` which unwinds to the
/// nearest call.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Body of a `[` whose condition held.
    If,
    /// Body of a `(` still iterating. `entry` is the first byte of the body.
    For { remaining: i64, entry: Address },
    /// A `procedure ?` in progress. `ret` follows the `?`.
    Call { ret: Address },
    /// A block being scanned over without running it.
    Disabled(Block),
    /// A string literal; `mark` is the value stack length at its `"`.
    Literal { mark: usize },
}

impl Frame {
    pub fn block(&self) -> Option<Block> {
        match self {
            Frame::If => Some(Block::If),
            Frame::For { .. } => Some(Block::For),
            Frame::Call { .. } => Some(Block::Proc),
            Frame::Disabled(block) => Some(*block),
            Frame::Literal { .. } => None,
        }
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.block() {
            Some(block) => write!(f, "'{}'", block),
            None => write!(f, "\"\""),
        }
    }
}
