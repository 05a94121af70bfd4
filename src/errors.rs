use thiserror::Error;

/// Failures that stop a run. `UnknownOpcode` is normally reported through
/// [`crate::StepResult`]; the variant exists for callers that decide to halt on it.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("memory access out of bounds at address {address:#06X}")]
    MemoryFault { address: usize },

    #[error("call stack overflow: depth limit of {depth} reached")]
    StackOverflow { depth: usize },

    #[error("call stack underflow: return with an empty call stack")]
    StackUnderflow,

    #[error("unknown opcode {opcode:#06X}")]
    UnknownOpcode { opcode: u16 },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("could not read ROM: {0}")]
    Unreadable(#[from] std::io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyScriptError {
    #[error("malformed key script entry '{0}', expected FRAME+KEY or FRAME-KEY")]
    Malformed(String),

    #[error("'{0}' is not mapped to a CHIP-8 key")]
    UnmappedKey(char),
}
