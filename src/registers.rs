use crate::errors::Chip8Error;
use crate::memory::PROGRAM_START;

/// Index of the flags register
pub const VF: usize = 0xF;
pub const DEFAULT_STACK_DEPTH: usize = 16;

pub struct Registers {
    pub vn: [u8; 16],
    /// Index register; only the low 12 bits address memory
    pub i: u16,
    pub pc: u16,
    pub stack: CallStack,
}

impl Registers {
    pub fn new(stack_depth: usize) -> Self {
        Self {
            vn: Default::default(),
            i: 0,
            // Programs start at 0x200 and grow up
            pc: PROGRAM_START as u16,
            stack: CallStack::new(stack_depth),
        }
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new(DEFAULT_STACK_DEPTH)
    }
}

/// Saved return addresses. Lives outside emulated memory, so a program
/// can't scribble over it.
pub struct CallStack {
    frames: Vec<u16>,
    depth: usize,
}

impl CallStack {
    pub fn new(depth: usize) -> Self {
        Self {
            frames: Vec::with_capacity(depth),
            depth,
        }
    }

    pub fn push(&mut self, addr: u16) -> Result<(), Chip8Error> {
        if self.frames.len() >= self.depth {
            return Err(Chip8Error::StackOverflow { depth: self.depth });
        }
        self.frames.push(addr);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Chip8Error> {
        self.frames.pop().ok_or(Chip8Error::StackUnderflow)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[u16] {
        &self.frames
    }
}

#[test]
fn test_initial_registers() {
    let registers = Registers::default();
    assert_eq!(registers.pc, 0x200);
    assert_eq!(registers.i, 0);
    assert_eq!(registers.vn, [0; 16]);
    assert!(registers.stack.is_empty());
}

#[test]
fn test_stack_is_lifo() {
    let mut stack = CallStack::new(4);
    stack.push(0x202).unwrap();
    stack.push(0x304).unwrap();
    assert_eq!(stack.frames(), &[0x202, 0x304]);
    assert_eq!(stack.pop().unwrap(), 0x304);
    assert_eq!(stack.pop().unwrap(), 0x202);
    assert!(matches!(stack.pop(), Err(Chip8Error::StackUnderflow)));
}

#[test]
fn test_stack_depth_is_bounded() {
    let mut stack = CallStack::new(2);
    stack.push(1).unwrap();
    stack.push(2).unwrap();
    assert!(matches!(
        stack.push(3),
        Err(Chip8Error::StackOverflow { depth: 2 })
    ));
    assert_eq!(stack.len(), 2);
}
