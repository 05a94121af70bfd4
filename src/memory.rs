use log::debug;

use crate::errors::{Chip8Error, LoadError};

pub const MEMORY_SIZE: usize = 4096;
/// Programs are loaded here and the program counter starts here
pub const PROGRAM_START: usize = 0x200;
/// Largest ROM image accepted: everything up to, but not including, 0xFFF
pub const PROGRAM_CAPACITY: usize = 0xFFF - PROGRAM_START;

/// Where the hex digit glyphs live inside the reserved interpreter area
pub const FONT_BASE: usize = 0x050;
pub const GLYPH_SIZE: usize = 5;

pub const FONT: [u8; 16 * GLYPH_SIZE] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Address of the glyph for the low nibble of `digit`
pub fn glyph_address(digit: u8) -> usize {
    FONT_BASE + (digit & 0x0F) as usize * GLYPH_SIZE
}

/// The flat 4K address space
pub struct Memory {
    ram: Box<[u8; MEMORY_SIZE]>,
}

impl Default for Memory {
    fn default() -> Self {
        let mut mem = Self {
            ram: Box::new([0; MEMORY_SIZE]),
        };
        mem.ram[FONT_BASE..FONT_BASE + FONT.len()].copy_from_slice(&FONT);
        mem
    }
}

impl Memory {
    /// Check that `len` bytes starting at `addr` are addressable
    fn span(addr: usize, len: usize) -> Result<std::ops::Range<usize>, Chip8Error> {
        let end = addr
            .checked_add(len)
            .filter(|end| *end <= MEMORY_SIZE)
            .ok_or(Chip8Error::MemoryFault {
                address: addr.max(MEMORY_SIZE),
            })?;
        Ok(addr..end)
    }

    pub fn read_byte(&self, addr: usize) -> Result<u8, Chip8Error> {
        self.ram
            .get(addr)
            .copied()
            .ok_or(Chip8Error::MemoryFault { address: addr })
    }

    pub fn write_byte(&mut self, addr: usize, value: u8) -> Result<(), Chip8Error> {
        let cell = self
            .ram
            .get_mut(addr)
            .ok_or(Chip8Error::MemoryFault { address: addr })?;
        *cell = value;
        Ok(())
    }

    /// Big-endian 16-bit read, high byte first
    pub fn read_word(&self, addr: usize) -> Result<u16, Chip8Error> {
        let bytes = self.read_block(addr, 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_block(&self, addr: usize, len: usize) -> Result<&[u8], Chip8Error> {
        let range = Self::span(addr, len)?;
        Ok(&self.ram[range])
    }

    /// Writes all of `bytes` or nothing
    pub fn write_block(&mut self, addr: usize, bytes: &[u8]) -> Result<(), Chip8Error> {
        let range = Self::span(addr, bytes.len())?;
        self.ram[range].copy_from_slice(bytes);
        Ok(())
    }

    /// Copy a program image to `PROGRAM_START`. Oversized images are rejected
    /// before any byte is written.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), LoadError> {
        if rom.len() > PROGRAM_CAPACITY {
            return Err(LoadError::TooLarge {
                size: rom.len(),
                max: PROGRAM_CAPACITY,
            });
        }
        self.ram[PROGRAM_START..PROGRAM_START + rom.len()].copy_from_slice(rom);
        debug!("loaded {} byte ROM at {:#05x}", rom.len(), PROGRAM_START);
        Ok(())
    }
}

#[test]
fn test_font_is_loaded() {
    let memory = Memory::default();
    assert_eq!(memory.read_block(FONT_BASE, FONT.len()).unwrap(), &FONT[..]);
    assert_eq!(memory.read_byte(glyph_address(0xA)).unwrap(), 0xF0);
    assert_eq!(glyph_address(0xF), FONT_BASE + 75);
}

#[test]
fn test_out_of_range_access() {
    let mut memory = Memory::default();
    assert!(memory.read_byte(0xFFF).is_ok());
    assert!(matches!(
        memory.read_byte(0x1000),
        Err(Chip8Error::MemoryFault { address: 0x1000 })
    ));
    assert!(memory.write_byte(0x1000, 1).is_err());
    assert!(memory.read_word(0xFFF).is_err());
}

#[test]
fn test_partial_block_write_is_rejected() {
    let mut memory = Memory::default();
    assert!(memory.write_block(0xFFE, &[1, 2, 3]).is_err());
    assert_eq!(memory.read_block(0xFFE, 2).unwrap(), &[0, 0]);
    memory.write_block(0xFFD, &[1, 2, 3]).unwrap();
    assert_eq!(memory.read_block(0xFFD, 3).unwrap(), &[1, 2, 3]);
}

#[test]
fn test_read_word_is_big_endian() {
    let mut memory = Memory::default();
    memory.write_block(0x300, &[0xAB, 0xCD]).unwrap();
    assert_eq!(memory.read_word(0x300).unwrap(), 0xABCD);
}

#[test]
fn test_load_rom() {
    let mut memory = Memory::default();
    memory.load_rom(&[0x12, 0x34]).unwrap();
    assert_eq!(memory.read_word(PROGRAM_START).unwrap(), 0x1234);

    let full = vec![0xEE; 3583];
    assert!(memory.load_rom(&full).is_ok());
    assert_eq!(memory.read_byte(0xFFE).unwrap(), 0xEE);
    assert_eq!(memory.read_byte(0xFFF).unwrap(), 0);

    let mut memory = Memory::default();
    assert!(matches!(
        memory.load_rom(&vec![0xEE; 3584]),
        Err(LoadError::TooLarge { size: 3584, max: 3583 })
    ));
    assert_eq!(memory.read_byte(PROGRAM_START).unwrap(), 0);
}

#[test]
fn test_oversized_rom_leaves_memory_untouched() {
    let mut memory = Memory::default();
    let rom = vec![0xAA; PROGRAM_CAPACITY + 1];
    assert!(matches!(
        memory.load_rom(&rom),
        Err(LoadError::TooLarge { size, .. }) if size == PROGRAM_CAPACITY + 1
    ));
    assert!(memory
        .read_block(PROGRAM_START, PROGRAM_CAPACITY)
        .unwrap()
        .iter()
        .all(|b| *b == 0));
}
