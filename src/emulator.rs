use std::io::Read;

use log::{debug, trace, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::{Config, ShiftSource, SpriteEdges};
use crate::display::{Framebuffer, PixelGrid};
use crate::errors::{Chip8Error, LoadError};
use crate::input::{InputEvent, Keypad};
use crate::instructions::Instruction;
use crate::memory::{glyph_address, Memory};
use crate::registers::{Registers, VF};
use crate::timers::Timers;

pub(crate) const INSTRUCTION_SIZE: u16 = 2;
/// Sprites are always one byte wide
const SPRITE_WIDTH: usize = 8;

/// Outcome of a single `step` that did not fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Ok,
    /// The word matched no instruction. The program counter has already
    /// moved past it, so the caller may carry on or stop.
    UnknownOpcode(u16),
}

/// Progress of an `FX0A` key wait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum WaitState {
    #[default]
    Idle,
    Waiting,
}

/// The CHIP-8 machine: memory, registers, timers, display and keypad
pub struct Chip8 {
    config: Config,
    memory: Memory,
    registers: Registers,
    timers: Timers,
    framebuffer: Framebuffer,
    keypad: Keypad,
    wait: WaitState,
    rng: StdRng,
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Chip8 {
    pub fn new(config: Config) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            memory: Memory::default(),
            registers: Registers::new(config.stack_depth),
            timers: Timers::default(),
            framebuffer: Framebuffer::new(config.width, config.height),
            keypad: Keypad::default(),
            wait: WaitState::Idle,
            rng,
            config,
        }
    }

    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), LoadError> {
        self.memory.load_rom(rom)
    }

    /// Read the whole image before touching memory, so a failing reader
    /// leaves nothing half-loaded.
    pub fn load_rom_from(&mut self, mut reader: impl Read) -> Result<(), LoadError> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        self.load_rom(&rom)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn pc(&self) -> usize {
        self.registers.pc as usize
    }

    pub fn timers(&self) -> Timers {
        self.timers
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn is_waiting_for_key(&self) -> bool {
        self.wait == WaitState::Waiting
    }

    pub fn sound_active(&self) -> bool {
        self.timers.sound_active()
    }

    /// Count both timers down by one. Call at `Config::timer_hz`.
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    pub fn set_key_pressed(&mut self, key: u8) {
        self.keypad.set_key_pressed(key)
    }

    pub fn set_key_released(&mut self, key: u8) {
        self.keypad.set_key_released(key)
    }

    pub fn is_key_pressed(&self, key: u8) -> bool {
        self.keypad.is_key_pressed(key)
    }

    pub fn latch_recent_key(&mut self, key: u8) {
        self.keypad.latch_recent_key(key)
    }

    pub fn clear_recent_key_latch(&mut self) {
        self.keypad.clear_recent_key_latch()
    }

    pub fn recent_key(&self) -> Option<u8> {
        self.keypad.recent_key()
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        self.keypad.handle_event(event)
    }

    /// Fetch, decode and execute one instruction
    pub fn step(&mut self) -> Result<StepResult, Chip8Error> {
        let addr = self.registers.pc;
        let opcode = self.memory.read_word(addr as usize)?;
        self.registers.pc += INSTRUCTION_SIZE;
        let Some(instruction) = Instruction::decode(opcode) else {
            warn!("unknown opcode {opcode:04X} at {addr:#05x}");
            return Ok(StepResult::UnknownOpcode(opcode));
        };
        trace!("{addr:#05x}: {opcode:04X} {instruction}");
        self.execute(instruction)?;
        Ok(StepResult::Ok)
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.registers.pc += INSTRUCTION_SIZE;
        }
    }

    fn execute(&mut self, instruction: Instruction) -> Result<(), Chip8Error> {
        let vn = &mut self.registers.vn;
        match instruction {
            Instruction::ClearScreen => self.framebuffer.clear(),
            Instruction::Ret => self.registers.pc = self.registers.stack.pop()?,
            Instruction::Jump(addr) => self.registers.pc = addr,
            Instruction::Call(addr) => {
                self.registers.stack.push(self.registers.pc)?;
                self.registers.pc = addr;
            }
            Instruction::SkipEqImm(x, imm) => {
                let condition = vn[x as usize] == imm;
                self.skip_if(condition)
            }
            Instruction::SkipNeImm(x, imm) => {
                let condition = vn[x as usize] != imm;
                self.skip_if(condition)
            }
            Instruction::SkipEqReg(x, y) => {
                let condition = vn[x as usize] == vn[y as usize];
                self.skip_if(condition)
            }
            Instruction::SkipNeReg(x, y) => {
                let condition = vn[x as usize] != vn[y as usize];
                self.skip_if(condition)
            }
            Instruction::SetImm(x, imm) => vn[x as usize] = imm,
            Instruction::AddImm(x, imm) => vn[x as usize] = vn[x as usize].wrapping_add(imm),
            Instruction::SetReg(x, y) => vn[x as usize] = vn[y as usize],
            Instruction::OrReg(x, y) => vn[x as usize] |= vn[y as usize],
            Instruction::AndReg(x, y) => vn[x as usize] &= vn[y as usize],
            Instruction::XorReg(x, y) => vn[x as usize] ^= vn[y as usize],
            // Flag writes come last so that VF holds the flag when X is F
            Instruction::AddReg(x, y) => {
                let (result, carry) = vn[x as usize].overflowing_add(vn[y as usize]);
                vn[x as usize] = result;
                vn[VF] = carry as u8;
            }
            Instruction::SubReg(x, y) => {
                let (a, b) = (vn[x as usize], vn[y as usize]);
                vn[x as usize] = a.wrapping_sub(b);
                vn[VF] = (a >= b) as u8;
            }
            Instruction::SubFrom(x, y) => {
                let (a, b) = (vn[x as usize], vn[y as usize]);
                vn[x as usize] = b.wrapping_sub(a);
                vn[VF] = (b >= a) as u8;
            }
            Instruction::Rsh(x, y) => {
                let source = match self.config.quirks.shift_source {
                    ShiftSource::Vx => vn[x as usize],
                    ShiftSource::Vy => vn[y as usize],
                };
                vn[x as usize] = source >> 1;
                vn[VF] = source & 0x01;
            }
            Instruction::Lsh(x, y) => {
                let source = match self.config.quirks.shift_source {
                    ShiftSource::Vx => vn[x as usize],
                    ShiftSource::Vy => vn[y as usize],
                };
                vn[x as usize] = source << 1;
                vn[VF] = source >> 7;
            }
            Instruction::SetMemPtr(addr) => self.registers.i = addr,
            Instruction::JumpOffset(addr) => self.registers.pc = vn[0] as u16 + addr,
            Instruction::Rand(x, imm) => vn[x as usize] = self.rng.gen::<u8>() & imm,
            Instruction::Draw(x, y, n) => {
                let origin = (vn[x as usize] as usize, vn[y as usize] as usize);
                let collision = self.draw_sprite(origin, n as usize)?;
                self.registers.vn[VF] = collision as u8;
            }
            Instruction::SkipKeyPressed(x) => {
                let condition = self.keypad.is_key_pressed(vn[x as usize]);
                self.skip_if(condition)
            }
            Instruction::SkipKeyNotPressed(x) => {
                let condition = !self.keypad.is_key_pressed(vn[x as usize]);
                self.skip_if(condition)
            }
            Instruction::GetDelay(x) => vn[x as usize] = self.timers.delay,
            Instruction::WaitForKey(x) => self.wait_for_key(x as usize),
            Instruction::SetDelay(x) => self.timers.delay = vn[x as usize],
            Instruction::SetSound(x) => self.timers.sound = vn[x as usize],
            Instruction::AddMemPtr(x) => {
                self.registers.i = self.registers.i.wrapping_add(vn[x as usize] as u16)
            }
            Instruction::SetChar(x) => self.registers.i = glyph_address(vn[x as usize]) as u16,
            Instruction::BCD(x) => {
                let val = vn[x as usize];
                let digits = [val / 100, val / 10 % 10, val % 10];
                self.memory.write_block(self.registers.i as usize, &digits)?;
            }
            Instruction::RegDump(x) => {
                self.memory
                    .write_block(self.registers.i as usize, &vn[..=x as usize])?;
            }
            Instruction::RegLoad(x) => {
                let bytes = self.memory.read_block(self.registers.i as usize, x as usize + 1)?;
                vn[..=x as usize].copy_from_slice(bytes);
            }
        }
        Ok(())
    }

    /// XOR an `rows`-byte sprite from I onto the display. Returns whether any
    /// lit pixel was turned off.
    fn draw_sprite(&mut self, origin: (usize, usize), rows: usize) -> Result<bool, Chip8Error> {
        let sprite = self.memory.read_block(self.registers.i as usize, rows)?;
        let (width, height) = (self.framebuffer.width(), self.framebuffer.height());
        let edges = self.config.quirks.sprite_edges;
        let mut collision = false;
        for (row, bits) in sprite.iter().enumerate() {
            for col in 0..SPRITE_WIDTH {
                if bits & (0x80 >> col) == 0 {
                    continue;
                }
                let (x, y) = (origin.0 + col, origin.1 + row);
                let target = match edges {
                    SpriteEdges::Clip => Some((x, y)).filter(|(x, y)| *x < width && *y < height),
                    SpriteEdges::Wrap => x.checked_rem(width).zip(y.checked_rem(height)),
                };
                if let Some((x, y)) = target {
                    collision |= self.framebuffer.toggle(x, y);
                }
            }
        }
        Ok(collision)
    }

    fn wait_for_key(&mut self, x: usize) {
        if self.wait == WaitState::Idle {
            // Only presses that arrive after the wait starts count
            self.keypad.clear_recent_key_latch();
            self.wait = WaitState::Waiting;
            debug!("waiting for key into V{x:X}");
        }
        match self.keypad.recent_key() {
            Some(key) => {
                self.registers.vn[x] = key;
                self.keypad.clear_recent_key_latch();
                self.wait = WaitState::Idle;
                debug!("key {key:X} received into V{x:X}");
            }
            None => self.registers.pc -= INSTRUCTION_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::{assemble, Instruction::*};

    fn chip8_with(config: Config, program: &[Instruction]) -> Chip8 {
        let mut chip8 = Chip8::new(config.rng_seed(1));
        chip8.load_rom(&assemble(program)).unwrap();
        chip8
    }

    fn run(chip8: &mut Chip8, steps: usize) {
        for _ in 0..steps {
            assert_eq!(chip8.step().unwrap(), StepResult::Ok);
        }
    }

    #[test]
    fn test_jump() {
        let rom = [0x12, 0x04, 0x00, 0x00, 0x12, 0x00];
        let mut chip8 = Chip8::default();
        chip8.load_rom(&rom).unwrap();
        chip8.step().unwrap();
        assert_eq!(chip8.pc(), 0x204);
        chip8.step().unwrap();
        assert_eq!(chip8.pc(), 0x200)
    }

    #[test]
    fn test_call_ret() {
        let rom = [0x22, 0x04, 0x00, 0x00, 0x00, 0xEE];
        let mut chip8 = Chip8::default();
        chip8.load_rom(&rom).unwrap();
        chip8.step().unwrap();
        assert_eq!(chip8.pc(), 0x204);
        assert_eq!(chip8.registers().stack.frames(), &[0x202]);
        chip8.step().unwrap();
        assert!(chip8.registers().stack.is_empty());
        assert_eq!(chip8.pc(), 0x202)
    }

    #[test]
    fn test_unknown_opcode_is_reported_and_skipped() {
        let mut chip8 = Chip8::default();
        chip8.load_rom(&[0x01, 0x23, 0x60, 0x07]).unwrap();
        assert_eq!(chip8.step().unwrap(), StepResult::UnknownOpcode(0x0123));
        assert_eq!(chip8.pc(), 0x202);
        assert_eq!(chip8.step().unwrap(), StepResult::Ok);
        assert_eq!(chip8.registers().vn[0], 7);
    }

    #[test]
    fn test_register_skips_need_zero_low_nibble() {
        let mut chip8 = Chip8::default();
        chip8.load_rom(&[0x51, 0x21, 0x91, 0x2F]).unwrap();
        assert_eq!(chip8.step().unwrap(), StepResult::UnknownOpcode(0x5121));
        assert_eq!(chip8.step().unwrap(), StepResult::UnknownOpcode(0x912F));
        assert_eq!(chip8.pc(), 0x204);
    }

    #[test]
    fn test_fetch_past_end_of_memory_faults() {
        let mut chip8 = chip8_with(Config::default(), &[Jump(0xFFF)]);
        run(&mut chip8, 1);
        assert!(matches!(
            chip8.step(),
            Err(Chip8Error::MemoryFault { address: 0x1000 })
        ));
    }

    #[test]
    fn test_jump_offset_is_not_wrapped() {
        let mut chip8 = chip8_with(Config::default(), &[SetImm(0, 0xFF), JumpOffset(0xFFF)]);
        run(&mut chip8, 2);
        assert_eq!(chip8.pc(), 0x10FE);
        assert!(matches!(chip8.step(), Err(Chip8Error::MemoryFault { .. })));
    }

    #[test]
    fn test_skips() {
        let mut chip8 = chip8_with(
            Config::default(),
            &[
                SetImm(1, 0x11),
                SkipEqImm(1, 0x11),
                ClearScreen,
                SkipNeImm(1, 0x11),
                SkipEqReg(1, 2),
                ClearScreen,
                SkipNeReg(1, 2),
            ],
        );
        run(&mut chip8, 2);
        assert_eq!(chip8.pc(), 0x206);
        run(&mut chip8, 1);
        assert_eq!(chip8.pc(), 0x208);
        run(&mut chip8, 1);
        assert_eq!(chip8.pc(), 0x20A);
        run(&mut chip8, 1);
        assert_eq!(chip8.pc(), 0x20C);
        run(&mut chip8, 1);
        assert_eq!(chip8.pc(), 0x210);
    }

    #[test]
    fn test_logic_ops_leave_flag_alone() {
        let mut chip8 = chip8_with(
            Config::default(),
            &[
                SetImm(0xF, 0x55),
                SetImm(0, 0b1100),
                SetImm(1, 0b1010),
                SetReg(2, 0),
                OrReg(2, 1),
                SetReg(3, 0),
                AndReg(3, 1),
                SetReg(4, 0),
                XorReg(4, 1),
                AddImm(4, 0xFF),
            ],
        );
        run(&mut chip8, 10);
        let vn = chip8.registers().vn;
        assert_eq!(vn[2], 0b1110);
        assert_eq!(vn[3], 0b1000);
        assert_eq!(vn[4], 0b0101);
        assert_eq!(vn[0xF], 0x55);
    }

    #[test]
    fn test_reverse_subtract() {
        let mut chip8 = chip8_with(
            Config::default(),
            &[SetImm(0, 3), SetImm(1, 10), SubFrom(0, 1), SetImm(2, 10), SetImm(3, 3), SubFrom(2, 3)],
        );
        run(&mut chip8, 3);
        assert_eq!(chip8.registers().vn[0], 7);
        assert_eq!(chip8.registers().vn[0xF], 1);
        run(&mut chip8, 3);
        assert_eq!(chip8.registers().vn[2], 249);
        assert_eq!(chip8.registers().vn[0xF], 0);
    }

    #[test]
    fn test_flag_wins_when_target_is_vf() {
        let mut chip8 = chip8_with(
            Config::default(),
            &[SetImm(0xF, 0xFF), SetImm(1, 1), AddReg(0xF, 1)],
        );
        run(&mut chip8, 3);
        assert_eq!(chip8.registers().vn[0xF], 1);
    }

    #[test]
    fn test_shift_in_place() {
        let mut chip8 = chip8_with(
            Config::default(),
            &[SetImm(0, 0b1000_0011), SetImm(1, 0x02), Rsh(0, 1), SetImm(2, 0b1000_0001), Lsh(2, 1)],
        );
        run(&mut chip8, 3);
        assert_eq!(chip8.registers().vn[0], 0b0100_0001);
        assert_eq!(chip8.registers().vn[0xF], 1);
        run(&mut chip8, 2);
        assert_eq!(chip8.registers().vn[2], 0b0000_0010);
        assert_eq!(chip8.registers().vn[0xF], 1);
    }

    #[test]
    fn test_shift_from_vy() {
        let config = Config::default().shift_source(ShiftSource::Vy);
        let mut chip8 = chip8_with(
            config,
            &[SetImm(0, 0xFF), SetImm(1, 0b0100_0000), Lsh(0, 1), SetImm(2, 0xFF), Rsh(2, 1)],
        );
        run(&mut chip8, 3);
        assert_eq!(chip8.registers().vn[0], 0b1000_0000);
        assert_eq!(chip8.registers().vn[0xF], 0);
        run(&mut chip8, 2);
        assert_eq!(chip8.registers().vn[2], 0b0010_0000);
        assert_eq!(chip8.registers().vn[0xF], 0);
    }

    #[test]
    fn test_rand_is_masked_and_seeded() {
        let program = [Rand(0, 0x0F), Rand(1, 0x00), Rand(2, 0xFF)];
        let mut a = chip8_with(Config::default(), &program);
        let mut b = chip8_with(Config::default(), &program);
        run(&mut a, 3);
        run(&mut b, 3);
        assert!(a.registers().vn[0] <= 0x0F);
        assert_eq!(a.registers().vn[1], 0);
        assert_eq!(a.registers().vn, b.registers().vn);
    }

    #[test]
    fn test_draw_font_glyph() {
        let mut chip8 = chip8_with(
            Config::default(),
            &[SetImm(0, 0xA), SetChar(0), SetImm(1, 0), Draw(1, 1, 5)],
        );
        run(&mut chip8, 4);
        assert_eq!(chip8.registers().i as usize, glyph_address(0xA));
        let fb = chip8.framebuffer();
        // Top row of "A" is 0xF0
        assert!((0..4).all(|x| fb.pixel_at(x, 0)));
        assert!(!fb.pixel_at(4, 0));
        assert_eq!(fb.lit_count(), 4 + 2 + 4 + 2 + 2);
        assert_eq!(chip8.registers().vn[0xF], 0);
    }

    #[test]
    fn test_draw_clips_at_edge() {
        let mut chip8 = chip8_with(
            Config::default(),
            &[SetImm(0, 60), SetImm(1, 30), SetMemPtr(0x300), Draw(0, 1, 4)],
        );
        chip8.memory.write_block(0x300, &[0xFF; 4]).unwrap();
        run(&mut chip8, 4);
        let fb = chip8.framebuffer();
        assert_eq!(fb.lit_count(), 4 * 2);
        assert!(fb.pixel_at(63, 31));
        assert!(!fb.pixel_at(0, 0));
    }

    #[test]
    fn test_draw_wraps_at_edge() {
        let config = Config::default().sprite_edges(SpriteEdges::Wrap);
        let mut chip8 = chip8_with(
            config,
            &[SetImm(0, 60), SetImm(1, 30), SetMemPtr(0x300), Draw(0, 1, 4)],
        );
        chip8.memory.write_block(0x300, &[0xFF; 4]).unwrap();
        run(&mut chip8, 4);
        let fb = chip8.framebuffer();
        assert_eq!(fb.lit_count(), 8 * 4);
        assert!(fb.pixel_at(0, 0));
        assert!(fb.pixel_at(3, 1));
        assert!(!fb.pixel_at(4, 0));
    }

    #[test]
    fn test_draw_out_of_range_sprite_faults_without_drawing() {
        let mut chip8 = chip8_with(Config::default(), &[SetMemPtr(0xFFE), Draw(0, 0, 4)]);
        run(&mut chip8, 1);
        assert!(matches!(chip8.step(), Err(Chip8Error::MemoryFault { .. })));
        assert_eq!(chip8.framebuffer().lit_count(), 0);
    }

    #[test]
    fn test_clear_screen() {
        let mut chip8 = chip8_with(Config::default(), &[SetChar(0), Draw(0, 0, 5), ClearScreen]);
        run(&mut chip8, 2);
        assert!(chip8.framebuffer().lit_count() > 0);
        run(&mut chip8, 1);
        assert_eq!(chip8.framebuffer().lit_count(), 0);
    }

    #[test]
    fn test_key_skips() {
        let mut chip8 = chip8_with(
            Config::default(),
            &[SetImm(0, 0xE), SkipKeyPressed(0), ClearScreen, SkipKeyNotPressed(0)],
        );
        chip8.set_key_pressed(0xE);
        run(&mut chip8, 2);
        assert_eq!(chip8.pc(), 0x206);
        run(&mut chip8, 1);
        assert_eq!(chip8.pc(), 0x208);
    }

    #[test]
    fn test_wait_for_key() {
        let mut chip8 = chip8_with(Config::default(), &[WaitForKey(5), SetImm(0, 1)]);
        // A key held before the wait starts does not satisfy it
        chip8.set_key_pressed(0x2);
        for _ in 0..3 {
            run(&mut chip8, 1);
            assert_eq!(chip8.pc(), 0x200);
            assert!(chip8.is_waiting_for_key());
        }
        chip8.handle_event(InputEvent::KeyDown(0x7));
        run(&mut chip8, 1);
        assert_eq!(chip8.registers().vn[5], 0x7);
        assert_eq!(chip8.pc(), 0x202);
        assert!(!chip8.is_waiting_for_key());
        assert_eq!(chip8.recent_key(), None);
    }

    #[test]
    fn test_wait_keeps_latch_across_steps() {
        let mut chip8 = chip8_with(Config::default(), &[WaitForKey(0)]);
        run(&mut chip8, 1);
        chip8.latch_recent_key(0xC);
        // Re-entering the handler must not clear the latch again
        run(&mut chip8, 1);
        assert_eq!(chip8.registers().vn[0], 0xC);
    }

    #[test]
    fn test_timers() {
        let mut chip8 = chip8_with(
            Config::default(),
            &[SetImm(0, 3), SetDelay(0), SetSound(0), GetDelay(1)],
        );
        run(&mut chip8, 3);
        assert!(chip8.sound_active());
        chip8.tick_timers();
        run(&mut chip8, 1);
        assert_eq!(chip8.registers().vn[1], 2);
        for _ in 0..5 {
            chip8.tick_timers();
        }
        assert_eq!(chip8.timers().delay, 0);
        assert!(!chip8.sound_active());
    }

    #[test]
    fn test_index_ops() {
        let mut chip8 = chip8_with(
            Config::default(),
            &[SetMemPtr(0x300), SetImm(0, 0x10), AddMemPtr(0), SetImm(1, 156), BCD(1)],
        );
        run(&mut chip8, 5);
        assert_eq!(chip8.registers().i, 0x310);
        assert_eq!(chip8.memory().read_block(0x310, 3).unwrap(), &[1, 5, 6]);
    }

    #[test]
    fn test_bcd_past_end_faults() {
        let mut chip8 = chip8_with(Config::default(), &[SetMemPtr(0xFFE), BCD(0)]);
        run(&mut chip8, 1);
        assert!(matches!(chip8.step(), Err(Chip8Error::MemoryFault { .. })));
        assert_eq!(chip8.memory().read_block(0xFFE, 2).unwrap(), &[0, 0]);
    }

    #[test]
    fn test_register_dump_and_load_are_inclusive() {
        let mut chip8 = chip8_with(
            Config::default(),
            &[SetImm(0, 1), SetImm(1, 2), SetImm(2, 3), SetMemPtr(0x400), RegDump(1), RegLoad(2)],
        );
        run(&mut chip8, 5);
        assert_eq!(chip8.memory().read_block(0x400, 3).unwrap(), &[1, 2, 0]);
        run(&mut chip8, 1);
        assert_eq!(&chip8.registers().vn[..3], &[1, 2, 0]);
        assert_eq!(chip8.registers().i, 0x400);
    }

    #[test]
    fn test_load_rom_from_reader() {
        let mut chip8 = Chip8::default();
        chip8.load_rom_from(&[0x60u8, 0x2A][..]).unwrap();
        run(&mut chip8, 1);
        assert_eq!(chip8.registers().vn[0], 0x2A);
    }

    #[test]
    fn test_stack_overflow() {
        let mut chip8 = chip8_with(Config::default().stack_depth(2), &[Call(0x200)]);
        run(&mut chip8, 2);
        assert!(matches!(
            chip8.step(),
            Err(Chip8Error::StackOverflow { depth: 2 })
        ));
    }
}
