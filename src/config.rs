use crate::display::{DISPLAY_COLUMNS, DISPLAY_ROWS};
use crate::registers::DEFAULT_STACK_DEPTH;

/// Which register `8XY6`/`8XYE` shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftSource {
    /// Shift Vx in place and ignore Vy
    #[default]
    Vx,
    /// Vx = Vy shifted (original COSMAC VIP behaviour)
    Vy,
}

/// What `DXYN` does with sprite pixels that fall past the display edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpriteEdges {
    #[default]
    Clip,
    Wrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quirks {
    pub shift_source: ShiftSource,
    pub sprite_edges: SpriteEdges,
}

/// What the driver does when `step` reports an unknown opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownOpcodePolicy {
    #[default]
    Halt,
    /// Log it and carry on with the next instruction
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Instructions per second
    pub clock_speed: u64,
    /// Timer ticks (and frames) per second
    pub timer_hz: u64,
    pub width: usize,
    pub height: usize,
    pub stack_depth: usize,
    pub quirks: Quirks,
    /// Fixed seed for `CXNN`; entropy-seeded when `None`
    pub rng_seed: Option<u64>,
    pub on_unknown_opcode: UnknownOpcodePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clock_speed: 1000,
            timer_hz: 60,
            width: DISPLAY_COLUMNS,
            height: DISPLAY_ROWS,
            stack_depth: DEFAULT_STACK_DEPTH,
            quirks: Quirks::default(),
            rng_seed: None,
            on_unknown_opcode: UnknownOpcodePolicy::default(),
        }
    }
}

impl Config {
    pub fn clock_speed(mut self, speed: u64) -> Self {
        self.clock_speed = speed;
        self
    }

    pub fn timer_hz(mut self, hz: u64) -> Self {
        self.timer_hz = hz;
        self
    }

    pub fn dimensions(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn stack_depth(mut self, depth: usize) -> Self {
        self.stack_depth = depth;
        self
    }

    pub fn shift_source(mut self, source: ShiftSource) -> Self {
        self.quirks.shift_source = source;
        self
    }

    pub fn sprite_edges(mut self, edges: SpriteEdges) -> Self {
        self.quirks.sprite_edges = edges;
        self
    }

    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn on_unknown_opcode(mut self, policy: UnknownOpcodePolicy) -> Self {
        self.on_unknown_opcode = policy;
        self
    }

    /// Instructions to run between two timer ticks, at least one
    pub fn cycles_per_tick(&self) -> u64 {
        (self.clock_speed / self.timer_hz.max(1)).max(1)
    }
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!((config.width, config.height), (64, 32));
    assert_eq!(config.stack_depth, 16);
    assert_eq!(config.quirks.shift_source, ShiftSource::Vx);
    assert_eq!(config.quirks.sprite_edges, SpriteEdges::Clip);
    assert_eq!(config.cycles_per_tick(), 16);
}

#[test]
fn test_builder() {
    let config = Config::default()
        .clock_speed(30)
        .shift_source(ShiftSource::Vy)
        .sprite_edges(SpriteEdges::Wrap)
        .rng_seed(7);
    assert_eq!(config.cycles_per_tick(), 1);
    assert_eq!(config.quirks.shift_source, ShiftSource::Vy);
    assert_eq!(config.quirks.sprite_edges, SpriteEdges::Wrap);
    assert_eq!(config.rng_seed, Some(7));
}
