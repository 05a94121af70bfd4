use std::collections::VecDeque;

use itertools::Itertools;
use log::trace;

use crate::input::InputEvent;
use crate::Chip8;

pub trait Chip8Frontend {
    /// Rendering and sound. Returns true once the frontend wants to stop.
    fn update(&mut self, chip8: &Chip8) -> bool;
    /// Key events gathered since the last call
    fn get_inputs(&mut self) -> Vec<InputEvent>;
}

/// Register file as a four-column table
pub fn print_registers(chip8: &Chip8) -> String {
    let registers = chip8.registers();
    let mut register_desc: Vec<_> = registers
        .vn
        .iter()
        .enumerate()
        .map(|(index, value)| format!("V{:X}: {:02x}", index, value))
        .collect();
    register_desc.push(format!("delay: {}", chip8.timers().delay));
    register_desc.push(format!("sound: {}", chip8.timers().sound));
    register_desc.push(format!("pc: {:03x}", registers.pc));
    register_desc.push(format!("i: {:03x}", registers.i));
    register_desc.push(format!(
        "keys: [{}]",
        chip8.keypad().pressed_keys().map(|k| format!("{k:X}")).join(" ")
    ));
    register_desc.push(format!(
        "stack: [{}]",
        registers.stack.frames().iter().map(|a| format!("{a:03x}")).join(" ")
    ));

    // itertools::tuples() drops any elements that don't fit in a tuple,
    // so we need to make sure that everything lines up
    while register_desc.len() % 4 != 0 {
        register_desc.push(String::new());
    }

    register_desc
        .iter()
        .tuples()
        .map(|(v1, v2, v3, v4)| format!("{v1}\t{v2}\t{v3}\t{v4}"))
        .join("\n")
}

/// A frontend with no window: replays scripted key events and stops after
/// a fixed number of frames.
#[derive(Default)]
pub struct HeadlessFrontend {
    script: VecDeque<(u64, InputEvent)>,
    frame: u64,
    frame_limit: Option<u64>,
    sound_frames: u64,
}

impl HeadlessFrontend {
    pub fn new(frame_limit: Option<u64>) -> Self {
        Self {
            frame_limit,
            ..Default::default()
        }
    }

    /// `script` entries are `(frame, event)`; each event is delivered at the
    /// start of that frame.
    pub fn with_script(mut self, mut script: Vec<(u64, InputEvent)>) -> Self {
        script.sort_by_key(|(frame, _)| *frame);
        self.script = script.into();
        self
    }

    pub fn frames(&self) -> u64 {
        self.frame
    }

    /// Frames rendered while the sound timer was running
    pub fn sound_frames(&self) -> u64 {
        self.sound_frames
    }
}

impl Chip8Frontend for HeadlessFrontend {
    fn update(&mut self, chip8: &Chip8) -> bool {
        self.frame += 1;
        if chip8.sound_active() {
            self.sound_frames += 1;
        }
        trace!("frame {}\n{}", self.frame, print_registers(chip8));
        self.frame_limit.is_some_and(|limit| self.frame >= limit)
    }

    fn get_inputs(&mut self) -> Vec<InputEvent> {
        let mut inputs = Vec::new();
        while self.script.front().is_some_and(|(due, _)| *due <= self.frame) {
            if let Some((_, event)) = self.script.pop_front() {
                inputs.push(event);
            }
        }
        inputs
    }
}
