use std::{
    thread::sleep,
    time::{Duration, Instant},
};

use log::{error, info, warn};

use crate::config::UnknownOpcodePolicy;
use crate::errors::Chip8Error;
use crate::frontend::{print_registers, Chip8Frontend, HeadlessFrontend};
use crate::{Chip8, StepResult};

/// Runs a `Chip8` against a frontend at the configured clock and timer rates
pub struct Chip8Driver<F: Chip8Frontend = HeadlessFrontend> {
    chip8: Chip8,
    frontend: F,
    realtime: bool,
}

impl<F: Chip8Frontend> Chip8Driver<F> {
    pub fn new(chip8: Chip8, frontend: F) -> Self {
        Self {
            chip8,
            frontend,
            realtime: false,
        }
    }

    /// Sleep out the rest of each frame instead of running flat out
    pub fn realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    pub fn chip8(&self) -> &Chip8 {
        &self.chip8
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frame_duration(&self) -> Duration {
        let hz = u32::try_from(self.chip8.config().timer_hz).unwrap_or(u32::MAX);
        Duration::from_secs(1) / hz.max(1)
    }

    /// One timer period: deliver input, tick the timers once, then run
    /// `cycles_per_tick` instructions.
    pub fn step_frame(&mut self) -> Result<(), Chip8Error> {
        for event in self.frontend.get_inputs() {
            self.chip8.handle_event(event);
        }
        self.chip8.tick_timers();

        for _ in 0..self.chip8.config().cycles_per_tick() {
            match self.chip8.step()? {
                StepResult::Ok => {}
                StepResult::UnknownOpcode(opcode) => match self.chip8.config().on_unknown_opcode {
                    UnknownOpcodePolicy::Halt => {
                        return Err(Chip8Error::UnknownOpcode { opcode });
                    }
                    UnknownOpcodePolicy::Skip => {
                        warn!("skipping unknown opcode {opcode:04X}");
                    }
                },
            }
        }
        Ok(())
    }

    /// Run frames until the frontend asks to stop or the machine faults
    pub fn run(&mut self) -> Result<(), Chip8Error> {
        let frame_duration = self.frame_duration();
        loop {
            let start = Instant::now();
            if let Err(err) = self.step_frame() {
                error!("{err}\n{}", print_registers(&self.chip8));
                return Err(err);
            }
            if self.frontend.update(&self.chip8) {
                info!("frontend closed at pc {:#05x}", self.chip8.pc());
                return Ok(());
            }
            if self.realtime {
                sleep(frame_duration.saturating_sub(start.elapsed()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::input::InputEvent;
    use crate::instructions::{assemble, Instruction::*};

    fn driver(config: Config, program: &[crate::Instruction], frontend: HeadlessFrontend) -> Chip8Driver {
        let mut chip8 = Chip8::new(config);
        chip8.load_rom(&assemble(program)).unwrap();
        Chip8Driver::new(chip8, frontend)
    }

    #[test]
    fn runs_until_frame_limit() {
        let mut driver = driver(Config::default(), &[Jump(0x200)], HeadlessFrontend::new(Some(3)));
        driver.run().unwrap();
        assert_eq!(driver.frontend().frames(), 3);
        assert_eq!(driver.chip8().pc(), 0x200);
    }

    #[test]
    fn ticks_timers_once_per_frame() {
        let program = [SetImm(0, 10), SetDelay(0), SetSound(0), Jump(0x206)];
        let mut driver = driver(Config::default(), &program, HeadlessFrontend::new(Some(4)));
        driver.run().unwrap();
        // The first tick lands before the timers are set
        assert_eq!(driver.chip8().timers().delay, 7);
        assert_eq!(driver.frontend().sound_frames(), 4);
    }

    #[test]
    fn halts_on_unknown_opcode() {
        let mut driver = driver(Config::default(), &[SetImm(0, 1)], HeadlessFrontend::new(None));
        // Memory after the program is zero, which is not an instruction
        assert!(matches!(
            driver.run(),
            Err(Chip8Error::UnknownOpcode { opcode: 0x0000 })
        ));
        assert_eq!(driver.chip8().pc(), 0x204);
    }

    #[test]
    fn skips_unknown_opcodes_when_configured() {
        let config = Config::default()
            .clock_speed(60)
            .on_unknown_opcode(UnknownOpcodePolicy::Skip);
        let mut driver = driver(config, &[SetImm(0, 1)], HeadlessFrontend::new(Some(5)));
        driver.run().unwrap();
        assert_eq!(driver.chip8().pc(), 0x20A);
    }

    #[test]
    fn delivers_scripted_keys_to_a_waiting_program() {
        let frontend = HeadlessFrontend::new(Some(4)).with_script(vec![(2, InputEvent::KeyDown(0xB))]);
        let program = [WaitForKey(3), Jump(0x202)];
        let mut driver = driver(Config::default(), &program, frontend);
        driver.run().unwrap();
        assert_eq!(driver.chip8().registers().vn[3], 0xB);
        assert_eq!(driver.chip8().pc(), 0x202);
    }

    #[test]
    fn frame_duration_follows_timer_rate() {
        let driver = driver(Config::default().timer_hz(50), &[], HeadlessFrontend::default());
        assert_eq!(driver.frame_duration(), Duration::from_millis(20));
    }

    #[test]
    fn frame_duration_survives_extreme_timer_rates() {
        let fast = driver(Config::default().timer_hz(1 << 32), &[], HeadlessFrontend::default());
        assert_eq!(fast.frame_duration(), Duration::ZERO);
        let stopped = driver(Config::default().timer_hz(0), &[], HeadlessFrontend::default());
        assert_eq!(stopped.frame_duration(), Duration::from_secs(1));
    }
}
