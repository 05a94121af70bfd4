/// Delay and sound counters. Both count down once per external tick
/// regardless of how many instructions ran in between.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// The buzzer sounds while the sound timer is non-zero
    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}

#[test]
fn test_tick_floors_at_zero() {
    let mut timers = Timers { delay: 2, sound: 1 };
    timers.tick();
    assert_eq!(timers, Timers { delay: 1, sound: 0 });
    timers.tick();
    timers.tick();
    assert_eq!(timers, Timers { delay: 0, sound: 0 });
}

#[test]
fn test_sound_active() {
    let mut timers = Timers { delay: 0, sound: 1 };
    assert!(timers.sound_active());
    timers.tick();
    assert!(!timers.sound_active());
}
