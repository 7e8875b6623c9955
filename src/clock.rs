//! Millisecond tick counter shared with the timer interrupt.
//!
//! The interrupt handler is the only writer. Every read from the main loop
//! goes through a critical section, which masks interrupts for the copy and
//! restores the previous mask state afterwards, so a 32-bit value can never
//! be observed half-updated on a core without atomic 32-bit loads.

use core::cell::Cell;

use critical_section::Mutex;

/// Source of "milliseconds since start". Wraps after about 49 days.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

pub struct TickCounter {
    ticks: Mutex<Cell<u32>>,
}

impl TickCounter {
    pub const fn new() -> Self {
        Self {
            ticks: Mutex::new(Cell::new(0)),
        }
    }

    /// Called from the periodic interrupt, once per millisecond.
    pub fn tick(&self) {
        critical_section::with(|cs| {
            let ticks = self.ticks.borrow(cs);
            ticks.set(ticks.get().wrapping_add(1));
        });
    }

    /// Tear-free snapshot of the counter.
    pub fn now(&self) -> u32 {
        critical_section::with(|cs| self.ticks.borrow(cs).get())
    }

    pub fn reset(&self) {
        critical_section::with(|cs| self.ticks.borrow(cs).set(0));
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TickCounter {
    fn now_ms(&self) -> u32 {
        self.now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Milliseconds from `since` to `now`, correct across counter wrap.
pub const fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}
