//! Raspberry Pi Pico - "Grid Defender" firmware
//!
//! Pico Display Pack buttons:
//!   B (GP13) = left, Y (GP15) = right, X (GP14) = fire, A (GP12) = pause
//! LED (GP25): ON during gameplay, OFF otherwise
//!
//! The 8x16 field is drawn sideways, as on the classic LED-matrix board: game
//! rows run left to right across the landscape screen.

#![no_std]
#![no_main]

use core::fmt::Write as _;
use cortex_m::peripheral::SYST;
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m_rt::exception;
use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output as Pin, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::spi::{self, Spi};
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};
use embassy_time::{Delay, Duration, Timer};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_hal_bus::spi::ExclusiveDevice;
use grid_defender::config::{FIELD_HEIGHT, FIELD_WIDTH, MAX_LIFE_LOSSES};
use grid_defender::input::next_command;
use grid_defender::render::matrix_coords;
use grid_defender::{
    Button, Cell, Colour, Game, GameLoop, InputSource, Output, TickCounter, Timing, Xorshift32,
};
use mipidsi::Builder;
use mipidsi::models::ST7789;
use mipidsi::options::{ColorInversion, Orientation, Rotation};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

// --- Screen ---
const SCREEN_W: i32 = 240;
const SCREEN_H: i32 = 135;

// --- HUD ---
const HUD_H: i32 = 14;

// --- Field ---
const CELL_PX: i32 = 14;
const FIELD_PX_W: i32 = FIELD_HEIGHT as i32 * CELL_PX;
const FIELD_PX_H: i32 = FIELD_WIDTH as i32 * CELL_PX;
const FIELD_X: i32 = (SCREEN_W - FIELD_PX_W) / 2;
const FIELD_Y: i32 = HUD_H + (SCREEN_H - HUD_H - FIELD_PX_H) / 2;

/// Millisecond counter, advanced by the SysTick exception.
static TICKS: TickCounter = TickCounter::new();

#[exception]
fn SysTick() {
    TICKS.tick();
}

fn start_tick_interrupt(mut syst: SYST) {
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(embassy_rp::clocks::clk_sys_freq() / 1_000 - 1);
    syst.clear_current();
    syst.enable_interrupt();
    syst.enable_counter();
}

#[derive(PartialEq, Clone, Copy)]
enum Screen {
    Title,
    Playing,
    GameOver,
}

fn rgb(colour: Colour) -> Rgb565 {
    match colour {
        Colour::Black => Rgb565::BLACK,
        Colour::Red => Rgb565::RED,
        Colour::Green => Rgb565::GREEN,
        Colour::Yellow => Rgb565::YELLOW,
        Colour::Orange => Rgb565::new(31, 41, 0),
        Colour::LightOrange => Rgb565::new(31, 52, 10),
    }
}

/// The ST7789 seen through the game's [`Output`] interface.
struct Panel<D> {
    display: D,
    buf: heapless::String<32>,
}

impl<D: DrawTarget<Color = Rgb565>> Panel<D> {
    fn new(display: D) -> Self {
        Self {
            display,
            buf: heapless::String::new(),
        }
    }

    fn fill(&mut self, area: Rectangle, colour: Rgb565) {
        if area
            .into_styled(PrimitiveStyle::with_fill(colour))
            .draw(&mut self.display)
            .is_err()
        {
            warn!("panel fill failed");
        }
    }

    fn text(&mut self, text: &str, at: Point, style: MonoTextStyle<'_, Rgb565>) {
        if Text::with_baseline(text, at, style, Baseline::Top)
            .draw(&mut self.display)
            .is_err()
        {
            warn!("panel text failed");
        }
    }

    fn clear_screen(&mut self) {
        if self.display.clear(Rgb565::BLACK).is_err() {
            warn!("panel clear failed");
        }
    }

    fn title(&mut self) {
        self.clear_screen();
        self.text(
            "DEFEND!",
            Point::new(85, 20),
            MonoTextStyle::new(&FONT_10X20, Rgb565::YELLOW),
        );
        let info = MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE);
        self.text("B:Left Y:Right X:Fire A:Pause", Point::new(33, 60), info);
        self.text("Press any button", Point::new(72, 85), info);
        self.text("to start", Point::new(96, 100), info);
    }

    fn game_over(&mut self, score: u32) {
        self.clear_screen();
        self.text(
            "GAME OVER",
            Point::new(75, 25),
            MonoTextStyle::new(&FONT_10X20, Rgb565::RED),
        );
        let info = MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE);
        self.buf.clear();
        core::write!(self.buf, "Score: {}", score).ok();
        let line = self.buf.clone();
        self.text(&line, Point::new(90, 60), info);
        self.text("Press any button", Point::new(72, 90), info);
    }
}

impl<D: DrawTarget<Color = Rgb565>> Output for Panel<D> {
    fn set_cell(&mut self, cell: Cell, colour: Colour) {
        let (col, row) = matrix_coords(cell);
        let area = Rectangle::new(
            Point::new(
                FIELD_X + col as i32 * CELL_PX + 1,
                FIELD_Y + row as i32 * CELL_PX + 1,
            ),
            Size::new(CELL_PX as u32 - 2, CELL_PX as u32 - 2),
        );
        self.fill(area, rgb(colour));
    }

    fn clear_all(&mut self) {
        let field = Rectangle::new(
            Point::new(FIELD_X, FIELD_Y),
            Size::new(FIELD_PX_W as u32, FIELD_PX_H as u32),
        );
        self.fill(field, Rgb565::BLACK);
        if field
            .into_styled(PrimitiveStyle::with_stroke(Rgb565::new(8, 16, 8), 1))
            .draw(&mut self.display)
            .is_err()
        {
            warn!("panel border failed");
        }
    }

    fn status_changed(&mut self, score: u32, lives_remaining: u8) {
        // Score (left)
        self.fill(
            Rectangle::new(Point::new(0, 0), Size::new(120, HUD_H as u32)),
            Rgb565::BLACK,
        );
        self.buf.clear();
        core::write!(self.buf, "Score: {}", score).ok();
        let line = self.buf.clone();
        self.text(
            &line,
            Point::new(4, 2),
            MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE),
        );

        // Lives (right)
        self.fill(
            Rectangle::new(Point::new(188, 0), Size::new(52, HUD_H as u32)),
            Rgb565::BLACK,
        );
        for i in 0..MAX_LIFE_LOSSES {
            let colour = if i < lives_remaining {
                Rgb565::RED
            } else {
                Rgb565::new(4, 8, 4)
            };
            let x = 192 + (i as i32) * 12;
            self.fill(Rectangle::new(Point::new(x, 3), Size::new(8, 8)), colour);
        }
    }
}

/// Display Pack buttons (active-low, pull-up), reported on press.
struct Buttons<'d> {
    pins: [(Input<'d>, Button); 4],
    held: [bool; 4],
}

impl Buttons<'_> {
    fn any_pressed(&mut self) -> bool {
        self.poll_button().is_some()
    }
}

impl InputSource for Buttons<'_> {
    fn poll_button(&mut self) -> Option<Button> {
        for (i, (pin, button)) in self.pins.iter().enumerate() {
            let down = pin.is_low();
            if down != self.held[i] {
                self.held[i] = down;
                if down {
                    return Some(*button);
                }
            }
        }
        None
    }

    fn poll_serial_char(&mut self) -> Option<char> {
        // USB CDC carries log output only.
        None
    }
}

// --- Embassy bindings ---
bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => UsbInterruptHandler<USB>;
});

#[embassy_executor::task]
async fn logger_task(driver: Driver<'static, USB>) {
    embassy_usb_logger::run!(1024, log::LevelFilter::Info, driver);
}

// --- Main ---
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // USB serial logger
    let usb_driver = Driver::new(p.USB, Irqs);
    unwrap!(spawner.spawn(logger_task(usb_driver)));
    Timer::after(Duration::from_secs(2)).await;
    log::info!("=== Grid Defender ===");

    // 1 ms game clock
    let core = unwrap!(cortex_m::Peripherals::take());
    start_tick_interrupt(core.SYST);
    info!("tick interrupt running");

    // Onboard LED (GP25 on Pico)
    let mut led = Pin::new(p.PIN_25, Level::Low);

    // ST7789 display (Pico Display Pack)
    let _bl = Pin::new(p.PIN_20, Level::High);
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 62_500_000;
    let spi_bus = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs_display = Pin::new(p.PIN_17, Level::High);
    let dc = Pin::new(p.PIN_16, Level::Low);
    let spi_device = ExclusiveDevice::new_no_delay(spi_bus, cs_display).unwrap();
    static DISPLAY_BUF: StaticCell<[u8; 1024]> = StaticCell::new();
    let display_buf = DISPLAY_BUF.init([0u8; 1024]);
    let di = mipidsi::interface::SpiInterface::new(spi_device, dc, display_buf);
    let display = Builder::new(ST7789, di)
        .display_size(135, 240)
        .display_offset(52, 40)
        .invert_colors(ColorInversion::Inverted)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .init(&mut Delay)
        .unwrap();
    let mut panel = Panel::new(display);
    log::info!("Display ready!");

    let mut buttons = Buttons {
        pins: [
            (Input::new(p.PIN_13, Pull::Up), Button::Left),
            (Input::new(p.PIN_15, Pull::Up), Button::Right),
            (Input::new(p.PIN_14, Pull::Up), Button::Fire),
            (Input::new(p.PIN_12, Pull::Up), Button::Pause),
        ],
        held: [false; 4],
    };

    let mut screen = Screen::Title;
    let mut entered = true;
    let mut game: Option<Game<Xorshift32>> = None;
    let mut driver = GameLoop::new(Timing::default(), TICKS.now());

    log::info!("Entering game loop");

    loop {
        let now = TICKS.now();

        match screen {
            Screen::Title => {
                if entered {
                    panel.title();
                    led.set_low();
                    entered = false;
                }
                if buttons.any_pressed() {
                    panel.clear_screen();
                    // Seeded from the time of the first press.
                    let seed = now ^ 0x9E37_79B9;
                    match game.as_mut() {
                        Some(game) => game.new_game(&mut panel),
                        None => game = Some(Game::new(Xorshift32::new(seed), &mut panel)),
                    }
                    driver.restart(now);
                    led.set_high();
                    screen = Screen::Playing;
                    log::info!("Game start!");
                }
            }

            Screen::Playing => {
                let Some(game) = game.as_mut() else {
                    screen = Screen::Title;
                    entered = true;
                    continue;
                };
                let command = next_command(&mut buttons);
                let step = driver.poll(game, now, command, &mut panel);
                if step.game_over {
                    panel.game_over(game.score());
                    led.set_low();
                    screen = Screen::GameOver;
                }
            }

            Screen::GameOver => {
                if buttons.any_pressed() {
                    screen = Screen::Title;
                    entered = true;
                }
            }
        }

        yield_now().await;
    }
}
