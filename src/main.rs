//! SircRemote - Main entry point
//!
//! 1. Initialize ESP-IDF and the UART log
//! 2. Wire the IR emitter and the five buttons
//! 3. Poll forever; restart the chip on a reset request
//!
//! # Pins
//!
//! ```text
//! GPIO4  IR emitter driver (polarity from CONFIG.ir_output)
//! GPIO0  SW1 reset (boot button on most ESP32-S3 boards)
//! GPIO1  SW2     GPIO2  SW3     GPIO3  SW4     GPIO5  SW5
//! GPIO6  UART1 TX log
//! ```

#![no_std]
#![no_main]

use esp_idf_svc::hal::delay::{Ets, FreeRtos};
use esp_idf_svc::hal::gpio::{AnyIOPin, Input, PinDriver, Pull};
use esp_idf_svc::hal::interrupt;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::reset;
use esp_idf_svc::sys as esp_idf_sys;

use sirc_remote::{
    hal::{ButtonPins, IrLed},
    remote::{FrameScheduler, PollOutcome, RemoteController},
    rt_error, rt_info,
    uart_logger::{drain_to_uart, init_uart_logger, UartLoggerConfig},
    CONFIG, FAULT_STATE, LOG_STREAM, VERSION,
};

/// Frames run with interrupts masked on this core so the tick ISR cannot
/// stretch a burst. The quiet period blocks in FreeRTOS so IDLE runs and
/// the task watchdog is fed.
struct EspScheduler;

impl FrameScheduler for EspScheduler {
    fn uninterrupted<R>(&mut self, f: impl FnOnce() -> R) -> R {
        interrupt::free(f)
    }

    fn sleep_ms(&mut self, ms: u32) {
        FreeRtos::delay_ms(ms);
    }
}

#[no_mangle]
fn main() {
    // Initialize ESP-IDF
    esp_idf_sys::link_patches();

    let peripherals = Peripherals::take().expect("peripherals already taken");
    let pins = peripherals.pins;

    let mut uart = init_uart_logger(peripherals.uart1, pins.gpio6, &UartLoggerConfig::default())
        .expect("UART logger init failed");

    rt_info!(LOG_STREAM, 0, "{}", VERSION);

    let ir_pin = PinDriver::output(pins.gpio4).expect("IR pin init failed");
    let ir_led = IrLed::new(ir_pin, CONFIG.ir_output.active);

    let mut buttons = ButtonPins::new(
        [
            button_input(pins.gpio0.into()),
            button_input(pins.gpio1.into()),
            button_input(pins.gpio2.into()),
            button_input(pins.gpio3.into()),
            button_input(pins.gpio5.into()),
        ],
        CONFIG.buttons.active_low,
    );

    let mut remote = match RemoteController::new(ir_led, Ets, EspScheduler, CONFIG, &LOG_STREAM, &FAULT_STATE) {
        Ok(remote) => remote,
        Err(_) => {
            // Nothing safe to transmit: report and idle
            loop {
                drain_to_uart(&mut uart, &LOG_STREAM);
                unsafe {
                    esp_idf_sys::vTaskDelay(1000);
                }
            }
        }
    };

    loop {
        let state = match buttons.poll() {
            Ok(state) => state,
            Err(e) => {
                rt_error!(LOG_STREAM, remote.uptime_us(), "button read failed: {:?}", e);
                Default::default()
            }
        };

        // Errors are logged and latched by the controller; a latched pin
        // fault holds the next cycle silent
        if let Ok(PollOutcome::Reset) = remote.poll(state) {
            drain_to_uart(&mut uart, &LOG_STREAM);
            reset::restart();
        }

        drain_to_uart(&mut uart, &LOG_STREAM);
    }
}

fn button_input(pin: AnyIOPin) -> PinDriver<'static, AnyIOPin, Input> {
    let mut driver = PinDriver::input(pin).expect("button pin init failed");
    // Buttons short to ground; a floating input would read as presses
    driver.set_pull(Pull::Up).expect("button pull-up failed");
    driver
}
