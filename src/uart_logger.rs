//! UART log output.
//!
//! Drains the log ring to a TX-only UART during the inter-frame quiet
//! period. Requires an external USB-UART adapter (CH340, CP2102, etc).
//!
//! ```text
//! ESP32-S3 GPIO6 (TX) ──────▶ USB-UART RX
//!                              └─▶ PC Serial Monitor
//! ```

use esp_idf_svc::hal::gpio;
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::uart::{self, UartTxDriver};

use crate::logging::{format_log_entry, LogStream, MAX_MSG_LEN};

/// UART configuration for logging.
pub struct UartLoggerConfig {
    pub baud_rate: u32,
}

impl Default for UartLoggerConfig {
    fn default() -> Self {
        Self { baud_rate: 115200 }
    }
}

/// Initialize UART1 TX-only for logging output on `tx_pin`.
pub fn init_uart_logger<'d>(
    uart: impl Peripheral<P = uart::UART1> + 'd,
    tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
    config: &UartLoggerConfig,
) -> Result<UartTxDriver<'d>, esp_idf_svc::sys::EspError> {
    let uart_config = uart::config::Config::default()
        .baudrate(esp_idf_svc::hal::units::Hertz(config.baud_rate));

    UartTxDriver::new(
        uart,
        tx_pin,
        Option::<gpio::AnyIOPin>::None, // CTS
        Option::<gpio::AnyIOPin>::None, // RTS
        &uart_config,
    )
}

/// Write every pending entry, then report drops since the last drain.
///
/// Blocking. Call only between frames.
pub fn drain_to_uart<const N: usize>(uart: &mut UartTxDriver<'_>, stream: &LogStream<N>) {
    let mut format_buf = [0u8; MAX_MSG_LEN + 32];

    while let Some(entry) = stream.drain() {
        let len = format_log_entry(&entry, &mut format_buf);
        let _ = uart.write(&format_buf[..len]);
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        let len = crate::logging::format_to_buffer(
            &mut format_buf,
            format_args!("[WARN] Dropped: {}\n", dropped),
        );
        let _ = uart.write(&format_buf[..len]);
        stream.reset_dropped();
    }
}
