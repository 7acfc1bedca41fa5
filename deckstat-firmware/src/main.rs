//! Deckstat - Serial Status Panel Firmware
//!
//! Main firmware binary for RP2040 boards driving a 320x240 ILI9341 TFT.
//! A host streams `key=value;` telemetry lines over UART0; the panel shows
//! them as a dashboard and offers an ASCII art gallery and a matrix rain
//! screensaver on three buttons.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{self, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embassy_time::{Delay, Instant, Timer};
use embedded_io_async::Write;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use deckstat_core::config::{parse_config, PanelConfig, BANNER};
use deckstat_display::{GraphicsCanvas, StatusPanel};
use deckstat_hal::{DebouncedButton, UartConfig};

use crate::buttons::ButtonPin;
use crate::ili9341::Ili9341;
use crate::serial::PipeSource;

mod buttons;
mod ili9341;
mod serial;

/// Embedded panel configuration (compiled into firmware)
/// Edit panel.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../panel.toml");

/// SPI clock for the TFT
const SPI_FREQUENCY_HZ: u32 = 32_000_000;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 1024]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Deckstat firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    info!("Panel config: {:?}", config);

    // UART0 for host telemetry (GPIO0 TX, GPIO1 RX)
    let tx_buf = TX_BUF.init([0u8; 128]);
    let rx_buf = RX_BUF.init([0u8; 1024]);

    let uart_config = serial::uart_config(UartConfig::with_baudrate(config.baud_rate));
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (mut tx, rx) = uart.split();

    for line in BANNER {
        info!("{}", line);
        if let Err(e) = write_line(&mut tx, line).await {
            warn!("UART write error: {:?}", e);
        }
    }

    info!("UART initialized at {} baud", config.baud_rate);

    // SPI1 for the TFT (GPIO10 SCK, GPIO11 MOSI, GPIO8 DC, GPIO9 CS, GPIO12 RST)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = SPI_FREQUENCY_HZ;
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PIN_10, p.PIN_11, spi_config);
    let dc = Output::new(p.PIN_8, Level::Low);
    let cs = Output::new(p.PIN_9, Level::High);
    let rst = Output::new(p.PIN_12, Level::High);
    // Backlight stays on for the life of the firmware
    let _backlight = Output::new(p.PIN_13, Level::High);

    let mut display = Ili9341::new(spi, cs, dc, rst);
    if let Err(e) = display.init(&mut Delay) {
        error!("Failed to initialize display: {:?}", e);
    } else {
        info!("TFT initialized");
    }
    let mut canvas = GraphicsCanvas::new(display);

    // Buttons A, B, C (GPIO2-4, active low)
    let mut buttons = [
        DebouncedButton::new(ButtonPin(Input::new(p.PIN_2, Pull::Up)), config.debounce_ms),
        DebouncedButton::new(ButtonPin(Input::new(p.PIN_3, Pull::Up)), config.debounce_ms),
        DebouncedButton::new(ButtonPin(Input::new(p.PIN_4, Pull::Up)), config.debounce_ms),
    ];

    spawner.spawn(serial::serial_rx_task(rx)).unwrap();

    let seed = Instant::now().as_ticks() as u32;
    let mut panel = StatusPanel::new(config, seed);
    if let Err(e) = panel.start(&mut canvas) {
        warn!("Initial draw failed: {:?}", e);
    }

    info!("Panel running, profile {}", config.profile.name());

    let mut source = PipeSource;
    let mut mode = panel.mode();
    let mut lines = panel.model().lines_merged();
    loop {
        let now_ms = Instant::now().as_millis() as u32;
        let sleep_ms = match panel.tick(now_ms, &mut source, &mut buttons, &mut canvas) {
            Ok(sleep_ms) => sleep_ms,
            Err(e) => {
                warn!("Draw error: {:?}", e);
                config.loop_sleep_ms
            }
        };

        if panel.mode() != mode {
            mode = panel.mode();
            debug!("Mode -> {:?}", mode);
        }
        if panel.model().lines_merged() != lines {
            lines = panel.model().lines_merged();
            trace!("Lines merged: {}", lines);
        }

        Timer::after_millis(u64::from(sleep_ms)).await;
    }
}

/// Parse the embedded panel.toml, falling back to defaults
///
/// build.rs validates the file, so the fallback only triggers when the two
/// validators disagree.
fn load_config() -> PanelConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            warn!("Failed to parse embedded config: {:?}", e);
            warn!("Using default configuration");
            PanelConfig::default()
        }
    }
}

async fn write_line<W: Write>(tx: &mut W, line: &str) -> Result<(), W::Error> {
    tx.write_all(line.as_bytes()).await?;
    tx.write_all(b"\r\n").await?;
    tx.flush().await
}
