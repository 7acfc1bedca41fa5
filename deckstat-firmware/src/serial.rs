//! Serial telemetry input
//!
//! A receive task moves bytes from the buffered UART into [`SERIAL_PIPE`];
//! the panel loop drains the pipe without waiting through [`PipeSource`].

use defmt::*;
use embassy_rp::uart::{self, BufferedUartRx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::pipe::Pipe;
use embedded_io_async::Read;

use deckstat_hal::serial::{DataBits, Parity, StopBits};
use deckstat_hal::{SerialSource, UartConfig};

/// Bytes buffered between the receive task and the panel loop
const PIPE_SIZE: usize = 1024;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Received bytes waiting for the panel loop
pub static SERIAL_PIPE: Pipe<CriticalSectionRawMutex, PIPE_SIZE> = Pipe::new();

/// Non-blocking view of [`SERIAL_PIPE`]
pub struct PipeSource;

impl SerialSource for PipeSource {
    fn read_available(&mut self, buf: &mut [u8]) -> usize {
        SERIAL_PIPE.try_read(buf).unwrap_or(0)
    }
}

/// Map the board-agnostic UART settings onto the RP2040 driver config
pub fn uart_config(config: UartConfig) -> uart::Config {
    let mut cfg = uart::Config::default();
    cfg.baudrate = config.baudrate;
    cfg.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    cfg.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    cfg.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    cfg
}

/// Serial RX task - forwards received bytes to the panel loop
#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);
                // Waits while the pipe is full; the UART buffer absorbs the backlog
                SERIAL_PIPE.write_all(&buf[..n]).await;
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
