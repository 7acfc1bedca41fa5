//! Serial communication abstractions
//!
//! The telemetry link is receive-only from the panel's point of view. The
//! polling loop must never wait for bytes, so the receive side is modelled
//! as a non-blocking "give me whatever has arrived" source.

/// Non-blocking source of received serial bytes
pub trait SerialSource {
    /// Copy already-received bytes into `buf`
    ///
    /// Returns the number of bytes written, or 0 immediately when nothing
    /// is pending.
    fn read_available(&mut self, buf: &mut [u8]) -> usize;
}

/// Byte slices act as a source that drains from the front
impl SerialSource for &[u8] {
    fn read_available(&mut self, buf: &mut [u8]) -> usize {
        let n = buf.len().min(self.len());
        let (head, tail) = self.split_at(n);
        buf[..n].copy_from_slice(head);
        *self = tail;
        n
    }
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 115200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl UartConfig {
    /// 8N1 at the given baud rate
    pub fn with_baudrate(baudrate: u32) -> Self {
        Self {
            baudrate,
            ..Self::default()
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_source_drains_in_chunks() {
        let mut source: &[u8] = b"cpu=1;\n";
        let mut buf = [0u8; 4];

        assert_eq!(source.read_available(&mut buf), 4);
        assert_eq!(&buf, b"cpu=");
        assert_eq!(source.read_available(&mut buf), 3);
        assert_eq!(&buf[..3], b"1;\n");
        assert_eq!(source.read_available(&mut buf), 0);
    }

    #[test]
    fn test_default_is_115200_8n1() {
        let config = UartConfig::default();
        assert_eq!(config.baudrate, 115200);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, StopBits::One);
        assert_eq!(UartConfig::with_baudrate(9600).parity, Parity::None);
    }
}
