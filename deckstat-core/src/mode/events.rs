//! Events that trigger mode transitions

/// A pressed-edge on one of the three panel buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeEvent {
    /// Button A: back to the dashboard
    Dashboard,
    /// Button B: open the art gallery, or show the next piece
    Art,
    /// Button C: start the matrix rain
    Rain,
}

impl ModeEvent {
    /// Events in the order pending edges are applied within one tick
    pub const BUTTON_ORDER: [ModeEvent; 3] = [ModeEvent::Dashboard, ModeEvent::Art, ModeEvent::Rain];

    /// Event for a button index (0 = A, 1 = B, 2 = C)
    pub fn from_button(index: usize) -> Option<Self> {
        Self::BUTTON_ORDER.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_mapping() {
        assert_eq!(ModeEvent::from_button(0), Some(ModeEvent::Dashboard));
        assert_eq!(ModeEvent::from_button(1), Some(ModeEvent::Art));
        assert_eq!(ModeEvent::from_button(2), Some(ModeEvent::Rain));
        assert_eq!(ModeEvent::from_button(3), None);
    }
}
