//! Received bus frame

use heapless::Vec;
use log::warn;

/// Maximum payload of a classic CAN frame
pub const MAX_DATA_LEN: usize = 8;

/// One frame as delivered by the bus controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusFrame {
    /// True for a 29-bit identifier, false for an 11-bit one
    pub extended: bool,
    pub identifier: u32,
    /// Remote transmission request, carries no payload
    pub remote: bool,
    pub data: Vec<u8, MAX_DATA_LEN>,
}

impl BusFrame {
    /// Standard data frame. Returns `None` if `data` is longer than 8 bytes.
    pub fn new(identifier: u32, data: &[u8]) -> Option<Self> {
        Some(Self {
            extended: false,
            identifier,
            remote: false,
            data: Vec::from_slice(data).ok()?,
        })
    }

    /// Extended (29-bit identifier) data frame
    pub fn new_extended(identifier: u32, data: &[u8]) -> Option<Self> {
        let mut frame = Self::new(identifier, data)?;
        frame.extended = true;
        Some(frame)
    }

    /// Remote request frame
    pub fn new_remote(identifier: u32) -> Self {
        Self {
            extended: false,
            identifier,
            remote: true,
            data: Vec::new(),
        }
    }

    /// Frame as reported by a driver.
    ///
    /// Payload bytes past [`MAX_DATA_LEN`] are dropped with a warning, and a
    /// remote request keeps no payload.
    pub fn from_driver(extended: bool, identifier: u32, remote: bool, data: &[u8]) -> Self {
        let payload = if remote { &[][..] } else { data };
        let kept = payload.len().min(MAX_DATA_LEN);
        if kept < payload.len() {
            warn!(
                "Frame ID {} reported {} data bytes, keeping the first {}",
                identifier,
                payload.len(),
                MAX_DATA_LEN
            );
        }

        Self {
            extended,
            identifier,
            remote,
            // `kept` never exceeds the capacity
            data: Vec::from_slice(&payload[..kept]).unwrap_or_default(),
        }
    }

    /// Data length code
    pub fn dlc(&self) -> usize {
        self.data.len()
    }

    pub fn format_name(&self) -> &'static str {
        if self.extended {
            "Extended"
        } else {
            "Standard"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_frame_keeps_fields() {
        let frame = BusFrame::from_driver(true, 0x18FF_0001, false, &[0x01, 0x3C]);
        assert!(frame.extended);
        assert!(!frame.remote);
        assert_eq!(frame.identifier, 0x18FF_0001);
        assert_eq!(frame.data.as_slice(), &[0x01, 0x3C]);
    }

    #[test]
    fn driver_overflow_is_truncated_not_discarded() {
        let payload: [u8; 10] = core::array::from_fn(|i| i as u8);
        let frame = BusFrame::from_driver(false, 0x100, false, &payload);
        assert_eq!(frame.dlc(), MAX_DATA_LEN);
        assert_eq!(frame.data.as_slice(), &payload[..MAX_DATA_LEN]);
    }

    #[test]
    fn driver_remote_frame_has_no_payload() {
        let frame = BusFrame::from_driver(false, 0x7DF, true, &[0xAA]);
        assert!(frame.remote);
        assert_eq!(frame.dlc(), 0);
    }
}
