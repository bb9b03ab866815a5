use core::fmt::Write;
use core::ptr;

use payload_board::BOARD_ID_SIZE;

const UID_BASE: usize = 0x1ffff7e8;
const BOARD_ID_PREFIX: &str = "payload-";

/// The 96 bit factory unique id of the STM32F1.
pub struct Uid {
    off0: u16,
    off2: u16,
    off4: u32,
    off8: u32,
}

impl Uid {
    pub fn fetch() -> Uid {
        let address0 = UID_BASE as *const u16;
        let address2 = (UID_BASE + 2) as *const u16;
        let address4 = (UID_BASE + 4) as *const u32;
        let address8 = (UID_BASE + 8) as *const u32;

        unsafe {
            Self {
                off0: ptr::read(address0),
                off2: ptr::read(address2),
                off4: ptr::read(address4),
                off8: ptr::read(address8),
            }
        }
    }

    pub fn bytes(&self) -> [u8; 12] {
        let mut bytes: [u8; 12] = [0; 12];
        bytes[0..2].copy_from_slice(&self.off0.to_be_bytes());
        bytes[2..4].copy_from_slice(&self.off2.to_be_bytes());
        bytes[4..8].copy_from_slice(&self.off4.to_be_bytes());
        bytes[8..12].copy_from_slice(&self.off8.to_be_bytes());
        bytes
    }

    /// "payload-" followed by the uid in hex, exactly filling the id buffer.
    pub fn board_id(&self) -> [u8; BOARD_ID_SIZE] {
        let mut id = BoardIdWriter {
            buffer: [b'\0'; BOARD_ID_SIZE],
            length: 0,
        };
        _ = id.write_str(BOARD_ID_PREFIX);
        for byte in self.bytes() {
            _ = write!(id, "{:02x}", byte);
        }
        id.buffer
    }
}

struct BoardIdWriter {
    buffer: [u8; BOARD_ID_SIZE],
    length: usize,
}

impl Write for BoardIdWriter {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let end = self.length + s.len();
        if end > BOARD_ID_SIZE {
            return Err(core::fmt::Error);
        }
        self.buffer[self.length..end].copy_from_slice(s.as_bytes());
        self.length = end;
        Ok(())
    }
}
