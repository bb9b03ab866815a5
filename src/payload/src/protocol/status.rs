use alloc::format;
use payload_board::PayloadBoard;
use rtt_target::rprintln;

use crate::drivers::types::SensorError;

pub const COUNTDOWN_STEP_MS: u32 = 1000;
pub const BLANK_LINES_AFTER_COUNTDOWN: usize = 5;

pub fn send_sensor_initialized(board: &mut impl PayloadBoard, name: &str) {
    board.serial_send(format!("{} sensor initialized successfully.\n", name).as_str());
}

pub fn send_sensor_failed(board: &mut impl PayloadBoard, name: &str, error: &SensorError) {
    board.serial_send(format!("{} initialization failed: {}\n", name, error).as_str());
}

pub fn send_board_id(board: &mut impl PayloadBoard) {
    let mut board_id = board.get_board_id();
    let board_id = util::str_from_nul_padded(&mut board_id).unwrap_or("unknown");
    rprintln!("board {}", board_id);
    board.serial_send(board_id);
    board.serial_send("\n");
}

fn digits(mut value: u32) -> usize {
    let mut count = 1;
    while value >= 10 {
        value /= 10;
        count += 1;
    }
    count
}

/// Counts down from `seconds` on one line, one board delay per second,
/// then clears the way for telemetry with blank lines.
pub fn send_countdown(board: &mut impl PayloadBoard, seconds: u32) {
    board.serial_send(format!("Starting in {}", seconds).as_str());
    let mut shown = seconds;
    for remaining in (0..seconds).rev() {
        board.delay_ms(COUNTDOWN_STEP_MS);
        for _ in 0..digits(shown) {
            board.serial_send("\u{8} \u{8}");
        }
        board.serial_send(format!("{}", remaining).as_str());
        shown = remaining;
    }
    for _ in 0..BLANK_LINES_AFTER_COUNTDOWN {
        board.serial_send("\n");
    }
}
