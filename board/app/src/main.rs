//! Payload flight firmware: sample, fuse, and downlink until power is removed.

#![no_std]
#![no_main]

extern crate alloc;

use cortex_m_rt::entry;
use panic_halt as _;
use rtt_target::{rprintln, rtt_init_print};

use payload::{settings::LoopSettings, PayloadTelemetry};

mod prelude;

#[entry]
fn main() -> ! {
    rtt_init_print!();
    prelude::init();
    rprintln!("payload firmware {}", env!("GIT_BRANCH"));

    let mut board = payload_board_stm32::build();
    let mut payload = PayloadTelemetry::setup(&mut board, LoopSettings::default());
    payload.run(&mut board)
}
