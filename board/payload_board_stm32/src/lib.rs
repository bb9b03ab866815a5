#![cfg_attr(not(test), no_std)]

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c::{Read, Write, WriteRead};
use rtt_target::rprintln;
use stm32f1xx_hal::{
    flash::ACR,
    pac::{self, USART2},
    prelude::*,
    rcc::{Clocks, CFGR},
    serial::Tx,
    timer::SysDelay,
};

use payload_board::{BusError, PayloadBoard, SensorDriverServices, BOARD_ID_SIZE};

mod components;
use components::*;
mod pins;
use pins::GpioCr;
mod pin_groups;

/// Settle time after power up before the sensors are addressed.
const POWER_UP_SETTLE_MS: u32 = 500;

pub struct Board {
    pub delay: SysDelay,
    pub i2c1: BoardI2c1,
    pub serial_tx: Tx<USART2>,
    board_id: [u8; BOARD_ID_SIZE],
}

impl PayloadBoard for Board {
    fn serial_send(&mut self, string: &str) {
        for byte in string.as_bytes() {
            _ = nb::block!(self.serial_tx.write(*byte));
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn get_board_id(&mut self) -> [u8; BOARD_ID_SIZE] {
        self.board_id
    }

    fn get_sensor_driver_services(&mut self) -> &mut dyn SensorDriverServices {
        self
    }
}

impl SensorDriverServices for Board {
    fn ic2_read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), BusError> {
        self.i2c1.read(addr, buffer).map_err(bus_error)
    }

    fn ic2_write(&mut self, addr: u8, message: &[u8]) -> Result<(), BusError> {
        self.i2c1.write(addr, message).map_err(bus_error)
    }

    fn ic2_write_read(
        &mut self,
        addr: u8,
        message: &[u8],
        buffer: &mut [u8],
    ) -> Result<(), BusError> {
        self.i2c1
            .write_read(addr, message, buffer)
            .map_err(bus_error)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

pub fn build() -> Board {
    let board_builder = BoardBuilder::new();
    board_builder.setup().build()
}

pub struct BoardBuilder {
    pub delay: Option<SysDelay>,
    pub i2c1: Option<BoardI2c1>,
    pub serial_tx: Option<Tx<USART2>>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardBuilder {
    pub fn new() -> Self {
        BoardBuilder {
            delay: None,
            i2c1: None,
            serial_tx: None,
        }
    }

    /// Panics if `setup` has not run; there is no board to fall back to.
    pub fn build(self) -> Board {
        let (Some(delay), Some(i2c1), Some(serial_tx)) = (self.delay, self.i2c1, self.serial_tx)
        else {
            panic!("board peripherals were not set up");
        };
        Board {
            delay,
            i2c1,
            serial_tx,
            board_id: Uid::fetch().board_id(),
        }
    }

    fn setup_clocks(cfgr: CFGR, flash_acr: &mut ACR) -> Clocks {
        // 8 MHz crystal on the payload board
        cfgr.use_hse(8.MHz())
            .sysclk(48.MHz())
            .pclk1(24.MHz())
            .freeze(flash_acr)
    }

    pub fn setup(mut self) -> Self {
        rprintln!("board new");

        let (Some(mut core_peripherals), Some(device_peripherals)) =
            (cortex_m::Peripherals::take(), pac::Peripherals::take())
        else {
            panic!("peripherals already taken");
        };

        let mut flash = device_peripherals.FLASH.constrain();
        let rcc = device_peripherals.RCC.constrain();
        let mut afio = device_peripherals.AFIO.constrain();

        let gpioa = device_peripherals.GPIOA.split();
        let gpiob = device_peripherals.GPIOB.split();
        let mut gpio_cr = GpioCr {
            gpioa_crl: gpioa.crl,
            gpiob_crl: gpiob.crl,
        };
        let (i2c1_pins, serial_pins) =
            pin_groups::build(gpiob.pb6, gpiob.pb7, gpioa.pa2, gpioa.pa3, &mut gpio_cr);

        let clocks = BoardBuilder::setup_clocks(rcc.cfgr, &mut flash.acr);
        let mut delay = core_peripherals.SYST.delay(&clocks);
        delay.delay_ms(POWER_UP_SETTLE_MS);

        self.serial_tx = Some(setup_serial(
            serial_pins,
            &mut afio.mapr,
            device_peripherals.USART2,
            &clocks,
        ));
        rprintln!("set up serial");

        core_peripherals.DWT.enable_cycle_counter(); // BlockingI2c says this is required
        self.i2c1 = Some(setup_i2c1(
            i2c1_pins,
            device_peripherals.I2C1,
            &mut afio.mapr,
            &clocks,
        ));
        rprintln!("set up i2c1");

        self.delay = Some(delay);
        self
    }
}
