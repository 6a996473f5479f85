//! Stele - Modbus Character Display Firmware
//!
//! Main firmware binary for RP2040-based register-mapped LCD boards.
//! A Modbus RTU master writes packed character codes into holding
//! registers; the firmware paints them onto a 20x4 HD44780 display.
//!
//! Everything runs in one cooperative loop: service the bus, run the
//! display cycle, sleep.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{Config as I2cPeripheralConfig, I2c};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use stele_core::splash::show_splash;
use stele_core::Device;
use stele_drivers::jumpers::JumperBank;
use stele_drivers::lcd::{Hd44780, DEFAULT_I2C_ADDRESS};
use stele_drivers::modbus::{ModbusTransport, TransportStats};
use stele_hal::i2c::I2cConfig;
use stele_hal_rp2040::gpio::JumperInput;
use stele_hal_rp2040::i2c::BlockingI2c;
use stele_hal_rp2040::pins::JUMPER_SETTLE_MS;
use stele_hal_rp2040::time::EmbassyClock;
use stele_hal_rp2040::uart::{BufferedRx, BufferedTx};

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Pause between display cycles
const CYCLE_MS: u64 = 10;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Stele firmware starting...");

    let p = embassy_rp::init(Default::default());

    info!("Peripherals initialized");

    // Sample configuration jumpers once the pull-ups have settled
    let jumpers = JumperBank::new(
        [
            JumperInput::new(p.PIN_2),
            JumperInput::new(p.PIN_3),
            JumperInput::new(p.PIN_4),
            JumperInput::new(p.PIN_5),
        ],
        [JumperInput::new(p.PIN_6), JumperInput::new(p.PIN_7)],
    );
    Timer::after_millis(JUMPER_SETTLE_MS).await;
    let config = jumpers.read_config();

    info!(
        "Configuration: address {}, {} baud",
        config.address,
        config.baud.bps()
    );

    // LCD on I2C0 (SDA GPIO20, SCL GPIO21)
    let mut i2c_config = I2cPeripheralConfig::default();
    i2c_config.frequency = I2cConfig::STANDARD.frequency;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_21, p.PIN_20, i2c_config);
    let mut lcd = Hd44780::new(BlockingI2c::new(i2c), Delay, DEFAULT_I2C_ADDRESS);

    // A missing display must not stop the bus side
    match lcd.init() {
        Ok(()) => info!("LCD initialized"),
        Err(e) => warn!("LCD init failed: {}", e),
    }
    if let Err(e) = show_splash(&mut lcd, &config) {
        warn!("Boot screen failed: {}", e);
    }

    // Field bus on UART0 at the jumpered speed
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.baud.bps();

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    let mut transport = ModbusTransport::new(
        BufferedRx::new(rx),
        BufferedTx::new(tx),
        EmbassyClock,
        &config,
    );

    info!("UART initialized for Modbus RTU");

    let mut device = Device::new(config);
    let mut last_stats = TransportStats::default();

    info!("Stele running, station {}", config.address);

    loop {
        let report = device.run_cycle(&mut transport, &mut lcd);

        if let Some(fault) = report.fault {
            warn!("Display fault: {}", fault);
        }
        if !report.is_idle() {
            debug!("Cycle: {}", report);
        }

        let stats = *transport.stats();
        if stats != last_stats {
            if stats.crc_errors != last_stats.crc_errors
                || stats.framing_errors != last_stats.framing_errors
                || stats.uart_errors != last_stats.uart_errors
            {
                warn!("Bus errors: {}", stats);
            } else {
                trace!("Bus: {}", stats);
            }
            last_stats = stats;
        }

        Timer::after_millis(CYCLE_MS).await;
    }
}
