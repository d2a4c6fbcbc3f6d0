//! WiFi client bring-up for the Pico W.
//!
//! Powers the CYW43 chip, starts the embassy-net stack with DHCP, and joins a network.
//!
//! # Examples
//!
//! ```no_run
//! # #![no_std]
//! # #![no_main]
//! # use panic_probe as _;
//! # use core::default::Default;
//! use tft_clock::config::WifiCredentials;
//! use tft_clock::wifi::Wifi;
//!
//! # async fn example(spawner: embassy_executor::Spawner) -> tft_clock::Result<()> {
//! let p = embassy_rp::init(Default::default());
//! let credentials = WifiCredentials::new("my-network", "secret")?;
//!
//! let mut wifi =
//!     Wifi::new(p.PIN_23, p.PIN_25, p.PIO0, p.PIN_24, p.PIN_29, p.DMA_CH0, spawner).await?;
//! wifi.join(&credentials, 500).await;
//! assert!(wifi.is_connected());
//! let stack = wifi.stack();
//! // ... use stack ...
//! # Ok(())
//! # }
//! ```

#![allow(clippy::future_not_send, reason = "single-threaded")]

use cyw43::JoinOptions;
use cyw43_pio::{DEFAULT_CLOCK_DIVIDER, PioSpi};
use defmt::info;
use embassy_executor::Spawner;
use embassy_net::{Config, Stack, StackResources};
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{DMA_CH0, PIN_23, PIN_24, PIN_25, PIN_29, PIO0};
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_rp::{Peri, bind_interrupts};
use embassy_time::Timer;
use static_cell::StaticCell;

use crate::Result;
use crate::config::WifiCredentials;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

/// Station-mode WiFi: chip control plus the network stack.
pub struct Wifi {
    control: cyw43::Control<'static>,
    stack: Stack<'static>,
}

impl Wifi {
    /// Power up the radio and start the network stack in DHCP client mode.
    ///
    /// Spawns the chip and network runner tasks. Does not join a network yet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskSpawn`](crate::Error::TaskSpawn) if either runner cannot be spawned.
    pub async fn new(
        pin_23: Peri<'static, PIN_23>,
        pin_25: Peri<'static, PIN_25>,
        pio0: Peri<'static, PIO0>,
        pin_24: Peri<'static, PIN_24>,
        pin_29: Peri<'static, PIN_29>,
        dma_ch0: Peri<'static, DMA_CH0>,
        spawner: Spawner,
    ) -> Result<Self> {
        info!("WiFi initializing in client mode");

        let fw = cyw43_firmware::CYW43_43439A0;
        let clm = cyw43_firmware::CYW43_43439A0_CLM;

        let pwr = Output::new(pin_23, Level::Low);
        let cs = Output::new(pin_25, Level::High);
        let mut pio = Pio::new(pio0, Irqs);
        let spi = PioSpi::new(
            &mut pio.common,
            pio.sm0,
            DEFAULT_CLOCK_DIVIDER,
            pio.irq0,
            cs,
            pin_24,
            pin_29,
            dma_ch0,
        );

        static STATE: StaticCell<cyw43::State> = StaticCell::new();
        let state = STATE.init(cyw43::State::new());
        let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;
        spawner.spawn(wifi_task(runner)?);

        control.init(clm).await;
        control
            .set_power_management(cyw43::PowerManagementMode::PowerSave)
            .await;

        let config = Config::dhcpv4(Default::default());
        let seed = 0x7c8f_3a2e_9d14_6b5a;

        static RESOURCES: StaticCell<StackResources<5>> = StaticCell::new();
        let (stack, runner) = embassy_net::new(
            net_device,
            config,
            RESOURCES.init(StackResources::<5>::new()),
            seed,
        );
        spawner.spawn(net_task(runner)?);

        Ok(Self { control, stack })
    }

    /// Join the network, retrying every `retry_ms` until it accepts us, then wait for DHCP.
    pub async fn join(&mut self, credentials: &WifiCredentials, retry_ms: u32) {
        info!("Connecting to WiFi: {}", credentials.ssid.as_str());
        let mut attempt: u32 = 0;
        loop {
            attempt = attempt.saturating_add(1);
            match self
                .control
                .join(
                    credentials.ssid.as_str(),
                    JoinOptions::new(credentials.password.as_bytes()),
                )
                .await
            {
                Ok(()) => break,
                Err(err) => {
                    info!("Join attempt {} failed: {}", attempt, err.status);
                    Timer::after_millis(u64::from(retry_ms)).await;
                }
            }
        }

        info!("WiFi connected! Waiting for DHCP...");
        self.stack.wait_config_up().await;
        if let Some(config) = self.stack.config_v4() {
            info!("IP Address: {}", config.address);
        }
    }

    /// Link is up and DHCP has handed out an address.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.stack.is_link_up() && self.stack.is_config_up()
    }

    /// Copyable handle to the network stack.
    #[must_use]
    pub const fn stack(&self) -> Stack<'static> {
        self.stack
    }
}

#[embassy_executor::task]
async fn wifi_task(
    runner: cyw43::Runner<'static, Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>,
) -> ! {
    runner.run().await
}

#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}
