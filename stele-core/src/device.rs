//! Device coordinator
//!
//! Owns the register bank and every piece of derived state, and runs the
//! per-cycle pipeline:
//!
//! ```text
//! transport.service ─► detect_changes ─► commands ─► render ─► refresh_status
//! ```
//!
//! The transport only ever sees the bank through the `&mut` borrow it gets
//! for the duration of `service`, so the core never runs while a request
//! is half applied.

use crate::change::ChangeDetector;
use crate::command::{CommandOutcome, CommandProcessor};
use crate::config::DeviceConfig;
use crate::registers::RegisterBank;
use crate::render::FrameRenderer;
use crate::status::{ErrorCode, StatusPublisher};
use crate::traits::{CharacterDisplay, DisplayControl, DisplayError, Transport};

/// Summary of one cycle, for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Writable registers changed since the last cycle
    pub bus_activity: usize,
    /// A clear command ran
    pub cleared: bool,
    /// A display on/off control was sent
    pub control: Option<DisplayControl>,
    /// Cells written by the renderer
    pub cells_written: usize,
    /// First display failure this cycle
    pub fault: Option<DisplayError>,
}

impl CycleReport {
    /// Whether the cycle did anything worth logging
    pub fn is_idle(&self) -> bool {
        self.bus_activity == 0
            && !self.cleared
            && self.control.is_none()
            && self.cells_written == 0
            && self.fault.is_none()
    }
}

/// The register-to-display engine
pub struct Device {
    config: DeviceConfig,
    bank: RegisterBank,
    detector: ChangeDetector,
    commands: CommandProcessor,
    renderer: FrameRenderer,
    status: StatusPublisher,
}

impl Device {
    /// Create a device in its power-on state and publish its configuration
    pub fn new(config: DeviceConfig) -> Self {
        let mut bank = RegisterBank::new();
        let mut status = StatusPublisher::new();
        status.publish_config(&mut bank, &config);
        status.clear_error(&mut bank);
        status.refresh_status(&mut bank);

        Self {
            config,
            detector: ChangeDetector::new(&bank),
            bank,
            commands: CommandProcessor::new(),
            renderer: FrameRenderer::new(),
            status,
        }
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn bank(&self) -> &RegisterBank {
        &self.bank
    }

    /// Bus-side access to the bank
    pub fn bank_mut(&mut self) -> &mut RegisterBank {
        &mut self.bank
    }

    pub fn commands(&self) -> &CommandProcessor {
        &self.commands
    }

    pub fn renderer(&self) -> &FrameRenderer {
        &self.renderer
    }

    /// Current error code
    pub fn error(&self) -> ErrorCode {
        self.status.error()
    }

    /// Service the transport, then run one cycle
    pub fn run_cycle<T, D>(&mut self, transport: &mut T, display: &mut D) -> CycleReport
    where
        T: Transport + ?Sized,
        D: CharacterDisplay + ?Sized,
    {
        transport.service(&mut self.bank);
        self.cycle(display)
    }

    /// Run one cycle against the bank as the bus left it
    ///
    /// Display failures never stop the cycle; they set
    /// [`ErrorCode::DISPLAY_IO`], which stays until the next clear.
    ///
    /// A render pass that fails part way still drops its dirty flags, so
    /// the screen stays partly drawn after the display recovers. It is
    /// repainted only by the next frame register change or a clear.
    pub fn cycle<D: CharacterDisplay + ?Sized>(&mut self, display: &mut D) -> CycleReport {
        let bus_activity = self.detector.detect_changes(&self.bank);

        let CommandOutcome {
            cleared,
            control,
            fault,
        } = self.commands.process(
            &mut self.bank,
            self.detector.dirty_mut(),
            &mut self.status,
            display,
        );
        // Command effects are not bus activity
        self.detector.sync(&self.bank);

        let mut report = CycleReport {
            bus_activity,
            cleared,
            control,
            cells_written: 0,
            fault,
        };

        match self
            .renderer
            .render(&self.bank, self.detector.dirty_mut(), display)
        {
            Ok(written) => report.cells_written = written,
            Err(e) => {
                report.fault.get_or_insert(e);
            }
        }

        if report.fault.is_some() {
            self.status.set_error(&mut self.bank, ErrorCode::DISPLAY_IO);
        }
        self.status.refresh_status(&mut self.bank);

        report
    }
}
