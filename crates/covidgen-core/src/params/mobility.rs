use super::Band;
use crate::error::Result;
use crate::timeline::{Timeline, Ymd};

pub const HORIZON_START: Ymd = (2020, 3, 1);
pub const HORIZON_END: Ymd = (2022, 9, 15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobilityPhase {
    InitialLockdown,
    Psbb,
    EarlyPpkm,
    StrictPpkm,
    Recovery,
}

impl MobilityPhase {
    /// Change from baseline in percent, shared by every channel of a record.
    pub fn factor(self) -> Band {
        match self {
            MobilityPhase::InitialLockdown => Band::new(-80.0, -40.0),
            MobilityPhase::Psbb => Band::new(-60.0, -20.0),
            MobilityPhase::EarlyPpkm => Band::new(-40.0, -10.0),
            MobilityPhase::StrictPpkm => Band::new(-50.0, -15.0),
            MobilityPhase::Recovery => Band::new(-20.0, 10.0),
        }
    }
}

pub fn timeline() -> Result<Timeline<MobilityPhase>> {
    Timeline::new(
        "mobility",
        HORIZON_START,
        HORIZON_END,
        &[
            (HORIZON_START, MobilityPhase::InitialLockdown),
            ((2020, 6, 1), MobilityPhase::Psbb),
            ((2020, 12, 1), MobilityPhase::EarlyPpkm),
            ((2021, 6, 1), MobilityPhase::StrictPpkm),
            ((2021, 12, 1), MobilityPhase::Recovery),
        ],
    )
}

/// How strongly one channel follows the phase factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channel {
    pub multiplier: f64,
    /// Half-width of the uniform noise added after scaling.
    pub jitter: f64,
}

impl Channel {
    const fn new(multiplier: f64, jitter: f64) -> Self {
        Self { multiplier, jitter }
    }

    /// Widest value this channel can take for a factor band.
    pub fn bounds(self, factor: Band) -> Band {
        factor.scaled(self.multiplier).widened(self.jitter)
    }
}

/// Channels in column order, from retail_recreation to night_activity.
pub const CHANNELS: [Channel; 13] = [
    Channel::new(1.0, 20.0),
    Channel::new(0.5, 10.0),
    Channel::new(1.0, 30.0),
    Channel::new(1.2, 15.0),
    Channel::new(0.8, 15.0),
    Channel::new(-0.3, 5.0),
    Channel::new(0.7, 10.0),
    Channel::new(1.5, 20.0),
    Channel::new(0.5, 15.0),
    Channel::new(0.9, 10.0),
    Channel::new(0.8, 15.0),
    Channel::new(0.9, 10.0),
    Channel::new(1.2, 20.0),
];

pub const RETAIL: usize = 0;
pub const TRANSIT: usize = 3;
pub const WORKPLACES: usize = 4;
