use serde::{Deserialize, Serialize};

/// Operator commands at one point in time.
///
/// Layout on disk follows field order: speed, strafe, turn, aux, lift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sample {
    /// Forward/backward speed of the drive.
    pub speed: i8,
    /// Horizontal (strafe) motion.
    pub strafe: i8,
    /// Turning speed of the drive.
    pub turn: i8,
    /// Auxiliary actuator (dumper).
    pub aux: i8,
    /// Lift motor speed.
    pub lift: i8,
}

impl Sample {
    pub const CHANNELS: usize = 5;
    pub const NEUTRAL: Sample = Sample::new(0, 0, 0, 0, 0);

    pub const fn new(speed: i8, strafe: i8, turn: i8, aux: i8, lift: i8) -> Self {
        Self {
            speed,
            strafe,
            turn,
            aux,
            lift,
        }
    }

    pub fn to_bytes(self) -> [u8; Self::CHANNELS] {
        [
            self.speed as u8,
            self.strafe as u8,
            self.turn as u8,
            self.aux as u8,
            self.lift as u8,
        ]
    }

    pub fn from_bytes(bytes: [u8; Self::CHANNELS]) -> Self {
        Self::new(
            bytes[0] as i8,
            bytes[1] as i8,
            bytes[2] as i8,
            bytes[3] as i8,
            bytes[4] as i8,
        )
    }

    pub fn channels(self) -> [i8; Self::CHANNELS] {
        [self.speed, self.strafe, self.turn, self.aux, self.lift]
    }

    pub fn is_neutral(self) -> bool {
        self == Self::NEUTRAL
    }

    /// Applies the field orientation to the turn channel.
    ///
    /// `-128` has no positive counterpart in `i8` and saturates to `127`.
    pub fn oriented(self, mirror: Mirror) -> Self {
        Self {
            turn: self.turn.saturating_mul(mirror.sign()),
            ..self
        }
    }
}

/// Field orientation a routine is played back in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mirror {
    #[default]
    Normal,
    /// Reflected over the y axis for the opposite starting tile.
    Mirrored,
}

impl Mirror {
    /// Sign multiplied into the turn channel (`1` or `-1`).
    pub fn sign(self) -> i8 {
        match self {
            Self::Normal => 1,
            Self::Mirrored => -1,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Mirrored,
            Self::Mirrored => Self::Normal,
        }
    }
}
