//! CANifier general-purpose pins

use crate::ProtocolError;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Physical I/O line on the CANifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum GeneralPin {
    QuadIdx = 0,
    QuadB = 1,
    QuadA = 2,
    /// Reverse limit switch
    LimR = 3,
    /// Forward limit switch
    LimF = 4,
    Sda = 5,
    Scl = 6,
    SpiCs = 7,
    SpiMisoPwm2P = 8,
    SpiMosiPwm1P = 9,
    SpiClkPwm0P = 10,
}

impl GeneralPin {
    /// Number of general pins, also the length of the input snapshot array
    pub const COUNT: usize = 11;

    pub const ALL: [GeneralPin; Self::COUNT] = [
        GeneralPin::QuadIdx,
        GeneralPin::QuadB,
        GeneralPin::QuadA,
        GeneralPin::LimR,
        GeneralPin::LimF,
        GeneralPin::Sda,
        GeneralPin::Scl,
        GeneralPin::SpiCs,
        GeneralPin::SpiMisoPwm2P,
        GeneralPin::SpiMosiPwm1P,
        GeneralPin::SpiClkPwm0P,
    ];

    pub fn value(self) -> i32 {
        self.into()
    }

    /// Index into a pin snapshot array
    pub fn index(self) -> usize {
        self.value() as usize
    }

    /// Bit of this pin in an output / direction mask
    pub fn mask(self) -> i32 {
        1 << self.value()
    }

    pub fn from_code(code: i32) -> Result<Self, ProtocolError> {
        Self::try_from(code).map_err(|e| ProtocolError::invalid("GeneralPin", e.number))
    }
}
