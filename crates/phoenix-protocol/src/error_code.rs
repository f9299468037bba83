//! Error codes
//!
//! Zero is success, negative values are errors and positive values are
//! warnings. Conversion from an integer never fails: anything not listed
//! here becomes [`ErrorCode::GeneralError`], which callers must read as
//! "unclassified" rather than as a specific fault.

use num_enum::{FromPrimitive, IntoPrimitive};

/// Outcome of a device or API call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum ErrorCode {
    /// No error, function executed as expected
    Okay = 0,

    // CAN
    /// Could not transmit the CAN frame
    TxFailed = -1,
    /// Caller passed an invalid param
    InvalidParamValue = -2,
    /// CAN frame has not been received within the specified period
    RxTimeout = -3,
    /// Not used
    TxTimeout = -4,
    /// Specified CAN id is invalid
    UnexpectedArbId = -5,
    /// Caller attempted to insert data into a buffer that is full
    BufferFull = -6,
    SensorNotPresent = -7,

    /// User specified general error, also the fallback for unknown codes
    #[num_enum(default)]
    GeneralError = -100,

    /// No value response received for signal
    SigNotUpdated = -200,
    NotAllPIDValuesUpdated = -201,

    // API
    WheelRadiusTooSmall = -500,
    TicksPerRevZero = -501,
    DistanceBetweenWheelsTooSmall = -502,
    GainsAreNotSet = -503,

    // Higher level
    IncompatibleMode = -600,
    /// Handle does not match stored map of handles
    InvalidHandle = -601,

    GeneralWarning = 100,
    FeatureNotSupported = 101,
    NotImplemented = 102,
}

impl ErrorCode {
    /// Every defined code, in declaration order
    pub const ALL: [ErrorCode; 20] = [
        ErrorCode::Okay,
        ErrorCode::TxFailed,
        ErrorCode::InvalidParamValue,
        ErrorCode::RxTimeout,
        ErrorCode::TxTimeout,
        ErrorCode::UnexpectedArbId,
        ErrorCode::BufferFull,
        ErrorCode::SensorNotPresent,
        ErrorCode::GeneralError,
        ErrorCode::SigNotUpdated,
        ErrorCode::NotAllPIDValuesUpdated,
        ErrorCode::WheelRadiusTooSmall,
        ErrorCode::TicksPerRevZero,
        ErrorCode::DistanceBetweenWheelsTooSmall,
        ErrorCode::GainsAreNotSet,
        ErrorCode::IncompatibleMode,
        ErrorCode::InvalidHandle,
        ErrorCode::GeneralWarning,
        ErrorCode::FeatureNotSupported,
        ErrorCode::NotImplemented,
    ];

    /// Integer value as reported by firmware
    pub fn value(self) -> i32 {
        self.into()
    }

    pub fn is_ok(self) -> bool {
        self == ErrorCode::Okay
    }

    pub fn is_error(self) -> bool {
        self.value() < 0
    }

    pub fn is_warning(self) -> bool {
        self.value() > 0
    }

    /// Short human readable description
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::Okay => "No error",
            ErrorCode::TxFailed => "Could not transmit the CAN frame",
            ErrorCode::InvalidParamValue => "Caller passed an invalid param",
            ErrorCode::RxTimeout => "CAN frame was not received within the specified period",
            ErrorCode::TxTimeout => "CAN transmit timed out",
            ErrorCode::UnexpectedArbId => "Specified CAN id is invalid",
            ErrorCode::BufferFull => "Buffer is full",
            ErrorCode::SensorNotPresent => "Sensor is not present",
            ErrorCode::GeneralError => "General error",
            ErrorCode::SigNotUpdated => "No value response received for signal",
            ErrorCode::NotAllPIDValuesUpdated => "Not all PID values were updated",
            ErrorCode::WheelRadiusTooSmall => "Wheel radius is too small",
            ErrorCode::TicksPerRevZero => "Ticks per revolution is zero",
            ErrorCode::DistanceBetweenWheelsTooSmall => "Distance between wheels is too small",
            ErrorCode::GainsAreNotSet => "Gains are not set",
            ErrorCode::IncompatibleMode => "Incompatible mode",
            ErrorCode::InvalidHandle => "Handle does not match a known device",
            ErrorCode::GeneralWarning => "General warning",
            ErrorCode::FeatureNotSupported => "Feature not supported",
            ErrorCode::NotImplemented => "Not implemented",
        }
    }
}

impl Default for ErrorCode {
    fn default() -> Self {
        ErrorCode::Okay
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} ({})", self, self.value())
    }
}
