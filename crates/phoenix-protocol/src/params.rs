//! Configuration parameter identifiers for generic signal access.

use crate::ProtocolError;
use num_enum::{IntoPrimitive, TryFromPrimitive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum ParamEnum {
    OnBootBrakeMode = 31,
    QuadFilterEn = 91,

    StatusFramePeriod = 300,
    OpenloopRamp = 301,
    ClosedloopRamp = 302,
    NeutralDeadband = 303,
    PeakPosOutput = 305,
    NominalPosOutput = 306,
    PeakNegOutput = 307,
    NominalNegOutput = 308,

    ProfileParamSlotP = 310,
    ProfileParamSlotI = 311,
    ProfileParamSlotD = 312,
    ProfileParamSlotF = 313,
    ProfileParamSlotIZone = 314,
    ProfileParamSlotAllowableErr = 315,
    ProfileParamSlotMaxIAccum = 316,

    ClearPositionOnLimitF = 320,
    ClearPositionOnLimitR = 321,
    ClearPositionOnQuadIdx = 322,

    SampleVelocityPeriod = 325,
    SampleVelocityWindow = 326,

    FeedbackSensorType = 330,
    SelectedSensorPosition = 331,
    FeedbackNotContinuous = 332,

    ForwardSoftLimitThreshold = 340,
    ReverseSoftLimitThreshold = 341,
    ForwardSoftLimitEnable = 342,
    ReverseSoftLimitEnable = 343,

    NominalBatteryVoltage = 350,
    BatteryVoltageFilterSize = 351,

    ContinuousCurrentLimitAmps = 360,
    ContinuousCurrentLimitMs = 361,
    PeakCurrentLimitAmps = 362,

    ClosedLoopIAccum = 370,

    CustomParam = 380,

    StickyFaults = 390,

    AnalogPosition = 400,
    QuadraturePosition = 401,
    PulseWidthPosition = 402,

    MotMagAccel = 410,
    MotMagVelCruise = 411,

    /// Ordinal selects forward (0) or reverse (1)
    LimitSwitchSelect = 421,
    LimitSwitchNormClosed = 422,
    LimitSwitchDisabled = 423,
    LimitSwitchDisableNeutralOnLos = 424,

    LimitRemoteFilterIdValue = 430,
    LimitRemoteFilterIdMask = 431,
    LimitRemoteFilterBitPos = 432,
    LimitRemoteFilterTimeoutMs = 433,
}

impl ParamEnum {
    pub fn value(self) -> u32 {
        self.into()
    }

    pub fn from_code(code: u32) -> Result<Self, ProtocolError> {
        Self::try_from(code).map_err(|e| ProtocolError::invalid("ParamEnum", e.number))
    }
}
