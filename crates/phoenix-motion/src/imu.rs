//! Heading source consumed by the servo loops

use phoenix_hal::{PigeonBackend, PigeonImu};
use phoenix_protocol::PigeonState;

pub trait Imu {
    /// Heading (yaw) in degrees
    fn heading(&self) -> f64;

    /// Heading rate in degrees per second
    fn angular_rate(&self) -> f64;

    fn state(&self) -> PigeonState;

    /// Only a `Ready` sensor delivers usable heading data
    fn is_ready(&self) -> bool {
        self.state().is_ready()
    }
}

impl<B: PigeonBackend> Imu for PigeonImu<B> {
    fn heading(&self) -> f64 {
        self.yaw_pitch_roll()[0]
    }

    fn angular_rate(&self) -> f64 {
        self.raw_gyro()[2]
    }

    fn state(&self) -> PigeonState {
        PigeonImu::state(self)
    }
}

impl<I: Imu + ?Sized> Imu for &I {
    fn heading(&self) -> f64 {
        (**self).heading()
    }

    fn angular_rate(&self) -> f64 {
        (**self).angular_rate()
    }

    fn state(&self) -> PigeonState {
        (**self).state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phoenix_hal::mock::MockPigeonBackend;

    #[test]
    fn test_pigeon_as_imu() {
        let backend = MockPigeonBackend::new();
        let firmware = backend.clone();
        let pigeon = PigeonImu::new(backend, 1);

        firmware.set_heading(45.0, 2.5);
        assert_eq!(pigeon.heading(), 45.0);
        assert_eq!(pigeon.angular_rate(), 2.5);
        assert!(!Imu::is_ready(&pigeon));

        firmware.set_state(PigeonState::Ready);
        assert!(Imu::is_ready(&pigeon));
    }
}
