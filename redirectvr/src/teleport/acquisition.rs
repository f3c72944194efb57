use engine::teleport_log;

use crate::targeting::SteeringTarget;

/// Ramps the influence of a steering target in and out over a fixed window
/// instead of snapping when a target appears or disappears.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcquisitionBlend {
    /// Seconds of accumulated acquisition, in `[0, time_to_change]`.
    accumulated_time: f32,
    /// Most recent target; kept while the blend fades out.
    locked_target: Option<SteeringTarget>,
    acquired: bool,
}

impl AcquisitionBlend {
    pub fn update(
        &mut self,
        target: Option<SteeringTarget>,
        delta_time: f32,
        time_to_change: f32,
    ) -> f32 {
        let delta_time = delta_time.max(0.0);
        let time_to_change = time_to_change.max(0.0);

        match target {
            Some(target) => {
                if !self.acquired {
                    teleport_log!(debug, "target acquired: {:?}", target.source);
                }
                self.acquired = true;
                self.locked_target = Some(target);
                self.accumulated_time = (self.accumulated_time + delta_time).min(time_to_change);
            }
            None => {
                if self.acquired {
                    teleport_log!(debug, "target lost");
                }
                self.acquired = false;
                self.accumulated_time = (self.accumulated_time - delta_time).max(0.0);
                if self.accumulated_time <= 0.0 {
                    self.locked_target = None;
                }
            }
        }

        self.weight(time_to_change)
    }

    /// Blend factor in `[0, 1]`.
    pub fn weight(&self, time_to_change: f32) -> f32 {
        if time_to_change <= 0.0 {
            return if self.locked_target.is_some() { 1.0 } else { 0.0 };
        }
        (self.accumulated_time / time_to_change).clamp(0.0, 1.0)
    }

    pub fn locked_target(&self) -> Option<&SteeringTarget> {
        self.locked_target.as_ref()
    }

    pub fn is_acquired(&self) -> bool {
        self.acquired
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
