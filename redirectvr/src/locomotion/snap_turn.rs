use cgmath::Deg;

use crate::{
    config::SnapTurnConfig,
    input_context::{ButtonEdge, ButtonTracker},
};

/// Discrete turn-left / turn-right actions, accumulated until the next
/// physics step drains them.
#[derive(Clone, Debug)]
pub struct SnapTurn {
    config: SnapTurnConfig,
    left: ButtonTracker,
    right: ButtonTracker,
    pending: Deg<f32>,
}

impl SnapTurn {
    pub fn new(config: SnapTurnConfig) -> Self {
        SnapTurn {
            config,
            left: ButtonTracker::default(),
            right: ButtonTracker::default(),
            pending: Deg(0.0),
        }
    }

    pub fn update(&mut self, turn_axis: f32) {
        if !self.config.enabled {
            return;
        }
        let threshold = self.config.threshold;
        let angle = Deg(self.config.angle_degrees);

        if self.left.update(turn_axis <= -threshold) == ButtonEdge::Pressed {
            self.pending += angle;
        }
        if self.right.update(turn_axis >= threshold) == ButtonEdge::Pressed {
            self.pending -= angle;
        }
    }

    /// Yaw to apply, in the body's convention (positive turns left).
    pub fn take(&mut self) -> Deg<f32> {
        std::mem::replace(&mut self.pending, Deg(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_once_per_press() {
        let mut snap = SnapTurn::new(SnapTurnConfig::default());
        for axis in [0.0, -0.9, -1.0, -0.8] {
            snap.update(axis);
        }
        assert_eq!(snap.take(), Deg(30.0));
        assert_eq!(snap.take(), Deg(0.0));

        snap.update(0.0);
        snap.update(0.95);
        assert_eq!(snap.take(), Deg(-30.0));
    }

    #[test]
    fn test_disabled_never_turns() {
        let mut snap = SnapTurn::new(SnapTurnConfig {
            enabled: false,
            ..SnapTurnConfig::default()
        });
        snap.update(-1.0);
        assert_eq!(snap.take(), Deg(0.0));
    }
}
