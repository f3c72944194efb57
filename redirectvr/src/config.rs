use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context, Result};
use cgmath::{vec3, Vector3};
use serde::{Deserialize, Serialize};

use crate::{physics::QueryMask, surface_circle::SurfaceProbe, targeting::SelectionPolicy};

/// Locations searched by [`RedirectConfig::load`] when no path is given.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["redirectvr.toml", ".redirectvr.toml"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementModeKind {
    #[default]
    Continuous,
    Teleport,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectConfig {
    pub mode: MovementModeKind,
    pub targeting: TargetingConfig,
    pub continuous: ContinuousConfig,
    pub teleport: TeleportConfig,
    pub snap_turn: SnapTurnConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingConfig {
    pub max_angle_degrees: f32,
    pub policy: SelectionPolicy,
    /// Fit a circle to the surface ahead when no point of interest is in view.
    pub surface_fallback: bool,
    pub surface_sample_distance: f32,
    pub max_raycast_distance: f32,
    pub query_mask: u32,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        TargetingConfig {
            max_angle_degrees: 45.0,
            policy: SelectionPolicy::Angle,
            surface_fallback: true,
            surface_sample_distance: 0.1,
            max_raycast_distance: 1000.0,
            query_mask: QueryMask::ALL.bits(),
        }
    }
}

impl TargetingConfig {
    pub fn surface_probe(&self) -> SurfaceProbe {
        SurfaceProbe {
            sample_distance: self.surface_sample_distance,
            max_distance: self.max_raycast_distance,
            mask: QueryMask::from_bits_truncate(self.query_mask),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinuousConfig {
    pub max_speed: f32,
    /// Ramp speed by at most `max_acceleration` per second; otherwise the
    /// target speed applies immediately.
    pub limit_acceleration: bool,
    pub max_acceleration: f32,
    /// Blend straight and curved motion by the target's curvature strength
    /// instead of following the curve outright.
    pub blend_by_strength: bool,
}

impl Default for ContinuousConfig {
    fn default() -> Self {
        ContinuousConfig {
            max_speed: 10.0,
            limit_acceleration: true,
            max_acceleration: 10.0,
            blend_by_strength: true,
        }
    }
}

/// Button mapping options for teleport activation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeleportButton {
    #[default]
    Trigger,
    AButton,
    Squeeze,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleportConfig {
    /// Launch speed along the hand's forward direction.
    pub speed: f32,
    pub arc_duration: f32,
    pub segment_count: usize,
    pub use_gravity: bool,
    pub gravity: Vector3<f32>,
    /// Seconds for the target blend to ramp fully in or out.
    pub time_to_change_target_state: f32,
    /// Lift above the hit surface on arrival.
    pub floor_bias: f32,
    /// Player scale applied to the arc's offset from the hand.
    pub scale: f32,
    pub curve_toward_target: bool,
    pub button: TeleportButton,
    pub trigger_threshold: f32,
    pub query_mask: u32,
}

impl Default for TeleportConfig {
    fn default() -> Self {
        TeleportConfig {
            speed: 10.0,
            arc_duration: 3.0,
            segment_count: 60,
            use_gravity: true,
            gravity: vec3(0.0, -9.81, 0.0),
            time_to_change_target_state: 0.25,
            floor_bias: 0.01,
            scale: 1.0,
            curve_toward_target: true,
            button: TeleportButton::Trigger,
            trigger_threshold: 0.5,
            query_mask: (QueryMask::WORLD | QueryMask::TELEPORT_SURFACE).bits(),
        }
    }
}

impl TeleportConfig {
    pub fn effective_gravity(&self) -> Vector3<f32> {
        if self.use_gravity {
            self.gravity
        } else {
            vec3(0.0, 0.0, 0.0)
        }
    }

    pub fn mask(&self) -> QueryMask {
        QueryMask::from_bits_truncate(self.query_mask)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapTurnConfig {
    pub enabled: bool,
    pub angle_degrees: f32,
    /// Thumbstick deflection that counts as a turn press.
    pub threshold: f32,
}

impl Default for SnapTurnConfig {
    fn default() -> Self {
        SnapTurnConfig {
            enabled: true,
            angle_degrees: 30.0,
            threshold: 0.7,
        }
    }
}

impl RedirectConfig {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        match DEFAULT_CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
        {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: RedirectConfig =
            toml::from_str(contents).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.targeting.max_angle_degrees > 0.0 && self.targeting.max_angle_degrees <= 180.0,
            "targeting.max_angle_degrees must be in (0, 180], got {}",
            self.targeting.max_angle_degrees
        );
        ensure!(
            self.continuous.max_speed >= 0.0,
            "continuous.max_speed must not be negative"
        );
        ensure!(
            !self.continuous.limit_acceleration || self.continuous.max_acceleration > 0.0,
            "continuous.max_acceleration must be positive when limit_acceleration is set"
        );
        ensure!(
            self.teleport.segment_count > 0,
            "teleport.segment_count must be at least 1"
        );
        ensure!(
            self.teleport.arc_duration > 0.0,
            "teleport.arc_duration must be positive"
        );
        ensure!(
            self.teleport.scale > 0.0,
            "teleport.scale must be positive"
        );
        ensure!(
            self.teleport.time_to_change_target_state >= 0.0,
            "teleport.time_to_change_target_state must not be negative"
        );
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
