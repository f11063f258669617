//! Traversal tuning resource.
//!
//! Holds every tunable of the ledge controller. Values start from safe
//! defaults and can be overridden from an INI file; missing keys keep their
//! current value.
//!
//! # Configuration File Format
//!
//! ```ini
//! [probe]
//! radius = 20
//! forward_start_offset = 1
//! forward_reach_scale = 1
//!
//! [ledge]
//! climbing_front_offset = 50
//! elevated_lift_height = 150
//! vertical_acceptance_height = 100
//! elevated_probe_origin = pelvis
//! pelvis_socket = pelvis
//!
//! [alignment]
//! wall_standoff = 10
//! capsule_half_height = 94
//! duration = 0.2
//! ease_in = true
//! ease_out = true
//! sweep = true
//! sweep_radius = 10
//!
//! [animation]
//! hang_montage = Hang
//! climb_up_montage =
//! drop_down_montage =
//! climb_finished_notify = ClimbUpFinished
//!
//! [locomotion]
//! walk_speed = 500
//! jump_velocity = 700
//! gravity = -980
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::components::tween::Easing;
use crate::resources::collision::CollisionChannel;

const DEFAULT_PROBE_RADIUS: f32 = 20.0;
const DEFAULT_FORWARD_START_OFFSET: f32 = 1.0;
const DEFAULT_FORWARD_REACH_SCALE: f32 = 1.0;
const DEFAULT_CLIMBING_FRONT_OFFSET: f32 = 50.0;
const DEFAULT_ELEVATED_LIFT_HEIGHT: f32 = 150.0;
const DEFAULT_VERTICAL_ACCEPTANCE_HEIGHT: f32 = 100.0;
const DEFAULT_PELVIS_SOCKET: &str = "pelvis";
const DEFAULT_WALL_STANDOFF: f32 = 10.0;
const DEFAULT_CAPSULE_HALF_HEIGHT: f32 = 94.0;
const DEFAULT_ALIGNMENT_DURATION: f32 = 0.2;
const DEFAULT_ALIGNMENT_SWEEP_RADIUS: f32 = 10.0;
const DEFAULT_HANG_MONTAGE: &str = "Hang";
const DEFAULT_CLIMB_FINISHED_NOTIFY: &str = "ClimbUpFinished";
const DEFAULT_WALK_SPEED: f32 = 500.0;
const DEFAULT_JUMP_VELOCITY: f32 = 700.0;
const DEFAULT_GRAVITY: f32 = -980.0;
const DEFAULT_CONFIG_PATH: &str = "./traversal.ini";

/// Errors raised while loading or saving a [`TraversalConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file {path:?}: {reason}")]
    Load { path: PathBuf, reason: String },
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("invalid value for [{section}] {key}: {reason}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        reason: String,
    },
    #[error("failed to save config file {path:?}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which point the elevated ledge probe is swept from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElevatedProbeOrigin {
    /// The pelvis reference point.
    #[default]
    Pelvis,
    /// The character root; the pelvis is then only used by the acceptance test.
    Root,
}

impl ElevatedProbeOrigin {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pelvis" => Some(ElevatedProbeOrigin::Pelvis),
            "root" => Some(ElevatedProbeOrigin::Root),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ElevatedProbeOrigin::Pelvis => "pelvis",
            ElevatedProbeOrigin::Root => "root",
        }
    }
}

/// Traversal tuning, loaded once at startup.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TraversalConfig {
    /// Radius of the probe sphere.
    pub probe_radius: f32,
    /// Channel the probes sweep against.
    pub probe_channel: CollisionChannel,
    /// Distance in front of the root where the forward probe starts.
    pub forward_start_offset: f32,
    /// Multiplier applied to the forward probe's end distance.
    pub forward_reach_scale: f32,
    /// Forward distance of both probes.
    pub climbing_front_offset: f32,
    /// Height above the probe origin where the elevated probe starts.
    pub elevated_lift_height: f32,
    /// Largest accepted `|pelvis.z - ledge.z|`.
    pub vertical_acceptance_height: f32,
    pub elevated_probe_origin: ElevatedProbeOrigin,
    /// Socket resolved as the pelvis reference point.
    pub pelvis_socket: String,
    /// Distance kept between the wall contact and the aligned character.
    pub wall_standoff: f32,
    /// Subtracted from the ledge height to place the aligned capsule.
    pub capsule_half_height: f32,
    /// Length of the move-to-ledge transition in seconds.
    pub alignment_duration: f32,
    pub alignment_ease_in: bool,
    pub alignment_ease_out: bool,
    /// Whether the alignment move is stopped by blocking geometry.
    pub alignment_sweep: bool,
    pub alignment_sweep_radius: f32,
    /// Montage held on its first frame while hanging. `None` skips the pose.
    pub hang_montage: Option<String>,
    pub climb_up_montage: Option<String>,
    pub drop_down_montage: Option<String>,
    /// Montage notify that ends a climb-up or drop-down.
    pub climb_finished_notify: String,
    pub walk_speed: f32,
    pub jump_velocity: f32,
    /// Vertical gravity acceleration (negative is down).
    pub gravity: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TraversalConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            probe_radius: DEFAULT_PROBE_RADIUS,
            probe_channel: CollisionChannel::Visibility,
            forward_start_offset: DEFAULT_FORWARD_START_OFFSET,
            forward_reach_scale: DEFAULT_FORWARD_REACH_SCALE,
            climbing_front_offset: DEFAULT_CLIMBING_FRONT_OFFSET,
            elevated_lift_height: DEFAULT_ELEVATED_LIFT_HEIGHT,
            vertical_acceptance_height: DEFAULT_VERTICAL_ACCEPTANCE_HEIGHT,
            elevated_probe_origin: ElevatedProbeOrigin::Pelvis,
            pelvis_socket: DEFAULT_PELVIS_SOCKET.to_string(),
            wall_standoff: DEFAULT_WALL_STANDOFF,
            capsule_half_height: DEFAULT_CAPSULE_HALF_HEIGHT,
            alignment_duration: DEFAULT_ALIGNMENT_DURATION,
            alignment_ease_in: true,
            alignment_ease_out: true,
            alignment_sweep: true,
            alignment_sweep_radius: DEFAULT_ALIGNMENT_SWEEP_RADIUS,
            hang_montage: Some(DEFAULT_HANG_MONTAGE.to_string()),
            climb_up_montage: None,
            drop_down_montage: None,
            climb_finished_notify: DEFAULT_CLIMB_FINISHED_NOTIFY.to_string(),
            walk_speed: DEFAULT_WALK_SPEED,
            jump_velocity: DEFAULT_JUMP_VELOCITY,
            gravity: DEFAULT_GRAVITY,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a default configuration bound to a custom file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Easing curve for the alignment move.
    pub fn alignment_easing(&self) -> Easing {
        Easing::from_flags(self.alignment_ease_in, self.alignment_ease_out)
    }

    /// Load overrides from [`Self::config_path`].
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.load(&self.config_path).map_err(|reason| ConfigError::Load {
            path: self.config_path.clone(),
            reason,
        })?;
        self.apply(&ini)?;
        info!(
            "Loaded traversal config from {:?}: front_offset={}, acceptance={}, lift={}, standoff={}, duration={}s",
            self.config_path,
            self.climbing_front_offset,
            self.vertical_acceptance_height,
            self.elevated_lift_height,
            self.wall_standoff,
            self.alignment_duration
        );
        Ok(())
    }

    /// Load overrides from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.read(text.to_string()).map_err(ConfigError::Parse)?;
        self.apply(&ini)
    }

    fn apply(&mut self, ini: &Ini) -> Result<(), ConfigError> {
        // [probe]
        set_float(ini, "probe", "radius", &mut self.probe_radius)?;
        set_float(
            ini,
            "probe",
            "forward_start_offset",
            &mut self.forward_start_offset,
        )?;
        set_float(
            ini,
            "probe",
            "forward_reach_scale",
            &mut self.forward_reach_scale,
        )?;

        // [ledge]
        set_float(
            ini,
            "ledge",
            "climbing_front_offset",
            &mut self.climbing_front_offset,
        )?;
        set_float(
            ini,
            "ledge",
            "elevated_lift_height",
            &mut self.elevated_lift_height,
        )?;
        set_float(
            ini,
            "ledge",
            "vertical_acceptance_height",
            &mut self.vertical_acceptance_height,
        )?;
        if let Some(origin) = ini.get("ledge", "elevated_probe_origin") {
            self.elevated_probe_origin =
                ElevatedProbeOrigin::parse(&origin).ok_or_else(|| ConfigError::InvalidValue {
                    section: "ledge",
                    key: "elevated_probe_origin",
                    reason: format!("expected 'pelvis' or 'root', got '{origin}'"),
                })?;
        }
        if let Some(socket) = ini.get("ledge", "pelvis_socket") {
            self.pelvis_socket = socket;
        }

        // [alignment]
        set_float(ini, "alignment", "wall_standoff", &mut self.wall_standoff)?;
        set_float(
            ini,
            "alignment",
            "capsule_half_height",
            &mut self.capsule_half_height,
        )?;
        set_float(ini, "alignment", "duration", &mut self.alignment_duration)?;
        set_bool(ini, "alignment", "ease_in", &mut self.alignment_ease_in)?;
        set_bool(ini, "alignment", "ease_out", &mut self.alignment_ease_out)?;
        set_bool(ini, "alignment", "sweep", &mut self.alignment_sweep)?;
        set_float(
            ini,
            "alignment",
            "sweep_radius",
            &mut self.alignment_sweep_radius,
        )?;

        // [animation]
        set_optional_name(ini, "animation", "hang_montage", &mut self.hang_montage);
        set_optional_name(
            ini,
            "animation",
            "climb_up_montage",
            &mut self.climb_up_montage,
        );
        set_optional_name(
            ini,
            "animation",
            "drop_down_montage",
            &mut self.drop_down_montage,
        );
        if let Some(notify) = ini.get("animation", "climb_finished_notify") {
            self.climb_finished_notify = notify;
        }

        // [locomotion]
        set_float(ini, "locomotion", "walk_speed", &mut self.walk_speed)?;
        set_float(ini, "locomotion", "jump_velocity", &mut self.jump_velocity)?;
        set_float(ini, "locomotion", "gravity", &mut self.gravity)?;

        self.validate()
    }

    /// Reject values the controller cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative: [(&'static str, &'static str, f32); 6] = [
            ("probe", "radius", self.probe_radius),
            ("ledge", "vertical_acceptance_height", self.vertical_acceptance_height),
            ("ledge", "elevated_lift_height", self.elevated_lift_height),
            ("alignment", "duration", self.alignment_duration),
            ("alignment", "sweep_radius", self.alignment_sweep_radius),
            ("locomotion", "walk_speed", self.walk_speed),
        ];
        for (section, key, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::InvalidValue {
                    section,
                    key,
                    reason: format!("must be a non-negative number, got {value}"),
                });
            }
        }
        Ok(())
    }

    /// Save the configuration to [`Self::config_path`].
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        self.to_ini()
            .write(&self.config_path)
            .map_err(|source| ConfigError::Save {
                path: self.config_path.clone(),
                source,
            })?;
        info!("Saved traversal config to {:?}", self.config_path);
        Ok(())
    }

    /// Render the configuration as INI text.
    pub fn to_ini_string(&self) -> String {
        self.to_ini().writes()
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        let mut put = |section: &str, key: &str, value: String| {
            ini.set(section, key, Some(value));
        };

        put("probe", "radius", self.probe_radius.to_string());
        put(
            "probe",
            "forward_start_offset",
            self.forward_start_offset.to_string(),
        );
        put(
            "probe",
            "forward_reach_scale",
            self.forward_reach_scale.to_string(),
        );

        put(
            "ledge",
            "climbing_front_offset",
            self.climbing_front_offset.to_string(),
        );
        put(
            "ledge",
            "elevated_lift_height",
            self.elevated_lift_height.to_string(),
        );
        put(
            "ledge",
            "vertical_acceptance_height",
            self.vertical_acceptance_height.to_string(),
        );
        put(
            "ledge",
            "elevated_probe_origin",
            self.elevated_probe_origin.as_str().to_string(),
        );
        put("ledge", "pelvis_socket", self.pelvis_socket.clone());

        put("alignment", "wall_standoff", self.wall_standoff.to_string());
        put(
            "alignment",
            "capsule_half_height",
            self.capsule_half_height.to_string(),
        );
        put("alignment", "duration", self.alignment_duration.to_string());
        put("alignment", "ease_in", self.alignment_ease_in.to_string());
        put("alignment", "ease_out", self.alignment_ease_out.to_string());
        put("alignment", "sweep", self.alignment_sweep.to_string());
        put(
            "alignment",
            "sweep_radius",
            self.alignment_sweep_radius.to_string(),
        );

        put(
            "animation",
            "hang_montage",
            self.hang_montage.clone().unwrap_or_default(),
        );
        put(
            "animation",
            "climb_up_montage",
            self.climb_up_montage.clone().unwrap_or_default(),
        );
        put(
            "animation",
            "drop_down_montage",
            self.drop_down_montage.clone().unwrap_or_default(),
        );
        put(
            "animation",
            "climb_finished_notify",
            self.climb_finished_notify.clone(),
        );

        put("locomotion", "walk_speed", self.walk_speed.to_string());
        put("locomotion", "jump_velocity", self.jump_velocity.to_string());
        put("locomotion", "gravity", self.gravity.to_string());

        ini
    }
}

/// Resolve the config path: an explicit one, or the default if it exists.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            default.exists().then_some(default)
        }
    }
}

fn set_float(
    ini: &Ini,
    section: &'static str,
    key: &'static str,
    target: &mut f32,
) -> Result<(), ConfigError> {
    match ini.getfloat(section, key) {
        Ok(Some(value)) => {
            *target = value as f32;
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(reason) => Err(ConfigError::InvalidValue {
            section,
            key,
            reason,
        }),
    }
}

fn set_bool(
    ini: &Ini,
    section: &'static str,
    key: &'static str,
    target: &mut bool,
) -> Result<(), ConfigError> {
    match ini.getbool(section, key) {
        Ok(Some(value)) => {
            *target = value;
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(reason) => Err(ConfigError::InvalidValue {
            section,
            key,
            reason,
        }),
    }
}

/// Present-but-empty keys clear an optional asset name.
fn set_optional_name(ini: &Ini, section: &str, key: &str, target: &mut Option<String>) {
    if let Some(value) = ini.get(section, key) {
        let value = value.trim();
        *target = (!value.is_empty()).then(|| value.to_string());
    }
}
