//! Collaborator seam for the robot SDK.
//!
//! The real connection handshake belongs to whatever drives the relay; the
//! relay itself only needs one status snapshot per polling cycle, so the seam
//! is a single `poll`. Sensors that did not report this cycle are `None`, not
//! zero.

use rand::Rng;

use crate::errors::Result;

/// Status word bits as reported by the robot.
pub mod status {
    pub const IS_MOVING: u32 = 0x1;
    pub const IS_CARRYING_BLOCK: u32 = 0x2;
    pub const IS_PICKING_OR_PLACING: u32 = 0x4;
    pub const IS_PICKED_UP: u32 = 0x8;
    pub const IS_BUTTON_PRESSED: u32 = 0x10;
    pub const IS_FALLING: u32 = 0x20;
    pub const IS_ANIMATING: u32 = 0x40;
    pub const IS_PATHING: u32 = 0x80;
    pub const LIFT_IN_POS: u32 = 0x100;
    pub const HEAD_IN_POS: u32 = 0x200;
    pub const CALM_POWER_MODE: u32 = 0x400;
    pub const IS_BATTERY_DISCONNECTED: u32 = 0x800;
    pub const IS_ON_CHARGER: u32 = 0x1000;
    pub const IS_CHARGING: u32 = 0x2000;
    pub const CLIFF_DETECTED: u32 = 0x4000;
    pub const ARE_WHEELS_MOVING: u32 = 0x8000;
    pub const IS_BEING_HELD: u32 = 0x10000;
    pub const IS_MOTION_DETECTED: u32 = 0x20000;
    pub const IS_BATTERY_OVERHEATED: u32 = 0x40000;
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    /// Localization origin this pose is expressed in.
    pub origin_id: u32,
}

impl Pose {
    /// Poses are only comparable within one localization origin; the robot
    /// re-origins after being picked up or delocalized.
    pub fn is_comparable(&self, other: &Pose) -> bool {
        self.origin_id == other.origin_id
    }
}

#[derive(Debug, Clone)]
pub struct BatteryState {
    pub volts: f64,
    pub level: f64,
}

#[derive(Debug, Clone)]
pub struct TouchReading {
    pub raw_value: f64,
    pub is_touched: bool,
}

/// Everything the robot reported for one polling cycle.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub status: u32,
    pub battery: Option<BatteryState>,
    pub left_wheel_speed_mmps: Option<f64>,
    pub right_wheel_speed_mmps: Option<f64>,
    pub gyro: Option<Vec3>,
    pub accel: Option<Vec3>,
    pub pose: Option<Pose>,
    pub touch: Option<TouchReading>,
    pub obstacle_distance_mm: Option<f64>,
}

impl Snapshot {
    pub fn has(&self, bit: u32) -> bool {
        self.status & bit != 0
    }
}

/// Polling source the relay reads from once per cycle.
pub trait DeviceSource {
    fn poll(&mut self) -> Result<Snapshot>;
}

/// Stand-in for a real robot: produces plausible readings, with sensors
/// occasionally dropping out so absence paths get exercised end to end.
pub struct SimulatedDevice {
    origin_id: u32,
    position: Vec3,
}

impl SimulatedDevice {
    pub fn new() -> Self {
        Self {
            origin_id: 1,
            position: Vec3::default(),
        }
    }
}

impl Default for SimulatedDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceSource for SimulatedDevice {
    fn poll(&mut self) -> Result<Snapshot> {
        let mut rng = rand::thread_rng();

        // Wander a few mm per cycle; 5% of cycles the robot delocalizes and
        // starts a new origin, making the pose incomparable to the last one.
        self.position.x += rng.gen_range(-5.0..5.0);
        self.position.y += rng.gen_range(-5.0..5.0);
        if rng.gen_bool(0.05) {
            self.origin_id += 1;
        }

        let mut status = 0u32;
        if rng.gen_bool(0.3) {
            status |= status::IS_MOVING | status::ARE_WHEELS_MOVING;
        }
        if rng.gen_bool(0.4) {
            status |= status::IS_ON_CHARGER | status::IS_CHARGING;
        }
        if rng.gen_bool(0.2) {
            status |= status::CALM_POWER_MODE;
        }

        let moving = status & status::ARE_WHEELS_MOVING != 0;
        let speed = if moving { rng.gen_range(10.0..220.0) } else { 0.0 };

        Ok(Snapshot {
            status,
            battery: Some(BatteryState {
                volts: rng.gen_range(3.6..4.2),
                level: rng.gen_range(1.0..3.0_f64).floor(),
            }),
            left_wheel_speed_mmps: Some(speed),
            right_wheel_speed_mmps: Some(speed),
            gyro: Some(Vec3 {
                x: rng.gen_range(-0.1..0.1),
                y: rng.gen_range(-0.1..0.1),
                z: rng.gen_range(-0.1..0.1),
            }),
            accel: Some(Vec3 {
                x: rng.gen_range(-100.0..100.0),
                y: rng.gen_range(-100.0..100.0),
                z: rng.gen_range(9000.0..10000.0),
            }),
            pose: Some(Pose {
                position: self.position,
                origin_id: self.origin_id,
            }),
            touch: if rng.gen_bool(0.9) {
                Some(TouchReading {
                    raw_value: rng.gen_range(2000.0..6000.0),
                    is_touched: rng.gen_bool(0.1),
                })
            } else {
                None
            },
            obstacle_distance_mm: if rng.gen_bool(0.8) {
                Some(rng.gen_range(30.0..400.0))
            } else {
                None
            },
        })
    }
}
