//! Pure transform from a device snapshot to named samples.
//!
//! No network state lives here. Absent readings stay absent; they are never
//! coerced to zero, because 0.0 is a legitimate speed, level, or distance.

use crate::device::{status, Pose, Snapshot};

/// One named observation for the cycle; `None` means the sensor did not
/// report.
pub type Sample = (&'static str, Option<f64>);

/// Named predicate over a snapshot. Kept as plain data so either a raw status
/// word or boolean SDK attributes can back the same table.
pub struct StateCheck {
    pub name: &'static str,
    pub active: fn(&Snapshot) -> bool,
}

/// Ordered checks; the order here is the order states appear in the
/// `currentstate` tag string.
pub const STATE_CHECKS: &[StateCheck] = &[
    StateCheck { name: "IS_MOVING", active: |s| s.has(status::IS_MOVING) },
    StateCheck { name: "IS_CARRYING_BLOCK", active: |s| s.has(status::IS_CARRYING_BLOCK) },
    StateCheck { name: "IS_PICKING_OR_PLACING", active: |s| s.has(status::IS_PICKING_OR_PLACING) },
    StateCheck { name: "IS_PICKED_UP", active: |s| s.has(status::IS_PICKED_UP) },
    StateCheck { name: "IS_BUTTON_PRESSED", active: |s| s.has(status::IS_BUTTON_PRESSED) },
    StateCheck { name: "IS_FALLING", active: |s| s.has(status::IS_FALLING) },
    StateCheck { name: "IS_ANIMATING", active: |s| s.has(status::IS_ANIMATING) },
    StateCheck { name: "IS_PATHING", active: |s| s.has(status::IS_PATHING) },
    StateCheck { name: "LIFT_IN_POS", active: |s| s.has(status::LIFT_IN_POS) },
    StateCheck { name: "HEAD_IN_POS", active: |s| s.has(status::HEAD_IN_POS) },
    StateCheck { name: "CALM_POWER_MODE", active: |s| s.has(status::CALM_POWER_MODE) },
    StateCheck { name: "IS_BATTERY_DISCONNECTED", active: |s| s.has(status::IS_BATTERY_DISCONNECTED) },
    StateCheck { name: "IS_ON_CHARGER", active: |s| s.has(status::IS_ON_CHARGER) },
    StateCheck { name: "IS_CHARGING", active: |s| s.has(status::IS_CHARGING) },
    StateCheck { name: "CLIFF_DETECTED", active: |s| s.has(status::CLIFF_DETECTED) },
    StateCheck { name: "ARE_WHEELS_MOVING", active: |s| s.has(status::ARE_WHEELS_MOVING) },
    StateCheck { name: "IS_BEING_HELD", active: |s| s.has(status::IS_BEING_HELD) },
    StateCheck { name: "IS_MOTION_DETECTED", active: |s| s.has(status::IS_MOTION_DETECTED) },
    StateCheck { name: "IS_BATTERY_OVERHEATED", active: |s| s.has(status::IS_BATTERY_OVERHEATED) },
];

/// Names of the states active in this snapshot, in table order.
pub fn active_states(snapshot: &Snapshot) -> Vec<&'static str> {
    STATE_CHECKS
        .iter()
        .filter(|check| (check.active)(snapshot))
        .map(|check| check.name)
        .collect()
}

/// Tag string for the synthetic `currentstate` point: one ` NAME=1` token per
/// active state, leading space included. `None` when no state is active.
pub fn state_tag(states: &[&str]) -> Option<String> {
    if states.is_empty() {
        return None;
    }
    let mut tag = String::new();
    for state in states {
        tag.push(' ');
        tag.push_str(state);
        tag.push_str("=1");
    }
    Some(tag)
}

/// Straight-line distance between two poses, in mm. Absent unless both poses
/// exist and share a localization origin.
pub fn distance_travelled(previous: Option<&Pose>, current: Option<&Pose>) -> Option<f64> {
    let previous = previous?;
    let current = current?;
    if !current.is_comparable(previous) {
        return None;
    }
    let prev = &previous.position;
    let cur = &current.position;
    Some(
        ((cur.x - prev.x).powi(2) + (cur.y - prev.y).powi(2) + (cur.z - prev.z).powi(2)).sqrt(),
    )
}

/// Gather every metric for one cycle, in a fixed emission order.
///
/// `previous_pose` is the pose from the last cycle, used only for the derived
/// distance metric.
pub fn collect(snapshot: &Snapshot, previous_pose: Option<&Pose>) -> Vec<Sample> {
    let battery = snapshot.battery.as_ref();
    let touch = snapshot.touch.as_ref();

    let mut samples: Vec<Sample> = vec![
        ("robot.batteryvolts", battery.map(|b| b.volts)),
        ("robot.batterylevel", battery.map(|b| b.level)),
        ("robot.rspeed", snapshot.right_wheel_speed_mmps),
        ("robot.lspeed", snapshot.left_wheel_speed_mmps),
        (
            "robot.distance",
            distance_travelled(previous_pose, snapshot.pose.as_ref()),
        ),
        (
            "robot.touch.isTouched",
            touch.map(|t| if t.is_touched { 1.0 } else { 0.0 }),
        ),
        ("robot.touch.rawTouchValue", touch.map(|t| t.raw_value)),
        ("robot.obstacleDistance", snapshot.obstacle_distance_mm),
    ];

    if let Some(gyro) = snapshot.gyro {
        samples.push(("robot.gyro.x", Some(gyro.x)));
        samples.push(("robot.gyro.y", Some(gyro.y)));
        samples.push(("robot.gyro.z", Some(gyro.z)));
    }
    if let Some(accel) = snapshot.accel {
        samples.push(("robot.accel.x", Some(accel.x)));
        samples.push(("robot.accel.y", Some(accel.y)));
        samples.push(("robot.accel.z", Some(accel.z)));
    }

    samples
}
