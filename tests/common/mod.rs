// Shared helpers for the integration test suite

#![allow(dead_code)]

use form_coach::{JointRole, Landmark, Pose, Side};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .init();
    });
}

/// Three landmarks forming `degrees` at the vertex, all with `confidence`
pub fn angle_pose(
    first: JointRole,
    vertex: JointRole,
    last: JointRole,
    degrees: f32,
    confidence: f32,
) -> Pose {
    let radians = degrees.to_radians();
    Pose::new()
        .with(first, Landmark::new(320.0 + 120.0, 240.0, confidence))
        .with(vertex, Landmark::new(320.0, 240.0, confidence))
        .with(
            last,
            Landmark::new(
                320.0 + 120.0 * radians.cos(),
                240.0 + 120.0 * radians.sin(),
                confidence,
            ),
        )
}

/// Arm (shoulder-elbow-wrist) bent to `degrees`
pub fn arm_pose(side: Side, degrees: f32) -> Pose {
    let (shoulder, elbow, wrist) = match side {
        Side::Left => (JointRole::LeftShoulder, JointRole::LeftElbow, JointRole::LeftWrist),
        Side::Right => (JointRole::RightShoulder, JointRole::RightElbow, JointRole::RightWrist),
    };
    angle_pose(shoulder, elbow, wrist, degrees, 0.9)
}

/// Leg (hip-knee-ankle) bent to `degrees`
pub fn leg_pose(side: Side, degrees: f32) -> Pose {
    let (hip, knee, ankle) = match side {
        Side::Left => (JointRole::LeftHip, JointRole::LeftKnee, JointRole::LeftAnkle),
        Side::Right => (JointRole::RightHip, JointRole::RightKnee, JointRole::RightAnkle),
    };
    angle_pose(hip, knee, ankle, degrees, 0.9)
}

/// Body line (shoulder-hip-ankle) at `degrees`
pub fn body_line_pose(side: Side, degrees: f32) -> Pose {
    let (shoulder, hip, ankle) = match side {
        Side::Left => (JointRole::LeftShoulder, JointRole::LeftHip, JointRole::LeftAnkle),
        Side::Right => (JointRole::RightShoulder, JointRole::RightHip, JointRole::RightAnkle),
    };
    angle_pose(shoulder, hip, ankle, degrees, 0.9)
}

/// Torso (shoulder-hip-knee) at `degrees`
pub fn torso_pose(side: Side, degrees: f32) -> Pose {
    let (shoulder, hip, knee) = match side {
        Side::Left => (JointRole::LeftShoulder, JointRole::LeftHip, JointRole::LeftKnee),
        Side::Right => (JointRole::RightShoulder, JointRole::RightHip, JointRole::RightKnee),
    };
    angle_pose(shoulder, hip, knee, degrees, 0.9)
}
