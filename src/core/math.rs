//! Float Math Helpers
//!
//! Small interpolation and orientation helpers on top of `glam`.
//! Conventions: +Y is up, +Z is forward, angles in degrees at the API
//! boundary and radians internally.

use glam::{EulerRot, Mat3, Quat, Vec2, Vec3};

/// Clamp a blend factor into `[0, 1]`.
#[inline]
pub fn clamp01(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Linear interpolation with a clamped factor.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * clamp01(t)
}

/// Vector linear interpolation with a clamped factor.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a.lerp(b, clamp01(t))
}

/// Drop the vertical component and renormalize.
///
/// Returns `Vec3::ZERO` for vertical (or zero) input.
#[inline]
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

/// Horizontal part of a velocity (y zeroed, not normalized).
#[inline]
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Rotation whose +Z axis points along `forward`, keeping +Y as up.
///
/// Falls back to identity when `forward` is zero, and to a rotation about
/// X when `forward` is parallel to up.
pub fn look_rotation(forward: Vec3) -> Quat {
    let f = forward.normalize_or_zero();
    if f == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let right = Vec3::Y.cross(f);
    if right.length_squared() < 1e-8 {
        return Quat::from_rotation_arc(Vec3::Z, f);
    }
    let right = right.normalize();
    let up = f.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, f)).normalize()
}

/// Rotate `current` toward `target` by a clamped slerp factor.
#[inline]
pub fn slerp_toward(current: Quat, target: Quat, t: f32) -> Quat {
    current.slerp(target, clamp01(t)).normalize()
}

/// Rotation from pitch/yaw/roll in degrees, applied roll, then pitch, then yaw.
#[inline]
pub fn euler_degrees(pitch: f32, yaw: f32, roll: f32) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        yaw.to_radians(),
        pitch.to_radians(),
        roll.to_radians(),
    )
}

/// Normalize a raw 2D axis pair (zero stays zero).
#[inline]
pub fn normalize_axes(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y).normalize_or_zero()
}

/// Critically damped approach of `current` toward `target`.
///
/// `velocity` carries state between calls. Never overshoots the target.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    // Overshoot clamp
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }
    output
}

/// Vector form of [`smooth_damp`].
pub fn smooth_damp_vec3(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    if (target - current).dot(output - target) > 0.0 {
        output = target;
        *velocity = Vec3::ZERO;
    }
    output
}
