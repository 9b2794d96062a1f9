// Interpolation utilities

use nalgebra_glm as glm;

/// Quaternion from glTF component order (x, y, z, w)
pub fn quat_from_xyzw(v: &[f32]) -> glm::Quat {
    glm::quat(v[0], v[1], v[2], v[3])
}

pub fn quat_to_xyzw(q: &glm::Quat) -> [f32; 4] {
    [q.i, q.j, q.k, q.w]
}

/// Rotation of `angle` radians about the Z axis
pub fn quat_about_z(angle: f32) -> glm::Quat {
    glm::quat_angle_axis(angle, &glm::vec3(0.0, 0.0, 1.0))
}

/// Component-wise linear interpolation
pub fn lerp_values(a: &[f32], b: &[f32], t: f32) -> Vec<f32> {
    a.iter().zip(b.iter()).map(|(a, b)| lerp_f32(*a, *b, t)).collect()
}

/// SLERP between two xyzw quaternions
pub fn slerp_values(a: &[f32], b: &[f32], t: f32) -> Vec<f32> {
    let q1 = glm::quat_normalize(&quat_from_xyzw(a));
    let mut q2 = glm::quat_normalize(&quat_from_xyzw(b));
    // Take the short path
    if glm::quat_dot(&q1, &q2) < 0.0 {
        q2 = -q2;
    }
    let result = glm::quat_slerp(&q1, &q2, t);
    quat_to_xyzw(&result).to_vec()
}

/// Linear interpolation for scalars
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
