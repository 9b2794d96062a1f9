use crate::animation::TrackProperty;
use crate::animation::interpolation::quat_from_xyzw;
use nalgebra_glm as glm;
use std::collections::HashMap;

pub const PLACEHOLDER_NAME: &str = "placeholder";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointPose {
    pub translation: glm::Vec3,
    pub rotation: glm::Quat,
    pub scale: glm::Vec3,
}

impl Default for JointPose {
    fn default() -> Self {
        Self {
            translation: glm::vec3(0.0, 0.0, 0.0),
            rotation: glm::quat_identity(),
            scale: glm::vec3(1.0, 1.0, 1.0),
        }
    }
}

impl JointPose {
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: glm::vec3(x, y, z),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Joint {
    pub name: String,
    pub rest: JointPose,
    pub pose: JointPose,
}

/// Posable joint set the player animates.
#[derive(Debug, Clone)]
pub struct Avatar {
    pub name: String,
    joints: Vec<Joint>,
    index: HashMap<String, usize>,
    // Procedural rotations composed onto the rest pose after clip sampling
    overrides: HashMap<String, glm::Quat>,
}

impl Avatar {
    pub fn new(name: impl Into<String>, joints: impl IntoIterator<Item = (String, JointPose)>) -> Self {
        let mut avatar = Self {
            name: name.into(),
            joints: Vec::new(),
            index: HashMap::new(),
            overrides: HashMap::new(),
        };
        for (joint_name, rest) in joints {
            // First node wins when a rig repeats a name
            if avatar.index.contains_key(&joint_name) {
                continue;
            }
            avatar.index.insert(joint_name.clone(), avatar.joints.len());
            avatar.joints.push(Joint {
                name: joint_name,
                rest,
                pose: rest,
            });
        }
        avatar
    }

    /// Sphere head on a cylinder body with two cylinder arms.
    pub fn placeholder() -> Self {
        Self::new(
            PLACEHOLDER_NAME,
            [
                ("body".to_string(), JointPose::at(0.0, 1.0, 0.0)),
                ("head".to_string(), JointPose::at(0.0, 1.6, 0.0)),
                ("left_arm".to_string(), JointPose::at(-0.35, 1.2, 0.0)),
                ("right_arm".to_string(), JointPose::at(0.35, 1.2, 0.0)),
            ],
        )
    }

    pub fn is_placeholder(&self) -> bool {
        self.name == PLACEHOLDER_NAME
    }

    pub fn joint(&self, name: &str) -> Option<&Joint> {
        self.index.get(name).map(|&i| &self.joints[i])
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// First candidate name this avatar has a joint for.
    pub fn find_joint<'a>(&self, candidates: &'a [String]) -> Option<&'a str> {
        candidates
            .iter()
            .map(String::as_str)
            .find(|name| self.index.contains_key(*name))
    }

    pub fn reset_pose(&mut self) {
        for joint in &mut self.joints {
            joint.pose = joint.rest;
        }
    }

    /// Write one sampled track value. Unknown joints are ignored.
    pub fn set_property(&mut self, joint: &str, property: TrackProperty, value: &[f32]) {
        let Some(&i) = self.index.get(joint) else {
            return;
        };
        if value.len() < property.stride() {
            return;
        }
        let pose = &mut self.joints[i].pose;
        match property {
            TrackProperty::Translation => pose.translation = glm::vec3(value[0], value[1], value[2]),
            TrackProperty::Rotation => pose.rotation = glm::quat_normalize(&quat_from_xyzw(value)),
            TrackProperty::Scale => pose.scale = glm::vec3(value[0], value[1], value[2]),
        }
    }

    pub fn set_override(&mut self, joint: &str, rotation: glm::Quat) {
        if self.index.contains_key(joint) {
            self.overrides.insert(joint.to_string(), rotation);
        }
    }

    pub fn clear_override(&mut self, joint: &str) {
        self.overrides.remove(joint);
    }

    pub fn apply_overrides(&mut self) {
        for (name, rotation) in &self.overrides {
            if let Some(&i) = self.index.get(name) {
                let joint = &mut self.joints[i];
                joint.pose.rotation = joint.rest.rotation * *rotation;
            }
        }
    }
}

impl Default for Avatar {
    fn default() -> Self {
        Self::placeholder()
    }
}
