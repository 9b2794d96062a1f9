use crate::animation::{Clip, Interpolation, Track, TrackProperty};
use crate::error::SignError;
use crate::model::{Avatar, JointPose};
use crate::parser::glb::read_header;
use gltf::animation::util::ReadOutputs;
use nalgebra_glm as glm;

fn node_name(node: &gltf::Node) -> String {
    node.name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("node{}", node.index()))
}

/// Decode the first animation of a GLB into a clip called `name`.
pub fn load_clip(name: &str, bytes: &[u8]) -> Result<Clip, SignError> {
    read_header(bytes)?;
    let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(bytes)?;
    let buffers = gltf::import_buffers(&document, None, blob)?;

    let animation = document
        .animations()
        .next()
        .ok_or_else(|| SignError::new("glb-no-animation").with_arg("clip", name))?;

    let mut tracks = Vec::new();
    for channel in animation.channels() {
        let target = channel.target();
        let property = match target.property() {
            gltf::animation::Property::Translation => TrackProperty::Translation,
            gltf::animation::Property::Rotation => TrackProperty::Rotation,
            gltf::animation::Property::Scale => TrackProperty::Scale,
            // Morph weights have no joint to drive
            gltf::animation::Property::MorphTargetWeights => continue,
        };
        let interpolation = match channel.sampler().interpolation() {
            gltf::animation::Interpolation::Step => Interpolation::Step,
            gltf::animation::Interpolation::Linear => Interpolation::Linear,
            gltf::animation::Interpolation::CubicSpline => Interpolation::CubicSpline,
        };

        let reader = channel.reader(|buffer| Some(&buffers[buffer.index()][..]));
        let Some(inputs) = reader.read_inputs() else {
            continue;
        };
        let times: Vec<f32> = inputs.collect();
        let mut values: Vec<f32> = match reader.read_outputs() {
            Some(ReadOutputs::Translations(iter)) => iter.flatten().collect(),
            Some(ReadOutputs::Rotations(iter)) => iter.into_f32().flatten().collect(),
            Some(ReadOutputs::Scales(iter)) => iter.flatten().collect(),
            _ => continue,
        };

        if interpolation == Interpolation::CubicSpline {
            // Keys are stored as (in-tangent, value, out-tangent)
            let stride = property.stride();
            values = values
                .chunks(stride * 3)
                .filter(|key| key.len() == stride * 3)
                .flat_map(|key| key[stride..stride * 2].to_vec())
                .collect();
        }

        tracks.push(Track::new(
            node_name(&target.node()),
            property,
            interpolation,
            times,
            values,
        ));
    }

    Ok(Clip::new(name, tracks))
}

/// Build an avatar from every named node of a GLB scene.
pub fn load_avatar(name: &str, bytes: &[u8]) -> Result<Avatar, SignError> {
    read_header(bytes)?;
    let gltf = gltf::Gltf::from_slice(bytes)?;

    let joints: Vec<(String, JointPose)> = gltf
        .document
        .nodes()
        .filter(|node| node.name().is_some())
        .map(|node| {
            let (t, r, s) = node.transform().decomposed();
            let pose = JointPose {
                translation: glm::vec3(t[0], t[1], t[2]),
                rotation: glm::quat(r[0], r[1], r[2], r[3]),
                scale: glm::vec3(s[0], s[1], s[2]),
            };
            (node_name(&node), pose)
        })
        .collect();

    if joints.is_empty() {
        return Err(SignError::new("glb-no-joints").with_arg("avatar", name));
    }

    Ok(Avatar::new(name, joints))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::test_support::{build_glb, wave_glb};
    use approx::assert_relative_eq;

    #[test]
    fn clip_takes_tracks_and_duration_from_first_animation() {
        let clip = load_clip("hello", &wave_glb()).unwrap();
        assert_eq!(clip.name, "hello");
        assert_relative_eq!(clip.duration, 1.5);
        assert_eq!(clip.tracks.len(), 1);

        let track = &clip.tracks[0];
        assert_eq!(track.joint, "head");
        assert_eq!(track.property, TrackProperty::Translation);
        assert_relative_eq!(track.sample(0.75).unwrap()[1], 2.1, epsilon = 1e-5);
    }

    #[test]
    fn glb_without_animation_is_an_error() {
        let bytes = build_glb(
            r#"{"asset":{"version":"2.0"},"nodes":[{"name":"head"}]}"#,
            &[],
        );
        assert_eq!(load_clip("think", &bytes).unwrap_err().key, "glb-no-animation");
    }

    #[test]
    fn garbage_fails_at_the_header() {
        assert_eq!(load_clip("yes", b"not a glb at all").unwrap_err().key, "glb-magic");
    }

    #[test]
    fn avatar_uses_named_nodes_and_their_rest_transforms() {
        let avatar = load_avatar("rig", &wave_glb()).unwrap();
        assert_eq!(avatar.name, "rig");
        assert!(!avatar.is_placeholder());
        let head = avatar.joint("head").unwrap();
        assert_relative_eq!(head.rest.translation.y, 1.6);
    }

    #[test]
    fn avatar_without_named_nodes_is_rejected() {
        let bytes = build_glb(r#"{"asset":{"version":"2.0"},"nodes":[{}]}"#, &[]);
        assert_eq!(load_avatar("rig", &bytes).unwrap_err().key, "glb-no-joints");
    }
}
