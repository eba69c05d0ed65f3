use steer_core::{Manipulator, Transform, Vec3};

#[test]
fn transform_ignores_degenerate_orientation_updates() {
    let mut body = Transform::at(Vec3::new(1.0, 0.0, 2.0));
    let before = body.forward();

    body.rotate_to(Vec3::ZERO);
    body.set_normal(Vec3::ZERO);
    body.set_position(Vec3::new(f32::NAN, 0.0, 0.0));

    assert_eq!(body.forward(), before);
    assert_eq!(body.normal, Vec3::UP);
    assert_eq!(body.position(), Vec3::new(1.0, 0.0, 2.0));
}

#[test]
fn transform_normalizes_facing() {
    let body = Transform::default().facing(Vec3::new(5.0, 0.0, 0.0));
    assert_eq!(body.forward(), Vec3::X);
}

#[cfg(feature = "serde")]
#[test]
fn transform_serializes_with_serde_feature() {
    let body = Transform::at(Vec3::new(1.0, 2.0, 3.0));
    let json = serde_json::to_string(&body).expect("serialize");
    let back: Transform = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(body, back);
}
