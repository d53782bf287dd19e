use approx::assert_relative_eq;

use element_ops::{layout_fence, ElementError, ElementRequest, FenceParams};
use element_types::{Guide, Point3d, ProfileSpec, SolidSpec, Vec3, VolumeKind};
use geom_kernel::{KernelIntrospect, MockKernel};

fn p(x: f64, y: f64) -> Point3d {
    Point3d::new(x, y, 0.0)
}

fn straight(length: f64) -> Guide {
    Guide::Line {
        start: p(0.0, 0.0),
        end: p(length, 0.0),
    }
}

/// 4000 mm along +X, then 3000 mm along +Y.
fn corner() -> Guide {
    Guide::polyline([p(0.0, 0.0), p(4000.0, 0.0), p(4000.0, 3000.0)])
}

fn rectangle(spec: &SolidSpec) -> (Point3d, Vec3, Vec3, f64, f64) {
    match spec.profile {
        ProfileSpec::Rectangle {
            origin,
            x_axis,
            y_axis,
            extent_x,
            extent_y,
        } => (origin, x_axis, y_axis, extent_x, extent_y),
        ProfileSpec::Polygon { .. } => panic!("fence parts are rectangles"),
    }
}

/// Centre of a rectangular footprint.
fn center(spec: &SolidSpec) -> Point3d {
    let (origin, x_axis, y_axis, ex, ey) = rectangle(spec);
    origin + x_axis * (ex * 0.5) + y_axis * (ey * 0.5)
}

fn posts(volumes: &[SolidSpec]) -> Vec<&SolidSpec> {
    volumes
        .iter()
        .filter(|v| matches!(v.kind, VolumeKind::Post { .. }))
        .collect()
}

fn rails(volumes: &[SolidSpec]) -> Vec<&SolidSpec> {
    volumes
        .iter()
        .filter(|v| matches!(v.kind, VolumeKind::Rail { .. }))
        .collect()
}

// ── Posts ─────────────────────────────────────────────────────────────────

#[test]
fn posts_are_spread_evenly_including_both_ends() {
    let volumes = layout_fence(&straight(10_000.0), &FenceParams::default()).unwrap();
    let posts = posts(&volumes);
    assert_eq!(posts.len(), 5);
    for (i, post) in posts.iter().enumerate() {
        assert_eq!(post.kind, VolumeKind::Post { index: i });
        let c = center(post);
        assert_relative_eq!(c.x, i as f64 * 2500.0, epsilon = 1e-9);
        assert_relative_eq!(c.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(post.elevation(), 0.0);
        assert_relative_eq!(post.height, 1200.0);
    }
}

#[test]
fn short_guide_still_gets_two_posts() {
    let volumes = layout_fence(&straight(300.0), &FenceParams::default()).unwrap();
    assert_eq!(posts(&volumes).len(), 2);
}

#[test]
fn posts_turn_with_the_guide() {
    // 7000 / 2000 = 3.5 rounds to 4 posts, the third one on the second segment.
    let volumes = layout_fence(&corner(), &FenceParams::default()).unwrap();
    let posts = posts(&volumes);
    assert_eq!(posts.len(), 4);

    let (_, x_axis, y_axis, depth, width) = rectangle(posts[2]);
    assert_relative_eq!(x_axis.y, 1.0, epsilon = 1e-12);
    assert_relative_eq!(y_axis.x, -1.0, epsilon = 1e-12);
    assert_relative_eq!(depth, 80.0);
    assert_relative_eq!(width, 80.0);

    let c = center(posts[2]);
    assert_relative_eq!(c.x, 4000.0, epsilon = 1e-9);
    assert_relative_eq!(c.y, 7000.0 * 2.0 / 3.0 - 4000.0, epsilon = 1e-9);
}

#[test]
fn embedding_moves_posts_down() {
    let params = FenceParams {
        embed_depth: 200.0,
        ..FenceParams::default()
    };
    let volumes = layout_fence(&straight(4000.0), &params).unwrap();
    for post in posts(&volumes) {
        assert_relative_eq!(post.elevation(), -200.0);
        assert_relative_eq!(post.height, 1400.0);
    }
    let bottom = rails(&volumes)[0];
    assert_eq!(bottom.kind, VolumeKind::Rail { level: 0, segment: 0 });
    assert_relative_eq!(bottom.elevation(), -200.0);
}

#[test]
fn negative_embed_counts_as_zero() {
    let params = FenceParams {
        embed_depth: -50.0,
        ..FenceParams::default()
    };
    let volumes = layout_fence(&straight(4000.0), &params).unwrap();
    assert!(volumes.iter().all(|v| v.elevation() >= 0.0));
}

// ── Rails ─────────────────────────────────────────────────────────────────

#[test]
fn each_rail_runs_along_every_segment() {
    let volumes = layout_fence(&corner(), &FenceParams::default()).unwrap();
    let rails = rails(&volumes);
    assert_eq!(rails.len(), 6);

    let expected: Vec<VolumeKind> = (0..3)
        .flat_map(|level| (0..2).map(move |segment| VolumeKind::Rail { level, segment }))
        .collect();
    let kinds: Vec<VolumeKind> = rails.iter().map(|r| r.kind).collect();
    assert_eq!(kinds, expected);

    let (origin, x_axis, _, length, depth) = rectangle(rails[1]);
    assert_relative_eq!(x_axis.y, 1.0, epsilon = 1e-12);
    assert_relative_eq!(length, 3000.0, epsilon = 1e-9);
    assert_relative_eq!(depth, 60.0);
    // Centred on the guide: left of +Y is -X, so the bar starts 30 mm to the right.
    assert_relative_eq!(origin.x, 4030.0, epsilon = 1e-9);
}

#[test]
fn rail_heights_follow_levels() {
    let volumes = layout_fence(&straight(4000.0), &FenceParams::default()).unwrap();
    let bottoms: Vec<f64> = rails(&volumes).iter().map(|r| r.elevation()).collect();
    assert_eq!(bottoms.len(), 3);
    assert_relative_eq!(bottoms[0], 0.0);
    assert_relative_eq!(bottoms[1], 580.0);
    assert_relative_eq!(bottoms[2], 1160.0);
    assert!(rails(&volumes).iter().all(|r| r.height == 40.0));
}

#[test]
fn rails_can_be_switched_off() {
    let params = FenceParams {
        bottom_rail: false,
        top_rail: false,
        middle_rail_count: 0,
        ..FenceParams::default()
    };
    let volumes = layout_fence(&corner(), &params).unwrap();
    assert!(rails(&volumes).is_empty());
    assert_eq!(volumes.len(), 4);
}

#[test]
fn zero_length_segment_gets_no_rail() {
    let guide = Guide::polyline([
        p(0.0, 0.0),
        p(4000.0, 0.0),
        p(4000.0, 0.0),
        p(4000.0, 3000.0),
    ]);
    let volumes = layout_fence(&guide, &FenceParams::default()).unwrap();
    let rails = rails(&volumes);
    assert_eq!(rails.len(), 6);
    assert!(rails
        .iter()
        .all(|r| !matches!(r.kind, VolumeKind::Rail { segment: 1, .. })));
}

#[test]
fn offset_shifts_everything_sideways() {
    let params = FenceParams {
        offset: 500.0,
        ..FenceParams::default()
    };
    let volumes = layout_fence(&corner(), &params).unwrap();
    let last_post = center(posts(&volumes)[3]);
    assert_relative_eq!(last_post.x, 4000.0, epsilon = 1e-9);
    assert_relative_eq!(last_post.y, 3500.0, epsilon = 1e-9);

    let (origin, _, _, _, _) = rectangle(rails(&volumes)[0]);
    assert_relative_eq!(origin.y, 470.0, epsilon = 1e-9);
}

// ── Edge Cases & Errors ───────────────────────────────────────────────────

#[test]
fn zero_length_guide_yields_nothing() {
    let guide = Guide::Line {
        start: p(1.0, 1.0),
        end: p(1.0, 1.0),
    };
    assert!(layout_fence(&guide, &FenceParams::default()).unwrap().is_empty());
}

#[test]
fn curved_guides_are_rejected() {
    let arc = Guide::Arc {
        center: Point3d::ORIGIN,
        radius: 3000.0,
        start_angle: 0.0,
        end_angle: 1.0,
    };
    let err = layout_fence(&arc, &FenceParams::default()).unwrap_err();
    assert!(matches!(err, ElementError::NonPolylineGuide { .. }));
}

#[test]
fn absurd_post_spacing_is_rejected() {
    let params = FenceParams {
        post_spacing: 1e-300,
        ..FenceParams::default()
    };
    let err = layout_fence(&straight(1000.0), &params).unwrap_err();
    assert!(matches!(err, ElementError::InvalidParameter { name: "post_spacing", .. }));
}

#[test]
fn absurd_rail_count_is_rejected() {
    let params = FenceParams {
        middle_rail_count: u32::MAX,
        ..FenceParams::default()
    };
    let err = layout_fence(&straight(1000.0), &params).unwrap_err();
    assert!(matches!(err, ElementError::InvalidParameter { name: "middle_rail_count", .. }));
}

#[test]
fn non_positive_post_size_is_rejected() {
    let params = FenceParams {
        post_width: 0.0,
        ..FenceParams::default()
    };
    let err = layout_fence(&straight(1000.0), &params).unwrap_err();
    assert!(matches!(err, ElementError::InvalidParameter { name: "post_width", .. }));
}

// ── Kernel Build ──────────────────────────────────────────────────────────

#[test]
fn fence_request_builds_with_default_params() {
    let json = r#"{
        "element": "fence",
        "guide": {
            "type": "Line",
            "start": {"x": 0.0, "y": 0.0, "z": 0.0},
            "end": {"x": 4000.0, "y": 0.0, "z": 0.0}
        }
    }"#;
    let request = ElementRequest::from_json(json).unwrap();
    assert_eq!(request.element_name(), "fence");

    let mut kernel = MockKernel::new();
    let built = request.build(&mut kernel).unwrap();
    // Two posts and three rails.
    assert_eq!(built.len(), 5);

    let post = kernel.volume(&built[0].handle).unwrap();
    assert_relative_eq!(post, 80.0 * 80.0 * 1200.0, max_relative = 1e-9);
    let rail = kernel.bounding_box(&built[2].handle).unwrap();
    assert_relative_eq!(rail.max.x - rail.min.x, 4000.0, epsilon = 1e-9);
    assert_relative_eq!(rail.max.y - rail.min.y, 60.0, epsilon = 1e-9);
}
