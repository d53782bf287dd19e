use approx::assert_relative_eq;

use element_ops::{layout_floor_plate, ElementError, FloorPlateParams};
use element_types::{FloorLayerKind, Guide, Point3d, VolumeKind};
use geom_kernel::{KernelIntrospect, MockKernel};

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Guide {
    Guide::polyline([
        Point3d::new(x0, y0, 0.0),
        Point3d::new(x1, y0, 0.0),
        Point3d::new(x1, y1, 0.0),
        Point3d::new(x0, y1, 0.0),
        Point3d::new(x0, y0, 0.0),
    ])
}

fn boundary() -> Guide {
    rect(0.0, 0.0, 10_000.0, 8_000.0)
}

// ── Layer Stack ───────────────────────────────────────────────────────────

#[test]
fn layers_stack_downward_without_gaps() {
    let layout = layout_floor_plate(&boundary(), &[], &FloorPlateParams::new(3000.0)).unwrap();
    let kinds: Vec<FloorLayerKind> = layout.layers.iter().map(|l| l.kind).collect();
    assert_eq!(kinds, FloorLayerKind::TOP_DOWN.to_vec());

    let expected = [(3000.0, 2985.0), (2985.0, 2915.0), (2915.0, 2885.0), (2885.0, 2635.0)];
    for (layer, (top, bottom)) in layout.layers.iter().zip(expected) {
        assert_relative_eq!(layer.top, top);
        assert_relative_eq!(layer.bottom, bottom);
        assert_relative_eq!(layer.slab.elevation(), bottom);
        assert_relative_eq!(layer.slab.height, top - bottom);
    }
    for pair in layout.layers.windows(2) {
        assert_relative_eq!(pair[0].bottom, pair[1].top);
    }
}

#[test]
fn slab_volume_is_area_times_thickness() {
    let layout = layout_floor_plate(&boundary(), &[], &FloorPlateParams::new(0.0)).unwrap();
    let structural = layout.layer(FloorLayerKind::Structural).unwrap();
    assert_relative_eq!(structural.slab.volume(), 80e6 * 250.0, max_relative = 1e-12);
}

#[test]
fn every_void_is_cut_from_every_layer() {
    let voids = [rect(1000.0, 1000.0, 2000.0, 2000.0), rect(5000.0, 5000.0, 6000.0, 7000.0)];
    let layout = layout_floor_plate(&boundary(), &voids, &FloorPlateParams::new(0.0)).unwrap();
    for layer in &layout.layers {
        assert_eq!(layer.voids.len(), 2);
        assert_eq!(layer.voids[1].kind, VolumeKind::Void { layer: layer.kind, index: 1 });
        assert_relative_eq!(layer.voids[0].elevation(), layer.bottom);
    }
    assert_eq!(layout.volumes().len(), 12);
}

// ── Kernel Build ──────────────────────────────────────────────────────────

#[test]
fn voids_reduce_built_volume() {
    let voids = [rect(1000.0, 1000.0, 2000.0, 2000.0)];
    let layout = layout_floor_plate(&boundary(), &voids, &FloorPlateParams::new(3000.0)).unwrap();
    let mut kernel = MockKernel::new();
    let built = layout.materialize(&mut kernel).unwrap();
    assert_eq!(built.len(), 4);

    for (kind, handle) in &built {
        let thickness = FloorPlateParams::new(3000.0).thickness(*kind);
        let volume = kernel.volume(handle).unwrap();
        assert_relative_eq!(volume, (80e6 - 1e6) * thickness, max_relative = 1e-9);
    }
}

#[test]
fn void_outside_boundary_is_skipped() {
    let voids = [rect(20_000.0, 20_000.0, 21_000.0, 21_000.0)];
    let layout = layout_floor_plate(&boundary(), &voids, &FloorPlateParams::new(0.0)).unwrap();
    let mut kernel = MockKernel::new();
    let built = layout.materialize(&mut kernel).unwrap();
    let (kind, finish) = built[0];
    assert_eq!(kind, FloorLayerKind::Finish);
    assert_relative_eq!(kernel.volume(&finish).unwrap(), 80e6 * 15.0, max_relative = 1e-9);
}

#[test]
fn built_slab_bounds_match_layer() {
    let layout = layout_floor_plate(&boundary(), &[], &FloorPlateParams::new(3000.0)).unwrap();
    let mut kernel = MockKernel::new();
    let built = layout.materialize(&mut kernel).unwrap();
    let (_, screed) = built[1];
    let bb = kernel.bounding_box(&screed).unwrap();
    assert_relative_eq!(bb.min.z, 2915.0);
    assert_relative_eq!(bb.max.z, 2985.0);
    assert_relative_eq!(bb.max.x, 10_000.0);
    assert_relative_eq!(bb.max.y, 8_000.0);
}

// ── Errors ────────────────────────────────────────────────────────────────

#[test]
fn open_boundary_is_rejected() {
    let open = Guide::polyline([
        Point3d::new(0.0, 0.0, 0.0),
        Point3d::new(1000.0, 0.0, 0.0),
        Point3d::new(1000.0, 1000.0, 0.0),
    ]);
    let err = layout_floor_plate(&open, &[], &FloorPlateParams::new(0.0)).unwrap_err();
    assert_eq!(
        err,
        ElementError::OpenBoundary {
            what: "boundary".to_string()
        }
    );
}

#[test]
fn open_void_is_named_by_index() {
    let voids = [
        rect(1000.0, 1000.0, 2000.0, 2000.0),
        Guide::Line {
            start: Point3d::ORIGIN,
            end: Point3d::new(100.0, 0.0, 0.0),
        },
    ];
    let err = layout_floor_plate(&boundary(), &voids, &FloorPlateParams::new(0.0)).unwrap_err();
    assert_eq!(
        err,
        ElementError::OpenBoundary {
            what: "void 1".to_string()
        }
    );
}

#[test]
fn non_positive_thickness_is_rejected() {
    let mut params = FloorPlateParams::new(0.0);
    params.screed_thickness = 0.0;
    let err = layout_floor_plate(&boundary(), &[], &params).unwrap_err();
    assert!(matches!(err, ElementError::InvalidParameter { name: "screed_thickness", .. }));
}
