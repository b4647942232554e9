use approx::assert_relative_eq;
use glam::dvec3;
use slipsep_core::{SlipSepError, Tolerance};
use slipsep_math::{
    intersect_for_map, intersect_for_section, Basis2, PlaneEquation, Point3, Vector3,
};

fn plane_through(normal: Vector3, point: Point3) -> PlaneEquation {
    PlaneEquation::from_normal_and_point(normal.normalize(), point)
}

#[test]
fn test_plane_equation_contains_anchor() {
    let p = dvec3(3.0, -1.5, 2.25);
    let plane = plane_through(dvec3(0.3, -0.4, 0.8), p);
    assert_relative_eq!(plane.evaluate(p), 0.0, epsilon = 1e-12);
    assert_relative_eq!(plane.evaluate(p + plane.normal() * 2.0), 2.0, epsilon = 1e-12);
}

#[test]
fn test_traces_cross_at_common_point() {
    // Two planes through the same point cut the horizontal plane in map
    // traces that meet below that point.
    let tol = Tolerance::default();
    let common = dvec3(4.0, -2.0, 0.0);
    let a = plane_through(dvec3(0.5, 0.5, 0.7), common);
    let b = plane_through(dvec3(-0.6, 0.2, 0.75), common);
    let horizontal = PlaneEquation::horizontal();

    let basis = Basis2::map();
    let la = basis
        .project_line(&intersect_for_map(&a, &horizontal, tol).unwrap().line, tol)
        .unwrap()
        .mirrored();
    let lb = basis
        .project_line(&intersect_for_map(&b, &horizontal, tol).unwrap().line, tol)
        .unwrap()
        .mirrored();

    let meet = la.intersect(&lb, tol).unwrap();
    assert_relative_eq!(meet.x, 4.0, epsilon = 1e-9);
    assert_relative_eq!(meet.y, -2.0, epsilon = 1e-9);
}

#[test]
fn test_section_trace_of_dipping_plane() {
    // Plane dipping 45 degrees toward north, cut by the north-south section.
    let tol = Tolerance::default();
    let plane = plane_through(dvec3(0.0, 1.0, 1.0), Point3::ZERO);
    let k = dvec3(-1.0, 0.0, 0.0);
    let section = PlaneEquation::from_normal_and_point(k, Point3::ZERO);

    let intersection = intersect_for_section(&plane, &section, tol).unwrap();
    let line = Basis2::section(k).project_line(&intersection.line, tol).unwrap();
    // Abscissa runs north, ordinate up.
    assert_relative_eq!(line.slope, -1.0, epsilon = 1e-12);
    assert_relative_eq!(line.intercept, 0.0, epsilon = 1e-12);
}

#[test]
fn test_parallel_planes_report_distance() {
    let tol = Tolerance::default();
    let a = PlaneEquation::horizontal();
    let b = plane_through(Vector3::Z, dvec3(0.0, 0.0, -3.0));
    match intersect_for_map(&a, &b, tol) {
        Err(SlipSepError::ParallelPlanes { distance }) => {
            assert_relative_eq!(distance, 3.0, epsilon = 1e-12)
        }
        other => panic!("unexpected {other:?}"),
    }
}
