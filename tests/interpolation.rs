use approx::assert_abs_diff_eq;
use corrosion_rate_toolbox::{
    error::CorrosionError,
    interpolation::{
        bilinear_interpolate, clamp_to_breakpoints, correlate_midpoints, correlate_range_midpoint,
        double_interpolate, interpolate, interpolate_clamped, round_to_nearest, snap_to_breakpoint,
        Grid, Point, PointSet, Range, RangeRow, Slice,
    },
    rate::{Axis, RateWarning},
};

fn assert_close(actual: f64, expected: f64) {
    assert_abs_diff_eq!(actual, expected, epsilon = 1e-9);
}

const SULFIDATION_TEMPS: [f64; 7] = [450.0, 500.0, 550.0, 600.0, 650.0, 700.0, 750.0];

#[test]
fn nearest_picks_closer_breakpoint() {
    let temps = [450.0, 500.0, 550.0];
    assert_close(round_to_nearest(&temps, 474.0).unwrap(), 450.0);
    assert_close(round_to_nearest(&temps, 476.0).unwrap(), 500.0);
    assert_close(round_to_nearest(&temps, 500.0).unwrap(), 500.0);
}

#[test]
fn nearest_clamps_outside_range() {
    let temps = [450.0, 500.0, 550.0];
    assert_close(round_to_nearest(&temps, 300.0).unwrap(), 450.0);
    assert_close(round_to_nearest(&temps, 900.0).unwrap(), 550.0);
}

#[test]
fn nearest_tie_goes_to_lower_value() {
    assert_close(round_to_nearest(&SULFIDATION_TEMPS, 475.0).unwrap(), 450.0);
    assert_close(round_to_nearest(&SULFIDATION_TEMPS, 725.0).unwrap(), 700.0);
}

#[test]
fn nearest_rejects_empty_and_nan() {
    assert!(matches!(
        round_to_nearest(&[], 10.0),
        Err(CorrosionError::EmptyInput(_))
    ));
    assert!(matches!(
        round_to_nearest(&SULFIDATION_TEMPS, f64::NAN),
        Err(CorrosionError::InvalidNumericInput { .. })
    ));
}

#[test]
fn snap_reports_clamp_direction() {
    let low = snap_to_breakpoint(&SULFIDATION_TEMPS, 100.0, Axis::Temperature).unwrap();
    assert_close(low.value, 450.0);
    assert_eq!(low.warnings, vec![RateWarning::ClampedLow(Axis::Temperature)]);

    let high = snap_to_breakpoint(&SULFIDATION_TEMPS, 800.0, Axis::Temperature).unwrap();
    assert_close(high.value, 750.0);
    assert_eq!(high.warnings, vec![RateWarning::ClampedHigh(Axis::Temperature)]);

    let inside = snap_to_breakpoint(&SULFIDATION_TEMPS, 610.0, Axis::Temperature).unwrap();
    assert_close(inside.value, 600.0);
    assert!(inside.warnings.is_empty());
}

#[test]
fn linear_hits_breakpoints_exactly() {
    let points = [Point::new(1.0, 10.0), Point::new(2.0, 20.0), Point::new(4.0, 60.0)];
    for p in points {
        assert_close(interpolate(p.x, &points).unwrap(), p.y);
    }
    assert_close(interpolate(3.0, &points).unwrap(), 40.0);
}

#[test]
fn linear_extrapolates_with_edge_slope() {
    let points = [Point::new(1.0, 10.0), Point::new(2.0, 20.0), Point::new(4.0, 60.0)];
    assert_close(interpolate(0.0, &points).unwrap(), 0.0);
    assert_close(interpolate(5.0, &points).unwrap(), 80.0);
}

#[test]
fn linear_single_point_and_empty() {
    assert_close(interpolate(99.0, &[Point::new(1.0, 7.0)]).unwrap(), 7.0);
    assert!(matches!(
        interpolate(1.0, &[]),
        Err(CorrosionError::EmptyInput(_))
    ));
}

#[test]
fn point_set_sorts_and_keeps_first_duplicate() {
    let set = PointSet::from_pairs([(3.0, 30.0), (1.0, 10.0), (3.0, 99.0), (2.0, 20.0)]);
    let xs: Vec<f64> = set.points().iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    assert_close(set.last().unwrap().y, 30.0);
}

#[test]
fn clamped_interpolation_holds_end_values() {
    let set = PointSet::from_pairs([(0.5, 1.0), (1.0, 3.0)]);
    let below = interpolate_clamped(0.1, &set, Axis::Concentration).unwrap();
    assert_close(below.value, 1.0);
    assert_eq!(below.warnings, vec![RateWarning::ClampedLow(Axis::Concentration)]);

    let mid = interpolate_clamped(0.75, &set, Axis::Concentration).unwrap();
    assert_close(mid.value, 2.0);
    assert!(mid.warnings.is_empty());
}

#[test]
fn clamp_to_breakpoints_passes_inner_values() {
    let wt = clamp_to_breakpoints(0.6, &[0.5, 0.75, 1.0], Axis::Concentration).unwrap();
    assert_close(wt.value, 0.6);
    let high = clamp_to_breakpoints(2.5, &[0.5, 0.75, 1.0], Axis::Concentration).unwrap();
    assert_close(high.value, 1.0);
    assert!(high.warnings.contains(&RateWarning::ClampedHigh(Axis::Concentration)));
}

fn ph_temperature_grid() -> Grid {
    Grid::from_entries([
        (1.0, 100.0, 10.0),
        (1.0, 200.0, 20.0),
        (2.0, 100.0, 30.0),
        (2.0, 200.0, 40.0),
    ])
}

#[test]
fn bilinear_center_of_cell() {
    let grid = ph_temperature_grid();
    assert_close(bilinear_interpolate(1.5, 150.0, &grid).unwrap(), 25.0);
    assert_close(bilinear_interpolate(2.0, 200.0, &grid).unwrap(), 40.0);
}

#[test]
fn bilinear_rounds_to_two_decimals() {
    let grid = ph_temperature_grid();
    // 10 + 20*(1/3) + 10*(1/3)
    assert_close(bilinear_interpolate(1.0 + 1.0 / 3.0, 100.0 + 100.0 / 3.0, &grid).unwrap(), 20.0);
    let grid = Grid::from_entries([(1.0, 1.0, 0.0), (2.0, 1.0, 1.0)]);
    assert_close(bilinear_interpolate(1.0 + 1.0 / 3.0, 1.0, &grid).unwrap(), 0.33);
}

#[test]
fn bilinear_collapses_single_value_axis() {
    let grid = Grid::from_entries([(1.0, 100.0, 10.0), (2.0, 100.0, 30.0)]);
    assert_close(bilinear_interpolate(1.5, 500.0, &grid).unwrap(), 20.0);

    let grid = Grid::from_entries([(3.0, 100.0, 7.5)]);
    assert_close(bilinear_interpolate(9.0, 9.0, &grid).unwrap(), 7.5);
}

#[test]
fn bilinear_extrapolates_from_edge_cell() {
    let grid = ph_temperature_grid();
    assert_close(bilinear_interpolate(3.0, 100.0, &grid).unwrap(), 50.0);
}

#[test]
fn bilinear_missing_corner_is_an_error() {
    let grid = Grid::from_entries([(1.0, 100.0, 10.0), (1.0, 200.0, 20.0), (2.0, 100.0, 30.0)]);
    let err = bilinear_interpolate(1.5, 150.0, &grid).unwrap_err();
    match err {
        CorrosionError::MissingGridCorner { axis1, axis2 } => {
            assert_close(axis1, 2.0);
            assert_close(axis2, 200.0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn acid_slices() -> Vec<Slice> {
    vec![
        Slice::new(100.0, PointSet::from_pairs([(4.75, 1.0), (5.5, 2.0)])),
        Slice::new(200.0, PointSet::from_pairs([(4.75, 3.0), (5.5, 5.0)])),
    ]
}

#[test]
fn double_interpolation_inside_table() {
    let r = double_interpolate(150.0, 5.5, &acid_slices()).unwrap();
    assert_close(r.value, 3.5);
    assert!(r.warnings.is_empty());
}

#[test]
fn double_interpolation_extrapolates_below_lowest_temperature() {
    let r = double_interpolate(50.0, 5.5, &acid_slices()).unwrap();
    // 2 + (50 - 100) * (5 - 2) / 100
    assert_close(r.value, 0.5);
    assert_eq!(r.warnings, vec![RateWarning::ExtrapolatedLow(Axis::Temperature)]);

    let r = double_interpolate(0.0, 5.5, &acid_slices()).unwrap();
    assert_close(r.value, 0.0);
}

#[test]
fn double_interpolation_holds_highest_temperature() {
    let r = double_interpolate(300.0, 5.5, &acid_slices()).unwrap();
    assert_close(r.value, 5.0);
    assert_eq!(r.warnings, vec![RateWarning::ExtrapolatedHigh(Axis::Temperature)]);
}

#[test]
fn double_interpolation_flags_ph_extrapolation() {
    let r = double_interpolate(100.0, 6.25, &acid_slices()).unwrap();
    assert_close(r.value, 3.0);
    assert_eq!(r.warnings, vec![RateWarning::ExtrapolatedHigh(Axis::Ph)]);
}

#[test]
fn double_interpolation_skips_empty_slices() {
    let mut slices = acid_slices();
    slices.push(Slice::new(300.0, PointSet::default()));
    let r = double_interpolate(250.0, 5.5, &slices).unwrap();
    assert_close(r.value, 5.0);

    assert!(matches!(
        double_interpolate(100.0, 5.0, &[]),
        Err(CorrosionError::EmptyInput(_))
    ));
}

fn chloride_rows() -> Vec<RangeRow> {
    vec![
        RangeRow {
            key: 0.5,
            range: Range::Band { min: 1001.0, max: 2000.0 },
        },
        RangeRow {
            key: 0.8,
            range: Range::Band { min: 1001.0, max: 2000.0 },
        },
        RangeRow {
            key: 1.0,
            range: Range::Band { min: 1001.0, max: 2000.0 },
        },
        RangeRow {
            key: 2.0,
            range: Range::Band { min: 2001.0, max: 3000.0 },
        },
        RangeRow {
            key: 3.0,
            range: Range::Scalar(101.0),
        },
    ]
}

#[test]
fn range_midpoint_exact_row() {
    let r = correlate_range_midpoint(1.0, &chloride_rows(), (0.5, 5.0), Axis::Ph).unwrap();
    assert_close(r.value, 1500.5);
    let r = correlate_range_midpoint(3.0, &chloride_rows(), (0.5, 5.0), Axis::Ph).unwrap();
    assert_close(r.value, 101.0);
}

#[test]
fn range_midpoint_between_rows_is_rounded() {
    let r = correlate_range_midpoint(1.5, &chloride_rows(), (0.5, 5.0), Axis::Ph).unwrap();
    // (1500.5 + 2500.5) / 2 = 2000.5 → 2001
    assert_close(r.value, 2001.0);
    assert!(r.warnings.is_empty());
}

#[test]
fn range_midpoint_of_round_bands() {
    let rows = [
        RangeRow {
            key: 1.0,
            range: Range::Band { min: 1000.0, max: 2000.0 },
        },
        RangeRow {
            key: 2.0,
            range: Range::Band { min: 2000.0, max: 3000.0 },
        },
    ];
    let exact = correlate_range_midpoint(1.0, &rows, (0.5, 5.0), Axis::Ph).unwrap();
    assert_close(exact.value, 1500.0);
    let between = correlate_range_midpoint(1.5, &rows, (0.5, 5.0), Axis::Ph).unwrap();
    assert_close(between.value, 2000.0);
    assert!(between.warnings.is_empty());

    let midpoints = PointSet::from_pairs([(1.0, 1500.0), (2.0, 2500.0)]);
    let r = correlate_midpoints(1.5, &midpoints, (0.5, 5.0), Axis::Ph).unwrap();
    assert_close(r.value, 2000.0);
}

#[test]
fn range_midpoint_domain_and_clamp() {
    assert!(matches!(
        correlate_range_midpoint(6.0, &chloride_rows(), (0.5, 5.0), Axis::Ph),
        Err(CorrosionError::OutOfDomain(_))
    ));
    let r = correlate_range_midpoint(4.5, &chloride_rows(), (0.5, 5.0), Axis::Ph).unwrap();
    assert_close(r.value, 101.0);
    assert_eq!(r.warnings, vec![RateWarning::ClampedHigh(Axis::Ph)]);
}
