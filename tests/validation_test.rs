// End-to-end validation scenarios over a small drawing snapshot.

use drawing_qc::rules::{
    quality, run_batch_validation, run_interactive_validation, NamedRule, RuleContext,
};
use drawing_qc::{
    compute_intersections, CodeTable, Code, DrawingSnapshot, EvalMode, Geometry,
    PlanarCalculator, Vertex, Violation, ZComparison,
};

fn coded_line(id: u64, code: &str, coords: &[(f64, f64, f64)]) -> Geometry {
    Geometry::line(
        id,
        coords
            .iter()
            .map(|(x, y, z)| Vertex::new(*x, *y, *z))
            .collect(),
        false,
    )
    .unwrap()
    .with_code(Code::new(code))
}

/// The crossing fixture: two lines meeting at (5,5), Z compared at the
/// vertices the lines reach the crossing with
fn crossing_fixture() -> (Geometry, Geometry) {
    let l1 = coded_line(1, "0501", &[(0.0, 0.0, 10.0), (10.0, 10.0, 5.0)]);
    let l2 = coded_line(2, "0502", &[(0.0, 10.0, 8.0), (10.0, 0.0, 12.0)]);
    (l1, l2)
}

#[test]
fn test_crossing_lines_produce_one_intersection_site() {
    let (l1, l2) = crossing_fixture();
    let index = compute_intersections(&l1, &[&l2]);
    assert_eq!(index.len(), 1);
    let site = &index.sites()[0];
    assert!((site.coordinate[0] - 5.0).abs() < 1e-9);
    assert!((site.coordinate[1] - 5.0).abs() < 1e-9);
    assert_eq!(site.vertex_indices.get(&1), Some(&1));
    assert_eq!(site.vertex_indices.get(&2), Some(&1));
}

#[test]
fn test_z_tolerance_flags_crossing_pair() {
    let (l1, l2) = crossing_fixture();
    let snapshot = DrawingSnapshot::new(vec![l1, l2], 1.0);
    let table = CodeTable::new();
    let calc = PlanarCalculator;
    let ctx = RuleContext {
        drawing: &snapshot,
        code_table: &table,
        calculator: &calc,
        elevation: None,
        mode: EvalMode::Batch,
        code_index: 0,
    };

    let subject = snapshot.get(1).unwrap();
    // Reached Zs are 5 and 12: |5 - 12| = 7 exceeds the tolerance of 3
    let result =
        quality::z_difference_at_crossings(subject, &ctx, "0502", ZComparison::Greater, 3.0);
    assert_eq!(result.violations().len(), 1);
    match &result.violations()[0] {
        Violation::Relation { others, .. } => assert_eq!(others, &vec![2u64]),
        other => panic!("expected a relation violation, got {other:?}"),
    }

    // At tolerance 10 the same pair passes
    let result =
        quality::z_difference_at_crossings(subject, &ctx, "0502", ZComparison::Greater, 10.0);
    assert!(result.is_pass());
}

#[test]
fn test_code_filter_narrows_candidates() {
    let (l1, l2) = crossing_fixture();
    let snapshot = DrawingSnapshot::new(vec![l1, l2], 1.0);
    let table = CodeTable::new();
    let calc = PlanarCalculator;
    let ctx = RuleContext {
        drawing: &snapshot,
        code_table: &table,
        calculator: &calc,
        elevation: None,
        mode: EvalMode::Batch,
        code_index: 0,
    };

    let subject = snapshot.get(1).unwrap();
    // The crossing counterpart is coded 0502; filtering for 0999 sees nothing
    assert!(quality::must_not_cross(subject, &ctx, "0999").is_pass());
    assert!(!quality::must_not_cross(subject, &ctx, "0502").is_pass());
    assert!(!quality::must_not_cross(subject, &ctx, "05*").is_pass());
}

#[test]
fn test_interactive_returns_at_most_one_violation() {
    // Rising profile violates the non-increasing requirement twice
    let subject = coded_line(1, "0701", &[(0.0, 0.0, 10.0), (1.0, 0.0, 20.0), (2.0, 0.0, 30.0)]);
    let snapshot = DrawingSnapshot::new(vec![subject.clone()], 1.0);
    let table = CodeTable::new();
    let calc = PlanarCalculator;

    let batch_ctx = RuleContext {
        drawing: &snapshot,
        code_table: &table,
        calculator: &calc,
        elevation: None,
        mode: EvalMode::Batch,
        code_index: 0,
    };
    assert_eq!(
        quality::no_vertex_z_above_previous(&subject, &batch_ctx)
            .violations()
            .len(),
        2
    );

    let interactive_ctx = RuleContext {
        mode: EvalMode::Interactive,
        ..batch_ctx
    };
    assert_eq!(
        quality::no_vertex_z_above_previous(&subject, &interactive_ctx)
            .violations()
            .len(),
        1
    );
}

#[test]
fn test_batch_validation_over_drawing() {
    let (l1, l2) = crossing_fixture();
    let point = Geometry::point(3, Vertex::new(50.0, 50.0, 0.0)).with_code(Code::new("0101"));
    let snapshot = DrawingSnapshot::new(vec![l1, l2, point], 1.0);
    let table = CodeTable::new();

    let must_not_cross_0502: &(dyn Fn(&Geometry, &RuleContext) -> drawing_qc::RuleResult
          + Sync) = &|g, ctx| quality::must_not_cross(g, ctx, "0502");
    let rules = [
        NamedRule {
            name: "must-be-line",
            run: &quality::must_be_line,
        },
        NamedRule {
            name: "must-not-cross-0502",
            run: must_not_cross_0502,
        },
    ];

    let findings = run_batch_validation(&snapshot, &table, &PlanarCalculator, None, &rules);
    // The point fails the kind rule; line 1 crosses line 2
    assert!(findings
        .iter()
        .any(|f| f.geometry_id == 3 && f.rule == "must-be-line"));
    assert!(findings
        .iter()
        .any(|f| f.geometry_id == 1 && f.rule == "must-not-cross-0502"));
}

#[test]
fn test_interactive_validation_stops_at_first_rule() {
    let subject = Geometry::point(1, Vertex::new(0.0, 0.0, 0.0));
    let snapshot = DrawingSnapshot::new(vec![], 1.0);
    let table = CodeTable::new();
    let rules = [
        NamedRule {
            name: "must-be-line",
            run: &quality::must_be_line,
        },
        NamedRule {
            name: "must-be-polygon",
            run: &quality::must_be_polygon,
        },
    ];

    let result = run_interactive_validation(
        &subject,
        &snapshot,
        &table,
        &PlanarCalculator,
        None,
        &rules,
    );
    assert_eq!(result.violations().len(), 1);
}

#[test]
fn test_contour_equidistance_rule() {
    let table = CodeTable::new();
    let calc = PlanarCalculator;

    let good = coded_line(1, "0701", &[(0.0, 0.0, 15.0), (5.0, 0.0, 15.0)]);
    let off_grid = coded_line(2, "0701", &[(0.0, 0.0, 15.3), (5.0, 0.0, 15.3)]);
    let sloped = coded_line(3, "0701", &[(0.0, 0.0, 15.0), (5.0, 0.0, 16.0)]);
    let snapshot = DrawingSnapshot::new(
        vec![good.clone(), off_grid.clone(), sloped.clone()],
        5.0,
    );
    let ctx = RuleContext {
        drawing: &snapshot,
        code_table: &table,
        calculator: &calc,
        elevation: None,
        mode: EvalMode::Batch,
        code_index: 0,
    };

    assert!(quality::contour_z_multiple_of_equidistance(&good, &ctx).is_pass());
    assert!(!quality::contour_z_multiple_of_equidistance(&off_grid, &ctx).is_pass());
    assert!(!quality::contour_z_multiple_of_equidistance(&sloped, &ctx).is_pass());
}
