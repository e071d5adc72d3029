use cheatsheet_impose::*;

#[test]
fn test_paper_size_dimensions() {
    assert_eq!(PaperSize::A3.dimensions_mm(), (297.0, 420.0));
    assert_eq!(PaperSize::A4.dimensions_mm(), (210.0, 297.0));
    assert_eq!(PaperSize::A5.dimensions_mm(), (148.0, 210.0));
    assert_eq!(PaperSize::Letter.dimensions_mm(), (215.9, 279.4));
    assert_eq!(PaperSize::Legal.dimensions_mm(), (215.9, 355.6));
    assert_eq!(PaperSize::Tabloid.dimensions_mm(), (279.4, 431.8));
}

#[test]
fn test_paper_size_with_orientation() {
    let a4 = PaperSize::A4;
    assert_eq!(
        a4.dimensions_with_orientation(Orientation::Portrait),
        (210.0, 297.0)
    );
    assert_eq!(
        a4.dimensions_with_orientation(Orientation::Landscape),
        (297.0, 210.0)
    );
}

#[test]
fn test_a4_in_points() {
    let (w, h) = PaperSize::A4.dimensions_mm();
    assert!((mm_to_pt(w) - 595.0).abs() < 1.0);
    assert!((mm_to_pt(h) - 842.0).abs() < 1.0);
    assert!((pt_to_mm(mm_to_pt(w)) - w).abs() < 0.001);
}

#[test]
fn test_orientation_of_page() {
    assert_eq!(Orientation::of(612.0, 792.0), Orientation::Portrait);
    assert_eq!(Orientation::of(792.0, 612.0), Orientation::Landscape);
    assert_eq!(Orientation::of(500.0, 500.0), Orientation::Landscape);
}

#[test]
fn test_orientation_mode_resolve() {
    let portrait_page = (612.0, 792.0);
    let landscape_page = (792.0, 612.0);

    assert_eq!(
        OrientationMode::Auto.resolve(portrait_page),
        Orientation::Portrait
    );
    assert_eq!(
        OrientationMode::Auto.resolve(landscape_page),
        Orientation::Landscape
    );
    assert_eq!(
        OrientationMode::Portrait.resolve(landscape_page),
        Orientation::Portrait
    );
    assert_eq!(
        OrientationMode::Landscape.resolve(portrait_page),
        Orientation::Landscape
    );
}

#[test]
fn test_scaling_mode() {
    // 100x200 page into a 100x100 cell
    assert_eq!(ScalingMode::Fit.scale((100.0, 200.0), (100.0, 100.0)), 0.5);
    assert_eq!(ScalingMode::Fill.scale((100.0, 200.0), (100.0, 100.0)), 1.0);
}

#[test]
fn test_border_widths() {
    assert_eq!(BorderStyle::None.width_pt(), None);
    assert_eq!(BorderStyle::Light.width_pt(), Some(0.5));
    assert_eq!(BorderStyle::Normal.width_pt(), Some(1.0));
    assert_eq!(BorderStyle::Thick.width_pt(), Some(2.0));
}

#[test]
fn test_nup_grids() {
    assert_eq!(NUp::Two.grid_dimensions(), (2, 1));
    assert_eq!(NUp::Four.grid_dimensions(), (2, 2));
    assert_eq!(NUp::Six.grid_dimensions(), (3, 2));
    assert_eq!(NUp::Nine.grid_dimensions(), (3, 3));

    assert_eq!(NUp::Six.cells_per_side(), 6);
    assert_eq!(NUp::Six.capacity_per_sheet(), 12);
    assert_eq!(NUp::Nine.to_string(), "9-up");
}

#[test]
fn test_nup_from_count() {
    assert_eq!(NUp::try_from(2).unwrap(), NUp::Two);
    assert_eq!(NUp::try_from(9).unwrap(), NUp::Nine);

    for unsupported in [0, 1, 3, 8, 16] {
        assert!(matches!(
            NUp::try_from(unsupported),
            Err(ImposeError::Config(_))
        ));
    }
}

#[test]
fn test_grid_position_mirroring() {
    let pos = GridPosition::new(1, 0);
    assert_eq!(pos.index(3), 3);
    assert_eq!(pos.mirrored(3), GridPosition::new(1, 2));
    assert_eq!(pos.mirrored(3).mirrored(3), pos);
}

#[test]
fn test_error_messages() {
    let err = ImposeError::InvalidInput {
        name: "notes.txt".to_string(),
        reason: "not a PDF file".to_string(),
    };
    let message = err.to_string();
    assert!(message.contains("notes.txt"));
    assert!(message.contains("not a PDF file"));
}
