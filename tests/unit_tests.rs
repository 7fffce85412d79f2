//! Unit tests for the RuNeDiag building blocks
//!
//! These cover level handling, colour lookup, projection, geometry and the
//! JSON-facing types without rendering any figures.

use approx::assert_relative_eq;
use ndarray::Array2;
use plotters::style::RGBColor;
use ru_ne_diag::{
    coastline::Coastlines,
    colormap::{get_colormap, Colormap},
    errors::RuNeDiagError,
    field::{cell_edges, GriddedField},
    layout::{subplot_extent, PageFrame, PageSize, POLAR_LAYOUT, ZONAL_MEAN_LAYOUT},
    levels::{
        auto_levels, colorbar_labels, extend_auto_levels, extend_levels, format_tick, nice_step,
        BoundaryNorm, LinearNorm, EXTENSION_BOUND, NCOLORS,
    },
    metrics::MetricsDict,
    output::{parse_formats, OutputFormat},
    parallel::ParallelConfig,
    parameters::{get_output_dir, PlotParameters},
    projection::{Pole, PolarStereo},
    render::{
        polar::parallels,
        zonal_mean::{latitude_label, latitude_ticks, month_initial},
        ColorScale, LabelAlign, PanelTitles,
    },
};
use tempfile::tempdir;

#[test]
fn test_error_display() {
    let region_err = RuNeDiagError::InvalidRegion {
        region: "tropics".to_string(),
    };
    assert!(format!("{}", region_err).contains("Region 'tropics'"));

    let format_err = RuNeDiagError::UnsupportedFormat {
        format: "pdf".to_string(),
    };
    assert!(format!("{}", format_err).contains("Unsupported output format 'pdf'"));

    let shape_err = RuNeDiagError::ShapeMismatch {
        field: "TREFHT".to_string(),
        message: "bad".to_string(),
    };
    assert!(format!("{}", shape_err).contains("field 'TREFHT'"));

    let generic_err: RuNeDiagError = "Test error".into();
    assert_eq!(format!("{}", generic_err), "Test error");
}

#[test]
fn test_parallel_config() {
    let default_config = ParallelConfig::default();
    assert!(default_config.num_threads.is_none());
    assert!(default_config.current_threads() > 0);

    let config_4 = ParallelConfig::with_threads(4);
    assert_eq!(config_4.num_threads, Some(4));

    let all_cores = ParallelConfig::all_cores();
    assert!(all_cores.num_threads.unwrap() > 0);

    // Zero threads is rejected before touching the global pool
    let zero = ParallelConfig::with_threads(0).setup_global_pool();
    assert!(matches!(zero, Err(RuNeDiagError::ThreadPoolError(_))));
}

#[test]
fn test_extend_levels() {
    assert_eq!(extend_levels(&[]), None);

    let levels = extend_levels(&[0.0, 1.0, 2.0]).unwrap();
    assert_eq!(levels, vec![-EXTENSION_BOUND, 0.0, 1.0, 2.0, EXTENSION_BOUND]);
}

#[test]
fn test_extend_auto_levels() {
    assert_eq!(extend_auto_levels(&[]), None);

    let small = extend_auto_levels(&[0.0, 2.0, 4.0]).unwrap();
    assert_eq!(small, vec![-EXTENSION_BOUND, 0.0, 2.0, 4.0, EXTENSION_BOUND]);

    // Levels beyond ±1e8 push the open bounds one step further out
    let large = extend_auto_levels(&[2.0e8, 2.2e8, 2.4e8]).unwrap();
    assert_eq!(large, vec![-EXTENSION_BOUND, 2.0e8, 2.2e8, 2.4e8, 2.6e8]);

    let negative = extend_auto_levels(&[-3.0e8, -2.0e8]).unwrap();
    assert_eq!(negative, vec![-4.0e8, -3.0e8, -2.0e8, EXTENSION_BOUND]);
}

#[test]
fn test_auto_color_scale_large_magnitude() {
    let scale = ColorScale::levels_or_auto(&[], Some((2.0e8, 2.9e8)), 8)
        .expect("automatic levels for a large-magnitude field");
    match &scale {
        ColorScale::Levels { norm, configured } => {
            assert!(!configured);
            let bounds = norm.boundaries();
            assert!(bounds.windows(2).all(|w| w[0] < w[1]));
            assert_relative_eq!(bounds[1], 2.0e8);
            assert_relative_eq!(bounds[bounds.len() - 2], 3.0e8);
            assert!(norm.bin(2.5e8).is_some());
        }
        other => panic!("expected levels, got {:?}", other),
    }
}

#[test]
fn test_boundary_norm_color_indices() {
    let norm = BoundaryNorm::new(extend_levels(&[0.0, 1.0, 2.0]).unwrap(), NCOLORS).unwrap();
    assert_eq!(norm.n_bins(), 4);

    let indices: Vec<usize> = (0..4).map(|b| norm.color_index(b)).collect();
    assert_eq!(indices, vec![0, 85, 170, 255]);

    // Values beyond the configured levels land in the extension bins
    assert_eq!(norm.bin(-5.0), Some(0));
    assert_eq!(norm.bin(0.5), Some(1));
    assert_eq!(norm.bin(1.0), Some(2));
    assert_eq!(norm.bin(1.0e9), Some(3));
    assert_eq!(norm.bin(-1.0e9), Some(0));
    assert_eq!(norm.bin(f64::NAN), None);

    assert_relative_eq!(norm.normalize(1.5).unwrap(), 170.0 / 255.0);
}

#[test]
fn test_boundary_norm_rejects_bad_boundaries() {
    assert!(BoundaryNorm::new(vec![1.0], NCOLORS).is_err());
    assert!(BoundaryNorm::new(vec![0.0, 2.0, 1.0], NCOLORS).is_err());
    assert!(BoundaryNorm::new(vec![0.0, 0.0], NCOLORS).is_err());

    let single = BoundaryNorm::new(vec![0.0, 1.0], NCOLORS).unwrap();
    assert_eq!(single.color_index(0), 127);
}

#[test]
fn test_linear_norm() {
    let norm = LinearNorm::new(0.0, 10.0);
    assert_relative_eq!(norm.normalize(5.0).unwrap(), 0.5);
    assert_relative_eq!(norm.normalize(20.0).unwrap(), 1.0);
    assert_relative_eq!(norm.normalize(-3.0).unwrap(), 0.0);
    assert_eq!(norm.normalize(f64::NAN), None);

    let flat = LinearNorm::new(3.0, 3.0);
    assert_relative_eq!(flat.normalize(3.0).unwrap(), 0.5);
}

#[test]
fn test_nice_and_auto_levels() {
    assert_relative_eq!(nice_step(10.0, 8), 2.0);
    assert_relative_eq!(nice_step(1.0, 4), 0.25);

    assert_eq!(auto_levels(0.0, 10.0, 8), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    assert_eq!(
        auto_levels(-3.3, 7.1, 8),
        vec![-4.0, -2.0, 0.0, 2.0, 4.0, 6.0, 8.0]
    );

    // A constant field still gets a usable range
    let flat = auto_levels(5.0, 5.0, 8);
    assert!(flat.len() >= 2);
    assert!(flat[0] < 5.0 && *flat.last().unwrap() > 5.0);

    assert!(auto_levels(f64::NAN, 1.0, 8).is_empty());
}

#[test]
fn test_format_tick() {
    assert_eq!(format_tick(-0.0, 1.0), "0");
    assert_eq!(format_tick(2.5, 0.5), "2.5");
    assert_eq!(format_tick(10.0, 2.0), "10");
    assert_eq!(format_tick(0.25, 0.25), "0.25");
}

#[test]
fn test_colorbar_label_formats() {
    let small = colorbar_labels(&[0.5, 1.0, 2.5], false);
    assert_eq!(small.labels, vec![" 0.50", " 1.00", " 2.50"]);
    assert_relative_eq!(small.pad_points, 25.0);

    let medium = colorbar_labels(&[10.0, 20.0, 50.0], false);
    assert_eq!(medium.labels, vec![" 10.0", " 20.0", " 50.0"]);
    assert_relative_eq!(medium.pad_points, 25.0);

    let large = colorbar_labels(&[-200.0, 0.0, 200.0], false);
    assert_eq!(large.labels, vec!["-200.0", "   0.0", " 200.0"]);
    assert_relative_eq!(large.pad_points, 30.0);
}

#[test]
fn test_colorbar_labels_strip_integral() {
    let stripped = colorbar_labels(&[10.0, 20.0, 50.0], true);
    assert_eq!(stripped.labels, vec![" 10", " 20", " 50"]);
    assert_relative_eq!(stripped.pad_points, 20.0);

    let large = colorbar_labels(&[-200.0, 0.0, 200.0], true);
    assert_eq!(large.labels, vec!["-200", "   0", " 200"]);
    assert_relative_eq!(large.pad_points, 25.0);

    // Mixed fractional labels are left alone
    let mixed = colorbar_labels(&[10.0, 12.5], true);
    assert_eq!(mixed.labels, vec![" 10.0", " 12.5"]);
    assert_relative_eq!(mixed.pad_points, 25.0);
}

#[test]
fn test_color_scale_ticks() {
    let configured = ColorScale::levels_or_continuous(&[0.0, 1.0, 2.0], None).unwrap();
    let ticks = configured.ticks(false);
    assert_eq!(ticks.positions, vec![0.25, 0.5, 0.75]);
    assert_eq!(ticks.labels, vec![" 0.00", " 1.00", " 2.00"]);
    assert_eq!(ticks.align, LabelAlign::Right);
    assert_relative_eq!(ticks.pad_points, 25.0);

    let auto = ColorScale::levels_or_auto(&[], Some((0.0, 10.0)), 8).unwrap();
    match &auto {
        ColorScale::Levels { norm, configured } => {
            assert!(!configured);
            assert_eq!(norm.n_bins(), 7);
        }
        other => panic!("expected levels, got {:?}", other),
    }
    let ticks = auto.ticks(false);
    assert_eq!(ticks.labels, vec!["0", "2", "4", "6", "8", "10"]);
    assert_eq!(ticks.align, LabelAlign::Left);

    let continuous = ColorScale::levels_or_continuous(&[], Some((0.0, 10.0))).unwrap();
    assert!(matches!(continuous, ColorScale::Continuous(_)));
    let ticks = continuous.ticks(true);
    assert_eq!(ticks.labels.first().map(String::as_str), Some("0"));
    assert_eq!(ticks.labels.last().map(String::as_str), Some("10"));
    assert_relative_eq!(*ticks.positions.last().unwrap(), 1.0);
}

#[test]
fn test_color_scale_colors() {
    let cmap = get_colormap("gray", None).unwrap();
    let scale = ColorScale::levels_or_continuous(&[0.0, 1.0, 2.0], None).unwrap();

    assert_eq!(scale.color(&cmap, -5.0), Some(RGBColor(0, 0, 0)));
    assert_eq!(scale.color(&cmap, 100.0), Some(RGBColor(255, 255, 255)));
    assert_eq!(scale.color(&cmap, f64::NAN), None);
}

#[test]
fn test_builtin_colormaps() {
    for name in ["cet_rainbow", "diverging_bwr", "viridis", "RdBu", "BrBG", "coolwarm", "jet"] {
        let cmap = get_colormap(name, None).expect("built-in colormap");
        assert!(cmap.len() >= 2, "{} has too few stops", name);
    }

    let gray = get_colormap("gray", None).unwrap();
    let reversed = get_colormap("gray_r", None).unwrap();
    assert_eq!(gray.at(0.0), RGBColor(0, 0, 0));
    assert_eq!(reversed.at(0.0), RGBColor(255, 255, 255));
    assert_eq!(gray.at(0.5), RGBColor(128, 128, 128));
    assert_eq!(gray.at(7.0), RGBColor(255, 255, 255));

    assert!(matches!(
        get_colormap("no_such_map", None),
        Err(RuNeDiagError::Colormap { .. })
    ));
}

#[test]
fn test_parse_rgb_colormap() {
    let text = "# two colours\n0 0 0\n255, 255, 255\n";
    let cmap = Colormap::parse_rgb("bw.rgb", text).unwrap();
    assert_eq!(cmap.len(), 2);
    assert_eq!(cmap.at(1.0), RGBColor(255, 255, 255));

    let fractional = Colormap::parse_rgb("frac.rgb", "0.0 0.0 1.0\n1.0 0.0 0.0\n").unwrap();
    assert_eq!(fractional.at(0.0), RGBColor(0, 0, 255));

    assert!(Colormap::parse_rgb("short.rgb", "1 2\n3 4 5\n").is_err());
    assert!(Colormap::parse_rgb("one.rgb", "1 2 3\n").is_err());
    assert!(Colormap::parse_rgb("text.rgb", "red green blue\n").is_err());
}

#[test]
fn test_rgb_colormap_from_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("custom.rgb"), "0 0 0\n0 0 255\n").unwrap();

    let cmap = get_colormap("custom.rgb", Some(dir.path())).unwrap();
    assert_eq!(cmap.at(1.0), RGBColor(0, 0, 255));

    let missing = get_colormap("missing.rgb", Some(dir.path()));
    assert!(matches!(missing, Err(RuNeDiagError::Colormap { .. })));
}

#[test]
fn test_pole_from_region() {
    assert_eq!(Pole::from_region("polar_N").unwrap(), Pole::North);
    assert_eq!(Pole::from_region("polar_S").unwrap(), Pole::South);
    // 'N' is checked first
    assert_eq!(Pole::from_region("NS").unwrap(), Pole::North);
    assert!(matches!(
        Pole::from_region("arctic"),
        Err(RuNeDiagError::InvalidRegion { .. })
    ));

    assert_relative_eq!(Pole::North.boundary_lat(), 50.0);
    assert_relative_eq!(Pole::South.boundary_lat(), -55.0);
}

#[test]
fn test_projection_boundary_and_pole() {
    let north = PolarStereo::new(Pole::North);
    let (u, v) = north.project(0.0, 50.0);
    assert_relative_eq!(u, 0.5, epsilon = 1e-12);
    assert_relative_eq!(v, 0.0, epsilon = 1e-12);

    let (u, v) = north.project(90.0, 50.0);
    assert_relative_eq!(u, 1.0, epsilon = 1e-12);
    assert_relative_eq!(v, 0.5, epsilon = 1e-12);

    let (u, v) = north.project(123.0, 90.0);
    assert_relative_eq!(u, 0.5, epsilon = 1e-12);
    assert_relative_eq!(v, 0.5, epsilon = 1e-12);

    // Longitude 0 points up on south-pole maps
    let south = PolarStereo::new(Pole::South);
    let (u, v) = south.project(0.0, -55.0);
    assert_relative_eq!(u, 0.5, epsilon = 1e-12);
    assert_relative_eq!(v, 1.0, epsilon = 1e-12);

    assert!(north.contains(0.5, 0.0));
    assert!(north.contains(0.5, 0.5));
    assert!(!north.contains(0.9, 0.9));
}

#[test]
fn test_projection_inverse() {
    for pole in [Pole::North, Pole::South] {
        let proj = PolarStereo::new(pole);
        let lat = if pole == Pole::North { 70.0 } else { -70.0 };
        for lon in [-150.0, -30.0, 0.0, 45.0, 170.0] {
            let (u, v) = proj.project(lon, lat);
            let (lon2, lat2) = proj.inverse(u, v);
            assert_relative_eq!(lon2, lon, epsilon = 1e-9);
            assert_relative_eq!(lat2, lat, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_parallels() {
    assert_eq!(parallels(50.0, 90.0), vec![60.0, 70.0, 80.0]);
    assert_eq!(parallels(-55.0, -90.0), vec![-80.0, -70.0, -60.0]);
}

#[test]
fn test_subplot_extent() {
    let page = PageSize::new([8.5, 11.0], 100.0);
    let extent = subplot_extent(&POLAR_LAYOUT.panels[0], &POLAR_LAYOUT.border, &page);
    assert_relative_eq!(extent[0], (0.27 - 0.02) * 8.5, epsilon = 1e-9);
    assert_relative_eq!(extent[1], (0.65 - 0.01) * 11.0, epsilon = 1e-9);
    assert_relative_eq!(extent[2], (0.27 + 0.3235 + 0.14) * 8.5, epsilon = 1e-9);
    assert_relative_eq!(extent[3], (0.65 + 0.25 + 0.04) * 11.0, epsilon = 1e-9);

    let extent = subplot_extent(&ZONAL_MEAN_LAYOUT.panels[2], &ZONAL_MEAN_LAYOUT.border, &page);
    assert_relative_eq!(extent[0], (0.1691 - 0.06) * 8.5, epsilon = 1e-9);
    assert_relative_eq!(extent[1], (0.1112 - 0.03) * 11.0, epsilon = 1e-9);
}

#[test]
fn test_page_frames() {
    let page = PageSize::new([8.5, 11.0], 100.0);
    assert_eq!(page.pixel_size(), (850, 1100));

    let full = PageFrame::full(page);
    assert_eq!(full.to_pixel(0.0, 0.0), (0, 1100));
    assert_eq!(full.to_pixel(1.0, 1.0), (850, 0));
    assert_relative_eq!(full.points(72.0), 100.0);

    let extent = subplot_extent(&POLAR_LAYOUT.panels[0], &POLAR_LAYOUT.border, &page);
    let crop = PageFrame::cropped(page, extent);
    assert_eq!(crop.pixel_size(), (411, 330));

    // The panel's lower-left corner sits inside the crop, offset by the border
    let (x, y) = crop.to_pixel_f(0.27, 0.65);
    assert_relative_eq!(x, 0.02 * 8.5 * 100.0, epsilon = 1e-6);
    assert_relative_eq!(y, 330.0 - 0.01 * 11.0 * 100.0, epsilon = 1e-6);
}

#[test]
fn test_colorbar_rect_follows_panel() {
    let rect = POLAR_LAYOUT.colorbar_rect(1);
    assert_relative_eq!(rect.x, 0.27 + 0.35);
    assert_relative_eq!(rect.y, 0.35 + 0.0354);
    assert_relative_eq!(rect.w, 0.0326);
    assert_relative_eq!(rect.h, 0.1792);
}

#[test]
fn test_output_format_parsing() {
    assert_eq!("png".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
    assert_eq!("SVG".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
    assert_eq!(".svg".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
    assert_eq!("figure.png".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
    assert!(matches!(
        "pdf".parse::<OutputFormat>(),
        Err(RuNeDiagError::UnsupportedFormat { .. })
    ));

    let formats = parse_formats(&["png".to_string(), "svg".to_string()]).unwrap();
    assert_eq!(formats, vec![OutputFormat::Png, OutputFormat::Svg]);
    assert!(parse_formats(&["png".to_string(), "eps".to_string()]).is_err());
    assert_eq!(OutputFormat::Svg.extension(), "svg");
}

#[test]
fn test_field_shape_validation() {
    let data = Array2::<f64>::zeros((3, 4));
    let ok = GriddedField::new("T", data.clone(), vec![0.0; 4], vec![0.0; 3], "K");
    assert!(ok.is_ok());

    let bad = GriddedField::new("T", data, vec![0.0; 3], vec![0.0; 3], "K");
    assert!(matches!(bad, Err(RuNeDiagError::ShapeMismatch { .. })));

    let empty = GriddedField::new("T", Array2::<f64>::zeros((0, 0)), vec![], vec![], "K");
    assert!(empty.is_err());
}

#[test]
fn test_field_from_time_lat() {
    let data = Array2::from_shape_fn((12, 3), |(t, j)| (t * 10 + j) as f64);
    let time: Vec<f64> = (1..=12).map(|m| m as f64).collect();
    let field = GriddedField::from_time_lat("PRECT", data, time, vec![-30.0, 0.0, 30.0], "mm/day")
        .unwrap();

    assert_eq!(field.data.dim(), (3, 12));
    assert_relative_eq!(field.data[[2, 5]], 52.0);
}

#[test]
fn test_field_statistics_helpers() {
    let mut data = Array2::from_shape_fn((2, 3), |(j, i)| (j * 3 + i) as f64);
    data[[0, 1]] = f64::NAN;
    let field = GriddedField::new("T", data, vec![0.0, 1.0, 2.0], vec![0.0, 1.0], "K").unwrap();

    assert_eq!(field.valid_count(), 5);
    assert_eq!(field.finite_range(), Some((0.0, 5.0)));

    let all_nan = Array2::from_elem((2, 2), f64::NAN);
    let field = GriddedField::new("T", all_nan, vec![0.0, 1.0], vec![0.0, 1.0], "K").unwrap();
    assert_eq!(field.valid_count(), 0);
    assert_eq!(field.finite_range(), None);
}

#[test]
fn test_cyclic_longitude_and_sampling() {
    let lon = vec![0.0, 90.0, 180.0, 270.0];
    let lat = vec![60.0, 70.0, 80.0];
    let data = Array2::from_shape_fn((3, 4), |(_, i)| i as f64);
    let field = GriddedField::new("T", data, lon, lat, "K").unwrap();

    assert!(field.is_global_longitude());
    let cyclic = field.with_cyclic_longitude();
    assert_eq!(cyclic.x, vec![0.0, 90.0, 180.0, 270.0, 360.0]);
    assert_eq!(cyclic.data.dim(), (3, 5));
    assert_relative_eq!(cyclic.data[[1, 4]], cyclic.data[[1, 0]]);

    // Already cyclic fields are unchanged
    assert_eq!(cyclic.with_cyclic_longitude().x.len(), 5);

    // Across the seam, between 270° (value 3) and 360° (value 0)
    assert_relative_eq!(cyclic.sample_lon_lat(315.0, 70.0), 1.5, epsilon = 1e-12);
    assert_relative_eq!(cyclic.sample_lon_lat(-45.0, 70.0), 1.5, epsilon = 1e-12);
    assert_relative_eq!(cyclic.sample_lon_lat(45.0, 65.0), 0.5, epsilon = 1e-12);

    // Half a cell of slack beyond the outermost latitude
    assert!(cyclic.sample_lon_lat(0.0, 57.0).is_finite());
    assert!(cyclic.sample_lon_lat(0.0, 40.0).is_nan());
}

#[test]
fn test_regional_longitude_stays_open() {
    let lon = vec![0.0, 30.0, 60.0, 90.0];
    let lat = vec![60.0, 70.0, 80.0];
    let data = Array2::from_shape_fn((3, 4), |(_, i)| i as f64);
    let field = GriddedField::new("T", data, lon, lat, "K").unwrap();
    assert!(!field.is_global_longitude());

    let same = field.with_cyclic_longitude();
    assert_eq!(same.x, vec![0.0, 30.0, 60.0, 90.0]);
    assert_eq!(same.data.dim(), (3, 4));

    // Nothing is interpolated across the gap between 90° and 360°
    assert!(same.sample_lon_lat(180.0, 70.0).is_nan());
    assert!(same.sample_lon_lat(350.0, 70.0).is_nan());
    assert_relative_eq!(same.sample_lon_lat(45.0, 70.0), 1.5, epsilon = 1e-12);
}

#[test]
fn test_cell_edges() {
    assert_eq!(cell_edges(&[1.0, 2.0, 3.0]), vec![0.5, 1.5, 2.5, 3.5]);
    assert_eq!(cell_edges(&[5.0]), vec![4.5, 5.5]);
    assert!(cell_edges(&[]).is_empty());
}

#[test]
fn test_metrics_json() {
    let json = r#"{
        "test": {"min": 1.0, "mean": 2.346, "max": 3.0},
        "ref":  {"min": 0.5, "mean": 2.0, "max": 3.5},
        "diff": {"min": -1.0, "mean": 0.345, "max": 1.0},
        "misc": {"rmse": 0.5, "corr": 0.9}
    }"#;
    let metrics: MetricsDict = serde_json::from_str(json).unwrap();
    assert_relative_eq!(metrics.reference.max, 3.5);

    let [test, reference, diff] = metrics.panel_stats();
    assert_eq!(test.summary_lines(), ["3.00".to_string(), "2.35".to_string(), "1.00".to_string()]);
    assert!(test.comparison_lines().is_none());
    assert!(reference.comparison_lines().is_none());
    assert_eq!(
        diff.comparison_lines(),
        Some(["0.50".to_string(), "0.90".to_string()])
    );

    // Serialises back under the "ref" key
    let value = serde_json::to_value(&metrics).unwrap();
    assert!(value.get("ref").is_some());
    assert!(value.get("reference").is_none());
}

#[test]
fn test_parameter_defaults() {
    let params: PlotParameters = serde_json::from_str("{}").unwrap();
    assert_eq!(params, PlotParameters::default());
    assert_eq!(params.figsize, [8.5, 11.0]);
    assert_relative_eq!(params.dpi, 150.0);
    assert_eq!(params.output_format, vec!["png"]);
    assert!(params.output_format_subplot.is_empty());
    assert_eq!(params.test_colormap, "cet_rainbow");
    assert_eq!(params.reference_colormap, "cet_rainbow");
    assert_eq!(params.diff_colormap, "diverging_bwr");
    assert!(params.validate().is_ok());
}

#[test]
fn test_parameter_validation() {
    let params = PlotParameters {
        dpi: 0.0,
        ..PlotParameters::default()
    };
    assert!(matches!(
        params.validate(),
        Err(RuNeDiagError::InvalidParameter { .. })
    ));

    let params = PlotParameters {
        contour_levels: vec![1.0, 3.0, 2.0],
        ..PlotParameters::default()
    };
    assert!(params.validate().is_err());

    let params = PlotParameters {
        output_file: String::new(),
        ..PlotParameters::default()
    };
    assert!(params.validate().is_err());
}

#[test]
fn test_parameters_from_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("params.json");
    std::fs::write(
        &path,
        r#"{"dpi": 72, "diff_levels": [-2, -1, 0, 1, 2], "var_region": "polar_S"}"#,
    )
    .unwrap();

    let params = PlotParameters::from_json_file(&path).unwrap();
    assert_relative_eq!(params.dpi, 72.0);
    assert_eq!(params.diff_levels.len(), 5);
    assert_eq!(params.var_region, "polar_S");
    assert_eq!(params.test_title, "Test");
}

#[test]
fn test_get_output_dir_creates_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let params = PlotParameters {
        results_dir: dir.path().to_path_buf(),
        case_id: "model_vs_obs".to_string(),
        ..PlotParameters::default()
    };

    let out = get_output_dir("polar", &params).unwrap();
    assert_eq!(out, dir.path().join("polar").join("model_vs_obs"));
    assert!(out.is_dir());

    // Calling again on an existing directory is fine
    assert!(get_output_dir("polar", &params).is_ok());
}

#[test]
fn test_coastline_parsing() {
    let text = "# test coastline\n0 60\n10 61\n20 62\n> next\n100 70\n110 71\n\n5 5\n";
    let coast = Coastlines::parse(text).unwrap();
    // The trailing single point cannot form a line
    assert_eq!(coast.segments.len(), 2);
    assert_eq!(coast.segments[0].len(), 3);
    assert_eq!(coast.segments[1][1], (110.0, 71.0));

    assert!(Coastlines::parse("").unwrap().is_empty());
    assert!(matches!(
        Coastlines::parse("0 60\nbad line\n"),
        Err(RuNeDiagError::InvalidParameter { .. })
    ));
}

#[test]
fn test_month_initials() {
    let initials: String = (0..12).map(month_initial).collect();
    assert_eq!(initials, "JFMAMJJASOND");
    assert_eq!(month_initial(12), "J");
}

#[test]
fn test_latitude_labels_and_ticks() {
    assert_eq!(latitude_label(30.0), "30°N");
    assert_eq!(latitude_label(0.0), "0°");
    assert_eq!(latitude_label(-45.0), "45°S");
    assert_eq!(latitude_label(-22.5), "22.5°S");

    assert_eq!(
        latitude_ticks(-95.0, 95.0),
        vec![-90.0, -45.0, 0.0, 45.0, 90.0]
    );
    assert_eq!(
        latitude_ticks(-90.0, 90.0),
        vec![-90.0, -60.0, -30.0, 0.0, 30.0, 60.0, 90.0]
    );
}

#[test]
fn test_panel_titles() {
    let titles = PanelTitles::new(Some(""), Some("Test"), None);
    assert_eq!(titles.left, None);
    assert_eq!(titles.center.as_deref(), Some("Test"));
    assert_eq!(titles.right, None);
}
