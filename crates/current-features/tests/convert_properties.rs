//! Behavioural tests for grid-to-feature conversion over generated grids.

use std::collections::HashSet;

use current_features::{
    convert, load_currents, round_property, write_feature_collection, ConversionOptions,
    CurrentFeatureCollection,
};
use netcdf_parser::VariableNames;
use ocean_common::{BoundingBox, VelocityGrid};
use test_utils::{
    assert_approx_eq, assert_coords_approx_eq, create_axis, create_current_field,
    create_grid_with_nans, create_masked_current_field, fixtures, write_fixture_file,
    CurrentsFixture,
};

fn bbox_of((lon_min, lat_min, lon_max, lat_max): (f64, f64, f64, f64)) -> BoundingBox {
    BoundingBox::new(lon_min, lat_min, lon_max, lat_max)
}

fn run(grid: &VelocityGrid, options: ConversionOptions) -> CurrentFeatureCollection {
    convert(grid, &options.quiet()).unwrap().collection
}

#[test]
fn test_stride_candidate_count() {
    let grid = create_current_field(17, 11, 27.0, 64.0, 0.25);

    for stride in 1..=6 {
        let fc = run(&grid, ConversionOptions::new().with_stride(stride));
        let expected = 11usize.div_ceil(stride) * 17usize.div_ceil(stride);
        assert_eq!(fc.len(), expected, "stride {}", stride);
    }
}

#[test]
fn test_stride_visits_multiples_only() {
    let grid = create_current_field(10, 10, 0.0, 0.0, 1.0);
    let fc = run(&grid, ConversionOptions::new().with_stride(3));

    for feature in &fc.features {
        let (lon, lat) = feature.position();
        assert_eq!(lon as usize % 3, 0);
        assert_eq!(lat as usize % 3, 0);
    }
}

#[test]
fn test_cap_is_exact_when_enough_cells() {
    let grid = create_current_field(50, 40, 27.0, 64.0, 0.25);

    for cap in [1, 7, 100, 1999, 2000] {
        let fc = run(&grid, ConversionOptions::new().with_max_features(cap));
        assert_eq!(fc.len(), cap);
    }

    let fc = run(&grid, ConversionOptions::new().with_max_features(5000));
    assert_eq!(fc.len(), 2000);
}

#[test]
fn test_capped_output_is_prefix_of_uncapped() {
    let grid = create_masked_current_field(30, 30, 7, 4);
    let full = run(&grid, ConversionOptions::new());
    let capped = run(&grid, ConversionOptions::new().with_max_features(25));

    assert_eq!(capped.features[..], full.features[..25]);
}

#[test]
fn test_masked_cells_never_emitted() {
    let grid = create_masked_current_field(40, 25, 42, 3);
    let fc = run(&grid, ConversionOptions::new());

    let valid = grid.sampled_cells(1).filter(|c| c.is_valid()).count();
    assert!(valid < grid.len());
    assert_eq!(fc.len(), valid);

    for feature in &fc.features {
        assert!(feature.properties.u.is_finite());
        assert!(feature.properties.v.is_finite());
        assert!(feature.properties.speed.is_finite());
    }
}

#[test]
fn test_nan_cells_skipped_regardless_of_bbox() {
    let nans = [(0, 0), (3, 1), (4, 4), (2, 3)];
    let u = create_grid_with_nans(5, 5, &nans);
    let v = vec![0.1; 25];
    let grid = VelocityGrid::new(create_axis(-2.0, 1.0, 5), create_axis(-2.0, 1.0, 5), u, v)
        .unwrap();

    let boxes = [
        None,
        Some(bbox_of(fixtures::bbox::GLOBAL)),
        Some(BoundingBox::new(-2.0, -2.0, 0.0, 0.0)),
    ];
    for bbox in boxes {
        let fc = run(&grid, ConversionOptions::new().with_bbox(bbox));
        for feature in &fc.features {
            let (lon, lat) = feature.position();
            let cell = ((lon + 2.0) as usize, (lat + 2.0) as usize);
            assert!(!nans.contains(&cell), "NaN cell {:?} emitted with {:?}", cell, bbox);
        }
    }

    let global = bbox_of(fixtures::bbox::GLOBAL);
    let global = run(&grid, ConversionOptions::new().with_bbox(Some(global)));
    assert_eq!(global.len(), 25 - nans.len());
}

#[test]
fn test_degenerate_bbox_keeps_single_cell() {
    let grid = create_current_field(5, 5, -2.0, -2.0, 1.0);
    let fc = run(&grid, ConversionOptions::new().with_bbox(Some(bbox_of(fixtures::bbox::POINT))));

    assert_eq!(fc.len(), 1);
    let (lon, lat) = fc.features[0].position();
    assert_coords_approx_eq!((lon, lat), (0.0, 0.0), 1e-12);
}

#[test]
fn test_bbox_filter_holds_for_every_feature() {
    let grid = create_current_field(72, 32, 27.0, 64.0, 0.25);
    let (lon_min, lat_min, lon_max, lat_max) = fixtures::bbox::NORTHWEST_RUSSIA;
    let bbox = BoundingBox::new(lon_min + 4.0, lat_min + 2.0, lon_max - 5.0, lat_max - 3.0);

    let fc = run(&grid, ConversionOptions::new().with_bbox(Some(bbox)));
    assert!(!fc.is_empty());

    for feature in &fc.features {
        let (lon, lat) = feature.position();
        assert!(bbox.contains_point(lon, lat), "({}, {}) outside {}", lon, lat, bbox);
    }

    let expected = grid
        .sampled_cells(1)
        .filter(|c| bbox.contains_point(c.lon, c.lat))
        .count();
    assert_eq!(fc.len(), expected);
}

#[test]
fn test_inverted_bbox_emits_nothing() {
    let grid = create_current_field(10, 10, 0.0, 0.0, 1.0);
    let fc = run(&grid, ConversionOptions::new().with_bbox(Some(bbox_of(fixtures::bbox::INVALID))));
    assert!(fc.is_empty());
}

#[test]
fn test_positions_are_unique() {
    let grid = create_masked_current_field(25, 25, 3, 5);
    let fc = run(&grid, ConversionOptions::new().with_stride(2));

    let seen: HashSet<(u64, u64)> = fc
        .features
        .iter()
        .map(|f| {
            let (lon, lat) = f.position();
            (lon.to_bits(), lat.to_bits())
        })
        .collect();
    assert_eq!(seen.len(), fc.len());
}

#[test]
fn test_properties_are_rounded_from_raw_components() {
    let grid = create_current_field(20, 20, 27.0, 64.0, 0.25);
    let fc = run(&grid, ConversionOptions::new());

    for (feature, cell) in fc.features.iter().zip(grid.sampled_cells(1)) {
        let (lon, lat) = feature.position();
        assert_coords_approx_eq!((lon, lat), (cell.lon, cell.lat), 1e-12);
        assert_eq!(feature.properties.u, round_property(cell.u));
        assert_eq!(feature.properties.v, round_property(cell.v));
        assert_eq!(feature.properties.speed, round_property(cell.speed()));
        assert_approx_eq!(feature.properties.speed, cell.speed(), 0.001);
    }
}

#[test]
fn test_netcdf_to_geojson_end_to_end() {
    let (dir, input) = write_fixture_file(
        &CurrentsFixture::two_by_two().with_time_steps(3).with_fill_value(-999.0),
        "northwest_russia_currents.nc",
    );

    let dataset = load_currents(&input, &VariableNames::default()).unwrap();
    let result = convert(&dataset.grid, &ConversionOptions::new().quiet()).unwrap();
    assert_eq!(result.total, 3);

    let output = dir.path().join("assets").join("northwest_russia_currents.geojson");
    write_feature_collection(&result.collection, &output).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["type"], "FeatureCollection");

    let features = value["features"].as_array().unwrap();
    assert_eq!(features.len(), 3);
    assert_eq!(
        features[2],
        serde_json::json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [10.0, 6.0] },
            "properties": { "u": 3.0, "v": 0.0, "speed": 3.0 }
        })
    );
}
