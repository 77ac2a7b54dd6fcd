// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end editor flows: zone definition, clipped building draws,
//! playground shrink cascades, and the geographic ingestion path.

use approx::assert_relative_eq;
use nalgebra::Point2;
use siteplan_geometry::{GeoPoint, ProjectionConfig, Ring, PLAYGROUND_SLAB_HEIGHT};
use siteplan_scene::{
    editor::{DrawOutcome, Editor},
    BuildingKey, BuildingObject, Error, ObjectId, PlaygroundObject, SceneObjectSet,
};

fn ring(points: &[(f64, f64)]) -> Ring {
    Ring::new(points.iter().map(|&(x, y)| Point2::new(x, y)).collect())
}

fn draw(editor: &mut Editor, points: &[(f64, f64)]) -> DrawOutcome {
    editor.begin_draw().unwrap();
    editor.commit_draw(ring(points)).unwrap()
}

fn draw_building(editor: &mut Editor, points: &[(f64, f64)]) -> BuildingKey {
    match draw(editor, points) {
        DrawOutcome::BuildingCreated(key, _) => key,
        other => panic!("expected a building, got {other:?}"),
    }
}

#[test]
fn zone_then_building_then_metadata() {
    let mut editor = Editor::default();

    // first polygon defines the zone at slab height
    let outcome = draw(&mut editor, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
    let DrawOutcome::PlaygroundCreated(update) = outcome else {
        panic!("expected playground, got {outcome:?}");
    };
    assert_relative_eq!(update.height, PLAYGROUND_SLAB_HEIGHT);

    // overlapping draw is confined to the zone
    let key = draw_building(&mut editor, &[(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0)]);
    let building = editor.objects().building(key).unwrap();
    assert_relative_eq!(building.ring.area().unwrap(), 25.0, epsilon = 1e-9);
    for &p in building.ring.iter() {
        assert!(editor
            .objects()
            .playground_ring()
            .unwrap()
            .contains_with_tolerance(p, 1e-9));
    }

    // floors x floor height drives the extrusion
    let update = editor.set_floor_metadata(key, 3, 3.5).unwrap();
    assert_relative_eq!(update.height, 10.5);
}

#[test]
fn disjoint_draw_creates_nothing() {
    let mut editor = Editor::default();
    draw(&mut editor, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);

    let outcome = draw(&mut editor, &[(20.0, 20.0), (25.0, 20.0), (25.0, 25.0), (20.0, 25.0)]);
    assert_eq!(outcome, DrawOutcome::Rejected);
    assert!(editor.objects().buildings.is_empty());
}

#[test]
fn playground_shrink_orphans_outlying_building() {
    let mut editor = Editor::default();
    draw(&mut editor, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);

    let inside = draw_building(&mut editor, &[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
    let outside = draw_building(&mut editor, &[(6.0, 6.0), (8.0, 6.0), (8.0, 8.0), (6.0, 8.0)]);

    // shrink the zone to 5x5; the second building falls entirely outside
    editor.begin_edit(ObjectId::Playground).unwrap();
    let report = editor
        .commit_playground_edit(ring(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0), (0.0, 5.0)]))
        .unwrap();

    assert_eq!(report.orphaned, vec![outside]);
    // playground update plus the surviving building
    assert_eq!(report.updates.len(), 2);

    // the orphan's record persists with an emptied ring, flagged not deleted
    let orphan = editor.objects().building(outside).unwrap();
    assert!(orphan.is_orphaned());
    assert!(orphan.ring.is_empty());
    assert_eq!(editor.objects().orphaned_buildings(), vec![outside]);

    // the surviving building kept its footprint
    let kept = editor.objects().building(inside).unwrap();
    assert_relative_eq!(kept.ring.area().unwrap(), 4.0, epsilon = 1e-9);
}

#[test]
fn cascade_uses_one_boundary_snapshot() {
    let mut editor = Editor::default();
    draw(&mut editor, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);

    let keys: Vec<_> = [
        [(1.0, 1.0), (4.0, 1.0), (4.0, 4.0), (1.0, 4.0)],
        [(4.0, 4.0), (7.0, 4.0), (7.0, 7.0), (4.0, 7.0)],
        [(7.0, 7.0), (9.0, 7.0), (9.0, 9.0), (7.0, 9.0)],
    ]
    .iter()
    .map(|points| draw_building(&mut editor, points))
    .collect();

    editor.begin_edit(ObjectId::Playground).unwrap();
    let report = editor
        .commit_playground_edit(ring(&[(0.0, 0.0), (6.0, 0.0), (6.0, 6.0), (0.0, 6.0)]))
        .unwrap();

    // every building was re-clipped against the same 6x6 boundary
    assert_relative_eq!(
        editor.objects().building(keys[0]).unwrap().ring.area().unwrap(),
        9.0,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        editor.objects().building(keys[1]).unwrap().ring.area().unwrap(),
        4.0,
        epsilon = 1e-9
    );
    assert_eq!(report.orphaned, vec![keys[2]]);
}

#[test]
fn failed_cascade_leaves_prior_state_untouched() {
    // a loaded object set can carry metadata the editor itself would have
    // rejected; a cascade that trips over it must not half-apply
    let old_boundary = ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
    let mut set = SceneObjectSet::new();
    set.playground = Some(PlaygroundObject::new(old_boundary.clone()));
    let good = set.insert_building(BuildingObject::new(ring(&[
        (1.0, 1.0),
        (3.0, 1.0),
        (3.0, 3.0),
        (1.0, 3.0),
    ])));
    let mut corrupt = BuildingObject::new(ring(&[(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0)]));
    corrupt.floors = 0;
    let bad = set.insert_building(corrupt);

    let mut editor = Editor::with_objects(ProjectionConfig::default(), set);
    editor.begin_edit(ObjectId::Playground).unwrap();
    let err = editor
        .commit_playground_edit(ring(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0), (0.0, 5.0)]))
        .unwrap_err();
    assert!(matches!(err, Error::Geometry(_)));

    // the boundary and every footprint still hold their pre-edit geometry
    assert_eq!(editor.objects().playground_ring().unwrap(), &old_boundary);
    assert_relative_eq!(
        editor.objects().building(good).unwrap().ring.area().unwrap(),
        4.0,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        editor.objects().building(bad).unwrap().ring.area().unwrap(),
        4.0,
        epsilon = 1e-9
    );
}

#[test]
fn geographic_draw_round_trips_through_planar_space() {
    let config = ProjectionConfig::default();
    let editor = Editor::new(config);

    let geo = vec![
        GeoPoint::new(148.9815, -35.3983),
        GeoPoint::new(148.9823, -35.3983),
        GeoPoint::new(148.9823, -35.3987),
        GeoPoint::new(148.9815, -35.3987),
    ];
    let planar = editor.planar_ring(&geo).unwrap();
    assert!(planar.is_valid());
    assert!(planar.area().unwrap() > 0.0);

    let back = editor.geo_ring(&planar);
    assert_eq!(back.len(), geo.len());
    for (orig, round) in geo.iter().zip(back.iter()) {
        assert_relative_eq!(orig.longitude, round.longitude, epsilon = 1e-9);
        assert_relative_eq!(orig.latitude, round.latitude, epsilon = 1e-9);
    }
}

#[test]
fn invalid_coordinate_aborts_draw_without_state_change() {
    let mut editor = Editor::default();
    editor.begin_draw().unwrap();

    let geo = vec![
        GeoPoint::new(148.98, -35.39),
        GeoPoint::new(200.0, -35.39), // out of range
        GeoPoint::new(148.99, -35.40),
    ];
    assert!(editor.planar_ring(&geo).is_err());
    assert!(!editor.objects().has_playground());
}
