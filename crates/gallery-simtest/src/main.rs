//! Gallery Headless Layout Harness
//!
//! Generates the shipped museum from the bundled data files and re-checks
//! every layout invariant. Runs entirely in-process, no rendering.
//!
//! Usage:
//!   cargo run -p gallery-simtest
//!   cargo run -p gallery-simtest -- --verbose
//!   cargo run -p gallery-simtest -- --json
//!   RUST_LOG=debug cargo run -p gallery-simtest

use std::collections::HashSet;

use gallery_logic::config::{parse_artworks, parse_catalog, GalleryConfig};
use gallery_logic::constants::player::PLAYER_RADIUS;
use gallery_logic::floor_plan::{Boundary, FloorPlan};
use gallery_logic::gallery::Gallery;
use gallery_logic::geometry::{validate_floor_plan, Aabb, Severity, Vec3};
use gallery_logic::layout::{is_corner_blocked, wall_capacity, ArtworkMeta};
use gallery_logic::movement::{compute_move, MoveInput, MoveResult};
use gallery_logic::statue::{corrected_bounds, StatueAsset};
use gallery_logic::walls::WallSegment;
use serde::Serialize;

// ── Bundled data (same JSON the viewer loads) ───────────────────────────
const CONFIG_JSON: &str = include_str!("../../../data/gallery.json");
const ARTWORKS_JSON: &str = include_str!("../../../data/artworks.json");
const STATUES_JSON: &str = include_str!("../../../data/statues.json");

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn check(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    passed: usize,
    failed: usize,
    summary: Option<gallery_logic::gallery::GallerySummary>,
    results: &'a [TestResult],
}

fn main() {
    env_logger::init();
    let verbose = std::env::args().any(|a| a == "--verbose");
    let json = std::env::args().any(|a| a == "--json");
    if !json {
        println!("=== Gallery Layout Harness ===\n");
    }

    let mut results = Vec::new();

    // 1. Bundled data files
    let data = load_data(&mut results);

    let summary = data.map(|(config, artworks)| {
        let gallery = Gallery::generate(FloorPlan::museum(), artworks, config);

        // 2. Floor plan geometry
        results.extend(validate_plan(&gallery, verbose));

        // 3. Artwork layout invariants
        results.extend(validate_layout(&gallery, verbose));

        // 4. Determinism
        results.extend(validate_determinism(&gallery));

        // 5. Statue seating and fallbacks
        results.extend(validate_statues(&gallery, verbose));

        // 6. Walking through every doorway
        results.extend(validate_walkthrough(&gallery));

        gallery.summary()
    });

    // ── Summary ──
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    if json {
        let report = JsonReport {
            passed,
            failed,
            summary,
            results: &results,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("failed to encode report: {e}"),
        }
    } else {
        println!();
        if let Some(summary) = summary {
            println!("  {summary}\n");
        }
        for r in &results {
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || verbose {
                println!("  {} {}: {}", icon, r.name, r.detail);
            }
        }
        println!(
            "\n=== RESULT: {}/{} passed, {} failed ===",
            passed, total, failed
        );
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Data files ───────────────────────────────────────────────────────

fn load_data(results: &mut Vec<TestResult>) -> Option<(GalleryConfig, Vec<ArtworkMeta>)> {
    let config = GalleryConfig::from_json_str(CONFIG_JSON);
    results.push(TestResult::check(
        "config_parse",
        config.is_ok(),
        match &config {
            Ok(c) if *c == GalleryConfig::default() => "matches built-in defaults".to_string(),
            Ok(_) => "parsed (overrides defaults)".to_string(),
            Err(e) => e.to_string(),
        },
    ));

    let artworks = parse_artworks(ARTWORKS_JSON);
    results.push(TestResult::check(
        "artworks_parse",
        artworks.is_ok(),
        match &artworks {
            Ok(a) => format!("{} artworks loaded", a.len()),
            Err(e) => e.to_string(),
        },
    ));

    let catalog = parse_catalog(STATUES_JSON);
    results.push(TestResult::check(
        "catalog_parse",
        catalog.as_ref().map(|c| !c.is_empty()).unwrap_or(false),
        match &catalog {
            Ok(c) => format!("{} statue models", c.len()),
            Err(e) => e.to_string(),
        },
    ));

    let (config, artworks, catalog) = match (config, artworks, catalog) {
        (Ok(c), Ok(a), Ok(s)) => (c, a, s),
        _ => return None,
    };

    log::debug!(
        "bundled data: {} artworks, {} statue models",
        artworks.len(),
        catalog.len()
    );

    let mut seen = HashSet::new();
    let dupes: Vec<&str> = artworks
        .iter()
        .filter(|a| !seen.insert(a.file.as_str()))
        .map(|a| a.file.as_str())
        .collect();
    results.push(TestResult::check(
        "artworks_unique_files",
        dupes.is_empty(),
        if dupes.is_empty() {
            "every file listed once".to_string()
        } else {
            format!("duplicates: {}", dupes.join(", "))
        },
    ));

    let bad_ext: Vec<&str> = artworks
        .iter()
        .map(|a| a.file.as_str())
        .filter(|f| !(f.ends_with(".jpg") || f.ends_with(".png")))
        .collect();
    results.push(TestResult::check(
        "artworks_image_files",
        bad_ext.is_empty(),
        format!("{} non-image entries", bad_ext.len()),
    ));

    Some((config.with_catalog(catalog), artworks))
}

// ── 2. Floor plan ───────────────────────────────────────────────────────

fn validate_plan(gallery: &Gallery, verbose: bool) -> Vec<TestResult> {
    if verbose {
        println!("--- Floor Plan ---");
    }
    let mut results = Vec::new();

    let issues = validate_floor_plan(&gallery.plan);
    let errors = issues
        .iter()
        .filter(|e| e.severity == Severity::Error)
        .count();
    results.push(TestResult::check(
        "plan_valid",
        errors == 0,
        format!("{} errors, {} warnings", errors, issues.len() - errors),
    ));
    if verbose {
        for e in &issues {
            println!("    [{:?}] {}: {}", e.severity, e.category, e.message);
        }
    }

    let degenerate = gallery
        .walls
        .segments
        .iter()
        .filter(|s| s.length() < gallery.config.walls.min_clearance)
        .count();
    results.push(TestResult::check(
        "walls_non_degenerate",
        degenerate == 0,
        format!("{} segments, {} degenerate", gallery.walls.len(), degenerate),
    ));

    // Doorway split: nothing inside any doorway opening
    let mut blocked_doors = 0;
    for room in &gallery.plan.rooms {
        let r = room.rect;
        let sides = [
            (room.south, true, r.z0, r.x0, r.x1),
            (room.north, true, r.z1, r.x0, r.x1),
            (room.west, false, r.x0, r.z0, r.z1),
            (room.east, false, r.x1, r.z0, r.z1),
        ];
        for (boundary, along_x, fixed, lo, hi) in sides {
            let Boundary::Doorway { width } = boundary else {
                continue;
            };
            let mid = (lo + hi) / 2.0;
            let (open_lo, open_hi) = (mid - width / 2.0, mid + width / 2.0);
            blocked_doors += gallery
                .walls
                .segments
                .iter()
                .filter(|s| matches!(s, WallSegment::AlongX { .. }) == along_x)
                .filter(|s| (s.fixed() - fixed).abs() < 1e-4)
                .filter(|s| s.start() < open_hi - 1e-4 && s.end() > open_lo + 1e-4)
                .count();
        }
    }
    results.push(TestResult::check(
        "doorways_open",
        blocked_doors == 0,
        format!("{blocked_doors} segments intrude on doorways"),
    ));

    // Section/divider alignment
    let mut misaligned = 0;
    for section in &gallery.sections {
        let room = &gallery.plan.rooms[section.room];
        let s = section.rect;
        let ok_x = |x: f32| x == room.rect.x0 || x == room.rect.x1 || Some(x) == room.x_cut();
        let ok_z = |z: f32| z == room.rect.z0 || z == room.rect.z1 || Some(z) == room.z_cut();
        if !(ok_x(s.x0) && ok_x(s.x1) && ok_z(s.z0) && ok_z(s.z1)) {
            misaligned += 1;
        }
    }
    results.push(TestResult::check(
        "sections_follow_dividers",
        misaligned == 0,
        format!("{} sections, {} misaligned", gallery.sections.len(), misaligned),
    ));

    results
}

// ── 3. Artwork layout ───────────────────────────────────────────────────

fn validate_layout(gallery: &Gallery, verbose: bool) -> Vec<TestResult> {
    if verbose {
        println!("--- Artwork Layout ---");
    }
    let mut results = Vec::new();
    let params = &gallery.config.layout;
    let segments = &gallery.walls.segments;
    let placements = &gallery.layout.placements;
    let capacity = wall_capacity(segments, params);

    results.push(TestResult::check(
        "no_over_placement",
        placements.len() == gallery.artworks.len().min(capacity),
        format!(
            "{} placed, {} artworks, {} slots",
            placements.len(),
            gallery.artworks.len(),
            capacity
        ),
    ));

    let in_order = placements.iter().enumerate().all(|(i, p)| p.artwork == i);
    results.push(TestResult::check(
        "artworks_in_list_order",
        in_order,
        "cursor advances one artwork per placed frame",
    ));

    let inset = params.edge_margin + params.frame_width / 2.0;
    let margin_violations = placements
        .iter()
        .filter(|p| {
            let s = &segments[p.segment];
            p.along - s.start() < inset - 1e-3 || s.end() - p.along < inset - 1e-3
        })
        .count();
    results.push(TestResult::check(
        "margin_invariant",
        margin_violations == 0,
        format!("{margin_violations} frames closer than {inset:.2} m to a segment end"),
    ));

    let corner_violations = placements
        .iter()
        .filter(|p| is_corner_blocked(&segments[p.segment], p.along, segments, params))
        .count();
    results.push(TestResult::check(
        "corner_exclusion",
        corner_violations == 0,
        format!(
            "{} corner slots skipped, {} violations",
            gallery.layout.blocked_slots, corner_violations
        ),
    ));

    let face = gallery.config.walls.face_offset() + params.gap_from_wall;
    let off_wall = placements
        .iter()
        .filter(|p| {
            let s = &segments[p.segment];
            let (x, z) = s.point_at(p.along, face);
            (x - p.position.x).abs() > 1e-4 || (z - p.position.z).abs() > 1e-4
        })
        .count();
    results.push(TestResult::check(
        "frames_on_wall_faces",
        off_wall == 0,
        format!("{off_wall} frames off their wall face"),
    ));

    if verbose {
        for p in placements.iter().take(8) {
            let art = &gallery.artworks[p.artwork];
            println!(
                "    #{:<3} seg {:<2} ({:>6.2}, {:>6.2}) yaw {:>5.2}  {}",
                p.artwork,
                p.segment,
                p.position.x,
                p.position.z,
                p.yaw,
                art.caption()
            );
        }
    }

    results
}

// ── 4. Determinism ──────────────────────────────────────────────────────

fn validate_determinism(gallery: &Gallery) -> Vec<TestResult> {
    let again = Gallery::generate(
        gallery.plan.clone(),
        gallery.artworks.clone(),
        gallery.config.clone(),
    );
    let result = match (gallery.fingerprint(), again.fingerprint()) {
        (Ok(a), Ok(b)) => TestResult::check(
            "deterministic_layout",
            a == b,
            format!("{} byte fingerprint", a.len()),
        ),
        (Err(e), _) | (_, Err(e)) => TestResult::check("deterministic_layout", false, e.to_string()),
    };
    vec![result]
}

// ── 5. Statues ──────────────────────────────────────────────────────────

fn validate_statues(gallery: &Gallery, verbose: bool) -> Vec<TestResult> {
    if verbose {
        println!("--- Statues ---");
    }
    let mut results = Vec::new();
    let params = &gallery.config.statues;

    results.push(TestResult::check(
        "statue_per_section",
        gallery.statues.len() == gallery.sections.len(),
        format!(
            "{} requests for {} sections",
            gallery.statues.len(),
            gallery.sections.len()
        ),
    ));

    // Synthetic model bounds, one per long axis
    let shapes = [
        Aabb::new(Vec3::new(-0.3, 0.0, -0.3), Vec3::new(0.3, 1.8, 0.3)),
        Aabb::new(Vec3::new(-1.0, -0.2, -0.3), Vec3::new(1.0, 0.2, 0.3)),
        Aabb::new(Vec3::new(-0.2, 0.1, -1.2), Vec3::new(0.2, 0.5, 1.2)),
    ];
    let mut unseated = 0;
    for (i, req) in gallery.statues.iter().enumerate() {
        let bounds = &shapes[i % shapes.len()];
        let pose = req.on_loaded(bounds, params);
        let fitted = corrected_bounds(bounds, pose.correction, pose.scale);
        let bottom = fitted.min.y + pose.translation.y;
        let upright = fitted.extents().y >= fitted.extents().x.max(fitted.extents().z) - 1e-4;
        if (bottom - params.plinth_height).abs() > 1e-4 || !upright {
            unseated += 1;
        }
        if verbose {
            println!(
                "    section {} {:<24} {:?} y={:.3} yaw={:+.2}",
                req.anchor.section,
                req.asset.model_file,
                pose.correction,
                pose.translation.y,
                pose.yaw
            );
        }
    }
    results.push(TestResult::check(
        "statues_upright_on_plinths",
        unseated == 0,
        format!("{unseated} statues not seated upright"),
    ));

    let bad_fallbacks = gallery
        .statues
        .iter()
        .map(|req| (req, req.on_failed("harness", params)))
        .filter(|(req, fb)| {
            let bottom = fb.pose.translation.y - fb.kind.height() / 2.0;
            (bottom - params.plinth_height).abs() > 1e-4
                || (fb.pose.translation.x - req.anchor.x).abs() > 1e-4
                || (fb.pose.translation.z - req.anchor.z).abs() > 1e-4
        })
        .count();
    results.push(TestResult::check(
        "fallbacks_on_plinths",
        bad_fallbacks == 0,
        format!("{bad_fallbacks} misplaced fallbacks"),
    ));

    let missing_paths = gallery
        .statues
        .iter()
        .map(|r| &r.asset)
        .filter(|a: &&StatueAsset| !a.model_path().ends_with(".glb"))
        .count();
    results.push(TestResult::check(
        "statue_paths",
        missing_paths == 0,
        format!("{missing_paths} requests without a .glb model"),
    ));

    results
}

// ── 6. Walkthrough ──────────────────────────────────────────────────────

/// Walk out of each room through every doorway, starting a few meters
/// inside on the doorway's center line.
fn validate_walkthrough(gallery: &Gallery) -> Vec<TestResult> {
    let colliders = &gallery.walls.colliders;
    let mut stuck = Vec::new();
    let mut walked = 0;

    for room in &gallery.plan.rooms {
        let r = room.rect;
        let (cx, cz) = r.center();
        let doors = [
            (room.south, (cx, r.z0 + 3.0), (cx, r.z0 - 1.0)),
            (room.north, (cx, r.z1 - 3.0), (cx, r.z1 + 1.0)),
            (room.west, (r.x0 + 3.0, cz), (r.x0 - 1.0, cz)),
            (room.east, (r.x1 - 3.0, cz), (r.x1 + 1.0, cz)),
        ];
        for (boundary, (mut x, mut z), (tx, tz)) in doors {
            if !matches!(boundary, Boundary::Doorway { .. }) {
                continue;
            }
            walked += 1;
            let steps = 200;
            let (dx, dz) = ((tx - x) / steps as f32, (tz - z) / steps as f32);
            for _ in 0..steps {
                let result = compute_move(
                    &MoveInput {
                        px: x,
                        pz: z,
                        dx,
                        dz,
                        player_radius: PLAYER_RADIUS,
                    },
                    colliders,
                );
                (x, z) = result.position();
                if matches!(result, MoveResult::Blocked { .. }) {
                    break;
                }
            }
            if (x - tx).abs() > 1e-2 || (z - tz).abs() > 1e-2 {
                stuck.push(format!("{} → ({tx}, {tz}) stopped at ({x:.2}, {z:.2})", room.name));
            }
        }
    }

    vec![TestResult::check(
        "doorways_walkable",
        stuck.is_empty(),
        if stuck.is_empty() {
            format!("walked through {walked} doorways")
        } else {
            stuck.join("; ")
        },
    )]
}
