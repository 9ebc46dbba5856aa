//! End-to-end bakes through the public API with real JPEG files.
//!
//! Each test builds an input folder of synthetic photos in a temp dir, runs
//! the pipeline with the `image`-crate backend and a fixed date, and checks
//! what ends up on disk.

use chrono::NaiveDate;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tile_baker::bake::{BakeError, BakeEvent, BakeOutcome, BakeReport, bake_with_backend};
use tile_baker::config::{TileConfig, load_config};
use tile_baker::imaging::{ColorModel, Dimensions, ImageBackend, RustBackend};
use tile_baker::launcher::{FileLauncher, LaunchError};
use tile_baker::types::GridShape;

/// Stands in for the desktop viewer.
#[derive(Default)]
struct FakeViewer {
    opened: RefCell<Vec<PathBuf>>,
    unsupported: bool,
}

impl FileLauncher for FakeViewer {
    fn open(&self, path: &Path) -> Result<(), LaunchError> {
        if self.unsupported {
            return Err(LaunchError::UnsupportedPlatform("beos".to_string()));
        }
        self.opened.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

fn write_photo(path: &Path, width: u32, height: u32, color: [u8; 3]) {
    let img = RgbImage::from_pixel(width, height, Rgb(color));
    let file = std::fs::File::create(path).unwrap();
    image::codecs::jpeg::JpegEncoder::new_with_quality(std::io::BufWriter::new(file), 95)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
}

fn color(i: usize) -> [u8; 3] {
    let i = i as u8;
    [30 + i * 20, 220 - i * 20, 60 + i * 10]
}

/// `count` landscape photos named 01.jpg.., each a distinct solid color.
fn photo_folder(root: &Path, count: usize) -> PathBuf {
    let dir = root.join("img_in");
    std::fs::create_dir_all(&dir).unwrap();
    for i in 0..count {
        write_photo(&dir.join(format!("{:02}.jpg", i + 1)), 240, 160, color(i));
    }
    dir
}

/// 5x2 on 400x200: 80x100 cells.
fn config_for(root: &Path) -> TileConfig {
    let mut config = TileConfig::default();
    config.input_dir = root.join("img_in");
    config.output_dir = root.join("img_out");
    config.grid = GridShape::new(5, 2);
    config.canvas.width = 400;
    config.canvas.height = 200;
    config.canvas.overlap = 4;
    config.output.thumbnail_max_edge = 150;
    config
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

fn run(config: &TileConfig, viewer: &FakeViewer) -> Result<BakeOutcome, BakeError> {
    bake_with_backend(&RustBackend::new(), viewer, config, date(), |_| {})
}

fn completed(outcome: BakeOutcome) -> BakeReport {
    match outcome {
        BakeOutcome::Completed(report) => report,
        BakeOutcome::CountMismatch(m) => panic!("unexpected mismatch: {m}"),
    }
}

fn near(actual: [u8; 3], expected: [u8; 3]) -> bool {
    actual
        .iter()
        .zip(expected.iter())
        .all(|(a, e)| a.abs_diff(*e) <= 12)
}

#[test]
fn bake_produces_full_size_and_thumbnail() {
    let tmp = TempDir::new().unwrap();
    photo_folder(tmp.path(), 10);
    let viewer = FakeViewer::default();

    let report = completed(run(&config_for(tmp.path()), &viewer).unwrap());

    let out = tmp.path().join("img_out");
    assert_eq!(report.paths.high_res, std::path::absolute(out.join("20261017__department_tile.jpg")).unwrap());
    assert!(report.paths.low_res.ends_with("20261017__department_tile--SMALL.jpg"));

    let backend = RustBackend::new();
    assert_eq!(backend.identify(&report.paths.high_res).unwrap(), Dimensions::new(400, 200));
    assert_eq!(backend.identify(&report.paths.low_res).unwrap(), Dimensions::new(150, 75));
    assert_eq!(*viewer.opened.borrow(), vec![report.paths.high_res.clone()]);
}

#[test]
fn photos_land_in_file_name_order() {
    let tmp = TempDir::new().unwrap();
    photo_folder(tmp.path(), 10);

    let report = completed(run(&config_for(tmp.path()), &FakeViewer::default()).unwrap());
    let tile = RustBackend::new().load(&report.paths.high_res).unwrap().to_rgb8();

    for i in 0..10u32 {
        let (x, y) = ((i % 5) * 80 + 40, (i / 5) * 100 + 50);
        let pixel = tile.get_pixel(x, y).0;
        assert!(
            near(pixel, color(i as usize)),
            "cell {i} at ({x},{y}) is {pixel:?}, expected about {:?}",
            color(i as usize)
        );
    }
}

#[test]
fn wrong_count_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    photo_folder(tmp.path(), 7);
    let viewer = FakeViewer::default();

    match run(&config_for(tmp.path()), &viewer).unwrap() {
        BakeOutcome::CountMismatch(m) => {
            assert_eq!(m.found, 7);
            assert_eq!(m.expected(), 10);
        }
        BakeOutcome::Completed(_) => panic!("expected a count mismatch"),
    }
    assert!(!tmp.path().join("img_out").exists());
    assert!(viewer.opened.borrow().is_empty());
}

#[test]
fn non_jpeg_files_are_ignored() {
    let tmp = TempDir::new().unwrap();
    let input = photo_folder(tmp.path(), 10);
    std::fs::write(input.join("notes.txt"), "not a photo").unwrap();
    std::fs::create_dir(input.join("extra.jpg")).unwrap();

    completed(run(&config_for(tmp.path()), &FakeViewer::default()).unwrap());
}

#[test]
fn narrow_photo_is_flagged_and_bake_completes() {
    let tmp = TempDir::new().unwrap();
    let input = photo_folder(tmp.path(), 10);
    // 100 high → 20 wide, far below the 80 pixel cell
    write_photo(&input.join("06.jpg"), 40, 200, [255, 255, 255]);

    let mut events = Vec::new();
    let outcome = bake_with_backend(
        &RustBackend::new(),
        &FakeViewer::default(),
        &config_for(tmp.path()),
        date(),
        |e| events.push(e.clone()),
    )
    .unwrap();
    let report = completed(outcome);

    let flagged: Vec<_> = report.warnings().map(|c| c.source.file_name()).collect();
    assert_eq!(flagged, vec!["06.jpg"]);
    assert!(report.paths.high_res.exists());
    assert!(report.paths.low_res.exists());
    let composed = events
        .iter()
        .filter(|e| matches!(e, BakeEvent::CellComposed(_)))
        .count();
    assert_eq!(composed, 10);
}

#[test]
fn unsupported_platform_errors_after_saving() {
    let tmp = TempDir::new().unwrap();
    photo_folder(tmp.path(), 10);
    let viewer = FakeViewer {
        unsupported: true,
        ..Default::default()
    };

    let err = run(&config_for(tmp.path()), &viewer).unwrap_err();
    assert!(matches!(
        err,
        BakeError::Launch {
            source: LaunchError::UnsupportedPlatform(_),
            ..
        }
    ));
    let out = tmp.path().join("img_out");
    assert!(out.join("20261017__department_tile.jpg").exists());
    assert!(out.join("20261017__department_tile--SMALL.jpg").exists());
}

#[test]
fn viewer_not_opened_when_disabled() {
    let tmp = TempDir::new().unwrap();
    photo_folder(tmp.path(), 10);
    let mut config = config_for(tmp.path());
    config.output.open_viewer = false;
    let viewer = FakeViewer {
        unsupported: true,
        ..Default::default()
    };

    let report = completed(run(&config, &viewer).unwrap());
    assert!(!report.opened);
}

#[test]
fn rerun_on_same_day_replaces_output() {
    let tmp = TempDir::new().unwrap();
    photo_folder(tmp.path(), 10);
    let config = config_for(tmp.path());

    completed(run(&config, &FakeViewer::default()).unwrap());
    completed(run(&config, &FakeViewer::default()).unwrap());

    let count = std::fs::read_dir(tmp.path().join("img_out")).unwrap().count();
    assert_eq!(count, 2);
}

#[test]
fn grayscale_tile_from_config_file() {
    let tmp = TempDir::new().unwrap();
    photo_folder(tmp.path(), 6);
    let config_path = tmp.path().join("tile.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
input_dir = "{input}"
output_dir = "{output}"
output_name = "gray"

[grid]
columns = 3
rows = 2

[canvas]
width = 300
height = 200
color_model = "grayscale"
"#,
            input = tmp.path().join("img_in").display(),
            output = tmp.path().join("img_out").display(),
        ),
    )
    .unwrap();

    let config = load_config(&config_path).unwrap();
    let report = completed(run(&config, &FakeViewer::default()).unwrap());

    assert!(report.paths.high_res.ends_with("20261017__gray.jpg"));
    let tile = RustBackend::new().load(&report.paths.high_res).unwrap();
    assert_eq!((tile.width(), tile.height()), (300, 200));
    assert!(matches!(tile, image::DynamicImage::ImageLuma8(_)));
}

#[test]
fn cmyk_tile_keeps_canvas_and_thumbnail_sizes() {
    let tmp = TempDir::new().unwrap();
    photo_folder(tmp.path(), 10);
    let mut config = config_for(tmp.path());
    config.canvas.color_model = ColorModel::Cmyk;

    let report = completed(run(&config, &FakeViewer::default()).unwrap());

    let backend = RustBackend::new();
    assert_eq!(backend.identify(&report.paths.high_res).unwrap(), Dimensions::new(400, 200));
    assert_eq!(backend.identify(&report.paths.low_res).unwrap(), Dimensions::new(150, 75));
    let tile = backend.load(&report.paths.high_res).unwrap();
    assert_eq!((tile.width(), tile.height()), (400, 200));
}
