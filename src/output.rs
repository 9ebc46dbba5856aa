//! CLI output formatting for the bake and check commands.
//!
//! The console is the operator's only feedback, so each cell gets one line
//! naming its grid slot and source file, padded with dots to a fixed column
//! and followed by its status:
//!
//! ```text
//! ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~ TILE BAKER ~~~
//!
//! >>> Info: The height of each image is fitted to the defined
//!  tile space (5x2 images on 2800x1500 pixels). ...
//!
//! ==> Found 10 images in img_in (grid needs 10)
//! Process  1 (h: 1|v: 1): 001-anna.jpg ....................... OK
//! Process  2 (h: 2|v: 1): 002-ben.jpg ........................ WARNING/ERROR
//!  >>> Image ratio mismatch; image width is too small after fitting to height (412 < 560 px).
//!  >>> Please crop it manually with an image editor of your choice and run again!
//! ...
//! Saved full size 2800x1500 → /abs/img_out/20261017__department_tile.jpg
//! Saved thumbnail 1000x536 → /abs/img_out/20261017__department_tile--SMALL.jpg
//!
//! Finished! >>> /abs/img_out/20261017__department_tile.jpg
//! ```
//!
//! Every block has a `format_*` function (returns `Vec<String>`) for
//! testability and, where the binary needs one, a `print_*` wrapper that
//! writes to stdout. Format functions are pure.

use crate::bake::{BakeEvent, CheckOutcome, Variant};
use crate::config::TileConfig;
use crate::scan::CountMismatch;
use crate::types::{CellReport, CellStatus};
use std::path::Path;

/// Width the cell header is dot-padded to.
const CELL_COLUMN: usize = 60;

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Preamble
// ============================================================================

/// The title rule, 80 columns wide, followed by a blank line.
pub fn format_banner() -> Vec<String> {
    vec![format!("{:~>80}", " TILE BAKER ~~~"), String::new()]
}

/// How cells are fitted, and what to do about unwanted clipping.
pub fn format_fit_info(config: &TileConfig) -> Vec<String> {
    let canvas = config.canvas_size();
    vec![
        ">>> Info: The height of each image is fitted to the defined".to_string(),
        format!(
            " tile space ({} images on {} pixels). If you want to change",
            config.grid, canvas
        ),
        " the clipping of an image, you will have to crop it with an image".to_string(),
        " editor of your choice.".to_string(),
        format!(
            " Images fill the grid row by row in file name order ({}).",
            config.input_dir.display()
        ),
        String::new(),
    ]
}

/// Images on a network share may fail to load under Windows security
/// settings. Shown only when running on Windows.
pub fn format_network_share_notice() -> Vec<String> {
    vec![
        ">>> Info: Due to your security settings in Windows, running this tool".to_string(),
        " directly on a network share (like \\\\server\\...) may fail to load".to_string(),
        " some of the images. Please copy all files to a local drive like C:\\,".to_string(),
        " D:\\, ... and run it again.".to_string(),
        String::new(),
    ]
}

pub fn print_preamble(config: &TileConfig) {
    print_lines(&format_banner());
    if cfg!(windows) {
        print_lines(&format_network_share_notice());
    }
    print_lines(&format_fit_info(config));
}

// ============================================================================
// Cells
// ============================================================================

/// One progress entry per cell. Grid coordinates are shown one-based.
///
/// ```text
/// Process  7 (h: 2|v: 2): 007.jpg ........................... OK
/// ```
pub fn format_cell_lines(report: &CellReport) -> Vec<String> {
    let head = format!(
        "Process {:>2} (h:{:>2}|v:{:>2}): {} ",
        report.position.index + 1,
        report.position.column + 1,
        report.position.row + 1,
        report.source.file_name()
    );
    match report.status {
        CellStatus::Ok => vec![format!("{:.<width$} OK", head, width = CELL_COLUMN)],
        CellStatus::RatioMismatch {
            resized_width,
            cell_width,
        } => vec![
            format!("{:.<width$} WARNING/ERROR", head, width = CELL_COLUMN),
            format!(
                " >>> Image ratio mismatch; image width is too small after fitting to height ({} < {} px).",
                resized_width, cell_width
            ),
            " >>> Please crop it manually with an image editor of your choice and run again!"
                .to_string(),
        ],
    }
}

// ============================================================================
// Bake
// ============================================================================

fn variant_label(variant: Variant) -> &'static str {
    match variant {
        Variant::HighRes => "full size",
        Variant::Thumbnail => "thumbnail",
    }
}

pub fn format_bake_event(event: &BakeEvent) -> Vec<String> {
    match event {
        BakeEvent::Discovered {
            input_dir,
            found,
            expected,
        } => vec![format!(
            "==> Found {} images in {} (grid needs {})",
            found,
            input_dir.display(),
            expected
        )],
        BakeEvent::CellComposed(report) => format_cell_lines(report),
        BakeEvent::Saved {
            variant,
            path,
            dimensions,
            replaced,
        } => {
            let mut line = format!(
                "Saved {} {} → {}",
                variant_label(*variant),
                dimensions,
                path.display()
            );
            if *replaced {
                line.push_str(" (replaced)");
            }
            vec![line]
        }
        BakeEvent::Opened(path) => vec![format!("Opened {} in the default viewer", path.display())],
    }
}

pub fn print_bake_event(event: &BakeEvent) {
    print_lines(&format_bake_event(event));
}

/// Why nothing was baked.
pub fn format_count_mismatch(mismatch: &CountMismatch) -> Vec<String> {
    vec![
        format!("{}!", mismatch),
        "Please adjust the grid size or the number of images...".to_string(),
    ]
}

pub fn print_count_mismatch(mismatch: &CountMismatch) {
    print_lines(&format_count_mismatch(mismatch));
}

pub fn format_finished(high_res: &Path) -> Vec<String> {
    vec![
        String::new(),
        format!("Finished! >>> {}", high_res.display()),
        String::new(),
    ]
}

pub fn print_finished(high_res: &Path) {
    print_lines(&format_finished(high_res));
}

// ============================================================================
// Check
// ============================================================================

/// Predicted fit of every cell, closed by a one-line verdict.
pub fn format_check_output(outcome: &CheckOutcome) -> Vec<String> {
    match outcome {
        CheckOutcome::CountMismatch(mismatch) => format_count_mismatch(mismatch),
        CheckOutcome::Ready(cells) => {
            let mut lines: Vec<String> = cells.iter().flat_map(format_cell_lines).collect();
            let flagged = cells.iter().filter(|c| !c.status.is_ok()).count();
            lines.push(String::new());
            if flagged == 0 {
                lines.push(format!("==> All {} images fit their cells", cells.len()));
            } else {
                lines.push(format!(
                    "==> {} of {} images are too narrow for their cells",
                    flagged,
                    cells.len()
                ));
            }
            lines
        }
    }
}

pub fn print_check_output(outcome: &CheckOutcome) {
    print_lines(&format_check_output(outcome));
}

// ============================================================================
// Tests
// ============================================================================
