//! Drop region classification command.

use tiledock_core::geometry::drop_region_with_band;
use tiledock_core::{Point, Rect};

use crate::error::CliError;
use crate::util::CliContext;

/// Region command handler
pub fn cmd_region(
    context: &CliContext,
    bounds: Rect,
    point: Point,
    band: Option<f64>,
) -> Result<(), CliError> {
    let band = match band {
        Some(band) if band.is_finite() && band > 0.0 => band,
        Some(band) => {
            return Err(CliError::Usage(format!("band must be a positive number, got {band}")));
        }
        None => context.settings()?.layout.effective_band(),
    };
    let region = drop_region_with_band(&bounds, point, band);
    match region.split_direction() {
        Some(direction) => println!("{region} (splits {direction})"),
        None => println!("{region} (adds a tab)"),
    }
    Ok(())
}
