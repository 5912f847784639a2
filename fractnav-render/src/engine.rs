use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use fractnav_core::{escape, Complex, CoordinateSystem, EscapeParams, UpdateFn, ViewportMapper};

use crate::iteration_field::IterationField;

/// Escape-test every pixel of `screen`, mapped onto `plane`.
///
/// Covers `x_min <= j < x_max`, `y_min <= i < y_max`. Rows are evaluated in
/// parallel; each row writes only its own slice of the field, so the result
/// does not depend on scheduling. A zero-area screen yields an empty field.
pub fn compute_iteration_field<F: UpdateFn>(
    screen: &CoordinateSystem<i32>,
    plane: &CoordinateSystem<f64>,
    params: &EscapeParams,
    update: &F,
) -> IterationField {
    let start = Instant::now();
    let width = screen.width().max(0) as u32;
    let height = screen.height().max(0) as u32;
    let mut field = IterationField::new(width, height, params.iter_max);
    if field.is_empty() {
        debug!(width, height, "Empty screen, nothing to iterate");
        return field;
    }

    debug!(width, height, iter_max = params.iter_max, "Computing iteration field");
    field
        .data
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(row, out)| {
            let i = screen.y_min() + row as i32;
            for (col, slot) in out.iter_mut().enumerate() {
                let j = screen.x_min() + col as i32;
                let c = ViewportMapper::scale(screen, plane, Complex::new(j as f64, i as f64));
                *slot = escape(c, params, update);
            }
        });

    info!(
        elapsed_ms = start.elapsed().as_millis(),
        width,
        height,
        iter_max = params.iter_max,
        "Iteration field complete"
    );
    field
}
