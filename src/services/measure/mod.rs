// Measurement Service
//
// Precomputes member column widths and the day row height from rendered
// text sizes. Columns are fanned out over scoped worker threads and the
// results merged after the scope joins; callers hold &mut on the grid for
// the duration, so nothing can paint against half-measured sizes.

use egui::Vec2;

use crate::models::member::Members;
use crate::models::work_items::WorkItems;

/// Sizes produced by a measurement pass. `col_widths` is keyed by member id
/// (position in the member list), not by visible column.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredSizes {
    pub col_widths: Vec<f32>,
    pub row_height: f32,
}

/// What to measure and the floors/padding to apply.
pub struct MeasureInput<'a> {
    pub members: &'a Members,
    pub items: &'a WorkItems,
    pub min_col_width: f32,
    pub min_row_height: f32,
    pub padding: f32,
}

/// Measure with a worker count chosen from the machine.
pub fn measure_columns(
    input: &MeasureInput<'_>,
    measure: &(dyn Fn(&str) -> Vec2 + Sync),
) -> MeasuredSizes {
    let workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    measure_columns_with(input, measure, workers)
}

/// Measure with an explicit worker count. The result is identical for any
/// count; only the partitioning changes.
pub fn measure_columns_with(
    input: &MeasureInput<'_>,
    measure: &(dyn Fn(&str) -> Vec2 + Sync),
    workers: usize,
) -> MeasuredSizes {
    let total = input.members.len();
    if total == 0 {
        return MeasuredSizes {
            col_widths: Vec::new(),
            row_height: input.min_row_height,
        };
    }

    let chunk = total.div_ceil(workers.clamp(1, total));
    let mut col_widths = vec![input.min_col_width; total];
    let mut row_height = input.min_row_height;

    std::thread::scope(|scope| {
        let mut handles = Vec::new();
        for start in (0..total).step_by(chunk) {
            let end = (start + chunk).min(total);
            handles.push(scope.spawn(move || measure_range(input, measure, start, end)));
        }
        for handle in handles {
            match handle.join() {
                Ok((start, widths, tallest)) => {
                    for (index, width) in widths.into_iter().enumerate() {
                        col_widths[start + index] = width;
                    }
                    row_height = row_height.max(tallest + input.padding / 2.0);
                }
                Err(_) => log::error!("measurement worker panicked, keeping minimum sizes"),
            }
        }
    });

    log::debug!("measured {} member column(s) with {} worker(s)", total, workers);
    MeasuredSizes {
        col_widths,
        row_height,
    }
}

fn measure_range(
    input: &MeasureInput<'_>,
    measure: &(dyn Fn(&str) -> Vec2 + Sync),
    start: usize,
    end: usize,
) -> (usize, Vec<f32>, f32) {
    let mut widths = Vec::with_capacity(end - start);
    let mut tallest: f32 = 0.0;
    for member_id in start..end {
        let mut width = input.min_col_width;
        if let Some(member) = input.members.get(member_id) {
            let mut consider = |text: &str| {
                let size = measure(text);
                width = width.max(size.x + input.padding);
                tallest = tallest.max(size.y);
            };
            consider(&member.display_name());
            consider(&member.company);
            for item in input.items.of_member(member) {
                consider(&item.name);
            }
        }
        widths.push(width);
    }
    (start, widths, tallest)
}
