// Benchmark for the grid engine hot paths
// Measures axis rebuilds, spatial picks and frame painting over a
// year-long calendar with a growing roster.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use egui::{pos2, vec2};

use taskgrid::grid::{AxisIndex, BatchSurface, WorkItemGrid};
use taskgrid::models::app_data::AppData;
use taskgrid::models::calendar::{Calendar, CalendarDay};
use taskgrid::models::filter::Filter;
use taskgrid::models::member::{Member, Members};
use taskgrid::models::period::Period;
use taskgrid::models::work_item::{Project, Tags, TaskState, WorkItem};
use taskgrid::models::work_items::WorkItems;

/// Weekday calendar covering all of 2026, roughly 260 days.
fn year_calendar() -> Calendar {
    let from = CalendarDay::new(2026, 1, 1).unwrap();
    let to = CalendarDay::new(2026, 12, 31).unwrap();
    Calendar::weekdays(from, to)
}

fn roster(member_count: usize) -> Members {
    (0..member_count)
        .map(|index| Member::new("Acme", format!("Member{index:02}"), "Taro"))
        .collect()
}

/// Eight items per member, spread over the whole year.
fn plotted_world(member_count: usize) -> AppData {
    let calendar = year_calendar();
    let members = roster(member_count);

    let mut items = WorkItems::new();
    for (member_index, member) in members.iter().enumerate() {
        for slot in 0..8 {
            let start = (member_index * 7 + slot * 31) % (calendar.len() - 6);
            let span = slot % 3 + 2;
            let period = Period::new(
                calendar.day_at(start).unwrap(),
                calendar.day_at(start + span - 1).unwrap(),
            )
            .unwrap();
            items.add(WorkItem::new(
                Project::new("Atlas"),
                format!("task {member_index}-{slot}"),
                Tags::new(),
                period,
                member.clone(),
                TaskState::Active,
            ));
        }
    }

    let mut app = AppData::new(calendar, members);
    app.work_items = items;
    app
}

fn grid_for(member_count: usize) -> WorkItemGrid {
    let mut grid = WorkItemGrid::new(plotted_world(member_count));
    grid.set_viewport(vec2(1280.0, 800.0));
    grid
}

fn bench_axis_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("axis_rebuild");

    for member_count in [10, 30, 60].iter() {
        let app = plotted_world(*member_count);
        let filter = Filter::new();
        group.bench_with_input(
            BenchmarkId::from_parameter(member_count),
            member_count,
            |b, _| {
                let mut axis = AxisIndex::new();
                b.iter(|| {
                    axis.rebuild(
                        black_box(&app.calendar),
                        black_box(&app.members),
                        black_box(&filter),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_pick(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick");

    let grid = grid_for(30);
    let positions = [
        pos2(200.0, 200.0),
        pos2(600.0, 400.0),
        pos2(1000.0, 700.0),
        pos2(50.0, 30.0),
    ];

    group.bench_function("four_probes", |b| {
        b.iter(|| {
            for pos in positions {
                black_box(grid.pick(black_box(pos)));
            }
        });
    });

    group.finish();
}

fn bench_paint(c: &mut Criterion) {
    let mut group = c.benchmark_group("paint");

    for member_count in [10, 30].iter() {
        group.bench_with_input(
            BenchmarkId::new("replay", member_count),
            member_count,
            |b, &count| {
                let mut grid = grid_for(count);
                let mut surface = BatchSurface::new();
                // Warm the batches so the loop measures pure replay.
                grid.paint(&mut surface);
                b.iter(|| {
                    let mut surface = BatchSurface::new();
                    black_box(grid.paint(&mut surface))
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("rebuild", member_count),
            member_count,
            |b, &count| {
                let mut grid = grid_for(count);
                b.iter(|| {
                    // A filter swap drops every retained batch.
                    grid.set_filter(Filter::new());
                    let mut surface = BatchSurface::new();
                    black_box(grid.paint(&mut surface))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_axis_rebuild, bench_pick, bench_paint);
criterion_main!(benches);
