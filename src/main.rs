// Work Item Grid Application
// Main entry point

use anyhow::Result;
use chrono::{Duration, Local};

use taskgrid::grid::WorkItemGrid;
use taskgrid::models::app_data::AppData;
use taskgrid::models::calendar::{Calendar, CalendarDay};
use taskgrid::models::member::{Member, Members};
use taskgrid::models::period::Period;
use taskgrid::models::work_item::{Project, Tags, TaskState, WorkItem};
use taskgrid::models::work_items::WorkItems;
use taskgrid::ui_egui::{GridWidget, ItemDialogState};

fn main() -> Result<()> {
    env_logger::init();

    log::info!("Starting Work Item Grid");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Work Item Grid",
        options,
        Box::new(|_cc| Ok(Box::new(GridApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("failed to launch the grid shell: {e}"))?;
    Ok(())
}

struct GridApp {
    grid: WorkItemGrid,
    dialog: Option<ItemDialogState>,
    fitted: bool,
}

impl GridApp {
    fn new() -> Self {
        Self {
            grid: WorkItemGrid::new(sample_app_data()),
            dialog: None,
            fitted: false,
        }
    }

    fn fit_columns(&mut self, ctx: &egui::Context) {
        let font_id = egui::TextStyle::Body.resolve(&ctx.style());
        let measure = |text: &str| {
            ctx.fonts(|fonts| {
                fonts
                    .layout_no_wrap(text.to_owned(), font_id.clone(), egui::Color32::WHITE)
                    .size()
            })
        };
        self.grid.auto_fit(&measure);
    }
}

impl eframe::App for GridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.fitted {
            self.fit_columns(ctx);
            self.fitted = true;
        }

        egui::TopBottomPanel::top("grid_toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(self.grid.can_undo(), egui::Button::new("Undo"))
                    .clicked()
                {
                    self.grid.undo();
                }
                if ui
                    .add_enabled(self.grid.can_redo(), egui::Button::new("Redo"))
                    .clicked()
                {
                    self.grid.redo();
                }
                ui.separator();
                if ui.button("Done").clicked() {
                    self.grid.done_selected();
                }
                if ui.button("Divide").clicked() {
                    let total = self
                        .grid
                        .view()
                        .selected_one()
                        .map(|item| self.grid.view().calendar().period_day_count(&item.period))
                        .unwrap_or(0);
                    if total >= 2 {
                        self.grid.divide_selected(total / 2, total - total / 2);
                    }
                }
                if ui.button("Align afterward").clicked() {
                    let starts = self.grid.view().selected().clone();
                    self.grid.align_afterward(&starts);
                }
                if ui.button("Select afterward").clicked() {
                    let starts = self.grid.view().selected().clone();
                    self.grid.select_afterward(&starts);
                }
                ui.separator();
                if ui.button("Fit columns").clicked() {
                    self.fit_columns(ctx);
                }
            });
        });

        let mut request = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            let out = GridWidget::show(&mut self.grid, ui);
            request = out.edit_request;
        });

        if let Some(request) = request {
            self.dialog = Some(ItemDialogState::open(request, &self.grid));
        }
        if let Some(dialog) = &mut self.dialog {
            if !dialog.show(ctx, &mut self.grid) {
                self.dialog = None;
            }
        }
    }
}

/// Demo data: a weekday calendar around today with a small team and a
/// spread of items to drag around.
fn sample_app_data() -> AppData {
    let today = Local::now().date_naive();
    let first = CalendarDay::from_date(today - Duration::days(30));
    let last = CalendarDay::from_date(today + Duration::days(90));
    let calendar = Calendar::weekdays(first, last);

    let aoki = Member::new("Acme", "Aoki", "Mina");
    let baba = Member::new("Acme", "Baba", "Jun");
    let chiba = Member::new("Acme", "Chiba", "Rui");
    let doi = Member::new("Koyo", "Doi", "Kai");
    let members: Members = [aoki.clone(), baba.clone(), chiba.clone(), doi.clone()]
        .into_iter()
        .collect();

    let mut items = WorkItems::new();
    let mut plot = |project: &str,
                    name: &str,
                    tags: &str,
                    member: &Member,
                    first_index: usize,
                    day_count: usize,
                    state: TaskState| {
        let (Some(from), Some(to)) = (
            calendar.day_at(first_index),
            calendar.day_at(first_index + day_count - 1),
        ) else {
            return;
        };
        let Ok(period) = Period::new(from, to) else {
            return;
        };
        items.add(WorkItem::new(
            Project::new(project),
            name,
            Tags::from_text(tags),
            period,
            member.clone(),
            state,
        ));
    };

    plot("Atlas", "kickoff deck", "planning", &aoki, 18, 3, TaskState::Active);
    plot("Atlas", "api sketch", "backend", &aoki, 23, 5, TaskState::New);
    plot("Atlas", "wireframes", "ui", &baba, 19, 4, TaskState::Active);
    plot("Atlas", "usability notes", "ui|research", &baba, 27, 2, TaskState::Background);
    plot("Borealis", "data import", "backend", &chiba, 20, 6, TaskState::Active);
    plot("Borealis", "cut-over drill", "ops", &chiba, 30, 3, TaskState::New);
    plot("Borealis", "vendor review", "", &doi, 16, 2, TaskState::Done);
    plot("Atlas", "perf pass", "backend", &doi, 28, 4, TaskState::New);

    let mut app = AppData::new(calendar, members);
    app.work_items = items;
    app
}
