use egui::{Color32, RichText};

use crate::grid::{EditRequest, WorkItemGrid};
use crate::models::work_item::TaskState;
use crate::models::work_item::WorkItem;
use crate::services::edit::draft::WorkItemDraft;

/// State for the work item edit/create dialog.
///
/// Everything is buffered in a draft; the collection is untouched until
/// the draft resolves cleanly and Save is pressed.
pub struct ItemDialogState {
    draft: WorkItemDraft,
    /// Item being edited; `None` when creating a fresh one.
    before: Option<WorkItem>,
    error_message: Option<String>,
}

impl ItemDialogState {
    pub fn open(request: EditRequest, grid: &WorkItemGrid) -> Self {
        match request {
            EditRequest::Edit(item) => Self {
                draft: WorkItemDraft::from_item(&item, grid.view().calendar()),
                before: Some(item),
                error_message: None,
            },
            EditRequest::Create { day, member } => Self {
                draft: WorkItemDraft::for_cell(day, &member),
                before: None,
                error_message: None,
            },
        }
    }

    fn apply(&mut self, grid: &mut WorkItemGrid) -> bool {
        match self
            .draft
            .resolve(grid.view().calendar(), grid.view().members())
        {
            Ok(item) => {
                match &self.before {
                    Some(before) => grid.replace_work_item(before, item),
                    None => grid.add_work_item(item),
                };
                true
            }
            Err(error) => {
                self.error_message = Some(error.to_string());
                false
            }
        }
    }

    /// Render the dialog. Returns `false` once it has closed.
    pub fn show(&mut self, ctx: &egui::Context, grid: &mut WorkItemGrid) -> bool {
        let mut open = true;
        let title = if self.before.is_some() {
            "Edit Work Item"
        } else {
            "New Work Item"
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                if let Some(ref error) = self.error_message {
                    ui.colored_label(Color32::RED, RichText::new(error).strong());
                    ui.add_space(8.0);
                }

                ui.horizontal(|ui| {
                    ui.label("Project:");
                    ui.text_edit_singleline(&mut self.draft.project);
                });
                ui.horizontal(|ui| {
                    ui.label("Name:");
                    ui.text_edit_singleline(&mut self.draft.name);
                });
                ui.horizontal(|ui| {
                    ui.label("Tags:");
                    ui.text_edit_singleline(&mut self.draft.tags);
                });
                ui.horizontal(|ui| {
                    ui.label("Member:");
                    egui::ComboBox::from_id_source("work_item_member")
                        .selected_text(self.draft.member_text.clone())
                        .show_ui(ui, |ui| {
                            for member in grid.view().members().iter() {
                                let text = member.to_string();
                                ui.selectable_value(&mut self.draft.member_text, text.clone(), text);
                            }
                        });
                });
                ui.horizontal(|ui| {
                    ui.label("First day:");
                    ui.text_edit_singleline(&mut self.draft.from_text);
                    ui.label("Days:");
                    ui.text_edit_singleline(&mut self.draft.day_count_text);
                });
                ui.horizontal(|ui| {
                    ui.label("State:");
                    egui::ComboBox::from_id_source("work_item_state")
                        .selected_text(self.draft.state.to_string())
                        .show_ui(ui, |ui| {
                            for state in TaskState::selectable() {
                                ui.selectable_value(&mut self.draft.state, state, state.to_string());
                            }
                        });
                });
                ui.label("Description:");
                ui.text_edit_multiline(&mut self.draft.description);

                ui.add_space(8.0);
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() && self.apply(grid) {
                        open = false;
                    }
                    if ui.button("Cancel").clicked() {
                        open = false;
                    }
                });
            });
        open
    }
}
