use eframe::egui::{self, Align2, Color32, RichText, Ui};

use crate::state::{Action, AppState, NoticeKind};

// ---------------------------------------------------------------------------
// Left side panel – action buttons
// ---------------------------------------------------------------------------

/// Render the left action panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Screentime Survey");
    ui.separator();

    let button_width = ui.available_width();
    if ui
        .add_sized([button_width, 28.0], egui::Button::new("📂 Load Screentime File…"))
        .clicked()
    {
        open_file_dialog(state);
    }
    ui.add_space(8.0);

    for action in Action::ALL {
        if ui
            .add_sized([button_width, 24.0], egui::Button::new(action.label()))
            .clicked()
        {
            state.run(action);
        }
    }

    ui.add_space(8.0);
    ui.separator();
    match &state.dataset {
        Some(ds) => {
            ui.label(format!("{} records", ds.len()));
            for column in ds.columns() {
                ui.label(RichText::new(format!("{}  ({})", column.name, column.kind)).small());
            }
        }
        None => {
            ui.label("No dataset loaded.");
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(source)) = (&state.dataset, &state.source) {
            ui.label(format!("{} – {} records", source.display(), ds.len()));
        }
    });
}

// ---------------------------------------------------------------------------
// Notice dialog
// ---------------------------------------------------------------------------

/// Show the pending notice, if any, until the user dismisses it.
pub fn notice_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(notice) = state.notice.clone() else {
        return;
    };

    let color = match notice.kind {
        NoticeKind::Info => Color32::LIGHT_GREEN,
        NoticeKind::Warning => Color32::YELLOW,
        NoticeKind::Error => Color32::RED,
    };

    let mut open = true;
    let mut dismissed = false;
    egui::Window::new(notice.title.as_str())
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut open)
        .show(ctx, |ui: &mut Ui| {
            ui.label(RichText::new(&notice.message).color(color));
            ui.add_space(6.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed || !open {
        state.dismiss_notice();
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open screentime survey")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_from(&path);
    }
}
