//! Theme and small widget helpers, powered by catppuccin-egui.

use eframe::egui::{self, Color32};

/// Spacing constants
pub mod spacing {
    pub const PANEL_PADDING_I8: i8 = 12;
    pub const ITEM_SPACING: f32 = 8.0;
    pub const SECTION_SPACING: f32 = 16.0;
    pub const BUTTON_PADDING: f32 = 8.0;
}

/// Border radius constants
pub mod radius {
    use eframe::egui::CornerRadius;

    pub const MEDIUM: CornerRadius = CornerRadius::same(4);
    pub const LARGE: CornerRadius = CornerRadius::same(8);
    pub const PILL: CornerRadius = CornerRadius::same(255);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,
    pub flavor: catppuccin_egui::Theme,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeMode::Light)
    }
}

impl Theme {
    pub fn new(mode: ThemeMode) -> Self {
        let flavor = match mode {
            ThemeMode::Light => catppuccin_egui::LATTE,
            ThemeMode::Dark => catppuccin_egui::MOCHA,
        };
        Self { mode, flavor }
    }

    /// Apply theme to egui context
    pub fn apply(&self, ctx: &egui::Context) {
        catppuccin_egui::set_theme(ctx, self.flavor);

        let mut style = (*ctx.style()).clone();
        style.spacing.item_spacing =
            egui::Vec2::new(spacing::ITEM_SPACING, spacing::ITEM_SPACING);
        style.spacing.button_padding =
            egui::Vec2::new(spacing::BUTTON_PADDING, spacing::BUTTON_PADDING / 2.0);
        style.interaction.show_tooltips_only_when_still = false;
        ctx.set_style(style);
    }
}

/// Bridge from the graph crate's color type.
pub fn to_color32(color: cosponsor_graph::Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// Create a styled separator with label
pub fn labeled_separator(ui: &mut egui::Ui, label: &str) {
    ui.horizontal(|ui| {
        ui.separator();
        ui.label(
            egui::RichText::new(label)
                .small()
                .color(ui.visuals().weak_text_color()),
        );
        ui.separator();
    });
}

/// Badge component for counts or status
pub fn badge(ui: &mut egui::Ui, text: &str, color: Color32) {
    let frame = egui::Frame::default()
        .fill(color)
        .corner_radius(radius::PILL)
        .inner_margin(egui::Margin::symmetric(6, 2));

    frame.show(ui, |ui| {
        ui.label(
            egui::RichText::new(text)
                .small()
                .color(ui.visuals().strong_text_color()),
        );
    });
}

/// Card container - theme-aware
pub fn card(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    let frame = egui::Frame::default()
        .fill(ui.visuals().window_fill)
        .corner_radius(radius::LARGE)
        .inner_margin(egui::Margin::same(spacing::PANEL_PADDING_I8))
        .stroke(ui.visuals().window_stroke);

    frame.show(ui, |ui| {
        add_contents(ui);
    });
}

/// Warning box
pub fn warning_box(ui: &mut egui::Ui, message: &str) {
    let fg = ui.visuals().warn_fg_color;
    let bg = fg.gamma_multiply(0.2);

    let frame = egui::Frame::default()
        .fill(bg)
        .corner_radius(radius::MEDIUM)
        .inner_margin(egui::Margin::same(8));

    frame.show(ui, |ui| {
        ui.label(egui::RichText::new(message).color(fg));
    });
}

/// Error box with monospace diagnostic detail underneath
pub fn error_box(ui: &mut egui::Ui, headline: &str, detail: &str) {
    let fg = ui.visuals().error_fg_color;
    let bg = fg.gamma_multiply(0.2);

    let frame = egui::Frame::default()
        .fill(bg)
        .corner_radius(radius::MEDIUM)
        .inner_margin(egui::Margin::same(8));

    frame.show(ui, |ui| {
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(headline).color(fg).strong());
            ui.label(
                egui::RichText::new(detail)
                    .monospace()
                    .color(ui.visuals().text_color()),
            );
        });
    });
}

/// Empty state placeholder
pub fn empty_state(ui: &mut egui::Ui, title: &str, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(spacing::SECTION_SPACING);
        ui.label(egui::RichText::new(title).strong());
        ui.label(egui::RichText::new(message).color(ui.visuals().weak_text_color()));
        ui.add_space(spacing::SECTION_SPACING);
    });
}
