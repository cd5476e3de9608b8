use crate::state::session::{Outcome, SessionStats};
use egui::{Align2, Context};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum MenuAction {
    None,
    Restart,
}

/// End-of-session overlay: outcome banner, the run's statistics, restart.
pub struct EndScreen {
    pub muted: bool,
}

impl EndScreen {
    pub fn new() -> Self {
        EndScreen { muted: false }
    }

    pub fn show(&mut self, ctx: &Context, outcome: Outcome, stats: &SessionStats) -> MenuAction {
        let mut action = MenuAction::None;

        let title = match outcome {
            Outcome::Won => "You won!",
            Outcome::Lost => "Game over",
        };

        egui::Window::new(title)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Coins collected: {}", stats.coins_collected));
                ui.label(format!("Bottles collected: {}", stats.bottles_collected));
                ui.label(format!("Bottles thrown: {}", stats.bottles_thrown));
                ui.label(format!("Chickens defeated: {}", stats.chickens_killed));

                ui.separator();
                ui.checkbox(&mut self.muted, "Mute sounds");

                if ui.add(egui::Button::new("Play again")).clicked() {
                    action = MenuAction::Restart;
                }
            });

        action
    }
}
