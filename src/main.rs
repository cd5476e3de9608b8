use miniquad::*;

use canyon_run::camera::{VIEW_H, VIEW_W};
use canyon_run::menu::{EndScreen, MenuAction};
use canyon_run::render::Renderer;
use canyon_run::sound_handler::SoundHandler;
use canyon_run::state::{InputState, LevelConfig, World};

const STEP_SECONDS: f64 = 1.0 / 60.0;

struct Stage {
    world: World,
    config: LevelConfig,
    input: InputState,
    renderer: Renderer,
    sounds: SoundHandler,
    egui_mq: egui_miniquad::EguiMq,
    end_screen: EndScreen,
    last_frame: f64,
    accumulator: f64,
}

impl Stage {
    fn new() -> Stage {
        let mut renderer = Renderer::new();
        let egui_mq = egui_miniquad::EguiMq::new(&mut *renderer.ctx);

        let config = LevelConfig::load_or_default("assets/level1.json");
        let world = World::new(&config);

        Stage {
            world,
            config,
            input: InputState::default(),
            renderer,
            sounds: SoundHandler::new(),
            egui_mq,
            end_screen: EndScreen::new(),
            last_frame: date::now(),
            accumulator: 0.0,
        }
    }

    fn restart(&mut self) {
        self.world = World::new(&self.config);
        self.sounds.stop_music();
    }
}

impl EventHandler for Stage {
    fn update(&mut self) {
        let now = date::now();
        // Cap the catch-up so a dragged window does not fast-forward.
        let elapsed = (now - self.last_frame).min(0.25);
        self.last_frame = now;

        self.accumulator += elapsed;
        while self.accumulator >= STEP_SECONDS {
            self.accumulator -= STEP_SECONDS;
            self.world.tick(&self.input);
        }

        for event in self.world.drain_audio() {
            self.sounds.handle(event);
        }
    }

    fn draw(&mut self) {
        self.renderer.draw(&self.world);

        if self.world.session.stopped {
            let outcome = self.world.session.outcome.unwrap_or(
                canyon_run::state::Outcome::Lost,
            );
            let stats = self.world.session.stats;

            let mut action = MenuAction::None;
            let end_screen = &mut self.end_screen;
            self.egui_mq.run(&mut *self.renderer.ctx, |_mq_ctx, egui_ctx| {
                action = end_screen.show(egui_ctx, outcome, &stats);
            });
            self.egui_mq.draw(&mut *self.renderer.ctx);

            self.sounds.set_muted(self.end_screen.muted);
            if action == MenuAction::Restart {
                self.restart();
            }
        }

        self.renderer.ctx.commit_frame();
    }

    fn resize_event(&mut self, width: f32, height: f32) {
        self.renderer.resize(width, height);
    }

    fn key_down_event(&mut self, keycode: KeyCode, mods: KeyMods, _repeat: bool) {
        self.egui_mq.key_down_event(keycode, mods);
        match keycode {
            KeyCode::Left => self.input.left = true,
            KeyCode::Right => self.input.right = true,
            KeyCode::Up => self.input.up = true,
            KeyCode::Down => self.input.down = true,
            KeyCode::Space => self.input.jump = true,
            KeyCode::D => self.input.throw = true,
            _ => {}
        }
    }

    fn key_up_event(&mut self, keycode: KeyCode, mods: KeyMods) {
        self.egui_mq.key_up_event(keycode, mods);
        match keycode {
            KeyCode::Left => self.input.left = false,
            KeyCode::Right => self.input.right = false,
            KeyCode::Up => self.input.up = false,
            KeyCode::Down => self.input.down = false,
            KeyCode::Space => self.input.jump = false,
            KeyCode::D => self.input.throw = false,
            _ => {}
        }
    }

    fn char_event(&mut self, character: char, _mods: KeyMods, _repeat: bool) {
        self.egui_mq.char_event(character);
    }

    fn mouse_motion_event(&mut self, x: f32, y: f32) {
        self.egui_mq.mouse_motion_event(x, y);
    }

    fn mouse_wheel_event(&mut self, dx: f32, dy: f32) {
        self.egui_mq.mouse_wheel_event(dx, dy);
    }

    fn mouse_button_down_event(&mut self, button: MouseButton, x: f32, y: f32) {
        self.egui_mq.mouse_button_down_event(button, x, y);
    }

    fn mouse_button_up_event(&mut self, button: MouseButton, x: f32, y: f32) {
        self.egui_mq.mouse_button_up_event(button, x, y);
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    miniquad::start(
        conf::Conf {
            window_title: String::from("Canyon Run"),
            high_dpi: false,
            window_width: VIEW_W as i32,
            window_height: VIEW_H as i32,
            ..Default::default()
        },
        || Box::new(Stage::new()),
    );
}
