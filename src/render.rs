use crate::camera::{VIEW_H, VIEW_W};
use crate::state::World;
use crate::state::common::Dir;
use crate::state::scenery::BACKGROUND_TILE_W;
use crate::state::status_bar::StatusBar;

use image::GenericImageView;
use miniquad::*;
use std::collections::HashMap;

#[repr(C)]
struct Uniforms {
    mvp: [f32; 16],
    color: [f32; 4],
    uv_base: [f32; 4],  // xy used
    uv_scale: [f32; 4], // xy used
}

#[repr(C)]
struct Vertex {
    pos: [f32; 2],
    uv: [f32; 2],
}

/// One sheet per entity; every sheet is a horizontal strip of equal-width
/// frames indexed by the animation player.
#[derive(Eq, PartialEq, Hash)]
pub enum SpriteSheet {
    Character,
    Chicken,
    ChickenSmall,
    Endboss,
    Bottle,
    BottleGround,
    Coin,
    Cloud,
    BackgroundAir,
    BackgroundFar,
    BackgroundMid,
    BackgroundNear,
    StatusHealth,
    StatusBottles,
    StatusCoins,
    StatusBoss,
    White1x1,
}

struct TextureInfo {
    frames: u32,
    texture: TextureId,
}

fn load_strip(ctx: &mut Box<dyn RenderingBackend>, path: &str, frames: u32) -> TextureInfo {
    let img = image::open(path).unwrap_or_else(|_| panic!("failed to load {path}"));
    let (w, h) = img.dimensions();
    let rgba8 = img.to_rgba8();
    let texture = ctx.new_texture_from_rgba8(w as u16, h as u16, &rgba8);
    ctx.texture_set_filter(texture, FilterMode::Linear, MipmapFilterMode::None);
    ctx.texture_set_wrap(texture, TextureWrap::Clamp, TextureWrap::Clamp);

    TextureInfo { frames, texture }
}

pub struct Renderer {
    pub ctx: Box<dyn RenderingBackend>,
    pipeline: Pipeline,
    bindings: Bindings,
    textures: HashMap<SpriteSheet, TextureInfo>,
}

impl Renderer {
    pub fn new() -> Renderer {
        let mut ctx = window::new_rendering_backend();

        // unit quad with UVs (0..1)
        let vertices: [Vertex; 4] = [
            Vertex {
                pos: [0.0, 0.0],
                uv: [0.0, 0.0],
            },
            Vertex {
                pos: [1.0, 0.0],
                uv: [1.0, 0.0],
            },
            Vertex {
                pos: [1.0, 1.0],
                uv: [1.0, 1.0],
            },
            Vertex {
                pos: [0.0, 1.0],
                uv: [0.0, 1.0],
            },
        ];
        let indices: [u16; 6] = [0, 1, 2, 0, 2, 3];

        let vertex_buffer = ctx.new_buffer(
            BufferType::VertexBuffer,
            BufferUsage::Immutable,
            BufferSource::slice(&vertices),
        );
        let index_buffer = ctx.new_buffer(
            BufferType::IndexBuffer,
            BufferUsage::Immutable,
            BufferSource::slice(&indices),
        );

        // 1x1 white texture for untextured rectangles
        let white_tex_bytes: [u8; 4] = [255, 255, 255, 255];
        let white_texture = ctx.new_texture_from_rgba8(1, 1, &white_tex_bytes);
        ctx.texture_set_filter(white_texture, FilterMode::Nearest, MipmapFilterMode::None);
        ctx.texture_set_wrap(white_texture, TextureWrap::Clamp, TextureWrap::Clamp);

        let shader = ctx
            .new_shader(
                ShaderSource::Glsl {
                    vertex: VERTEX_SHADER,
                    fragment: FRAGMENT_SHADER,
                },
                ShaderMeta {
                    images: vec!["tex".to_string()],
                    uniforms: UniformBlockLayout {
                        uniforms: vec![
                            UniformDesc::new("mvp", UniformType::Mat4),
                            UniformDesc::new("color", UniformType::Float4),
                            UniformDesc::new("uv_base", UniformType::Float4),
                            UniformDesc::new("uv_scale", UniformType::Float4),
                        ],
                    },
                },
            )
            .expect("failed to compile shader");

        let pipeline = ctx.new_pipeline(
            &[BufferLayout::default()],
            &[
                VertexAttribute::new("pos", VertexFormat::Float2),
                VertexAttribute::new("uv", VertexFormat::Float2),
            ],
            shader,
            PipelineParams {
                color_blend: Some(BlendState::new(
                    Equation::Add,
                    BlendFactor::Value(BlendValue::SourceAlpha),
                    BlendFactor::OneMinusValue(BlendValue::SourceAlpha),
                )),
                cull_face: CullFace::Nothing,
                ..Default::default()
            },
        );

        let mut textures = HashMap::new();
        textures.insert(
            SpriteSheet::Character,
            load_strip(&mut ctx, "assets/character.png", 45),
        );
        textures.insert(
            SpriteSheet::Chicken,
            load_strip(&mut ctx, "assets/chicken.png", 4),
        );
        textures.insert(
            SpriteSheet::ChickenSmall,
            load_strip(&mut ctx, "assets/chicken_small.png", 4),
        );
        textures.insert(
            SpriteSheet::Endboss,
            load_strip(&mut ctx, "assets/endboss.png", 26),
        );
        textures.insert(
            SpriteSheet::Bottle,
            load_strip(&mut ctx, "assets/bottle_spin.png", 10),
        );
        textures.insert(
            SpriteSheet::BottleGround,
            load_strip(&mut ctx, "assets/bottle_ground.png", 2),
        );
        textures.insert(SpriteSheet::Coin, load_strip(&mut ctx, "assets/coin.png", 2));
        textures.insert(
            SpriteSheet::Cloud,
            load_strip(&mut ctx, "assets/cloud.png", 1),
        );
        textures.insert(
            SpriteSheet::BackgroundAir,
            load_strip(&mut ctx, "assets/bg_air.png", 2),
        );
        textures.insert(
            SpriteSheet::BackgroundFar,
            load_strip(&mut ctx, "assets/bg_far.png", 2),
        );
        textures.insert(
            SpriteSheet::BackgroundMid,
            load_strip(&mut ctx, "assets/bg_mid.png", 2),
        );
        textures.insert(
            SpriteSheet::BackgroundNear,
            load_strip(&mut ctx, "assets/bg_near.png", 2),
        );
        textures.insert(
            SpriteSheet::StatusHealth,
            load_strip(&mut ctx, "assets/status_health.png", 6),
        );
        textures.insert(
            SpriteSheet::StatusBottles,
            load_strip(&mut ctx, "assets/status_bottles.png", 6),
        );
        textures.insert(
            SpriteSheet::StatusCoins,
            load_strip(&mut ctx, "assets/status_coins.png", 6),
        );
        textures.insert(
            SpriteSheet::StatusBoss,
            load_strip(&mut ctx, "assets/status_boss.png", 6),
        );
        textures.insert(
            SpriteSheet::White1x1,
            TextureInfo {
                frames: 1,
                texture: white_texture,
            },
        );

        let bindings = Bindings {
            vertex_buffers: vec![vertex_buffer],
            index_buffer,
            images: vec![white_texture],
        };

        Renderer {
            ctx,
            pipeline,
            bindings,
            textures,
        }
    }

    pub fn resize(&mut self, _w: f32, _h: f32) {
        // The ortho projection is in logical view units; nothing to do.
    }

    pub fn draw(&mut self, world: &World) {
        let clear = PassAction::Clear {
            color: Some((0.36, 0.62, 0.86, 1.0)),
            depth: Some(1.0),
            stencil: Some(0),
        };

        self.ctx.begin_default_pass(clear);
        self.ctx.apply_pipeline(&self.pipeline);
        self.ctx.apply_bindings(&self.bindings);

        let cam = world.camera.x;

        for tile in &world.level.background {
            let sheet = match tile.layer {
                0 => SpriteSheet::BackgroundAir,
                1 => SpriteSheet::BackgroundFar,
                2 => SpriteSheet::BackgroundMid,
                _ => SpriteSheet::BackgroundNear,
            };
            self.draw_sprite(
                sheet,
                tile.variant as u32,
                false,
                tile.x + cam,
                0.0,
                BACKGROUND_TILE_W + 1.0,
                VIEW_H,
                1.0,
            );
        }

        for cloud in &world.level.clouds {
            self.draw_sprite(
                SpriteSheet::Cloud,
                0,
                false,
                cloud.x + cam,
                cloud.y,
                cloud.w,
                cloud.h,
                1.0,
            );
        }

        for coin in &world.level.coins {
            self.draw_sprite(
                SpriteSheet::Coin,
                coin.anim.frame(),
                false,
                coin.hitbox.x + cam,
                coin.hitbox.y,
                coin.hitbox.w,
                coin.hitbox.h,
                1.0,
            );
        }
        for bottle in &world.level.bottles {
            self.draw_sprite(
                SpriteSheet::BottleGround,
                bottle.anim.frame(),
                false,
                bottle.hitbox.x + cam,
                bottle.hitbox.y,
                bottle.hitbox.w,
                bottle.hitbox.h,
                1.0,
            );
        }

        for chicken in &world.level.enemies {
            let sheet = match chicken.kind {
                crate::state::chicken::ChickenKind::Normal => SpriteSheet::Chicken,
                crate::state::chicken::ChickenKind::Small => SpriteSheet::ChickenSmall,
            };
            self.draw_sprite(
                sheet,
                chicken.anim.frame(),
                false,
                chicken.hitbox.x + cam,
                chicken.hitbox.y,
                chicken.hitbox.w,
                chicken.hitbox.h,
                1.0,
            );
        }

        let boss = &world.level.endboss;
        self.draw_sprite(
            SpriteSheet::Endboss,
            boss.anim.frame(),
            false,
            boss.hitbox.x + cam,
            boss.hitbox.y,
            boss.hitbox.w,
            boss.hitbox.h,
            1.0,
        );

        for bottle in &world.throwables {
            self.draw_sprite(
                SpriteSheet::Bottle,
                bottle.anim.frame(),
                false,
                bottle.hitbox.x + cam,
                bottle.hitbox.y,
                bottle.hitbox.w,
                bottle.hitbox.h,
                1.0,
            );
        }

        let character = &world.character;
        self.draw_sprite(
            SpriteSheet::Character,
            character.anim.frame(),
            character.facing == Dir::Left,
            character.hitbox.x + cam,
            character.hitbox.y,
            character.hitbox.w,
            character.hitbox.h,
            1.0,
        );

        // HUD on top, no camera translation.
        self.draw_status_bar(SpriteSheet::StatusHealth, &world.status_health);
        self.draw_status_bar(SpriteSheet::StatusBottles, &world.status_bottles);
        self.draw_status_bar(SpriteSheet::StatusCoins, &world.status_coins);
        if world.session.arrived_endboss {
            self.draw_status_bar(SpriteSheet::StatusBoss, &world.status_boss);
        }

        self.ctx.end_render_pass();
    }

    fn draw_status_bar(&mut self, sheet: SpriteSheet, bar: &StatusBar) {
        self.draw_sprite(
            sheet,
            bar.step as u32,
            false,
            bar.x,
            bar.y,
            StatusBar::W,
            StatusBar::H,
            1.0,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_sprite(
        &mut self,
        sheet: SpriteSheet,
        frame: u32,
        flip: bool,
        px: f32,
        py: f32,
        w: f32,
        h: f32,
        alpha: f32,
    ) {
        let texture = &self.textures[&sheet];

        self.bindings.images[0] = texture.texture;
        self.ctx.apply_bindings(&self.bindings);

        let proj = Self::ortho_mvp();
        let model = Self::mat4_mul(Self::mat4_translation(px, py), Self::mat4_scale(w, h));
        let mvp = Self::mat4_mul(proj, model);

        let width_ratio = 1.0 / texture.frames as f32;
        let mut uv_base_x = frame as f32 * width_ratio;
        let mut uv_scale_x = width_ratio;

        if flip {
            uv_base_x += width_ratio;
            uv_scale_x = -uv_scale_x;
        }

        let uniforms = Uniforms {
            mvp,
            color: [1.0, 1.0, 1.0, alpha],
            uv_base: [uv_base_x, 0.0, 0.0, 0.0],
            uv_scale: [uv_scale_x, 1.0, 0.0, 0.0],
        };
        self.ctx.apply_uniforms(UniformsSource::table(&uniforms));
        self.ctx.draw(0, 6, 1);
    }

    fn ortho_mvp() -> [f32; 16] {
        let l = 0.0;
        let r = VIEW_W;
        let t = 0.0;
        let b = VIEW_H;
        let n = -1.0;
        let f = 1.0;
        let sx = 2.0 / (r - l);
        let sy = 2.0 / (t - b);
        let sz = -2.0 / (f - n);
        let tx = -((r + l) / (r - l));
        let ty = -((t + b) / (t - b));
        let tz = -((f + n) / (f - n));
        [
            sx, 0.0, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 0.0, sz, 0.0, tx, ty, tz, 1.0,
        ]
    }

    fn mat4_mul(a: [f32; 16], b: [f32; 16]) -> [f32; 16] {
        let mut out = [0.0f32; 16];
        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += a[k * 4 + row] * b[col * 4 + k];
                }
                out[col * 4 + row] = sum;
            }
        }
        out
    }

    fn mat4_translation(tx: f32, ty: f32) -> [f32; 16] {
        [
            1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, tx, ty, 0.0, 1.0,
        ]
    }

    fn mat4_scale(sx: f32, sy: f32) -> [f32; 16] {
        [
            sx, 0.0, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
        ]
    }
}

const VERTEX_SHADER: &str = r#"#version 100
attribute vec2 pos;
attribute vec2 uv;
uniform mat4 mvp;
uniform vec4 color;
uniform vec4 uv_base;
uniform vec4 uv_scale;
varying vec4 v_color;
varying vec2 v_uv;
void main() {
    gl_Position = mvp * vec4(pos, 0.0, 1.0);
    v_color = color;
    v_uv = uv_base.xy + uv * uv_scale.xy;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 100
precision mediump float;
varying vec4 v_color;
varying vec2 v_uv;
uniform sampler2D tex;
void main() {
    gl_FragColor = texture2D(tex, v_uv) * v_color;
}
"#;
