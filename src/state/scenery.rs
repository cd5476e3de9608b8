use rand::Rng;

const CLOUD_DRIFT: f32 = 0.05;
/// Background tiles butt against each other with a 1 px overlap to hide
/// seams, so the stride is one short of the 720 px art width.
pub const BACKGROUND_TILE_W: f32 = 719.0;
pub const BACKGROUND_LAYERS: usize = 4;

pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Cloud {
    pub fn spawn(rng: &mut impl Rng) -> Self {
        Cloud {
            x: rng.random_range(0.0..3000.0),
            y: rng.random_range(10.0..60.0),
            w: 400.0,
            h: 350.0,
        }
    }

    pub fn update(&mut self) {
        self.x -= CLOUD_DRIFT;
    }
}

/// One layer of one background tile. `variant` alternates between the two
/// art sets so adjacent tiles do not repeat visibly.
pub struct BackgroundTile {
    pub x: f32,
    pub layer: usize,
    pub variant: usize,
}

pub fn tile_background(tiles: u32) -> Vec<BackgroundTile> {
    let mut out = Vec::new();
    for i in 0..tiles {
        // First tile sits one stride left of the origin.
        let x = (i as f32 - 1.0) * BACKGROUND_TILE_W;
        for layer in 0..BACKGROUND_LAYERS {
            out.push(BackgroundTile {
                x,
                layer,
                variant: (i % 2) as usize,
            });
        }
    }
    out
}
