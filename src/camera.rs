pub const VIEW_W: f32 = 720.0;
pub const VIEW_H: f32 = 480.0;

/// Keeps the character a fixed margin from the left edge.
const FOLLOW_MARGIN: f32 = 70.0;

pub struct Camera {
    /// Horizontal translation applied to the world pass (negative of the
    /// scroll position).
    pub x: f32,
}

impl Camera {
    pub fn new() -> Self {
        Camera { x: 0.0 }
    }

    pub fn follow(&mut self, character_x: f32) {
        self.x = -character_x + FOLLOW_MARGIN;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_trails_the_character() {
        let mut camera = Camera::new();
        camera.follow(0.0);
        assert_eq!(camera.x, 70.0);
        camera.follow(500.0);
        assert_eq!(camera.x, -430.0);
    }
}
