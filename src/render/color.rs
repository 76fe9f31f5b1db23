//=========================================================================
// Color
//=========================================================================
//
// Linear-space RGB color.
//
// Hex literals (`0x88aaff`) are authored in sRGB and decoded to linear on
// construction. `rgb()` takes linear components directly, which is what
// the data-driven sensor colorings produce. Blending and lighting happen
// in linear space; the sRGB surface encodes on write.
//
//=========================================================================

//=== Color ===============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    pub const CYAN: Self = Self::rgb(0.0, 1.0, 1.0);
    pub const MAGENTA: Self = Self::rgb(1.0, 0.0, 1.0);

    //--- Construction -----------------------------------------------------

    /// Linear components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Decodes a `0xRRGGBB` sRGB literal.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
        Self::rgb(channel(16), channel(8), channel(0))
    }

    //--- Operations -------------------------------------------------------

    /// Linear interpolation toward `other`; `t` is clamped to [0, 1].
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let k = 1.0 - t;
        Self::rgb(
            self.r * k + other.r * t,
            self.g * k + other.g * t,
            self.b * k + other.b * t,
        )
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::rgb(self.r * factor, self.g * factor, self.b * factor)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn with_alpha(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

//=== Helpers =============================================================

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hex_extremes_decode_exactly() {
        assert_eq!(Color::from_hex(0xffffff), Color::WHITE);
        assert_eq!(Color::from_hex(0x000000), Color::BLACK);
        assert_eq!(Color::from_hex(0xff0000), Color::RED);
    }

    #[test]
    fn hex_midtones_are_linearized() {
        // sRGB 0x80 ≈ 0.2158 linear
        let c = Color::from_hex(0x808080);
        assert_relative_eq!(c.r, 0.2158, epsilon = 1e-3);
        assert_eq!(c.r, c.g);
    }

    #[test]
    fn channels_are_read_in_rgb_order() {
        let c = Color::from_hex(0x00ff00);
        assert_eq!(c, Color::GREEN);
    }

    #[test]
    fn lerp_endpoints_and_clamp() {
        let a = Color::from_hex(0xcc9900);
        let b = Color::RED;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 5.0), b);
    }

    #[test]
    fn lerp_halfway() {
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert_relative_eq!(mid.g, 0.5);
    }
}
