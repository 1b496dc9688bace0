/// Simple float RGBA color for the preview rasterizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl AppColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a darker version (for borders and badge strips).
    pub fn darken(self, amount: f32) -> Self {
        Self {
            r: (self.r - amount).max(0.0),
            g: (self.g - amount).max(0.0),
            b: (self.b - amount).max(0.0),
            a: self.a,
        }
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// Dark neutral canvas background.
pub const BACKGROUND: AppColor = AppColor::new(20.0 / 255.0, 22.0 / 255.0, 28.0 / 255.0);

/// Tile shown when cover art could not be drawn.
pub const PLACEHOLDER: AppColor = AppColor::new(0.30, 0.31, 0.35);

/// Stand-in cover color: hue hashed from the app id, brighter for more playtime tiers.
pub fn cover_color(id: u64, tier: u8, tiers: u8) -> AppColor {
    let hue = hash01(id);
    let level = if tiers > 1 {
        (tier.saturating_sub(1)) as f32 / (tiers - 1) as f32
    } else {
        1.0
    };
    hsv_to_rgb(hue, 0.62, 0.55 + 0.37 * level)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> AppColor {
    let h6 = (h * 6.0).rem_euclid(6.0);
    let i = h6.floor() as i32;
    let f = h6 - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match i {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    AppColor { r, g, b, a: 1.0 }
}

/// FNV-1a over the id bytes, folded to [0, 1].
fn hash01(id: u64) -> f32 {
    let mut h: u32 = 2166136261;
    for b in id.to_le_bytes() {
        h ^= b as u32;
        h = h.wrapping_mul(16777619);
    }
    ((h >> 8) as f32) / ((u32::MAX >> 8) as f32)
}
