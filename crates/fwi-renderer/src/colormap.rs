//! Named sequential colormaps for continuous fields.
//!
//! Each colormap is a ramp of color stops sampled by linear interpolation.
//! The identifiers match the style catalog entries; unknown identifiers
//! fall back to [`Colormap::default_map`].

use fwi_common::Color;

/// A continuous colormap defined by color stops over [0, 1].
#[derive(Debug)]
pub struct Colormap {
    name: &'static str,
    stops: &'static [(f32, Color)],
}

impl Colormap {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Sample the colormap at `t` in [0, 1] (clamped).
    pub fn sample(&self, t: f32) -> Color {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let stops = self.stops;
        if t <= stops[0].0 {
            return stops[0].1;
        }
        for window in stops.windows(2) {
            let (t0, c0) = window[0];
            let (t1, c1) = window[1];
            if t <= t1 {
                return c0.lerp(c1, (t - t0) / (t1 - t0));
            }
        }
        stops[stops.len() - 1].1
    }

    /// Look up a colormap by its catalog identifier.
    pub fn by_name(name: &str) -> Option<&'static Colormap> {
        match name {
            "viridis" => Some(&VIRIDIS),
            "coolwarm" => Some(&COOLWARM),
            "Blues" => Some(&BLUES),
            "PuBuGn" => Some(&PUBUGN),
            "hot_r" => Some(&HOT_R),
            "plasma" => Some(&PLASMA),
            "cividis" => Some(&CIVIDIS),
            "YlOrBr" => Some(&YLORBR),
            "OrRd" => Some(&ORRD),
            _ => None,
        }
    }

    /// Generic sequential fallback for variables without an assigned map.
    pub fn default_map() -> &'static Colormap {
        &VIRIDIS
    }
}

static VIRIDIS: Colormap = Colormap {
    name: "viridis",
    stops: &[
        (0.00, Color::rgb(68, 1, 84)),
        (0.25, Color::rgb(59, 82, 139)),
        (0.50, Color::rgb(33, 145, 140)),
        (0.75, Color::rgb(94, 201, 98)),
        (1.00, Color::rgb(253, 231, 37)),
    ],
};

static COOLWARM: Colormap = Colormap {
    name: "coolwarm",
    stops: &[
        (0.00, Color::rgb(59, 76, 192)),
        (0.50, Color::rgb(221, 221, 221)),
        (1.00, Color::rgb(180, 4, 38)),
    ],
};

static BLUES: Colormap = Colormap {
    name: "Blues",
    stops: &[
        (0.00, Color::rgb(247, 251, 255)),
        (0.50, Color::rgb(107, 174, 214)),
        (1.00, Color::rgb(8, 48, 107)),
    ],
};

static PUBUGN: Colormap = Colormap {
    name: "PuBuGn",
    stops: &[
        (0.00, Color::rgb(255, 247, 251)),
        (0.50, Color::rgb(103, 169, 207)),
        (1.00, Color::rgb(1, 70, 54)),
    ],
};

// Reversed "hot": white through yellow and red to near-black
static HOT_R: Colormap = Colormap {
    name: "hot_r",
    stops: &[
        (0.00, Color::rgb(255, 255, 255)),
        (0.33, Color::rgb(255, 255, 0)),
        (0.66, Color::rgb(255, 0, 0)),
        (1.00, Color::rgb(11, 0, 0)),
    ],
};

static PLASMA: Colormap = Colormap {
    name: "plasma",
    stops: &[
        (0.00, Color::rgb(13, 8, 135)),
        (0.50, Color::rgb(204, 71, 120)),
        (1.00, Color::rgb(240, 249, 33)),
    ],
};

static CIVIDIS: Colormap = Colormap {
    name: "cividis",
    stops: &[
        (0.00, Color::rgb(0, 32, 76)),
        (0.50, Color::rgb(124, 123, 120)),
        (1.00, Color::rgb(255, 234, 70)),
    ],
};

static YLORBR: Colormap = Colormap {
    name: "YlOrBr",
    stops: &[
        (0.00, Color::rgb(255, 255, 229)),
        (0.50, Color::rgb(254, 153, 41)),
        (1.00, Color::rgb(102, 37, 6)),
    ],
};

static ORRD: Colormap = Colormap {
    name: "OrRd",
    stops: &[
        (0.00, Color::rgb(255, 247, 236)),
        (0.50, Color::rgb(252, 141, 89)),
        (1.00, Color::rgb(127, 0, 0)),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_endpoints() {
        let map = Colormap::by_name("viridis").unwrap();
        assert_eq!(map.sample(0.0), Color::rgb(68, 1, 84));
        assert_eq!(map.sample(1.0), Color::rgb(253, 231, 37));
    }

    #[test]
    fn test_sample_clamps_out_of_range() {
        let map = Colormap::by_name("Blues").unwrap();
        assert_eq!(map.sample(-0.5), map.sample(0.0));
        assert_eq!(map.sample(1.5), map.sample(1.0));
        assert_eq!(map.sample(f32::NAN), map.sample(0.0));
    }

    #[test]
    fn test_catalog_names_resolve() {
        for name in [
            "viridis", "coolwarm", "Blues", "PuBuGn", "hot_r", "plasma", "cividis", "YlOrBr",
            "OrRd",
        ] {
            assert!(Colormap::by_name(name).is_some(), "missing colormap {}", name);
        }
        assert!(Colormap::by_name("nope").is_none());
    }

    #[test]
    fn test_default_map_is_sequential_fallback() {
        assert_eq!(Colormap::default_map().name(), "viridis");
    }
}
