//! Boundary policies for the bounded grid.
//!
//! Two variants, used in different contexts: `clip` hard-clamps a coordinate
//! onto the valid axis range and is used for sensor sampling; `reflect`
//! flips a movement component whose tentative position left the grid and is
//! used for agent movement. Both treat the two axes independently.

/// Hard-clamps a coordinate into `[0, max]`.
#[inline]
pub fn clip(v: f32, max: f32) -> f32 {
    v.clamp(0.0, max)
}

/// Reflects a movement component when the tentative position lies outside
/// `[0, max]`. Returns the (possibly negated) component and whether it
/// flipped. The caller is still responsible for clipping the position.
#[inline]
pub fn reflect(pos: f32, component: f32, max: f32) -> (f32, bool) {
    if pos < 0.0 || pos > max {
        (-component, true)
    } else {
        (component, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_clamps_both_ends() {
        assert_eq!(clip(-3.5, 99.0), 0.0);
        assert_eq!(clip(104.2, 99.0), 99.0);
        assert_eq!(clip(42.5, 99.0), 42.5);
    }

    #[test]
    fn test_clip_keeps_boundary_values() {
        assert_eq!(clip(0.0, 99.0), 0.0);
        assert_eq!(clip(99.0, 99.0), 99.0);
    }

    #[test]
    fn test_reflect_flips_only_out_of_bounds() {
        let (c, flipped) = reflect(-0.5, 0.7, 99.0);
        assert_eq!(c, -0.7);
        assert!(flipped);

        let (c, flipped) = reflect(100.1, -0.7, 99.0);
        assert_eq!(c, 0.7);
        assert!(flipped);

        let (c, flipped) = reflect(50.0, 0.7, 99.0);
        assert_eq!(c, 0.7);
        assert!(!flipped);
    }
}
