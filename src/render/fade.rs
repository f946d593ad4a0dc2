use bevy::prelude::*;

use super::colors::ColorBuffer;
use crate::core::{Color, FadeEase, FadeOverlap, FadeSettings};

/// Eases a set of vertices from one color to another.
#[derive(Clone, Debug, PartialEq)]
pub struct Fade {
    from: Color,
    to: Color,
    indices: Vec<u32>,
    elapsed: f32,
    duration: f32,
    ease: FadeEase,
}

impl Fade {
    pub fn new(from: Color, to: Color, indices: [u32; 3], settings: &FadeSettings) -> Self {
        Self {
            from,
            to,
            indices: indices.to_vec(),
            elapsed: 0.0,
            duration: settings.duration_secs.max(0.0),
            ease: settings.ease,
        }
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current color without advancing. Exactly `to` once finished.
    pub fn color(&self) -> Color {
        if self.is_finished() {
            return self.to;
        }
        let t = self.ease.sample(self.elapsed / self.duration);
        self.from.lerp(self.to, t)
    }

    pub fn advance(&mut self, dt: f32) -> Color {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.color()
    }
}

/// Live fades, in the order they were started.
#[derive(Resource, Debug, Default)]
pub struct FadeAnimations {
    fades: Vec<Fade>,
    overlap: FadeOverlap,
}

impl FadeAnimations {
    pub fn new(overlap: FadeOverlap) -> Self {
        Self {
            fades: Vec::new(),
            overlap,
        }
    }

    pub fn len(&self) -> usize {
        self.fades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fades.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fade> {
        self.fades.iter()
    }

    pub fn start(&mut self, fade: Fade) {
        if self.overlap == FadeOverlap::Replace {
            // At most one fade owns any vertex
            for older in &mut self.fades {
                older.indices.retain(|i| !fade.indices.contains(i));
            }
            self.fades.retain(|f| !f.indices.is_empty());
        }
        self.fades.push(fade);
    }

    /// Drop every fade, e.g. after the mesh they index was replaced.
    pub fn clear(&mut self) {
        self.fades.clear();
    }

    /// Step every fade by `dt` seconds and write its color through `colors`.
    /// Later fades write last, so they win on shared vertices.
    pub fn advance(&mut self, dt: f32, colors: &mut ColorBuffer) {
        for fade in &mut self.fades {
            let color = fade.advance(dt);
            for &index in &fade.indices {
                colors.set_vertex_color(index, color);
            }
        }
        self.fades.retain(|f| !f.is_finished());
    }
}

pub fn advance_fades(
    time: Res<Time>,
    mut fades: ResMut<FadeAnimations>,
    mut colors: ResMut<ColorBuffer>,
) {
    if fades.is_empty() {
        return;
    }
    fades.advance(time.delta_secs(), &mut colors);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(overlap: FadeOverlap) -> FadeSettings {
        FadeSettings {
            duration_secs: 0.5,
            ease: FadeEase::QuadraticOut,
            overlap,
        }
    }

    #[test]
    fn converges_exactly_to_base() {
        let mut colors = ColorBuffer::filled(6, Color::BASE);
        let mut fades = FadeAnimations::new(FadeOverlap::Replace);
        for i in [0, 1, 2] {
            colors.set_vertex_color(i, Color::HOVER);
        }
        fades.start(Fade::new(
            Color::HOVER,
            Color::BASE,
            [0, 1, 2],
            &settings(FadeOverlap::Replace),
        ));

        for _ in 0..40 {
            fades.advance(1.0 / 60.0, &mut colors);
        }
        assert!(fades.is_empty());
        for i in [0, 1, 2] {
            assert_eq!(colors.get(i), Some(Color::rgb(0.0, 0.0, 0.4)));
        }
    }

    #[test]
    fn midway_is_between_endpoints() {
        let mut fade = Fade::new(
            Color::HOVER,
            Color::BASE,
            [0, 1, 2],
            &settings(FadeOverlap::Replace),
        );
        let c = fade.advance(0.25);
        assert!(!fade.is_finished());
        assert!(c.b < Color::HOVER.b && c.b > Color::BASE.b);
        assert!(c.g < Color::HOVER.g && c.g > Color::BASE.g);
        // ease-out is past the linear midpoint
        assert!(c.g < 0.25);
    }

    #[test]
    fn zero_duration_finishes_on_first_step() {
        let mut fade = Fade::new(
            Color::HOVER,
            Color::BASE,
            [0, 1, 2],
            &FadeSettings {
                duration_secs: 0.0,
                ..settings(FadeOverlap::Replace)
            },
        );
        assert_eq!(fade.advance(0.0), Color::BASE);
        assert!(fade.is_finished());
    }

    #[test]
    fn replace_keeps_one_fade_per_vertex() {
        let s = settings(FadeOverlap::Replace);
        let mut fades = FadeAnimations::new(FadeOverlap::Replace);
        fades.start(Fade::new(Color::HOVER, Color::BASE, [0, 1, 2], &s));
        fades.start(Fade::new(Color::HOVER, Color::BASE, [1, 2, 3], &s));
        assert_eq!(fades.len(), 2);
        let owned: Vec<&[u32]> = fades.iter().map(Fade::indices).collect();
        assert_eq!(owned, vec![&[0u32][..], &[1u32, 2, 3][..]]);

        fades.start(Fade::new(Color::HOVER, Color::BASE, [0, 1, 2], &s));
        let owned: Vec<&[u32]> = fades.iter().map(Fade::indices).collect();
        assert_eq!(owned, vec![&[3u32][..], &[0u32, 1, 2][..]]);
    }

    #[test]
    fn layered_fades_stack_and_newest_writes_last() {
        let s = settings(FadeOverlap::Layered);
        let mut colors = ColorBuffer::filled(4, Color::BASE);
        let mut fades = FadeAnimations::new(FadeOverlap::Layered);

        fades.start(Fade::new(Color::HOVER, Color::BASE, [0, 1, 2], &s));
        fades.advance(0.3, &mut colors);
        fades.start(Fade::new(Color::HOVER, Color::BASE, [0, 1, 2], &s));
        assert_eq!(fades.len(), 2);

        fades.advance(0.1, &mut colors);
        let newest = fades.iter().last().unwrap().color();
        assert_eq!(colors.get(0), Some(newest));

        // older one finishes first, newer keeps going
        fades.advance(0.15, &mut colors);
        assert_eq!(fades.len(), 1);
    }
}
