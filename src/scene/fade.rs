//! Opacity fades driven by a fixed timeline.

use bevy::color::Alpha;
use bevy::prelude::*;

pub const BACKDROP_FADE_SECS: f32 = 1.5;
pub const MATERIAL_FADE_DELAY_SECS: f32 = 0.2;
pub const MATERIAL_FADE_SECS: f32 = 1.0;

/// Anything whose opacity can be animated.
pub trait HasOpacity {
    fn opacity(&self) -> f32;
    fn set_opacity(&mut self, opacity: f32);
}

impl HasOpacity for Color {
    fn opacity(&self) -> f32 {
        self.alpha()
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.set_alpha(opacity);
    }
}

impl HasOpacity for StandardMaterial {
    fn opacity(&self) -> f32 {
        self.base_color.opacity()
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.base_color.set_opacity(opacity);
        if opacity < 1.0 && self.alpha_mode == AlphaMode::Opaque {
            self.alpha_mode = AlphaMode::Blend;
        }
    }
}

/// Depth-first walk from `root`, root included.
pub fn visit_tree<N, I>(root: N, mut children_of: impl FnMut(N) -> I, visit: &mut impl FnMut(N))
where
    N: Copy,
    I: IntoIterator<Item = N>,
{
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        visit(node);
        stack.extend(children_of(node));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Ease {
    Linear,
    /// Cubic ease-in.
    #[default]
    Power2In,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2In => t * t * t,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FadeTrack<T> {
    pub target: T,
    pub delay: f32,
    pub duration: f32,
    pub from: f32,
    pub ease: Ease,
}

impl<T> FadeTrack<T> {
    pub fn new(target: T, delay: f32, duration: f32) -> Self {
        Self {
            target,
            delay,
            duration,
            from: 1.0,
            ease: Ease::Power2In,
        }
    }

    pub fn end(&self) -> f32 {
        self.delay + self.duration
    }

    pub fn opacity_at(&self, t: f32) -> f32 {
        if t <= self.delay {
            return self.from;
        }
        if t >= self.end() || self.duration <= 0.0 {
            return 0.0;
        }
        let progress = (t - self.delay) / self.duration;
        self.from * (1.0 - self.ease.apply(progress))
    }
}

/// Tracks that all start together at `elapsed = 0`, each offset by its delay.
#[derive(Clone, Debug, Default)]
pub struct FadeTimeline<T> {
    elapsed: f32,
    tracks: Vec<FadeTrack<T>>,
}

impl<T> FadeTimeline<T> {
    pub fn new(tracks: Vec<FadeTrack<T>>) -> Self {
        Self { elapsed: 0.0, tracks }
    }

    pub fn tracks(&self) -> &[FadeTrack<T>] {
        &self.tracks
    }

    pub fn duration(&self) -> f32 {
        self.tracks.iter().map(FadeTrack::end).fold(0.0, f32::max)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration()
    }

    /// Moves the playhead and yields the opacity every track should now show.
    pub fn advance(&mut self, dt: f32) -> impl Iterator<Item = (&T, f32)> + '_ {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration());
        let t = self.elapsed;
        self.tracks.iter().map(move |track| (&track.target, track.opacity_at(t)))
    }
}

/// Backdrop first, then every material-carrying object 0.2s later.
pub fn exit_timeline<T>(backdrop: T, materials: impl IntoIterator<Item = T>) -> FadeTimeline<T> {
    let mut tracks = vec![FadeTrack::new(backdrop, 0.0, BACKDROP_FADE_SECS)];
    tracks.extend(
        materials
            .into_iter()
            .map(|target| FadeTrack::new(target, MATERIAL_FADE_DELAY_SECS, MATERIAL_FADE_SECS)),
    );
    FadeTimeline::new(tracks)
}
