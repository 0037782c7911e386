use std::time::{Duration, Instant};

use crate::{
    assets::store::SceneAssets,
    encode::sink::{FrameSink, SinkConfig},
    foundation::core::StepIndex,
    foundation::error::{SnowError, SnowResult},
    grid::activity::ActivityGrid,
    render::compositor::FrameCompositor,
    render::surface::FrameRGBA,
    scene::config::SceneConfig,
    session::animation::{Animation, ambient_rng},
};

/// Whole-run statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames pushed to the sink (one per cell).
    pub frames: u64,
    /// Triggers that fired.
    pub triggers_hit: usize,
    /// Triggers on the grid.
    pub triggers_total: usize,
    /// Seed used for scenery, bursts and snow.
    pub seed: u64,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

fn resolve_seed(config: &SceneConfig) -> u64 {
    config.seed.unwrap_or_else(rand::random)
}

/// Animate `grid` and stream one frame per step into `sink`.
///
/// The sink sees `begin`, then frames `0..rows*cols` in order, then `end`. The first error aborts
/// the run.
#[tracing::instrument(skip_all, fields(rows = grid.rows(), cols = grid.cols()))]
pub fn run(
    grid: ActivityGrid,
    assets: SceneAssets,
    config: &SceneConfig,
    sink: &mut dyn FrameSink,
) -> SnowResult<RunStats> {
    let seed = resolve_seed(config);
    let overlay_fonts = assets.has_overlay_fonts();
    let compositor = FrameCompositor::new(config, assets, &grid)?;
    let mut anim = Animation::new(grid, config, seed)?;
    let mut ambient = ambient_rng(seed);

    let canvas = compositor.canvas();
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        frame_delay_ms: config.frame_delay_ms,
        background: config.palette.background,
    })?;
    tracing::info!(
        seed,
        steps = anim.total_steps(),
        triggers = anim.triggers().len(),
        width = canvas.width,
        height = canvas.height,
        overlay_fonts,
        "render started"
    );

    let total = anim.total_steps();
    let started = Instant::now();
    let mut frames = 0u64;
    while anim.advance().is_some() {
        let frame = anim.compose(&compositor, started.elapsed(), &mut ambient)?;
        sink.push_frame(StepIndex(frames), &frame)?;
        frames += 1;
        tracing::debug!(
            "frame {frames}/{total} (hits {})",
            anim.triggers().hit_count()
        );
    }
    sink.end()?;

    let stats = RunStats {
        frames,
        triggers_hit: anim.triggers().hit_count(),
        triggers_total: anim.triggers().len(),
        seed,
        elapsed: started.elapsed(),
    };
    tracing::info!(
        frames = stats.frames,
        hits = stats.triggers_hit,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "render finished"
    );
    Ok(stats)
}

/// Render only frame `step`, replaying every earlier step to reach its state.
///
/// Elapsed time is simulated as `step * frame_delay_ms` so previews are reproducible.
#[tracing::instrument(skip(grid, assets, config))]
pub fn render_single_frame(
    grid: ActivityGrid,
    assets: SceneAssets,
    config: &SceneConfig,
    step: u64,
) -> SnowResult<FrameRGBA> {
    let total = (grid.rows() * grid.cols()) as u64;
    if step >= total {
        return Err(SnowError::validation(format!(
            "step {step} is outside the run (0..{total})"
        )));
    }

    let seed = resolve_seed(config);
    let compositor = FrameCompositor::new(config, assets, &grid)?;
    let mut anim = Animation::new(grid, config, seed)?;
    let mut ambient = ambient_rng(seed);
    for _ in 0..=step {
        anim.advance();
    }
    let elapsed = Duration::from_millis(step.saturating_mul(u64::from(config.frame_delay_ms)));
    anim.compose(&compositor, elapsed, &mut ambient)
}

#[cfg(test)]
#[path = "../../tests/unit/session/runner.rs"]
mod tests;
