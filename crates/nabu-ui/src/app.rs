//! Application loop over a [`Backend`].

use anyhow::Context as _;
use nabu_engine::core::{AppControl, Backend};

use crate::context::{Context, FrameReport};
use crate::ui::Ui;

/// An immediate-mode application: rebuilds its whole interface every frame.
///
/// ```rust,ignore
/// struct Counter(u32);
///
/// impl App for Counter {
///     fn build(&mut self, ui: &mut Ui<'_>) -> AppControl {
///         if ui.button("+1").clicked() {
///             self.0 += 1;
///         }
///         ui.text(&format!("{}", self.0));
///         AppControl::Continue
///     }
/// }
/// ```
pub trait App {
    fn build(&mut self, ui: &mut Ui<'_>) -> AppControl;

    /// Called after every completed frame.
    fn on_report(&mut self, report: &FrameReport) {
        let _ = report;
    }
}

/// Drives `app` until it returns [`AppControl::Exit`] or the backend stops.
/// Returns the number of frames run.
pub fn run<B, A>(cx: &mut Context, backend: &mut B, app: &mut A) -> anyhow::Result<u64>
where
    B: Backend + ?Sized,
    A: App + ?Sized,
{
    let mut frames = 0u64;
    while backend.is_running() {
        let mut control = AppControl::Continue;
        let report = cx
            .run_frame(backend, |ui| control = app.build(ui))
            .with_context(|| format!("frame {frames} failed"))?;
        frames += 1;
        if !report.is_clean() {
            log::warn!("frame {}: {} error(s)", report.frame_index, report.errors.len());
        }
        app.on_report(&report);
        if control == AppControl::Exit {
            log::info!("app requested exit after {frames} frames");
            break;
        }
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use nabu_engine::coords::Viewport;
    use nabu_engine::core::{BackendError, HeadlessBackend};

    struct Countdown {
        left: u32,
        reports: u32,
    }

    impl App for Countdown {
        fn build(&mut self, ui: &mut Ui<'_>) -> AppControl {
            ui.text("tick");
            if self.left == 0 {
                return AppControl::Exit;
            }
            self.left -= 1;
            AppControl::Continue
        }

        fn on_report(&mut self, _: &FrameReport) {
            self.reports += 1;
        }
    }

    fn cx() -> Context {
        Context::new(Config::default().with_fixed_dt(1.0 / 60.0).with_strict(false))
    }

    #[test]
    fn runs_until_exit() {
        let mut backend = HeadlessBackend::new(Viewport::new(320.0, 240.0));
        let mut app = Countdown { left: 4, reports: 0 };
        let frames = run(&mut cx(), &mut backend, &mut app).unwrap();
        assert_eq!(frames, 5);
        assert_eq!(app.reports, 5);
        assert_eq!(backend.frames_rendered(), 5);
    }

    #[test]
    fn stops_with_the_backend() {
        let mut backend = HeadlessBackend::new(Viewport::new(320.0, 240.0)).with_max_frames(3);
        let mut app = Countdown { left: 100, reports: 0 };
        assert_eq!(run(&mut cx(), &mut backend, &mut app).unwrap(), 3);
    }

    #[test]
    fn render_failure_is_an_error() {
        let mut backend = HeadlessBackend::new(Viewport::new(320.0, 240.0));
        backend.fail_next_render(BackendError::Other("device lost".into()));
        let mut app = Countdown { left: 100, reports: 0 };
        let err = run(&mut cx(), &mut backend, &mut app).unwrap_err();
        assert!(format!("{err:#}").contains("device lost"));
    }
}
