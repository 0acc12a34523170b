//! The interactive loop.  Navigation commands arrive on a channel and
//! are handled strictly one after another: apply, render, present.
//! Holding a key down queues commands far faster than frames can be
//! painted, so two things keep the loop responsive.  Whatever is still
//! queued when a render is about to start is dealt with by a
//! `StalePolicy`, and a render that is overtaken by a new command is
//! abandoned half way and never shown.

use crossbeam::channel::Receiver;

use crate::canvas::Canvas;
use crate::error::Result;
use crate::render::{FractalRenderer, RenderOutcome};
use crate::view::{Command, Navigation, View};

/// What to do with commands that queued up while we were busy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StalePolicy {
    /// Throw them away.
    Drop,
    /// Apply them all, then render once.
    Coalesce,
}

impl Default for StalePolicy {
    fn default() -> Self {
        StalePolicy::Drop
    }
}

/// Owns the view, the frame being shown, and the frame being painted.
pub struct Explorer {
    renderer: FractalRenderer,
    view: View,
    nav: Navigation,
    policy: StalePolicy,
    front: Canvas,
    back: Canvas,
    frames: usize,
}

impl Explorer {
    /// An explorer painting `width` x `height` frames.  Nothing is
    /// rendered until `run` or `refresh` is called.
    pub fn new(renderer: FractalRenderer, width: usize, height: usize, view: View) -> Result<Explorer> {
        let front = Canvas::new(width, height)?;
        let back = front.clone();
        Ok(Explorer {
            renderer,
            view,
            nav: Navigation::default(),
            policy: StalePolicy::default(),
            front,
            back,
            frames: 0,
        })
    }

    /// Use different navigation steps.
    pub fn with_navigation(mut self, nav: Navigation) -> Self {
        self.nav = nav;
        self
    }

    /// Use a different stale-command policy.
    pub fn with_policy(mut self, policy: StalePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The current view.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// The last frame that was completely painted.
    pub fn frame(&self) -> &Canvas {
        &self.front
    }

    /// How many frames have been completed so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Render the current view, swapping it in if it completes.
    fn paint(&mut self, abort: &(dyn Fn() -> bool + Sync)) -> Result<RenderOutcome> {
        let outcome = self.renderer.render_until(&mut self.back, &self.view, abort)?;
        if outcome == RenderOutcome::Complete {
            std::mem::swap(&mut self.front, &mut self.back);
            self.frames += 1;
        }
        Ok(outcome)
    }

    /// Render the current view to completion.
    pub fn refresh(&mut self) -> Result<&Canvas> {
        self.paint(&|| false)?;
        Ok(&self.front)
    }

    /// Apply one command and render the result to completion.
    pub fn apply(&mut self, command: Command) -> Result<&Canvas> {
        self.view = self.view.apply(command, &self.nav);
        self.refresh()
    }

    /// Handle the commands still waiting in the queue, according to the
    /// stale policy.  Returns how many there were.
    fn settle(&mut self, commands: &Receiver<Command>) -> usize {
        let mut stale = 0;
        for command in commands.try_iter() {
            stale += 1;
            if self.policy == StalePolicy::Coalesce {
                self.view = self.view.apply(command, &self.nav);
            }
        }
        if stale > 0 {
            debug!("{:?} {} queued command(s)", self.policy, stale);
        }
        stale
    }

    /// Paint the initial frame, then serve commands until every sender
    /// has hung up.  `present` is handed each completed frame and must
    /// finish with it before the next render begins.  Returns the
    /// number of frames presented.
    pub fn run<F>(&mut self, commands: &Receiver<Command>, mut present: F) -> Result<usize>
    where
        F: FnMut(&Canvas),
    {
        let mut presented = 0;
        let abort = || !commands.is_empty();

        if self.paint(&abort)? == RenderOutcome::Complete {
            present(&self.front);
            presented += 1;
        }

        while let Ok(command) = commands.recv() {
            self.view = self.view.apply(command, &self.nav);
            self.settle(commands);
            match self.paint(&abort)? {
                RenderOutcome::Complete => {
                    info!(
                        "frame {}: zoom {} center {}",
                        self.frames,
                        self.view.zoom(),
                        self.view.center()
                    );
                    present(&self.front);
                    presented += 1;
                }
                RenderOutcome::Cancelled => debug!("frame superseded by {} queued", commands.len()),
            }
        }
        Ok(presented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorize::GradientColorizer;
    use crossbeam::channel::unbounded;
    use num::Complex;

    fn explorer() -> Explorer {
        let mut strip = Canvas::new(1, 64).unwrap();
        strip.draw_gradient();
        let renderer = FractalRenderer::new(GradientColorizer::new(&strip).unwrap()).with_threads(2);
        let view = View::new(20.0, Complex::new(-0.5, 0.0)).unwrap();
        Explorer::new(renderer, 40, 30, view).unwrap()
    }

    #[test]
    fn apply_renders_the_moved_view() {
        let mut e = explorer();
        let before = e.refresh().unwrap().clone();
        let after = e.apply(Command::ZoomIn).unwrap().clone();
        assert_ne!(before, after);
        assert_eq!(e.view().zoom(), 20.0 * 1.05);
        assert_eq!(e.frames(), 2);
    }

    #[test]
    fn run_presents_the_initial_frame_and_stops_on_hangup() {
        let mut e = explorer();
        let (tx, rx) = unbounded();
        drop(tx);
        let mut shown = Vec::new();
        let n = e.run(&rx, |frame| shown.push(frame.clone())).unwrap();
        assert_eq!(n, 1);
        assert_eq!(shown.len(), 1);
        assert_eq!(&shown[0], e.frame());
    }

    #[test]
    fn drop_policy_discards_the_backlog() {
        let mut e = explorer();
        let (tx, rx) = unbounded();
        for _ in 0..5 {
            tx.send(Command::PanRight).unwrap();
        }
        drop(tx);
        // The initial render is overtaken by the queue, the first
        // command is applied, the other four are dropped.
        let n = e.run(&rx, |_| ()).unwrap();
        assert_eq!(n, 1);
        assert_eq!(e.view().center(), Complex::new(-0.5 + 10.0 / 20.0, 0.0));
    }

    #[test]
    fn coalesce_policy_applies_the_backlog_once() {
        let mut e = explorer().with_policy(StalePolicy::Coalesce);
        let (tx, rx) = unbounded();
        for _ in 0..4 {
            tx.send(Command::ZoomIn).unwrap();
        }
        drop(tx);
        let n = e.run(&rx, |_| ()).unwrap();
        assert_eq!(n, 1);
        assert_eq!(e.frames(), 1);
        let expected = 20.0 * 1.05 * 1.05 * 1.05 * 1.05;
        assert!((e.view().zoom() - expected).abs() < 1e-9);
    }

    #[test]
    fn presented_frame_matches_a_fresh_render() {
        let mut e = explorer().with_policy(StalePolicy::Coalesce);
        let (tx, rx) = unbounded();
        tx.send(Command::PanUp).unwrap();
        tx.send(Command::ZoomOut).unwrap();
        drop(tx);
        let mut last = None;
        e.run(&rx, |frame| last = Some(frame.clone())).unwrap();

        let mut fresh = Canvas::new(40, 30).unwrap();
        e.renderer.render(&mut fresh, e.view()).unwrap();
        assert_eq!(last.unwrap(), fresh);
    }
}
