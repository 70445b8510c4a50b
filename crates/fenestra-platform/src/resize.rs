//! Resize debouncing.
//!
//! Hosts tend to fire resize notifications in bursts while a window is being
//! dragged. [`ResizeController`] keeps only the latest one and hands it out
//! once `delay` has passed without a newer notification.

use fenestra_core::ResizeObservation;
use web_time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq)]
enum State {
    Idle,
    Pending {
        observation: ResizeObservation,
        deadline: Instant,
    },
}

#[derive(Debug)]
pub struct ResizeController {
    delay: Duration,
    state: State,
    seen_first: bool,
}

impl ResizeController {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: State::Idle,
            seen_first: false,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a notification. The very first one is dropped: it only reports
    /// the size the surface was created with.
    pub fn notify(&mut self, observation: ResizeObservation, now: Instant) {
        if !self.seen_first {
            self.seen_first = true;
            log::debug!("ignoring initial resize {observation:?}");
            return;
        }
        self.state = State::Pending {
            observation,
            deadline: now + self.delay,
        };
    }

    /// Hands out the pending observation once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<ResizeObservation> {
        match self.state {
            State::Pending {
                observation,
                deadline,
            } if now >= deadline => {
                self.state = State::Idle;
                Some(observation)
            }
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            State::Idle => None,
            State::Pending { deadline, .. } => Some(deadline),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, State::Pending { .. })
    }

    pub fn cancel(&mut self) {
        self.state = State::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(w: u32) -> ResizeObservation {
        ResizeObservation::DevicePixels {
            width: w,
            height: 480,
            dpr: 1.0,
        }
    }

    #[test]
    fn first_notification_is_ignored() {
        let t0 = Instant::now();
        let mut rc = ResizeController::new(Duration::from_millis(50));
        rc.notify(obs(640), t0);
        assert!(!rc.is_pending());
        assert_eq!(rc.poll(t0 + Duration::from_secs(1)), None);
    }

    #[test]
    fn burst_collapses_to_latest() {
        let t0 = Instant::now();
        let ms = Duration::from_millis;
        let mut rc = ResizeController::new(ms(50));
        rc.notify(obs(1), t0);

        rc.notify(obs(700), t0);
        rc.notify(obs(800), t0 + ms(20));
        rc.notify(obs(900), t0 + ms(40));
        assert_eq!(rc.deadline(), Some(t0 + ms(90)));

        assert_eq!(rc.poll(t0 + ms(89)), None);
        assert_eq!(rc.poll(t0 + ms(90)), Some(obs(900)));
        assert_eq!(rc.poll(t0 + ms(200)), None);
    }

    #[test]
    fn cancel_drops_pending() {
        let t0 = Instant::now();
        let mut rc = ResizeController::new(Duration::ZERO);
        rc.notify(obs(1), t0);
        rc.notify(obs(2), t0);
        rc.cancel();
        assert_eq!(rc.poll(t0), None);
        assert_eq!(rc.deadline(), None);
    }
}
