//! Thread-backed tick delivery for hosts without their own timer facility.
//!
//! This stands in for a host event loop's one-shot timer. Hosts that already
//! have deferred messages (a UI runtime, an async executor) should deliver
//! [`ScheduledTick`]s through those instead.
//!
//! Each scheduled tick gets a short-lived thread that sleeps for the tick's
//! delay and then sends it into a channel. The host owns the receiving end
//! and feeds events to the player from its single event loop, so the player
//! itself is only ever touched from one thread.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::animation::{ScheduledTick, TickEvent};

/// Sends due ticks into a host event queue.
///
/// `E` is the host's event type; ticks are converted with `From<TickEvent>`.
#[derive(Debug)]
pub struct TickScheduler<E> {
    sender: Sender<E>,
}

impl<E> Clone for TickScheduler<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<E> TickScheduler<E>
where
    E: From<TickEvent> + Send + 'static,
{
    /// Schedule into an existing event queue.
    pub fn new(sender: Sender<E>) -> Self {
        Self { sender }
    }

    /// Create a scheduler together with a fresh event queue.
    pub fn channel() -> (Self, Receiver<E>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }

    /// Deliver `tick` after its delay.
    ///
    /// A tick whose receiver has gone away is discarded silently.
    pub fn schedule(&self, tick: ScheduledTick) -> io::Result<()> {
        let sender = self.sender.clone();
        thread::Builder::new()
            .name("glyphcast-tick".to_owned())
            .spawn(move || {
                if !tick.delay.is_zero() {
                    thread::sleep(tick.delay);
                }
                let _ = sender.send(E::from(tick.event));
            })?;
        Ok(())
    }

    /// Schedule the tick if there is one.
    pub fn schedule_opt(&self, tick: Option<ScheduledTick>) -> io::Result<()> {
        match tick {
            Some(tick) => self.schedule(tick),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationFrame, AnimationPlayer, PlayerEvent};
    use std::time::Duration;

    #[derive(Debug, PartialEq)]
    enum HostEvent {
        Tick(TickEvent),
    }

    impl From<TickEvent> for HostEvent {
        fn from(tick: TickEvent) -> Self {
            HostEvent::Tick(tick)
        }
    }

    #[test]
    fn test_tick_is_delivered() {
        let (scheduler, events) = TickScheduler::<HostEvent>::channel();
        let tick = ScheduledTick {
            delay: Duration::from_millis(5),
            event: TickEvent::any(),
        };
        scheduler.schedule(tick).unwrap();

        let received = events.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(received, HostEvent::Tick(TickEvent::any()));
    }

    #[test]
    fn test_drives_player_through_queue() {
        let frames = (0..3)
            .map(|i| AnimationFrame::new(i.to_string(), Duration::from_millis(1)))
            .collect();
        let mut player = AnimationPlayer::new(frames, Vec::new());
        let (scheduler, events) = TickScheduler::<HostEvent>::channel();

        scheduler.schedule_opt(player.start()).unwrap();
        for _ in 0..4 {
            let HostEvent::Tick(tick) = events.recv_timeout(Duration::from_secs(5)).unwrap();
            scheduler
                .schedule_opt(player.update(PlayerEvent::Tick(tick)))
                .unwrap();
        }

        assert_eq!(player.current_frame(), 1);
        assert_eq!(player.view(), "1");
    }

    #[test]
    fn test_dropped_receiver_is_not_an_error() {
        let (scheduler, events) = TickScheduler::<HostEvent>::channel();
        drop(events);
        assert!(scheduler.schedule_opt(None).is_ok());
        assert!(scheduler
            .schedule(ScheduledTick {
                delay: Duration::ZERO,
                event: TickEvent::any(),
            })
            .is_ok());
    }
}
