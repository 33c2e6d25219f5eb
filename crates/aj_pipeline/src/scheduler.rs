use crate::config::ScheduleConfig;
use crate::coordinator::Coordinator;
use aj_core::MessagingApi;
use chrono::{DateTime, Days, NaiveDate, Timelike, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Next trigger instant strictly after `now`: the next interval boundary,
/// clamped into the daily active window of the configured timezone.
pub fn next_fire(now: DateTime<Utc>, config: &ScheduleConfig) -> DateTime<Utc> {
    let local = now.with_timezone(&config.utc_offset);
    let minutes_now = local.hour() * 60 + local.minute();
    let next_slot = (minutes_now / config.interval_minutes + 1) * config.interval_minutes;

    let (mut fire_date, slot) = if next_slot >= 24 * 60 {
        (next_day(local.date_naive()), 0)
    } else {
        (local.date_naive(), next_slot)
    };

    let mut hour = slot / 60;
    let mut minute = slot % 60;
    if hour < config.window_start_hour {
        hour = config.window_start_hour;
        minute = 0;
    } else if hour > config.window_end_hour {
        fire_date = next_day(fire_date);
        hour = config.window_start_hour;
        minute = 0;
    }

    let naive = fire_date.and_hms_opt(hour, minute, 0).unwrap();
    naive
        .and_local_timezone(config.utc_offset)
        .unwrap()
        .with_timezone(&Utc)
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap()
}

/// The recurring trigger. Each tick either starts a full run or is skipped
/// by the coordinator's in-flight guard; skipped ticks are never replayed.
pub struct Scheduler {
    coordinator: Arc<Coordinator>,
    messaging: Arc<dyn MessagingApi>,
    config: ScheduleConfig,
    chat_id: String,
}

impl Scheduler {
    pub fn new(
        coordinator: Arc<Coordinator>,
        messaging: Arc<dyn MessagingApi>,
        config: ScheduleConfig,
        chat_id: String,
    ) -> Self {
        Self {
            coordinator,
            messaging,
            config,
            chat_id,
        }
    }

    /// Spawn the scheduler loop. Runs one validation tick shortly after
    /// startup, then fires on every interval boundary inside the daily
    /// window until the process exits.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "⏰ Content scheduler active: every {} minutes, {:02}:00-{:02}:xx ({})",
                self.config.interval_minutes,
                self.config.window_start_hour,
                self.config.window_end_hour,
                self.config.utc_offset
            );

            let startup_note = format!(
                "🤖 *Aqlli Jurnalist avtomatlashtirildi*\n\n\
                 Tizim ishga tushdi va har {} daqiqada yangi kontent yaratadi.\n\n\
                 📅 Jadval: {:02}:00 - {:02}:00",
                self.config.interval_minutes,
                self.config.window_start_hour,
                self.config.window_end_hour
            );
            if let Err(e) = self.messaging.send_message(&self.chat_id, &startup_note).await {
                warn!(error = %e, "Startup notification failed");
            }

            tokio::time::sleep(self.config.startup_delay).await;
            info!("🚀 Initial run: validating the pipeline right after startup");
            self.coordinator.run_once().await;

            loop {
                let now = Utc::now();
                let next = next_fire(now, &self.config);
                let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
                debug!(next = %next, "Sleeping until the next tick");
                tokio::time::sleep(wait).await;
                self.coordinator.run_once().await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    fn at_local(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        // 2025-03-10 in local UTC+5 terms, expressed as UTC.
        let config = ScheduleConfig::default();
        config
            .utc_offset
            .with_ymd_and_hms(2025, 3, 10, hour, minute, second)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn local_parts(fire: DateTime<Utc>) -> (u32, u32, u32, u32) {
        let config = ScheduleConfig::default();
        let local = fire.with_timezone(&config.utc_offset);
        (local.day(), local.hour(), local.minute(), local.second())
    }

    #[test]
    fn mid_window_tick_lands_on_the_next_half_hour() {
        let fire = next_fire(at_local(10, 7, 12), &ScheduleConfig::default());
        assert_eq!(local_parts(fire), (10, 10, 30, 0));
    }

    #[test]
    fn before_window_clamps_to_window_start() {
        let fire = next_fire(at_local(8, 10, 0), &ScheduleConfig::default());
        assert_eq!(local_parts(fire), (10, 9, 0, 0));
    }

    #[test]
    fn after_window_rolls_to_next_morning() {
        let fire = next_fire(at_local(21, 45, 0), &ScheduleConfig::default());
        assert_eq!(local_parts(fire), (11, 9, 0, 0));
    }

    #[test]
    fn last_window_slot_still_fires() {
        let fire = next_fire(at_local(21, 10, 0), &ScheduleConfig::default());
        assert_eq!(local_parts(fire), (10, 21, 30, 0));
    }

    #[test]
    fn late_night_rolls_past_midnight_into_the_window() {
        let fire = next_fire(at_local(23, 40, 0), &ScheduleConfig::default());
        assert_eq!(local_parts(fire), (11, 9, 0, 0));
    }

    #[test]
    fn fire_time_is_strictly_in_the_future() {
        let now = at_local(10, 30, 0);
        let fire = next_fire(now, &ScheduleConfig::default());
        assert!(fire > now);
        assert_eq!(local_parts(fire), (10, 11, 0, 0));
    }
}
