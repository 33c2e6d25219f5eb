use chrono::FixedOffset;
use std::time::Duration;

/// Tunables for one pipeline run. Defaults mirror the production values;
/// the overlap prefix lengths are deliberately configuration, not contract.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Recent-article window pulled for duplicate checks.
    pub dedup_window: usize,
    /// Recent-article window fed to trend analysis.
    pub trend_window: usize,
    /// Leading characters compared when testing title overlap.
    pub title_prefix_len: usize,
    /// Leading characters compared when testing summary overlap.
    pub summary_prefix_len: usize,
    /// Category assigned when no better signal exists.
    pub default_category: String,
    /// Category requested from the headline provider.
    pub headline_category: String,
    /// Region code requested from the headline provider.
    pub headline_region: String,
    /// Whether articles sourced from external headlines are also posted to
    /// the channel. Off by default: those stories are not ours to break.
    pub publish_external_headlines: bool,
    /// Public site base for deep links in channel posts.
    pub site_url: String,
    /// Channel or chat the publisher and notifier post to.
    pub chat_id: String,
    /// Rotating pool used when no external topic signal is available.
    pub fallback_topics: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dedup_window: 100,
            trend_window: 10,
            title_prefix_len: 20,
            summary_prefix_len: 30,
            default_category: "Texnologiya".to_string(),
            headline_category: "technology".to_string(),
            headline_region: "us".to_string(),
            publish_external_headlines: false,
            site_url: "https://aqlli-jurnalist.uz".to_string(),
            chat_id: String::new(),
            fallback_topics: [
                "O'zbekistonda sun'iy intellekt rivojlanishi",
                "Blokcheyn texnologiyalarining istiqboli",
                "Kvant kompyuterlari va kelajak",
                "5G tarmoqlari O'zbekistonda",
                "Elektromobillar bozori tendensiyasi",
                "Kibertxavfsizlik yangi tahdidlari",
                "IoT qishloq xo'jaligida qo'llanilishi",
                "Virtual reallik ta'limda",
                "Raqamli to'lovlar tizimi rivojlanishi",
                "Startap ekotizimi O'zbekistonda",
                "Cloud computing biznes uchun",
                "Ma'lumotlar analitikasi sohasida yangiliklar",
                "Mobil ilovalar bozori trendlari",
                "Kosmik texnologiyalar yangiliklari",
                "Biotexnologiya sohasidagi yutuqlar",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl PipelineConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(site_url) = std::env::var("SITE_URL") {
            config.site_url = site_url;
        }
        if let Ok(chat_id) = std::env::var("TELEGRAM_CHAT_ID") {
            config.chat_id = chat_id;
        }
        config.publish_external_headlines = std::env::var("ENABLE_NEWS_API_POSTING")
            .map(|v| v == "true")
            .unwrap_or(false);
        config
    }
}

/// Recurring-trigger parameters: a fixed cadence confined to a daily
/// window in a fixed-offset timezone.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub interval_minutes: u32,
    /// First hour of the active window (inclusive).
    pub window_start_hour: u32,
    /// Last hour of the active window (inclusive, so 21 allows 21:30).
    pub window_end_hour: u32,
    /// The platform runs on Tashkent time, UTC+5 year-round.
    pub utc_offset: FixedOffset,
    /// One validation run fires this long after startup.
    pub startup_delay: Duration,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_minutes: 30,
            window_start_hour: 9,
            window_end_hour: 21,
            utc_offset: FixedOffset::east_opt(5 * 3600).unwrap(),
            startup_delay: Duration::from_secs(5),
        }
    }
}
