use std::time::Duration;

use clap::Subcommand;
use studyhub_core::timer::{format_clock, TICK_INTERVAL};
use studyhub_core::{Config, StudyHub, TickOutcome, TokioScheduler};

use crate::console::Console;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a countdown in the foreground until it expires
    Run {
        /// Countdown length in minutes (default: timer.default_minutes)
        #[arg(long)]
        minutes: Option<u32>,
        /// Tick period in milliseconds
        #[arg(long, hide = true)]
        tick_ms: Option<u64>,
    },
    /// List the configured presets
    Presets,
}

pub fn run(action: TimerAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run { minutes, tick_ms } => {
            let console = Console::new(&config.notifications).with_clock();
            let mut hub = StudyHub::open(console, config)?;
            if let Some(minutes) = minutes {
                hub.set_preset(minutes)?;
            }
            let period = tick_ms
                .filter(|&ms| ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(TICK_INTERVAL);

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            runtime.block_on(async {
                let (mut scheduler, mut ticks) = TokioScheduler::with_period(period);
                hub.start_timer(&mut scheduler);
                while let Some(generation) = ticks.recv().await {
                    if let TickOutcome::Expired { .. } = hub.tick(generation) {
                        break;
                    }
                }
            });
        }
        TimerAction::Presets => {
            for minutes in &config.timer.presets {
                println!("{}", format_clock(minutes.saturating_mul(60)));
            }
        }
    }
    Ok(())
}
