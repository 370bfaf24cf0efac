use anyhow::Result;
use micronudger_core::config::NudgerConfig;
use owo_colors::OwoColorize;

pub fn run(config: &NudgerConfig) -> Result<()> {
    let config_path = NudgerConfig::config_path()?;
    let store = config.data_store();

    println!("{}", "Paths".bold());
    println!("  Config:      {}", config_path.display());
    println!("  Data:        {}", store.data_path().display());
    println!("  Habits:      {}", store.habits_path().display());
    println!("  Last batch:  {}", store.last_batch_path().display());
    println!("  Output:      {}", config.output_path().display());

    println!("\n{}", "Calendar defaults".bold());
    println!("  Name:        {}", config.calendar_name);
    println!("  Timezone:    {}", config.timezone);
    println!("  Duration:    {} min", config.duration_minutes);
    println!("  Alarm:       {}", config.add_alarm);
    println!("  Daily:       {}", config.repeat_daily);

    Ok(())
}
