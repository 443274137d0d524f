mod common;
mod test_damage_scenarios;
mod test_events;
mod test_weather;
