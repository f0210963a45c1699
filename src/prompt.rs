//! Prompt construction.

use chrono::NaiveTime;

/// Formats a wall-clock time as a two-digit 12-hour `hh:mm AM` string.
pub fn clock_time(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

/// Parses a `HH:MM` (24-hour) string such as the one given to `--at`.
pub fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
}

/// Builds the instruction sent to the completion model for `time`.
pub fn build_prompt(time: &str) -> String {
    format!(
        "The current time is {time}.
Write a fun and imaginative way to describe this time.
It should be short and succinct, but, most importantly, include the actual time.
It will be used as an interesting way to display the current time, so, the time
should be clear. Each time you generate an answer, try and be creative about
the order of the words and where in the string the time is.
It should be slightly humourous, but, dry and possibly a little sarcastic and weird.
When you include the exact time, format it as words, not military time.
"
    )
}
