//! Free-text clock-time extraction boundary
//!
//! When the user typed something like "around 6:30 pm" instead of answering
//! a time prompt, the validator asks this collaborator to pull a 24-hour
//! time out of the transcript. Absence is a normal answer here, never an
//! error: the state machine delegates when nothing is found.

/// Extracts a 24-hour `HH:MM` time from a free-text utterance
pub trait ClockTimeParser: Send + Sync {
    /// `None` when the transcript carries no recognizable time
    fn parse_clock_time(&self, transcript: &str) -> Option<String>;
}

/// Parser that never finds a time. Useful when transcripts are not
/// expected to carry one.
pub struct NullClockTimeParser;

impl ClockTimeParser for NullClockTimeParser {
    fn parse_clock_time(&self, _transcript: &str) -> Option<String> {
        None
    }
}

/// Scans for digital-clock shapes: "18:30", "6:30 pm", "6pm", "7 am".
/// Bare numbers without a meridiem are ignored so ages and street numbers
/// don't read as times.
pub struct DigitalClockParser;

impl ClockTimeParser for DigitalClockParser {
    fn parse_clock_time(&self, transcript: &str) -> Option<String> {
        let lower = transcript.to_lowercase();
        let tokens: Vec<&str> = lower
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .collect();

        for (index, token) in tokens.iter().enumerate() {
            let (body, attached) = split_meridiem(token);
            let meridiem = attached.or_else(|| {
                tokens
                    .get(index + 1)
                    .copied()
                    .filter(|next| *next == "am" || *next == "pm")
            });
            if let Some((hour, minute)) = parse_clock_body(body, meridiem) {
                return Some(format!("{:02}:{:02}", hour, minute));
            }
        }

        None
    }
}

/// Split an attached meridiem suffix off a token: "6:30pm" -> ("6:30", Some("pm"))
fn split_meridiem(token: &str) -> (&str, Option<&str>) {
    for suffix in ["am", "pm"] {
        if let Some(body) = token.strip_suffix(suffix) {
            if !body.is_empty() {
                return (body, Some(suffix));
            }
        }
    }
    (token, None)
}

fn parse_clock_body(body: &str, meridiem: Option<&str>) -> Option<(u32, u32)> {
    let (hour_str, minute_str) = match body.split_once(':') {
        Some((hour, minute)) => (hour, minute),
        None => (body, "00"),
    };
    if hour_str.is_empty() || !hour_str.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if minute_str.is_empty() || !minute_str.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let mut hour: u32 = hour_str.parse().ok()?;
    let minute: u32 = minute_str.parse().ok()?;
    if minute > 59 {
        return None;
    }

    match meridiem {
        Some(half) => {
            if hour == 0 || hour > 12 {
                return None;
            }
            if half == "pm" && hour != 12 {
                hour += 12;
            }
            if half == "am" && hour == 12 {
                hour = 0;
            }
        }
        None => {
            // only an explicit HH:MM shape counts without a meridiem
            if !body.contains(':') || hour > 23 {
                return None;
            }
        }
    }

    Some((hour, minute))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twenty_four_hour_shape() {
        let parser = DigitalClockParser;

        assert_eq!(parser.parse_clock_time("be there at 18:05"), Some("18:05".to_string()));
        assert_eq!(parser.parse_clock_time("09:00 sharp"), Some("09:00".to_string()));
    }

    #[test]
    fn test_meridiem_shapes() {
        let parser = DigitalClockParser;

        assert_eq!(parser.parse_clock_time("around 6:30 pm"), Some("18:30".to_string()));
        assert_eq!(parser.parse_clock_time("6pm works"), Some("18:00".to_string()));
        assert_eq!(parser.parse_clock_time("7 am"), Some("07:00".to_string()));
        assert_eq!(parser.parse_clock_time("12 am"), Some("00:00".to_string()));
        assert_eq!(parser.parse_clock_time("12:15 pm"), Some("12:15".to_string()));
    }

    #[test]
    fn test_bare_numbers_are_not_times() {
        let parser = DigitalClockParser;

        assert_eq!(parser.parse_clock_time("I am 25"), None);
        assert_eq!(parser.parse_clock_time("at 188 Carlton St"), None);
        assert_eq!(parser.parse_clock_time("no time here"), None);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let parser = DigitalClockParser;

        assert_eq!(parser.parse_clock_time("25:00"), None);
        assert_eq!(parser.parse_clock_time("10:75"), None);
        assert_eq!(parser.parse_clock_time("13 pm"), None);
    }

    #[test]
    fn test_null_parser_always_misses() {
        assert_eq!(NullClockTimeParser.parse_clock_time("6:30 pm"), None);
    }
}
