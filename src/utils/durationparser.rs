use chrono::Duration;
use models::InvalidInputError;

/// Parses `HH:MM:SS`, `MM:SS` or `SS`, each with an optional `.fff` / `,fff`
/// fraction on the seconds.
pub fn parse(input: &str) -> Result<Duration, InvalidInputError> {
    let invalid = || InvalidInputError::Timestamp(input.to_owned());
    let parts: Vec<&str> = input.trim().split(':').collect();
    if parts.len() > 3 {
        return Err(invalid());
    }

    let (whole, fraction) = match parts[parts.len() - 1].split_once(|c| c == '.' || c == ',') {
        Some((w, f)) => (w, Some(f)),
        None => (parts[parts.len() - 1], None),
    };
    let seconds = number(whole).ok_or_else(invalid)?;
    let millis = match fraction {
        Some(f) => {
            if f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let digits = &f[..f.len().min(3)];
            number(digits).ok_or_else(invalid)? * 10_i64.pow(3 - digits.len() as u32)
        }
        None => 0,
    };

    let mut higher = parts[..parts.len() - 1].iter().rev();
    let minutes = match higher.next() {
        Some(m) => number(m).ok_or_else(invalid)?,
        None => 0,
    };
    let hours = match higher.next() {
        Some(h) => number(h).ok_or_else(invalid)?,
        None => 0,
    };

    if (parts.len() > 1 && seconds >= 60) || (parts.len() > 2 && minutes >= 60) {
        return Err(invalid());
    }

    Duration::try_hours(hours)
        .zip(Duration::try_minutes(minutes))
        .and_then(|(h, m)| h.checked_add(&m))
        .zip(Duration::try_seconds(seconds))
        .and_then(|(hm, s)| hm.checked_add(&s))
        .and_then(|hms| hms.checked_add(&Duration::milliseconds(millis)))
        .ok_or_else(invalid)
}

fn number(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

pub trait DisplayTimestamp {
    fn display_timestamp(&self) -> String;
}

impl DisplayTimestamp for Duration {
    fn display_timestamp(&self) -> String {
        let total = self.num_milliseconds().max(0);
        let hours = total / 3_600_000;
        let minutes = total / 60_000 % 60;
        let seconds = total / 1000 % 60;
        let millis = total % 1000;
        if millis == 0 {
            format!("{hours:02}:{minutes:02}:{seconds:02}")
        } else {
            format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clock_forms() {
        assert_eq!(parse("00:05:00").unwrap(), Duration::minutes(5));
        assert_eq!(parse("01:02:03").unwrap(), Duration::seconds(3723));
        assert_eq!(parse("2:30").unwrap(), Duration::seconds(150));
        assert_eq!(parse("90").unwrap(), Duration::seconds(90));
        assert_eq!(
            parse("00:00:10.5").unwrap(),
            Duration::milliseconds(10_500)
        );
        assert_eq!(parse("0:1,25").unwrap(), Duration::milliseconds(1_250));
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "aa:bb:cc", "1:2:3:4", "00:61:00", "00:00:75", "-1", "10."] {
            assert_eq!(
                parse(bad),
                Err(InvalidInputError::Timestamp(bad.to_owned())),
                "{bad}"
            );
        }
    }

    #[test]
    fn rejects_non_digit_fraction() {
        for bad in ["00:00:10.ab€", "1.€", "5,1x"] {
            assert_eq!(parse(bad), Err(InvalidInputError::Timestamp(bad.to_owned())));
        }
    }

    #[test]
    fn rejects_out_of_range_values() {
        for bad in ["99999999999999999", "9999999999999:00:00", "99999999999999999999"] {
            assert_eq!(parse(bad), Err(InvalidInputError::Timestamp(bad.to_owned())));
        }
    }

    #[test]
    fn displays_as_clock() {
        assert_eq!(Duration::seconds(3723).display_timestamp(), "01:02:03");
        assert_eq!(
            Duration::milliseconds(10_500).display_timestamp(),
            "00:00:10.500"
        );
    }
}
