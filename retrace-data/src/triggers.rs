//! Trigger timestamp files and their generator.
//!
//! A trigger is the capture time of one rendered frame, stored as an integer
//! number of ticks. The trigger file is plain text with one tick value per line.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{DataFormatError, Result};

/// Timestamp in ticks of 1/10,000,000 s.
pub type Tick = u64;

/// Number of ticks in one second.
pub const TICKS_PER_SECOND: u64 = 10_000_000;

/// Convert a tick count to seconds at the given tick rate.
pub fn ticks_to_seconds(tick: Tick, ticks_per_second: u64) -> f64 {
    tick as f64 / ticks_per_second as f64
}

/// Parse a trigger list, one non-negative integer per line.
///
/// Blank lines and surrounding whitespace are ignored. Ascending order is the
/// generator's responsibility and is not enforced here.
pub fn parse_triggers<R: BufRead>(reader: R) -> Result<Vec<Tick>> {
    let mut triggers = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.trim();
        if content.is_empty() {
            continue;
        }
        let tick = content
            .parse::<Tick>()
            .map_err(|_| DataFormatError::InvalidTrigger {
                line: index + 1,
                content: content.to_string(),
            })?;
        triggers.push(tick);
    }

    if let Some(i) = triggers.windows(2).position(|w| w[1] < w[0]) {
        debug!(
            "Trigger list is not ascending at entry {} ({} -> {})",
            i + 1,
            triggers[i],
            triggers[i + 1]
        );
    }

    Ok(triggers)
}

/// Load a trigger file from disk.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_triggers(path: impl AsRef<Path>) -> Result<Vec<Tick>> {
    let file = File::open(path.as_ref())?;
    let triggers = parse_triggers(BufReader::new(file))?;
    debug!("Loaded {} triggers", triggers.len());
    Ok(triggers)
}

/// Write triggers in the trigger-file format.
pub fn write_triggers<W: Write>(mut writer: W, triggers: &[Tick]) -> Result<()> {
    for tick in triggers {
        writeln!(writer, "{tick}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Where inside each frame interval the trigger is placed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TriggerAlignment {
    /// Beginning of the frame interval.
    #[default]
    Start,
    /// Center of the frame interval.
    Mid,
    /// End of the frame interval.
    End,
    /// Arbitrary fraction of the frame interval, in `[0, 1]`.
    Offset(f64),
}

impl TriggerAlignment {
    /// Fraction of a frame interval added to each frame index.
    pub fn offset(self) -> f64 {
        match self {
            TriggerAlignment::Start => 0.0,
            TriggerAlignment::Mid => 0.5,
            TriggerAlignment::End => 1.0,
            TriggerAlignment::Offset(offset) => offset,
        }
    }

    fn half_steps(self) -> Option<u128> {
        match self {
            TriggerAlignment::Start => Some(0),
            TriggerAlignment::Mid => Some(1),
            TriggerAlignment::End => Some(2),
            TriggerAlignment::Offset(_) => None,
        }
    }
}

/// Generate `n_frames` evenly spaced triggers over `duration` ticks.
///
/// Frame `i` gets `floor((i + offset) / n_frames * duration)`.
pub fn generate_triggers(
    n_frames: usize,
    duration: Tick,
    alignment: TriggerAlignment,
) -> Result<Vec<Tick>> {
    if n_frames == 0 {
        return Err(DataFormatError::InvalidGenerator(
            "frame count must be at least 1".to_string(),
        ));
    }
    let offset = alignment.offset();
    if !(0.0..=1.0).contains(&offset) {
        return Err(DataFormatError::InvalidGenerator(format!(
            "alignment offset must be in [0, 1], got {offset}"
        )));
    }

    let triggers: Vec<Tick> = match alignment.half_steps() {
        // Named alignments sit on half-frame boundaries, so they stay exact
        // in integer ticks.
        Some(k) => {
            let denom = 2 * n_frames as u128;
            (0..n_frames as u128)
                .map(|i| ((2 * i + k) * duration as u128 / denom) as Tick)
                .collect()
        }
        None => {
            let n = n_frames as f64;
            let total = duration as f64;
            (0..n_frames)
                .map(|i| ((i as f64 + offset) * total / n).floor() as Tick)
                .collect()
        }
    };

    info!(
        "Generated {} triggers over {} ticks ({:?} alignment)",
        triggers.len(),
        duration,
        alignment
    );
    Ok(triggers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_one_per_line() {
        let triggers = parse_triggers(Cursor::new("0\n2500000\n5000000\n")).unwrap();
        assert_eq!(triggers, vec![0, 2_500_000, 5_000_000]);
    }

    #[test]
    fn test_parse_skips_blank_lines_and_whitespace() {
        let triggers = parse_triggers(Cursor::new("  10 \n\n20\r\n\n")).unwrap();
        assert_eq!(triggers, vec![10, 20]);
    }

    #[test]
    fn test_parse_rejects_negative() {
        let err = parse_triggers(Cursor::new("0\n-5\n")).unwrap_err();
        match err {
            DataFormatError::InvalidTrigger { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "-5");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_fractional() {
        assert!(parse_triggers(Cursor::new("1.5\n")).is_err());
    }

    #[test]
    fn test_parse_keeps_descending_order() {
        let triggers = parse_triggers(Cursor::new("30\n10\n")).unwrap();
        assert_eq!(triggers, vec![30, 10]);
    }

    #[test]
    fn test_write_then_parse() {
        let mut buffer = Vec::new();
        write_triggers(&mut buffer, &[0, 7, 42]).unwrap();
        assert_eq!(String::from_utf8(buffer.clone()).unwrap(), "0\n7\n42\n");
        assert_eq!(parse_triggers(Cursor::new(buffer)).unwrap(), vec![0, 7, 42]);
    }

    #[test]
    fn test_generate_start_aligned() {
        let triggers = generate_triggers(4, TICKS_PER_SECOND, TriggerAlignment::Start).unwrap();
        assert_eq!(triggers, vec![0, 2_500_000, 5_000_000, 7_500_000]);
    }

    #[test]
    fn test_generate_mid_aligned() {
        let triggers = generate_triggers(4, TICKS_PER_SECOND, TriggerAlignment::Mid).unwrap();
        assert_eq!(triggers, vec![1_250_000, 3_750_000, 6_250_000, 8_750_000]);
    }

    #[test]
    fn test_generate_end_aligned() {
        let triggers = generate_triggers(4, TICKS_PER_SECOND, TriggerAlignment::End).unwrap();
        assert_eq!(triggers, vec![2_500_000, 5_000_000, 7_500_000, 10_000_000]);
    }

    #[test]
    fn test_generate_mid_aligned_is_exact() {
        let triggers = generate_triggers(25, TICKS_PER_SECOND, TriggerAlignment::Mid).unwrap();
        assert_eq!(triggers[20], 8_200_000);
        for (i, &tick) in triggers.iter().enumerate() {
            assert_eq!(tick, (2 * i as u64 + 1) * 200_000);
        }
    }

    #[test]
    fn test_generate_custom_offset() {
        let triggers = generate_triggers(2, 1000, TriggerAlignment::Offset(0.25)).unwrap();
        assert_eq!(triggers, vec![125, 625]);
    }

    #[test]
    fn test_generate_invalid_parameters() {
        assert!(generate_triggers(0, 1000, TriggerAlignment::Start).is_err());
        assert!(generate_triggers(3, 1000, TriggerAlignment::Offset(1.5)).is_err());
        assert!(generate_triggers(3, 1000, TriggerAlignment::Offset(f64::NAN)).is_err());
    }

    #[test]
    fn test_generate_is_ascending() {
        let triggers = generate_triggers(4096, 10 * TICKS_PER_SECOND, TriggerAlignment::Mid).unwrap();
        assert_eq!(triggers.len(), 4096);
        assert!(triggers.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_ticks_to_seconds() {
        assert_eq!(ticks_to_seconds(25_000_000, TICKS_PER_SECOND), 2.5);
    }
}
