//! CSV parser for the storm events dataset.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::io::Read;
use tracing::debug;

use crate::records::StormEvent;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Decodes storm event rows from CSV bytes, decompressing first if the bytes
/// are gzip-compressed.
///
/// # Errors
///
/// Returns an error if decompression fails or any row does not deserialize.
pub fn parse_events(bytes: &[u8]) -> Result<Vec<StormEvent>> {
    if bytes.starts_with(&GZIP_MAGIC) {
        debug!(compressed_bytes = bytes.len(), "Decompressing gzip input");
        read_events(GzDecoder::new(bytes))
    } else {
        read_events(bytes)
    }
}

/// Reads storm event rows from any CSV reader with a header line.
pub fn read_events<R: Read>(reader: R) -> Result<Vec<StormEvent>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut events = Vec::new();

    for (line, result) in rdr.deserialize().enumerate() {
        let event: StormEvent = result.with_context(|| format!("invalid row {}", line + 1))?;
        events.push(event);
    }

    debug!(rows = events.len(), "Parsed storm events");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::magnitude::MagnitudeCode;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    const SAMPLE: &str = "\
STATE,EVTYPE,FATALITIES,INJURIES,PROPDMG,PROPDMGEXP,CROPDMG,CROPDMGEXP
AL,TORNADO,0,15,25,K,0,
TX,HEAT,3,2,0,,1.5,M
";

    #[test]
    fn test_parse_plain_csv() {
        let events = parse_events(SAMPLE.as_bytes()).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, "TORNADO");
        assert_eq!(events[0].injuries, 15.0);
        assert_eq!(events[0].property_damage_exp, MagnitudeCode::Thousand);
        assert_eq!(events[0].crop_damage_exp, MagnitudeCode::Empty);
        assert_eq!(events[1].crop_damage_amount(), 1_500_000.0);
    }

    #[test]
    fn test_parse_gzip_csv() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(SAMPLE.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();

        let events = parse_events(&compressed).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].event_type, "HEAT");
    }

    #[test]
    fn test_parse_empty_bytes_returns_no_rows() {
        let events = parse_events(&[]).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_parse_invalid_number() {
        let bad = "EVTYPE,FATALITIES,INJURIES,PROPDMG,PROPDMGEXP,CROPDMG,CROPDMGEXP\nHEAT,many,0,0,,0,\n";
        let err = parse_events(bad.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_parse_missing_column() {
        let bad = "EVTYPE,FATALITIES\nHEAT,1\n";
        assert!(parse_events(bad.as_bytes()).is_err());
    }
}
